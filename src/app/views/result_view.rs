use egui::{Color32, RichText};
use egui_extras::{Column, TableBuilder};
use tracing::error;

use crate::app::views::View;
use crate::pipeline::domain::{DiseaseCatalog, LabelIndexMap, PredictionResult, SkinScreening};
use crate::pipeline::Outcome;

pub const REJECTION_MESSAGE: &str = "⚠ Ảnh không phải da người. Vui lòng thử ảnh khác.";

/// Right column: diagnosis, rejection warning or inference failure.
pub struct ResultView<'a> {
    outcome: &'a Result<Outcome, String>,
    labels: &'a LabelIndexMap,
    catalog: &'a DiseaseCatalog,
}

impl<'a> ResultView<'a> {
    pub fn new(
        outcome: &'a Result<Outcome, String>,
        labels: &'a LabelIndexMap,
        catalog: &'a DiseaseCatalog,
    ) -> Self {
        Self {
            outcome,
            labels,
            catalog,
        }
    }

    fn draw_field(ui: &mut egui::Ui, label: &str, value: &str) {
        ui.horizontal_wrapped(|ui| {
            ui.strong(label);
            ui.label(value);
        });
    }

    fn draw_screening(ui: &mut egui::Ui, screening: &SkinScreening) {
        ui.label(
            RichText::new(format!(
                "Tỷ lệ điểm ảnh màu da: {:.1}%",
                screening.ratio() * 100.0
            ))
            .weak(),
        );
    }

    fn draw_prediction(&self, ui: &mut egui::Ui, prediction: &PredictionResult) {
        ui.label(
            RichText::new(format!("Kết quả: {}", prediction.headline()))
                .size(22.0)
                .strong(),
        );
        ui.add_space(6.0);

        let info = &prediction.info;
        Self::draw_field(ui, "Tên tiếng Việt:", &info.vietnamese_name);
        Self::draw_field(ui, "Nguyên nhân:", &info.cause);
        Self::draw_field(ui, "Dấu hiệu nhận biết:", &info.signs);
        Self::draw_field(ui, "Hướng điều trị:", &info.treatment);

        ui.add_space(6.0);
        if ui.button("Sao chép báo cáo (JSON)").clicked() {
            match prediction.to_report_json() {
                Ok(json) => ui.ctx().copy_text(json),
                Err(e) => error!("Failed to serialize report: {}", e),
            }
        }

        egui::CollapsingHeader::new("Xác suất theo từng lớp")
            .default_open(false)
            .show(ui, |ui| self.draw_probabilities(ui, prediction));
    }

    fn draw_probabilities(&self, ui: &mut egui::Ui, prediction: &PredictionResult) {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto())
            .column(Column::remainder())
            .column(Column::auto())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Mã");
                });
                header.col(|ui| {
                    ui.strong("Bệnh");
                });
                header.col(|ui| {
                    ui.strong("Xác suất");
                });
            })
            .body(|mut body| {
                for (index, code) in self.labels.codes().enumerate() {
                    let probability =
                        prediction.probabilities.get(index).copied().unwrap_or(0.0);
                    let name = self
                        .catalog
                        .get(code)
                        .map(|info| info.english_name.clone())
                        .unwrap_or_else(|| code.to_uppercase());
                    let selected = index == prediction.index;

                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.monospace(code);
                        });
                        row.col(|ui| {
                            if selected {
                                ui.strong(name);
                            } else {
                                ui.label(name);
                            }
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.2}%", probability * 100.0));
                        });
                    });
                }
            });
    }
}

impl View for ResultView<'_> {
    fn draw(&mut self, ui: &mut egui::Ui) {
        ui.heading("Kết quả chẩn đoán");
        ui.separator();

        match self.outcome {
            Ok(Outcome::Rejected(screening)) => {
                ui.colored_label(Color32::from_rgb(230, 150, 0), REJECTION_MESSAGE);
                Self::draw_screening(ui, screening);
            }
            Ok(Outcome::Diagnosed {
                screening,
                prediction,
            }) => {
                self.draw_prediction(ui, prediction);
                Self::draw_screening(ui, screening);
            }
            Err(message) => {
                ui.colored_label(
                    Color32::from_rgb(220, 50, 50),
                    format!("Không thể phân tích ảnh: {message}"),
                );
            }
        }
    }
}
