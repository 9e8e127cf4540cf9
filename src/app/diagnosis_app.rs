use std::borrow::Cow;
use std::path::PathBuf;

use egui::{Align, Layout, RichText, TextureHandle, TextureOptions};
use image::{imageops, RgbImage};
use tracing::{error, info, warn};

use crate::app::views::{ResultView, SpecimenView, View};
use crate::common::{Specimen, SpecimenSource};
use crate::config::UiSettings;
use crate::error::{AppError, InputError};
use crate::pipeline::{DiagnosisPipeline, Outcome};

pub const TITLE: &str = "Hệ thống hỗ trợ chẩn đoán Ung thư Da";
pub const SUBTITLE: &str = "Chọn ảnh để hệ thống AI phân tích và hiển thị thông tin bệnh";
pub const PROMPT: &str = "Vui lòng chọn ảnh để bắt đầu phân tích.";

/// The most recent image and what the pipeline made of it.
struct Submission {
    specimen: Specimen,
    texture: TextureHandle,
    outcome: Result<Outcome, String>,
}

pub struct DiagnosisApp {
    pipeline: DiagnosisPipeline,
    path_input: String,
    submission: Option<Submission>,
    errors: Vec<AppError>,
}

impl DiagnosisApp {
    pub fn new(pipeline: DiagnosisPipeline) -> Self {
        Self {
            pipeline,
            path_input: String::new(),
            submission: None,
            errors: Vec::new(),
        }
    }

    pub fn start_gui(settings: &UiSettings, pipeline: DiagnosisPipeline) -> Result<(), AppError> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(egui::vec2(settings.width, settings.height))
                .with_title(settings.window_title.clone())
                .with_drag_and_drop(true),
            ..Default::default()
        };

        eframe::run_native(
            &settings.window_title,
            options,
            Box::new(move |_cc| Ok(Box::new(DiagnosisApp::new(pipeline)))),
        )
        .map_err(|e| AppError::Ui(e.to_string()))
    }

    /// Runs one specimen through the pipeline to completion and keeps the
    /// result for display. Failures stay scoped to this submission.
    fn submit(&mut self, ctx: &egui::Context, loaded: Result<Specimen, InputError>) {
        let specimen = match loaded {
            Ok(specimen) => specimen,
            Err(e) => {
                warn!("Rejected input: {}", e);
                self.errors.push(e.into());
                return;
            }
        };

        info!("Received specimen {} from {}", specimen.id(), specimen.source());
        let max_side = ctx.input(|i| i.max_texture_side);
        let image = fit_texture_side(specimen.image(), max_side);
        let color_image = egui::ColorImage::from_rgb(
            [image.width() as usize, image.height() as usize],
            image.as_raw().as_slice(),
        );
        let texture = ctx.load_texture(
            format!("specimen-{}", specimen.id()),
            color_image,
            TextureOptions::LINEAR,
        );

        let outcome = self.pipeline.process(specimen.clone()).map_err(|e| {
            error!("Diagnosis failed: {}", e);
            let message = e.to_string();
            self.errors.push(e);
            message
        });

        self.submission = Some(Submission {
            specimen,
            texture,
            outcome,
        });
    }

    fn submit_path(&mut self, ctx: &egui::Context) {
        let path = self.path_input.trim();
        let loaded = if path.is_empty() {
            Err(InputError::NoImage)
        } else {
            Specimen::from_path(&PathBuf::from(path))
        };
        self.submit(ctx, loaded);
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
        let Some(file) = dropped else {
            return;
        };

        let loaded = if let Some(path) = &file.path {
            self.path_input = path.display().to_string();
            Specimen::from_path(path)
        } else if let Some(bytes) = &file.bytes {
            Specimen::from_bytes(bytes, SpecimenSource::Dropped(file.name.clone()))
        } else {
            Err(InputError::NoImage)
        };
        self.submit(ctx, loaded);
    }

    fn draw_input_panel(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        ui.heading("Ảnh vùng da");
        ui.separator();

        ui.label("Đường dẫn ảnh (JPG, PNG):");
        let response = ui.text_edit_singleline(&mut self.path_input);
        let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let has_path = !self.path_input.trim().is_empty();
        let clicked = ui
            .add_enabled(has_path, egui::Button::new("Phân tích"))
            .clicked();
        if clicked || entered {
            self.submit_path(ctx);
        }

        ui.add_space(8.0);
        ui.label(RichText::new("hoặc kéo thả ảnh vào cửa sổ").weak());

        if ctx.input(|i| !i.raw.hovered_files.is_empty()) {
            ui.add_space(8.0);
            ui.label(RichText::new("Thả ảnh để phân tích").strong());
        }
    }

    fn draw_submission(&self, ui: &mut egui::Ui) {
        let Some(submission) = &self.submission else {
            ui.label(PROMPT);
            return;
        };

        let context = self.pipeline.context();
        ui.columns(2, |columns| {
            SpecimenView::new(&submission.specimen, &submission.texture).draw(&mut columns[0]);
            ResultView::new(&submission.outcome, context.labels(), context.catalog())
                .draw(&mut columns[1]);
        });
    }
}

/// Downscales the displayed copy so neither side exceeds the GPU texture
/// limit. The pipeline keeps working on the full-resolution specimen.
fn fit_texture_side(image: &RgbImage, max_side: usize) -> Cow<'_, RgbImage> {
    let max_side = max_side.clamp(1, u32::MAX as usize) as u32;
    let (width, height) = image.dimensions();
    if width <= max_side && height <= max_side {
        return Cow::Borrowed(image);
    }

    let scale = max_side as f64 / width.max(height) as f64;
    let fitted_width = ((width as f64 * scale).round() as u32).clamp(1, max_side);
    let fitted_height = ((height as f64 * scale).round() as u32).clamp(1, max_side);
    Cow::Owned(imageops::thumbnail(image, fitted_width, fitted_height))
}

impl eframe::App for DiagnosisApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.with_layout(Layout::top_down(Align::Center), |ui| {
                ui.heading(RichText::new(TITLE).color(egui::Color32::from_rgb(21, 101, 192)));
                ui.label(SUBTITLE);
            });
        });

        egui::SidePanel::left("input_panel")
            .resizable(true)
            .show(ctx, |ui| self.draw_input_panel(ctx, ui));

        egui::TopBottomPanel::bottom("error_panel")
            .resizable(true)
            .show(ctx, |ui| {
                ui.heading("Error Log");
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for error in self.errors.iter().rev() {
                        ui.label(format!("[ERROR] {}", error));
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| self.draw_submission(ui));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    #[test]
    fn small_images_are_displayed_as_is() {
        let image: RgbImage = ImageBuffer::from_pixel(640, 480, Rgb([1, 2, 3]));
        let fitted = fit_texture_side(&image, 2048);
        assert!(matches!(fitted, Cow::Borrowed(_)));
        assert_eq!(fitted.dimensions(), (640, 480));
    }

    #[test]
    fn large_images_are_capped_to_texture_side() {
        let image: RgbImage = ImageBuffer::from_pixel(3000, 2100, Rgb([224, 172, 105]));
        let fitted = fit_texture_side(&image, 2048);
        assert_eq!(fitted.dimensions(), (2048, 1434));
        assert_eq!(fitted.get_pixel(100, 100), &Rgb([224, 172, 105]));
        assert_eq!(image.dimensions(), (3000, 2100));
    }

    #[test]
    fn tall_images_are_capped_on_height() {
        let image: RgbImage = ImageBuffer::from_pixel(300, 3000, Rgb([0, 0, 0]));
        let fitted = fit_texture_side(&image, 2048);
        let (width, height) = fitted.dimensions();
        assert_eq!(height, 2048);
        assert_eq!(width, 205);
    }
}
