use egui::TextureHandle;

use crate::app::views::View;
use crate::common::Specimen;

/// Left column: the photograph the user submitted.
pub struct SpecimenView<'a> {
    specimen: &'a Specimen,
    texture: &'a TextureHandle,
}

impl<'a> SpecimenView<'a> {
    pub fn new(specimen: &'a Specimen, texture: &'a TextureHandle) -> Self {
        Self { specimen, texture }
    }
}

impl View for SpecimenView<'_> {
    fn draw(&mut self, ui: &mut egui::Ui) {
        ui.heading("Ảnh da đã chọn");
        ui.separator();

        let available = ui.available_width();
        let [w, h] = self.texture.size();
        let scale = (available / w as f32).min(1.0);
        ui.image((
            self.texture.id(),
            egui::vec2(w as f32 * scale, h as f32 * scale),
        ));

        let (width, height) = self.specimen.image().dimensions();
        ui.label(format!(
            "{} · {}x{} · {}",
            self.specimen.source(),
            width,
            height,
            self.specimen
                .submitted_at()
                .format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
}
