pub mod result_view;
pub mod specimen_view;

pub use result_view::ResultView;
pub use specimen_view::SpecimenView;

pub trait View {
    fn draw(&mut self, ui: &mut egui::Ui);
}
