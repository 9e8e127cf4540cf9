pub mod diagnosis_app;
pub mod views;

pub use diagnosis_app::DiagnosisApp;
