pub mod diagnosis_step;
pub mod screening_step;

pub use diagnosis_step::DiagnosisStep;
pub use screening_step::ScreeningStep;
