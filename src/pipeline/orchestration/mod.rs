pub mod diagnosis_context;
pub mod diagnosis_pipeline;
pub mod processing_step;
pub mod step;

pub use diagnosis_context::DiagnosisContext;
pub use diagnosis_pipeline::{DiagnosisPipeline, DiagnosisPipelineBuilder, Outcome};
pub use processing_step::ProcessingStep;
