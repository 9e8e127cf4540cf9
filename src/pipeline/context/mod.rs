pub mod metrics;
pub mod specimen_context;
pub mod state;

pub use metrics::StageMetrics;
pub use specimen_context::SpecimenContext;
pub use state::{DiagnosedState, IngestedState, ProcessingState, ScreenedState};
