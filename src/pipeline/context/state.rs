use crate::pipeline::domain::{PredictionResult, SkinScreening};

// Markers to track how far a specimen has travelled through the pipeline
pub struct IngestedState;
pub struct ScreenedState {
    pub(super) screening: SkinScreening,
}
pub struct DiagnosedState {
    pub(super) screening: SkinScreening,
    pub(super) prediction: PredictionResult,
}

pub trait ProcessingState: 'static {
    fn state_name() -> &'static str;
}

impl ProcessingState for IngestedState {
    fn state_name() -> &'static str {
        "Ingested"
    }
}

impl ProcessingState for ScreenedState {
    fn state_name() -> &'static str {
        "Screened"
    }
}

impl ProcessingState for DiagnosedState {
    fn state_name() -> &'static str {
        "Diagnosed"
    }
}
