use std::time::{Duration, Instant};

use crate::common::Specimen;
use crate::pipeline::context::metrics::StageMetrics;
use crate::pipeline::context::state::{
    DiagnosedState, IngestedState, ProcessingState, ScreenedState,
};
use crate::pipeline::domain::{PredictionResult, SkinScreening};

// SpecimenContext with compile-time stage tracking via the state parameter
pub struct SpecimenContext<S> {
    specimen: Specimen,
    metrics: StageMetrics,
    processing_start: Instant,
    stage_start: Instant,
    state: S,
}

impl<S: ProcessingState> SpecimenContext<S> {
    pub fn specimen(&self) -> &Specimen {
        &self.specimen
    }

    pub fn metrics(&self) -> &StageMetrics {
        &self.metrics
    }

    pub fn elapsed(&self) -> Duration {
        self.processing_start.elapsed()
    }

    pub fn stage(&self) -> &'static str {
        S::state_name()
    }

    fn advance<T>(self, state: T) -> SpecimenContext<T> {
        SpecimenContext {
            specimen: self.specimen,
            metrics: self.metrics,
            processing_start: self.processing_start,
            stage_start: Instant::now(),
            state,
        }
    }
}

impl SpecimenContext<IngestedState> {
    pub fn new(specimen: Specimen) -> Self {
        let now = Instant::now();
        Self {
            specimen,
            metrics: StageMetrics::new(),
            processing_start: now,
            stage_start: now,
            state: IngestedState,
        }
    }

    pub fn into_screened(mut self, screening: SkinScreening) -> SpecimenContext<ScreenedState> {
        self.metrics.record_screening_duration(self.stage_start.elapsed());
        self.advance(ScreenedState { screening })
    }
}

impl SpecimenContext<ScreenedState> {
    pub fn screening(&self) -> &SkinScreening {
        &self.state.screening
    }

    pub fn into_diagnosed(
        mut self,
        prediction: PredictionResult,
    ) -> SpecimenContext<DiagnosedState> {
        self.metrics.record_inference_duration(self.stage_start.elapsed());
        let screening = self.state.screening;
        self.advance(DiagnosedState {
            screening,
            prediction,
        })
    }
}

impl SpecimenContext<DiagnosedState> {
    pub fn screening(&self) -> &SkinScreening {
        &self.state.screening
    }

    pub fn prediction(&self) -> &PredictionResult {
        &self.state.prediction
    }

    pub fn into_prediction(self) -> PredictionResult {
        self.state.prediction
    }
}
