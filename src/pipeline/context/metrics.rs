use std::time::Duration;

/// Durations collected while one specimen is processed
#[derive(Debug, Clone, Copy, Default)]
pub struct StageMetrics {
    screening_duration: Option<Duration>,
    inference_duration: Option<Duration>,
}

impl StageMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_screening_duration(&mut self, duration: Duration) {
        self.screening_duration = Some(duration);
    }

    pub fn record_inference_duration(&mut self, duration: Duration) {
        self.inference_duration = Some(duration);
    }

    pub fn screening_duration(&self) -> Option<Duration> {
        self.screening_duration
    }

    pub fn inference_duration(&self) -> Option<Duration> {
        self.inference_duration
    }
}
