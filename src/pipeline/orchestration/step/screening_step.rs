use tracing::info;

use crate::error::AppError;
use crate::pipeline::context::{IngestedState, ScreenedState, SpecimenContext};
use crate::pipeline::orchestration::processing_step::ProcessingStep;
use crate::pipeline::services::SkinFilter;

/// Runs the skin color gate over the submitted image.
pub struct ScreeningStep {
    filter: SkinFilter,
}

impl ScreeningStep {
    pub fn new(filter: SkinFilter) -> Self {
        Self { filter }
    }
}

impl ProcessingStep<SpecimenContext<IngestedState>, SpecimenContext<ScreenedState>>
    for ScreeningStep
{
    fn process(
        &self,
        context: SpecimenContext<IngestedState>,
    ) -> Result<SpecimenContext<ScreenedState>, AppError> {
        let screening = self.filter.screen(context.specimen().image())?;
        info!(
            "Skin ratio {:.1}% -> {}",
            screening.ratio() * 100.0,
            if screening.passed() {
                "accepted"
            } else {
                "rejected"
            }
        );
        Ok(context.into_screened(screening))
    }

    fn name(&self) -> &'static str {
        "skin_screening"
    }
}
