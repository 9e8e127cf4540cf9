use image::RgbImage;
use tracing::{debug, info};

use crate::error::{AppError, InferenceError};
use crate::pipeline::context::{DiagnosedState, ScreenedState, SpecimenContext};
use crate::pipeline::domain::PredictionResult;
use crate::pipeline::orchestration::diagnosis_context::DiagnosisContext;
use crate::pipeline::orchestration::processing_step::ProcessingStep;
use crate::pipeline::services::Preprocessor;

/// Resize, normalize, classify and label a screened specimen.
pub struct DiagnosisStep {
    context: DiagnosisContext,
    preprocessor: Preprocessor,
}

impl DiagnosisStep {
    pub fn new(context: DiagnosisContext, preprocessor: Preprocessor) -> Self {
        Self {
            context,
            preprocessor,
        }
    }

    pub fn context(&self) -> &DiagnosisContext {
        &self.context
    }

    pub fn diagnose(&self, image: &RgbImage) -> Result<PredictionResult, InferenceError> {
        let tensor = self.preprocessor.prepare(image);
        debug!(
            "Prepared {:?} tensor for {}",
            tensor.shape(),
            self.context.classifier().name()
        );

        let probabilities = self.context.classifier().predict(&tensor)?;
        PredictionResult::resolve(
            probabilities,
            self.context.labels(),
            self.context.catalog(),
        )
    }
}

impl ProcessingStep<SpecimenContext<ScreenedState>, SpecimenContext<DiagnosedState>>
    for DiagnosisStep
{
    fn process(
        &self,
        context: SpecimenContext<ScreenedState>,
    ) -> Result<SpecimenContext<DiagnosedState>, AppError> {
        let prediction = self.diagnose(context.specimen().image())?;
        info!(
            "Predicted {} (index {}) with {:.2}% confidence",
            prediction.code, prediction.index, prediction.confidence
        );
        Ok(context.into_diagnosed(prediction))
    }

    fn name(&self) -> &'static str {
        "diagnosis"
    }
}
