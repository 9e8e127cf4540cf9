use serde::Serialize;
use tracing::{debug, info, info_span};

use crate::common::Specimen;
use crate::config::ModelSettings;
use crate::error::AppError;
use crate::pipeline::context::SpecimenContext;
use crate::pipeline::domain::{DiseaseCatalog, LabelIndexMap, PredictionResult, SkinScreening};
use crate::pipeline::orchestration::diagnosis_context::DiagnosisContext;
use crate::pipeline::orchestration::processing_step::ProcessingStep;
use crate::pipeline::orchestration::step::{DiagnosisStep, ScreeningStep};
use crate::pipeline::services::{Classifier, Preprocessor, SkinFilter};

/// What happened to one submitted image.
#[derive(Debug, Clone, Serialize)]
pub enum Outcome {
    /// The image did not look like skin; the classifier was not run.
    Rejected(SkinScreening),
    Diagnosed {
        screening: SkinScreening,
        prediction: PredictionResult,
    },
}

impl Outcome {
    pub fn screening(&self) -> &SkinScreening {
        match self {
            Outcome::Rejected(screening) => screening,
            Outcome::Diagnosed { screening, .. } => screening,
        }
    }

    pub fn prediction(&self) -> Option<&PredictionResult> {
        match self {
            Outcome::Rejected(_) => None,
            Outcome::Diagnosed { prediction, .. } => Some(prediction),
        }
    }
}

/// Skin gate followed by classification. Each call runs to completion.
pub struct DiagnosisPipeline {
    screening: ScreeningStep,
    diagnosis: DiagnosisStep,
}

impl DiagnosisPipeline {
    pub fn builder() -> DiagnosisPipelineBuilder {
        DiagnosisPipelineBuilder::new()
    }

    pub fn process(&self, specimen: Specimen) -> Result<Outcome, AppError> {
        let span = info_span!("diagnose", specimen = %specimen.id(), source = %specimen.source());
        let _enter = span.enter();

        let ingested = SpecimenContext::new(specimen);
        debug!("Processing step: {} ({})", self.screening.name(), ingested.stage());
        let screened = self.screening.process(ingested)?;
        let screening = *screened.screening();
        if !screening.passed() {
            info!("Image rejected by skin filter, skipping classifier");
            return Ok(Outcome::Rejected(screening));
        }

        debug!("Processing step: {} ({})", self.diagnosis.name(), screened.stage());
        let diagnosed = self.diagnosis.process(screened)?;
        debug!(
            "Stage timings: screening={:?} inference={:?} total={:?}",
            diagnosed.metrics().screening_duration(),
            diagnosed.metrics().inference_duration(),
            diagnosed.elapsed()
        );

        Ok(Outcome::Diagnosed {
            screening,
            prediction: diagnosed.into_prediction(),
        })
    }

    pub fn context(&self) -> &DiagnosisContext {
        self.diagnosis.context()
    }
}

pub struct DiagnosisPipelineBuilder {
    classifier: Option<Box<dyn Classifier>>,
    labels: Option<LabelIndexMap>,
    catalog: DiseaseCatalog,
    preprocessor: Option<Preprocessor>,
    skin_filter: SkinFilter,
}

impl DiagnosisPipelineBuilder {
    pub fn new() -> Self {
        Self {
            classifier: None,
            labels: None,
            catalog: DiseaseCatalog::builtin(),
            preprocessor: None,
            skin_filter: SkinFilter::new(),
        }
    }

    pub fn classifier(mut self, classifier: Box<dyn Classifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn labels(mut self, labels: LabelIndexMap) -> Self {
        self.labels = Some(labels);
        self
    }

    // Replaces the built-in disease table.
    pub fn catalog(mut self, catalog: DiseaseCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    // Overrides the input size and layout taken from the default model settings.
    pub fn preprocessor(mut self, preprocessor: Preprocessor) -> Self {
        self.preprocessor = Some(preprocessor);
        self
    }

    pub fn build(self) -> Result<DiagnosisPipeline, AppError> {
        let classifier = self
            .classifier
            .ok_or(AppError::Pipeline("Classifier not set".to_string()))?;
        let labels = self
            .labels
            .ok_or(AppError::Pipeline("Label map not set".to_string()))?;
        let preprocessor = match self.preprocessor {
            Some(preprocessor) => preprocessor,
            None => Preprocessor::from_settings(&ModelSettings::default())?,
        };

        Ok(DiagnosisPipeline {
            screening: ScreeningStep::new(self.skin_filter),
            diagnosis: DiagnosisStep::new(
                DiagnosisContext::new(classifier, labels, self.catalog),
                preprocessor,
            ),
        })
    }
}

impl Default for DiagnosisPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
