use crate::pipeline::domain::{DiseaseCatalog, LabelIndexMap};
use crate::pipeline::services::Classifier;

/// Process-wide read-only state the diagnosis stage depends on. Built once at
/// startup and handed to the pipeline.
pub struct DiagnosisContext {
    classifier: Box<dyn Classifier>,
    labels: LabelIndexMap,
    catalog: DiseaseCatalog,
}

impl DiagnosisContext {
    pub fn new(
        classifier: Box<dyn Classifier>,
        labels: LabelIndexMap,
        catalog: DiseaseCatalog,
    ) -> Self {
        Self {
            classifier,
            labels,
            catalog,
        }
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn labels(&self) -> &LabelIndexMap {
        &self.labels
    }

    pub fn catalog(&self) -> &DiseaseCatalog {
        &self.catalog
    }
}
