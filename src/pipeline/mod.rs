pub mod context;
pub mod domain;
pub mod orchestration;
pub mod services;

pub use domain::{DiseaseCatalog, DiseaseInfo, LabelIndexMap, PredictionResult, SkinScreening};
pub use orchestration::{DiagnosisContext, DiagnosisPipeline, Outcome};
pub use services::{Classifier, OnnxClassifier, Preprocessor, SkinFilter};
