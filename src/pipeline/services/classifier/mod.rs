pub mod onnx_classifier;

pub use onnx_classifier::OnnxClassifier;

use crate::error::InferenceError;
use crate::pipeline::services::image::ImageTensor;

/// A pre-trained image classifier. Implementations are loaded once and only
/// read afterwards.
pub trait Classifier: Send + Sync {
    /// Returns one probability per class, in label-index order.
    fn predict(&self, input: &ImageTensor) -> Result<Vec<f32>, InferenceError>;

    fn name(&self) -> &str;
}
