use std::path::Path;

use tract_onnx::prelude::*;
use tracing::info;

use crate::error::{InferenceError, ModelError};
use crate::pipeline::services::classifier::Classifier;
use crate::pipeline::services::image::ImageTensor;

type OnnxPlan = TypedRunnableModel<TypedModel>;

/// Classifier backed by an ONNX graph, run on the CPU through tract.
pub struct OnnxClassifier {
    plan: OnnxPlan,
    input_shape: [usize; 4],
    name: String,
}

impl OnnxClassifier {
    /// Loads and optimizes the graph for a fixed input shape. Done once at
    /// startup; the plan is immutable afterwards.
    pub fn load(path: &Path, input_shape: [usize; 4]) -> Result<Self, ModelError> {
        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact(input_shape).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| ModelError::Load {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "onnx".to_string());
        info!("Loaded classifier {} with input {:?}", name, input_shape);

        Ok(Self {
            plan,
            input_shape,
            name,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, input: &ImageTensor) -> Result<Vec<f32>, InferenceError> {
        if input.shape() != self.input_shape {
            return Err(InferenceError::Backend(format!(
                "input tensor shape {:?} does not match model input {:?}",
                input.shape(),
                self.input_shape
            )));
        }

        let tensor = Tensor::from_shape(&input.shape(), input.data())
            .map_err(|e| InferenceError::Backend(e.to_string()))?;
        let outputs = self
            .plan
            .run(tvec!(tensor.into()))
            .map_err(|e| InferenceError::Backend(format!("failed to run model: {e}")))?;

        let scores = outputs.first().ok_or(InferenceError::EmptyOutput)?;
        let view = scores
            .to_array_view::<f32>()
            .map_err(|e| InferenceError::Backend(format!("output is not f32: {e}")))?;

        Ok(view.iter().copied().collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
