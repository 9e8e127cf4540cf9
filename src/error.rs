use std::path::PathBuf;

use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    InvalidSettings(String),
    #[error("Input Error: {0}")]
    Input(#[from] InputError),
    #[error("Label Map Error: {0}")]
    Labels(#[from] LabelMapError),
    #[error("Model Error: {0}")]
    Model(#[from] ModelError),
    #[error("Inference Error: {0}")]
    Inference(#[from] InferenceError),
    #[error("Pipeline Error: {0}")]
    Pipeline(String),
    #[error("UI Error: {0}")]
    Ui(String),
}

// Errors caused by the submitted image itself
#[derive(Error, Debug)]
pub enum InputError {
    #[error("No image was provided.")]
    NoImage,
    #[error("Image has no pixels ({width}x{height}).")]
    EmptyImage { width: u32, height: u32 },
    #[error("Unsupported image format: {0}. Only JPEG and PNG are accepted.")]
    UnsupportedFormat(String),
    #[error("Failed to read {1}: {0}")]
    Read(std::io::Error, PathBuf),
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

#[derive(Error, Debug)]
pub enum LabelMapError {
    #[error("Failed to read label map {1}: {0}")]
    Read(std::io::Error, PathBuf),
    #[error("Failed to parse label map: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Label map contains no classes.")]
    Empty,
    #[error("Index {index} is assigned to both '{first}' and '{second}'.")]
    DuplicateIndex {
        index: usize,
        first: String,
        second: String,
    },
    #[error("Class '{0}' appears more than once.")]
    DuplicateCode(String),
    #[error("Label map has {count} classes but no class for index {index}.")]
    MissingIndex { index: usize, count: usize },
}

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to load model {path}: {reason}")]
    Load { path: PathBuf, reason: String },
    #[error("Model input size must be non-zero, got {width}x{height}.")]
    InvalidInputSize { width: u32, height: u32 },
}

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Classifier failed: {0}")]
    Backend(String),
    #[error("Classifier produced no output.")]
    EmptyOutput,
    #[error("Classifier produced {actual} scores but the label map has {expected} classes.")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("Classifier score {value} at index {index} is not a probability.")]
    InvalidProbability { index: usize, value: f32 },
}
