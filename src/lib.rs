pub mod app;
pub mod common;
pub mod config;
pub mod error;
pub mod pipeline;

pub use error::{AppError, InferenceError, InputError, LabelMapError, ModelError};

pub use common::{Specimen, SpecimenSource};
pub use crate::config::Settings;
pub use pipeline::{DiagnosisPipeline, Outcome};
