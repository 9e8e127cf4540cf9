pub mod classifier;
pub mod image;

pub use classifier::{Classifier, OnnxClassifier};
pub use self::image::{ImageTensor, Preprocessor, SkinFilter};
