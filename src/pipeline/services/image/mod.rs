pub mod preprocessing;
pub mod skin_filter;

pub use preprocessing::{ImageTensor, Preprocessor};
pub use skin_filter::SkinFilter;
