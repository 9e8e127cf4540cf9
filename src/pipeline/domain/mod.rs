pub mod disease_info;
pub mod label_map;
pub mod prediction;
pub mod skin_screening;

pub use disease_info::{DiseaseCatalog, DiseaseInfo};
pub use label_map::LabelIndexMap;
pub use prediction::PredictionResult;
pub use skin_screening::SkinScreening;
