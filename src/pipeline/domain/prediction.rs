use serde::Serialize;

use crate::error::InferenceError;
use crate::pipeline::domain::disease_info::{DiseaseCatalog, DiseaseInfo};
use crate::pipeline::domain::label_map::LabelIndexMap;

/// The classifier's verdict for one specimen.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub index: usize,
    pub code: String,
    /// Maximum probability as a percentage, within `[0, 100]`.
    pub confidence: f32,
    pub probabilities: Vec<f32>,
    pub info: DiseaseInfo,
    /// False when `info` is the placeholder record.
    pub documented: bool,
}

impl PredictionResult {
    /// Turns a raw probability vector into a labelled prediction.
    pub fn resolve(
        probabilities: Vec<f32>,
        labels: &LabelIndexMap,
        catalog: &DiseaseCatalog,
    ) -> Result<Self, InferenceError> {
        if probabilities.is_empty() {
            return Err(InferenceError::EmptyOutput);
        }
        if probabilities.len() != labels.len() {
            return Err(InferenceError::ShapeMismatch {
                expected: labels.len(),
                actual: probabilities.len(),
            });
        }
        if let Some((index, &value)) = probabilities
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p < 0.0 || **p > 1.0)
        {
            return Err(InferenceError::InvalidProbability { index, value });
        }

        let (index, max) = argmax(&probabilities);
        let code = labels
            .code_at(index)
            .ok_or(InferenceError::ShapeMismatch {
                expected: labels.len(),
                actual: probabilities.len(),
            })?
            .to_string();

        Ok(Self {
            index,
            confidence: max * 100.0,
            documented: catalog.contains(&code),
            info: catalog.describe(&code),
            code,
            probabilities,
        })
    }

    /// `"Melanoma (87.35%)"`
    pub fn headline(&self) -> String {
        format!("{} ({:.2}%)", self.info.english_name, self.confidence)
    }

    pub fn to_report_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Index and value of the largest element; the first one wins on ties.
pub fn argmax(values: &[f32]) -> (usize, f32) {
    let mut best_idx = 0usize;
    let mut best_score = f32::MIN;
    for (i, v) in values.iter().enumerate() {
        if *v > best_score {
            best_idx = i;
            best_score = *v;
        }
    }
    (best_idx, best_score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::domain::disease_info::NO_SIGNS;
    use rand::Rng;

    fn labels() -> LabelIndexMap {
        LabelIndexMap::from_codes(["akiec", "bcc", "bkl", "df", "mel", "nv", "vasc"]).unwrap()
    }

    #[test]
    fn argmax_prefers_first_of_equal_scores() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), (1, 0.4));
        assert_eq!(argmax(&[0.5]), (0, 0.5));
    }

    #[test]
    fn resolves_index_code_and_info() {
        let catalog = DiseaseCatalog::builtin();
        let result = PredictionResult::resolve(
            vec![0.1, 0.1, 0.6, 0.05, 0.05, 0.05, 0.05],
            &labels(),
            &catalog,
        )
        .unwrap();

        assert_eq!(result.index, 2);
        assert_eq!(result.code, "bkl");
        assert!((result.confidence - 60.0).abs() < 1e-4);
        assert_eq!(result.info, *catalog.get("bkl").unwrap());
        assert!(result.documented);
        assert_eq!(result.headline(), "Benign Keratosis-like lesions (60.00%)");
    }

    #[test]
    fn confidence_is_hundred_times_the_maximum() {
        let mut rng = rand::rng();
        let labels = labels();
        let catalog = DiseaseCatalog::builtin();

        for _ in 0..200 {
            let probabilities: Vec<f32> =
                (0..labels.len()).map(|_| rng.random::<f32>()).collect();
            let max = probabilities.iter().cloned().fold(f32::MIN, f32::max);
            let result = PredictionResult::resolve(probabilities, &labels, &catalog).unwrap();

            assert_eq!(result.confidence, max * 100.0);
            assert!((0.0..=100.0).contains(&result.confidence));
            assert_eq!(labels.index_of(&result.code), Some(result.index));
        }
    }

    #[test]
    fn undocumented_code_gets_placeholder_text() {
        let labels = LabelIndexMap::from_codes(["mel", "scc"]).unwrap();
        let result =
            PredictionResult::resolve(vec![0.3, 0.7], &labels, &DiseaseCatalog::builtin()).unwrap();

        assert_eq!(result.code, "scc");
        assert!(!result.documented);
        assert_eq!(result.info, DiseaseInfo::placeholder("scc"));
        assert_eq!(result.info.signs, NO_SIGNS);
        assert_eq!(result.headline(), "SCC (70.00%)");
    }

    #[test]
    fn output_length_must_match_label_count() {
        let err = PredictionResult::resolve(vec![0.5, 0.5], &labels(), &DiseaseCatalog::builtin())
            .unwrap_err();
        assert!(matches!(
            err,
            InferenceError::ShapeMismatch {
                expected: 7,
                actual: 2
            }
        ));
    }

    #[test]
    fn empty_output_is_an_error() {
        assert!(matches!(
            PredictionResult::resolve(vec![], &labels(), &DiseaseCatalog::builtin()),
            Err(InferenceError::EmptyOutput)
        ));
    }

    #[test]
    fn scores_outside_unit_interval_are_rejected() {
        let labels = LabelIndexMap::from_codes(["mel", "nv"]).unwrap();
        let catalog = DiseaseCatalog::builtin();

        assert!(matches!(
            PredictionResult::resolve(vec![3.2, -1.0], &labels, &catalog),
            Err(InferenceError::InvalidProbability { index: 0, .. })
        ));
        assert!(matches!(
            PredictionResult::resolve(vec![0.1, f32::NAN], &labels, &catalog),
            Err(InferenceError::InvalidProbability { index: 1, .. })
        ));
    }

    #[test]
    fn report_json_carries_code_and_confidence() {
        let labels = LabelIndexMap::from_codes(["mel", "nv"]).unwrap();
        let result =
            PredictionResult::resolve(vec![0.25, 0.75], &labels, &DiseaseCatalog::builtin())
                .unwrap();
        let report = result.to_report_json().unwrap();
        let json: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(json["code"], "nv");
        assert_eq!(json["confidence"], 75.0);
        assert_eq!(json["info"]["english_name"], "Melanocytic Nevi");
    }
}
