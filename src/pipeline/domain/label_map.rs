use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexSet;
use tracing::info;

use crate::error::LabelMapError;

/// Bidirectional mapping between classifier output positions and class codes.
///
/// The position of a code in the set is its classifier output index.
#[derive(Debug, Clone)]
pub struct LabelIndexMap {
    codes: IndexSet<String>,
}

impl LabelIndexMap {
    /// Parses a `{"code": index, ...}` JSON object. Indices must cover
    /// `0..n` exactly once.
    pub fn from_json(json: &str) -> Result<Self, LabelMapError> {
        let raw: HashMap<String, usize> = serde_json::from_str(json)?;
        Self::from_indices(raw)
    }

    pub fn from_path(path: &Path) -> Result<Self, LabelMapError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| LabelMapError::Read(e, path.to_path_buf()))?;
        let labels = Self::from_json(&json)?;
        info!("Loaded {} class labels from {}", labels.len(), path.display());
        Ok(labels)
    }

    pub fn from_indices(
        indices: impl IntoIterator<Item = (String, usize)>,
    ) -> Result<Self, LabelMapError> {
        let mut by_index: Vec<(usize, String)> =
            indices.into_iter().map(|(c, i)| (i, c)).collect();
        if by_index.is_empty() {
            return Err(LabelMapError::Empty);
        }
        by_index.sort();

        let count = by_index.len();
        let mut codes = IndexSet::with_capacity(count);
        for (expected, (index, code)) in by_index.into_iter().enumerate() {
            if index < expected {
                let first = codes.get_index(index).cloned().unwrap_or_default();
                return Err(LabelMapError::DuplicateIndex {
                    index,
                    first,
                    second: code,
                });
            }
            if index > expected {
                return Err(LabelMapError::MissingIndex {
                    index: expected,
                    count,
                });
            }
            if !codes.insert(code.clone()) {
                return Err(LabelMapError::DuplicateCode(code));
            }
        }

        Ok(Self { codes })
    }

    pub fn from_codes<I, S>(codes: I) -> Result<Self, LabelMapError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_indices(
            codes
                .into_iter()
                .enumerate()
                .map(|(index, code)| (code.into(), index)),
        )
    }

    pub fn code_at(&self, index: usize) -> Option<&str> {
        self.codes.get_index(index).map(String::as_str)
    }

    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.codes.get_index_of(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Class codes in classifier output order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }
}
