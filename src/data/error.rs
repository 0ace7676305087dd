//! Dataset construction errors.

/// Errors from dataset construction and validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    /// No feature columns were provided.
    #[error("dataset must have at least one feature")]
    EmptyFeatures,

    /// A component's sample count doesn't match the rest of the dataset.
    #[error("{field} expected {expected} samples, got {got}")]
    ShapeMismatch {
        expected: usize,
        got: usize,
        field: &'static str,
    },

    /// Instance weights must be positive and finite.
    #[error("instance {index} has invalid weight {weight} (weights must be positive)")]
    InvalidWeight { index: usize, weight: f32 },

    /// Class labels must be non-negative integers.
    #[error("instance {index} has invalid class label {label}")]
    InvalidLabel { index: usize, label: f32 },
}
