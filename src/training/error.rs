//! Training errors surfaced to callers.

use crate::data::StratifyError;

/// Terminal failures of a training call.
///
/// A simple-regression fit that finds no useful attribute is *not* an
/// error: it ends the boosting loop and truncates the model (see
/// [`logitboost`](crate::training::logitboost)). Only configuration and
/// stratification problems reach the caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrainError {
    /// The dataset has no class labels attached.
    #[error("dataset has no class labels")]
    MissingLabels,

    /// The dataset has zero distinct classes (no instances).
    #[error("dataset has no class instances")]
    NoClasses,

    /// Cross-validation needs at least two folds.
    #[error("cross-validation requires at least 2 folds, got {0}")]
    TooFewFolds(usize),

    /// Class-proportional folds are impossible.
    #[error(transparent)]
    Stratification(#[from] StratifyError),
}
