//! Data handling: dataset container, views, stratified folds.
//!
//! [`Dataset`] stores features in **feature-major** layout
//! `[n_features, n_samples]` so each attribute's values are contiguous,
//! which is what the per-attribute regression scan wants. Class labels
//! and instance weights are optional; prediction-only datasets carry
//! neither.
//!
//! [`StratifiedFolds`] provides the deterministic, class-proportional
//! k-fold partitions used by cross-validated iteration selection.

mod dataset;
mod error;
mod schema;
mod stratify;
mod views;

pub use dataset::{Dataset, DatasetBuilder};
pub use error::DatasetError;
pub use schema::{DatasetSchema, FeatureMeta};
pub use stratify::{StratifiedFolds, StratifyError};
pub use views::{FeaturesView, WeightsIter, WeightsView};
