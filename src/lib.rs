//! logitboost: additive multiclass logistic regression for Rust.
//!
//! Trains a flat additive logistic model with the LogitBoost algorithm:
//! every boosting iteration fits one weighted single-attribute linear
//! regressor per class against the current working response, applies a
//! centered update to the per-class scores, and refreshes the class
//! probabilities through a numerically stable softmax. The number of
//! iterations is chosen by a fixed count, by stratified cross-validation,
//! or by a training-error stopping heuristic.
//!
//! # Key Types
//!
//! - [`AdditiveLogit`] - The trained model: inference plus coefficient introspection
//! - [`LogitBoostTrainer`] / [`LogitBoostParams`] - Training entry point and configuration
//! - [`IterationPolicy`] / [`StoppingMetric`] - Model-size selection policies
//! - [`Dataset`] - Data handling
//!
//! # Training
//!
//! ```
//! use logitboost::{Dataset, IterationPolicy, LogitBoostParams, LogitBoostTrainer, Parallelism};
//! use ndarray::array;
//!
//! // Feature-major layout: 1 feature, 4 samples.
//! let features = array![[1.0f32, 2.0, 10.0, 11.0]];
//! let labels = array![0.0f32, 0.0, 1.0, 1.0];
//! let data = Dataset::new(features.view(), Some(labels.view()), None);
//!
//! let params = LogitBoostParams {
//!     policy: IterationPolicy::Fixed(10),
//!     ..Default::default()
//! };
//! let model = LogitBoostTrainer::new(params)
//!     .train(&data, Parallelism::Sequential)
//!     .unwrap();
//!
//! let dist = model.predict_distribution(data.features().sample_view(0));
//! assert!(dist[0] > 0.9);
//! ```

// Re-export approx traits for users who want to compare predictions
pub use approx;

pub mod data;
pub mod model;
pub mod training;
pub mod utils;

// High-level model type
pub use model::{AdditiveLogit, SimpleRegression};

// Training types (trainer, configuration, policies)
pub use training::{
    IterationPolicy, LogitBoostParams, LogitBoostTrainer, StoppingMetric, TrainError, Verbosity,
};

// Data types (for preparing training data)
pub use data::{
    Dataset, DatasetBuilder, DatasetError, DatasetSchema, FeatureMeta, FeaturesView,
    StratifiedFolds, StratifyError, WeightsView,
};

// Shared utilities
pub use utils::{run_with_threads, Parallelism};
