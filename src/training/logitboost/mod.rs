//! LogitBoost: additive logistic regression from simple regressors.
//!
//! One boosting iteration, for each class `j`:
//!
//! 1. Derive a working response `z` and working weight `w` per instance
//!    from the 0/1 class indicator and the current probability estimate
//!    (`response`), clipping `z` for stability.
//! 2. Fit a weighted single-attribute linear regressor to `(z, w)`
//!    (`regression`). If any class's fit finds no useful attribute, the
//!    iteration is discarded and boosting halts.
//! 3. Apply the centered score update `F += (pred - mean) * (K-1)/K` and
//!    refresh the probabilities with a stable softmax (`engine`).
//!
//! The trainer (`trainer`) drives the engine under one of three
//! iteration-selection policies: a fixed count, stratified
//! cross-validation, or training-error stopping.

mod engine;
mod regression;
mod response;
mod trainer;

pub use trainer::{IterationPolicy, LogitBoostParams, LogitBoostTrainer};
