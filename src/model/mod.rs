//! The trained model artifact.

mod additive;

pub use additive::{AdditiveLogit, SimpleRegression};
