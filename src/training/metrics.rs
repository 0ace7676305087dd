//! Evaluation metrics for iteration selection.
//!
//! Both stopping metrics score a probability matrix against class labels;
//! lower is always better. Weighted evaluation uses
//! `sum(w * error) / sum(w)` with `f64` accumulation.

use ndarray::{ArrayView1, ArrayView2};

use crate::data::WeightsView;

// =============================================================================
// Metric Trait
// =============================================================================

/// A metric for scoring class-probability estimates during training.
pub trait MetricFn: Send + Sync {
    /// Compute the metric value.
    ///
    /// `probabilities` has shape `[n_classes, n_samples]` with columns
    /// summing to 1; `labels` are class indices. Lower is better.
    fn compute(
        &self,
        probabilities: ArrayView2<f64>,
        labels: ArrayView1<f32>,
        weights: WeightsView<'_>,
    ) -> f64;

    /// Name of the metric (for logging).
    fn name(&self) -> &'static str;
}

// =============================================================================
// ErrorRate
// =============================================================================

/// Weighted misclassification rate.
///
/// A sample counts as misclassified when the class with the largest
/// probability differs from its label. Probability ties resolve to the
/// lowest class index.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorRate;

impl MetricFn for ErrorRate {
    fn compute(
        &self,
        probabilities: ArrayView2<f64>,
        labels: ArrayView1<f32>,
        weights: WeightsView<'_>,
    ) -> f64 {
        let (n_classes, n_samples) = probabilities.dim();
        debug_assert_eq!(labels.len(), n_samples);
        if n_samples == 0 {
            return 0.0;
        }

        let mut wrong = 0.0f64;
        let mut total = 0.0f64;
        for (sample, w) in weights.iter(n_samples).enumerate() {
            let mut best = 0;
            for class in 1..n_classes {
                if probabilities[[class, sample]] > probabilities[[best, sample]] {
                    best = class;
                }
            }
            let w = w as f64;
            total += w;
            if best != labels[sample].round() as usize {
                wrong += w;
            }
        }

        if total > 0.0 {
            wrong / total
        } else {
            0.0
        }
    }

    fn name(&self) -> &'static str {
        "error_rate"
    }
}

// =============================================================================
// MeanAbsoluteError
// =============================================================================

/// Weighted mean absolute probability error.
///
/// Per sample, the mean over classes of `|p_j - y_j|` where `y_j` is the
/// 0/1 class indicator; averaged over samples with instance weights.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanAbsoluteError;

impl MetricFn for MeanAbsoluteError {
    fn compute(
        &self,
        probabilities: ArrayView2<f64>,
        labels: ArrayView1<f32>,
        weights: WeightsView<'_>,
    ) -> f64 {
        let (n_classes, n_samples) = probabilities.dim();
        debug_assert_eq!(labels.len(), n_samples);
        if n_samples == 0 || n_classes == 0 {
            return 0.0;
        }

        let mut acc = 0.0f64;
        let mut total = 0.0f64;
        for (sample, w) in weights.iter(n_samples).enumerate() {
            let label = labels[sample].round() as usize;
            let mut sum = 0.0f64;
            for class in 0..n_classes {
                let y = if class == label { 1.0 } else { 0.0 };
                sum += (probabilities[[class, sample]] - y).abs();
            }
            let w = w as f64;
            acc += w * sum / n_classes as f64;
            total += w;
        }

        if total > 0.0 {
            acc / total
        } else {
            0.0
        }
    }

    fn name(&self) -> &'static str {
        "mean_absolute_error"
    }
}

// =============================================================================
// StoppingMetric (convenience wrapper)
// =============================================================================

/// The metric monitored by iteration selection.
///
/// Wraps the available metrics using the newtype pattern, allowing metric
/// selection at runtime without generics.
#[derive(Debug, Clone, Copy)]
pub enum StoppingMetric {
    /// Misclassification rate.
    ErrorRate(ErrorRate),
    /// Mean absolute probability error.
    MeanAbsoluteError(MeanAbsoluteError),
}

impl Default for StoppingMetric {
    fn default() -> Self {
        Self::ErrorRate(ErrorRate)
    }
}

impl StoppingMetric {
    /// Misclassification rate.
    pub fn error_rate() -> Self {
        Self::ErrorRate(ErrorRate)
    }

    /// Mean absolute probability error.
    pub fn mean_absolute_error() -> Self {
        Self::MeanAbsoluteError(MeanAbsoluteError)
    }
}

impl MetricFn for StoppingMetric {
    fn compute(
        &self,
        probabilities: ArrayView2<f64>,
        labels: ArrayView1<f32>,
        weights: WeightsView<'_>,
    ) -> f64 {
        match self {
            Self::ErrorRate(inner) => inner.compute(probabilities, labels, weights),
            Self::MeanAbsoluteError(inner) => inner.compute(probabilities, labels, weights),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::ErrorRate(inner) => inner.name(),
            Self::MeanAbsoluteError(inner) => inner.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};

    fn probs(n_classes: usize, n_samples: usize, data: &[f64]) -> Array2<f64> {
        Array2::from_shape_vec((n_classes, n_samples), data.to_vec()).unwrap()
    }

    #[test]
    fn error_rate_perfect() {
        let p = probs(2, 2, &[0.9, 0.1, 0.1, 0.9]);
        let labels = array![0.0f32, 1.0];
        let err = ErrorRate.compute(p.view(), labels.view(), WeightsView::None);
        assert_abs_diff_eq!(err, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn error_rate_half() {
        let p = probs(2, 2, &[0.9, 0.9, 0.1, 0.1]);
        let labels = array![0.0f32, 1.0];
        let err = ErrorRate.compute(p.view(), labels.view(), WeightsView::None);
        assert_abs_diff_eq!(err, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn error_rate_ties_pick_lowest_class() {
        // Uniform probabilities: class 0 is predicted everywhere.
        let p = probs(2, 2, &[0.5, 0.5, 0.5, 0.5]);
        let labels = array![0.0f32, 1.0];
        let err = ErrorRate.compute(p.view(), labels.view(), WeightsView::None);
        assert_abs_diff_eq!(err, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn error_rate_weighted() {
        let p = probs(2, 2, &[0.9, 0.9, 0.1, 0.1]);
        let labels = array![0.0f32, 1.0];
        let weights = array![1.0f32, 3.0];
        let err = ErrorRate.compute(p.view(), labels.view(), WeightsView::from_array(weights.view()));
        assert_abs_diff_eq!(err, 0.75, epsilon = 1e-12);
    }

    #[test]
    fn mean_absolute_error_uniform_two_class() {
        let p = probs(2, 2, &[0.5, 0.5, 0.5, 0.5]);
        let labels = array![0.0f32, 1.0];
        let mae = MeanAbsoluteError.compute(p.view(), labels.view(), WeightsView::None);
        assert_abs_diff_eq!(mae, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn mean_absolute_error_perfect() {
        let p = probs(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let labels = array![0.0f32, 1.0];
        let mae = MeanAbsoluteError.compute(p.view(), labels.view(), WeightsView::None);
        assert_abs_diff_eq!(mae, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn mean_absolute_error_three_class() {
        // One sample, label 1, probabilities (0.2, 0.5, 0.3):
        // |0.2-0| + |0.5-1| + |0.3-0| = 1.0, divided by 3 classes.
        let p = probs(3, 1, &[0.2, 0.5, 0.3]);
        let labels = array![1.0f32];
        let mae = MeanAbsoluteError.compute(p.view(), labels.view(), WeightsView::None);
        assert_abs_diff_eq!(mae, 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn stopping_metric_dispatch() {
        let p = probs(2, 2, &[0.9, 0.1, 0.1, 0.9]);
        let labels = array![0.0f32, 1.0];

        let err = StoppingMetric::error_rate();
        assert_eq!(err.name(), "error_rate");
        assert_abs_diff_eq!(
            err.compute(p.view(), labels.view(), WeightsView::None),
            0.0,
            epsilon = 1e-12
        );

        let mae = StoppingMetric::mean_absolute_error();
        assert_eq!(mae.name(), "mean_absolute_error");
        assert_abs_diff_eq!(
            mae.compute(p.view(), labels.view(), WeightsView::None),
            0.1,
            epsilon = 1e-12
        );
    }
}
