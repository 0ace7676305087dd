//! View types for algorithm access.
//!
//! These provide read-only access to dataset components with appropriate
//! semantics for the training loop.

use ndarray::{ArrayView1, ArrayView2, Axis};

/// Read-only view into feature data.
///
/// Internal storage is feature-major: `[n_features, n_samples]`.
/// This means:
/// - `feature(f)` returns all samples for feature f (contiguous)
/// - `sample_view(s)` returns all features for sample s (strided)
///
/// The API uses conceptual terms (sample, feature) not array terms (row, col).
#[derive(Clone, Copy)]
pub struct FeaturesView<'a> {
    /// Shape: [n_features, n_samples] - feature-major
    data: ArrayView2<'a, f32>,
}

impl<'a> FeaturesView<'a> {
    /// Create a new features view.
    ///
    /// # Arguments
    ///
    /// * `data` - Array with shape `[n_features, n_samples]`
    pub fn new(data: ArrayView2<'a, f32>) -> Self {
        Self { data }
    }

    /// Number of samples (second dimension).
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.data.ncols()
    }

    /// Number of features (first dimension).
    #[inline]
    pub fn n_features(&self) -> usize {
        self.data.nrows()
    }

    /// Get feature value at (sample, feature).
    ///
    /// Internally accesses `[feature, sample]` due to storage layout.
    /// Missing values are `NaN`.
    #[inline]
    pub fn get(&self, sample: usize, feature: usize) -> f32 {
        self.data[[feature, sample]]
    }

    /// Get a contiguous view of all sample values for a feature.
    ///
    /// This is the fast path for the per-attribute regression scan.
    /// The view borrows the underlying data, not this `FeaturesView`.
    #[inline]
    pub fn feature(&self, feature: usize) -> ArrayView1<'a, f32> {
        self.data.index_axis_move(Axis(0), feature)
    }

    /// Get all features for a sample.
    ///
    /// This returns a strided view, not contiguous. The view borrows the
    /// underlying data, not this `FeaturesView`.
    #[inline]
    pub fn sample_view(&self, sample: usize) -> ArrayView1<'a, f32> {
        self.data.index_axis_move(Axis(1), sample)
    }

    /// Get the underlying array view.
    ///
    /// Shape is `[n_features, n_samples]`.
    pub fn view(&self) -> ArrayView2<'a, f32> {
        self.data
    }
}

impl<'a> std::fmt::Debug for FeaturesView<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeaturesView")
            .field("n_features", &self.n_features())
            .field("n_samples", &self.n_samples())
            .finish()
    }
}

// =============================================================================
// WeightsView
// =============================================================================

/// Read-only view into instance weights.
///
/// Handles both weighted and unweighted cases uniformly.
/// Unweighted instances are treated as having weight 1.0.
#[derive(Clone, Copy, Debug, Default)]
pub enum WeightsView<'a> {
    /// No weights - all instances have implicit weight 1.0.
    #[default]
    None,
    /// Explicit weights per instance.
    Some(ArrayView1<'a, f32>),
}

impl<'a> WeightsView<'a> {
    /// Create an empty weights view (all weights are 1.0).
    #[inline]
    pub fn none() -> Self {
        WeightsView::None
    }

    /// Create from a weights array.
    #[inline]
    pub fn from_array(weights: ArrayView1<'a, f32>) -> Self {
        WeightsView::Some(weights)
    }

    /// Create from an optional array.
    #[inline]
    pub fn from_optional(weights: Option<ArrayView1<'a, f32>>) -> Self {
        match weights {
            Some(w) => WeightsView::Some(w),
            None => WeightsView::None,
        }
    }

    /// Get the weight for an instance.
    #[inline]
    pub fn get(&self, idx: usize) -> f32 {
        match self {
            WeightsView::None => 1.0,
            WeightsView::Some(w) => w[idx],
        }
    }

    /// Returns true if no weights are specified (all 1.0).
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, WeightsView::None)
    }

    /// Returns true if explicit weights are specified.
    #[inline]
    pub fn is_some(&self) -> bool {
        matches!(self, WeightsView::Some(_))
    }

    /// Get the underlying array view if weighted.
    #[inline]
    pub fn as_array(&self) -> Option<ArrayView1<'a, f32>> {
        match self {
            WeightsView::None => None,
            WeightsView::Some(w) => Some(*w),
        }
    }

    /// Iterate over weights for `n_samples` instances.
    ///
    /// For uniform weights, yields 1.0 for each instance.
    ///
    /// # Arguments
    ///
    /// * `n_samples` - Number of instances to iterate over. Required because
    ///   `WeightsView::None` has no length information.
    #[inline]
    pub fn iter(self, n_samples: usize) -> WeightsIter<'a> {
        match self {
            WeightsView::None => WeightsIter::Uniform {
                remaining: n_samples,
            },
            WeightsView::Some(w) => {
                debug_assert_eq!(w.len(), n_samples, "weights length mismatch");
                WeightsIter::Weighted { view: w, idx: 0 }
            }
        }
    }
}

/// Iterator over weights.
///
/// Enum dispatch: the uniform/weighted branch is taken once at
/// construction, not on every `.next()` call.
#[derive(Clone, Debug)]
pub enum WeightsIter<'a> {
    /// Yields 1.0 for remaining instances.
    Uniform { remaining: usize },
    /// Yields from a weights array.
    Weighted {
        view: ArrayView1<'a, f32>,
        idx: usize,
    },
}

impl<'a> Iterator for WeightsIter<'a> {
    type Item = f32;

    #[inline]
    fn next(&mut self) -> Option<f32> {
        match self {
            WeightsIter::Uniform { remaining } => {
                if *remaining > 0 {
                    *remaining -= 1;
                    Some(1.0)
                } else {
                    None
                }
            }
            WeightsIter::Weighted { view, idx } => {
                if *idx < view.len() {
                    let w = view[*idx];
                    *idx += 1;
                    Some(w)
                } else {
                    None
                }
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = match self {
            WeightsIter::Uniform { remaining } => *remaining,
            WeightsIter::Weighted { view, idx } => view.len() - idx,
        };
        (len, Some(len))
    }
}

impl<'a> ExactSizeIterator for WeightsIter<'a> {}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn features_view_basic() {
        // 2 features, 3 samples: [[1,2,3], [4,5,6]]
        let data = array![[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let view = FeaturesView::new(data.view());

        assert_eq!(view.n_features(), 2);
        assert_eq!(view.n_samples(), 3);
        assert_eq!(view.get(0, 0), 1.0); // sample 0, feature 0
        assert_eq!(view.get(0, 1), 4.0); // sample 0, feature 1
        assert_eq!(view.get(2, 0), 3.0); // sample 2, feature 0
    }

    #[test]
    fn features_view_feature_contiguous() {
        let data = array![[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let view = FeaturesView::new(data.view());

        let f0 = view.feature(0);
        assert!(f0.as_slice().is_some());
        assert_eq!(f0.as_slice().unwrap(), &[1.0, 2.0, 3.0]);

        let f1 = view.feature(1);
        assert_eq!(f1.as_slice().unwrap(), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn features_view_sample_strided() {
        let data = array![[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let view = FeaturesView::new(data.view());

        let s0 = view.sample_view(0);
        assert_eq!(s0[0], 1.0);
        assert_eq!(s0[1], 4.0);
        assert_eq!(s0.len(), 2);
    }

    #[test]
    fn weights_view_none() {
        let view = WeightsView::none();
        assert!(view.is_none());
        assert!(!view.is_some());
        assert!(view.as_array().is_none());
        assert_eq!(view.get(0), 1.0);
        assert_eq!(view.get(2), 1.0);

        let collected: Vec<f32> = view.iter(3).collect();
        assert_eq!(collected, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn weights_view_some() {
        let weights = array![0.5f32, 2.0, 1.5];
        let view = WeightsView::from_array(weights.view());

        assert!(view.is_some());
        assert_eq!(view.get(0), 0.5);
        assert_eq!(view.get(1), 2.0);

        let collected: Vec<f32> = view.iter(3).collect();
        assert_eq!(collected, vec![0.5, 2.0, 1.5]);
    }

    #[test]
    fn weights_view_from_optional() {
        let uniform = WeightsView::from_optional(None);
        assert!(uniform.is_none());

        let weights = array![0.5f32, 2.0, 1.5];
        let weighted = WeightsView::from_optional(Some(weights.view()));
        assert!(weighted.is_some());
        assert_eq!(weighted.get(1), 2.0);
    }

    #[test]
    fn weights_iter_exact_size() {
        let weights = array![1.0f32, 2.0, 3.0];
        let view = WeightsView::from_array(weights.view());
        assert_eq!(view.iter(3).len(), 3);

        let uniform = WeightsView::none();
        assert_eq!(uniform.iter(5).len(), 5);
    }

    // Verify Send + Sync
    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn views_are_send_sync() {
        assert_send_sync::<FeaturesView<'_>>();
        assert_send_sync::<WeightsView<'_>>();
    }
}
