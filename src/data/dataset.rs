//! Dataset container and builder.
//!
//! This module provides [`Dataset`] and [`DatasetBuilder`].

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use super::error::DatasetError;
use super::schema::{DatasetSchema, FeatureMeta};
use super::views::{FeaturesView, WeightsView};

/// The dataset container consumed by training and prediction.
///
/// # Storage Layout
///
/// Features are stored in **feature-major** layout: `[n_features, n_samples]`.
/// Each feature's values across all samples are contiguous in memory.
/// Missing attribute values are `NaN`.
///
/// Class labels are integer-valued floats in `[0, n_classes)`; instance
/// weights are positive. Both are optional: a prediction-only dataset
/// carries neither.
///
/// # Construction
///
/// Use [`Dataset::new`] for construction from a feature-major matrix,
/// or [`Dataset::builder`] for named features with full validation.
///
/// # Example
///
/// ```
/// use logitboost::Dataset;
/// use ndarray::array;
///
/// // Feature-major format: 2 features, 3 samples
/// let features = array![[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]];
/// let labels = array![0.0f32, 1.0, 0.0];
/// let ds = Dataset::new(features.view(), Some(labels.view()), None);
///
/// assert_eq!(ds.n_samples(), 3);
/// assert_eq!(ds.n_features(), 2);
/// assert_eq!(ds.n_classes(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Feature data: `[n_features, n_samples]` (feature-major).
    features: Array2<f32>,

    /// Feature metadata.
    schema: DatasetSchema,

    /// Class labels: length = n_samples, integer-valued in `[0, n_classes)`.
    labels: Option<Array1<f32>>,

    /// Instance weights: length = n_samples, positive.
    weights: Option<Array1<f32>>,
}

impl Dataset {
    /// Create a dataset from feature-major data.
    ///
    /// This is the primary constructor.
    ///
    /// # Arguments
    ///
    /// * `features` - Feature matrix `[n_features, n_samples]` (feature-major)
    /// * `labels` - Optional class labels (length = n_samples)
    /// * `weights` - Optional instance weights (length = n_samples)
    ///
    /// # Panics
    ///
    /// Debug-asserts that sample counts match across features, labels, and
    /// weights. Use [`Dataset::builder`] for full validation.
    pub fn new(
        features: ArrayView2<f32>,
        labels: Option<ArrayView1<f32>>,
        weights: Option<ArrayView1<f32>>,
    ) -> Self {
        let n_samples = features.ncols();
        let n_features = features.nrows();

        if let Some(ref l) = labels {
            debug_assert_eq!(
                l.len(),
                n_samples,
                "labels must have same sample count as features"
            );
        }
        if let Some(ref w) = weights {
            debug_assert_eq!(
                w.len(),
                n_samples,
                "weights must have same sample count as features"
            );
        }

        Self {
            features: features.to_owned(),
            schema: DatasetSchema::unnamed(n_features),
            labels: labels.map(|l| l.to_owned()),
            weights: weights.map(|w| w.to_owned()),
        }
    }

    /// Create a builder for validated dataset construction.
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::new()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of samples.
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.features.ncols()
    }

    /// Number of features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.features.nrows()
    }

    /// Number of distinct classes, derived from the labels.
    ///
    /// Returns 0 when no labels are attached or the dataset is empty.
    pub fn n_classes(&self) -> usize {
        match &self.labels {
            Some(labels) => labels.iter().fold(0usize, |k, &l| k.max(l as usize + 1)),
            None => 0,
        }
    }

    /// Get the schema.
    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    /// Check if the dataset has class labels.
    pub fn has_labels(&self) -> bool {
        self.labels.is_some()
    }

    /// Check if the dataset has instance weights.
    pub fn has_weights(&self) -> bool {
        self.weights.is_some()
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Get a view of the feature data.
    ///
    /// Shape: `[n_features, n_samples]` (feature-major).
    pub fn features(&self) -> FeaturesView<'_> {
        FeaturesView::new(self.features.view())
    }

    /// Get the class labels, if present.
    pub fn labels(&self) -> Option<ArrayView1<'_, f32>> {
        self.labels.as_ref().map(|l| l.view())
    }

    /// Get the instance weights as a `WeightsView`.
    ///
    /// Returns `WeightsView::None` if no weights were provided.
    pub fn weights(&self) -> WeightsView<'_> {
        match &self.weights {
            Some(w) => WeightsView::from_array(w.view()),
            None => WeightsView::none(),
        }
    }

    // =========================================================================
    // Builder-style methods
    // =========================================================================

    /// Attach instance weights.
    ///
    /// # Panics
    ///
    /// Debug-asserts that the weights length matches `n_samples`.
    pub fn with_weights(mut self, weights: Array1<f32>) -> Self {
        debug_assert_eq!(
            weights.len(),
            self.n_samples(),
            "weights length must match n_samples"
        );
        self.weights = Some(weights);
        self
    }

    /// Set the schema.
    ///
    /// # Panics
    ///
    /// Debug-asserts that the schema has the same number of features.
    pub fn with_schema(mut self, schema: DatasetSchema) -> Self {
        debug_assert_eq!(
            schema.n_features(),
            self.n_features(),
            "schema must have same number of features"
        );
        self.schema = schema;
        self
    }

    // =========================================================================
    // Fold extraction
    // =========================================================================

    /// Clone the chosen samples into a new dataset.
    ///
    /// Used to materialize cross-validation folds: fold datasets own their
    /// data rather than aliasing the parent.
    ///
    /// # Panics
    ///
    /// Debug-asserts that every index is in bounds.
    pub fn select(&self, indices: &[usize]) -> Dataset {
        debug_assert!(
            indices.iter().all(|&i| i < self.n_samples()),
            "sample index out of bounds"
        );

        let features = Array2::from_shape_fn((self.n_features(), indices.len()), |(f, i)| {
            self.features[[f, indices[i]]]
        });
        let labels = self
            .labels
            .as_ref()
            .map(|l| indices.iter().map(|&i| l[i]).collect::<Array1<f32>>());
        let weights = self
            .weights
            .as_ref()
            .map(|w| indices.iter().map(|&i| w[i]).collect::<Array1<f32>>());

        Dataset {
            features,
            schema: self.schema.clone(),
            labels,
            weights,
        }
    }
}

/// Builder for validated dataset construction.
///
/// Use this to attach feature names and to validate shapes, label values,
/// and weight positivity up front.
///
/// # Example
///
/// ```
/// use logitboost::DatasetBuilder;
/// use ndarray::array;
///
/// let ds = DatasetBuilder::new()
///     .add_feature("age", array![25.0f32, 30.0, 35.0].view())
///     .add_feature("mass", array![60.0f32, 72.0, 90.0].view())
///     .labels(array![0.0f32, 1.0, 1.0].view())
///     .build()
///     .unwrap();
///
/// assert_eq!(ds.n_features(), 2);
/// assert_eq!(ds.n_classes(), 2);
/// ```
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    columns: Vec<Array1<f32>>,
    metas: Vec<FeatureMeta>,
    labels: Option<Array1<f32>>,
    weights: Option<Array1<f32>>,
}

impl DatasetBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named feature column.
    pub fn add_feature(mut self, name: &str, values: ArrayView1<f32>) -> Self {
        self.columns.push(values.to_owned());
        self.metas.push(FeatureMeta::named(name));
        self
    }

    /// Add an unnamed feature column.
    pub fn add_feature_unnamed(mut self, values: ArrayView1<f32>) -> Self {
        self.columns.push(values.to_owned());
        self.metas.push(FeatureMeta::unnamed());
        self
    }

    /// Set class labels (length = n_samples).
    pub fn labels(mut self, labels: ArrayView1<f32>) -> Self {
        self.labels = Some(labels.to_owned());
        self
    }

    /// Set instance weights (length = n_samples).
    pub fn weights(mut self, weights: ArrayView1<f32>) -> Self {
        self.weights = Some(weights.to_owned());
        self
    }

    /// Build the dataset.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if:
    /// - No features were provided
    /// - Columns have inconsistent sample counts
    /// - Labels have the wrong length, or are negative, non-integer, or non-finite
    /// - Weights have the wrong length, or are not strictly positive
    pub fn build(self) -> Result<Dataset, DatasetError> {
        if self.columns.is_empty() {
            return Err(DatasetError::EmptyFeatures);
        }

        let n_samples = self.columns[0].len();
        let n_features = self.columns.len();

        for col in &self.columns {
            if col.len() != n_samples {
                return Err(DatasetError::ShapeMismatch {
                    expected: n_samples,
                    got: col.len(),
                    field: "features",
                });
            }
        }

        if let Some(ref labels) = self.labels {
            if labels.len() != n_samples {
                return Err(DatasetError::ShapeMismatch {
                    expected: n_samples,
                    got: labels.len(),
                    field: "labels",
                });
            }
            for (index, &label) in labels.iter().enumerate() {
                if !label.is_finite() || label < 0.0 || label.fract() != 0.0 {
                    return Err(DatasetError::InvalidLabel { index, label });
                }
            }
        }

        if let Some(ref weights) = self.weights {
            if weights.len() != n_samples {
                return Err(DatasetError::ShapeMismatch {
                    expected: n_samples,
                    got: weights.len(),
                    field: "weights",
                });
            }
            for (index, &weight) in weights.iter().enumerate() {
                if !(weight.is_finite() && weight > 0.0) {
                    return Err(DatasetError::InvalidWeight { index, weight });
                }
            }
        }

        // Build feature matrix [n_features, n_samples]
        let mut features = Array2::zeros((n_features, n_samples));
        for (i, col) in self.columns.into_iter().enumerate() {
            features.row_mut(i).assign(&col);
        }

        Ok(Dataset {
            features,
            schema: DatasetSchema::from_features(self.metas),
            labels: self.labels,
            weights: self.weights,
        })
    }
}
