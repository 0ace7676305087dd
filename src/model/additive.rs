//! The additive logistic model produced by LogitBoost.

use std::fmt;

use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::data::{Dataset, DatasetSchema};
use crate::utils::{softmax_inplace, Parallelism};

/// Coefficients below this magnitude count as zero for introspection.
const COEF_EPS: f64 = 1e-12;

/// One weak learner: a linear function of a single attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimpleRegression {
    /// Index of the attribute this regressor was fit on.
    pub feature: usize,
    pub slope: f64,
    pub intercept: f64,
}

impl SimpleRegression {
    /// Raw prediction for an attribute value.
    ///
    /// A missing value (`NaN`) contributes the intercept alone.
    #[inline]
    pub fn predict_value(&self, x: f64) -> f64 {
        if x.is_nan() {
            self.intercept
        } else {
            self.intercept + self.slope * x
        }
    }
}

/// Additive multiclass logistic model.
///
/// Stores, per class, the sequence of simple regressors kept after
/// iteration selection. The per-class score of a sample is the sum over
/// iterations of the centered raw predictions (see
/// [`predict_margins`](Self::predict_margins)); class probabilities come
/// from a max-subtracted softmax over the scores.
///
/// The model is immutable: it is built once by the trainer and only read
/// afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdditiveLogit {
    /// `regressions[class][iteration]`; all classes have equal length.
    regressions: Vec<Vec<SimpleRegression>>,
    n_features: usize,
    schema: DatasetSchema,
}

impl AdditiveLogit {
    /// Assemble a model from per-class regressor sequences.
    pub(crate) fn new(
        regressions: Vec<Vec<SimpleRegression>>,
        n_features: usize,
        schema: DatasetSchema,
    ) -> Self {
        debug_assert!(!regressions.is_empty(), "model needs at least one class");
        debug_assert!(
            regressions
                .windows(2)
                .all(|pair| pair[0].len() == pair[1].len()),
            "every class must have the same number of iterations"
        );
        Self {
            regressions,
            n_features,
            schema,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of classes.
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.regressions.len()
    }

    /// Number of boosting iterations kept in the model.
    #[inline]
    pub fn n_iterations(&self) -> usize {
        self.regressions[0].len()
    }

    /// Number of input features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// The regressors fit for one class, in iteration order.
    pub fn class_regressions(&self, class: usize) -> &[SimpleRegression] {
        &self.regressions[class]
    }

    /// The feature-name schema recorded at training time.
    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    // =========================================================================
    // Inference
    // =========================================================================

    /// Per-class scores from a getter over attribute values.
    ///
    /// Applies the same centering as training, once per kept iteration:
    /// the per-instance increments sum to zero across classes, so the
    /// returned scores do too.
    fn margins_with(&self, value_at: impl Fn(usize) -> f64) -> Vec<f64> {
        let k = self.n_classes();
        let factor = (k as f64 - 1.0) / k as f64;
        let mut scores = vec![0.0f64; k];
        let mut pred = vec![0.0f64; k];

        for iteration in 0..self.n_iterations() {
            let mut sum = 0.0;
            for (class, pred_slot) in pred.iter_mut().enumerate() {
                let reg = &self.regressions[class][iteration];
                *pred_slot = reg.predict_value(value_at(reg.feature));
                sum += *pred_slot;
            }
            let mean = sum / k as f64;
            for (class, &p) in pred.iter().enumerate() {
                scores[class] += (p - mean) * factor;
            }
        }

        scores
    }

    /// Accumulated per-class scores (pre-softmax) for one sample.
    ///
    /// `sample` holds the attribute values in feature order.
    pub fn predict_margins(&self, sample: ArrayView1<f32>) -> Array1<f64> {
        debug_assert_eq!(sample.len(), self.n_features, "sample length mismatch");
        Array1::from_vec(self.margins_with(|feature| sample[feature] as f64))
    }

    /// Class probability distribution for one sample.
    ///
    /// The result sums to 1 and every entry lies in `[0, 1]`.
    pub fn predict_distribution(&self, sample: ArrayView1<f32>) -> Array1<f64> {
        debug_assert_eq!(sample.len(), self.n_features, "sample length mismatch");
        let mut scores = self.margins_with(|feature| sample[feature] as f64);
        softmax_inplace(&mut scores);
        Array1::from_vec(scores)
    }

    /// Class probabilities for every sample in a dataset.
    ///
    /// Returns an array with shape `[n_classes, n_samples]`; each column
    /// sums to 1. Samples are scored independently, in parallel when
    /// allowed.
    pub fn predict_proba(&self, data: &Dataset, parallelism: Parallelism) -> Array2<f64> {
        debug_assert_eq!(data.n_features(), self.n_features, "feature count mismatch");

        let features = data.features();
        let n_samples = data.n_samples();
        let columns = parallelism.maybe_par_map(0..n_samples, |sample| {
            let mut scores = self.margins_with(|feature| features.get(sample, feature) as f64);
            softmax_inplace(&mut scores);
            scores
        });

        let mut probs = Array2::zeros((self.n_classes(), n_samples));
        for (sample, column) in columns.into_iter().enumerate() {
            for (class, p) in column.into_iter().enumerate() {
                probs[[class, sample]] = p;
            }
        }
        probs
    }

    // =========================================================================
    // Coefficient introspection
    // =========================================================================

    /// Accumulated linear coefficients of the model.
    ///
    /// Shape `[n_features + 1, n_classes]`: each regressor's slope is
    /// added to its attribute's row and its intercept to the last
    /// (constant-term) row. Valid because every iteration is linear in
    /// its chosen attribute, so repeated selections add up.
    pub fn coefficients(&self) -> Array2<f64> {
        let mut coef = Array2::zeros((self.n_features + 1, self.n_classes()));
        for (class, regs) in self.regressions.iter().enumerate() {
            for reg in regs {
                coef[[reg.feature, class]] += reg.slope;
                coef[[self.n_features, class]] += reg.intercept;
            }
        }
        coef
    }

    /// Per-class indices of the attributes with a nonzero accumulated
    /// coefficient, ascending.
    pub fn used_features(&self) -> Vec<Vec<usize>> {
        let coef = self.coefficients();
        (0..self.n_classes())
            .map(|class| {
                (0..self.n_features)
                    .filter(|&feature| coef[[feature, class]].abs() > COEF_EPS)
                    .collect()
            })
            .collect()
    }

    /// Fraction of attributes used by any class, in `[0, 1]`.
    pub fn percent_features_used(&self) -> f64 {
        if self.n_features == 0 {
            return 0.0;
        }
        let mut used = vec![false; self.n_features];
        for class_features in self.used_features() {
            for feature in class_features {
                used[feature] = true;
            }
        }
        used.iter().filter(|&&u| u).count() as f64 / self.n_features as f64
    }
}

impl fmt::Display for AdditiveLogit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coef = self.coefficients();
        let used = self.used_features();
        for class in 0..self.n_classes() {
            writeln!(f, "Class {class}:")?;
            write!(f, "  {:.4}", coef[[self.n_features, class]])?;
            for &feature in &used[class] {
                write!(
                    f,
                    " + {:.4} * [{}]",
                    coef[[feature, class]],
                    self.schema.display_name(feature)
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn reg(feature: usize, slope: f64, intercept: f64) -> SimpleRegression {
        SimpleRegression {
            feature,
            slope,
            intercept,
        }
    }

    fn two_class_model() -> AdditiveLogit {
        // Two iterations, both on feature 0, with opposite-signed classes.
        AdditiveLogit::new(
            vec![
                vec![reg(0, -0.5, 3.0), reg(0, -0.25, 1.5)],
                vec![reg(0, 0.5, -3.0), reg(0, 0.25, -1.5)],
            ],
            2,
            DatasetSchema::unnamed(2),
        )
    }

    #[test]
    fn simple_regression_predicts_line() {
        let r = reg(0, 2.0, 1.0);
        assert_abs_diff_eq!(r.predict_value(3.0), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn simple_regression_missing_value_uses_intercept() {
        let r = reg(0, 2.0, 1.0);
        assert_abs_diff_eq!(r.predict_value(f64::NAN), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn margins_sum_to_zero() {
        let model = two_class_model();
        let margins = model.predict_margins(array![2.0f32, 9.0].view());
        let sum: f64 = margins.iter().sum();
        assert_abs_diff_eq!(sum, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn distribution_is_normalized() {
        let model = two_class_model();
        let dist = model.predict_distribution(array![2.0f32, 9.0].view());
        let sum: f64 = dist.iter().sum();
        assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-6);
        assert!(dist.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }

    #[test]
    fn empty_model_is_uniform() {
        let model = AdditiveLogit::new(
            vec![Vec::new(), Vec::new(), Vec::new()],
            1,
            DatasetSchema::unnamed(1),
        );
        let dist = model.predict_distribution(array![5.0f32].view());
        for &p in dist.iter() {
            assert_abs_diff_eq!(p, 1.0 / 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn coefficients_accumulate() {
        let model = two_class_model();
        let coef = model.coefficients();
        assert_eq!(coef.dim(), (3, 2));
        // Slopes on feature 0 add up; feature 1 untouched.
        assert_abs_diff_eq!(coef[[0, 0]], -0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(coef[[0, 1]], 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(coef[[1, 0]], 0.0, epsilon = 1e-12);
        // Intercepts land in the constant-term row.
        assert_abs_diff_eq!(coef[[2, 0]], 4.5, epsilon = 1e-12);
        assert_abs_diff_eq!(coef[[2, 1]], -4.5, epsilon = 1e-12);
    }

    #[test]
    fn used_features_skips_untouched_attributes() {
        let model = two_class_model();
        assert_eq!(model.used_features(), vec![vec![0], vec![0]]);
        assert_abs_diff_eq!(model.percent_features_used(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn cancelled_slopes_count_as_unused() {
        let model = AdditiveLogit::new(
            vec![
                vec![reg(0, 1.0, 0.0), reg(0, -1.0, 0.0)],
                vec![reg(0, 0.5, 0.0), reg(0, -0.5, 0.0)],
            ],
            1,
            DatasetSchema::unnamed(1),
        );
        assert_eq!(model.used_features(), vec![Vec::<usize>::new(), Vec::new()]);
        assert_abs_diff_eq!(model.percent_features_used(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn display_shows_named_coefficients() {
        let model = AdditiveLogit::new(
            vec![vec![reg(0, -0.5, 3.0)], vec![reg(0, 0.5, -3.0)]],
            2,
            DatasetSchema::from_features(vec![
                crate::data::FeatureMeta::named("mass"),
                crate::data::FeatureMeta::unnamed(),
            ]),
        );
        let text = format!("{model}");
        assert!(text.contains("Class 0:"));
        assert!(text.contains("Class 1:"));
        assert!(text.contains("[mass]"));
    }

    #[test]
    fn predict_proba_matches_single_sample_path() {
        let model = two_class_model();
        let features = array![[1.0f32, 4.0, 8.0], [0.0, 0.0, 0.0]];
        let data = Dataset::new(features.view(), None, None);

        let batch = model.predict_proba(&data, Parallelism::Sequential);
        assert_eq!(batch.dim(), (2, 3));
        for sample in 0..3 {
            let single = model.predict_distribution(data.features().sample_view(sample));
            for class in 0..2 {
                assert_abs_diff_eq!(batch[[class, sample]], single[class], epsilon = 1e-12);
            }
        }
    }
}
