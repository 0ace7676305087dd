//! LogitBoost working state and the single-iteration update.

use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::data::{Dataset, FeaturesView, WeightsView};
use crate::model::SimpleRegression;
use crate::utils::{softmax_inplace, Parallelism};

use super::regression::fit_simple_regression;
use super::response::{clamp_probability, working_response, working_weight};

/// Accumulated scores and the probabilities derived from them.
///
/// Shape `[n_classes, n_samples]`. Scores start at zero, probabilities
/// uniform at `1/K`; every applied round keeps each probability column
/// summing to 1.
pub(crate) struct ScoreState {
    fs: Array2<f64>,
    probs: Array2<f64>,
}

impl ScoreState {
    pub(crate) fn new(n_classes: usize, n_samples: usize) -> Self {
        Self {
            fs: Array2::zeros((n_classes, n_samples)),
            probs: Array2::from_elem((n_classes, n_samples), 1.0 / n_classes as f64),
        }
    }

    /// Current class probabilities, `[n_classes, n_samples]`.
    pub(crate) fn probabilities(&self) -> ArrayView2<'_, f64> {
        self.probs.view()
    }

    /// Apply one round of per-class regressors: the centered score
    /// update followed by the softmax refresh.
    ///
    /// Per sample, the raw predictions are centered so that the applied
    /// increments sum to zero across classes:
    /// `F_j += (pred_j - mean) * (K-1)/K`.
    pub(crate) fn apply_round(&mut self, round: &[SimpleRegression], features: FeaturesView<'_>) {
        let k = self.fs.nrows();
        let n_samples = self.fs.ncols();
        debug_assert_eq!(round.len(), k);
        debug_assert_eq!(features.n_samples(), n_samples);

        let factor = (k as f64 - 1.0) / k as f64;
        let mut scratch = vec![0.0f64; k];

        for sample in 0..n_samples {
            let mut sum = 0.0;
            for (class, reg) in round.iter().enumerate() {
                let pred = reg.predict_value(features.get(sample, reg.feature) as f64);
                scratch[class] = pred;
                sum += pred;
            }
            let mean = sum / k as f64;
            for (class, &pred) in scratch.iter().enumerate() {
                self.fs[[class, sample]] += (pred - mean) * factor;
            }

            for (class, slot) in scratch.iter_mut().enumerate() {
                *slot = self.fs[[class, sample]];
            }
            softmax_inplace(&mut scratch);
            for (class, &p) in scratch.iter().enumerate() {
                self.probs[[class, sample]] = p;
            }
        }
    }
}

/// Runs LogitBoost iterations over one training set.
///
/// Holds the indicator matrix Y (fixed for the dataset) and the mutable
/// score state. Termination is driven by the caller; the only internal
/// stop signal is a failed fit.
pub(crate) struct BoostingEngine<'a> {
    features: FeaturesView<'a>,
    instance_weights: WeightsView<'a>,
    /// 0/1 class indicators, `[n_classes, n_samples]`.
    ys: Array2<f64>,
    scores: ScoreState,
    n_classes: usize,
    parallelism: Parallelism,
    // Per-class response table scratch, rebuilt every fit.
    responses: Vec<f64>,
    boost_weights: Vec<f64>,
}

impl<'a> BoostingEngine<'a> {
    /// Fresh working state over a training set.
    ///
    /// `labels` must belong to `train`; `n_classes` is fixed for the run
    /// (fold datasets may not contain every class, the full dataset
    /// does).
    pub(crate) fn new(
        train: &'a Dataset,
        labels: ArrayView1<'a, f32>,
        n_classes: usize,
        parallelism: Parallelism,
    ) -> Self {
        let n_samples = train.n_samples();
        debug_assert_eq!(labels.len(), n_samples);
        debug_assert!(n_classes >= 1);

        let mut ys = Array2::zeros((n_classes, n_samples));
        for (sample, &label) in labels.iter().enumerate() {
            ys[[label.round() as usize, sample]] = 1.0;
        }

        Self {
            features: train.features(),
            instance_weights: train.weights(),
            ys,
            scores: ScoreState::new(n_classes, n_samples),
            n_classes,
            parallelism,
            responses: vec![0.0; n_samples],
            boost_weights: vec![0.0; n_samples],
        }
    }

    /// Current training-set class probabilities.
    pub(crate) fn probabilities(&self) -> ArrayView2<'_, f64> {
        self.scores.probabilities()
    }

    /// Run one LogitBoost iteration.
    ///
    /// Returns the fitted regressors, one per class, after applying their
    /// centered update to the working state. Returns `None` - leaving the
    /// state untouched - when any class's fit finds no useful attribute;
    /// the caller must stop boosting.
    pub(crate) fn boost_iteration(&mut self) -> Option<Vec<SimpleRegression>> {
        let n_samples = self.features.n_samples();
        let mut round = Vec::with_capacity(self.n_classes);

        for class in 0..self.n_classes {
            for sample in 0..n_samples {
                let y = self.ys[[class, sample]];
                let p = clamp_probability(self.scores.probs[[class, sample]]);
                let z = working_response(y, p);
                self.responses[sample] = z;
                self.boost_weights[sample] =
                    working_weight(y, p, z) * self.instance_weights.get(sample) as f64;
            }

            let fit = fit_simple_regression(
                self.features,
                &self.responses,
                &self.boost_weights,
                self.parallelism,
            )?;
            round.push(fit);
        }

        self.scores.apply_round(&round, self.features);
        Some(round)
    }
}
