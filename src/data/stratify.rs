//! Deterministic stratified k-fold splits.
//!
//! Cross-validated iteration selection needs class-proportional folds
//! that are reproducible run to run: class `c`'s `i`-th instance (in
//! dataset order) lands in fold `i mod k`. No randomness anywhere.

use ndarray::ArrayView1;

/// A class has too few instances for class-proportional folds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("class {class} has {count} instances, fewer than the {folds} requested folds")]
pub struct StratifyError {
    pub class: usize,
    pub count: usize,
    pub folds: usize,
}

/// Class-proportional partition of sample indices into k folds.
///
/// Each fold's test indices are disjoint from the others and together
/// cover the dataset; the train indices of a fold are everything else,
/// in dataset order.
#[derive(Debug, Clone)]
pub struct StratifiedFolds {
    /// Test indices per fold, each ascending.
    folds: Vec<Vec<usize>>,
    n_samples: usize,
}

impl StratifiedFolds {
    /// Partition `labels` into `n_folds` class-proportional folds.
    ///
    /// # Errors
    ///
    /// Returns [`StratifyError`] when any class in `[0, n_classes)` has
    /// fewer instances than `n_folds`.
    ///
    /// # Panics
    ///
    /// Debug-asserts `n_folds >= 2` and that every label is below
    /// `n_classes`.
    pub fn new(
        labels: ArrayView1<f32>,
        n_classes: usize,
        n_folds: usize,
    ) -> Result<Self, StratifyError> {
        debug_assert!(n_folds >= 2, "stratification needs at least 2 folds");

        let mut counts = vec![0usize; n_classes];
        let mut folds = vec![Vec::new(); n_folds];

        for (i, &label) in labels.iter().enumerate() {
            let class = label as usize;
            debug_assert!(class < n_classes, "label out of range");
            folds[counts[class] % n_folds].push(i);
            counts[class] += 1;
        }

        for (class, &count) in counts.iter().enumerate() {
            if count < n_folds {
                return Err(StratifyError {
                    class,
                    count,
                    folds: n_folds,
                });
            }
        }

        // Indices were pushed in ascending dataset order.
        Ok(Self {
            folds,
            n_samples: labels.len(),
        })
    }

    /// Number of folds.
    pub fn n_folds(&self) -> usize {
        self.folds.len()
    }

    /// The held-out indices of a fold, ascending.
    pub fn test_indices(&self, fold: usize) -> &[usize] {
        &self.folds[fold]
    }

    /// The training indices of a fold: every sample not held out,
    /// in dataset order.
    pub fn train_indices(&self, fold: usize) -> Vec<usize> {
        let test = &self.folds[fold];
        let mut train = Vec::with_capacity(self.n_samples - test.len());
        let mut t = 0;
        for i in 0..self.n_samples {
            if t < test.len() && test[t] == i {
                t += 1;
            } else {
                train.push(i);
            }
        }
        train
    }
}
