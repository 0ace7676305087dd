//! Common utilities used across the crate.
//!
//! This module provides the parallelism configuration shared by training
//! and prediction, plus small numeric helpers.

use rayon::prelude::*;

// =============================================================================
// Numeric Utilities
// =============================================================================

/// Apply a max-subtracted softmax transform in-place to one row of scores.
///
/// Subtracting the row maximum before exponentiating keeps the transform
/// finite for arbitrarily large scores. The result sums to 1.
#[inline]
pub(crate) fn softmax_inplace(row: &mut [f64]) {
    if row.is_empty() {
        return;
    }

    let max_val = row.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let mut sum = 0.0f64;
    for x in row.iter_mut() {
        *x = (*x - max_val).exp();
        sum += *x;
    }

    if sum > 0.0 {
        for x in row.iter_mut() {
            *x /= sum;
        }
    }
}

// =============================================================================
// Parallelism Configuration
// =============================================================================

/// Whether parallel execution is allowed.
///
/// This is a simple boolean flag passed through training components.
/// When `Parallel`, components may use `rayon` parallel iterators.
/// When `Sequential`, components must use sequential iteration.
///
/// The actual thread pool is set up at the API boundary via
/// [`run_with_threads`]. Components don't manage thread pools - they just
/// respect this flag. Every parallel region in this crate reduces its
/// results in a fixed order, so the flag never changes numeric output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parallelism {
    Sequential,
    Parallel,
}

impl Parallelism {
    /// Create from thread count semantics.
    ///
    /// - 0 = auto (parallel if rayon pool has multiple threads, sequential otherwise)
    /// - 1 = sequential
    /// - >1 = parallel
    #[inline]
    pub fn from_threads(n_threads: usize) -> Self {
        if n_threads == 1 || (n_threads == 0 && rayon::current_num_threads() == 1) {
            Parallelism::Sequential
        } else {
            Parallelism::Parallel
        }
    }

    /// Returns `true` if parallel execution is allowed.
    #[inline]
    pub fn is_parallel(self) -> bool {
        matches!(self, Parallelism::Parallel)
    }

    /// Map over items, in parallel when allowed.
    ///
    /// Results come back in input order either way.
    #[inline]
    pub fn maybe_par_map<T, B, I, F>(self, iter: I, f: F) -> Vec<B>
    where
        T: Send,
        B: Send,
        I: IntoIterator<Item = T> + IntoParallelIterator<Item = T>,
        F: Fn(T) -> B + Sync + Send,
    {
        if self.is_parallel() {
            iter.into_par_iter().map(f).collect()
        } else {
            iter.into_iter().map(f).collect()
        }
    }
}

// =============================================================================
// Thread Pool Setup
// =============================================================================

/// Run a closure with the appropriate thread pool.
///
/// Thread count semantics:
/// - `0` = auto (use all available cores)
/// - `1` = sequential (no thread pool)
/// - `n > 1` = use exactly `n` threads
///
/// # Example
///
/// ```ignore
/// use logitboost::run_with_threads;
///
/// // Exactly 4 threads
/// let model = run_with_threads(4, |parallelism| trainer.train(&data, parallelism));
/// ```
#[inline]
pub fn run_with_threads<T: Send>(n_threads: usize, f: impl FnOnce(Parallelism) -> T + Send) -> T {
    let parallelism = Parallelism::from_threads(n_threads);

    match parallelism {
        Parallelism::Sequential => f(Parallelism::Sequential),
        Parallelism::Parallel => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n_threads)
                .build()
                .expect("Failed to create thread pool");
            pool.install(|| f(Parallelism::Parallel))
        }
    }
}
