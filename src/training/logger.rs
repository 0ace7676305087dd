//! Structured training progress output.
//!
//! Emits through the `log` facade so embedding applications control the
//! sink. `Verbosity` gates what the trainer reports: lifecycle events at
//! `Info`, per-iteration metric values at `Debug`.

/// Verbosity level for training output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// No output.
    Silent,
    /// Lifecycle events: start, early stop, fit failure, finish.
    Info,
    /// Everything, including one line per boosting iteration.
    Debug,
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity::Silent
    }
}

/// Logger for the training lifecycle.
pub struct TrainingLogger {
    verbosity: Verbosity,
}

impl TrainingLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    pub fn start_training(&self, max_iterations: usize) {
        if self.verbosity >= Verbosity::Info {
            log::info!("logitboost: training, at most {max_iterations} iterations");
        }
    }

    pub fn log_round(&self, iteration: usize, metric: &str, value: f64) {
        if self.verbosity >= Verbosity::Debug {
            log::debug!("iteration {iteration}: {metric} = {value:.6}");
        }
    }

    pub fn log_early_stopping(&self, iteration: usize, metric: &str) {
        if self.verbosity >= Verbosity::Info {
            log::info!("early stop at iteration {iteration}: {metric} plateaued");
        }
    }

    pub fn log_fit_failure(&self, iteration: usize) {
        if self.verbosity >= Verbosity::Info {
            log::info!("iteration {iteration}: no useful attribute, stopping");
        }
    }

    pub fn finish_training(&self, n_iterations: usize) {
        if self.verbosity >= Verbosity::Info {
            log::info!("logitboost: kept {n_iterations} iterations");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_ordering() {
        assert!(Verbosity::Silent < Verbosity::Info);
        assert!(Verbosity::Info < Verbosity::Debug);
        assert_eq!(Verbosity::default(), Verbosity::Silent);
    }
}
