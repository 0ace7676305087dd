//! LogitBoost training with iteration-selection policies.

use ndarray::ArrayView1;

use crate::data::{Dataset, StratifiedFolds};
use crate::model::{AdditiveLogit, SimpleRegression};
use crate::training::{
    ErrorCurve, MetricFn, StoppingMetric, StoppingMonitor, TrainError, TrainingLogger, Verbosity,
};
use crate::utils::Parallelism;

use super::engine::{BoostingEngine, ScoreState};

// ============================================================================
// Configuration
// ============================================================================

/// How the number of boosting iterations is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IterationPolicy {
    /// Run exactly this many iterations. A fit failure still truncates
    /// the model earlier.
    Fixed(u32),

    /// Choose the count by stratified cross-validation: train on each
    /// fold complement, monitor the held-out error after every
    /// iteration, pick the count minimizing the summed error, then
    /// retrain on the full dataset.
    CrossValidated { n_folds: usize },

    /// Choose the count that minimized the monitored error on the
    /// training set itself.
    TrainErrorStopping,
}

impl Default for IterationPolicy {
    fn default() -> Self {
        IterationPolicy::CrossValidated { n_folds: 5 }
    }
}

/// Parameters for LogitBoost training.
#[derive(Clone, Copy, Debug)]
pub struct LogitBoostParams {
    /// Cap on the number of boosting iterations.
    pub max_iterations: u32,

    /// Iteration-selection policy.
    pub policy: IterationPolicy,

    /// Error metric monitored by the cross-validated and
    /// training-error-stopping policies.
    pub metric: StoppingMetric,

    /// Early-stopping patience: stop once the monitored error has not
    /// strictly improved for more than this many iterations.
    pub patience: u32,

    /// Verbosity level for training output.
    pub verbosity: Verbosity,
}

impl Default for LogitBoostParams {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            policy: IterationPolicy::default(),
            metric: StoppingMetric::default(),
            patience: 50,
            verbosity: Verbosity::default(),
        }
    }
}

// ============================================================================
// LogitBoostTrainer
// ============================================================================

/// Additive logistic-regression trainer.
///
/// # Example
///
/// ```
/// use logitboost::{Dataset, IterationPolicy, LogitBoostParams, LogitBoostTrainer, Parallelism, Verbosity};
/// use ndarray::array;
///
/// let features = array![[1.0f32, 2.0, 10.0, 11.0]];
/// let labels = array![0.0f32, 0.0, 1.0, 1.0];
/// let data = Dataset::new(features.view(), Some(labels.view()), None);
///
/// let params = LogitBoostParams {
///     policy: IterationPolicy::Fixed(10),
///     verbosity: Verbosity::Silent,
///     ..Default::default()
/// };
/// let model = LogitBoostTrainer::new(params)
///     .train(&data, Parallelism::Sequential)
///     .unwrap();
/// assert!(model.n_iterations() <= 10);
/// ```
#[derive(Clone, Debug)]
pub struct LogitBoostTrainer {
    params: LogitBoostParams,
}

/// Per-iteration fit results: `rounds[iteration][class]`.
type Rounds = Vec<Vec<SimpleRegression>>;

impl LogitBoostTrainer {
    /// Create a trainer with the given parameters.
    pub fn new(params: LogitBoostParams) -> Self {
        Self { params }
    }

    /// The trainer's parameters.
    pub fn params(&self) -> &LogitBoostParams {
        &self.params
    }

    /// Train a model.
    ///
    /// **Note:** This method does NOT create a thread pool. Set one up
    /// via [`run_with_threads`](crate::run_with_threads) if desired.
    ///
    /// # Errors
    ///
    /// Returns [`TrainError`] for configuration problems (no class
    /// labels, no instances) and, under the cross-validated policy, for
    /// impossible stratifications. A failed simple-regression fit is not
    /// an error: it truncates the model at the iterations completed so
    /// far.
    pub fn train(
        &self,
        data: &Dataset,
        parallelism: Parallelism,
    ) -> Result<AdditiveLogit, TrainError> {
        let labels = data.labels().ok_or(TrainError::MissingLabels)?;
        let n_classes = data.n_classes();
        if n_classes == 0 {
            return Err(TrainError::NoClasses);
        }

        let logger = TrainingLogger::new(self.params.verbosity);
        logger.start_training(self.params.max_iterations as usize);

        let rounds = match self.params.policy {
            IterationPolicy::Fixed(n) => {
                self.boost_fixed(data, labels, n_classes, n as usize, parallelism, &logger)
            }
            IterationPolicy::CrossValidated { n_folds } => {
                self.boost_cross_validated(data, labels, n_classes, n_folds, parallelism, &logger)?
            }
            IterationPolicy::TrainErrorStopping => {
                let max_iterations = self.params.max_iterations as usize;
                let mut curve = ErrorCurve::new(max_iterations);
                let (mut rounds, completed) = self.boost_monitored(
                    data,
                    labels,
                    data,
                    labels,
                    n_classes,
                    max_iterations,
                    &mut curve,
                    parallelism,
                    &logger,
                );
                rounds.truncate(curve.best_iteration(completed));
                rounds
            }
        };

        logger.finish_training(rounds.len());
        Ok(build_model(rounds, n_classes, data))
    }

    /// Run boosting for a fixed number of iterations.
    fn boost_fixed<'a>(
        &self,
        data: &'a Dataset,
        labels: ArrayView1<'a, f32>,
        n_classes: usize,
        n_iterations: usize,
        parallelism: Parallelism,
        logger: &TrainingLogger,
    ) -> Rounds {
        let mut engine = BoostingEngine::new(data, labels, n_classes, parallelism);
        let mut rounds = Vec::with_capacity(n_iterations);
        while rounds.len() < n_iterations {
            match engine.boost_iteration() {
                Some(round) => rounds.push(round),
                None => {
                    logger.log_fit_failure(rounds.len());
                    break;
                }
            }
        }
        rounds
    }

    /// Run boosting on `train`, evaluating the stopping metric on `eval`
    /// after every iteration and accumulating into `curve`.
    ///
    /// The held-out scores are maintained incrementally with the same
    /// regressors the engine fits, so the recorded error matches a full
    /// re-evaluation of the partial model. Returns the rounds together
    /// with the number of completed iterations.
    #[allow(clippy::too_many_arguments)]
    fn boost_monitored<'a>(
        &self,
        train: &'a Dataset,
        train_labels: ArrayView1<'a, f32>,
        eval: &Dataset,
        eval_labels: ArrayView1<f32>,
        n_classes: usize,
        max_iterations: usize,
        curve: &mut ErrorCurve,
        parallelism: Parallelism,
        logger: &TrainingLogger,
    ) -> (Rounds, usize) {
        let metric = self.params.metric;
        let mut engine = BoostingEngine::new(train, train_labels, n_classes, parallelism);
        let mut eval_scores = ScoreState::new(n_classes, eval.n_samples());
        let mut monitor = StoppingMonitor::new(self.params.patience as usize);

        curve.accumulate(
            0,
            metric.compute(eval_scores.probabilities(), eval_labels, eval.weights()),
        );

        let mut rounds = Vec::new();
        while rounds.len() < max_iterations {
            let Some(round) = engine.boost_iteration() else {
                logger.log_fit_failure(rounds.len());
                break;
            };
            eval_scores.apply_round(&round, eval.features());
            rounds.push(round);

            let iteration = rounds.len();
            curve.accumulate(
                iteration,
                metric.compute(eval_scores.probabilities(), eval_labels, eval.weights()),
            );
            logger.log_round(iteration, metric.name(), curve.value(iteration));

            if monitor.observe(curve.value(iteration)) {
                logger.log_early_stopping(iteration, metric.name());
                break;
            }
        }

        let completed = rounds.len();
        (rounds, completed)
    }

    /// Choose the iteration count by stratified cross-validation, then
    /// retrain on the full dataset for exactly that count.
    ///
    /// Folds run in order: every fold accumulates into the shared curve,
    /// and the running minimum of completed iterations caps the later
    /// folds. Selection only looks below the final cap.
    fn boost_cross_validated<'a>(
        &self,
        data: &'a Dataset,
        labels: ArrayView1<'a, f32>,
        n_classes: usize,
        n_folds: usize,
        parallelism: Parallelism,
        logger: &TrainingLogger,
    ) -> Result<Rounds, TrainError> {
        if n_folds < 2 {
            return Err(TrainError::TooFewFolds(n_folds));
        }
        let folds = StratifiedFolds::new(labels, n_classes, n_folds)?;

        let max_iterations = self.params.max_iterations as usize;
        let mut curve = ErrorCurve::new(max_iterations);
        let mut cap = max_iterations;

        for fold in 0..n_folds {
            let train_fold = data.select(&folds.train_indices(fold));
            let eval_fold = data.select(folds.test_indices(fold));
            let train_labels = train_fold.labels().ok_or(TrainError::MissingLabels)?;
            let eval_labels = eval_fold.labels().ok_or(TrainError::MissingLabels)?;

            let (_, completed) = self.boost_monitored(
                &train_fold,
                train_labels,
                &eval_fold,
                eval_labels,
                n_classes,
                cap,
                &mut curve,
                parallelism,
                logger,
            );
            cap = cap.min(completed);
        }

        let best = curve.best_iteration(cap);
        Ok(self.boost_fixed(data, labels, n_classes, best, parallelism, logger))
    }
}

/// Regroup per-iteration rounds into the per-class layout the model
/// stores, and attach the dataset's schema.
fn build_model(rounds: Rounds, n_classes: usize, data: &Dataset) -> AdditiveLogit {
    let n_iterations = rounds.len();
    let mut per_class: Vec<Vec<SimpleRegression>> = (0..n_classes)
        .map(|_| Vec::with_capacity(n_iterations))
        .collect();
    for round in rounds {
        debug_assert_eq!(round.len(), n_classes);
        for (class, reg) in round.into_iter().enumerate() {
            per_class[class].push(reg);
        }
    }
    AdditiveLogit::new(per_class, data.n_features(), data.schema().clone())
}
