//! Weighted single-attribute least-squares fits.
//!
//! The weak learner of LogitBoost: scan every attribute, fit a weighted
//! line to the working response, and keep the attribute with the
//! smallest residual sum of squares. "No useful attribute" is a normal
//! outcome consumed by the boosting loop, not an error.

use ndarray::ArrayView1;

use crate::data::FeaturesView;
use crate::model::SimpleRegression;
use crate::utils::Parallelism;

/// An attribute must reduce the residual sum of squares by more than
/// this fraction of the constant predictor's to count as useful.
const SSE_TOLERANCE: f64 = 1e-12;

struct FeatureFit {
    slope: f64,
    intercept: f64,
    sse: f64,
}

/// Fit one attribute's weighted line, or `None` when the attribute
/// carries no usable signal (no present values, degenerate spread, or no
/// real improvement over the constant predictor).
fn fit_feature(xs: ArrayView1<f32>, responses: &[f64], weights: &[f64]) -> Option<FeatureFit> {
    // Weighted means over the rows where the attribute is present.
    let mut sw = 0.0f64;
    let mut swx = 0.0f64;
    let mut swz = 0.0f64;
    for (i, &x) in xs.iter().enumerate() {
        if x.is_nan() {
            continue;
        }
        let w = weights[i];
        sw += w;
        swx += w * x as f64;
        swz += w * responses[i];
    }
    if sw <= 0.0 {
        return None;
    }
    let x_mean = swx / sw;
    let z_mean = swz / sw;

    let mut sxx = 0.0f64;
    let mut sxy = 0.0f64;
    let mut syy = 0.0f64;
    for (i, &x) in xs.iter().enumerate() {
        if x.is_nan() {
            continue;
        }
        let w = weights[i];
        let dx = x as f64 - x_mean;
        let dz = responses[i] - z_mean;
        sxx += w * dx * dx;
        sxy += w * dx * dz;
        syy += w * dz * dz;
    }
    if sxx <= 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let reduction = slope * sxy;
    if reduction <= SSE_TOLERANCE * syy {
        return None;
    }

    Some(FeatureFit {
        slope,
        intercept: z_mean - slope * x_mean,
        sse: syy - reduction,
    })
}

/// Fit the best single-attribute weighted regression to a response table.
///
/// Pure function of its inputs: `responses` and `weights` are the
/// per-instance working response and combined weight (working weight
/// times instance weight). Returns `None` when all weights are zero or
/// no attribute improves on a constant predictor beyond a numeric
/// tolerance.
///
/// The per-attribute scan may run in parallel; the winning attribute is
/// reduced sequentially in index order, so ties resolve to the lowest
/// index regardless of parallelism.
pub(crate) fn fit_simple_regression(
    features: FeaturesView<'_>,
    responses: &[f64],
    weights: &[f64],
    parallelism: Parallelism,
) -> Option<SimpleRegression> {
    debug_assert_eq!(responses.len(), features.n_samples());
    debug_assert_eq!(weights.len(), features.n_samples());

    let total_weight: f64 = weights.iter().sum();
    if total_weight <= 0.0 {
        return None;
    }

    let fits = parallelism.maybe_par_map(0..features.n_features(), |feature| {
        fit_feature(features.feature(feature), responses, weights).map(|fit| (feature, fit))
    });

    let mut best: Option<(usize, FeatureFit)> = None;
    for (feature, fit) in fits.into_iter().flatten() {
        let better = match &best {
            None => true,
            Some((_, current)) => fit.sse < current.sse,
        };
        if better {
            best = Some((feature, fit));
        }
    }

    best.map(|(feature, fit)| SimpleRegression {
        feature,
        slope: fit.slope,
        intercept: fit.intercept,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn view(data: &ndarray::Array2<f32>) -> FeaturesView<'_> {
        FeaturesView::new(data.view())
    }

    #[test]
    fn recovers_a_perfect_line() {
        // z = 2x + 1
        let features = array![[1.0f32, 2.0, 3.0, 4.0]];
        let responses = [3.0, 5.0, 7.0, 9.0];
        let weights = [1.0; 4];

        let reg =
            fit_simple_regression(view(&features), &responses, &weights, Parallelism::Sequential)
                .unwrap();
        assert_eq!(reg.feature, 0);
        assert_abs_diff_eq!(reg.slope, 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(reg.intercept, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn picks_the_attribute_with_smaller_residual() {
        // Feature 1 tracks the response exactly; feature 0 is noise.
        let features = array![[5.0f32, 1.0, 4.0, 2.0], [1.0, 2.0, 3.0, 4.0]];
        let responses = [1.0, 2.0, 3.0, 4.0];
        let weights = [1.0; 4];

        let reg =
            fit_simple_regression(view(&features), &responses, &weights, Parallelism::Sequential)
                .unwrap();
        assert_eq!(reg.feature, 1);
        assert_abs_diff_eq!(reg.slope, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(reg.intercept, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn weights_pull_the_fit() {
        // Two clusters; weighting the second heavily moves the line.
        let features = array![[0.0f32, 1.0, 0.0, 1.0]];
        let responses = [0.0, 1.0, 0.0, 3.0];

        let uniform =
            fit_simple_regression(view(&features), &responses, &[1.0; 4], Parallelism::Sequential)
                .unwrap();
        let weighted = fit_simple_regression(
            view(&features),
            &responses,
            &[1.0, 1.0, 1.0, 9.0],
            Parallelism::Sequential,
        )
        .unwrap();
        assert!(weighted.slope > uniform.slope);
    }

    #[test]
    fn zero_weights_fail() {
        let features = array![[1.0f32, 2.0, 3.0]];
        let responses = [1.0, 2.0, 3.0];
        let weights = [0.0; 3];

        assert!(fit_simple_regression(
            view(&features),
            &responses,
            &weights,
            Parallelism::Sequential
        )
        .is_none());
    }

    #[test]
    fn constant_attribute_fails() {
        let features = array![[5.0f32, 5.0, 5.0, 5.0]];
        let responses = [1.0, 2.0, 3.0, 4.0];
        let weights = [1.0; 4];

        assert!(fit_simple_regression(
            view(&features),
            &responses,
            &weights,
            Parallelism::Sequential
        )
        .is_none());
    }

    #[test]
    fn constant_response_fails() {
        // Nothing beats the constant predictor when z never varies.
        let features = array![[1.0f32, 2.0, 3.0, 4.0]];
        let responses = [2.0; 4];
        let weights = [1.0; 4];

        assert!(fit_simple_regression(
            view(&features),
            &responses,
            &weights,
            Parallelism::Sequential
        )
        .is_none());
    }

    #[test]
    fn missing_values_are_skipped_per_attribute() {
        // The NaN row is ignored; the rest is a perfect line z = x.
        let features = array![[1.0f32, f32::NAN, 3.0, 4.0]];
        let responses = [1.0, 100.0, 3.0, 4.0];
        let weights = [1.0; 4];

        let reg =
            fit_simple_regression(view(&features), &responses, &weights, Parallelism::Sequential)
                .unwrap();
        assert_abs_diff_eq!(reg.slope, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(reg.intercept, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn parallel_scan_matches_sequential() {
        let features = array![
            [5.0f32, 1.0, 4.0, 2.0, 8.0, 3.0],
            [1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            [2.0, 2.0, 2.0, 2.0, 2.0, 2.0],
        ];
        let responses = [1.1, 2.0, 2.9, 4.2, 5.0, 5.8];
        let weights = [1.0, 0.5, 1.5, 1.0, 2.0, 1.0];

        let seq =
            fit_simple_regression(view(&features), &responses, &weights, Parallelism::Sequential)
                .unwrap();
        let par =
            fit_simple_regression(view(&features), &responses, &weights, Parallelism::Parallel)
                .unwrap();
        assert_eq!(seq.feature, par.feature);
        assert_abs_diff_eq!(seq.slope, par.slope, epsilon = 0.0);
        assert_abs_diff_eq!(seq.intercept, par.intercept, epsilon = 0.0);
    }
}
