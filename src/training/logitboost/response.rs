//! Working response and working weight transforms.
//!
//! These turn the probability-estimation problem into a weighted
//! least-squares problem at each boosting iteration.

/// Clip threshold for the working response.
pub(crate) const Z_MAX: f64 = 3.0;

/// Probabilities are clamped into `(P_EPS, 1 - P_EPS)` before the
/// response transform; `1/p` and `1/(1-p)` must stay finite.
pub(crate) const P_EPS: f64 = 1e-15;

/// Clamp a probability away from 0 and 1.
///
/// Must be applied before [`working_response`]; skipping it is a defect,
/// not a recoverable condition.
#[inline]
pub(crate) fn clamp_probability(p: f64) -> f64 {
    p.clamp(P_EPS, 1.0 - P_EPS)
}

/// Working response `z` for a 0/1 indicator `y` and probability `p`.
///
/// `1/p` for positives and `-1/(1-p)` for negatives, clipped to
/// `±Z_MAX`.
#[inline]
pub(crate) fn working_response(y: f64, p: f64) -> f64 {
    if y == 1.0 {
        (1.0 / p).min(Z_MAX)
    } else {
        (-1.0 / (1.0 - p)).max(-Z_MAX)
    }
}

/// Working weight `w = (y - p) / z`.
#[inline]
pub(crate) fn working_weight(y: f64, p: f64, z: f64) -> f64 {
    (y - p) / z
}
