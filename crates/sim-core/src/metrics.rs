//! Convergence Measurement
//!
//! Quantifies how fast the population's opinions collapse toward their mean.
//! The error at each snapshot is the disagreement norm normalized by the
//! fixed initial norm; the convergence rate is the absolute slope of an
//! ordinary-least-squares fit of the log-error over the trailing half of the
//! snapshot series, where the transient has died out and the decay is
//! exponential.

use sim_events::{ConvergenceReport, ValueSnapshot};

use crate::error::SimError;

/// Floor applied to error values (and to the initial norm) before taking a
/// logarithm or dividing. Exact consensus would otherwise send the log fit
/// to negative infinity.
pub const ERROR_FLOOR: f64 = 1e-12;

/// Normalized disagreement at one observation:
/// `sqrt(sum_i (v_i - mean(v))^2) / sqrt(sum_i v0_i^2)`.
///
/// The denominator is fixed from the initial snapshot so the measure stays
/// stable as the numerator shrinks.
pub fn normalized_error(values: &[f64], initial: &[f64]) -> f64 {
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let disagreement = values
        .iter()
        .map(|v| (v - mean) * (v - mean))
        .sum::<f64>()
        .sqrt();
    let initial_norm = initial.iter().map(|v| v * v).sum::<f64>().sqrt();
    disagreement / initial_norm.max(ERROR_FLOOR)
}

/// Error trajectory over a snapshot series, in time order.
pub fn error_series(snapshots: &[ValueSnapshot], initial: &[f64]) -> Vec<f64> {
    snapshots
        .iter()
        .map(|snap| normalized_error(&snap.values, initial))
        .collect()
}

/// Ordinary-least-squares fit of `ln(max(err, floor))` against time over the
/// trailing half of the series. Returns `(slope, intercept)`.
pub fn log_linear_fit(times: &[f64], errors: &[f64]) -> Result<(f64, f64), SimError> {
    if times.len() != errors.len() {
        return Err(SimError::SeriesLengthMismatch {
            times: times.len(),
            errors: errors.len(),
        });
    }
    let start = times.len() / 2;
    let xs = &times[start..];
    let ys: Vec<f64> = errors[start..]
        .iter()
        .map(|e| e.max(ERROR_FLOOR).ln())
        .collect();
    if xs.len() < 2 {
        return Err(SimError::TooFewSnapshots(xs.len()));
    }

    let n = xs.len() as f64;
    let sum_x: f64 = xs.iter().sum();
    let sum_y: f64 = ys.iter().sum();
    let sum_xy: f64 = xs.iter().zip(&ys).map(|(x, y)| x * y).sum();
    let sum_xx: f64 = xs.iter().map(|x| x * x).sum();

    let denom = n * sum_xx - sum_x * sum_x;
    if denom == 0.0 {
        return Err(SimError::TooFewSnapshots(xs.len()));
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;
    Ok((slope, intercept))
}

/// Scalar convergence rate: the absolute fitted slope.
pub fn convergence_rate(times: &[f64], errors: &[f64]) -> Result<f64, SimError> {
    let (slope, _) = log_linear_fit(times, errors)?;
    Ok(slope.abs())
}

/// Full measurement over a snapshot series.
pub fn measure(snapshots: &[ValueSnapshot], initial: &[f64]) -> Result<ConvergenceReport, SimError> {
    let times: Vec<f64> = snapshots.iter().map(|s| s.time).collect();
    let errors = error_series(snapshots, initial);
    let rate = convergence_rate(&times, &errors)?;
    Ok(ConvergenceReport::new(errors, rate))
}

/// Per-node diagnostic: each node's trajectory dispersion normalized by its
/// own initial value,
/// `sqrt(sum_t (v_i(t) - mean_t(v_i))^2) / |v_i(0)|`.
///
/// Not used for the scalar rate; it highlights nodes whose opinion wandered
/// far relative to where they started.
pub fn individual_errors(snapshots: &[ValueSnapshot], initial: &[f64]) -> Vec<f64> {
    let steps = snapshots.len();
    if steps == 0 {
        return vec![0.0; initial.len()];
    }
    initial
        .iter()
        .enumerate()
        .map(|(node, &v0)| {
            let mean = snapshots.iter().map(|s| s.values[node]).sum::<f64>() / steps as f64;
            let dispersion = snapshots
                .iter()
                .map(|s| {
                    let d = s.values[node] - mean;
                    d * d
                })
                .sum::<f64>()
                .sqrt();
            dispersion / v0.abs().max(ERROR_FLOOR)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sim_events::fixtures;

    #[test]
    fn test_error_of_uniform_values_is_zero() {
        let err = normalized_error(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]);
        assert_eq!(err, 0.0);
    }

    #[test]
    fn test_error_matches_hand_computation() {
        // values [0, 2], mean 1, disagreement sqrt(2); initial norm sqrt(5).
        let err = normalized_error(&[0.0, 2.0], &[1.0, 2.0]);
        assert_relative_eq!(err, (2.0f64).sqrt() / (5.0f64).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_all_zero_initial_values_do_not_divide_by_zero() {
        let err = normalized_error(&[0.0, 0.0], &[0.0, 0.0]);
        assert!(err.is_finite());
        assert_eq!(err, 0.0);
    }

    #[test]
    fn test_fit_recovers_a_known_decay() {
        // err(t) = exp(-0.5 t): slope -0.5 exactly, on any window.
        let times: Vec<f64> = (0..20).map(|t| t as f64).collect();
        let errors: Vec<f64> = times.iter().map(|t| (-0.5 * t).exp()).collect();

        let (slope, intercept) = log_linear_fit(&times, &errors).unwrap();
        assert_relative_eq!(slope, -0.5, epsilon = 1e-9);
        assert_relative_eq!(intercept, 0.0, epsilon = 1e-6);

        let rate = convergence_rate(&times, &errors).unwrap();
        assert_relative_eq!(rate, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_fit_uses_only_the_trailing_half() {
        // Flat transient for the first half, clean decay afterwards: the fit
        // must see only the decay.
        let times: Vec<f64> = (0..20).map(|t| t as f64).collect();
        let errors: Vec<f64> = times
            .iter()
            .map(|&t| if t < 10.0 { 1.0 } else { (-(t - 10.0)).exp() })
            .collect();

        let rate = convergence_rate(&times, &errors).unwrap();
        assert_relative_eq!(rate, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_exact_zero_errors_are_floored_not_propagated() {
        let times: Vec<f64> = (0..8).map(|t| t as f64).collect();
        let errors = vec![1.0, 0.5, 0.25, 0.125, 0.0, 0.0, 0.0, 0.0];

        let rate = convergence_rate(&times, &errors).unwrap();
        assert!(rate.is_finite());
        assert!(rate >= 0.0);
    }

    #[test]
    fn test_too_few_snapshots_is_an_error() {
        assert!(matches!(
            convergence_rate(&[0.0, 1.0], &[1.0, 0.5]),
            Err(SimError::TooFewSnapshots(1))
        ));
        assert!(matches!(
            convergence_rate(&[], &[]),
            Err(SimError::TooFewSnapshots(0))
        ));
    }

    #[test]
    fn test_mismatched_series_is_an_error() {
        assert!(matches!(
            convergence_rate(&[0.0, 1.0, 2.0], &[1.0, 0.5]),
            Err(SimError::SeriesLengthMismatch { times: 3, errors: 2 })
        ));
    }

    #[test]
    fn test_measure_on_halving_fixture() {
        let snapshots = fixtures::decaying_snapshots();
        let initial = snapshots[0].values.clone();
        let report = measure(&snapshots, &initial).unwrap();

        assert_eq!(report.error_series.len(), snapshots.len());
        // Disagreement halves per unit time: rate = ln 2.
        assert_relative_eq!(report.convergence_rate, 2.0f64.ln(), epsilon = 1e-9);
        assert!(report
            .error_series
            .windows(2)
            .all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_individual_errors_shape_and_stability() {
        let snapshots = fixtures::decaying_snapshots();
        let initial = snapshots[0].values.clone();
        let indiv = individual_errors(&snapshots, &initial);

        assert_eq!(indiv.len(), 2);
        // Node 0 starts at 0.0; the floor keeps its diagnostic finite.
        assert!(indiv.iter().all(|e| e.is_finite()));
    }
}
