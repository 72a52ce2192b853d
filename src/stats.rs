//! Shared statistical helpers for the predictive routines.
//!
//! Kept deliberately small: the predictive model needs only a mean, a
//! population standard deviation, and a degree-1 least-squares fit. All
//! helpers are total over their inputs — degenerate cases (empty slices,
//! zero-variance x values) resolve to the neutral result rather than
//! dividing by zero.

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation. Returns 0.0 for fewer than two values.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// A fitted degree-1 polynomial `y = slope * x + intercept`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearFit {
    /// Slope of the fitted line.
    pub slope: f64,
    /// Intercept of the fitted line.
    pub intercept: f64,
}

impl LinearFit {
    /// Evaluate the fitted line at `x`.
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Degree-1 least-squares fit of `ys` against `xs`.
///
/// When the fit is degenerate — fewer than two points, mismatched lengths,
/// or zero variance in `xs` — the result is a flat line through the mean of
/// `ys` (slope 0.0).
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> LinearFit {
    if xs.len() != ys.len() || xs.len() < 2 {
        return LinearFit {
            slope: 0.0,
            intercept: mean(ys),
        };
    }

    let mean_x = mean(xs);
    let mean_y = mean(ys);
    let denom: f64 = xs.iter().map(|x| (x - mean_x) * (x - mean_x)).sum();
    if denom.abs() < f64::EPSILON {
        return LinearFit {
            slope: 0.0,
            intercept: mean_y,
        };
    }

    let numer: f64 = xs
        .iter()
        .zip(ys.iter())
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();
    let slope = numer / denom;
    LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty_and_simple() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
    }

    #[test]
    fn test_std_dev_population() {
        // Population std of [1000, 1050, 1100]: mean 1050, variance 5000/3
        let sd = std_dev(&[1000.0, 1050.0, 1100.0]);
        assert!((sd - (5000.0_f64 / 3.0).sqrt()).abs() < 1e-9, "sd={}", sd);
    }

    #[test]
    fn test_std_dev_degenerate() {
        assert_eq!(std_dev(&[]), 0.0);
        assert_eq!(std_dev(&[4.2]), 0.0);
        assert_eq!(std_dev(&[2.0, 2.0, 2.0]), 0.0);
    }

    #[test]
    fn test_linear_fit_exact_line() {
        // y = 0.5x + 1
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [1.0, 1.5, 2.0, 2.5];
        let fit = linear_fit(&xs, &ys);
        assert!((fit.slope - 0.5).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!((fit.at(4.0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_linear_fit_flat_series() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.5, 0.5, 0.5];
        let fit = linear_fit(&xs, &ys);
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 0.5);
    }

    #[test]
    fn test_linear_fit_degenerate_inputs() {
        // Zero variance in x: flat line through the y mean
        let fit = linear_fit(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]);
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 2.0);

        // Too few points
        let fit = linear_fit(&[1.0], &[0.7]);
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 0.7);
    }
}
