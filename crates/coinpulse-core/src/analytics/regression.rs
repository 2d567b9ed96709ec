//! Ordinary-least-squares line fit over `(unix_time, price)` pairs.

/// Degenerate-denominator guard: below this the time axis has no variance
/// and a slope cannot be fitted.
const DENOM_EPSILON: f64 = 1e-20;

/// Closed-form OLS fit `y = slope * x + intercept`.
///
/// `rse` is the residual standard error with `max(n - 2, 1)` degrees of
/// freedom. `mean_x` and `sxx` feed the prediction-interval leverage term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub rse: f64,
    pub n: usize,
    pub mean_x: f64,
    pub sxx: f64,
}

/// Fit a line through the paired observations.
///
/// With fewer than two points, or when all x coincide, the slope is `0`
/// and the intercept falls back to `mean(y)`; this is a defined result,
/// not an error. Callers enforce their own minimum sample counts.
pub fn fit(xs: &[f64], ys: &[f64]) -> LinearFit {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return LinearFit {
            slope: 0.0,
            intercept: 0.0,
            rse: 0.0,
            n: 0,
            mean_x: 0.0,
            sxx: 0.0,
        };
    }

    let n_f = n as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    for i in 0..n {
        sum_x += xs[i];
        sum_y += ys[i];
        sum_xy += xs[i] * ys[i];
        sum_xx += xs[i] * xs[i];
    }

    let mean_x = sum_x / n_f;
    let mut sxx = 0.0;
    for &x in &xs[..n] {
        let dx = x - mean_x;
        sxx += dx * dx;
    }

    let denom = n_f * sum_xx - sum_x * sum_x;
    if n < 2 || denom.abs() < DENOM_EPSILON {
        return LinearFit {
            slope: 0.0,
            intercept: sum_y / n_f,
            rse: 0.0,
            n,
            mean_x,
            sxx,
        };
    }

    let slope = (n_f * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n_f;

    let mut sse = 0.0;
    for i in 0..n {
        let fitted = intercept + slope * xs[i];
        let residual = ys[i] - fitted;
        sse += residual * residual;
    }
    let df = (n_f - 2.0).max(1.0);
    let rse = (sse / df).sqrt();

    LinearFit {
        slope,
        intercept,
        rse,
        n,
        mean_x,
        sxx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_line() {
        let xs: Vec<f64> = (0..12).map(|i| 1_000.0 + 60.0 * i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 100.0 + 0.5 * x).collect();
        let fitted = fit(&xs, &ys);
        assert!((fitted.slope - 0.5).abs() < 1e-9);
        assert!((fitted.intercept - 100.0).abs() < 1e-6);
        assert!(fitted.rse < 1e-6);
    }

    #[test]
    fn coincident_x_yields_flat_fit() {
        let xs = vec![500.0; 5];
        let ys = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let fitted = fit(&xs, &ys);
        assert_eq!(fitted.slope, 0.0);
        assert!((fitted.intercept - 3.0).abs() < 1e-12);
        assert_eq!(fitted.rse, 0.0);
    }

    #[test]
    fn noisy_fit_has_positive_residual_error() {
        let xs = vec![0.0, 10.0, 20.0, 30.0];
        let ys = vec![0.0, 12.0, 18.0, 33.0];
        let fitted = fit(&xs, &ys);
        assert!(fitted.slope > 0.9 && fitted.slope < 1.2);
        assert!(fitted.rse > 0.0);
    }
}
