//! Numerical inversion of monotone CDFs, and the F distribution built on it.
//!
//! The solver brackets the target by doubling an upper bound, then runs a
//! fixed number of bisection steps. Every loop is capped, so a
//! pathological CDF costs at most `log2(max_upper / initial_upper)` + `iterations`
//! evaluations.

use crate::integrate::{self, FINE_SUBINTERVALS};
use crate::special;

/// Significance level used for the F-distribution critical value.
pub const F_SIGNIFICANCE: f64 = 0.05;

/// Bisection solver settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// First upper bound tried before doubling.
    pub initial_upper: f64,
    /// Doubling stops once the upper bound exceeds this value.
    pub max_upper: f64,
    /// Fixed number of bisection steps.
    pub iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_upper: 20.0,
            max_upper: 1e6,
            iterations: 50,
        }
    }
}

impl SolverConfig {
    pub fn with_initial_upper(mut self, initial_upper: f64) -> Self {
        self.initial_upper = initial_upper;
        self
    }

    pub fn with_max_upper(mut self, max_upper: f64) -> Self {
        self.max_upper = max_upper;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }
}

/// Inverts a non-decreasing CDF supported on `[0, ∞)`.
///
/// # Algorithm
/// 1. Start with `upper = initial_upper`; while `cdf(upper) < p`, move
///    `lower` up to `upper` and double `upper`, stopping once it exceeds
///    `max_upper`.
/// 2. Bisect `[lower, upper]` for `iterations` steps, keeping
///    `cdf(lower) < p ≤ cdf(upper)`.
///
/// # Returns
/// - `0.0` for `p ≤ 0`, `+∞` for `p ≥ 1`, `NaN` for NaN `p`.
/// - `NaN` if any CDF evaluation is not finite.
/// - Otherwise the upper end of the final bracket. When the doubling cap
///   is hit the bracket may not contain the target; the capped bound is
///   returned as the best available answer.
///
/// # Examples
/// ```
/// use u_statlab::quantile::{bisection_quantile, SolverConfig};
/// // Exponential(1): F(x) = 1 − e^{−x}, median = ln 2
/// let median = bisection_quantile(|x| 1.0 - (-x).exp(), 0.5, &SolverConfig::default());
/// assert!((median - std::f64::consts::LN_2).abs() < 1e-9);
/// ```
pub fn bisection_quantile<F>(cdf: F, p: f64, config: &SolverConfig) -> f64
where
    F: Fn(f64) -> f64,
{
    if p.is_nan() {
        return f64::NAN;
    }
    if p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    let mut lower = 0.0;
    let mut upper = config.initial_upper;
    loop {
        let c = cdf(upper);
        if !c.is_finite() {
            trace_warn!(upper, "CDF evaluation failed while bracketing");
            return f64::NAN;
        }
        if c >= p {
            break;
        }
        lower = upper;
        upper *= 2.0;
        if upper > config.max_upper {
            trace_warn!(upper, p, "quantile bracket hit the doubling cap");
            break;
        }
    }

    for _ in 0..config.iterations {
        let mid = 0.5 * (lower + upper);
        let c = cdf(mid);
        if !c.is_finite() {
            trace_warn!(mid, "CDF evaluation failed during bisection");
            return f64::NAN;
        }
        if c < p {
            lower = mid;
        } else {
            upper = mid;
        }
    }
    upper
}

// ============================================================================
// F Distribution
// ============================================================================

fn valid_degrees(d1: f64, d2: f64) -> bool {
    d1.is_finite() && d2.is_finite() && d1 > 0.0 && d2 > 0.0
}

/// PDF of the F-distribution with `d1`, `d2` degrees of freedom.
///
/// ```text
/// f(x) = (d1·x/(d1·x + d2))^{d1/2} · (d2/(d1·x + d2))^{d2/2} / (x · B(d1/2, d2/2))
/// ```
///
/// Returns `0.0` for `x ≤ 0` or non-positive degrees of freedom.
pub fn f_distribution_pdf(x: f64, d1: f64, d2: f64) -> f64 {
    if x <= 0.0 || !valid_degrees(d1, d2) {
        return 0.0;
    }
    let denom = d1 * x + d2;
    let term1 = (d1 * x / denom).powf(d1 / 2.0);
    let term2 = (d2 / denom).powf(d2 / 2.0);
    term1 * term2 / (x * special::beta(d1 / 2.0, d2 / 2.0))
}

/// The F density after substituting `x = u²`, i.e. `2u·f(u²)`.
///
/// Written in closed form so the `u → 0` end stays finite for `d1 ≥ 1`:
/// ```text
/// g(u) = 2·d1^{d1/2}·d2^{d2/2}·u^{d1−1}·(d1·u² + d2)^{−(d1+d2)/2} / B(d1/2, d2/2)
/// ```
fn f_substituted_density(u: f64, d1: f64, d2: f64, beta: f64) -> f64 {
    let half1 = d1 / 2.0;
    let half2 = d2 / 2.0;
    let log_scale = half1 * d1.ln() + half2 * d2.ln() - (half1 + half2) * (d1 * u * u + d2).ln();
    2.0 * u.powf(d1 - 1.0) * log_scale.exp() / beta
}

/// CDF of the F-distribution by trapezoidal integration.
///
/// Integrates `2u·f(u²)` over `[0, √x]` with 200 subintervals; the
/// substitution removes the `x^{d1/2 − 1}` blow-up of the density at the
/// origin. For `d1 < 1` the substituted integrand is still singular at 0
/// and the result is not finite.
///
/// # Returns
/// - `0.0` for `x ≤ 0`.
/// - `NaN` for non-positive or non-finite degrees of freedom.
///
/// # Examples
/// ```
/// use u_statlab::quantile::f_distribution_cdf;
/// // F(1; 10, 10) = 0.5 by symmetry
/// assert!((f_distribution_cdf(1.0, 10.0, 10.0) - 0.5).abs() < 1e-3);
/// ```
pub fn f_distribution_cdf(x: f64, d1: f64, d2: f64) -> f64 {
    if !valid_degrees(d1, d2) || x.is_nan() {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 0.0;
    }
    let beta = special::beta(d1 / 2.0, d2 / 2.0);
    integrate::trapezoid(
        |u| f_substituted_density(u, d1, d2, beta),
        0.0,
        x.sqrt(),
        FINE_SUBINTERVALS,
    )
}

/// Quantile of the F-distribution via [`bisection_quantile`] with the
/// default solver settings.
///
/// # Returns
/// - `0.0` for `p ≤ 0`, `+∞` for `p ≥ 1`.
/// - `NaN` for invalid degrees of freedom or when the CDF fails.
///
/// # Examples
/// ```
/// use u_statlab::quantile::f_distribution_quantile;
/// // Tabulated F(0.95; 5, 20) ≈ 2.711
/// let q = f_distribution_quantile(0.95, 5.0, 20.0);
/// assert!((q - 2.711).abs() < 0.02);
/// ```
pub fn f_distribution_quantile(p: f64, d1: f64, d2: f64) -> f64 {
    f_distribution_quantile_with(p, d1, d2, &SolverConfig::default())
}

/// [`f_distribution_quantile`] with explicit solver settings.
pub fn f_distribution_quantile_with(p: f64, d1: f64, d2: f64, config: &SolverConfig) -> f64 {
    if !valid_degrees(d1, d2) {
        return f64::NAN;
    }
    bisection_quantile(|x| f_distribution_cdf(x, d1, d2), p, config)
}

/// One point of an F-density chart.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FDensityPoint {
    pub x: f64,
    pub density: f64,
    /// `x` lies at or beyond the upper-tail critical value.
    pub in_rejection_region: bool,
}

/// Density series and 5% critical value for an F test.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FTestSeries {
    pub critical_value: f64,
    pub points: Vec<FDensityPoint>,
}

/// Builds the density curve for an F test with an observed statistic.
///
/// The window is `(0, max(5, 1.5·critical, 1.2·observed)]` in 100 steps.
/// Invalid degrees of freedom give a `NaN` critical value and no points.
pub fn f_distribution_series(d1: f64, d2: f64, observed: f64) -> FTestSeries {
    if !valid_degrees(d1, d2) {
        return FTestSeries {
            critical_value: f64::NAN,
            points: Vec::new(),
        };
    }
    let critical_value = f_distribution_quantile(1.0 - F_SIGNIFICANCE, d1, d2);
    let critical_span = if critical_value.is_finite() {
        critical_value * 1.5
    } else {
        0.0
    };
    let observed_span = if observed.is_finite() {
        observed * 1.2
    } else {
        0.0
    };
    let max_x = 5.0_f64.max(critical_span).max(observed_span);
    let step = max_x / 100.0;

    let points = (1..=100)
        .map(|i| i as f64 * step)
        .filter_map(|x| {
            let density = f_distribution_pdf(x, d1, d2);
            density.is_finite().then_some(FDensityPoint {
                x,
                density,
                in_rejection_region: x >= critical_value,
            })
        })
        .collect();

    FTestSeries {
        critical_value,
        points,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn bisection_inverts_scaled_exponential(scale in 0.1_f64..200.0, p in 0.01_f64..0.99) {
            let cdf = |x: f64| 1.0 - (-x / scale).exp();
            let q = bisection_quantile(cdf, p, &SolverConfig::default());
            prop_assert!((cdf(q) - p).abs() < 1e-9, "scale={scale}, p={p}, q={q}");
        }

        #[test]
        fn f_cdf_in_unit_interval(x in 0.01_f64..30.0, d1 in 1.0_f64..30.0, d2 in 2.0_f64..60.0) {
            let c = f_distribution_cdf(x, d1, d2);
            prop_assert!(c > -1e-9 && c < 1.0 + 1e-3, "F({x}; {d1}, {d2}) = {c}");
        }
    }
}
