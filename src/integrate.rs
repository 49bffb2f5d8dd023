//! Definite integration by the composite trapezoidal rule.
//!
//! Used wherever the catalog has no closed-form CDF: the Gamma CDF
//! integrates its own density, the F-distribution CDF integrates its
//! density after a change of variable.
//!
//! # Accuracy
//!
//! The trapezoidal rule has O(h²) error for twice-differentiable
//! integrands. Near an integrable singularity (a Gamma density with shape
//! < 1 as x → 0) the estimate degrades, and an infinite endpoint value
//! makes the whole result infinite. Callers that integrate such densities
//! accept the degraded precision; nothing here compensates for it.

/// Subinterval count used by the Gamma CDF series.
pub const DEFAULT_SUBINTERVALS: usize = 100;

/// Subinterval count used by the F-distribution CDF.
pub const FINE_SUBINTERVALS: usize = 200;

/// Composite trapezoidal rule over `n` equal subintervals of `[a, b]`.
///
/// ```text
/// ∫ₐᵇ f ≈ h·(f(a)/2 + f(a+h) + … + f(b−h) + f(b)/2),  h = (b − a)/n
/// ```
///
/// # Returns
/// - `0.0` when `a == b` or `n == 0`.
/// - A negative value when `b < a` (orientation is respected).
/// - Whatever non-finite value `f` produced, propagated through the sum.
///
/// # Complexity
/// Time: O(n) evaluations of `f`, Space: O(1)
///
/// # Examples
/// ```
/// use u_statlab::integrate::trapezoid;
/// // ∫₀¹ x dx = 1/2, exact for linear integrands
/// let v = trapezoid(|x| x, 0.0, 1.0, 10);
/// assert!((v - 0.5).abs() < 1e-12);
/// ```
pub fn trapezoid<F>(f: F, a: f64, b: f64, n: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    if n == 0 || a == b {
        return 0.0;
    }
    let h = (b - a) / n as f64;
    let mut sum = 0.5 * (f(a) + f(b));
    for i in 1..n {
        sum += f(a + i as f64 * h);
    }
    sum * h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_is_exact() {
        let v = trapezoid(|x| 3.0 * x + 1.0, -2.0, 4.0, 7);
        // [1.5x² + x] from -2 to 4 = (24 + 4) - (6 - 2) = 24
        assert!((v - 24.0).abs() < 1e-10);
    }

    #[test]
    fn test_quadratic_converges() {
        let coarse = (trapezoid(|x| x * x, 0.0, 1.0, 10) - 1.0 / 3.0).abs();
        let fine = (trapezoid(|x| x * x, 0.0, 1.0, 100) - 1.0 / 3.0).abs();
        assert!(fine < coarse);
        // Error of the rule for x² is exactly h²/6
        assert!((fine - 1e-4 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_sine_half_period() {
        let v = trapezoid(f64::sin, 0.0, std::f64::consts::PI, DEFAULT_SUBINTERVALS);
        assert!((v - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_reversed_bounds_negate() {
        let forward = trapezoid(f64::exp, 0.0, 1.0, 50);
        let backward = trapezoid(f64::exp, 1.0, 0.0, 50);
        assert!((forward + backward).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(trapezoid(|x| x, 1.0, 1.0, 10), 0.0);
        assert_eq!(trapezoid(|x| x, 0.0, 1.0, 0), 0.0);
    }

    #[test]
    fn test_singular_endpoint_propagates() {
        let v = trapezoid(|x| x.powf(-0.5), 0.0, 1.0, 10);
        assert!(v.is_infinite());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn additive_over_adjacent_intervals(
            a in -5.0_f64..0.0,
            width in 0.5_f64..5.0,
        ) {
            // Halving the interval and doubling n reproduces the same grid.
            let b = a + width;
            let mid = a + width / 2.0;
            let whole = trapezoid(f64::cos, a, b, 40);
            let parts = trapezoid(f64::cos, a, mid, 20) + trapezoid(f64::cos, mid, b, 20);
            prop_assert!((whole - parts).abs() < 1e-10);
        }

        #[test]
        fn non_negative_integrand_gives_non_negative_integral(
            a in -3.0_f64..3.0,
            width in 0.0_f64..4.0,
            n in 1_usize..300,
        ) {
            let v = trapezoid(|x| (-x * x).exp(), a, a + width, n);
            prop_assert!(v >= 0.0);
        }
    }
}
