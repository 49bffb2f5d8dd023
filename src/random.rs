//! Random number generation and per-family variate algorithms.
//!
//! Every generator takes the RNG by `&mut R` so callers decide the source:
//! a seeded [`create_rng`] for reproducible runs, anything implementing
//! [`Rng`] otherwise.
//!
//! # Algorithms
//!
//! | Family | Method |
//! |---|---|
//! | Binomial | `n` Bernoulli trials |
//! | Geometric | inversion, `⌊ln(1−U)/ln(1−p)⌋ + 1` |
//! | Negative binomial | Bernoulli trials until the `r`-th success |
//! | Poisson | Knuth's multiplication method |
//! | Gaussian | Box–Muller |
//! | Gamma | Marsaglia–Tsang squeeze, boosted for shape < 1 |
//! | GEV, GP | inversion of the closed-form CDF |
//!
//! # Reproducibility
//!
//! For reproducible experiments, use [`create_rng`] with a fixed seed.
//! The underlying algorithm (SmallRng) is deterministic for a given seed
//! on the same platform.

use rand::Rng;

use crate::distributions::SHAPE_EPSILON;

/// Creates a fast, seeded random number generator.
///
/// Uses `SmallRng` (Xoshiro256++) for high performance.
/// The sequence is deterministic for a given seed on the same platform.
///
/// # Examples
/// ```
/// use u_statlab::random::create_rng;
/// use rand::Rng;
/// let mut rng = create_rng(42);
/// let x: f64 = rng.random();
/// assert!(x >= 0.0 && x < 1.0);
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// Uniform draw on the open interval (0, 1).
///
/// `rng.random::<f64>()` can return exactly 0, which sends `ln U` to
/// `−∞`; zero draws are rejected and redrawn.
pub fn open_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let u: f64 = rng.random();
        if u > 0.0 {
            return u;
        }
    }
}

// ============================================================================
// Discrete families
// ============================================================================

/// Number of successes in `n` Bernoulli(`p`) trials.
///
/// # Complexity
/// Time: O(n)
pub fn binomial<R: Rng + ?Sized>(n: u64, p: f64, rng: &mut R) -> u64 {
    (0..n).filter(|_| rng.random::<f64>() < p).count() as u64
}

/// Trials up to and including the first success, support `{1, 2, …}`.
///
/// # Algorithm
/// Inversion: `⌊ln(1−U) / ln(1−p)⌋ + 1` with `U ∈ [0, 1)`.
pub fn geometric<R: Rng + ?Sized>(p: f64, rng: &mut R) -> u64 {
    let u: f64 = rng.random();
    let k = ((1.0 - u).ln() / (1.0 - p).ln()).floor();
    // ln(1) / ln(1−p) is −0.0
    k.max(0.0) as u64 + 1
}

/// Trials up to and including the `r`-th success, support `{r, r+1, …}`.
///
/// # Algorithm
/// Runs Bernoulli(`p`) trials until `r` successes have been seen and
/// counts them.
///
/// # Complexity
/// Time: O(r/p) expected
pub fn negative_binomial<R: Rng + ?Sized>(r: u64, p: f64, rng: &mut R) -> u64 {
    let mut trials = 0_u64;
    let mut successes = 0_u64;
    while successes < r {
        trials += 1;
        if rng.random::<f64>() < p {
            successes += 1;
        }
    }
    trials
}

/// Poisson(`lambda`) variate.
///
/// # Algorithm
/// Knuth's method: multiply uniforms until the product falls to
/// `e^{−λ}`. Expected cost is `λ + 1` uniforms per draw.
///
/// Reference: Knuth (1997), *TAOCP* Vol. 2, §3.4.1.
///
/// # Accuracy
/// For `λ` above roughly 700, `e^{−λ}` underflows to 0 and draws are
/// truncated near that value; the draw stays finite.
pub fn poisson<R: Rng + ?Sized>(lambda: f64, rng: &mut R) -> u64 {
    let limit = (-lambda).exp();
    let mut k = 0_u64;
    let mut product: f64 = rng.random();
    while product > limit {
        k += 1;
        product *= rng.random::<f64>();
    }
    k
}

// ============================================================================
// Continuous families
// ============================================================================

/// Standard normal deviate by the Box–Muller transform.
///
/// Only the cosine branch is used; the paired sine deviate is discarded
/// so every call consumes exactly two uniforms.
///
/// Reference: Box & Muller (1958), *Annals of Mathematical Statistics* 29(2).
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1 = open_unit(rng);
    let u2 = open_unit(rng);
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Gaussian(`mu`, `sigma`) variate.
pub fn gaussian<R: Rng + ?Sized>(mu: f64, sigma: f64, rng: &mut R) -> f64 {
    mu + sigma * standard_normal(rng)
}

/// Gamma variate with shape `alpha` and scale `beta`.
///
/// # Algorithm
/// Marsaglia–Tsang: with `d = α − 1/3`, `c = 1/√(9d)`, draw a normal `x`
/// until `v = (1 + cx)³ > 0` passes the squeeze `U < 1 − 0.0331x⁴` or the
/// full test `ln U < x²/2 + d(1 − v + ln v)`, then return `d·v·β`.
/// For `α < 1` a Gamma(`α + 1`) draw is scaled by `U^{1/α}`.
///
/// Reference: Marsaglia & Tsang (2000), "A Simple Method for Generating
/// Gamma Variables", *ACM TOMS* 26(3).
pub fn gamma<R: Rng + ?Sized>(alpha: f64, beta: f64, rng: &mut R) -> f64 {
    if alpha < 1.0 {
        let boost = open_unit(rng).powf(1.0 / alpha);
        return gamma(alpha + 1.0, beta, rng) * boost;
    }
    let d = alpha - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();
    loop {
        let x = standard_normal(rng);
        let v = 1.0 + c * x;
        if v <= 0.0 {
            continue;
        }
        let v = v * v * v;
        let u = open_unit(rng);
        let x2 = x * x;
        if u < 1.0 - 0.0331 * x2 * x2 || u.ln() < 0.5 * x2 + d * (1.0 - v + v.ln()) {
            return d * v * beta;
        }
    }
}

/// GEV(`xi`, `mu`, `sigma`) variate by inversion of the CDF.
pub fn gev<R: Rng + ?Sized>(xi: f64, mu: f64, sigma: f64, rng: &mut R) -> f64 {
    gev_quantile(open_unit(rng), xi, mu, sigma)
}

/// Generalized Pareto(`xi`, `sigma`) variate by inversion of the CDF.
pub fn generalized_pareto<R: Rng + ?Sized>(xi: f64, sigma: f64, rng: &mut R) -> f64 {
    let u: f64 = rng.random();
    gp_quantile(u, xi, sigma)
}

// ============================================================================
// Inverse CDFs
// ============================================================================

/// GEV quantile `μ + σ((−ln u)^{−ξ} − 1)/ξ`, Gumbel for `|ξ| < 1e-6`.
///
/// # Examples
/// ```
/// use u_statlab::random::{gev_quantile, gumbel_quantile};
/// let q = gev_quantile(0.3, 0.0, 1.0, 2.0);
/// assert_eq!(q, gumbel_quantile(0.3, 1.0, 2.0));
/// ```
pub fn gev_quantile(u: f64, xi: f64, mu: f64, sigma: f64) -> f64 {
    if xi.abs() < SHAPE_EPSILON {
        return gumbel_quantile(u, mu, sigma);
    }
    mu + sigma * ((-u.ln()).powf(-xi) - 1.0) / xi
}

/// Gumbel quantile `μ − σ ln(−ln u)`.
pub fn gumbel_quantile(u: f64, mu: f64, sigma: f64) -> f64 {
    mu - sigma * (-u.ln()).ln()
}

/// Generalized Pareto quantile `σ((1−u)^{−ξ} − 1)/ξ`, Exponential for
/// `|ξ| < 1e-6`.
pub fn gp_quantile(u: f64, xi: f64, sigma: f64) -> f64 {
    if xi.abs() < SHAPE_EPSILON {
        return exponential_quantile(u, sigma);
    }
    sigma * ((1.0 - u).powf(-xi) - 1.0) / xi
}

/// Exponential quantile `−σ ln(1−u)` with scale `sigma`.
pub fn exponential_quantile(u: f64, sigma: f64) -> f64 {
    -sigma * (1.0 - u).ln()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats;
    use approx::assert_abs_diff_eq;

    fn draws<F: FnMut() -> f64>(n: usize, mut f: F) -> Vec<f64> {
        (0..n).map(|_| f()).collect()
    }

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(42);
        let mut rng2 = create_rng(42);
        let vals1: Vec<f64> = (0..10).map(|_| gaussian(0.0, 1.0, &mut rng1)).collect();
        let vals2: Vec<f64> = (0..10).map(|_| gaussian(0.0, 1.0, &mut rng2)).collect();
        assert_eq!(vals1, vals2);
    }

    #[test]
    fn test_open_unit_range() {
        let mut rng = create_rng(3);
        for _ in 0..1000 {
            let u = open_unit(&mut rng);
            assert!(u > 0.0 && u < 1.0);
        }
    }

    #[test]
    fn test_binomial_bounds_and_mean() {
        let mut rng = create_rng(11);
        let v = draws(5000, || binomial(20, 0.3, &mut rng) as f64);
        assert!(v.iter().all(|&k| (0.0..=20.0).contains(&k)));
        let m = stats::mean(&v).unwrap();
        assert!((m - 6.0).abs() < 0.2, "mean {m}");
    }

    #[test]
    fn test_geometric_mean() {
        let mut rng = create_rng(12);
        let v = draws(10_000, || geometric(0.25, &mut rng) as f64);
        assert!(v.iter().all(|&k| k >= 1.0));
        let m = stats::mean(&v).unwrap();
        assert!((m - 4.0).abs() < 0.2, "mean {m}");
    }

    #[test]
    fn test_negative_binomial_support_and_mean() {
        let mut rng = create_rng(13);
        let v = draws(5000, || negative_binomial(3, 0.5, &mut rng) as f64);
        assert!(v.iter().all(|&k| k >= 3.0));
        let m = stats::mean(&v).unwrap();
        assert!((m - 6.0).abs() < 0.3, "mean {m}");
    }

    #[test]
    fn test_negative_binomial_variance() {
        // r(1−p)/p² = 2·0.7/0.09
        let mut rng = create_rng(31);
        let v = draws(10_000, || negative_binomial(2, 0.3, &mut rng) as f64);
        let var = stats::variance(&v).unwrap();
        assert!((var - 1.4 / 0.09).abs() < 1.5, "variance {var}");
        assert_eq!(negative_binomial(0, 0.3, &mut rng), 0);
    }

    #[test]
    fn test_poisson_moments() {
        let mut rng = create_rng(14);
        let v = draws(10_000, || poisson(4.0, &mut rng) as f64);
        let m = stats::mean(&v).unwrap();
        let var = stats::variance(&v).unwrap();
        assert!((m - 4.0).abs() < 0.15, "mean {m}");
        assert!((var - 4.0).abs() < 0.4, "variance {var}");
    }

    #[test]
    fn test_gaussian_mean_within_three_standard_errors() {
        let mut rng = create_rng(15);
        let (mu, sigma) = (2.0, 3.0);
        let v = draws(10_000, || gaussian(mu, sigma, &mut rng));
        let m = stats::mean(&v).unwrap();
        assert!((m - mu).abs() < 3.0 * sigma / 100.0, "mean {m}");
        let sd = stats::std_dev(&v).unwrap();
        assert!((sd - sigma).abs() < 0.1, "sd {sd}");
    }

    #[test]
    fn test_gamma_moments() {
        let mut rng = create_rng(16);
        let v = draws(5000, || gamma(2.0, 2.0, &mut rng));
        assert!(v.iter().all(|&x| x > 0.0));
        let m = stats::mean(&v).unwrap();
        let var = stats::variance(&v).unwrap();
        assert!((m - 4.0).abs() < 0.4, "mean {m}");
        assert!((var - 8.0).abs() < 1.6, "variance {var}");
    }

    #[test]
    fn test_gamma_small_shape_mean() {
        let mut rng = create_rng(17);
        let v = draws(10_000, || gamma(0.5, 1.0, &mut rng));
        assert!(v.iter().all(|&x| x >= 0.0 && x.is_finite()));
        let m = stats::mean(&v).unwrap();
        assert!((m - 0.5).abs() < 0.05, "mean {m}");
    }

    #[test]
    fn test_gev_limit_matches_gumbel() {
        for &u in &[0.01, 0.2, 0.5, 0.9, 0.999] {
            let exact = gumbel_quantile(u, 1.0, 2.0);
            assert_abs_diff_eq!(gev_quantile(u, 2e-6, 1.0, 2.0), exact, epsilon = 1e-3);
            assert_abs_diff_eq!(gev_quantile(u, 0.0, 1.0, 2.0), exact, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_gp_limit_matches_exponential() {
        for &u in &[0.0, 0.2, 0.5, 0.9, 0.999] {
            let exact = exponential_quantile(u, 1.5);
            assert_abs_diff_eq!(gp_quantile(u, 2e-6, 1.5), exact, epsilon = 1e-3);
            assert_eq!(gp_quantile(u, 5e-7, 1.5), exact);
        }
    }

    #[test]
    fn test_quantiles_invert_cdfs() {
        use crate::Distribution;
        let gev = Distribution::Gev {
            xi: 0.2,
            mu: 0.5,
            sigma: 1.5,
        };
        let gp = Distribution::GeneralizedPareto { xi: -0.3, sigma: 2.0 };
        for &u in &[0.05, 0.25, 0.5, 0.75, 0.95] {
            assert_abs_diff_eq!(gev.cdf(gev_quantile(u, 0.2, 0.5, 1.5)), u, epsilon = 1e-10);
            assert_abs_diff_eq!(gp.cdf(gp_quantile(u, -0.3, 2.0)), u, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_gp_bounded_draws() {
        let mut rng = create_rng(18);
        for _ in 0..1000 {
            let x = generalized_pareto(-0.5, 1.0, &mut rng);
            assert!((0.0..=2.0).contains(&x));
        }
    }
}
