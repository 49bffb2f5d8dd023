//! The eight parametric families.
//!
//! [`Distribution`] is a closed enum: every variant carries its raw
//! parameter values and answers the same capability set: pointwise
//! density/mass and CDF, analytical moments, chart series, and a single
//! variate draw.
//!
//! # Supported Distributions
//!
//! | Distribution | Parameters | Support | Mean |
//! |---|---|---|---|
//! | Binomial | n, p | {0, …, n} | np |
//! | Geometric | p | {1, 2, …} | 1/p |
//! | Negative binomial | r, p | {r, r+1, …} | r/p |
//! | Poisson | λ | {0, 1, …} | λ |
//! | Gaussian | μ, σ | ℝ | μ |
//! | Gamma | α (shape), β (scale) | (0, ∞) | αβ |
//! | GEV | ξ, μ, σ | depends on ξ | μ + σ(Γ(1−ξ)−1)/ξ |
//! | Generalized Pareto | ξ, σ | [0, ∞) or [0, −σ/ξ] | σ/(1−ξ) |
//!
//! # Invalid parameters
//!
//! Values are stored unvalidated because a slider can pass through an
//! invalid combination mid-drag. Every generator checks
//! [`Distribution::is_valid`] first: series come back empty, pointwise
//! functions and draws return `NaN`.

use rand::Rng;

use crate::catalog::DistributionKind;
use crate::error::{Result, StatError};
use crate::integrate::{self, DEFAULT_SUBINTERVALS};
use crate::random;
use crate::special;

/// Probability below which a discrete PMF series stops, once past its
/// mode guard.
pub const TAIL_PROBABILITY_CUTOFF: f64 = 1e-4;

/// Cumulative probability past which a discrete CDF series stops.
pub const CDF_SATURATION: f64 = 0.9999;

/// Number of subdivisions of a continuous series window.
pub const SERIES_POINTS: usize = 100;

/// Shape values with `|ξ|` below this use the Gumbel / Exponential limit.
pub const SHAPE_EPSILON: f64 = 1e-6;

/// Hard cap on the length of any discrete series.
pub const MAX_DISCRETE_POINTS: u64 = 10_000;

/// Gaussian and GEV windows span `±4σ` around the location.
const LOCATION_HALF_WIDTH: f64 = 4.0;
/// Gamma window reaches `mean + 5·stdev`; Poisson cap is `λ + 5√λ`.
const TAIL_STDEVS: f64 = 5.0;
/// Generalized Pareto window spans `[0, 5σ]`.
const GP_WINDOW_SCALES: f64 = 5.0;
/// Negative binomial cap spread factor.
const NB_TAIL_SPREAD: f64 = 4.0;

/// Euler–Mascheroni constant γ, the mean of the standard Gumbel.
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// One chart point: `y` is a density, a probability or a cumulative
/// probability depending on the series.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SeriesPoint {
    pub x: f64,
    pub y: f64,
}

impl SeriesPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A parametric distribution with its current parameter values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distribution {
    /// Successes in `n` Bernoulli(`p`) trials.
    Binomial { n: f64, p: f64 },
    /// Trials up to and including the first success.
    Geometric { p: f64 },
    /// Trials up to and including the `r`-th success.
    NegativeBinomial { r: f64, p: f64 },
    Poisson { lambda: f64 },
    Gaussian { mu: f64, sigma: f64 },
    /// Shape `alpha`, scale `beta`.
    Gamma { alpha: f64, beta: f64 },
    /// Generalized extreme value.
    Gev { xi: f64, mu: f64, sigma: f64 },
    /// Generalized Pareto with threshold 0.
    GeneralizedPareto { xi: f64, sigma: f64 },
}

/// Integer count from a slider value, at most [`MAX_DISCRETE_POINTS`].
fn count(v: f64) -> Option<u64> {
    let k = v.round();
    (k >= 0.0 && k <= MAX_DISCRETE_POINTS as f64).then_some(k as u64)
}

fn is_probability(p: f64) -> bool {
    p > 0.0 && p < 1.0
}

fn is_scale(s: f64) -> bool {
    s.is_finite() && s > 0.0
}

/// Integer value of `x` if it is one.
fn as_integer(x: f64) -> Option<f64> {
    (x.is_finite() && x.fract() == 0.0).then_some(x)
}

/// `j·step` grid of `SERIES_POINTS + 1` abscissae starting at `start`.
fn window(start: f64, width: f64) -> impl Iterator<Item = f64> {
    let step = width / SERIES_POINTS as f64;
    (0..=SERIES_POINTS).map(move |j| start + j as f64 * step)
}

impl Distribution {
    /// Builds a distribution from positional parameters in catalog order.
    ///
    /// # Errors
    /// [`StatError::ParameterCount`] if `params` has the wrong length.
    /// Parameter *values* are not checked.
    ///
    /// # Examples
    /// ```
    /// use u_statlab::{Distribution, DistributionKind};
    /// let d = Distribution::from_params(DistributionKind::Gamma, &[2.0, 3.0]).unwrap();
    /// assert_eq!(d, Distribution::Gamma { alpha: 2.0, beta: 3.0 });
    /// ```
    pub fn from_params(kind: DistributionKind, params: &[f64]) -> Result<Self> {
        let expected = kind.parameters().len();
        if params.len() != expected {
            return Err(StatError::ParameterCount {
                distribution: kind.id(),
                expected,
                got: params.len(),
            });
        }
        let v = params;
        Ok(match kind {
            DistributionKind::Binomial => Distribution::Binomial { n: v[0], p: v[1] },
            DistributionKind::Geometric => Distribution::Geometric { p: v[0] },
            DistributionKind::NegativeBinomial => Distribution::NegativeBinomial { r: v[0], p: v[1] },
            DistributionKind::Poisson => Distribution::Poisson { lambda: v[0] },
            DistributionKind::Gaussian => Distribution::Gaussian { mu: v[0], sigma: v[1] },
            DistributionKind::Gamma => Distribution::Gamma { alpha: v[0], beta: v[1] },
            DistributionKind::Gev => Distribution::Gev {
                xi: v[0],
                mu: v[1],
                sigma: v[2],
            },
            DistributionKind::GeneralizedPareto => {
                Distribution::GeneralizedPareto { xi: v[0], sigma: v[1] }
            }
        })
    }

    /// Builds a distribution from `(parameter id, value)` pairs; parameters
    /// not mentioned take their catalog default.
    ///
    /// # Errors
    /// [`StatError::UnknownParameter`] for an id the family does not have.
    pub fn from_named(kind: DistributionKind, named: &[(&str, f64)]) -> Result<Self> {
        let mut values = kind.descriptor().defaults();
        for &(id, value) in named {
            let idx = kind
                .parameter_index(id)
                .ok_or_else(|| StatError::UnknownParameter {
                    distribution: kind.id(),
                    parameter: id.to_string(),
                })?;
            values[idx] = value;
        }
        Self::from_params(kind, &values)
    }

    /// The family with every parameter at its catalog default.
    pub fn with_defaults(kind: DistributionKind) -> Self {
        match kind {
            DistributionKind::Binomial => Distribution::Binomial { n: 10.0, p: 0.5 },
            DistributionKind::Geometric => Distribution::Geometric { p: 0.3 },
            DistributionKind::NegativeBinomial => Distribution::NegativeBinomial { r: 3.0, p: 0.4 },
            DistributionKind::Poisson => Distribution::Poisson { lambda: 3.0 },
            DistributionKind::Gaussian => Distribution::Gaussian { mu: 0.0, sigma: 1.0 },
            DistributionKind::Gamma => Distribution::Gamma { alpha: 2.0, beta: 2.0 },
            DistributionKind::Gev => Distribution::Gev {
                xi: 0.1,
                mu: 0.0,
                sigma: 1.0,
            },
            DistributionKind::GeneralizedPareto => {
                Distribution::GeneralizedPareto { xi: 0.2, sigma: 1.0 }
            }
        }
    }

    pub fn kind(&self) -> DistributionKind {
        match self {
            Distribution::Binomial { .. } => DistributionKind::Binomial,
            Distribution::Geometric { .. } => DistributionKind::Geometric,
            Distribution::NegativeBinomial { .. } => DistributionKind::NegativeBinomial,
            Distribution::Poisson { .. } => DistributionKind::Poisson,
            Distribution::Gaussian { .. } => DistributionKind::Gaussian,
            Distribution::Gamma { .. } => DistributionKind::Gamma,
            Distribution::Gev { .. } => DistributionKind::Gev,
            Distribution::GeneralizedPareto { .. } => DistributionKind::GeneralizedPareto,
        }
    }

    /// Parameter values in catalog order.
    pub fn params(&self) -> Vec<f64> {
        match *self {
            Distribution::Binomial { n, p } => vec![n, p],
            Distribution::Geometric { p } => vec![p],
            Distribution::NegativeBinomial { r, p } => vec![r, p],
            Distribution::Poisson { lambda } => vec![lambda],
            Distribution::Gaussian { mu, sigma } => vec![mu, sigma],
            Distribution::Gamma { alpha, beta } => vec![alpha, beta],
            Distribution::Gev { xi, mu, sigma } => vec![xi, mu, sigma],
            Distribution::GeneralizedPareto { xi, sigma } => vec![xi, sigma],
        }
    }

    /// Whether the parameters lie in the family's domain.
    ///
    /// Counts must round to an integer in `[0, MAX_DISCRETE_POINTS]`
    /// (`r ≥ 1`), probabilities in
    /// the open interval (0, 1), scales and shapes finite and positive,
    /// locations and GEV/GP shapes finite.
    pub fn is_valid(&self) -> bool {
        match *self {
            Distribution::Binomial { n, p } => count(n).is_some() && is_probability(p),
            Distribution::Geometric { p } => is_probability(p),
            Distribution::NegativeBinomial { r, p } => {
                count(r).is_some_and(|r| r >= 1) && is_probability(p)
            }
            Distribution::Poisson { lambda } => is_scale(lambda),
            Distribution::Gaussian { mu, sigma } => mu.is_finite() && is_scale(sigma),
            Distribution::Gamma { alpha, beta } => is_scale(alpha) && is_scale(beta),
            Distribution::Gev { xi, mu, sigma } => {
                xi.is_finite() && mu.is_finite() && is_scale(sigma)
            }
            Distribution::GeneralizedPareto { xi, sigma } => xi.is_finite() && is_scale(sigma),
        }
    }

    // ------------------------------------------------------------------
    // Pointwise evaluation
    // ------------------------------------------------------------------

    /// Density (continuous families) or probability mass (discrete
    /// families) at `x`. Mass is zero off the integer support.
    ///
    /// Returns `NaN` for invalid parameters.
    pub fn pdf(&self, x: f64) -> f64 {
        if !self.is_valid() || x.is_nan() {
            return f64::NAN;
        }
        match *self {
            Distribution::Binomial { n, p } => as_integer(x).map_or(0.0, |k| binomial_pmf(k, n, p)),
            Distribution::Geometric { p } => as_integer(x).map_or(0.0, |k| geometric_pmf(k, p)),
            Distribution::NegativeBinomial { r, p } => {
                as_integer(x).map_or(0.0, |k| negative_binomial_pmf(k, r.round(), p))
            }
            Distribution::Poisson { lambda } => as_integer(x).map_or(0.0, |k| poisson_pmf(k, lambda)),
            Distribution::Gaussian { mu, sigma } => {
                special::standard_normal_pdf((x - mu) / sigma) / sigma
            }
            Distribution::Gamma { alpha, beta } => gamma_pdf(x, alpha, beta),
            Distribution::Gev { xi, mu, sigma } => gev_pdf(x, xi, mu, sigma),
            Distribution::GeneralizedPareto { xi, sigma } => gp_pdf(x, xi, sigma),
        }
    }

    /// Cumulative probability `P(X ≤ x)`.
    ///
    /// Discrete families sum their mass up to `⌊x⌋`; the Gamma CDF is the
    /// trapezoidal integral of its density over `[0, x]` with 100
    /// subintervals, which loses accuracy for shape < 1. Returns `NaN` for
    /// invalid parameters.
    pub fn cdf(&self, x: f64) -> f64 {
        if !self.is_valid() || x.is_nan() {
            return f64::NAN;
        }
        match *self {
            Distribution::Binomial { n, p } => {
                let n = n.round();
                let top = x.floor().min(n);
                if top < 0.0 {
                    return 0.0;
                }
                discrete_cumulative(0.0, top, |k| binomial_pmf(k, n, p))
            }
            Distribution::Geometric { p } => {
                let k = x.floor();
                if k < 1.0 {
                    0.0
                } else {
                    1.0 - (1.0 - p).powf(k)
                }
            }
            Distribution::NegativeBinomial { r, p } => {
                let r = r.round();
                let top = x.floor();
                if top < r {
                    return 0.0;
                }
                let top = top.min(r + MAX_DISCRETE_POINTS as f64);
                discrete_cumulative(r, top, |k| negative_binomial_pmf(k, r, p))
            }
            Distribution::Poisson { lambda } => {
                let top = x.floor();
                if top < 0.0 {
                    return 0.0;
                }
                let top = top.min(MAX_DISCRETE_POINTS as f64);
                discrete_cumulative(0.0, top, |k| poisson_pmf(k, lambda))
            }
            Distribution::Gaussian { mu, sigma } => special::normal_cdf((x - mu) / sigma),
            Distribution::Gamma { alpha, beta } => gamma_cdf(x, alpha, beta),
            Distribution::Gev { xi, mu, sigma } => gev_cdf(x, xi, mu, sigma),
            Distribution::GeneralizedPareto { xi, sigma } => gp_cdf(x, xi, sigma),
        }
    }

    /// Analytical mean; `+∞` where it does not exist (GEV/GP with ξ ≥ 1),
    /// `NaN` for invalid parameters.
    pub fn mean(&self) -> f64 {
        if !self.is_valid() {
            return f64::NAN;
        }
        match *self {
            Distribution::Binomial { n, p } => n.round() * p,
            Distribution::Geometric { p } => 1.0 / p,
            Distribution::NegativeBinomial { r, p } => r.round() / p,
            Distribution::Poisson { lambda } => lambda,
            Distribution::Gaussian { mu, .. } => mu,
            Distribution::Gamma { alpha, beta } => alpha * beta,
            Distribution::Gev { xi, mu, sigma } => {
                if xi.abs() < SHAPE_EPSILON {
                    mu + sigma * EULER_GAMMA
                } else if xi < 1.0 {
                    mu + sigma * (special::gamma(1.0 - xi) - 1.0) / xi
                } else {
                    f64::INFINITY
                }
            }
            Distribution::GeneralizedPareto { xi, sigma } => {
                if xi < 1.0 {
                    sigma / (1.0 - xi)
                } else {
                    f64::INFINITY
                }
            }
        }
    }

    /// Analytical variance; `+∞` where it does not exist (GEV/GP with
    /// ξ ≥ ½), `NaN` for invalid parameters.
    pub fn variance(&self) -> f64 {
        if !self.is_valid() {
            return f64::NAN;
        }
        match *self {
            Distribution::Binomial { n, p } => n.round() * p * (1.0 - p),
            Distribution::Geometric { p } => (1.0 - p) / (p * p),
            Distribution::NegativeBinomial { r, p } => r.round() * (1.0 - p) / (p * p),
            Distribution::Poisson { lambda } => lambda,
            Distribution::Gaussian { sigma, .. } => sigma * sigma,
            Distribution::Gamma { alpha, beta } => alpha * beta * beta,
            Distribution::Gev { xi, sigma, .. } => {
                if xi.abs() < SHAPE_EPSILON {
                    sigma * sigma * std::f64::consts::PI.powi(2) / 6.0
                } else if xi < 0.5 {
                    let g1 = special::gamma(1.0 - xi);
                    let g2 = special::gamma(1.0 - 2.0 * xi);
                    sigma * sigma * (g2 - g1 * g1) / (xi * xi)
                } else {
                    f64::INFINITY
                }
            }
            Distribution::GeneralizedPareto { xi, sigma } => {
                if xi < 0.5 {
                    sigma * sigma / ((1.0 - xi).powi(2) * (1.0 - 2.0 * xi))
                } else {
                    f64::INFINITY
                }
            }
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    // ------------------------------------------------------------------
    // Series
    // ------------------------------------------------------------------

    /// PDF/PMF chart series, ordered by `x`.
    ///
    /// Discrete families start at the support minimum and step by 1 up to
    /// a family cap, stopping early at the first term below
    /// [`TAIL_PROBABILITY_CUTOFF`] once past the mode guard. Continuous
    /// families evaluate `SERIES_POINTS + 1` evenly spaced points over a
    /// window sized from their scale, skipping points outside the support
    /// and non-finite densities.
    ///
    /// Invalid parameters give an empty series.
    ///
    /// # Examples
    /// ```
    /// use u_statlab::Distribution;
    /// let series = Distribution::Binomial { n: 10.0, p: 0.5 }.pdf_series();
    /// assert_eq!(series.len(), 11);
    /// let total: f64 = series.iter().map(|pt| pt.y).sum();
    /// assert!((total - 1.0).abs() < 1e-9);
    /// assert!(Distribution::Gaussian { mu: 0.0, sigma: -1.0 }.pdf_series().is_empty());
    /// ```
    pub fn pdf_series(&self) -> Vec<SeriesPoint> {
        if !self.is_valid() {
            trace_debug!(distribution = %self.kind(), "invalid parameters, empty pdf series");
            return Vec::new();
        }
        match *self {
            Distribution::Binomial { n, p } => {
                let n = n.round();
                (0..=n as u64)
                    .map(|k| SeriesPoint::new(k as f64, binomial_pmf(k as f64, n, p)))
                    .collect()
            }
            Distribution::Geometric { p } => {
                let limit = geometric_limit(p);
                pmf_until_tail(1, limit, 10.0, |k| geometric_pmf(k, p))
            }
            Distribution::NegativeBinomial { r, p } => {
                let r = r.round();
                let limit = negative_binomial_limit(r, p);
                pmf_until_tail(r as u64, limit, r + 10.0, |k| negative_binomial_pmf(k, r, p))
            }
            Distribution::Poisson { lambda } => {
                let limit = poisson_limit(lambda);
                pmf_until_tail(0, limit, lambda, |k| poisson_pmf(k, lambda))
            }
            Distribution::Gaussian { .. }
            | Distribution::Gamma { .. }
            | Distribution::Gev { .. } => self
                .continuous_window()
                .filter(|&x| self.in_support(x))
                .filter_map(|x| {
                    let y = self.pdf(x);
                    y.is_finite().then_some(SeriesPoint::new(x, y))
                })
                .collect(),
            Distribution::GeneralizedPareto { xi, sigma } => {
                let mut out = Vec::with_capacity(SERIES_POINTS + 1);
                for x in window(0.0, GP_WINDOW_SCALES * sigma) {
                    if gp_past_endpoint(x, xi, sigma) {
                        break;
                    }
                    let y = gp_pdf(x, xi, sigma);
                    if y.is_finite() && gp_in_support(x, xi, sigma) {
                        out.push(SeriesPoint::new(x, y));
                    }
                }
                out
            }
        }
    }

    /// CDF chart series, ordered by `x`, non-decreasing and within [0, 1].
    ///
    /// Discrete families accumulate their mass until the cumulative value
    /// passes [`CDF_SATURATION`] (Binomial runs to `n`). Gaussian, GEV and
    /// GP use closed forms. The Gamma series integrates the density from 0
    /// at every point, then is forced monotone and clamped to [0, 1].
    ///
    /// Invalid parameters give an empty series.
    pub fn cdf_series(&self) -> Vec<SeriesPoint> {
        if !self.is_valid() {
            trace_debug!(distribution = %self.kind(), "invalid parameters, empty cdf series");
            return Vec::new();
        }
        match *self {
            Distribution::Binomial { n, p } => {
                let n = n.round();
                cumulative_series(0, n as u64, false, |k| binomial_pmf(k, n, p))
            }
            Distribution::Geometric { p } => {
                let limit = geometric_limit(p);
                let mut out = Vec::new();
                for k in 1..=limit {
                    let cdf = 1.0 - (1.0 - p).powf(k as f64);
                    out.push(SeriesPoint::new(k as f64, cdf));
                    if cdf > CDF_SATURATION {
                        break;
                    }
                }
                out
            }
            Distribution::NegativeBinomial { r, p } => {
                let r = r.round();
                let limit = negative_binomial_limit(r, p);
                cumulative_series(r as u64, limit, true, |k| negative_binomial_pmf(k, r, p))
            }
            Distribution::Poisson { lambda } => {
                let limit = poisson_limit(lambda);
                cumulative_series(0, limit, true, |k| poisson_pmf(k, lambda))
            }
            Distribution::Gaussian { .. } | Distribution::Gev { .. } => self
                .continuous_window()
                .filter(|&x| self.in_support(x))
                .filter_map(|x| {
                    let y = self.cdf(x);
                    y.is_finite().then_some(SeriesPoint::new(x, y))
                })
                .collect(),
            Distribution::Gamma { .. } => {
                let mut prev = 0.0;
                self.continuous_window()
                    .filter_map(|x| {
                        let raw = self.cdf(x);
                        if !raw.is_finite() {
                            return None;
                        }
                        let y = raw.clamp(prev, 1.0);
                        prev = y;
                        Some(SeriesPoint::new(x, y))
                    })
                    .collect()
            }
            Distribution::GeneralizedPareto { xi, sigma } => {
                let mut out = Vec::with_capacity(SERIES_POINTS + 1);
                for x in window(0.0, GP_WINDOW_SCALES * sigma) {
                    if gp_past_endpoint(x, xi, sigma) {
                        out.push(SeriesPoint::new(x, 1.0));
                        break;
                    }
                    let y = gp_cdf(x, xi, sigma);
                    if y.is_finite() && gp_in_support(x, xi, sigma) {
                        out.push(SeriesPoint::new(x, y));
                    }
                }
                out
            }
        }
    }

    /// Plot abscissae for the continuous families other than GP.
    fn continuous_window(&self) -> Box<dyn Iterator<Item = f64>> {
        match *self {
            Distribution::Gaussian { mu, sigma } | Distribution::Gev { mu, sigma, .. } => {
                let half = LOCATION_HALF_WIDTH * sigma;
                Box::new(window(mu - half, 2.0 * half))
            }
            Distribution::Gamma { alpha, beta } => {
                let max_x = alpha * beta + TAIL_STDEVS * (alpha * beta * beta).sqrt();
                // Starts one step above 0: the density is singular there for α < 1.
                let step = max_x / SERIES_POINTS as f64;
                Box::new((1..=SERIES_POINTS).map(move |j| j as f64 * step))
            }
            _ => Box::new(std::iter::empty()),
        }
    }

    /// Whether `x` lies where the GEV transform `1 + ξ(x−μ)/σ` is positive.
    /// Always true for the other families.
    fn in_support(&self, x: f64) -> bool {
        match *self {
            Distribution::Gev { xi, mu, sigma } => {
                xi.abs() < SHAPE_EPSILON || 1.0 + xi * (x - mu) / sigma > 0.0
            }
            _ => true,
        }
    }

    // ------------------------------------------------------------------
    // Sampling
    // ------------------------------------------------------------------

    /// Draws one variate using the family's algorithm (see [`random`]).
    ///
    /// Discrete draws are returned as integral `f64` values. Invalid
    /// parameters return `NaN` without consuming randomness.
    ///
    /// # Examples
    /// ```
    /// use u_statlab::Distribution;
    /// use u_statlab::random::create_rng;
    /// let mut rng = create_rng(7);
    /// let k = Distribution::Binomial { n: 10.0, p: 0.5 }.sample(&mut rng);
    /// assert!((0.0..=10.0).contains(&k) && k.fract() == 0.0);
    /// ```
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if !self.is_valid() {
            return f64::NAN;
        }
        match *self {
            Distribution::Binomial { n, p } => random::binomial(n.round() as u64, p, rng) as f64,
            Distribution::Geometric { p } => random::geometric(p, rng) as f64,
            Distribution::NegativeBinomial { r, p } => {
                random::negative_binomial(r.round() as u64, p, rng) as f64
            }
            Distribution::Poisson { lambda } => random::poisson(lambda, rng) as f64,
            Distribution::Gaussian { mu, sigma } => random::gaussian(mu, sigma, rng),
            Distribution::Gamma { alpha, beta } => random::gamma(alpha, beta, rng),
            Distribution::Gev { xi, mu, sigma } => random::gev(xi, mu, sigma, rng),
            Distribution::GeneralizedPareto { xi, sigma } => {
                random::generalized_pareto(xi, sigma, rng)
            }
        }
    }
}

// ============================================================================
// Discrete helpers
// ============================================================================

fn binomial_pmf(k: f64, n: f64, p: f64) -> f64 {
    if k < 0.0 || k > n {
        return 0.0;
    }
    let coefficient = special::binomial_coefficient(n as u64, k as u64);
    if coefficient.is_finite() {
        return coefficient * p.powf(k) * (1.0 - p).powf(n - k);
    }
    let ln_coefficient =
        special::ln_gamma(n + 1.0) - special::ln_gamma(k + 1.0) - special::ln_gamma(n - k + 1.0);
    (ln_coefficient + k * p.ln() + (n - k) * (1.0 - p).ln()).exp()
}

fn geometric_pmf(k: f64, p: f64) -> f64 {
    if k < 1.0 {
        return 0.0;
    }
    p * (1.0 - p).powf(k - 1.0)
}

fn negative_binomial_pmf(k: f64, r: f64, p: f64) -> f64 {
    if k < r {
        return 0.0;
    }
    special::binomial_coefficient(k as u64 - 1, r as u64 - 1) * p.powf(r) * (1.0 - p).powf(k - r)
}

/// `e^{−λ} λ^k / k!`, evaluated in log space so large `k` stays finite.
fn poisson_pmf(k: f64, lambda: f64) -> f64 {
    if k < 0.0 {
        return 0.0;
    }
    (-lambda + k * lambda.ln() - special::ln_gamma(k + 1.0)).exp()
}

/// `max(20, min(50, ⌈5/p⌉))`
fn geometric_limit(p: f64) -> u64 {
    (5.0 / p).ceil().clamp(20.0, 50.0) as u64
}

/// `max(r+10, min(r+50, ⌈r/p + 4√(r(1−p))/p²⌉))`
fn negative_binomial_limit(r: f64, p: f64) -> u64 {
    let spread = r / p + NB_TAIL_SPREAD * (r * (1.0 - p)).sqrt() / (p * p);
    (spread.ceil().min(r + 50.0)).max(r + 10.0) as u64
}

/// `max(15, ⌈λ + 5√λ⌉)`, capped at [`MAX_DISCRETE_POINTS`].
fn poisson_limit(lambda: f64) -> u64 {
    let cap = (lambda + TAIL_STDEVS * lambda.sqrt()).ceil().max(15.0);
    cap.min(MAX_DISCRETE_POINTS as f64) as u64
}

/// PMF points for `k ∈ [start, limit]`, stopping after the first point
/// below the cutoff with `k > guard`.
fn pmf_until_tail<F>(start: u64, limit: u64, guard: f64, pmf: F) -> Vec<SeriesPoint>
where
    F: Fn(f64) -> f64,
{
    let mut out = Vec::new();
    for k in start..=limit {
        let k = k as f64;
        let prob = pmf(k);
        out.push(SeriesPoint::new(k, prob));
        if prob < TAIL_PROBABILITY_CUTOFF && k > guard {
            break;
        }
    }
    out
}

/// Running sums of `pmf` over `[start, limit]`, clamped to 1.
fn cumulative_series<F>(start: u64, limit: u64, saturate: bool, pmf: F) -> Vec<SeriesPoint>
where
    F: Fn(f64) -> f64,
{
    let mut out = Vec::new();
    let mut cumulative = 0.0;
    for k in start..=limit {
        let k = k as f64;
        cumulative += pmf(k);
        out.push(SeriesPoint::new(k, cumulative.min(1.0)));
        if saturate && cumulative > CDF_SATURATION {
            break;
        }
    }
    out
}

fn discrete_cumulative<F>(start: f64, top: f64, pmf: F) -> f64
where
    F: Fn(f64) -> f64,
{
    let mut cumulative = 0.0;
    let mut k = start;
    while k <= top {
        cumulative += pmf(k);
        k += 1.0;
    }
    cumulative.min(1.0)
}

// ============================================================================
// Continuous helpers
// ============================================================================

/// Gamma density with shape `alpha` and scale `beta`.
///
/// The support is the open half-line, so `x ≤ 0` gives 0. For `alpha < 1`
/// this drops the integrable spike at the origin from any integral that
/// starts at 0.
fn gamma_pdf(x: f64, alpha: f64, beta: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    x.powf(alpha - 1.0) * (-x / beta).exp() / (beta.powf(alpha) * special::gamma(alpha))
}

fn gamma_cdf(x: f64, alpha: f64, beta: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    integrate::trapezoid(|t| gamma_pdf(t, alpha, beta), 0.0, x, DEFAULT_SUBINTERVALS)
}

/// The GEV `t(x)`: `(1 + ξs)^{−1/ξ}` or `e^{−s}` in the Gumbel limit,
/// `None` outside the support.
fn gev_t(x: f64, xi: f64, mu: f64, sigma: f64) -> Option<f64> {
    let s = (x - mu) / sigma;
    if xi.abs() < SHAPE_EPSILON {
        return Some((-s).exp());
    }
    let base = 1.0 + xi * s;
    (base > 0.0).then(|| base.powf(-1.0 / xi))
}

fn gev_pdf(x: f64, xi: f64, mu: f64, sigma: f64) -> f64 {
    match gev_t(x, xi, mu, sigma) {
        Some(t) => t.powf(xi + 1.0) * (-t).exp() / sigma,
        None => 0.0,
    }
}

fn gev_cdf(x: f64, xi: f64, mu: f64, sigma: f64) -> f64 {
    match gev_t(x, xi, mu, sigma) {
        Some(t) => (-t).exp(),
        // Below the lower endpoint for ξ > 0, above the upper one for ξ < 0.
        None if xi > 0.0 => 0.0,
        None => 1.0,
    }
}

fn gp_in_support(x: f64, xi: f64, sigma: f64) -> bool {
    x >= 0.0 && (xi.abs() < SHAPE_EPSILON || 1.0 + xi * x / sigma > 0.0)
}

/// Beyond the finite upper endpoint `−σ/ξ` of a short-tailed GP.
fn gp_past_endpoint(x: f64, xi: f64, sigma: f64) -> bool {
    xi < 0.0 && x > -sigma / xi
}

fn gp_pdf(x: f64, xi: f64, sigma: f64) -> f64 {
    if !gp_in_support(x, xi, sigma) {
        return 0.0;
    }
    if xi.abs() < SHAPE_EPSILON {
        return (-x / sigma).exp() / sigma;
    }
    (1.0 + xi * x / sigma).powf(-(1.0 / xi + 1.0)) / sigma
}

fn gp_cdf(x: f64, xi: f64, sigma: f64) -> f64 {
    if x < 0.0 {
        return 0.0;
    }
    if xi.abs() < SHAPE_EPSILON {
        return 1.0 - (-x / sigma).exp();
    }
    let base = 1.0 + xi * x / sigma;
    if base <= 0.0 {
        return 1.0;
    }
    1.0 - base.powf(-1.0 / xi)
}
