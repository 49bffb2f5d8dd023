//! String-keyed facade for a presentation layer.
//!
//! [`Engine`] resolves distribution ids and named parameters against the
//! catalog, owns the injected random source, and forwards to the numerical
//! modules. Numerical failures still surface as empty series or `NaN`;
//! only unknown ids, unknown parameter names and oversized sample requests
//! are `Err`.
//!
//! # Examples
//! ```
//! use u_statlab::Engine;
//!
//! let mut engine = Engine::seeded(42);
//! let pdf = engine.pdf_series("gaussian", &[("mu", 1.0), ("sigma", 2.0)]).unwrap();
//! assert_eq!(pdf.len(), 101);
//!
//! let sample = engine.sample("poisson", &[("lambda", 4.0)]).unwrap();
//! assert_eq!(sample.len(), 100);
//! let qq = engine.qq_pairs(&sample);
//! assert_eq!(qq.len(), sample.len());
//! ```

use rand::rngs::SmallRng;
use rand::Rng;

use crate::catalog::{self, DistributionDescriptor, DistributionKind};
use crate::distributions::{Distribution, SeriesPoint};
use crate::empirical::{self, Ecdf, QqPair};
use crate::error::{Result, StatError};
use crate::integrate;
use crate::quantile::{self, FTestSeries, SolverConfig};
use crate::random::create_rng;
use crate::sampler::{self, Sample};

/// Sample-size settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Size used by [`Engine::sample`].
    pub default_sample_size: usize,
    /// Largest size [`Engine::sample_n`] accepts.
    pub max_sample_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_sample_size: 100,
            max_sample_size: 500,
        }
    }
}

impl EngineConfig {
    pub fn with_default_sample_size(mut self, n: usize) -> Self {
        self.default_sample_size = n;
        self
    }

    pub fn with_max_sample_size(mut self, n: usize) -> Self {
        self.max_sample_size = n;
        self
    }
}

/// Owns the random source and settings; every call is synchronous.
#[derive(Debug, Clone)]
pub struct Engine<R: Rng> {
    rng: R,
    config: EngineConfig,
    solver: SolverConfig,
}

impl Engine<SmallRng> {
    /// Engine over a [`create_rng`] stream with default settings.
    pub fn seeded(seed: u64) -> Self {
        Self::new(create_rng(seed))
    }
}

impl<R: Rng> Engine<R> {
    pub fn new(rng: R) -> Self {
        Self::with_config(rng, EngineConfig::default())
    }

    pub fn with_config(rng: R, config: EngineConfig) -> Self {
        Self {
            rng,
            config,
            solver: SolverConfig::default(),
        }
    }

    /// Replaces the settings used by [`quantile`](Self::quantile) and
    /// [`f_quantile`](Self::f_quantile).
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn solver(&self) -> &SolverConfig {
        &self.solver
    }

    // ------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------

    pub fn list_distributions(&self) -> &'static [DistributionDescriptor] {
        catalog::list_distributions()
    }

    /// Resolves an id and named parameters; missing parameters take their
    /// catalog defaults.
    ///
    /// A value outside its slider range is replaced by `NaN`, so the
    /// result is invalid: series come back empty and draws are `NaN`.
    ///
    /// # Errors
    /// [`StatError::UnknownDistribution`] or [`StatError::UnknownParameter`].
    pub fn distribution(&self, id: &str, params: &[(&str, f64)]) -> Result<Distribution> {
        let kind: DistributionKind = id.parse()?;
        let values: Vec<f64> = Distribution::from_named(kind, params)?
            .params()
            .into_iter()
            .zip(kind.parameters())
            .map(|(value, spec)| {
                if spec.contains(value) {
                    value
                } else {
                    trace_debug!(
                        distribution = id,
                        parameter = spec.id,
                        value,
                        "outside slider range"
                    );
                    f64::NAN
                }
            })
            .collect();
        Distribution::from_params(kind, &values)
    }

    // ------------------------------------------------------------------
    // Series
    // ------------------------------------------------------------------

    pub fn pdf_series(&self, id: &str, params: &[(&str, f64)]) -> Result<Vec<SeriesPoint>> {
        let dist = self.distribution(id, params)?;
        let series = dist.pdf_series();
        trace_debug!(distribution = id, points = series.len(), "pdf series");
        Ok(series)
    }

    pub fn cdf_series(&self, id: &str, params: &[(&str, f64)]) -> Result<Vec<SeriesPoint>> {
        let dist = self.distribution(id, params)?;
        let series = dist.cdf_series();
        trace_debug!(distribution = id, points = series.len(), "cdf series");
        Ok(series)
    }

    // ------------------------------------------------------------------
    // Sampling
    // ------------------------------------------------------------------

    pub fn sample_one(&mut self, id: &str, params: &[(&str, f64)]) -> Result<f64> {
        let dist = self.distribution(id, params)?;
        Ok(sampler::sample_one(&dist, &mut self.rng))
    }

    /// `n` sorted draws.
    ///
    /// # Errors
    /// [`StatError::SampleSize`] when `n` exceeds
    /// [`EngineConfig::max_sample_size`], plus the lookup errors of
    /// [`distribution`](Self::distribution).
    pub fn sample_n(&mut self, id: &str, params: &[(&str, f64)], n: usize) -> Result<Sample> {
        if n > self.config.max_sample_size {
            trace_warn!(requested = n, max = self.config.max_sample_size, "sample size rejected");
            return Err(StatError::SampleSize {
                requested: n,
                max: self.config.max_sample_size,
            });
        }
        let dist = self.distribution(id, params)?;
        let sample = sampler::sample_n(&dist, n, &mut self.rng);
        trace_debug!(distribution = id, n = sample.len(), "sample drawn");
        Ok(sample)
    }

    /// [`sample_n`](Self::sample_n) at the configured default size.
    pub fn sample(&mut self, id: &str, params: &[(&str, f64)]) -> Result<Sample> {
        self.sample_n(id, params, self.config.default_sample_size)
    }

    // ------------------------------------------------------------------
    // Empirical
    // ------------------------------------------------------------------

    pub fn ecdf(&self, sample: &Sample) -> Ecdf {
        empirical::ecdf(sample.values())
    }

    /// Normal Q-Q pairs of the sample.
    pub fn qq_pairs(&self, sample: &Sample) -> Vec<QqPair> {
        empirical::qq_pairs(sample.values())
    }

    // ------------------------------------------------------------------
    // Numerics
    // ------------------------------------------------------------------

    /// Inverts a non-decreasing CDF on `[0, ∞)` with the engine's solver
    /// settings.
    pub fn quantile<F>(&self, cdf: F, p: f64) -> f64
    where
        F: Fn(f64) -> f64,
    {
        quantile::bisection_quantile(cdf, p, &self.solver)
    }

    pub fn integrate<F>(&self, f: F, a: f64, b: f64, n: usize) -> f64
    where
        F: Fn(f64) -> f64,
    {
        integrate::trapezoid(f, a, b, n)
    }

    /// Quantile of the F distribution with `d1`, `d2` degrees of freedom.
    pub fn f_quantile(&self, p: f64, d1: f64, d2: f64) -> f64 {
        quantile::f_distribution_quantile_with(p, d1, d2, &self.solver)
    }

    /// F-test density chart with its 5% critical value.
    pub fn f_test_series(&self, d1: f64, d2: f64, observed: f64) -> FTestSeries {
        quantile::f_distribution_series(d1, d2, observed)
    }
}
