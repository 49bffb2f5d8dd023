//! # u-statlab
//!
//! Numerical statistics engine behind an interactive distribution explorer.
//!
//! The crate evaluates special functions, generates density/mass and
//! cumulative series for eight parametric families, draws variates from
//! them with family-appropriate algorithms, inverts monotone CDFs by
//! bisection, and turns finite samples into ECDF and Q-Q artifacts. It
//! knows nothing about sliders or charts; a presentation layer calls it
//! synchronously and renders whatever finite values come back.
//!
//! ## Modules
//!
//! - [`special`]: gamma, beta, erf, normal CDF/quantile
//! - [`integrate`]: composite trapezoidal rule
//! - [`quantile`]: bisection CDF inversion and the F distribution
//! - [`catalog`]: immutable descriptors and slider metadata
//! - [`distributions`]: the eight families with pointwise PDF/CDF, moments and series
//! - [`random`]: seeded RNG and per-family variate algorithms
//! - [`sampler`]: single draws and sorted i.i.d. samples
//! - [`empirical`]: ECDF step functions and Q-Q pairs
//! - [`stats`]: descriptive statistics of samples
//! - [`engine`]: string-keyed facade owning an injected RNG
//!
//! ## Failure model
//!
//! Nothing in the numerical core panics or returns `Err` for bad numbers.
//! Invalid parameters yield empty series or `NaN`; poles and
//! non-convergence yield `±∞`/`NaN` or the best bracket found. Only
//! lookups at the string boundary (unknown ids, wrong arity) are
//! [`StatError`]s.
//!
//! ## Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize` on catalog metadata and outputs, `Serialize`/`Deserialize` on configs | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) | off |

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::warn!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_warn {
    ($($arg:tt)*) => {};
}

pub mod catalog;
pub mod distributions;
pub mod empirical;
pub mod engine;
mod error;
pub mod integrate;
pub mod quantile;
pub mod random;
pub mod sampler;
pub mod special;
pub mod stats;

pub use catalog::{DistributionDescriptor, DistributionKind, ParameterSpec, Support};
pub use distributions::{Distribution, SeriesPoint};
pub use empirical::{Ecdf, EcdfStep, QqPair, ReferenceLine};
pub use engine::{Engine, EngineConfig};
pub use error::{Result, StatError};
pub use quantile::SolverConfig;
pub use sampler::Sample;
