//! Immutable distribution descriptors.
//!
//! The catalog is a fixed table built at compile time: identity, one-line
//! summary, support type and slider metadata for each family. Nothing in
//! it is ever mutated; the numerical behaviour lives on
//! [`Distribution`](crate::distributions::Distribution).

use std::str::FromStr;

use crate::error::StatError;

/// The eight supported families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DistributionKind {
    Binomial,
    Geometric,
    NegativeBinomial,
    Poisson,
    Gaussian,
    Gamma,
    Gev,
    #[cfg_attr(feature = "serde", serde(rename = "gp"))]
    GeneralizedPareto,
}

impl DistributionKind {
    /// All families in catalog order.
    pub const ALL: [DistributionKind; 8] = [
        DistributionKind::Binomial,
        DistributionKind::Geometric,
        DistributionKind::NegativeBinomial,
        DistributionKind::Poisson,
        DistributionKind::Gaussian,
        DistributionKind::Gamma,
        DistributionKind::Gev,
        DistributionKind::GeneralizedPareto,
    ];

    /// Stable string id used by the presentation layer.
    pub fn id(self) -> &'static str {
        self.descriptor().id
    }

    pub fn descriptor(self) -> &'static DistributionDescriptor {
        &CATALOG[self as usize]
    }

    pub fn parameters(self) -> &'static [ParameterSpec] {
        self.descriptor().parameters
    }

    /// Position of the named parameter in the positional parameter list.
    pub fn parameter_index(self, id: &str) -> Option<usize> {
        self.parameters().iter().position(|p| p.id == id)
    }

    pub fn support(self) -> Support {
        self.descriptor().support
    }
}

impl FromStr for DistributionKind {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATALOG
            .iter()
            .find(|d| d.id == s)
            .map(|d| d.kind)
            .ok_or_else(|| StatError::UnknownDistribution(s.to_string()))
    }
}

impl std::fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Whether a family is charted as bars (integer support) or a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Support {
    Discrete,
    Continuous,
}

/// Slider metadata for one distribution parameter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParameterSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
    /// Optional human explanation, one paragraph per entry.
    pub explanation: &'static [&'static str],
}

impl ParameterSpec {
    const fn new(
        id: &'static str,
        name: &'static str,
        min: f64,
        max: f64,
        step: f64,
        default: f64,
    ) -> Self {
        Self {
            id,
            name,
            min,
            max,
            step,
            default,
            explanation: &[],
        }
    }

    const fn explained(mut self, explanation: &'static [&'static str]) -> Self {
        self.explanation = explanation;
        self
    }

    /// Whether `value` lies inside the slider range.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Identity and metadata of one family.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DistributionDescriptor {
    pub kind: DistributionKind,
    pub id: &'static str,
    pub name: &'static str,
    pub summary: &'static str,
    pub support: Support,
    /// Ordered; positional parameter lists follow this order.
    pub parameters: &'static [ParameterSpec],
}

impl DistributionDescriptor {
    /// Default value of every parameter, in order.
    pub fn defaults(&self) -> Vec<f64> {
        self.parameters.iter().map(|p| p.default).collect()
    }
}

const PROBABILITY: ParameterSpec = ParameterSpec::new("p", "p (Probability)", 0.01, 0.99, 0.01, 0.5);

/// The full catalog, indexed by `DistributionKind as usize`.
pub static CATALOG: [DistributionDescriptor; 8] = [
    DistributionDescriptor {
        kind: DistributionKind::Binomial,
        id: "binomial",
        name: "Binomial Distribution",
        summary: "Counts successes in a fixed number of yes/no trials.",
        support: Support::Discrete,
        parameters: &[
            ParameterSpec::new("n", "N (Trials)", 1.0, 50.0, 1.0, 10.0),
            PROBABILITY,
        ],
    },
    DistributionDescriptor {
        kind: DistributionKind::Geometric,
        id: "geometric",
        name: "Geometric Distribution",
        summary: "Counts trials until the first success.",
        support: Support::Discrete,
        parameters: &[ParameterSpec { default: 0.3, ..PROBABILITY }],
    },
    DistributionDescriptor {
        kind: DistributionKind::NegativeBinomial,
        id: "negative-binomial",
        name: "Negative Binomial Distribution",
        summary: "Counts trials until a fixed number of successes.",
        support: Support::Discrete,
        parameters: &[
            ParameterSpec::new("r", "r (Successes)", 1.0, 20.0, 1.0, 3.0),
            ParameterSpec { default: 0.4, ..PROBABILITY },
        ],
    },
    DistributionDescriptor {
        kind: DistributionKind::Poisson,
        id: "poisson",
        name: "Poisson Distribution",
        summary: "Counts events in a fixed interval of time or space.",
        support: Support::Discrete,
        parameters: &[ParameterSpec::new("lambda", "λ (Average Rate)", 0.1, 20.0, 0.1, 3.0)],
    },
    DistributionDescriptor {
        kind: DistributionKind::Gaussian,
        id: "gaussian",
        name: "Gaussian (Normal) Distribution",
        summary: "The bell curve for continuous data centred on an average.",
        support: Support::Continuous,
        parameters: &[
            ParameterSpec::new("mu", "μ (Mean)", -10.0, 10.0, 0.5, 0.0),
            ParameterSpec::new("sigma", "σ (Std. Dev.)", 0.1, 10.0, 0.1, 1.0),
        ],
    },
    DistributionDescriptor {
        kind: DistributionKind::Gamma,
        id: "gamma",
        name: "Gamma Distribution",
        summary: "Waiting time until a given number of events occur.",
        support: Support::Continuous,
        parameters: &[
            ParameterSpec::new("alpha", "α (Shape)", 0.5, 20.0, 0.5, 2.0),
            ParameterSpec::new("beta", "β (Scale)", 0.5, 10.0, 0.5, 2.0),
        ],
    },
    DistributionDescriptor {
        kind: DistributionKind::Gev,
        id: "gev",
        name: "Generalized Extreme Value (GEV)",
        summary: "The maximum (or minimum) of a large block of observations.",
        support: Support::Continuous,
        parameters: &[
            ParameterSpec::new("xi", "ξ (Shape)", -0.5, 0.5, 0.05, 0.1).explained(&[
                "Controls the tail, which decides how likely extreme events are.",
                "ξ > 0 (Fréchet): heavy, unbounded upper tail, as in market crashes or record floods.",
                "ξ = 0 (Gumbel): light tail, as in annual maximum temperatures.",
                "ξ < 0 (Weibull): a hard upper limit, as in wind speed or lifespan.",
            ]),
            ParameterSpec::new("mu", "μ (Location)", -5.0, 5.0, 0.5, 0.0)
                .explained(&["Shifts the distribution along the x-axis."]),
            ParameterSpec::new("sigma", "σ (Scale)", 0.1, 5.0, 0.1, 1.0)
                .explained(&["Stretches or shrinks the distribution; must be positive."]),
        ],
    },
    DistributionDescriptor {
        kind: DistributionKind::GeneralizedPareto,
        id: "gp",
        name: "Generalized Pareto (GP)",
        summary: "Exceedances over a high threshold.",
        support: Support::Continuous,
        parameters: &[
            ParameterSpec::new("xi", "ξ (Shape)", -0.5, 1.0, 0.05, 0.2).explained(&[
                "Controls how extreme the exceedances above the threshold can be.",
                "ξ > 0: heavy, unbounded tail, common in financial losses.",
                "ξ = 0: exponential tail, the memoryless case.",
                "ξ < 0: short tail with a finite maximum exceedance.",
            ]),
            ParameterSpec::new("sigma", "σ (Scale)", 0.1, 5.0, 0.1, 1.0),
        ],
    },
];

/// Every descriptor in catalog order.
pub fn list_distributions() -> &'static [DistributionDescriptor] {
    &CATALOG
}
