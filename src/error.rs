//! Errors raised at the string-keyed boundary of the engine.
//!
//! Numerically invalid parameter values are *not* errors: generators
//! answer them with an empty series or a `NaN` sentinel. The variants here
//! cover lookups that cannot be answered at all.

/// Error type for catalog lookups and request shapes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatError {
    /// The id does not name a distribution in the catalog.
    #[error("unknown distribution '{0}'")]
    UnknownDistribution(String),
    /// A named parameter does not belong to the distribution.
    #[error("distribution '{distribution}' has no parameter '{parameter}'")]
    UnknownParameter {
        distribution: &'static str,
        parameter: String,
    },
    /// A positional parameter list has the wrong length.
    #[error("distribution '{distribution}' takes {expected} parameters, got {got}")]
    ParameterCount {
        distribution: &'static str,
        expected: usize,
        got: usize,
    },
    /// A sample-size request exceeds the configured maximum.
    #[error("sample size {requested} exceeds the maximum of {max}")]
    SampleSize { requested: usize, max: usize },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, StatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = StatError::UnknownDistribution("cauchy".into());
        assert_eq!(e.to_string(), "unknown distribution 'cauchy'");

        let e = StatError::UnknownParameter {
            distribution: "poisson",
            parameter: "mu".into(),
        };
        assert_eq!(e.to_string(), "distribution 'poisson' has no parameter 'mu'");

        let e = StatError::ParameterCount {
            distribution: "gev",
            expected: 3,
            got: 2,
        };
        assert_eq!(e.to_string(), "distribution 'gev' takes 3 parameters, got 2");

        let e = StatError::SampleSize {
            requested: 1000,
            max: 500,
        };
        assert_eq!(e.to_string(), "sample size 1000 exceeds the maximum of 500");
    }
}
