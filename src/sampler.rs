//! Single draws and sorted i.i.d. samples.
//!
//! A [`Sample`] is an owned, ascending snapshot. Regenerating produces a
//! new value; nothing here mutates a sample after construction.

use rand::Rng;

use crate::distributions::Distribution;
use crate::stats;

/// An ascending sequence of draws.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Sample {
    values: Vec<f64>,
}

impl Sample {
    /// Sorts `values` ascending (NaN last) and wraps them.
    ///
    /// # Examples
    /// ```
    /// use u_statlab::Sample;
    /// let s = Sample::from_values(vec![3.0, 1.0, 2.0]);
    /// assert_eq!(s.values(), &[1.0, 2.0, 3.0]);
    /// ```
    pub fn from_values(mut values: Vec<f64>) -> Self {
        values.sort_by(f64::total_cmp);
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    /// Smallest draw; `None` for an empty sample.
    pub fn min(&self) -> Option<f64> {
        self.values.first().copied()
    }

    /// Largest draw; `None` for an empty sample.
    pub fn max(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn mean(&self) -> Option<f64> {
        stats::mean(&self.values)
    }

    /// Sample variance with Bessel's correction.
    pub fn variance(&self) -> Option<f64> {
        stats::variance(&self.values)
    }

    pub fn std_dev(&self) -> Option<f64> {
        stats::std_dev(&self.values)
    }
}

impl AsRef<[f64]> for Sample {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// One variate; `NaN` for invalid parameters.
pub fn sample_one<R: Rng + ?Sized>(dist: &Distribution, rng: &mut R) -> f64 {
    dist.sample(rng)
}

/// `n` i.i.d. draws, sorted ascending.
///
/// Invalid parameters give an empty sample.
///
/// # Examples
/// ```
/// use u_statlab::Distribution;
/// use u_statlab::random::create_rng;
/// use u_statlab::sampler::sample_n;
/// let mut rng = create_rng(42);
/// let s = sample_n(&Distribution::Poisson { lambda: 3.0 }, 50, &mut rng);
/// assert_eq!(s.len(), 50);
/// assert!(s.values().windows(2).all(|w| w[0] <= w[1]));
/// ```
pub fn sample_n<R: Rng + ?Sized>(dist: &Distribution, n: usize, rng: &mut R) -> Sample {
    if !dist.is_valid() {
        trace_debug!(distribution = %dist.kind(), n, "invalid parameters, empty sample");
        return Sample::default();
    }
    let values = (0..n).map(|_| dist.sample(rng)).collect();
    Sample::from_values(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_sample_n_sorted_and_sized() {
        let mut rng = create_rng(5);
        let d = Distribution::Gaussian { mu: 0.0, sigma: 1.0 };
        let s = sample_n(&d, 200, &mut rng);
        assert_eq!(s.len(), 200);
        assert!(s.values().windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(s.min(), Some(s.values()[0]));
        assert_eq!(s.max(), Some(s.values()[199]));
    }

    #[test]
    fn test_sample_n_invalid_is_empty() {
        let mut rng = create_rng(5);
        let s = sample_n(&Distribution::Geometric { p: 1.5 }, 100, &mut rng);
        assert!(s.is_empty());
        assert_eq!(s.mean(), None);
    }

    #[test]
    fn test_sample_n_zero() {
        let mut rng = create_rng(5);
        assert!(sample_n(&Distribution::Poisson { lambda: 2.0 }, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_seeded_samples_reproducible() {
        let d = Distribution::Gev {
            xi: 0.1,
            mu: 0.0,
            sigma: 1.0,
        };
        let a = sample_n(&d, 100, &mut create_rng(77));
        let b = sample_n(&d, 100, &mut create_rng(77));
        assert_eq!(a, b);
    }

    #[test]
    fn test_summary_tracks_analytical_moments() {
        let mut rng = create_rng(8);
        let d = Distribution::Gamma { alpha: 3.0, beta: 1.5 };
        let s = sample_n(&d, 5000, &mut rng);
        let mean = s.mean().unwrap();
        let var = s.variance().unwrap();
        assert!((mean - d.mean()).abs() < 0.15, "mean {mean}");
        assert!((var - d.variance()).abs() < 0.8, "variance {var}");
        assert!((s.std_dev().unwrap() - var.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_sample_one_invalid_is_nan() {
        let mut rng = create_rng(1);
        let d = Distribution::Gaussian { mu: 0.0, sigma: -1.0 };
        assert!(sample_one(&d, &mut rng).is_nan());
    }

    #[test]
    fn test_from_values_orders_nan_last() {
        let s = Sample::from_values(vec![2.0, f64::NAN, -1.0]);
        assert_eq!(s.values()[0], -1.0);
        assert_eq!(s.values()[1], 2.0);
        assert!(s.values()[2].is_nan());
        assert_eq!(s.as_ref().len(), 3);
        assert_eq!(s.into_vec().len(), 3);
    }
}
