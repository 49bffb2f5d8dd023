//! Empirical artifacts of a sorted sample: the ECDF step function and
//! Q-Q plot pairs.
//!
//! Both functions expect ascending input, as produced by
//! [`Sample`](crate::sampler::Sample).

use crate::special::normal_quantile;

/// Minimum theoretical quartile gap for a usable reference line.
const QUARTILE_GAP_EPSILON: f64 = 1e-6;

/// Fewest pairs for which a quartile line is fitted.
const MIN_REFERENCE_PAIRS: usize = 4;

/// One vertex of the ECDF: the function equals `cdf` from `x` up to the
/// next step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EcdfStep {
    pub x: f64,
    pub cdf: f64,
}

/// Right-continuous empirical CDF with sentinel steps one unit outside the
/// data range.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Ecdf {
    pub steps: Vec<EcdfStep>,
}

impl Ecdf {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// `F̂(x)`: the cdf of the last step at or before `x`, 0 before the
    /// first.
    pub fn value_at(&self, x: f64) -> f64 {
        let idx = self.steps.partition_point(|s| s.x <= x);
        if idx == 0 {
            0.0
        } else {
            self.steps[idx - 1].cdf
        }
    }

    /// Chart vertices with the vertical risers made explicit: each step
    /// after the first contributes `(x, previous cdf)` then `(x, cdf)`.
    ///
    /// # Examples
    /// ```
    /// use u_statlab::empirical::ecdf;
    /// let line = ecdf(&[1.0, 2.0]).polyline();
    /// let ys: Vec<f64> = line.iter().map(|p| p.y).collect();
    /// assert_eq!(ys, vec![0.0, 0.0, 0.5, 0.5, 1.0, 1.0, 1.0]);
    /// ```
    pub fn polyline(&self) -> Vec<crate::SeriesPoint> {
        use crate::SeriesPoint;
        let mut out = Vec::with_capacity(self.steps.len() * 2);
        let mut iter = self.steps.iter();
        let Some(first) = iter.next() else {
            return out;
        };
        out.push(SeriesPoint::new(first.x, first.cdf));
        let mut prev = first.cdf;
        for step in iter {
            out.push(SeriesPoint::new(step.x, prev));
            out.push(SeriesPoint::new(step.x, step.cdf));
            prev = step.cdf;
        }
        out
    }
}

/// Builds the ECDF of an ascending sample.
///
/// Emits a sentinel `(min − 1, 0)`, then one step per order statistic at
/// `(i + 1)/n`; equal values share one step holding the larger cdf. Ends
/// with a sentinel `(max + 1, 1)`. An empty sample gives an empty ECDF.
///
/// # Examples
/// ```
/// use u_statlab::empirical::ecdf;
/// let e = ecdf(&[1.0, 2.0, 2.0, 3.0]);
/// let cdfs: Vec<f64> = e.steps.iter().map(|s| s.cdf).collect();
/// assert_eq!(cdfs, vec![0.0, 0.25, 0.75, 1.0, 1.0]);
/// ```
pub fn ecdf(sorted: &[f64]) -> Ecdf {
    let (Some(&lo), Some(&hi)) = (sorted.first(), sorted.last()) else {
        return Ecdf::default();
    };
    let n = sorted.len() as f64;
    let mut steps = Vec::with_capacity(sorted.len() + 2);
    steps.push(EcdfStep { x: lo - 1.0, cdf: 0.0 });
    for (i, &x) in sorted.iter().enumerate() {
        let cdf = (i + 1) as f64 / n;
        // i > 0 keeps the first value off the sentinel when `lo − 1 == lo`.
        if i > 0 && sorted[i - 1] == x {
            if let Some(last) = steps.last_mut() {
                last.cdf = cdf;
            }
        } else {
            steps.push(EcdfStep { x, cdf });
        }
    }
    steps.push(EcdfStep { x: hi + 1.0, cdf: 1.0 });
    Ecdf { steps }
}

/// One Q-Q point: an order statistic against the reference quantile at
/// its plotting position.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QqPair {
    pub sample_quantile: f64,
    pub theoretical_quantile: f64,
}

/// Normal Q-Q pairs with plotting positions `(i + 0.5)/n`.
pub fn qq_pairs(sorted: &[f64]) -> Vec<QqPair> {
    qq_pairs_with(sorted, normal_quantile)
}

/// Q-Q pairs against an arbitrary reference quantile function.
///
/// # Examples
/// ```
/// use u_statlab::empirical::qq_pairs_with;
/// // Uniform(0, 1) reference
/// let pairs = qq_pairs_with(&[0.1, 0.5, 0.9], |p| p);
/// assert!((pairs[0].theoretical_quantile - 1.0 / 6.0).abs() < 1e-12);
/// ```
pub fn qq_pairs_with<Q>(sorted: &[f64], quantile: Q) -> Vec<QqPair>
where
    Q: Fn(f64) -> f64,
{
    let n = sorted.len() as f64;
    sorted
        .iter()
        .enumerate()
        .map(|(i, &x)| QqPair {
            sample_quantile: x,
            theoretical_quantile: quantile((i as f64 + 0.5) / n),
        })
        .collect()
}

/// Line `sample = slope·theoretical + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReferenceLine {
    pub slope: f64,
    pub intercept: f64,
}

impl ReferenceLine {
    pub fn at(&self, theoretical: f64) -> f64 {
        self.slope * theoretical + self.intercept
    }
}

/// Line through the first- and third-quartile pairs (indices `⌊0.25n⌋`
/// and `⌊0.75n⌋`).
///
/// Returns `None` for fewer than four pairs or when the two theoretical
/// quartiles coincide.
pub fn qq_reference_line(pairs: &[QqPair]) -> Option<ReferenceLine> {
    let n = pairs.len();
    if n < MIN_REFERENCE_PAIRS {
        return None;
    }
    let q1 = pairs[n / 4];
    let q3 = pairs[3 * n / 4];
    let run = q3.theoretical_quantile - q1.theoretical_quantile;
    if run.abs() < QUARTILE_GAP_EPSILON {
        return None;
    }
    let slope = (q3.sample_quantile - q1.sample_quantile) / run;
    Some(ReferenceLine {
        slope,
        intercept: q1.sample_quantile - slope * q1.theoretical_quantile,
    })
}
