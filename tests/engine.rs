//! End-to-end checks through the string-keyed engine.

use approx::assert_abs_diff_eq;
use u_statlab::empirical::qq_reference_line;
use u_statlab::special::{normal_cdf, regularized_lower_gamma};
use u_statlab::{Distribution, DistributionKind, Engine, EngineConfig, StatError, Support};

fn is_cdf_series(series: &[u_statlab::SeriesPoint]) -> bool {
    series.windows(2).all(|w| w[0].x < w[1].x && w[0].y <= w[1].y + 1e-12)
        && series.iter().all(|pt| (0.0..=1.0).contains(&pt.y))
}

#[test]
fn every_catalog_entry_produces_series_at_defaults() {
    let engine = Engine::seeded(0);
    for descriptor in engine.list_distributions() {
        let pdf = engine.pdf_series(descriptor.id, &[]).unwrap();
        let cdf = engine.cdf_series(descriptor.id, &[]).unwrap();
        assert!(!pdf.is_empty(), "{} pdf", descriptor.id);
        assert!(is_cdf_series(&cdf), "{} cdf", descriptor.id);
        if descriptor.support == Support::Discrete {
            assert!(pdf.iter().all(|pt| pt.x.fract() == 0.0), "{} x", descriptor.id);
        }
    }
}

#[test]
fn slider_extremes_stay_finite() {
    let engine = Engine::seeded(0);
    for descriptor in engine.list_distributions() {
        for spec in descriptor.parameters {
            for value in [spec.min, spec.max] {
                let params = [(spec.id, value)];
                let pdf = engine.pdf_series(descriptor.id, &params).unwrap();
                let cdf = engine.cdf_series(descriptor.id, &params).unwrap();
                assert!(
                    pdf.iter().all(|pt| pt.y.is_finite() && pt.y >= 0.0),
                    "{}.{}={value} pdf",
                    descriptor.id,
                    spec.id
                );
                assert!(is_cdf_series(&cdf), "{}.{}={value} cdf", descriptor.id, spec.id);
            }
        }
    }
}

#[test]
fn gaussian_series_match_closed_form() {
    let engine = Engine::seeded(0);
    let cdf = engine
        .cdf_series("gaussian", &[("mu", -2.0), ("sigma", 0.5)])
        .unwrap();
    for pt in cdf {
        assert_abs_diff_eq!(pt.y, normal_cdf((pt.x + 2.0) / 0.5), epsilon = 1e-12);
    }
}

#[test]
fn gamma_cdf_tracks_incomplete_gamma() {
    let engine = Engine::seeded(0);
    let cdf = engine
        .cdf_series("gamma", &[("alpha", 4.0), ("beta", 1.5)])
        .unwrap();
    for pt in cdf {
        assert_abs_diff_eq!(pt.y, regularized_lower_gamma(4.0, pt.x / 1.5), epsilon = 1e-2);
    }
}

#[test]
fn sample_ecdf_and_qq_pipeline() {
    let mut engine = Engine::with_config(
        u_statlab::random::create_rng(2024),
        EngineConfig::default().with_default_sample_size(400),
    );
    let sample = engine
        .sample("gaussian", &[("mu", 5.0), ("sigma", 2.0)])
        .unwrap();
    assert_eq!(sample.len(), 400);

    let ecdf = engine.ecdf(&sample);
    assert_eq!(ecdf.steps.first().unwrap().cdf, 0.0);
    assert_eq!(ecdf.steps.last().unwrap().cdf, 1.0);
    // Empirical and true CDF agree at the mean within a loose band.
    assert!((ecdf.value_at(5.0) - 0.5).abs() < 0.1);

    let pairs = engine.qq_pairs(&sample);
    assert_eq!(pairs.len(), 400);
    let line = qq_reference_line(&pairs).unwrap();
    assert!((line.slope - 2.0).abs() < 0.5);
    assert!((line.intercept - 5.0).abs() < 0.5);
}

#[test]
fn discrete_samples_lie_on_support() {
    let mut engine = Engine::seeded(5);
    let sample = engine
        .sample_n("negative-binomial", &[("r", 4.0), ("p", 0.3)], 300)
        .unwrap();
    assert!(sample.values().iter().all(|&k| k >= 4.0 && k.fract() == 0.0));
    let sample = engine.sample_n("binomial", &[("n", 12.0)], 300).unwrap();
    assert!(sample.values().iter().all(|&k| (0.0..=12.0).contains(&k)));
}

#[test]
fn sample_mean_tracks_analytical_mean() {
    let mut engine = Engine::seeded(11);
    let dist = engine.distribution("gp", &[("xi", 0.2), ("sigma", 1.0)]).unwrap();
    let sample = engine.sample_n("gp", &[("xi", 0.2), ("sigma", 1.0)], 500).unwrap();
    let mean = sample.mean().unwrap();
    assert!((mean - dist.mean()).abs() < 0.3, "mean {mean} vs {}", dist.mean());
}

#[test]
fn boundary_errors() {
    let mut engine = Engine::seeded(0);
    assert!(matches!(
        engine.sample("weibull", &[]),
        Err(StatError::UnknownDistribution(_))
    ));
    assert!(matches!(
        engine.pdf_series("gev", &[("shape", 0.1)]),
        Err(StatError::UnknownParameter { .. })
    ));
    assert!(matches!(
        engine.sample_n("gev", &[], 10_000),
        Err(StatError::SampleSize { .. })
    ));
    assert!(matches!(
        Distribution::from_params(DistributionKind::Gaussian, &[0.0]),
        Err(StatError::ParameterCount { .. })
    ));
}

#[test]
fn f_quantile_round_trip_through_engine() {
    let engine = Engine::seeded(0);
    let q = engine.f_quantile(0.95, 1.0, 10.0);
    assert!((q - 4.965).abs() < 0.05, "q = {q}");
    assert_eq!(engine.f_quantile(0.0, 1.0, 10.0), 0.0);
    assert!(engine.f_quantile(0.5, -1.0, 10.0).is_nan());
}
