//! Integration tests for noisehue-analysis.
//!
//! Exercises the full pipeline on synthetic white and Brownian noise with
//! known spectral slopes, under both PSD methods.

use noisehue_analysis::generator::{NoiseKind, Xorshift64, generate};
use noisehue_analysis::{
    AnalysisConfig, FitBand, NoiseColor, NoiseLabel, PsdMethod, SampleSeries, analyze,
    estimate_psd, fit_power_law,
};

const SAMPLE_RATE: f64 = 44100.0;
const N: usize = 1 << 16;
const METHODS: [PsdMethod; 2] = [PsdMethod::WindowedAverage, PsdMethod::DirectTransform];

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Uniform white noise through the raw u16 path.
fn white_series(seed: u64) -> SampleSeries {
    SampleSeries::from_u16(&generate(NoiseKind::White, N, 44100, seed)).unwrap()
}

/// Uniform value in `[-1, 1)` from the top 53 bits.
fn bipolar(rng: &mut Xorshift64) -> f64 {
    let unit = (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
    unit * 2.0 - 1.0
}

/// Cumulative sum of white noise, scaled into [-1, 1].
fn brownian_series(seed: u64) -> SampleSeries {
    let mut rng = Xorshift64::new(seed);
    let mut acc = 0.0;
    let walk: Vec<f64> = (0..N)
        .map(|_| {
            acc += bipolar(&mut rng);
            acc
        })
        .collect();
    let peak = walk.iter().fold(0.0f64, |m, x| m.max(x.abs())).max(1e-12);
    SampleSeries::from_amplitudes(walk.into_iter().map(|x| x / peak).collect()).unwrap()
}

fn slope_of(series: &SampleSeries, method: PsdMethod) -> f64 {
    let report = analyze(series, &AnalysisConfig::default().method(method)).unwrap();
    report.slope().expect("fit should exist")
}

// ===========================================================================
// Classification of synthetic noise
// ===========================================================================

#[test]
fn white_noise_classifies_as_white() {
    let series = white_series(0xC0FFEE);
    for method in METHODS {
        let report = analyze(&series, &AnalysisConfig::default().method(method)).unwrap();
        let slope = report.slope().unwrap();
        assert!(slope.abs() < 0.3, "{method}: slope {slope}");
        assert_eq!(report.label.color(), Some(NoiseColor::White), "{method}");
        assert!(report.label.to_string().starts_with("White noise"));
    }
}

#[test]
fn brownian_noise_classifies_as_red() {
    let series = brownian_series(0xBEEF);
    for method in METHODS {
        let slope = slope_of(&series, method);
        assert!((slope + 2.0).abs() < 0.3, "{method}: slope {slope}");
        assert_eq!(NoiseColor::from_slope(slope), NoiseColor::RedBrown);
    }
}

#[test]
fn red_generator_classifies_as_red() {
    let raw: Vec<u32> = generate(NoiseKind::Red, N, 44100, 11)
        .into_iter()
        .map(u32::from)
        .collect();
    let series = SampleSeries::from_raw(&raw).unwrap();
    let report = analyze(&series, &AnalysisConfig::default()).unwrap();
    assert_eq!(
        report.label.color(),
        Some(NoiseColor::RedBrown),
        "got {}",
        report.label
    );
}

#[test]
fn welch_fit_is_tighter_than_direct() {
    // Segment averaging shrinks the scatter of log-power around the power law.
    let series = brownian_series(99);
    let welch = analyze(&series, &AnalysisConfig::default()).unwrap();
    let direct = analyze(
        &series,
        &AnalysisConfig::default().method(PsdMethod::DirectTransform),
    )
    .unwrap();
    let welch_r2 = welch.fit.unwrap().r_squared;
    let direct_r2 = direct.fit.unwrap().r_squared;
    assert!(welch_r2 > direct_r2, "welch {welch_r2}, direct {direct_r2}");
    assert!(welch.spectrum.len() < direct.spectrum.len());
}

// ===========================================================================
// Spectrum invariants
// ===========================================================================

#[test]
fn spectrum_shape_for_both_methods() {
    let series = brownian_series(5);
    for method in METHODS {
        let spectrum = estimate_psd(&series, SAMPLE_RATE, method).unwrap();
        assert_eq!(spectrum.frequencies.len(), spectrum.power.len());
        assert!(spectrum.frequencies.iter().all(|&f| f >= 0.0));
        assert!(spectrum.power.iter().all(|&p| p >= 0.0));
        assert_eq!(spectrum.frequencies[0], 0.0);
        assert!((spectrum.max_frequency() - SAMPLE_RATE / 2.0).abs() < 1e-9);
    }
}

#[test]
fn welch_resolution_is_capped() {
    let spectrum = estimate_psd(&white_series(1), SAMPLE_RATE, PsdMethod::WindowedAverage).unwrap();
    assert_eq!(spectrum.len(), 4096 / 2 + 1);

    let short = SampleSeries::from_u16(&generate(NoiseKind::White, 800, 44100, 1)).unwrap();
    let spectrum = estimate_psd(&short, SAMPLE_RATE, PsdMethod::WindowedAverage).unwrap();
    assert_eq!(spectrum.len(), 100 / 2 + 1);
}

// ===========================================================================
// Infeasible fits
// ===========================================================================

#[test]
fn inverted_band_yields_unknown() {
    let series = white_series(2);
    let config = AnalysisConfig::default().band(5000.0, Some(1000.0));
    let report = analyze(&series, &config).unwrap();
    assert!(report.fit.is_none());
    assert_eq!(report.label, NoiseLabel::Unknown);
}

#[test]
fn band_narrower_than_one_bin_yields_unknown() {
    let spectrum = estimate_psd(&white_series(3), SAMPLE_RATE, PsdMethod::WindowedAverage).unwrap();
    // Welch bins are ~10.8 Hz apart; this band holds at most one.
    let band = FitBand {
        fmin: 1000.0,
        fmax: 1005.0,
    };
    assert!(fit_power_law(&spectrum, band).is_none());
}

#[test]
fn tiny_input_yields_unknown() {
    // Long enough to estimate, far too short for any bin above 20 Hz
    // to survive with the default band.
    let series = SampleSeries::from_raw(&[0, 65535, 0, 65535]).unwrap();
    let report = analyze(&series, &AnalysisConfig::default()).unwrap();
    assert_eq!(report.label, NoiseLabel::Unknown);
}

// ===========================================================================
// Determinism
// ===========================================================================

#[test]
fn repeated_runs_are_identical() {
    let series = brownian_series(77);
    for method in METHODS {
        let config = AnalysisConfig::default().method(method);
        let a = analyze(&series, &config).unwrap();
        let b = analyze(&series, &config).unwrap();
        assert_eq!(a.label, b.label);
        assert_eq!(a.slope(), b.slope());
        assert_eq!(a, b);
    }
}
