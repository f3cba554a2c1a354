//! FFT wrapper and the Hann window

use rustfft::{FftPlanner, num_complex::Complex};
use std::f64::consts::PI;
use std::sync::Arc;

/// Periodic Hann window of `size` points: `0.5 * (1 - cos(2*pi*i/size))`.
///
/// A single-point window is `[1.0]`, since the periodic form would be all zeros.
pub fn hann_window(size: usize) -> Vec<f64> {
    if size <= 1 {
        return vec![1.0; size];
    }
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f64 / size as f64).cos()))
        .collect()
}

/// Forward FFT processor for real input of a fixed size
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f64>>,
    size: usize,
}

impl Fft {
    /// Create a new FFT processor for the given size
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        Self { fft, size }
    }

    /// Get FFT size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of one-sided output bins (DC through Nyquist)
    pub fn num_bins(&self) -> usize {
        self.size / 2 + 1
    }

    /// Perform forward FFT on real input
    ///
    /// Input is zero-padded or truncated to the FFT size. Returns the
    /// non-negative half of the spectrum (`size/2 + 1` bins).
    pub fn forward(&self, input: &[f64]) -> Vec<Complex<f64>> {
        let mut buffer: Vec<Complex<f64>> = input
            .iter()
            .take(self.size)
            .map(|&x| Complex::new(x, 0.0))
            .collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        buffer.truncate(self.num_bins());
        buffer
    }
}

/// Bin center frequencies for a one-sided spectrum of an `fft_size`-point transform
pub fn bin_frequencies(fft_size: usize, sample_rate: f64) -> Vec<f64> {
    let bin_width = sample_rate / fft_size as f64;
    (0..=fft_size / 2).map(|k| k as f64 * bin_width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_is_periodic() {
        let w = hann_window(16);

        // Periodic form: zero at 0, peak at n/2, symmetric about n/2, no trailing zero.
        assert!(w[0].abs() < 1e-12);
        assert!((w[8] - 1.0).abs() < 1e-12);
        for i in 1..8 {
            assert!((w[i] - w[16 - i]).abs() < 1e-12, "asymmetric at {i}");
        }
        assert!(w[15] > 0.0);
    }

    #[test]
    fn test_window_hann_single_point() {
        assert_eq!(hann_window(1), vec![1.0]);
        assert!(hann_window(0).is_empty());
    }

    #[test]
    fn test_short_input_is_zero_padded() {
        let fft = Fft::new(8);
        assert_eq!(fft.size(), 8);
        assert_eq!(fft.num_bins(), 5);

        // A single impulse has a flat magnitude spectrum.
        let spectrum = fft.forward(&[1.0]);
        assert_eq!(spectrum.len(), 5);
        for bin in &spectrum {
            assert!((bin.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_sine_peak_bin() {
        let n = 1024;
        let fft = Fft::new(n);
        let input: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * 32.0 * i as f64 / n as f64).sin())
            .collect();
        let spectrum = fft.forward(&input);
        let peak = spectrum
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.norm().total_cmp(&b.norm()))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 32);
    }

    #[test]
    fn test_bin_frequencies() {
        let freqs = bin_frequencies(8, 800.0);
        assert_eq!(freqs, vec![0.0, 100.0, 200.0, 300.0, 400.0]);

        let odd = bin_frequencies(5, 500.0);
        assert_eq!(odd, vec![0.0, 100.0, 200.0]);
    }
}
