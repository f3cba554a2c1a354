//! Synthetic noise sources producing raw unsigned 16-bit samples.
//!
//! Output uses the same integer convention as the analyzer's input files, so
//! generated data can be written out and fed straight back in.

use serde::{Deserialize, Serialize};

/// A source of raw 16-bit samples.
pub trait NoiseGenerator {
    /// Produce the next raw sample.
    fn sample(&mut self) -> u16;

    /// Produce `n` samples.
    fn take_samples(&mut self, n: usize) -> Vec<u16> {
        (0..n).map(|_| self.sample()).collect()
    }
}

/// xorshift64* PRNG. Deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Create a generator. A zero seed is replaced, since zero is a fixed point.
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        Self { state }
    }

    /// Next 64 random bits.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}

/// Uniform white noise over the full 16-bit range.
#[derive(Debug, Clone)]
pub struct WhiteNoise {
    rng: Xorshift64,
}

impl WhiteNoise {
    /// Create a seeded white noise source.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Xorshift64::new(seed),
        }
    }
}

impl NoiseGenerator for WhiteNoise {
    fn sample(&mut self) -> u16 {
        (self.rng.next_u64() >> 48) as u16
    }
}

/// Red (Brownian) noise from a leaky integrator over white noise.
///
/// Each step adds white noise scaled by `1/sqrt(rate)` and leaks by
/// `1 - 1/rate` (about a 1 Hz corner), then soft-clips with `tanh`.
#[derive(Debug, Clone)]
pub struct RedNoise {
    white: WhiteNoise,
    accumulator: f64,
    scale: f64,
    leak: f64,
}

impl RedNoise {
    /// Create a seeded red noise source for the given sample rate.
    pub fn new(seed: u64, sample_rate: u32) -> Self {
        let rate = f64::from(sample_rate.max(1));
        Self {
            white: WhiteNoise::new(seed),
            accumulator: 0.0,
            scale: 1.0 / rate.sqrt(),
            leak: 1.0 - 1.0 / rate,
        }
    }
}

impl NoiseGenerator for RedNoise {
    fn sample(&mut self) -> u16 {
        let white = crate::normalize::normalize_sample(self.white.sample());

        self.accumulator += white * self.scale;
        self.accumulator *= self.leak;

        let output = self.accumulator.tanh() * 32767.0 + 32768.0;
        output.clamp(0.0, 65535.0) as u16
    }
}

/// Noise color a generator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseKind {
    /// Flat spectrum.
    #[default]
    White,
    /// `1/f^2` spectrum above ~1 Hz.
    Red,
}

impl NoiseKind {
    /// Build a boxed generator of this kind.
    pub fn build(&self, seed: u64, sample_rate: u32) -> Box<dyn NoiseGenerator> {
        match self {
            NoiseKind::White => Box::new(WhiteNoise::new(seed)),
            NoiseKind::Red => Box::new(RedNoise::new(seed, sample_rate)),
        }
    }
}

/// Generate `n` raw samples of the given kind.
pub fn generate(kind: NoiseKind, n: usize, sample_rate: u32, seed: u64) -> Vec<u16> {
    kind.build(seed, sample_rate).take_samples(n)
}
