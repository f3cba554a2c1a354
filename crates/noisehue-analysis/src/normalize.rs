//! Raw sample normalization.
//!
//! Raw input is unsigned 16-bit PCM stored as integers. Each value `v` maps to
//! `(v - 32768) / 32768`, so the midpoint lands on exactly zero and the full
//! range covers `[-1, 1 - 1/32768]`.

use crate::error::{InputError, Result};

/// Largest accepted raw sample value (unsigned 16-bit).
pub const RAW_MAX: u32 = u16::MAX as u32;

/// Raw value that maps to zero amplitude.
pub const RAW_MIDPOINT: f64 = 32768.0;

/// Divisor mapping the raw range onto `[-1, 1]`.
pub const RAW_HALF_RANGE: f64 = 32768.0;

/// Convert a single raw sample to a centered amplitude.
#[inline]
pub fn normalize_sample(raw: u16) -> f64 {
    (f64::from(raw) - RAW_MIDPOINT) / RAW_HALF_RANGE
}

/// Immutable, non-empty sequence of normalized amplitudes in `[-1, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSeries {
    samples: Vec<f64>,
}

impl SampleSeries {
    /// Normalize raw integer samples.
    ///
    /// Fails on an empty sequence or on any value above [`RAW_MAX`].
    pub fn from_raw(raw: &[u32]) -> Result<Self> {
        if raw.is_empty() {
            return Err(InputError::Empty);
        }

        let samples = raw
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                u16::try_from(value)
                    .map(normalize_sample)
                    .map_err(|_| InputError::OutOfRange {
                        index,
                        value,
                        max: RAW_MAX,
                    })
            })
            .collect::<Result<Vec<f64>>>()?;

        Ok(Self { samples })
    }

    /// Normalize samples already known to be in 16-bit range.
    pub fn from_u16(raw: &[u16]) -> Result<Self> {
        if raw.is_empty() {
            return Err(InputError::Empty);
        }
        Ok(Self {
            samples: raw.iter().map(|&v| normalize_sample(v)).collect(),
        })
    }

    /// Wrap pre-normalized amplitudes.
    ///
    /// Every value must be finite and within `[-1, 1]`.
    pub fn from_amplitudes(samples: Vec<f64>) -> Result<Self> {
        if samples.is_empty() {
            return Err(InputError::Empty);
        }
        if let Some((index, &value)) = samples
            .iter()
            .enumerate()
            .find(|&(_, x)| !(-1.0..=1.0).contains(x))
        {
            return Err(InputError::InvalidAmplitude { index, value });
        }
        Ok(Self { samples })
    }

    /// Normalized amplitudes.
    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    /// Number of samples (always at least one).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl AsRef<[f64]> for SampleSeries {
    fn as_ref(&self) -> &[f64] {
        &self.samples
    }
}
