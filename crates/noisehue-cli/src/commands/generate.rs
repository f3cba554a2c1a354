//! Synthetic noise generation command.

use anyhow::Context;
use clap::{Args, ValueEnum};
use noisehue_analysis::NoiseKind;
use noisehue_analysis::generator::generate;
use noisehue_io::write_samples;
use std::path::PathBuf;

/// Initial PRNG state when no seed is given.
const DEFAULT_SEED: u64 = 0x1234_5678;

/// Noise colors for CLI
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum CliNoiseKind {
    #[default]
    White,
    Red,
}

impl From<CliNoiseKind> for NoiseKind {
    fn from(kind: CliNoiseKind) -> Self {
        match kind {
            CliNoiseKind::White => NoiseKind::White,
            CliNoiseKind::Red => NoiseKind::Red,
        }
    }
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Output sample file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Noise color
    #[arg(short = 't', long = "type", value_enum, default_value_t = CliNoiseKind::White)]
    kind: CliNoiseKind,

    /// Number of samples
    #[arg(short = 'n', long, default_value = "1000000")]
    num_samples: usize,

    /// Sample rate in Hz (sets the red noise corner)
    #[arg(short = 's', long, default_value = "44100")]
    sample_rate: u32,

    /// PRNG seed
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.sample_rate > 0, "sample rate must be positive");

    let kind = NoiseKind::from(args.kind);
    println!("Generating {kind:?} noise...");
    println!(
        "  {} samples at {} Hz, seed {}",
        args.num_samples, args.sample_rate, args.seed
    );

    let samples = generate(kind, args.num_samples, args.sample_rate, args.seed);
    write_samples(&args.output, &samples)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!("Wrote {} samples to {}", samples.len(), args.output.display());
    Ok(())
}
