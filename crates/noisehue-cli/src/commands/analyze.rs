//! Noise color analysis command.

use super::common::load_config;
use anyhow::Context;
use clap::Args;
use noisehue_analysis::{
    AnalysisConfig, AnalysisReport, PlotData, PsdMethod, SampleSeries, SampleStatistics, analyze,
};
use noisehue_io::load_series;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Text file with u16 samples (one per line)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Sample rate in Hz [default: 44100]
    #[arg(short, long)]
    rate: Option<f64>,

    /// Spectrum estimation method: welch or fft [default: welch]
    #[arg(short, long)]
    method: Option<PsdMethod>,

    /// Lower edge of the fitting band in Hz [default: 20]
    #[arg(long)]
    fmin: Option<f64>,

    /// Upper edge of the fitting band in Hz [default: rate / 4]
    #[arg(long)]
    fmax: Option<f64>,

    /// Save plot data to a .json or .csv file
    #[arg(short, long, value_name = "PATH")]
    save: Option<PathBuf>,

    /// Include a time-domain excerpt in the saved plot data
    #[arg(short, long)]
    time: bool,

    /// Config file to read instead of the user default
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the full report as JSON instead of text
    #[arg(long)]
    json: bool,
}

/// Output format for `--save`, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SaveFormat {
    Json,
    Csv,
}

impl SaveFormat {
    fn from_path(path: &Path) -> anyhow::Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => anyhow::bail!(
                "cannot infer save format from '{}' (use a .json or .csv extension)",
                path.display()
            ),
        }
    }
}

/// Command-line values override the config file, which overrides defaults.
fn resolve_config(args: &AnalyzeArgs, base: AnalysisConfig) -> AnalysisConfig {
    AnalysisConfig {
        sample_rate: args.rate.unwrap_or(base.sample_rate),
        method: args.method.unwrap_or(base.method),
        fmin: args.fmin.unwrap_or(base.fmin),
        fmax: args.fmax.or(base.fmax),
    }
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let file = load_config(args.config.as_deref())?;
    let config = resolve_config(&args, file.analysis_config());
    noisehue_config::validate_analysis(&config).context("invalid analysis parameters")?;

    // Fail on the save target before doing any work.
    let save_format = args.save.as_deref().map(SaveFormat::from_path).transpose()?;

    let series = load_series(&args.input)
        .with_context(|| format!("failed to load samples from {}", args.input.display()))?;

    let band = config.fit_band();
    if band.fmin > band.fmax {
        tracing::warn!(
            fmin = band.fmin,
            fmax = band.fmax,
            "fitting band is inverted; no fit is possible"
        );
    }

    let report = analyze(&series, &config)
        .with_context(|| format!("cannot analyze {}", args.input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Loaded {} samples from {}", series.len(), args.input.display());
        print_statistics(&report.statistics);
        println!("\nComputing spectrum using {} method...", config.method);
        print_fit(&report);
    }

    if let (Some(path), Some(format)) = (args.save.as_deref(), save_format) {
        let title = format!("Noise Spectrum: {}", args.input.display());
        let excerpt = args.time.then_some(file.output.excerpt_samples);
        save_plot_data(&report, &series, title, path, format, excerpt)?;
        if !args.json {
            println!("Plot data saved to {}", path.display());
        }
    } else if args.time {
        tracing::warn!("--time has no effect without --save");
    }

    Ok(())
}

fn print_statistics(stats: &SampleStatistics) {
    println!("\n=== Sample Statistics ===");
    println!("Mean: {:.6} (should be near 0)", stats.mean);
    println!("Std Dev: {:.6}", stats.std_dev);
    println!("Min: {:.6}", stats.min);
    println!("Max: {:.6}", stats.max);
    println!("RMS: {:.6}", stats.rms);

    if stats.has_clipping() {
        println!(
            "WARNING: {} samples ({:.2}%) may be clipped!",
            stats.clipped, stats.clipped_percent
        );
    }
}

fn print_fit(report: &AnalysisReport) {
    println!(
        "  {} frequency bins, fit band {:.1} - {:.1} Hz",
        report.spectrum.len(),
        report.band.fmin,
        report.band.fmax
    );

    match &report.fit {
        Some(fit) => {
            println!(
                "  Slope: {:.3} ({:.2} dB/octave), R^2 = {:.4}, {} points",
                fit.slope,
                fit.db_per_octave(),
                fit.r_squared,
                fit.frequencies.len()
            );
        }
        None => println!("  No power-law fit possible in this band"),
    }

    println!("\nDetected: {}", report.label);
}

fn save_plot_data(
    report: &AnalysisReport,
    series: &SampleSeries,
    title: String,
    path: &Path,
    format: SaveFormat,
    excerpt: Option<usize>,
) -> anyhow::Result<()> {
    let mut plot = PlotData::from_report(report, title);
    if let Some(num_samples) = excerpt {
        plot = plot.with_time_excerpt(series, num_samples);
    }

    match format {
        SaveFormat::Json => plot.write_json(path),
        SaveFormat::Csv => plot.write_csv(path),
    }
    .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), ?format, "plot data written");
    Ok(())
}
