//! noisehue CLI - classify noise color from sample files.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "noisehue")]
#[command(author, version, about = "Noise color classification via power-law PSD fitting", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a sample file and classify its noise color
    Analyze(commands::analyze::AnalyzeArgs),

    /// Generate synthetic noise samples
    Generate(commands::generate::GenerateArgs),

    /// Show or create the configuration file
    Config(commands::config::ConfigArgs),
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
