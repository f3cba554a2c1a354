//! Configuration file commands.

use super::common::load_config;
use anyhow::Context;
use clap::{Args, Subcommand};
use noisehue_config::paths::CONFIG_FILE_NAME;
use noisehue_config::{ConfigFile, default_config_path, ensure_user_config_dir};
use std::path::PathBuf;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show {
        /// Config file to read instead of the user default
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Write a config file populated with defaults
    Init {
        /// Destination (defaults to the user config path)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the default config file location
    Path,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show { config } => {
            let file = load_config(config.as_deref())?;
            print!("{}", file.to_toml()?);
        }

        ConfigCommand::Init { path, force } => {
            let path = match path {
                Some(path) => path,
                None => ensure_user_config_dir()?.join(CONFIG_FILE_NAME),
            };
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            ConfigFile::default()
                .save(&path)
                .with_context(|| format!("failed to initialize {}", path.display()))?;
            println!("Wrote default config to {}", path.display());
        }

        ConfigCommand::Path => {
            println!("{}", default_config_path().display());
        }
    }

    Ok(())
}
