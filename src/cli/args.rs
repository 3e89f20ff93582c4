//! CLI argument structures
//!
//! This module defines the command-line interface of pi-sampler: the main
//! CLI structure and its subcommands.

use crate::config::{DEFAULT_OUTPUT, DEFAULT_PARTITIONS, DEFAULT_SAMPLES};
use crate::storage::WriteMode;
use clap::{Parser, Subcommand};
use std::time::Duration;

/// Estimate pi by Monte Carlo sampling and store the result
#[derive(Parser)]
#[command(name = "pi-sampler")]
#[command(about = "pi-sampler - Distributed Monte Carlo estimation of pi", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run an estimation job and write its result
    #[command(name = "run")]
    Run {
        /// Total number of points to sample
        #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLES)]
        samples: u64,

        /// Number of partitions the samples are split into
        #[arg(short = 'p', long, default_value_t = DEFAULT_PARTITIONS)]
        partitions: usize,

        /// Destination URI (path, file://, memory://, s3:// or s3a://)
        #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT)]
        output: String,

        /// Number of parallel workers (defaults to available CPUs)
        #[arg(short = 'w', long)]
        workers: Option<usize>,

        /// Seed for reproducible sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Fail a partition that runs longer than this (e.g. "30s", "2m")
        #[arg(long, value_parser = parse_duration)]
        task_timeout: Option<Duration>,

        /// What to do when the destination already holds data
        #[arg(long, value_enum, default_value_t = WriteMode::Overwrite)]
        mode: WriteMode,
    },

    /// Print the rows stored at a destination
    #[command(name = "inspect")]
    Inspect {
        /// Destination URI to read
        uri: String,

        /// Emit rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the storage settings resolved from the environment
    #[command(name = "config")]
    Config,
}

fn parse_duration(value: &str) -> Result<Duration, String> {
    humantime_serde::re::humantime::parse_duration(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["pi-sampler", "run"]).unwrap();
        match cli.command {
            Commands::Run {
                samples,
                partitions,
                output,
                workers,
                seed,
                task_timeout,
                mode,
            } => {
                assert_eq!(samples, 100_000_000);
                assert_eq!(partitions, 200);
                assert_eq!(output, "s3a://lakehouse/pi_estimation_results");
                assert!(workers.is_none());
                assert!(seed.is_none());
                assert!(task_timeout.is_none());
                assert_eq!(mode, WriteMode::Overwrite);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_run_overrides() {
        let cli = Cli::try_parse_from([
            "pi-sampler",
            "-vv",
            "run",
            "--samples",
            "1000",
            "--partitions",
            "4",
            "--task-timeout",
            "1m 30s",
            "--mode",
            "error-if-exists",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Run {
                samples,
                partitions,
                task_timeout,
                mode,
                ..
            } => {
                assert_eq!(samples, 1000);
                assert_eq!(partitions, 4);
                assert_eq!(task_timeout, Some(Duration::from_secs(90)));
                assert_eq!(mode, WriteMode::ErrorIfExists);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_rejects_negative_samples() {
        assert!(Cli::try_parse_from(["pi-sampler", "run", "--samples", "-5"]).is_err());
    }

    #[test]
    fn test_rejects_bad_duration() {
        assert!(Cli::try_parse_from(["pi-sampler", "run", "--task-timeout", "soon"]).is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["pi-sampler"]).is_err());
    }
}
