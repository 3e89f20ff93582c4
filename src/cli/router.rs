//! Command routing and execution
//!
//! This module handles routing CLI commands to their respective implementations.

use crate::app::{load_storage_settings, storage_settings_for};
use crate::cli::args::Commands;
use crate::cli::output;
use crate::config::JobConfig;
use crate::error::{ErrorCode, JobError};
use crate::job::Pipeline;
use crate::sink::ResultSink;
use crate::storage::{Destination, StoreFactory};
use anyhow::{Context, Result};
use tracing::info;

/// Execute a CLI command based on the parsed arguments
pub async fn execute_command(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            samples,
            partitions,
            output,
            workers,
            seed,
            task_timeout,
            mode,
        } => {
            let mut config = JobConfig::from_output_uri(samples, partitions, &output)?
                .with_seed(seed)
                .with_task_timeout(task_timeout)
                .with_mode(mode);
            if let Some(workers) = workers {
                config = config.with_workers(workers);
            }
            run_job(config).await
        }
        Commands::Inspect { uri, json } => run_inspect(&uri, json).await,
        Commands::Config => {
            let settings = load_storage_settings()?;
            let text = serde_json::to_string_pretty(&settings.redacted())
                .context("Failed to render storage settings")?;
            println!("{}", text);
            Ok(())
        }
    }
}

async fn run_job(config: JobConfig) -> Result<()> {
    config.validate()?;
    let settings = storage_settings_for(&config.output)?;
    let store = StoreFactory::for_destination(&config.output, &settings)
        .await
        .map_err(|e| JobError::configuration(format!("Cannot open {}: {}", config.output, e)))?;

    println!("{}", output::banner(config.samples, config.output.uri()));

    let pipeline = Pipeline::new(config, store)?;
    let result = pipeline.estimate().await?;

    println!("{}", output::summary(&result));
    println!("Writing results to {}...", pipeline.destination());
    pipeline.commit(&result).await?;

    info!("Job finished");
    println!("Job completed successfully.");
    Ok(())
}

async fn run_inspect(uri: &str, json: bool) -> Result<()> {
    let dest = Destination::parse(uri).map_err(|e| {
        JobError::configuration_with_code(ErrorCode::CONFIG_UNSUPPORTED_SCHEME, e.to_string())
    })?;
    let settings = storage_settings_for(&dest)?;
    let store = StoreFactory::for_destination(&dest, &settings)
        .await
        .map_err(|e| JobError::configuration(format!("Cannot open {}: {}", dest, e)))?;

    let records = ResultSink::new(store).read(&dest).await?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&records).context("Failed to render rows")?
        );
    } else {
        println!("{}", output::record_table(&records));
    }
    Ok(())
}
