use clap::Parser;
use pi_sampler::app::{handle_fatal_error, initialize_app, AppConfig};
use pi_sampler::cli::{execute_command, Cli};
use tracing::debug;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let app_config = AppConfig::new(cli.verbose);

    initialize_app(&app_config);

    if let Err(e) = execute_command(cli.command).await {
        handle_fatal_error(e, cli.verbose);
    }

    debug!("pi-sampler exiting normally");
}
