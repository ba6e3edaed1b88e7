use anyhow::Result;
use clap::Parser;

use ledgerlink_cli::commands::{self, Cli};
use ledgerlink_rs::ValidatorClient;

mod telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard = telemetry::init_telemetry(cli.verbose)?;

    let config = cli.resolve_config()?;
    tracing::debug!(
        host = %config.host,
        port = config.port,
        chunk_size = config.chunk_size,
        "Using validator"
    );

    let client = ValidatorClient::from_config(&config)?;

    match commands::run(&client, &cli.command).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            drop(_guard);
            std::process::exit(1);
        }
    }
}
