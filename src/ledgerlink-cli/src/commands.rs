use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ledgerlink_core::{ClientConfig, DecodedBody, Payload, Transport};
use ledgerlink_rs::ValidatorClient;

/// Command line client for a ledger validator's HTTP API
#[derive(Parser, Debug)]
#[command(name = "ledgerlink")]
#[command(about = "Submit transactions to and query state stores on a ledger validator")]
pub struct Cli {
    /// Validator host (overrides config file and LEDGERLINK_HOST)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Validator HTTP port (overrides config file and LEDGERLINK_PORT)
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// JSON client configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Submit a transaction to a transaction family
    Submit {
        /// Transaction family path, e.g. /IntegerKeyTransaction
        family: String,

        /// Inline JSON payload
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        json: Option<String>,

        /// Read the payload from a file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Send the file as CBOR instead of JSON
        #[arg(long, requires = "file", conflicts_with = "json")]
        cbor: bool,
    },
    /// List the stores on the validator
    Stores,
    /// List the keys in a store
    Keys { store: String },
    /// Fetch every object in a store
    Objects { store: String },
    /// Fetch one object from a store
    Get { store: String, key: String },
}

impl Cli {
    /// Config file, then environment, then flags
    pub fn resolve_config(&self) -> Result<ClientConfig> {
        let config = match &self.config {
            Some(path) => ClientConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path))?,
            None => ClientConfig::default(),
        };
        let mut config = config.with_env_overrides()?;

        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Build the submission payload from the command line options
pub fn load_payload(json: Option<&str>, file: Option<&PathBuf>, cbor: bool) -> Result<Payload> {
    if let Some(json) = json {
        if cbor {
            bail!("--cbor applies to --file payloads only");
        }
        serde_json::from_str::<serde_json::Value>(json).context("--json is not valid JSON")?;
        return Ok(Payload::Text(json.to_string()));
    }

    let Some(file) = file else {
        bail!("either --json or --file must be given");
    };
    let bytes =
        std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    if cbor {
        return Ok(Payload::Binary(bytes));
    }
    let text = String::from_utf8(bytes).context("payload file is not UTF-8 JSON")?;
    Ok(Payload::Text(text))
}

fn render(body: Option<DecodedBody>) -> Result<serde_json::Value> {
    match body {
        Some(body) => Ok(body.into_json()?),
        None => Ok(serde_json::Value::Null),
    }
}

/// Execute one command and return what should be printed
pub async fn run<T: Transport>(
    client: &ValidatorClient<T>,
    command: &Command,
) -> Result<serde_json::Value> {
    match command {
        Command::Submit {
            family,
            json,
            file,
            cbor,
        } => {
            let payload = load_payload(json.as_deref(), file.as_ref(), *cbor)?;
            let id = client.send_transaction(family, payload).await?;
            Ok(serde_json::json!({ "transaction_id": id.as_str() }))
        }
        Command::Stores => render(client.get_stores().await?),
        Command::Keys { store } => render(client.get_store(store).await?),
        Command::Objects { store } => render(client.get_store_objects(store).await?),
        Command::Get { store, key } => render(client.get_store_object(store, key).await?),
    }
}
