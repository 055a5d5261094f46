//! # ESO Data Hash Printer
//!
//! Prints the data hash the External Secrets Operator would record for a
//! Secret. Read-only.
//!
//! ## Usage
//!
//! ```bash
//! eso-data-hash-printer --secret db-credentials --namespace payments
//! eso-data-hash-printer -s db-credentials -n payments -o json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use eso_data_hash::{client, config, constants, inspect, logging, KubeSecretGateway, ObjectHash};

/// Prints the External Secrets data hash of a Secret
#[derive(Parser)]
#[command(name = "eso-data-hash-printer")]
#[command(version = eso_data_hash::LONG_VERSION)]
#[command(about = "Prints the External Secrets data hash of a Secret", long_about = None)]
struct Cli {
    /// Name of the secret
    #[arg(short, long)]
    secret: String,

    /// Namespace of the secret
    #[arg(short, long, default_value = constants::DEFAULT_INSPECT_NAMESPACE)]
    namespace: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Name, namespace and hash on separate lines
    Text,
    /// Single JSON object
    Json,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init();
    client::install_crypto_provider();

    let cli = Cli::parse();

    let kubeconfig = config::kubeconfig_path()?;
    let client = client::create_client(&kubeconfig)
        .await
        .context("Failed to create Kubernetes client. Ensure kubeconfig is configured.")?;
    let gateway = KubeSecretGateway::new(client);

    let inspection = inspect(&gateway, &ObjectHash, &cli.namespace, &cli.secret)
        .await
        .with_context(|| format!("Failed to get secret '{}/{}'", cli.namespace, cli.secret))?;

    match cli.output {
        OutputFormat::Text => println!("{inspection}"),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string(&inspection).context("Failed to serialize inspection")?
        ),
    }

    Ok(())
}
