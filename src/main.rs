//! # ESO Data Hash Reconciler
//!
//! Rewrites stale data-hash annotations on labeled Secrets.
//!
//! ## Usage
//!
//! ```bash
//! # Reconcile Secrets in every namespace
//! eso-data-hash-reconciler
//!
//! # Reconcile a single namespace
//! eso-data-hash-reconciler --namespace payments
//! ```
//!
//! Per-Secret update failures are printed and skipped; the process still
//! exits 0 once the scan completes.

use anyhow::{Context, Result};
use clap::Parser;
use eso_data_hash::{
    client, config, logging, HashConfig, KubeSecretGateway, NamespaceScope, ObjectHash, Reconciler,
};
use tracing::info;

/// Recalculates the External Secrets data hash for managed Secrets
#[derive(Parser)]
#[command(name = "eso-data-hash-reconciler")]
#[command(version = eso_data_hash::LONG_VERSION)]
#[command(
    about = "Recalculates the External Secrets data hash for managed Secrets",
    long_about = None,
    after_help = "\
Only Secrets labeled reconcile.external-secrets.io/managed=true that already
carry the reconcile.external-secrets.io/data-hash annotation are updated.

Examples:
  eso-data-hash-reconciler
  eso-data-hash-reconciler --namespace payments
"
)]
struct Cli {
    /// Namespace of secrets to update (empty for all namespaces)
    #[arg(short, long, default_value = "")]
    namespace: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init();
    client::install_crypto_provider();

    let cli = Cli::parse();
    let scope = NamespaceScope::from_flag(&cli.namespace);

    let kubeconfig = config::kubeconfig_path()?;
    let client = client::create_client(&kubeconfig)
        .await
        .context("Failed to create Kubernetes client. Ensure kubeconfig is configured.")?;

    let reconciler = Reconciler::new(
        KubeSecretGateway::new(client),
        ObjectHash,
        HashConfig::default(),
    );
    info!(scope = %scope, "Starting data hash reconciliation");

    reconciler
        .run(&scope)
        .await
        .with_context(|| format!("Failed to list secrets in {scope}"))?;

    Ok(())
}
