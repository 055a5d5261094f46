//! # Kubernetes Client
//!
//! Builds a kube [`Client`] from an explicit kubeconfig file.

use crate::constants::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS};
use crate::error::{Error, Result};
use kube::{
    config::{KubeConfigOptions, Kubeconfig},
    Client, Config,
};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Install the ring crypto provider for rustls
///
/// Required for rustls 0.23+ when no default provider is selected through
/// features. Must run before the first TLS connection. Installing twice is
/// harmless, so a second call only logs.
pub fn install_crypto_provider() {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }
}

/// Create a client from the kubeconfig at `path` (current context)
pub async fn create_client(path: &Path) -> Result<Client> {
    let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
        Error::config(format!(
            "failed to read kubeconfig {}: {e}",
            path.display()
        ))
    })?;

    let mut config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(|e| {
            Error::config(format!(
                "failed to load kubeconfig {}: {e}",
                path.display()
            ))
        })?;
    config.connect_timeout = Some(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));
    config.read_timeout = Some(Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS));

    info!(
        kubeconfig = %path.display(),
        cluster_url = %config.cluster_url,
        "Using kubeconfig"
    );

    Client::try_from(config)
        .map_err(|e| Error::config(format!("failed to create Kubernetes client: {e}")))
}
