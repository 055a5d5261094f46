//! # Inspect
//!
//! Computes the data hash of a single Secret without touching it.
//!
//! The recorded annotation is not consulted: the printer shows what the hash
//! *should* be, which is what an operator compares against when debugging a
//! drifting ExternalSecret.

use crate::digest::Digester;
use crate::error::{Error, Result};
use crate::gateway::SecretGateway;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{info, info_span, Instrument};

/// Result of inspecting one Secret
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inspection {
    pub name: String,
    pub namespace: String,
    pub hash: String,
}

impl fmt::Display for Inspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Secret: {}", self.name)?;
        writeln!(f, "Namespace: {}", self.namespace)?;
        write!(f, "Hash: {}", self.hash)
    }
}

/// Fetch `namespace/name` and hash its payload
///
/// Any fetch failure is returned as-is; there is nothing to fall back to.
pub async fn inspect<G, D>(
    gateway: &G,
    digester: &D,
    namespace: &str,
    name: &str,
) -> Result<Inspection>
where
    G: SecretGateway + ?Sized,
    D: Digester + ?Sized,
{
    async {
        let secret = gateway.get(namespace, name).await?;

        let empty = BTreeMap::new();
        let data = secret.data.as_ref().unwrap_or(&empty);
        let hash = digester.digest(data);
        info!(keys = data.len(), hash = %hash, "Computed data hash");

        Ok::<_, Error>(Inspection {
            name: name.to_string(),
            namespace: namespace.to_string(),
            hash,
        })
    }
    .instrument(info_span!(
        "inspect.secret",
        secret.namespace = namespace,
        secret.name = name
    ))
    .await
}
