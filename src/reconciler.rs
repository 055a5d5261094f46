//! # Reconciler
//!
//! Keeps the data-hash annotation of labeled Secrets current.
//!
//! Each Secret is handled on its own and ends a pass in exactly one of four
//! states:
//!
//! - **Unmanaged**: no hash annotation. The Secret is not hashed or touched.
//! - **UpToDate**: the recorded hash matches the payload.
//! - **Updated**: the hash drifted and the new value was written back.
//! - **UpdateFailed**: the write failed. The error is reported and the pass
//!   continues with the next Secret.
//!
//! Only a failed `list` aborts a pass, since there is nothing to iterate.

use crate::config::HashConfig;
use crate::digest::Digester;
use crate::error::{Error, Result};
use crate::gateway::{NamespaceScope, SecretGateway};
use k8s_openapi::api::core::v1::Secret;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Identity of a Secret for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRef {
    pub namespace: String,
    pub name: String,
}

impl SecretRef {
    #[must_use]
    pub fn of(secret: &Secret) -> Self {
        Self {
            namespace: secret
                .metadata
                .namespace
                .clone()
                .unwrap_or_else(|| "<unknown>".to_string()),
            name: secret
                .metadata
                .name
                .clone()
                .unwrap_or_else(|| "<unknown>".to_string()),
        }
    }
}

impl fmt::Display for SecretRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Terminal state of one Secret within a pass
#[derive(Debug)]
pub enum Outcome {
    Unmanaged,
    UpToDate,
    Updated { hash: String },
    UpdateFailed { hash: String, error: Error },
}

impl Outcome {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Unmanaged => "unmanaged",
            Outcome::UpToDate => "up-to-date",
            Outcome::Updated { .. } => "updated",
            Outcome::UpdateFailed { .. } => "update-failed",
        }
    }

    /// Human-readable status line printed for each Secret
    #[must_use]
    pub fn status_line(&self, secret: &SecretRef) -> String {
        match self {
            Outcome::Unmanaged => {
                format!("{secret} doesn't have the hash annotation, skipping..")
            }
            Outcome::UpToDate => format!("{secret} hash is up-to-date, skipping.."),
            Outcome::Updated { .. } => format!("Updated secret {secret}"),
            Outcome::UpdateFailed { error, .. } => {
                format!("Error updating secret {secret}: {error}")
            }
        }
    }
}

/// Counts per terminal state for one pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub unmanaged: usize,
    pub up_to_date: usize,
    pub updated: usize,
    pub failed: usize,
}

impl PassSummary {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Unmanaged => self.unmanaged += 1,
            Outcome::UpToDate => self.up_to_date += 1,
            Outcome::Updated { .. } => self.updated += 1,
            Outcome::UpdateFailed { .. } => self.failed += 1,
        }
    }

    #[must_use]
    pub fn scanned(&self) -> usize {
        self.unmanaged + self.up_to_date + self.updated + self.failed
    }
}

/// Runs reconciliation passes against a gateway
#[derive(Debug)]
pub struct Reconciler<G, D> {
    gateway: G,
    digester: D,
    config: HashConfig,
}

impl<G, D> Reconciler<G, D>
where
    G: SecretGateway,
    D: Digester,
{
    pub fn new(gateway: G, digester: D, config: HashConfig) -> Self {
        Self {
            gateway,
            digester,
            config,
        }
    }

    /// Decide and apply the outcome for a single Secret
    pub async fn reconcile_secret(&self, mut secret: Secret) -> Outcome {
        let Some(current) = secret
            .metadata
            .annotations
            .as_ref()
            .and_then(|a| a.get(&self.config.annotation_key))
        else {
            return Outcome::Unmanaged;
        };

        let empty = BTreeMap::new();
        let hash = self
            .digester
            .digest(secret.data.as_ref().unwrap_or(&empty));
        if *current == hash {
            return Outcome::UpToDate;
        }

        debug!(previous = %current, new = %hash, "Data hash drifted");
        secret
            .metadata
            .annotations
            .get_or_insert_with(BTreeMap::new)
            .insert(self.config.annotation_key.clone(), hash.clone());

        match self.gateway.update(&secret).await {
            Ok(_) => Outcome::Updated { hash },
            Err(error) => Outcome::UpdateFailed { hash, error },
        }
    }

    /// List the Secrets in `scope` and reconcile each of them in turn
    ///
    /// Prints one status line per Secret. Returns an error only when the
    /// list itself fails; per-Secret failures are counted in the summary.
    pub async fn run(&self, scope: &NamespaceScope) -> Result<PassSummary> {
        let span = info_span!(
            "reconcile.pass",
            scope = %scope,
            label_selector = %self.config.label_selector
        );
        async move {
            let secrets = self
                .gateway
                .list(scope, &self.config.label_selector)
                .await?;
            info!(count = secrets.len(), "Reconciling secrets");

            let mut summary = PassSummary::default();
            for secret in secrets {
                let secret_ref = SecretRef::of(&secret);
                let outcome = self
                    .reconcile_secret(secret)
                    .instrument(info_span!(
                        "reconcile.secret",
                        secret.namespace = %secret_ref.namespace,
                        secret.name = %secret_ref.name
                    ))
                    .await;
                report(&secret_ref, &outcome);
                summary.record(&outcome);
            }

            info!(
                scanned = summary.scanned(),
                unmanaged = summary.unmanaged,
                up_to_date = summary.up_to_date,
                updated = summary.updated,
                failed = summary.failed,
                "Reconciliation pass complete"
            );
            Ok::<_, Error>(summary)
        }
        .instrument(span)
        .await
    }
}

fn report(secret: &SecretRef, outcome: &Outcome) {
    println!("{}", outcome.status_line(secret));
    match outcome {
        Outcome::Unmanaged | Outcome::UpToDate => {
            debug!(secret = %secret, outcome = outcome.as_str(), "Skipped secret");
        }
        Outcome::Updated { hash } => {
            info!(secret = %secret, hash = %hash, "Updated data hash");
        }
        Outcome::UpdateFailed { hash, error } if error.is_conflict() => {
            warn!(
                secret = %secret,
                hash = %hash,
                error = %error,
                "Secret changed concurrently, not retried"
            );
        }
        Outcome::UpdateFailed { hash, error } => {
            error!(
                secret = %secret,
                hash = %hash,
                error = %error,
                "Failed to update data hash"
            );
        }
    }
}
