//! # Secret Gateway
//!
//! Abstract interface over the Kubernetes Secret API.
//!
//! The reconciler and the printer only ever list, get and update Secrets;
//! this trait lets them run against the real API server or an in-memory
//! store in tests.

use crate::error::{Error, Result};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::{
    api::{Api, ListParams, PostParams},
    Client,
};
use std::fmt;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

/// Which namespaces a list covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceScope {
    /// Every namespace the credentials can see
    All,
    /// A single namespace
    Namespace(String),
}

impl NamespaceScope {
    /// Map the `--namespace` flag: empty means all namespaces
    #[must_use]
    pub fn from_flag(namespace: &str) -> Self {
        if namespace.is_empty() {
            Self::All
        } else {
            Self::Namespace(namespace.to_string())
        }
    }
}

impl fmt::Display for NamespaceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all namespaces"),
            Self::Namespace(ns) => write!(f, "namespace '{ns}'"),
        }
    }
}

/// Gateway trait for Secret storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SecretGateway: Send + Sync {
    /// List Secrets in `scope` matching `label_selector`
    async fn list(&self, scope: &NamespaceScope, label_selector: &str) -> Result<Vec<Secret>>;

    /// Fetch one Secret; a missing Secret is [`Error::NotFound`]
    async fn get(&self, namespace: &str, name: &str) -> Result<Secret>;

    /// Replace a Secret, returning the stored object
    ///
    /// The object's `resourceVersion` is sent along, so a concurrent
    /// modification comes back as [`Error::Conflict`].
    async fn update(&self, secret: &Secret) -> Result<Secret>;
}

/// [`SecretGateway`] backed by the Kubernetes API
#[derive(Clone)]
pub struct KubeSecretGateway {
    client: Client,
}

impl KubeSecretGateway {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, scope: &NamespaceScope) -> Api<Secret> {
        match scope {
            NamespaceScope::All => Api::all(self.client.clone()),
            NamespaceScope::Namespace(ns) => Api::namespaced(self.client.clone(), ns),
        }
    }
}

impl fmt::Debug for KubeSecretGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KubeSecretGateway").finish_non_exhaustive()
    }
}

#[async_trait]
impl SecretGateway for KubeSecretGateway {
    async fn list(&self, scope: &NamespaceScope, label_selector: &str) -> Result<Vec<Secret>> {
        let params = ListParams::default().labels(label_selector);
        let secrets = self
            .api(scope)
            .list(&params)
            .await
            .map_err(|source| Error::Transport {
                operation: "list",
                source,
            })?;
        debug!(
            scope = %scope,
            label_selector,
            count = secrets.items.len(),
            "Listed secrets"
        );
        Ok(secrets.items)
    }

    async fn get(&self, namespace: &str, name: &str) -> Result<Secret> {
        let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        api.get(name)
            .await
            .map_err(|err| Error::from_kube("get", namespace, name, err))
    }

    async fn update(&self, secret: &Secret) -> Result<Secret> {
        let (Some(namespace), Some(name)) = (
            secret.metadata.namespace.as_deref(),
            secret.metadata.name.as_deref(),
        ) else {
            return Err(Error::InvalidObject {
                message: "secret has no namespace or name".to_string(),
            });
        };

        let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        api.replace(name, &PostParams::default(), secret)
            .await
            .map_err(|err| Error::from_kube("update", namespace, name, err))
    }
}
