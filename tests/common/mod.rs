//! Common test utilities
//!
//! Provides an in-memory [`SecretGateway`] and Secret builders shared by the
//! integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use async_trait::async_trait;
use eso_data_hash::{Error, NamespaceScope, Result, SecretGateway};
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use kube::api::ObjectMeta;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

pub const HASH_ANNOTATION: &str = "reconcile.external-secrets.io/data-hash";
pub const MANAGED_LABEL: &str = "reconcile.external-secrets.io/managed";

/// Build a managed Secret with the given payload and optional recorded hash
pub fn secret(namespace: &str, name: &str, data: &[(&str, &str)], hash: Option<&str>) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            labels: Some(BTreeMap::from([(
                MANAGED_LABEL.to_string(),
                "true".to_string(),
            )])),
            annotations: hash
                .map(|h| BTreeMap::from([(HASH_ANNOTATION.to_string(), h.to_string())])),
            resource_version: Some("1".to_string()),
            ..Default::default()
        },
        data: Some(
            data.iter()
                .map(|(k, v)| ((*k).to_string(), ByteString(v.as_bytes().to_vec())))
                .collect(),
        ),
        ..Default::default()
    }
}

/// Same Secret with the hash annotation set to `hash`
pub fn with_hash(mut secret: Secret, hash: &str) -> Secret {
    secret
        .metadata
        .annotations
        .get_or_insert_with(BTreeMap::new)
        .insert(HASH_ANNOTATION.to_string(), hash.to_string());
    secret
}

/// Recorded hash of a Secret, if any
pub fn recorded_hash(secret: &Secret) -> Option<&str> {
    secret
        .metadata
        .annotations
        .as_ref()?
        .get(HASH_ANNOTATION)
        .map(String::as_str)
}

#[derive(Debug, Default)]
struct State {
    secrets: BTreeMap<(String, String), Secret>,
    failing: HashSet<String>,
    updates: Vec<Secret>,
    selectors: Vec<String>,
    fail_list: bool,
}

/// In-memory Secret store
///
/// Clones share state, so a test hands one clone to the code under test
/// and inspects another. `list` returns every stored Secret in scope and
/// records the selector it was given.
#[derive(Debug, Clone, Default)]
pub struct FakeGateway {
    state: Arc<Mutex<State>>,
}

impl FakeGateway {
    pub fn with_secrets(secrets: impl IntoIterator<Item = Secret>) -> Self {
        let gateway = Self::default();
        {
            let mut state = gateway.state.lock().unwrap();
            for s in secrets {
                let key = (
                    s.metadata.namespace.clone().unwrap(),
                    s.metadata.name.clone().unwrap(),
                );
                state.secrets.insert(key, s);
            }
        }
        gateway
    }

    pub fn failing_list() -> Self {
        let gateway = Self::default();
        gateway.state.lock().unwrap().fail_list = true;
        gateway
    }

    /// Reject updates to `name` with a conflict
    pub fn fail_updates_for(&self, name: &str) {
        self.state.lock().unwrap().failing.insert(name.to_string());
    }

    /// Every Secret passed to `update`, in call order
    pub fn updates(&self) -> Vec<Secret> {
        self.state.lock().unwrap().updates.clone()
    }

    pub fn selectors(&self) -> Vec<String> {
        self.state.lock().unwrap().selectors.clone()
    }

    pub fn stored(&self, namespace: &str, name: &str) -> Secret {
        self.state.lock().unwrap().secrets[&(namespace.to_string(), name.to_string())].clone()
    }

    /// Change a stored Secret's payload out of band
    pub fn set_data(&self, namespace: &str, name: &str, key: &str, value: &str) {
        let mut state = self.state.lock().unwrap();
        let secret = state
            .secrets
            .get_mut(&(namespace.to_string(), name.to_string()))
            .unwrap();
        secret
            .data
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), ByteString(value.as_bytes().to_vec()));
    }
}

#[async_trait]
impl SecretGateway for FakeGateway {
    async fn list(&self, scope: &NamespaceScope, label_selector: &str) -> Result<Vec<Secret>> {
        let mut state = self.state.lock().unwrap();
        state.selectors.push(label_selector.to_string());
        if state.fail_list {
            return Err(Error::config("connection refused"));
        }
        Ok(state
            .secrets
            .iter()
            .filter(|((ns, _), _)| match scope {
                NamespaceScope::All => true,
                NamespaceScope::Namespace(wanted) => ns == wanted,
            })
            .map(|(_, s)| s.clone())
            .collect())
    }

    async fn get(&self, namespace: &str, name: &str) -> Result<Secret> {
        self.state
            .lock()
            .unwrap()
            .secrets
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| Error::NotFound {
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }

    async fn update(&self, secret: &Secret) -> Result<Secret> {
        let mut state = self.state.lock().unwrap();
        state.updates.push(secret.clone());
        let namespace = secret.metadata.namespace.clone().unwrap();
        let name = secret.metadata.name.clone().unwrap();
        if state.failing.contains(&name) {
            return Err(Error::Conflict {
                namespace,
                name,
                message: "the object has been modified".to_string(),
            });
        }
        state.secrets.insert((namespace, name), secret.clone());
        Ok(secret.clone())
    }
}
