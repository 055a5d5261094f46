//! # Configuration
//!
//! Reconciliation settings and kubeconfig discovery.
//!
//! The kubeconfig resolution chain (highest priority first):
//! 1. `KUBECONFIG` environment variable, when set and non-empty
//! 2. `~/.kube/config`
//!
//! In-cluster credentials are not consulted; both binaries expect a
//! kubeconfig file.

use crate::constants::{
    DEFAULT_HASH_ANNOTATION, DEFAULT_LABEL_SELECTOR, KUBECONFIG_ENV, KUBECONFIG_FILE_NAME,
    KUBE_DIR_NAME,
};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Settings the reconciler is constructed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashConfig {
    /// Label selector for the list call
    pub label_selector: String,
    /// Annotation holding the recorded data hash
    pub annotation_key: String,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            label_selector: DEFAULT_LABEL_SELECTOR.to_string(),
            annotation_key: DEFAULT_HASH_ANNOTATION.to_string(),
        }
    }
}

impl HashConfig {
    #[must_use]
    pub fn with_label_selector(mut self, label_selector: impl Into<String>) -> Self {
        self.label_selector = label_selector.into();
        self
    }

    #[must_use]
    pub fn with_annotation_key(mut self, annotation_key: impl Into<String>) -> Self {
        self.annotation_key = annotation_key.into();
        self
    }
}

/// Resolve the kubeconfig path from the process environment
pub fn kubeconfig_path() -> Result<PathBuf> {
    let from_env = std::env::var(KUBECONFIG_ENV).ok();
    let home = dirs::home_dir();
    resolve_kubeconfig_path(from_env.as_deref(), home.as_deref())
}

/// Resolve the kubeconfig path from explicit inputs
///
/// An empty `KUBECONFIG` counts as unset.
pub fn resolve_kubeconfig_path(from_env: Option<&str>, home: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = from_env.filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    let home = home.ok_or_else(|| {
        Error::config(format!(
            "could not determine home directory; set {KUBECONFIG_ENV} to a kubeconfig file"
        ))
    })?;
    Ok(home.join(KUBE_DIR_NAME).join(KUBECONFIG_FILE_NAME))
}
