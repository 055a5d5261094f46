//! # Constants
//!
//! Shared constants used by both binaries.
//!
//! The label selector and annotation key are the defaults for
//! [`HashConfig`](crate::config::HashConfig); tests and embedders override
//! them there rather than through process-wide state.

/// Label selector scoping which Secrets the reconciler lists
pub const DEFAULT_LABEL_SELECTOR: &str = "reconcile.external-secrets.io/managed=true";

/// Annotation carrying the last recorded data hash
/// Presence of this annotation opts a Secret into reconciliation
pub const DEFAULT_HASH_ANNOTATION: &str = "reconcile.external-secrets.io/data-hash";

/// Namespace used by the printer when `--namespace` is not given
pub const DEFAULT_INSPECT_NAMESPACE: &str = "default";

/// Environment variable overriding the kubeconfig location
pub const KUBECONFIG_ENV: &str = "KUBECONFIG";

/// Directory under `$HOME` holding the default kubeconfig
pub const KUBE_DIR_NAME: &str = ".kube";

/// File name of the default kubeconfig inside [`KUBE_DIR_NAME`]
pub const KUBECONFIG_FILE_NAME: &str = "config";

/// Log filter applied when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "eso_data_hash=info";

/// Connect timeout for the Kubernetes client (seconds)
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Read timeout for the Kubernetes client (seconds)
/// Large all-namespace lists need more headroom than single gets
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 60;
