//! # Errors
//!
//! Error taxonomy shared by the gateway, the reconciler and the printer.
//!
//! Whether an error is fatal depends on where it surfaces, not on its kind:
//! a [`Error::Transport`] from `list` aborts a pass, the same error from
//! `update` is recorded against one Secret and the pass moves on.

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// No usable kubeconfig, home directory or client
    #[error("configuration error: {message}")]
    Config { message: String },

    /// The requested Secret does not exist
    #[error("secret {namespace}/{name} not found")]
    NotFound { namespace: String, name: String },

    /// The Secret changed between read and update (HTTP 409)
    #[error("conflict updating secret {namespace}/{name}: {message}")]
    Conflict {
        namespace: String,
        name: String,
        message: String,
    },

    /// Any other API or transport failure
    #[error("kubernetes {operation} failed: {source}")]
    Transport {
        /// Gateway operation that failed (list, get, update)
        operation: &'static str,
        #[source]
        source: kube::Error,
    },

    /// A Secret without the identity fields needed to write it back
    #[error("invalid secret object: {message}")]
    InvalidObject { message: String },
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Classify a kube error by HTTP status
    ///
    /// 404 and 409 map to their dedicated variants so callers can match on
    /// them; everything else is a transport failure.
    pub fn from_kube(
        operation: &'static str,
        namespace: &str,
        name: &str,
        err: kube::Error,
    ) -> Self {
        match err {
            kube::Error::Api(ref api_err) if api_err.code == 404 => Self::NotFound {
                namespace: namespace.to_string(),
                name: name.to_string(),
            },
            kube::Error::Api(ref api_err) if api_err.code == 409 => Self::Conflict {
                namespace: namespace.to_string(),
                name: name.to_string(),
                message: api_err.message.clone(),
            },
            source => Self::Transport { operation, source },
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
