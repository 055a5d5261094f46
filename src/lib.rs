//! # ESO Data Hash
//!
//! Keeps the `reconcile.external-secrets.io/data-hash` annotation on
//! Kubernetes Secrets consistent with their payload.
//!
//! ## Overview
//!
//! The External Secrets Operator records a SHA3-224 hash of each Secret's
//! `data` in an annotation and compares it on every sync. When a Secret is
//! edited out of band the recorded hash goes stale. This crate provides two
//! tools:
//!
//! 1. **`eso-data-hash-reconciler`** - lists Secrets labeled
//!    `reconcile.external-secrets.io/managed=true` and rewrites stale hashes.
//! 2. **`eso-data-hash-printer`** - prints the hash for a single Secret.
//!
//! Secrets without the annotation are never touched.

pub mod client;
pub mod config;
pub mod constants;
pub mod digest;
pub mod error;
pub mod gateway;
pub mod inspect;
pub mod logging;
pub mod reconciler;

pub use config::HashConfig;
pub use digest::{Digester, ObjectHash};
pub use error::{Error, Result};
pub use gateway::{KubeSecretGateway, NamespaceScope, SecretGateway};
pub use inspect::{inspect, Inspection};
pub use reconciler::{Outcome, PassSummary, Reconciler, SecretRef};

/// Version string shown by `--version`: package version, git hash, build time
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BUILD_GIT_HASH"),
    ", built ",
    env!("BUILD_DATETIME"),
    ")"
);
