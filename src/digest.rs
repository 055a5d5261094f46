//! # Data Hash
//!
//! Digest of a Secret's `data` payload.
//!
//! [`ObjectHash`] reproduces the External Secrets Operator's `ObjectHash`
//! bit for bit, so a hash written by this tool is the same value the operator
//! computes and compares against. The operator hashes the textual form Go's
//! `%+v` verb gives a `map[string][]byte`:
//!
//! ```text
//! map[password:[104 117 110 116 101 114 50] username:[97 100 109 105 110]]
//! ```
//!
//! and encodes the SHA3-224 of that string as lowercase hex.

use k8s_openapi::ByteString;
use sha3::{Digest, Sha3_224};
use std::collections::BTreeMap;
use std::fmt::Write as _;

#[cfg(test)]
use mockall::automock;

/// Computes the data hash for a Secret payload
///
/// Implementations must be deterministic: equal mappings always give equal
/// hashes regardless of how they were built.
#[cfg_attr(test, automock)]
pub trait Digester: Send + Sync {
    fn digest(&self, data: &BTreeMap<String, ByteString>) -> String;
}

/// SHA3-224 over the Go `%+v` rendering of the payload
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectHash;

impl Digester for ObjectHash {
    fn digest(&self, data: &BTreeMap<String, ByteString>) -> String {
        let rendered = render_go_map(data);
        let mut hasher = Sha3_224::new();
        hasher.update(rendered.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

/// Render the payload as Go's `fmt.Sprintf("%+v", map[string][]byte)` does
///
/// Go prints map entries sorted by key; `BTreeMap` iterates in the same
/// byte-wise order, so no extra sorting is needed.
#[must_use]
pub fn render_go_map(data: &BTreeMap<String, ByteString>) -> String {
    let mut out = String::from("map[");
    for (i, (key, value)) in data.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(key);
        out.push_str(":[");
        for (j, byte) in value.0.iter().enumerate() {
            if j > 0 {
                out.push(' ');
            }
            // Writing to a String cannot fail
            let _ = write!(out, "{byte}");
        }
        out.push(']');
    }
    out.push(']');
    out
}
