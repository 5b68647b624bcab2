//! Core type definitions for nodelock.
//!
//! This crate defines the data model shared by the issuing and validating
//! roles:
//! - License grant records and registered node descriptors
//! - The local-time wire format used inside artifacts
//!
//! Everything protocol-shaped (envelope encoding, registration, monitoring)
//! lives in `nodelock-license`; this crate stays dependency-light so both
//! roles can share it.

mod record;
pub mod timestamp;

pub use record::{LicenseRecord, NodeInfo};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
