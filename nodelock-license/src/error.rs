//! Error types for the licensing protocol.

use nodelock_crypto::CryptoError;
use thiserror::Error;

/// Licensing-specific errors.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Artifact file read/write failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure while building an artifact.
    #[error("serialization error: {0}")]
    Serialization(serde_json::Error),

    /// Malformed artifact: bad buffer, base64, padding, or JSON.
    ///
    /// Indistinguishable from decoding with the wrong `(offset, step)`
    /// parameters.
    #[error("malformed license artifact: {0}")]
    Decode(String),

    /// The integrity code did not match the decoded record.
    #[error("license data appears tampered, contact {contact}")]
    Tampered {
        /// Support contact shown to the user.
        contact: String,
    },

    /// Registration attempted on a grant that is already full.
    #[error("node capacity exceeded (max {allow_nodes} nodes)")]
    CapacityExceeded {
        /// The grant's node limit.
        allow_nodes: u32,
    },

    /// Embedding positions exceed the ciphertext length.
    #[error("embedding parameters out of bounds: {0}")]
    Boundary(String),

    /// The hardware fingerprint provider could not identify this machine.
    #[error("machine fingerprint unavailable")]
    FingerprintUnavailable,

    /// The node request is older than its validity period.
    #[error("node request has expired")]
    StaleRequest,

    /// A timestamp field does not match the wire layout.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// No network interface with the given name exists.
    #[error("network interface not found: {0}")]
    InterfaceNotFound(String),
}

impl From<CryptoError> for LicenseError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::Boundary { .. } => Self::Boundary(err.to_string()),
            other => Self::Decode(other.to_string()),
        }
    }
}

impl From<nodelock_types::Error> for LicenseError {
    fn from(err: nodelock_types::Error) -> Self {
        match err {
            nodelock_types::Error::Serialization(e) => Self::Serialization(e),
            nodelock_types::Error::InvalidTimestamp(s) => Self::InvalidTimestamp(s),
        }
    }
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
