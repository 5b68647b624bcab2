//! Error types for the envelope primitives.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in envelope operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Embedding positions exceed the carrier buffer.
    #[error("embed range exceeds buffer: need {needed} bytes, have {len}")]
    Boundary { needed: usize, len: usize },

    /// Invalid key length.
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// Encryption failed.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Decryption failed (wrong key or tampered data).
    #[error("decryption failed: {0}")]
    Decryption(String),
}
