//! Envelope primitives for nodelock artifacts.
//!
//! This crate provides the three building blocks of the license envelope:
//! - SM3 hex digests for record integrity codes
//! - SM4-CBC with PKCS#7 padding and base64 framing for record payloads
//! - The key-embedding codec that interleaves a 16-byte symmetric key into
//!   its own ciphertext at deterministic offsets
//!
//! Everything here is a pure byte transform. Key derivation, record
//! semantics, and persistence live in `nodelock-license`.

mod cipher;
mod digest;
mod embed;
mod error;

pub use cipher::{decrypt_base64, encrypt_base64, BLOCK_SIZE};
pub use digest::sm3_hex;
pub use embed::{embed_key, extract_key, KEY_LEN};
pub use error::{CryptoError, CryptoResult};
