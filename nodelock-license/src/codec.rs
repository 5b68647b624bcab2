//! License envelope encoding and decoding.
//!
//! An artifact is built as:
//!
//! ```text
//! file_bytes = embed( base64( SM4-CBC( json(record_with_check_code),
//!                                      key = iv = digest[0..16] ) ),
//!                     key_bytes = digest[0..16], offset, step )
//! ```
//!
//! where `digest` is the lowercase hex SM3 of the record serialized with
//! `check_code` cleared. The first 16 hex characters of the digest are used
//! verbatim as 16 raw key bytes; this quirk is compatibility-sensitive and
//! must not be "fixed" to decoded bytes.
//!
//! Both directions are pure byte transforms with no I/O; persistence lives
//! in [`crate::store`].

use crate::error::{LicenseError, LicenseResult};
use nodelock_crypto::{
    decrypt_base64, embed_key, encrypt_base64, extract_key, sm3_hex, KEY_LEN,
};
use nodelock_types::LicenseRecord;

/// Embedding parameters shared out of band by the issuing and validating
/// roles. Never stored in the artifact itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeParams {
    offset: usize,
    step: usize,
}

impl EnvelopeParams {
    /// Creates a parameter pair. Zero values normalize to 1, matching the
    /// historical default behavior both roles rely on.
    #[must_use]
    pub fn new(offset: usize, step: usize) -> Self {
        Self {
            offset: if offset == 0 { 1 } else { offset },
            step: if step == 0 { 1 } else { step },
        }
    }

    /// Byte offset of the first embedded key byte.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Distance between consecutive embedded key bytes.
    #[must_use]
    pub fn step(&self) -> usize {
        self.step
    }
}

impl Default for EnvelopeParams {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Encoder/decoder for license artifacts.
///
/// Carries the embedding parameters and the support contact surfaced in
/// tamper errors.
#[derive(Debug, Clone)]
pub struct LicenseCodec {
    params: EnvelopeParams,
    contact: String,
}

impl LicenseCodec {
    /// Creates a codec with the given parameters and support contact.
    pub fn new(params: EnvelopeParams, contact: impl Into<String>) -> Self {
        Self {
            params,
            contact: contact.into(),
        }
    }

    /// Returns the embedding parameters.
    #[must_use]
    pub fn params(&self) -> EnvelopeParams {
        self.params
    }

    /// Encodes a record into artifact bytes.
    ///
    /// The record's existing `check_code` is ignored; a fresh digest is
    /// computed, stored in the record, and its first 16 hex characters
    /// become the symmetric key and IV.
    pub fn encode(&self, record: &LicenseRecord) -> LicenseResult<Vec<u8>> {
        let mut record = record.clone();
        record.check_code = String::new();
        let cleared = serde_json::to_vec(&record).map_err(LicenseError::Serialization)?;
        let digest = sm3_hex(&cleared);

        record.check_code = digest.clone();
        let sealed = serde_json::to_vec(&record).map_err(LicenseError::Serialization)?;

        let key = &digest.as_bytes()[..KEY_LEN];
        let ciphertext = encrypt_base64(&sealed, key, key)?;
        let combined = embed_key(&ciphertext, key, self.params.offset, self.params.step)?;
        Ok(combined)
    }

    /// Decodes artifact bytes back into a record.
    ///
    /// Structural failures (short buffer, bad base64, bad padding, bad
    /// JSON) surface as [`LicenseError::Decode`]; a record that decodes but
    /// whose integrity code does not match surfaces as
    /// [`LicenseError::Tampered`]. The returned record keeps its stored
    /// `check_code`.
    pub fn decode(&self, bytes: &[u8]) -> LicenseResult<LicenseRecord> {
        let (ciphertext, key) = extract_key(bytes, self.params.offset, self.params.step)
            .map_err(|e| LicenseError::Decode(e.to_string()))?;
        let plaintext = decrypt_base64(&ciphertext, &key, &key)
            .map_err(|e| LicenseError::Decode(e.to_string()))?;
        let record: LicenseRecord = serde_json::from_slice(&plaintext)
            .map_err(|e| LicenseError::Decode(format!("invalid record JSON: {e}")))?;

        if !verify_check_code(&record)? {
            return Err(LicenseError::Tampered {
                contact: self.contact.clone(),
            });
        }
        Ok(record)
    }
}

/// Recomputes a record's integrity code and compares it to the stored one.
///
/// The digest is taken over the record serialized with `check_code`
/// cleared, exactly as [`LicenseCodec::encode`] computes it.
pub fn verify_check_code(record: &LicenseRecord) -> LicenseResult<bool> {
    let mut cleared = record.clone();
    cleared.check_code = String::new();
    let bytes = serde_json::to_vec(&cleared).map_err(LicenseError::Serialization)?;
    Ok(sm3_hex(&bytes) == record.check_code)
}
