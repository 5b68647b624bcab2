//! Reversible key-embedding codec.
//!
//! Hides a 16-byte symmetric key inside an opaque byte buffer at positions
//! derived from an `(offset, step)` pair shared out of band by the issuing
//! and validating roles. This is obfuscation, not a security boundary: it
//! keeps the key from sitting byte-adjacent to its ciphertext in the stored
//! artifact, complementing the digest-derived key scheme layered above.

use crate::error::{CryptoError, CryptoResult};

/// Length of the embedded symmetric key in bytes.
pub const KEY_LEN: usize = 16;

/// Interleaves `key` into `buffer` and returns the combined bytes.
///
/// Insertions are sequential: position `offset + i*step` is taken against
/// the buffer as it stands after the previous insertion, each insertion
/// shifting later content right by one. Extraction depends on exactly this
/// ordering.
pub fn embed_key(buffer: &[u8], key: &[u8], offset: usize, step: usize) -> CryptoResult<Vec<u8>> {
    if key.len() != KEY_LEN {
        return Err(CryptoError::InvalidKeyLength {
            expected: KEY_LEN,
            actual: key.len(),
        });
    }
    check_bounds(buffer.len(), offset, step)?;

    let mut combined = Vec::with_capacity(buffer.len() + KEY_LEN);
    combined.extend_from_slice(buffer);
    for (i, byte) in key.iter().enumerate() {
        combined.insert(offset + i * step, *byte);
    }
    Ok(combined)
}

/// Splits a combined buffer back into `(ciphertext, key)`.
///
/// All 16 positions are computed against the original combined buffer, then
/// removed in descending index order so earlier removals cannot shift the
/// later positions.
pub fn extract_key(combined: &[u8], offset: usize, step: usize) -> CryptoResult<(Vec<u8>, Vec<u8>)> {
    check_bounds(combined.len(), offset, step)?;

    let mut key = Vec::with_capacity(KEY_LEN);
    let mut positions = Vec::with_capacity(KEY_LEN);
    for i in 0..KEY_LEN {
        let idx = offset + i * step;
        key.push(combined[idx]);
        positions.push(idx);
    }

    let mut ciphertext = combined.to_vec();
    for idx in positions.iter().rev() {
        ciphertext.remove(*idx);
    }
    Ok((ciphertext, key))
}

fn check_bounds(len: usize, offset: usize, step: usize) -> CryptoResult<()> {
    let last = offset + (KEY_LEN - 1) * step;
    if last >= len {
        return Err(CryptoError::Boundary {
            needed: last + 1,
            len,
        });
    }
    Ok(())
}
