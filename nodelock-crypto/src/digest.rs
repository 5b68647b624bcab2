//! SM3 integrity digests.

use sm3::{Digest, Sm3};

/// Returns the lowercase hex SM3 digest of `data`.
///
/// Always 64 hex characters; the first 16 double as the artifact's
/// symmetric key, so the output format must stay bit-exact.
#[must_use]
pub fn sm3_hex(data: &[u8]) -> String {
    let mut hasher = Sm3::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
