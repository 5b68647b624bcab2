//! SM4-CBC payload cipher with base64 framing.
//!
//! Artifacts store the SM4-CBC ciphertext base64-encoded, so both
//! directions here speak base64 bytes on the ciphertext side.

use crate::error::{CryptoError, CryptoResult};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};

/// SM4 block size in bytes.
pub const BLOCK_SIZE: usize = 16;

type Sm4CbcEnc = cbc::Encryptor<sm4::Sm4>;
type Sm4CbcDec = cbc::Decryptor<sm4::Sm4>;

/// Encrypts `plaintext` with SM4-CBC/PKCS#7 and returns base64 ciphertext bytes.
pub fn encrypt_base64(plaintext: &[u8], key: &[u8], iv: &[u8]) -> CryptoResult<Vec<u8>> {
    let cipher = Sm4CbcEnc::new_from_slices(key, iv)
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);
    Ok(BASE64.encode(ciphertext).into_bytes())
}

/// Decrypts base64 ciphertext bytes with SM4-CBC/PKCS#7.
pub fn decrypt_base64(encoded: &[u8], key: &[u8], iv: &[u8]) -> CryptoResult<Vec<u8>> {
    let ciphertext = BASE64
        .decode(encoded)
        .map_err(|e| CryptoError::Decryption(format!("invalid base64: {e}")))?;
    let cipher = Sm4CbcDec::new_from_slices(key, iv)
        .map_err(|e| CryptoError::Decryption(e.to_string()))?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| CryptoError::Decryption("bad padding (wrong key or corrupt data)".to_string()))
}
