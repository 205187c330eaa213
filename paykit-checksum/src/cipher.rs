//! AES-128-CBC encryption of salted digests.
//!
//! # Wire Format
//!
//! ```text
//! base64(AES-128-CBC(key, iv = DEFAULT_IV, PKCS#7(plaintext)))
//! ```
//!
//! # Security
//!
//! Every token is encrypted under the same IV, so identical plaintexts under
//! one key produce identical ciphertexts. Each digest carries a fresh salt,
//! which keeps plaintexts distinct in practice, but the scheme gives none of
//! CBC's random-IV guarantees. The IV is part of the protocol shared with the
//! gateway; changing it invalidates every token already issued.

use std::fmt;
use std::str::FromStr;

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Deserializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{ChecksumError, Result};

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// Size of a merchant key in bytes (AES-128).
pub const KEY_SIZE: usize = 16;

/// Initialization vector shared with the gateway out of band.
pub const DEFAULT_IV: [u8; 16] = *b"@@@@&&&&####$$$$";

/// Shared secret used to encrypt and decrypt checksum tokens.
///
/// Exactly [`KEY_SIZE`] bytes. The key material is wiped on drop and never
/// printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct MerchantKey([u8; KEY_SIZE]);

impl MerchantKey {
    /// Create a key from raw bytes.
    pub fn new(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl fmt::Debug for MerchantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MerchantKey(<redacted>)")
    }
}

impl TryFrom<&[u8]> for MerchantKey {
    type Error = ChecksumError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let key: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| {
            ChecksumError::InvalidKey(format!(
                "expected {KEY_SIZE} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(key))
    }
}

/// Parse a key from its textual form; gateway keys are 16 ASCII characters.
impl FromStr for MerchantKey {
    type Err = ChecksumError;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_from(s.as_bytes())
    }
}

impl<'de> Deserialize<'de> for MerchantKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut s = String::deserialize(deserializer)?;
        let key = s.parse().map_err(serde::de::Error::custom);
        s.zeroize();
        key
    }
}

/// Encrypt `plaintext` under `key` with the protocol IV.
///
/// # Errors
///
/// Returns [`ChecksumError::Encryption`] for an empty plaintext.
pub fn encrypt(plaintext: &[u8], key: &MerchantKey) -> Result<String> {
    encrypt_with_iv(plaintext, key, &DEFAULT_IV)
}

/// Encrypt under an explicit IV agreed with the counterparty.
pub fn encrypt_with_iv(plaintext: &[u8], key: &MerchantKey, iv: &[u8; 16]) -> Result<String> {
    if plaintext.is_empty() {
        return Err(ChecksumError::Encryption(
            "input data is missing".to_string(),
        ));
    }

    let ciphertext = Aes128CbcEnc::new_from_slices(key.as_bytes(), iv)
        .map_err(|e| ChecksumError::Encryption(e.to_string()))?
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);
    Ok(STANDARD.encode(ciphertext))
}

/// Decrypt a base64 token under `key` with the protocol IV.
///
/// Returns `None` for anything that is not a valid token under this key:
/// empty input, invalid base64, a length that is not a whole number of
/// blocks, or bad padding after decryption.
pub fn decrypt(token: &str, key: &MerchantKey) -> Option<Vec<u8>> {
    decrypt_with_iv(token, key, &DEFAULT_IV)
}

/// Decrypt under an explicit IV agreed with the counterparty.
pub fn decrypt_with_iv(token: &str, key: &MerchantKey, iv: &[u8; 16]) -> Option<Vec<u8>> {
    if token.is_empty() {
        return None;
    }

    let ciphertext = match STANDARD.decode(token) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("checksum token is not valid base64: {e}");
            return None;
        }
    };

    let decryptor = Aes128CbcDec::new_from_slices(key.as_bytes(), iv).ok()?;
    match decryptor.decrypt_padded_vec_mut::<Pkcs7>(&ciphertext) {
        Ok(plaintext) => Some(plaintext),
        Err(_) => {
            tracing::debug!(len = ciphertext.len(), "checksum token failed to decrypt");
            None
        }
    }
}
