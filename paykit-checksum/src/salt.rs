//! Random salt generation.
//!
//! Salts are drawn from the operating system CSPRNG, base64-encoded and cut
//! to the requested length. Entropy is gathered on tokio's blocking pool so a
//! caller serving many signature requests never stalls its executor on the OS
//! random source.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::{ChecksumError, Result};

/// Length of the salt mixed into every checksum.
pub const SALT_LENGTH: usize = 4;

/// Source of salts for signature generation.
///
/// Implementations must return exactly `length` characters and must fail with
/// [`ChecksumError::RandomnessUnavailable`] rather than fall back to a weaker
/// source.
#[async_trait]
pub trait SaltSource: Send + Sync {
    /// Draw a fresh salt of `length` characters.
    async fn salt(&self, length: usize) -> Result<String>;
}

/// Salt source backed by the operating system random number generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsSaltSource;

#[async_trait]
impl SaltSource for OsSaltSource {
    async fn salt(&self, length: usize) -> Result<String> {
        random_salt(length).await
    }
}

/// Generate a random salt of `length` base64 characters.
///
/// Three random bytes encode to four base64 characters, so
/// `ceil(length * 3 / 4)` bytes are always enough.
pub async fn random_salt(length: usize) -> Result<String> {
    let byte_len = (length * 3).div_ceil(4);

    let bytes = match tokio::runtime::Handle::try_current() {
        Ok(handle) => handle
            .spawn_blocking(move || fill_random(byte_len))
            .await
            .map_err(|e| ChecksumError::RandomnessUnavailable(e.to_string()))??,
        // No runtime to offload onto: draw inline.
        Err(_) => fill_random(byte_len)?,
    };

    let mut salt = STANDARD.encode(bytes);
    salt.truncate(length);
    Ok(salt)
}

fn fill_random(len: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    OsRng.try_fill_bytes(&mut buf).map_err(|e| {
        tracing::warn!("secure random source failed: {e}");
        ChecksumError::RandomnessUnavailable(e.to_string())
    })?;
    Ok(buf)
}
