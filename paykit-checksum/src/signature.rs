//! Checksum signature generation and verification.
//!
//! ```text
//! generate: params -> canonical -> salt -> salted digest -> encrypt -> token
//! verify:   token -> decrypt -> trailing salt -> salted digest -> compare
//! ```
//!
//! Both operations are stateless. Generation surfaces every failure to the
//! caller; verification reduces every failure, malformed or mismatched, to
//! `false` so a caller cannot tell the two apart.

use subtle::ConstantTimeEq;

use crate::cipher::{self, MerchantKey};
use crate::hash::{salted_digest, split_salt};
use crate::params::{ParameterSet, SignaturePayload};
use crate::salt::{OsSaltSource, SaltSource, SALT_LENGTH};
use crate::{ChecksumError, Result};

/// Generate a checksum token for a parameter set.
///
/// The checksum field is excluded from the canonical string if present; the
/// caller's set is not modified.
///
/// # Example
///
/// ```ignore
/// let key: MerchantKey = "kbzk1DSbJiV_O3p5".parse()?;
/// let params = ParameterSet::new().with("MID", "merchant1").with("ORDERID", "ORD100");
/// let token = generate_signature(&params, &key).await?;
/// assert!(verify_signature(&params, &key, &token));
/// ```
pub async fn generate_signature(params: &ParameterSet, key: &MerchantKey) -> Result<String> {
    generate_signature_with(params, key, &OsSaltSource).await
}

/// Generate a checksum token for an already canonical string.
pub async fn generate_signature_by_string(canonical: &str, key: &MerchantKey) -> Result<String> {
    generate_signature_with(canonical, key, &OsSaltSource).await
}

/// Generate a checksum token drawing the salt from `salts`.
pub async fn generate_signature_with<P, S>(payload: P, key: &MerchantKey, salts: &S) -> Result<String>
where
    P: Into<SignaturePayload>,
    S: SaltSource + ?Sized,
{
    let payload = payload.into();
    let canonical = payload.canonical();

    let salt = salts
        .salt(SALT_LENGTH)
        .await
        .map_err(ChecksumError::generation)?;
    if salt.len() != SALT_LENGTH {
        return Err(ChecksumError::generation(
            ChecksumError::RandomnessUnavailable(format!(
                "salt source returned {} bytes, expected {SALT_LENGTH}",
                salt.len()
            )),
        ));
    }

    let digest = salted_digest(&canonical, &salt);
    let token = cipher::encrypt(digest.as_bytes(), key).map_err(ChecksumError::generation)?;

    tracing::debug!(canonical_len = canonical.len(), "generated checksum");
    Ok(token)
}

/// Verify a checksum token against a parameter set.
///
/// The checksum field, if present in `params`, is ignored. Returns `false`
/// for a token that does not decrypt under `key` or whose digest does not
/// match; this function never fails.
pub fn verify_signature(params: &ParameterSet, key: &MerchantKey, checksum: &str) -> bool {
    verify_payload(params, key, checksum)
}

/// Verify a checksum token against an already canonical string.
pub fn verify_signature_by_string(canonical: &str, key: &MerchantKey, checksum: &str) -> bool {
    verify_payload(canonical, key, checksum)
}

/// Verify a checksum token against either payload shape.
pub fn verify_payload<P>(payload: P, key: &MerchantKey, checksum: &str) -> bool
where
    P: Into<SignaturePayload>,
{
    let payload = payload.into();
    let canonical = payload.canonical();

    let Some(decrypted) = cipher::decrypt(checksum, key) else {
        tracing::warn!("checksum could not be decrypted");
        return false;
    };
    let Ok(decrypted) = String::from_utf8(decrypted) else {
        tracing::warn!("decrypted checksum is not valid UTF-8");
        return false;
    };
    let Some((_, salt)) = split_salt(&decrypted, SALT_LENGTH) else {
        tracing::warn!("decrypted checksum is too short to carry a salt");
        return false;
    };

    let expected = salted_digest(&canonical, salt);
    let matched: bool = expected.as_bytes().ct_eq(decrypted.as_bytes()).into();
    if !matched {
        tracing::debug!("checksum mismatch");
    }
    matched
}
