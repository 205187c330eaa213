//! Salted SHA-256 digests.
//!
//! The salted digest is `hex(sha256(canonical || "|" || salt)) || salt`. The
//! salt travels inside the digest, so a verifier recovers it from the last
//! [`SALT_LENGTH`](crate::SALT_LENGTH) characters and recomputes the whole
//! string for comparison.

use sha2::{Digest, Sha256};

use crate::params::DELIMITER;

/// Compute the salt-suffixed hex digest of a canonical string.
pub fn salted_digest(canonical: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hasher.update([DELIMITER as u8]);
    hasher.update(salt.as_bytes());

    let mut out = hex::encode(hasher.finalize());
    out.push_str(salt);
    out
}

/// Split a salted digest into its hex part and trailing salt.
///
/// Returns `None` when the input is shorter than `salt_len` or the split
/// would fall inside a multi-byte character.
pub fn split_salt(digest: &str, salt_len: usize) -> Option<(&str, &str)> {
    let at = digest.len().checked_sub(salt_len)?;
    if !digest.is_char_boundary(at) {
        return None;
    }
    Some(digest.split_at(at))
}
