//! Error types for checksum operations.
//!
//! Generation-side failures are surfaced to the caller as [`ChecksumError`].
//! Verification never produces an error for a bad token: a token that fails to
//! decode, decrypt or match is reported as `false`.

/// Error codes for FFI and HTTP integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ChecksumErrorCode {
    /// Parameters are neither a string nor a key-value mapping
    InvalidInput = 1000,
    /// Merchant key has the wrong length or encoding
    InvalidKey = 1001,
    /// Secure random source could not supply bytes
    RandomnessUnavailable = 2000,
    /// Encryption of the salted digest failed
    Encryption = 3000,
    /// Signature generation failed downstream
    SignatureGeneration = 3001,
    /// Configuration missing or invalid
    Config = 4000,
    /// Serialization error
    Serialization = 5000,
}

/// Comprehensive error type for checksum operations.
#[derive(Debug, thiserror::Error)]
pub enum ChecksumError {
    /// Parameters of the wrong shape.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Key is not usable as a 128-bit cipher key.
    #[error("invalid merchant key: {0}")]
    InvalidKey(String),

    /// The secure random source failed; never replaced by a weaker source.
    #[error("secure randomness unavailable: {0}")]
    RandomnessUnavailable(String),

    /// Plaintext missing or cipher failure.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// A downstream step of signature generation failed.
    #[error("failed to generate signature: {0}")]
    SignatureGeneration(#[source] Box<ChecksumError>),

    /// Configuration missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ChecksumError {
    /// Get the error code for FFI/HTTP integration.
    pub fn code(&self) -> ChecksumErrorCode {
        match self {
            Self::InvalidInput(_) => ChecksumErrorCode::InvalidInput,
            Self::InvalidKey(_) => ChecksumErrorCode::InvalidKey,
            Self::RandomnessUnavailable(_) => ChecksumErrorCode::RandomnessUnavailable,
            Self::Encryption(_) => ChecksumErrorCode::Encryption,
            Self::SignatureGeneration(_) => ChecksumErrorCode::SignatureGeneration,
            Self::Config(_) => ChecksumErrorCode::Config,
            Self::Serialization(_) => ChecksumErrorCode::Serialization,
        }
    }

    /// Returns true if retrying the same call may succeed.
    ///
    /// Every generation attempt draws a fresh salt, so retrying after an
    /// entropy failure is always safe.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RandomnessUnavailable(_) => true,
            Self::SignatureGeneration(inner) => inner.is_retryable(),
            _ => false,
        }
    }

    /// Wrap a downstream failure as a signature generation error.
    ///
    /// Errors that already are generation errors are returned unchanged.
    pub fn generation(err: ChecksumError) -> Self {
        match err {
            err @ Self::SignatureGeneration(_) => err,
            other => Self::SignatureGeneration(Box::new(other)),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }
}

impl From<serde_json::Error> for ChecksumError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = ChecksumError::RandomnessUnavailable("os rng".to_string());
        assert_eq!(err.code(), ChecksumErrorCode::RandomnessUnavailable);
        assert!(err.is_retryable());

        let err = ChecksumError::invalid_input("expected object");
        assert_eq!(err.code(), ChecksumErrorCode::InvalidInput);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_generation_wrapping() {
        let err = ChecksumError::generation(ChecksumError::RandomnessUnavailable("x".into()));
        assert_eq!(err.code(), ChecksumErrorCode::SignatureGeneration);
        assert!(err.is_retryable());
        assert!(err.to_string().contains("secure randomness unavailable"));

        // No double wrapping
        let again = ChecksumError::generation(err);
        match again {
            ChecksumError::SignatureGeneration(inner) => {
                assert_eq!(inner.code(), ChecksumErrorCode::RandomnessUnavailable)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_display() {
        let err = ChecksumError::Encryption("plaintext is empty".into());
        assert_eq!(err.to_string(), "encryption failed: plaintext is empty");
    }
}
