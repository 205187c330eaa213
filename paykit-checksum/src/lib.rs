//! Paykit checksum library.
//!
//! Keyed checksums for payment gateway parameters. A checksum token lets a
//! counterparty holding the same merchant key confirm that a set of request
//! or response parameters was not altered in transit.
//!
//! # Scheme
//!
//! - **Canonicalization**: values ordered by key, joined with `|`
//! - **Salted digest**: `hex(sha256(canonical | salt)) || salt`, 4-character salt
//! - **Encryption**: AES-128-CBC under the merchant key and a fixed IV, base64
//!
//! The crate is stateless: every operation takes its key and parameters
//! explicitly and nothing is shared between calls.
//!
//! # Example
//!
//! ```ignore
//! use paykit_checksum::{generate_signature, verify_signature, MerchantKey, ParameterSet};
//!
//! let key: MerchantKey = "kbzk1DSbJiV_O3p5".parse()?;
//! let params = ParameterSet::new()
//!     .with("MID", "merchant1")
//!     .with("ORDERID", "ORD100");
//!
//! let checksum = generate_signature(&params, &key).await?;
//! assert!(verify_signature(&params, &key, &checksum));
//! ```

pub mod cipher;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod hash;
pub mod params;
pub mod prelude;
pub mod salt;
pub mod signature;

pub use cipher::{MerchantKey, DEFAULT_IV, KEY_SIZE};
pub use config::MerchantConfig;
pub use errors::{ChecksumError, ChecksumErrorCode};
pub use params::{canonicalize, ParameterSet, SignaturePayload, CHECKSUM_FIELD};
pub use salt::{random_salt, OsSaltSource, SaltSource, SALT_LENGTH};
pub use signature::{
    generate_signature, generate_signature_by_string, generate_signature_with, verify_payload,
    verify_signature, verify_signature_by_string,
};

/// Convenience result type for checksum operations.
pub type Result<T> = std::result::Result<T, ChecksumError>;
