//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use paykit_checksum::prelude::*;
//! ```

// Core types
pub use crate::cipher::MerchantKey;
pub use crate::params::{ParameterSet, SignaturePayload, CHECKSUM_FIELD};

// Error handling
pub use crate::errors::{ChecksumError, ChecksumErrorCode};
pub use crate::Result;

// Signature protocol
pub use crate::salt::{OsSaltSource, SaltSource};
pub use crate::signature::{generate_signature, verify_signature};

// Gateway helpers
pub use crate::config::MerchantConfig;
pub use crate::gateway::{
    attach_checksum, verify_callback, CallbackVerification, OrderStatusRequest,
    OrderStatusResponse, PaymentOutcome, TxnStatus,
};
