//! Callback command - verify a gateway callback form

use anyhow::Result;
use paykit_checksum::gateway::{verify_callback, CallbackVerification, RejectReason};
use paykit_checksum::MerchantConfig;

use crate::ui;

/// Returns whether the callback verified.
pub fn run(config: &MerchantConfig, form: &str, verbose: bool) -> Result<bool> {
    let fields = super::read_params_arg(form)?;

    match verify_callback(&fields, &config.merchant_key) {
        CallbackVerification::Verified(fields) => {
            ui::success("Callback checksum verified");
            if verbose {
                for (key, value) in fields.iter() {
                    ui::key_value(key, value.unwrap_or(""));
                }
            }
            Ok(true)
        }
        CallbackVerification::Rejected(RejectReason::MissingChecksum) => {
            ui::error("Callback has no CHECKSUMHASH field");
            Ok(false)
        }
        CallbackVerification::Rejected(RejectReason::ChecksumMismatch) => {
            ui::error("Checksum Mismatched");
            Ok(false)
        }
    }
}
