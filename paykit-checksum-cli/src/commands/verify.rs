//! Verify command - check a checksum against a parameter set

use anyhow::Result;
use paykit_checksum::{verify_payload, MerchantConfig};

use crate::ui;

/// Returns whether the checksum matched.
pub fn run(config: &MerchantConfig, params: &str, checksum: &str, _verbose: bool) -> Result<bool> {
    let payload = super::read_payload_arg(params)?;

    if verify_payload(payload, &config.merchant_key, checksum) {
        ui::success("Checksum verified");
        Ok(true)
    } else {
        ui::error("Checksum mismatched");
        Ok(false)
    }
}
