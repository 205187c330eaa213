//! CLI command implementations

pub mod callback;
pub mod generate;
pub mod payment;
pub mod status;
pub mod verify;

use anyhow::{Context, Result};
use paykit_checksum::{MerchantConfig, ParameterSet, SignaturePayload};
use std::path::Path;

/// Load the merchant configuration from a file, or from `PAYTM_*` variables.
pub fn load_config(config: Option<&Path>) -> Result<MerchantConfig> {
    let config = match config {
        Some(path) => MerchantConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => MerchantConfig::from_env()
            .context("No --config given and PAYTM_* environment is incomplete")?,
    };
    tracing::debug!(merchant_id = %config.merchant_id, "loaded merchant config");
    Ok(config)
}

/// Read a JSON argument given inline or as `@path`.
pub fn read_json_arg(arg: &str) -> Result<serde_json::Value> {
    let text = match arg.strip_prefix('@') {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?
        }
        None => arg.to_string(),
    };
    serde_json::from_str(&text).context("Argument is not valid JSON")
}

/// Parse a payload argument: a JSON object of parameters or a JSON string.
pub fn read_payload_arg(arg: &str) -> Result<SignaturePayload> {
    Ok(SignaturePayload::from_json(read_json_arg(arg)?)?)
}

/// Parse a parameter set argument: a JSON object.
pub fn read_params_arg(arg: &str) -> Result<ParameterSet> {
    Ok(ParameterSet::from_json(read_json_arg(arg)?)?)
}
