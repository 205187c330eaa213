//! Generate command - sign a parameter set

use anyhow::Result;
use paykit_checksum::{generate_signature_with, MerchantConfig, OsSaltSource};

use crate::ui;

pub async fn run(config: &MerchantConfig, params: &str, raw: bool, _verbose: bool) -> Result<()> {
    let payload = super::read_payload_arg(params)?;
    let checksum = generate_signature_with(payload, &config.merchant_key, &OsSaltSource).await?;

    if raw {
        println!("{checksum}");
    } else {
        ui::success("Checksum generated");
        ui::key_value("CHECKSUMHASH", &checksum);
    }
    Ok(())
}
