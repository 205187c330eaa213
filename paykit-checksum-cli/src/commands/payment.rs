//! Payment command - build signed checkout parameters

use anyhow::Result;
use paykit_checksum::gateway::attach_checksum;
use paykit_checksum::MerchantConfig;

pub async fn run(
    config: &MerchantConfig,
    order_id: &str,
    customer_id: &str,
    amount: &str,
    _verbose: bool,
) -> Result<()> {
    let params = config.payment_params(order_id, customer_id, amount);
    let signed = attach_checksum(&params, &config.merchant_key).await?;

    println!("{}", serde_json::to_string_pretty(&signed.to_json())?);
    Ok(())
}
