//! Status commands - order-status request and response handling

use anyhow::{Context, Result};
use paykit_checksum::gateway::{OrderStatusRequest, OrderStatusResponse, PaymentOutcome};
use paykit_checksum::MerchantConfig;

use crate::ui;

/// Print the signed order-status request body.
pub async fn request(config: &MerchantConfig, order_id: &str, raw: bool) -> Result<()> {
    let request =
        OrderStatusRequest::signed(&config.merchant_id, order_id, &config.merchant_key).await?;
    let body = request.to_json()?;

    if raw {
        println!("{body}");
    } else {
        ui::header("Order Status Request");
        ui::key_value("Endpoint", &config.status_endpoint);
        ui::key_value("Body", &body);
    }
    Ok(())
}

/// Interpret an order-status response and print the redirect target.
pub fn outcome(response: &str, order_id: Option<&str>) -> Result<()> {
    let body = match response.strip_prefix('@') {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?
        }
        None => response.to_string(),
    };
    let response = OrderStatusResponse::from_json(&body)?;

    let order_id = order_id
        .map(str::to_string)
        .or_else(|| response.order_id.clone())
        .context("Response has no ORDERID; pass --order-id")?;

    let outcome = PaymentOutcome::from_status(&response.status);
    match outcome {
        PaymentOutcome::Success => {
            tracing::info!(%order_id, "payment successful");
            ui::success(&format!("Payment successful for order {order_id}"));
        }
        PaymentOutcome::Failure => {
            tracing::warn!(%order_id, status = ?response.status, "payment failed");
            ui::error(&format!("Payment failed for order {order_id}"));
        }
    }
    ui::key_value("Redirect", &outcome.redirect_path(&order_id));
    if let Some(message) = &response.message {
        ui::info(message);
    }
    Ok(())
}
