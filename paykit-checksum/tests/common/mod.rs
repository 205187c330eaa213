//! Shared fixtures for checksum integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use paykit_checksum::prelude::*;

/// Fixed 16-byte test key.
pub const TEST_KEY: &str = "kbzk1DSbJiV_O3p5";

/// A second key for key-sensitivity checks.
pub const OTHER_KEY: &str = "Q8s!r2Lm0pXv7TzA";

pub fn test_key() -> MerchantKey {
    TEST_KEY.parse().expect("test key is 16 bytes")
}

pub fn other_key() -> MerchantKey {
    OTHER_KEY.parse().expect("other key is 16 bytes")
}

/// Parameters of the order-status scenario.
pub fn order_params(order_id: &str) -> ParameterSet {
    ParameterSet::new()
        .with("MID", "merchant1")
        .with("ORDERID", order_id)
}

/// A typical checkout request.
pub fn checkout_params() -> ParameterSet {
    ParameterSet::new()
        .with("MID", "merchant1")
        .with("WEBSITE", "WEBSTAGING")
        .with("CHANNEL_ID", "WEB")
        .with("INDUSTRY_TYPE_ID", "Retail")
        .with("ORDER_ID", "ORD100")
        .with("CUST_ID", "CUST001")
        .with("TXN_AMOUNT", "100.00")
        .with("CALLBACK_URL", "https://shop.example/callback")
        .with("EMAIL", "null")
}

/// Salt source that always returns the same salt.
pub struct FixedSalt(pub &'static str);

#[async_trait]
impl SaltSource for FixedSalt {
    async fn salt(&self, _length: usize) -> Result<String> {
        Ok(self.0.to_string())
    }
}

/// Salt source whose entropy is never available.
pub struct FailingSalt;

#[async_trait]
impl SaltSource for FailingSalt {
    async fn salt(&self, _length: usize) -> Result<String> {
        Err(ChecksumError::RandomnessUnavailable(
            "entropy pool closed".to_string(),
        ))
    }
}
