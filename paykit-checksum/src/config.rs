//! Merchant configuration.

use std::path::Path;

use serde::Deserialize;

use crate::cipher::MerchantKey;
use crate::params::ParameterSet;
use crate::{ChecksumError, Result};

/// Staging order-status endpoint.
pub const STAGING_STATUS_ENDPOINT: &str = "https://securegw-stage.paytm.in/order/status";

/// Merchant credentials and the fixed fields of every payment request.
#[derive(Clone, Debug, Deserialize)]
pub struct MerchantConfig {
    /// Merchant identifier issued by the gateway.
    pub merchant_id: String,

    /// Shared secret for checksums.
    pub merchant_key: MerchantKey,

    #[serde(default = "default_website")]
    pub website: String,

    #[serde(default = "default_channel_id")]
    pub channel_id: String,

    #[serde(default = "default_industry_type")]
    pub industry_type: String,

    /// Where the gateway posts the payment callback.
    #[serde(default)]
    pub callback_url: Option<String>,

    #[serde(default = "default_status_endpoint")]
    pub status_endpoint: String,
}

fn default_website() -> String {
    "WEBSTAGING".to_string()
}

fn default_channel_id() -> String {
    "WEB".to_string()
}

fn default_industry_type() -> String {
    "Retail".to_string()
}

fn default_status_endpoint() -> String {
    STAGING_STATUS_ENDPOINT.to_string()
}

impl MerchantConfig {
    /// Create a configuration with staging defaults.
    pub fn new(merchant_id: impl Into<String>, merchant_key: MerchantKey) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            merchant_key,
            website: default_website(),
            channel_id: default_channel_id(),
            industry_type: default_industry_type(),
            callback_url: None,
            status_endpoint: default_status_endpoint(),
        }
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = website.into();
        self
    }

    pub fn with_channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    pub fn with_industry_type(mut self, industry_type: impl Into<String>) -> Self {
        self.industry_type = industry_type.into();
        self
    }

    /// Set the callback URL.
    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    /// Set the order-status endpoint.
    pub fn with_status_endpoint(mut self, url: impl Into<String>) -> Self {
        self.status_endpoint = url.into();
        self
    }

    /// Load from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ChecksumError::Config(format!("{}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `PAYTM_*` environment variables.
    ///
    /// `PAYTM_MID` and `PAYTM_MERCHANT_KEY` are required; the rest fall back to
    /// staging defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| {
            lookup(name).ok_or_else(|| ChecksumError::Config(format!("{name} is not set")))
        };

        let merchant_key: MerchantKey = require("PAYTM_MERCHANT_KEY")?.parse()?;
        let mut config = Self::new(require("PAYTM_MID")?, merchant_key);

        if let Some(v) = lookup("PAYTM_WEBSITE") {
            config.website = v;
        }
        if let Some(v) = lookup("PAYTM_CHANNEL_ID") {
            config.channel_id = v;
        }
        if let Some(v) = lookup("PAYTM_INDUSTRY_TYPE") {
            config.industry_type = v;
        }
        if let Some(v) = lookup("PAYTM_CALLBACK_URL") {
            config.callback_url = Some(v);
        }
        if let Some(v) = lookup("PAYTM_STATUS_ENDPOINT") {
            config.status_endpoint = v;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check fields the gateway will reject.
    pub fn validate(&self) -> Result<()> {
        if self.merchant_id.trim().is_empty() {
            return Err(ChecksumError::Config("merchant_id is empty".into()));
        }
        if !self.status_endpoint.starts_with("https://") {
            return Err(ChecksumError::Config(format!(
                "status_endpoint must be https: {}",
                self.status_endpoint
            )));
        }
        Ok(())
    }

    /// Base parameters of a payment request, ready to be signed.
    pub fn payment_params(
        &self,
        order_id: impl Into<String>,
        customer_id: impl Into<String>,
        amount: impl Into<String>,
    ) -> ParameterSet {
        let mut params = ParameterSet::new()
            .with("MID", self.merchant_id.as_str())
            .with("WEBSITE", self.website.as_str())
            .with("CHANNEL_ID", self.channel_id.as_str())
            .with("INDUSTRY_TYPE_ID", self.industry_type.as_str())
            .with("ORDER_ID", order_id)
            .with("CUST_ID", customer_id)
            .with("TXN_AMOUNT", amount);
        if let Some(url) = &self.callback_url {
            params.insert("CALLBACK_URL", url.as_str());
        }
        params
    }
}
