//! Payment gateway message helpers.
//!
//! Pure building blocks for the three places a merchant backend touches the
//! checksum: signing the parameters handed to the checkout page, checking the
//! callback the gateway posts back, and signing the order-status query whose
//! reply decides where the customer is sent. Nothing here performs I/O.

use serde::{Deserialize, Serialize};

use crate::cipher::MerchantKey;
use crate::params::{ParameterSet, CHECKSUM_FIELD};
use crate::signature::{generate_signature, verify_signature};
use crate::Result;

/// Return a copy of `params` with a fresh checksum in the checksum field.
pub async fn attach_checksum(params: &ParameterSet, key: &MerchantKey) -> Result<ParameterSet> {
    let checksum = generate_signature(params, key).await?;
    let mut signed = params.clone();
    signed.insert(CHECKSUM_FIELD, checksum);
    Ok(signed)
}

/// Why a callback was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// The callback carried no checksum field.
    MissingChecksum,
    /// The checksum did not verify against the fields.
    ChecksumMismatch,
}

/// Outcome of checking a gateway callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallbackVerification {
    /// The checksum matched; holds the fields without the checksum.
    Verified(ParameterSet),
    Rejected(RejectReason),
}

impl CallbackVerification {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified(_))
    }
}

/// Split the checksum off a callback form and verify the remaining fields.
pub fn verify_callback(fields: &ParameterSet, key: &MerchantKey) -> CallbackVerification {
    let Some(checksum) = fields.get(CHECKSUM_FIELD) else {
        tracing::warn!("callback has no {CHECKSUM_FIELD} field");
        return CallbackVerification::Rejected(RejectReason::MissingChecksum);
    };

    let remaining = fields.without(CHECKSUM_FIELD);
    if verify_signature(&remaining, key, checksum) {
        tracing::info!(order_id = remaining.get("ORDERID"), "checksum verified");
        CallbackVerification::Verified(remaining)
    } else {
        tracing::warn!(order_id = remaining.get("ORDERID"), "checksum mismatched");
        CallbackVerification::Rejected(RejectReason::ChecksumMismatch)
    }
}

/// Signed body of an order-status query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusRequest {
    #[serde(rename = "MID")]
    pub mid: String,
    #[serde(rename = "ORDERID")]
    pub order_id: String,
    #[serde(rename = "CHECKSUMHASH")]
    pub checksum: String,
}

impl OrderStatusRequest {
    /// Sign a status query for `order_id` under `key`.
    pub async fn signed(
        mid: impl Into<String>,
        order_id: impl Into<String>,
        key: &MerchantKey,
    ) -> Result<Self> {
        let mid = mid.into();
        let order_id = order_id.into();
        let checksum = generate_signature(&Self::params_for(&mid, &order_id), key).await?;
        Ok(Self {
            mid,
            order_id,
            checksum,
        })
    }

    fn params_for(mid: &str, order_id: &str) -> ParameterSet {
        ParameterSet::new()
            .with("MID", mid)
            .with("ORDERID", order_id)
    }

    /// The parameters covered by the checksum.
    pub fn params(&self) -> ParameterSet {
        Self::params_for(&self.mid, &self.order_id)
    }

    /// Check that the embedded checksum matches `mid` and `order_id`.
    pub fn verify(&self, key: &MerchantKey) -> bool {
        verify_signature(&self.params(), key, &self.checksum)
    }

    /// JSON body to post to the status endpoint.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Transaction status reported by the gateway.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxnStatus {
    #[serde(rename = "TXN_SUCCESS")]
    Success,
    #[serde(rename = "TXN_FAILURE")]
    Failure,
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(untagged)]
    Other(String),
}

/// The part of an order-status reply this crate interprets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusResponse {
    #[serde(rename = "ORDERID", default)]
    pub order_id: Option<String>,
    #[serde(rename = "STATUS")]
    pub status: TxnStatus,
    #[serde(rename = "RESPMSG", default)]
    pub message: Option<String>,
}

impl OrderStatusResponse {
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Where the customer goes after the status check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentOutcome {
    Success,
    Failure,
}

impl PaymentOutcome {
    /// Only a confirmed success counts; pending and unknown are failures.
    pub fn from_status(status: &TxnStatus) -> Self {
        match status {
            TxnStatus::Success => Self::Success,
            _ => Self::Failure,
        }
    }

    /// Redirect path and query for `order_id`.
    pub fn redirect_path(&self, order_id: &str) -> String {
        let page = match self {
            Self::Success => "success",
            Self::Failure => "failure",
        };
        format!("/{page}?orderId={order_id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> MerchantKey {
        "kbzk1DSbJiV_O3p5".parse().unwrap()
    }

    fn callback_fields() -> ParameterSet {
        ParameterSet::new()
            .with("MID", "merchant1")
            .with("ORDERID", "ORD100")
            .with("TXNAMOUNT", "10.00")
            .with("STATUS", "TXN_SUCCESS")
    }

    #[tokio::test]
    async fn test_attach_then_verify_callback() {
        let params = callback_fields();
        let signed = attach_checksum(&params, &test_key()).await.unwrap();
        assert!(!params.contains_key(CHECKSUM_FIELD));
        assert!(signed.get(CHECKSUM_FIELD).is_some());

        match verify_callback(&signed, &test_key()) {
            CallbackVerification::Verified(fields) => assert_eq!(fields, params),
            other => panic!("expected verified, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_tampered_callback_rejected() {
        let mut signed = attach_checksum(&callback_fields(), &test_key())
            .await
            .unwrap();
        signed.insert("TXNAMOUNT", "1.00");
        assert_eq!(
            verify_callback(&signed, &test_key()),
            CallbackVerification::Rejected(RejectReason::ChecksumMismatch)
        );
    }

    #[test]
    fn test_missing_checksum_rejected() {
        let result = verify_callback(&callback_fields(), &test_key());
        assert_eq!(
            result,
            CallbackVerification::Rejected(RejectReason::MissingChecksum)
        );
        assert!(!result.is_verified());
    }

    #[tokio::test]
    async fn test_order_status_request() {
        let request = OrderStatusRequest::signed("merchant1", "ORD100", &test_key())
            .await
            .unwrap();
        assert!(request.verify(&test_key()));

        let body: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
        assert_eq!(body["MID"], "merchant1");
        assert_eq!(body["ORDERID"], "ORD100");
        assert_eq!(body["CHECKSUMHASH"], request.checksum.as_str());

        let forged = OrderStatusRequest {
            order_id: "ORD101".into(),
            ..request
        };
        assert!(!forged.verify(&test_key()));
    }

    #[test]
    fn test_status_response_parsing() {
        let ok = OrderStatusResponse::from_json(
            r#"{"ORDERID":"ORD100","STATUS":"TXN_SUCCESS","RESPMSG":"Txn Success"}"#,
        )
        .unwrap();
        assert_eq!(ok.status, TxnStatus::Success);
        assert_eq!(PaymentOutcome::from_status(&ok.status), PaymentOutcome::Success);

        let pending = OrderStatusResponse::from_json(r#"{"STATUS":"PENDING"}"#).unwrap();
        assert_eq!(pending.status, TxnStatus::Pending);
        assert_eq!(
            PaymentOutcome::from_status(&pending.status),
            PaymentOutcome::Failure
        );

        let odd = OrderStatusResponse::from_json(r#"{"STATUS":"NO_RECORD_FOUND"}"#).unwrap();
        assert_eq!(odd.status, TxnStatus::Other("NO_RECORD_FOUND".into()));

        assert!(OrderStatusResponse::from_json("not json").is_err());
    }

    #[test]
    fn test_redirect_path() {
        assert_eq!(
            PaymentOutcome::Success.redirect_path("ORD100"),
            "/success?orderId=ORD100"
        );
        assert_eq!(
            PaymentOutcome::Failure.redirect_path("ORD100"),
            "/failure?orderId=ORD100"
        );
    }
}
