//! Payment gateway hand-off.

use serde::{Deserialize, Serialize};

use crate::types::Price;

/// Body of `POST /payment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount: Price,
    /// Where the gateway sends the customer after paying.
    pub redirect_url: String,
}

/// Response of `POST /payment`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentResponse {
    /// Gateway page to send the customer to. Absent when the gateway
    /// refused the payment.
    pub pay_url: Option<String>,
}
