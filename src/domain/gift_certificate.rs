//! Gift certificate models

use super::ids::Guid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Gift certificate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftCertificate {
    pub guid: Guid,
    pub code: String,
    pub store_code: String,
    pub currency: String,

    /// Purchase amount as a decimal string
    pub purchase_amount: String,

    #[serde(default)]
    pub recipient_name: Option<String>,

    #[serde(default)]
    pub sender_name: Option<String>,

    pub created: DateTime<Utc>,
}

/// Balance movement on a gift certificate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftCertificateTransaction {
    pub guid: Guid,

    /// Certificate the transaction applies to
    pub gift_certificate: Guid,

    /// Transaction type (authorization, capture, reversal)
    pub transaction_type: String,

    /// Amount as a decimal string
    pub amount: String,

    #[serde(default)]
    pub authorization_code: Option<String>,

    pub created: DateTime<Utc>,
}
