use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use cpg_common::CryptoAmount;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//--------------------------------------      PaymentId      ---------------------------------------------------------
/// A lightweight wrapper around the opaque payment identifier handed out to clients and quoted back by the
/// operator in approval commands.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(pub String);

impl PaymentId {
    /// Generate a fresh id of the form `PAY-1A2B3C4D`. 32 bits of entropy make collisions negligible at this
    /// system's scale; the store still re-rolls on a clash rather than overwrite.
    pub fn random() -> Self {
        let n: u32 = rand::thread_rng().gen();
        Self(format!("PAY-{n:08X}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PaymentId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for PaymentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//--------------------------------------    PaymentStatus    ---------------------------------------------------------
/// The approval state of a payment.
///
/// A payment starts out `Pending` and moves exactly once, to either `Approved` or `Rejected`. Both of those are
/// terminal; [`crate::traits::PaymentStore::transition_payment`] refuses to move a record that has left `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Approved,
    Rejected,
}

impl PaymentStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, PaymentStatus::Pending)
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Approved => write!(f, "approved"),
            PaymentStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid payment status: {0}")]
pub struct ConversionError(String);

impl FromStr for PaymentStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            s => Err(ConversionError(s.to_string())),
        }
    }
}

//--------------------------------------      NewPayment     ---------------------------------------------------------
/// The information needed to create a payment record. The id, status and creation time are assigned by the store.
#[derive(Debug, Clone, Serialize)]
pub struct NewPayment {
    /// Display label for whatever the customer is buying.
    pub plan: String,
    /// The fiat price, in USD.
    pub price_usd: f64,
    /// Lowercase currency code the customer chose to pay in, e.g. `btc`.
    pub currency: String,
    /// The exact crypto amount due, as computed by the price oracle at creation time.
    pub exact_amount: CryptoAmount,
}

//--------------------------------------    PaymentRecord    ---------------------------------------------------------
/// The stored representation of one conversion request and its approval state. Every field except `status` is
/// immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub status: PaymentStatus,
    pub plan: String,
    #[serde(rename = "priceUSD")]
    pub price_usd: f64,
    pub currency: String,
    pub exact_amount: CryptoAmount,
    pub created_at: DateTime<Utc>,
}
