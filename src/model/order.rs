//! Checkout data: what the buyer types in, what goes over the wire, and what comes back.
//!
//! - [`OrderForm`] is raw buyer input and may be invalid.
//! - [`OrderRequest`] is only ever built from a validated form plus a basket snapshot.
//! - [`OrderResult`] is the service's acknowledgement.

use crate::model::{Price, ProductId};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Supported ways to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Card payment at checkout.
    Online,
    /// Cash or card on delivery.
    Cash,
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Online => f.write_str("online"),
            PaymentMethod::Cash => f.write_str("cash"),
        }
    }
}

/// Raised when a string names no known payment method.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "online" => Ok(PaymentMethod::Online),
            "cash" | "cash-on-delivery" | "when received" => Ok(PaymentMethod::Cash),
            _ => Err(UnknownPaymentMethod(s.to_string())),
        }
    }
}

/// First checkout step: how to pay and where to deliver.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub payment: Option<PaymentMethod>,
    pub address: String,
}

/// Second checkout step: how to reach the buyer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContactDetails {
    pub email: String,
    pub phone: String,
}

/// Everything the buyer supplied for one checkout attempt, unvalidated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderForm {
    pub payment: Option<PaymentMethod>,
    pub address: String,
    pub email: String,
    pub phone: String,
}

impl OrderForm {
    /// Merges the two checkout steps into one form.
    pub fn from_steps(payment: PaymentDetails, contacts: ContactDetails) -> Self {
        Self {
            payment: payment.payment,
            address: payment.address,
            email: contacts.email,
            phone: contacts.phone,
        }
    }
}

/// Body of `POST /order/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub payment: PaymentMethod,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub total: Price,
    pub items: Vec<ProductId>,
}

/// Type-safe identifier for accepted Orders, assigned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Successful response of `POST /order/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResult {
    pub id: OrderId,
    pub total: Price,
}
