//! Data model for the repaya API.
//!
//! Payments exist in two shapes: the wire form ([`PaymentResponse`]), where
//! arbitrary customer/product data travels as a JSON-encoded string, and
//! the domain form ([`Payment`]), where that data is a parsed value.
//! [`crate::encoding::expand_payment`] is the only translation point
//! between the two.
//!
//! Monetary quantities (`amount`, `paid_amount`, `balance`, prices) are
//! decimal strings taken verbatim from the wire. They are never converted
//! to floating point.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A created checkout session.
///
/// Redirect the customer to [`checkout_url`](Self::checkout_url) to start
/// the hosted checkout flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSession {
    /// Session identifier.
    pub id: String,
    /// Hosted checkout URL for the end customer.
    pub checkout_url: String,
}

/// Settlement currency descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    /// Short coin code, e.g. `ETH`.
    pub code: String,
    /// Display name, e.g. `Ether`.
    pub name: String,
}

/// Lifecycle state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Fully paid.
    Completed,
    /// Awaiting funds.
    Pending,
    /// Failed permanently.
    Failed,
    /// Canceled by a party.
    Canceled,
}

/// Customer fields of a domain payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentCustomer {
    /// Customer id supplied at checkout, if any.
    pub id: Option<String>,
    /// Arbitrary customer data supplied at checkout, parsed.
    pub data: Option<serde_json::Value>,
}

/// Product fields of a domain payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentProduct {
    /// Product id, if the checkout carried one.
    pub id: Option<String>,
    /// Product display name, if any.
    pub name: Option<String>,
    /// Arbitrary product data supplied at checkout, parsed.
    pub data: Option<serde_json::Value>,
}

/// A settled or in-flight payment, in domain form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Payment identifier.
    pub id: String,
    /// Customer association.
    pub customer: PaymentCustomer,
    /// Product association.
    pub product: PaymentProduct,
    /// Sender address.
    pub sender: String,
    /// Receiver address.
    pub receiver: String,
    /// Requested amount, decimal string.
    pub amount: String,
    /// Amount actually paid, decimal string.
    pub paid_amount: String,
    /// Lifecycle state.
    pub status: PaymentStatus,
    /// Settlement coin.
    pub coin: Coin,
    /// Creation time, milliseconds since the Unix epoch.
    pub created: i64,
}

/// Customer fields of a wire payment; `data` is a JSON-encoded string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerResponse {
    /// Customer id, if any.
    #[serde(default)]
    pub id: Option<String>,
    /// JSON-encoded customer data, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// Product fields of a wire payment; `data` is a JSON-encoded string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductResponse {
    /// Product id, if any.
    #[serde(default)]
    pub id: Option<String>,
    /// Product display name, if any.
    #[serde(default)]
    pub name: Option<String>,
    /// JSON-encoded product data, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// A payment as it appears on the wire.
///
/// Identical to [`Payment`] except that `customer.data` / `product.data`
/// are JSON-encoded strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    /// Payment identifier.
    pub id: String,
    /// Customer association, wire form.
    pub customer: CustomerResponse,
    /// Product association, wire form.
    pub product: ProductResponse,
    /// Sender address.
    pub sender: String,
    /// Receiver address.
    pub receiver: String,
    /// Requested amount, decimal string.
    pub amount: String,
    /// Amount actually paid, decimal string.
    pub paid_amount: String,
    /// Lifecycle state.
    pub status: PaymentStatus,
    /// Settlement coin.
    pub coin: Coin,
    /// Creation time, milliseconds since the Unix epoch.
    pub created: i64,
}

/// One page of payment results.
///
/// Generic over the payment representation: the wire carries
/// `PaymentList<PaymentResponse>`, callers receive `PaymentList<Payment>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentList<P> {
    /// Payments on this page.
    pub items: Vec<P>,
    /// Total number of matching payments.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Current page, starting from 1.
    pub page: u64,
}

/// A per-customer, per-product balance row.
///
/// Rows are fresh query results, never aggregated or cached locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    /// Customer id, or `None` for a total row.
    pub customer_id: Option<String>,
    /// Product id, or `None` for a total row.
    pub product_id: Option<String>,
    /// Aggregate balance, decimal string.
    pub balance: String,
    /// Settlement coin.
    pub coin: Coin,
}

/// Customer identification attached to a checkout session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutCustomer {
    /// Id used to match the payment sender with a user in your database.
    ///
    /// Without it, payments can only be matched by crypto address.
    pub id: String,
    /// Arbitrary data to round-trip through the payment record.
    pub data: Option<serde_json::Value>,
}

/// Product information for a product checkout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutProduct {
    /// Product id.
    pub id: String,
    /// Product display name.
    pub name: String,
    /// Arbitrary data to round-trip through the payment record.
    pub data: Option<serde_json::Value>,
}

/// Checkout session options.
///
/// The variants mirror the two kinds of checkout the API supports: a
/// product purchase with per-coin prices, or a plain payment request
/// identified by customer alone. The variant is the discriminant; there is
/// no field-presence probing anywhere downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOptions {
    /// Product purchase: product descriptor plus per-coin prices.
    WithProduct {
        /// Paying customer, if known ahead of time.
        customer: Option<CheckoutCustomer>,
        /// Idempotency key preventing duplicate sessions on retry.
        client_id: Option<String>,
        /// The product being purchased.
        product: CheckoutProduct,
        /// Price per coin code, decimal strings, forwarded verbatim.
        price: BTreeMap<String, String>,
    },
    /// Plain payment request with no product attached.
    CustomerOnly {
        /// Paying customer, if known ahead of time.
        customer: Option<CheckoutCustomer>,
        /// Idempotency key preventing duplicate sessions on retry.
        client_id: Option<String>,
    },
}

impl Default for CheckoutOptions {
    fn default() -> Self {
        Self::CustomerOnly {
            customer: None,
            client_id: None,
        }
    }
}

impl CheckoutOptions {
    /// Returns the customer common to both variants, if set.
    #[must_use]
    pub fn customer(&self) -> Option<&CheckoutCustomer> {
        match self {
            Self::WithProduct { customer, .. } | Self::CustomerOnly { customer, .. } => {
                customer.as_ref()
            }
        }
    }

    /// Returns the idempotency key common to both variants, if set.
    #[must_use]
    pub fn client_id(&self) -> Option<&str> {
        match self {
            Self::WithProduct { client_id, .. } | Self::CustomerOnly { client_id, .. } => {
                client_id.as_deref()
            }
        }
    }
}

/// Sort direction for payment listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sort {
    /// Oldest first.
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

impl Sort {
    /// Returns the direction as its wire string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A point in time accepted by the payment list filters.
#[derive(Debug, Clone, PartialEq)]
pub enum DateFilter {
    /// Milliseconds since the Unix epoch.
    Millis(i64),
    /// An explicit UTC instant.
    DateTime(DateTime<Utc>),
    /// An ISO-8601 date or datetime string, parsed at call time.
    /// Naive values (no offset) are interpreted as UTC.
    Iso(String),
}

impl DateFilter {
    /// Resolves the filter to milliseconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDate`] if an ISO string cannot be parsed.
    pub fn timestamp_millis(&self) -> Result<i64, Error> {
        match self {
            Self::Millis(ms) => Ok(*ms),
            Self::DateTime(dt) => Ok(dt.timestamp_millis()),
            Self::Iso(text) => parse_iso_millis(text),
        }
    }
}

impl From<i64> for DateFilter {
    fn from(ms: i64) -> Self {
        Self::Millis(ms)
    }
}

impl From<DateTime<Utc>> for DateFilter {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }
}

impl From<&str> for DateFilter {
    fn from(text: &str) -> Self {
        Self::Iso(text.to_owned())
    }
}

impl From<String> for DateFilter {
    fn from(text: String) -> Self {
        Self::Iso(text)
    }
}

/// Parses an ISO-8601 instant, naive datetime, or date into epoch
/// milliseconds, most specific format first.
fn parse_iso_millis(text: &str) -> Result<i64, Error> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.timestamp_millis());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc().timestamp_millis());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis());
    }
    Err(Error::InvalidDate(text.to_owned()))
}

/// Filters for [`Payments::list`](crate::payments::Payments::list).
///
/// Unset fields fall back to the service defaults: limit 1000, page 1,
/// descending order, and the full time range up to one hour from now. The
/// future cushion on `till` keeps in-flight transactions visible in fresh
/// listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    /// Include payments created at or after this point.
    pub from: Option<DateFilter>,
    /// Include payments created at or before this point.
    pub till: Option<DateFilter>,
    /// Maximum number of items per page.
    pub limit: Option<u32>,
    /// Page number, starting from 1.
    pub page: Option<u32>,
    /// Sort direction by creation time.
    pub sort: Option<Sort>,
}

/// Filters for [`Balances::get_all`](crate::balances::Balances::get_all).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceOptions {
    /// Filter by customer id. `Some("")` queries the total across all
    /// customers, which is different from `None` (no customer filter).
    pub customer_id: Option<String>,
    /// Filter by product id, with the same empty-string semantics.
    pub product_id: Option<String>,
    /// Filter by coin code. An empty string is treated as absent.
    pub coin: Option<String>,
}
