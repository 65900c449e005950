//! Payment lookup and listing.

use chrono::Utc;
use serde_json::{Map, json};

use crate::client::Client;
use crate::constants::{PAYMENT_LIST_PATH, PAYMENT_PATH};
use crate::encoding::expand_payment;
use crate::error::Error;
use crate::transport::Method;
use crate::types::{ListOptions, Payment, PaymentList, PaymentResponse};

/// Default page size when no limit is given.
const DEFAULT_LIMIT: u32 = 1000;

/// Future cushion added to the default `till` bound, in milliseconds.
///
/// Keeps transactions that are still settling visible in fresh listings.
const TILL_GRACE_MS: i64 = 3_600_000;

/// Payment query operations, scoped to a [`Client`].
#[derive(Debug, Clone, Copy)]
pub struct Payments<'a> {
    client: &'a Client,
}

impl<'a> Payments<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetches the payment associated with a checkout session.
    ///
    /// Returns `Ok(None)` when no payment exists for the session yet; that
    /// is a normal outcome, not an error.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyParameter`] if `session_id` is empty, raised before
    /// any request is made; otherwise the transport-core errors.
    pub async fn get_by_session(&self, session_id: &str) -> Result<Option<Payment>, Error> {
        if session_id.is_empty() {
            return Err(Error::EmptyParameter("sessionId"));
        }

        let mut data = Map::new();
        data.insert("sessionId".to_owned(), json!(session_id));

        let response: Option<PaymentResponse> = self
            .client
            .request(PAYMENT_PATH, Method::Get, Some(&data))
            .await?;

        response.map(expand_payment).transpose()
    }

    /// Lists payments collected by a payment form, paginated.
    ///
    /// Missing filters use the service defaults documented on
    /// [`ListOptions`]. Returns `Ok(None)` when the service reports no
    /// result set for the form.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyParameter`] if `form_id` is empty and
    /// [`Error::InvalidDate`] for unparseable date filters, both raised
    /// before any request is made; otherwise the transport-core errors.
    pub async fn list(
        &self,
        form_id: &str,
        opts: ListOptions,
    ) -> Result<Option<PaymentList<Payment>>, Error> {
        if form_id.is_empty() {
            return Err(Error::EmptyParameter("formId"));
        }

        let from_ts = match &opts.from {
            Some(filter) => filter.timestamp_millis()?,
            None => 0,
        };
        let till_ts = match &opts.till {
            Some(filter) => filter.timestamp_millis()?,
            None => Utc::now().timestamp_millis() + TILL_GRACE_MS,
        };

        let mut data = Map::new();
        data.insert("formId".to_owned(), json!(form_id));
        data.insert("limit".to_owned(), json!(opts.limit.unwrap_or(DEFAULT_LIMIT)));
        data.insert("page".to_owned(), json!(opts.page.unwrap_or(1)));
        data.insert(
            "sort".to_owned(),
            json!(opts.sort.unwrap_or_default().as_str()),
        );
        data.insert("fromTimestamp".to_owned(), json!(from_ts));
        data.insert("tillTimestamp".to_owned(), json!(till_ts));

        let response: Option<PaymentList<PaymentResponse>> = self
            .client
            .request(PAYMENT_LIST_PATH, Method::Get, Some(&data))
            .await?;

        let Some(page) = response else {
            return Ok(None);
        };

        let items = page
            .items
            .into_iter()
            .map(expand_payment)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(PaymentList {
            items,
            total: page.total,
            total_pages: page.total_pages,
            page: page.page,
        }))
    }
}
