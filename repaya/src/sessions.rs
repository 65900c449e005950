//! Checkout session creation.

use serde_json::{Map, Value, json};

use crate::client::Client;
use crate::constants::SESSION_PATH;
use crate::error::Error;
use crate::transport::Method;
use crate::types::{CheckoutOptions, PaymentSession};

/// Payment session operations, scoped to a [`Client`].
#[derive(Debug, Clone, Copy)]
pub struct Sessions<'a> {
    client: &'a Client,
}

impl<'a> Sessions<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Creates a payment session to initiate the checkout flow.
    ///
    /// Caller-supplied `data` on the customer and product is JSON-encoded
    /// into a string for the wire; [`crate::encoding::expand_payment`]
    /// parses it back when the resulting payment is read. Returns the
    /// session descriptor; redirect the customer to its checkout URL.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyParameter`] if `form_id` is empty, raised before any
    /// request is made; otherwise the transport-core errors.
    pub async fn create(
        &self,
        form_id: &str,
        options: CheckoutOptions,
    ) -> Result<PaymentSession, Error> {
        if form_id.is_empty() {
            return Err(Error::EmptyParameter("formId"));
        }

        let mut data = Map::new();
        data.insert("formLinkId".to_owned(), json!(form_id));
        if let Some(client_id) = options.client_id() {
            data.insert("clientId".to_owned(), json!(client_id));
        }

        if let Some(customer) = options.customer() {
            let mut entry = Map::new();
            entry.insert("id".to_owned(), json!(customer.id));
            if let Some(value) = &customer.data {
                entry.insert("data".to_owned(), json!(serde_json::to_string(value)?));
            }
            data.insert("customer".to_owned(), Value::Object(entry));
        }

        if let CheckoutOptions::WithProduct { product, price, .. } = &options {
            let mut entry = Map::new();
            entry.insert("id".to_owned(), json!(product.id));
            entry.insert("name".to_owned(), json!(product.name));
            if let Some(value) = &product.data {
                entry.insert("data".to_owned(), json!(serde_json::to_string(value)?));
            }
            data.insert("product".to_owned(), Value::Object(entry));
            data.insert("price".to_owned(), json!(price));
        }

        self.client
            .request(SESSION_PATH, Method::Post, Some(&data))
            .await
    }
}
