//! Balance queries.

use serde_json::{Map, json};

use crate::client::Client;
use crate::constants::BALANCE_PATH;
use crate::error::Error;
use crate::transport::Method;
use crate::types::{Balance, BalanceOptions};

/// Balance query operations, scoped to a [`Client`].
#[derive(Debug, Clone, Copy)]
pub struct Balances<'a> {
    client: &'a Client,
}

impl<'a> Balances<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetches user balances collected by a payment form.
    ///
    /// An empty-string `customer_id`/`product_id` filter queries the total
    /// across all customers/products and is sent on the wire; an unset
    /// filter omits the key entirely. An empty `coin` is treated as
    /// absent. Rows come back unchanged: balances carry no encoded
    /// sub-fields.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyParameter`] if `form_id` is empty, raised before any
    /// request is made; otherwise the transport-core errors.
    pub async fn get_all(
        &self,
        form_id: &str,
        opts: BalanceOptions,
    ) -> Result<Vec<Balance>, Error> {
        if form_id.is_empty() {
            return Err(Error::EmptyParameter("formId"));
        }

        let mut data = Map::new();
        data.insert("formLinkId".to_owned(), json!(form_id));
        if let Some(customer_id) = &opts.customer_id {
            data.insert("customerId".to_owned(), json!(customer_id));
        }
        if let Some(product_id) = &opts.product_id {
            data.insert("productId".to_owned(), json!(product_id));
        }
        if let Some(coin) = opts.coin.as_deref().filter(|coin| !coin.is_empty()) {
            data.insert("coin".to_owned(), json!(coin));
        }

        self.client
            .request(BALANCE_PATH, Method::Get, Some(&data))
            .await
    }
}
