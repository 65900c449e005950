//! Wire encoding helpers: query-string assembly and payment expansion.
//!
//! The query encoder serializes the flat request maps built by the
//! endpoint methods; [`expand_payment`] is the single wire-to-domain
//! translation for payments. Its inverse lives in the session-create
//! marshaling, which JSON-encodes caller data into the wire string form.

use serde_json::{Map, Value};

use crate::error::Error;
use crate::types::{Payment, PaymentCustomer, PaymentProduct, PaymentResponse};

/// Serializes a flat request map into a URL query string.
///
/// Keys and values are percent-encoded independently and joined in map
/// insertion order. Scalars render bare (`limit=1000`, not `limit="1000"`).
/// An empty map yields an empty string; the caller is responsible for not
/// emitting a dangling `?`.
pub(crate) fn query(data: &Map<String, Value>) -> String {
    data.iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&scalar(value))
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Renders a JSON scalar the way it appears in a query value.
fn scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Inflates a wire payment into its domain form.
///
/// All fields are copied; `customer.data` and `product.data` arrive as
/// JSON-encoded strings, and a present, non-empty string is parsed while
/// anything else becomes `None`. This must stay symmetric with the
/// encoding done at session creation or caller data is corrupted in
/// round-trip.
///
/// # Errors
///
/// Returns [`Error::Json`] if an encoded data field is not valid JSON.
pub fn expand_payment(response: PaymentResponse) -> Result<Payment, Error> {
    let customer = PaymentCustomer {
        id: response.customer.id,
        data: parse_data(response.customer.data)?,
    };
    let product = PaymentProduct {
        id: response.product.id,
        name: response.product.name,
        data: parse_data(response.product.data)?,
    };

    Ok(Payment {
        id: response.id,
        customer,
        product,
        sender: response.sender,
        receiver: response.receiver,
        amount: response.amount,
        paid_amount: response.paid_amount,
        status: response.status,
        coin: response.coin,
        created: response.created,
    })
}

/// Decodes an optional JSON-string field; empty and absent both map to
/// `None`.
fn parse_data(data: Option<String>) -> Result<Option<Value>, Error> {
    match data.as_deref() {
        Some(text) if !text.is_empty() => Ok(Some(serde_json::from_str(text)?)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::{Coin, CustomerResponse, PaymentStatus, ProductResponse};

    fn request_map(entries: &[(&str, Value)]) -> Map<String, Value> {
        entries
            .iter()
            .map(|(key, value)| ((*key).to_owned(), value.clone()))
            .collect()
    }

    fn wire_payment(customer_data: Option<&str>, product_data: Option<&str>) -> PaymentResponse {
        PaymentResponse {
            id: "PAYMENT_ID".to_owned(),
            customer: CustomerResponse {
                id: Some("42".to_owned()),
                data: customer_data.map(str::to_owned),
            },
            product: ProductResponse {
                id: Some("73".to_owned()),
                name: Some("product_name".to_owned()),
                data: product_data.map(str::to_owned),
            },
            sender: "0x001".to_owned(),
            receiver: "0x002".to_owned(),
            amount: "10.0".to_owned(),
            paid_amount: "10.0".to_owned(),
            status: PaymentStatus::Completed,
            coin: Coin {
                code: "USD_MULTI_1".to_owned(),
                name: "USD Stablecoins".to_owned(),
            },
            created: 1_612_325_106_000,
        }
    }

    #[test]
    fn query_preserves_insertion_order() {
        let data = request_map(&[
            ("formId", json!("FORM_ID")),
            ("limit", json!(1000)),
            ("page", json!(1)),
            ("sort", json!("desc")),
        ]);

        assert_eq!(query(&data), "formId=FORM_ID&limit=1000&page=1&sort=desc");
    }

    #[test]
    fn query_percent_encodes_keys_and_values() {
        let data = request_map(&[("a key", json!("a&b=c")), ("coin", json!("ETH/USD"))]);

        assert_eq!(query(&data), "a%20key=a%26b%3Dc&coin=ETH%2FUSD");
    }

    #[test]
    fn query_renders_scalars_bare() {
        let data = request_map(&[("limit", json!(1000)), ("active", json!(true))]);

        assert_eq!(query(&data), "limit=1000&active=true");
    }

    #[test]
    fn query_of_empty_map_is_empty() {
        assert_eq!(query(&Map::new()), "");
    }

    #[test]
    fn expand_parses_encoded_data_fields() {
        let payment = expand_payment(wire_payment(
            Some("{\"customer\":\"foo\"}"),
            Some("{\"product\":\"bar\"}"),
        ))
        .expect("expands");

        assert_eq!(payment.customer.data, Some(json!({ "customer": "foo" })));
        assert_eq!(payment.product.data, Some(json!({ "product": "bar" })));
        assert_eq!(payment.customer.id.as_deref(), Some("42"));
        assert_eq!(payment.amount, "10.0");
    }

    #[test]
    fn expand_maps_absent_data_to_none() {
        let payment = expand_payment(wire_payment(None, None)).expect("expands");

        assert_eq!(payment.customer.data, None);
        assert_eq!(payment.product.data, None);
    }

    #[test]
    fn expand_maps_empty_data_to_none() {
        let payment = expand_payment(wire_payment(Some(""), Some(""))).expect("expands");

        assert_eq!(payment.customer.data, None);
        assert_eq!(payment.product.data, None);
    }

    #[test]
    fn expand_rejects_malformed_data() {
        let err = expand_payment(wire_payment(Some("{not json"), None)).expect_err("rejects");
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn encode_then_expand_is_identity_on_json_values() {
        let original = json!({ "a": [1, { "b": "c" }], "d": null, "e": true });

        let encoded = serde_json::to_string(&original).expect("encodes");
        let payment = expand_payment(wire_payment(Some(&encoded), None)).expect("expands");

        assert_eq!(payment.customer.data, Some(original));
    }
}
