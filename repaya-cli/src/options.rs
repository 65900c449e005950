//! Option-word parsing for the command surface.
//!
//! Commands accept trailing `KEY=VALUE` words. Keys are validated against
//! a per-command table, dotted keys nest into a generic JSON tree, and the
//! tree is then converted into the typed inputs of the client library.
//! All of this stays in the CLI layer; the core never sees option words.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use repaya::types::{
    BalanceOptions, CheckoutCustomer, CheckoutOptions, CheckoutProduct, DateFilter, ListOptions,
    Sort,
};

/// Allowed option keys for `sessions.create`, on top of the price wildcard.
pub(crate) const SESSION_OPTIONS: &[&str] = &[
    "customer.id",
    "customer.data",
    "product.id",
    "product.name",
    "product.data",
    "clientId",
];

/// Wildcard prefix admitting per-coin price options (`price.ETH=1.0`).
pub(crate) const PRICE_PREFIX: &str = "price.";

/// Allowed option keys for `payments.list`.
pub(crate) const LIST_OPTIONS: &[&str] = &["from", "till", "sort", "limit", "page"];

/// Allowed option keys for `balances.getAll`.
pub(crate) const BALANCE_OPTIONS: &[&str] = &["customerId", "productId", "coin"];

/// Splits a `KEY=VALUE` word. A missing `=` is an error; a missing value
/// is the empty string (`customerId=` is a meaningful filter).
pub(crate) fn split_option(word: &str) -> Result<(&str, &str), String> {
    word.split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got \"{word}\""))
}

/// Validates option keys against the allowed set.
///
/// `allow_price_wildcard` admits any `price.<COIN>` key on top of the
/// fixed set; every other unknown key is rejected.
pub(crate) fn check_options(
    pairs: &[(String, String)],
    allowed: &[&str],
    allow_price_wildcard: bool,
) -> Result<(), String> {
    for (key, _) in pairs {
        if allow_price_wildcard && key.starts_with(PRICE_PREFIX) {
            continue;
        }
        if !allowed.contains(&key.as_str()) {
            return Err(format!("unknown option \"{key}\""));
        }
    }
    Ok(())
}

/// Inserts `value` at a dotted path into a JSON object tree, recursively.
///
/// `customer.id=42` becomes `{"customer": {"id": "42"}}`. A non-object
/// node in the way is replaced; the last write wins.
pub(crate) fn insert_dotted(tree: &mut Map<String, Value>, key: &str, value: &str) {
    match key.split_once('.') {
        None => {
            tree.insert(key.to_owned(), Value::String(value.to_owned()));
        }
        Some((head, rest)) => {
            let entry = tree
                .entry(head.to_owned())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            let child = entry.as_object_mut().expect("object just ensured");
            insert_dotted(child, rest, value);
        }
    }
}

/// Parses option words into the nested tree: split, validate, nest.
pub(crate) fn parse_options(
    words: &[String],
    allowed: &[&str],
    allow_price_wildcard: bool,
) -> Result<Map<String, Value>, String> {
    let mut pairs = Vec::with_capacity(words.len());
    for word in words {
        let (key, value) = split_option(word)?;
        pairs.push((key.to_owned(), value.to_owned()));
    }
    check_options(&pairs, allowed, allow_price_wildcard)?;

    let mut tree = Map::new();
    for (key, value) in &pairs {
        insert_dotted(&mut tree, key, value);
    }
    Ok(tree)
}

fn string_at(tree: &Map<String, Value>, key: &str) -> Option<String> {
    tree.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Builds checkout options from the nested option tree.
///
/// The product variant is selected when `product.*` or `price.*` options
/// appeared; both halves must then be present, since the API requires a
/// priced product.
pub(crate) fn checkout_options(tree: &Map<String, Value>) -> Result<CheckoutOptions, String> {
    let client_id = string_at(tree, "clientId");
    let customer = match tree.get("customer").and_then(Value::as_object) {
        Some(customer) => Some(CheckoutCustomer {
            id: string_at(customer, "id").ok_or("missing option \"customer.id\"")?,
            data: customer.get("data").cloned(),
        }),
        None => None,
    };

    let product = tree.get("product").and_then(Value::as_object);
    let price = tree.get("price").and_then(Value::as_object);

    match (product, price) {
        (None, None) => Ok(CheckoutOptions::CustomerOnly {
            customer,
            client_id,
        }),
        (Some(product), Some(price)) => {
            let price = price
                .iter()
                .map(|(coin, value)| match value {
                    Value::String(text) => Ok((coin.clone(), text.clone())),
                    _ => Err(format!("invalid price for \"{coin}\"")),
                })
                .collect::<Result<BTreeMap<_, _>, _>>()?;

            Ok(CheckoutOptions::WithProduct {
                customer,
                client_id,
                product: CheckoutProduct {
                    id: string_at(product, "id").ok_or("missing option \"product.id\"")?,
                    name: string_at(product, "name").ok_or("missing option \"product.name\"")?,
                    data: product.get("data").cloned(),
                },
                price,
            })
        }
        (Some(_), None) => Err("product options require at least one price.<COIN> option".into()),
        (None, Some(_)) => Err("price options require product.id and product.name".into()),
    }
}

/// Builds list options from the nested option tree.
pub(crate) fn list_options(tree: &Map<String, Value>) -> Result<ListOptions, String> {
    let mut opts = ListOptions::default();

    if let Some(from) = string_at(tree, "from") {
        opts.from = Some(DateFilter::Iso(from));
    }
    if let Some(till) = string_at(tree, "till") {
        opts.till = Some(DateFilter::Iso(till));
    }
    if let Some(limit) = string_at(tree, "limit") {
        opts.limit = Some(
            limit
                .parse()
                .map_err(|_| format!("invalid limit \"{limit}\""))?,
        );
    }
    if let Some(page) = string_at(tree, "page") {
        opts.page = Some(
            page.parse()
                .map_err(|_| format!("invalid page \"{page}\""))?,
        );
    }
    if let Some(sort) = string_at(tree, "sort") {
        opts.sort = Some(match sort.as_str() {
            "asc" => Sort::Asc,
            "desc" => Sort::Desc,
            other => return Err(format!("invalid sort \"{other}\", expected \"asc\" or \"desc\"")),
        });
    }

    Ok(opts)
}

/// Builds balance options from the nested option tree.
///
/// An explicit `customerId=` keeps its empty value: it means "total across
/// all customers", which is different from omitting the option.
pub(crate) fn balance_options(tree: &Map<String, Value>) -> BalanceOptions {
    BalanceOptions {
        customer_id: string_at(tree, "customerId"),
        product_id: string_at(tree, "productId"),
        coin: string_at(tree, "coin"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn words(words: &[&str]) -> Vec<String> {
        words.iter().map(|word| (*word).to_owned()).collect()
    }

    #[test]
    fn split_requires_an_equals_sign() {
        assert_eq!(split_option("limit=10"), Ok(("limit", "10")));
        assert_eq!(split_option("customerId="), Ok(("customerId", "")));
        assert!(split_option("limit").is_err());
    }

    #[test]
    fn unknown_options_are_rejected() {
        let err = parse_options(&words(&["bogus=1"]), LIST_OPTIONS, false).expect_err("unknown");
        assert_eq!(err, "unknown option \"bogus\"");
    }

    #[test]
    fn price_wildcard_is_admitted_only_for_sessions() {
        assert!(parse_options(&words(&["price.ETH=1.0"]), SESSION_OPTIONS, true).is_ok());
        assert!(parse_options(&words(&["price.ETH=1.0"]), LIST_OPTIONS, false).is_err());
    }

    #[test]
    fn dotted_keys_nest_into_a_tree() {
        let mut tree = Map::new();
        insert_dotted(&mut tree, "customer.id", "42");
        insert_dotted(&mut tree, "customer.data", "hello");
        insert_dotted(&mut tree, "clientId", "abc");

        assert_eq!(
            Value::Object(tree),
            json!({
                "customer": { "id": "42", "data": "hello" },
                "clientId": "abc"
            })
        );
    }

    #[test]
    fn deep_paths_create_intermediate_objects() {
        let mut tree = Map::new();
        insert_dotted(&mut tree, "a.b.c", "v");

        assert_eq!(Value::Object(tree), json!({ "a": { "b": { "c": "v" } } }));
    }

    #[test]
    fn plain_options_build_a_customer_only_checkout() {
        let tree = parse_options(
            &words(&["customer.id=42", "customer.data=hello", "clientId=abc"]),
            SESSION_OPTIONS,
            true,
        )
        .expect("parses");

        let options = checkout_options(&tree).expect("converts");
        assert_eq!(
            options,
            CheckoutOptions::CustomerOnly {
                customer: Some(CheckoutCustomer {
                    id: "42".to_owned(),
                    data: Some(json!("hello")),
                }),
                client_id: Some("abc".to_owned()),
            }
        );
    }

    #[test]
    fn product_and_price_options_build_a_product_checkout() {
        let tree = parse_options(
            &words(&[
                "product.id=P",
                "product.name=N",
                "price.ETH=1.0",
                "price.DAI=15.0",
            ]),
            SESSION_OPTIONS,
            true,
        )
        .expect("parses");

        let options = checkout_options(&tree).expect("converts");
        let CheckoutOptions::WithProduct { product, price, .. } = options else {
            panic!("expected product checkout");
        };
        assert_eq!(product.id, "P");
        assert_eq!(product.name, "N");
        assert_eq!(price.get("ETH").map(String::as_str), Some("1.0"));
        assert_eq!(price.get("DAI").map(String::as_str), Some("15.0"));
    }

    #[test]
    fn product_without_price_is_rejected() {
        let tree = parse_options(
            &words(&["product.id=P", "product.name=N"]),
            SESSION_OPTIONS,
            true,
        )
        .expect("parses");

        assert!(checkout_options(&tree).is_err());
    }

    #[test]
    fn incomplete_product_is_rejected() {
        let tree = parse_options(
            &words(&["product.id=P", "price.ETH=1.0"]),
            SESSION_OPTIONS,
            true,
        )
        .expect("parses");

        let err = checkout_options(&tree).expect_err("incomplete");
        assert_eq!(err, "missing option \"product.name\"");
    }

    #[test]
    fn list_options_convert_and_validate() {
        let tree = parse_options(
            &words(&["limit=2", "page=3", "sort=asc", "from=2021-02-03"]),
            LIST_OPTIONS,
            false,
        )
        .expect("parses");

        let opts = list_options(&tree).expect("converts");
        assert_eq!(opts.limit, Some(2));
        assert_eq!(opts.page, Some(3));
        assert_eq!(opts.sort, Some(Sort::Asc));
        assert_eq!(opts.from, Some(DateFilter::Iso("2021-02-03".to_owned())));

        let tree = parse_options(&words(&["limit=lots"]), LIST_OPTIONS, false).expect("parses");
        assert!(list_options(&tree).is_err());

        let tree = parse_options(&words(&["sort=sideways"]), LIST_OPTIONS, false).expect("parses");
        assert!(list_options(&tree).is_err());
    }

    #[test]
    fn balance_options_preserve_empty_string_filters() {
        let tree = parse_options(
            &words(&["customerId=", "coin=ETH"]),
            BALANCE_OPTIONS,
            false,
        )
        .expect("parses");

        let opts = balance_options(&tree);
        assert_eq!(opts.customer_id, Some(String::new()));
        assert_eq!(opts.product_id, None);
        assert_eq!(opts.coin, Some("ETH".to_owned()));
    }
}
