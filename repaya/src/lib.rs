#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Client library for the repaya payments API.
//!
//! Talks JSON-over-HTTP to one of two fixed environments, authenticating
//! with a bearer API token. The entry point is [`Client`]; operations are
//! grouped into sessions (create a checkout), payments (query and list),
//! and balances (per-customer aggregates).
//!
//! # Example
//!
//! ```no_run
//! use repaya::types::{CheckoutCustomer, CheckoutOptions};
//! use repaya::{Client, ENV_PRODUCTION};
//!
//! # async fn demo() -> Result<(), repaya::Error> {
//! let client = Client::new(ENV_PRODUCTION, Some("API_TOKEN"))?;
//!
//! let session = client
//!     .sessions()
//!     .create(
//!         "FORM_ID",
//!         CheckoutOptions::CustomerOnly {
//!             customer: Some(CheckoutCustomer {
//!                 id: "customer-1".to_owned(),
//!                 data: None,
//!             }),
//!             client_id: None,
//!         },
//!     )
//!     .await?;
//!
//! // Redirect the customer here to start the checkout flow.
//! println!("{}", session.checkout_url);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`client`] - Client construction and the generic request core
//! - [`transport`] - Injectable HTTP transport capability
//! - [`types`] - Domain and wire data model
//! - [`encoding`] - Query-string assembly and payment expansion
//! - [`error`] - Error taxonomy
//! - [`constants`] - Fixed environments and API paths
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation of the request path

pub mod balances;
pub mod client;
pub mod constants;
pub mod encoding;
pub mod error;
pub mod payments;
pub mod sessions;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::Client;
pub use constants::{ENV_GOERLI, ENV_PRODUCTION};
pub use error::{ApiError, Error};
