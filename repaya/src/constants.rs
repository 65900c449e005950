//! Fixed environments and API paths for the repaya service.

/// Production environment base URL.
pub const ENV_PRODUCTION: &str = "https://repaya.io";

/// Goerli test-network environment base URL.
pub const ENV_GOERLI: &str = "https://goerli.repaya.io";

/// Checkout-session creation endpoint.
pub(crate) const SESSION_PATH: &str = "/api/public/1/session";

/// Single-payment lookup endpoint.
pub(crate) const PAYMENT_PATH: &str = "/api/public/1/payment";

/// Paginated payment listing endpoint.
pub(crate) const PAYMENT_LIST_PATH: &str = "/api/public/1/payment/list";

/// Balance query endpoint.
pub(crate) const BALANCE_PATH: &str = "/api/public/1/balance";
