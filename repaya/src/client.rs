//! Client construction and the generic request core.
//!
//! [`Client::request`] is the single transport method every endpoint goes
//! through: it builds the URL, selects GET-query or POST-body encoding,
//! attaches the bearer header, invokes the injected transport capability,
//! and decodes the `{error?, result}` response envelope.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::balances::Balances;
use crate::encoding;
use crate::error::{ApiError, Error};
use crate::payments::Payments;
use crate::sessions::Sessions;
use crate::transport::{HttpTransport, Method, Transport, TransportRequest};

/// Pattern every environment base URL must match: a bare
/// `scheme://host(:port)` with a dotted hostname and no path.
const ENVIRONMENT_PATTERN: &str = r"^https?://\w+(\.\w+)+(:\d+)?$";

fn environment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ENVIRONMENT_PATTERN).expect("environment pattern compiles"))
}

/// Response envelope shared by every repaya endpoint.
///
/// `result` may legitimately be `null`; an absent `error` is the success
/// case.
#[derive(Debug, serde::Deserialize)]
struct Envelope {
    #[serde(default)]
    error: Option<ApiError>,
    #[serde(default)]
    result: Value,
}

/// Authenticated client for the repaya payments API.
///
/// Holds the environment base URL, the optional bearer token, and the
/// transport capability. The client is immutable after construction, so a
/// single instance can serve any number of concurrent calls without
/// locking. Construct once per process and reuse.
#[derive(Clone)]
pub struct Client {
    env: String,
    api_token: Option<String>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("env", &self.env)
            .field("has_api_token", &self.api_token.is_some())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client for the given environment using the default
    /// reqwest-backed transport.
    ///
    /// `env` is one of the fixed environments, e.g.
    /// [`ENV_PRODUCTION`](crate::ENV_PRODUCTION) or
    /// [`ENV_GOERLI`](crate::ENV_GOERLI). Pass `None` for `api_token` to
    /// issue unauthenticated requests.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEnvironment`] if `env` is not a bare
    /// `scheme://host(:port)` base URL, and [`Error::InvalidToken`] if the
    /// token is present but empty.
    pub fn new(env: &str, api_token: Option<&str>) -> Result<Self, Error> {
        Self::with_transport(env, api_token, Arc::new(HttpTransport::new()))
    }

    /// Creates a client with an injected [`Transport`] capability.
    ///
    /// # Errors
    ///
    /// Same validation as [`Client::new`].
    pub fn with_transport(
        env: &str,
        api_token: Option<&str>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, Error> {
        if !environment_regex().is_match(env) {
            return Err(Error::InvalidEnvironment(env.to_owned()));
        }
        if api_token == Some("") {
            return Err(Error::InvalidToken);
        }

        Ok(Self {
            env: env.to_owned(),
            api_token: api_token.map(str::to_owned),
            transport,
        })
    }

    /// Returns the environment base URL.
    #[must_use]
    pub fn env(&self) -> &str {
        &self.env
    }

    /// Payment session operations.
    #[must_use]
    pub fn sessions(&self) -> Sessions<'_> {
        Sessions::new(self)
    }

    /// Payment query operations.
    #[must_use]
    pub fn payments(&self) -> Payments<'_> {
        Payments::new(self)
    }

    /// Balance query operations.
    #[must_use]
    pub fn balances(&self) -> Balances<'_> {
        Balances::new(self)
    }

    /// Performs an authenticated API exchange and decodes the `result`
    /// payload of the response envelope.
    ///
    /// For GET, a non-empty `data` map is rendered into the query string;
    /// for POST it is sent as the JSON body (with `Content-Type` set). The
    /// bearer header is attached only when a token is configured. A
    /// `result` of `null` decodes into `None` for `Option` targets and is
    /// a valid, non-error outcome.
    ///
    /// # Errors
    ///
    /// [`Error::Api`] if the envelope carries an `error`. Transport
    /// rejections propagate unchanged as [`Error::Transport`], and a
    /// malformed body as [`Error::Json`]; nothing is retried.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        data: Option<&Map<String, Value>>,
    ) -> Result<T, Error> {
        let mut url = format!("{}{}", self.env, path);
        if method == Method::Get {
            if let Some(data) = data.filter(|data| !data.is_empty()) {
                url.push('?');
                url.push_str(&encoding::query(data));
            }
        }

        let mut headers: Vec<(&'static str, String)> = Vec::new();
        if let Some(token) = &self.api_token {
            headers.push(("Authorization", format!("Bearer {token}")));
        }

        let body = match (method, data) {
            (Method::Post, Some(data)) => {
                headers.push(("Content-Type", "application/json".to_owned()));
                Some(serde_json::to_string(data)?)
            }
            _ => None,
        };

        #[cfg(feature = "telemetry")]
        tracing::debug!(url = %url, method = method.as_str(), "repaya request");

        let request = TransportRequest {
            method,
            headers: &headers,
            body: body.as_deref(),
        };
        let raw = self
            .transport
            .send(&url, request)
            .await
            .map_err(Error::Transport)?;

        let envelope: Envelope = serde_json::from_slice(&raw)?;
        if let Some(error) = envelope.error {
            #[cfg(feature = "telemetry")]
            tracing::warn!(code = error.code, "repaya api error");
            return Err(Error::Api(error));
        }

        Ok(serde_json::from_value(envelope.result)?)
    }
}
