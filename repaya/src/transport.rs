//! Pluggable HTTP transport for the repaya client.
//!
//! The client never talks to the network directly: every exchange goes
//! through the [`Transport`] capability, which takes a fully built URL plus
//! request metadata and resolves with the raw response body. [`HttpTransport`]
//! is the default implementation over [`reqwest`]; tests substitute a
//! recording double without touching any global state.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Boxed future type used by dyn-compatible async traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Opaque error raised by a transport implementation.
///
/// Network and I/O failures are surfaced to callers unchanged; the client
/// core adds no wrapping or recovery on top of them.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// HTTP verbs used by the repaya API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Query-string request, no body.
    Get,
    /// JSON-body request.
    Post,
}

impl Method {
    /// Returns the verb as an uppercase string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Request metadata handed to a [`Transport`].
///
/// The URL (including any query string) is passed separately; `body` is
/// present only for POST requests carrying JSON.
#[derive(Debug, Clone, Copy)]
pub struct TransportRequest<'a> {
    /// HTTP verb.
    pub method: Method,
    /// Header name/value pairs, in order.
    pub headers: &'a [(&'static str, String)],
    /// JSON request body, if any.
    pub body: Option<&'a str>,
}

/// Capability for performing a single HTTP exchange.
///
/// Returns the raw response body. JSON decoding and the error-envelope
/// check happen in [`Client::request`](crate::Client::request), so a
/// transport needs no knowledge of the wire envelope. Timeouts and
/// cancellation, when needed, belong to the implementation.
pub trait Transport: Send + Sync {
    /// Performs the exchange and resolves with the response body bytes.
    fn send<'a>(
        &'a self,
        url: &'a str,
        request: TransportRequest<'a>,
    ) -> BoxFuture<'a, Result<Vec<u8>, TransportError>>;
}

/// Default [`Transport`] over a shared [`reqwest::Client`].
///
/// The body is returned for any HTTP status: the repaya API reports
/// failures through the JSON error envelope, not through status codes.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with a fresh connection pool.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend fails to initialize.
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .expect("failed to build reqwest::Client");
        Self { client }
    }

    /// Wraps a pre-configured [`reqwest::Client`].
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn send<'a>(
        &'a self,
        url: &'a str,
        request: TransportRequest<'a>,
    ) -> BoxFuture<'a, Result<Vec<u8>, TransportError>> {
        Box::pin(async move {
            let mut builder = match request.method {
                Method::Get => self.client.get(url),
                Method::Post => self.client.post(url),
            };
            for (name, value) in request.headers {
                builder = builder.header(*name, value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder.body(body.to_owned());
            }

            let response = builder.send().await?;
            let bytes = response.bytes().await?;
            Ok(bytes.to_vec())
        })
    }
}
