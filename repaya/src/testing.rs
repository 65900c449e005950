//! Test-only transport doubles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::Client;
use crate::constants::ENV_PRODUCTION;
use crate::transport::{BoxFuture, Method, Transport, TransportError, TransportRequest};

/// An exchange captured by [`MockTransport`].
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub(crate) url: String,
    pub(crate) method: Method,
    pub(crate) headers: Vec<(&'static str, String)>,
    pub(crate) body: Option<String>,
}

/// Transport double that records the last request and replays a
/// programmed response body. A programmed body stays armed until replaced,
/// so several calls in one test reuse it.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    last: Mutex<Option<RecordedRequest>>,
    next: Mutex<Option<Result<Vec<u8>, String>>>,
    calls: AtomicUsize,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Programs the body returned by subsequent sends.
    pub(crate) fn respond(&self, body: &str) {
        *self.next.lock().expect("next lock") = Some(Ok(body.as_bytes().to_vec()));
    }

    /// Programs a transport failure for subsequent sends.
    pub(crate) fn fail(&self, message: &str) {
        *self.next.lock().expect("next lock") = Some(Err(message.to_owned()));
    }

    /// Returns the last recorded request.
    ///
    /// Panics if nothing was sent, which is itself a test failure.
    pub(crate) fn last(&self) -> RecordedRequest {
        self.last
            .lock()
            .expect("last lock")
            .clone()
            .expect("no request recorded")
    }

    /// Number of times `send` was invoked.
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transport for MockTransport {
    fn send<'a>(
        &'a self,
        url: &'a str,
        request: TransportRequest<'a>,
    ) -> BoxFuture<'a, Result<Vec<u8>, TransportError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().expect("last lock") = Some(RecordedRequest {
            url: url.to_owned(),
            method: request.method,
            headers: request.headers.to_vec(),
            body: request.body.map(str::to_owned),
        });

        let next = self.next.lock().expect("next lock").clone();
        Box::pin(async move {
            match next {
                Some(Ok(body)) => Ok(body),
                Some(Err(message)) => Err(message.into()),
                None => Ok(b"{\"result\": null}".to_vec()),
            }
        })
    }
}

/// Builds an authenticated production-environment client over a fresh
/// [`MockTransport`], returning both.
pub(crate) fn mock_client() -> (Arc<MockTransport>, Client) {
    let mock = Arc::new(MockTransport::new());
    let client = Client::with_transport(
        ENV_PRODUCTION,
        Some("API_TOKEN"),
        Arc::clone(&mock) as Arc<dyn Transport>,
    )
    .expect("mock client construction");
    (mock, client)
}
