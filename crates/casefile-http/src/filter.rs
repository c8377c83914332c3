//! The filter seam between a test client and its transport.

use crate::snapshot::{RequestSnapshot, ResponseSnapshot};

/// The downstream remainder of a client's filter chain.
///
/// Wraps whatever actually performs the exchange, whether that is the next
/// filter or the transport itself, as a one-shot continuation.
///
/// # Examples
///
/// ```
/// use casefile_http::{Next, RequestSnapshot, ResponseSnapshot};
///
/// let next = Next::new(|_request| ResponseSnapshot::new(200, "OK"));
/// let response = next.run(&RequestSnapshot::new("GET", "http://localhost/hello"));
/// assert_eq!(response.status_code(), 200);
/// ```
pub struct Next<'a> {
    inner: Box<dyn FnOnce(&RequestSnapshot) -> ResponseSnapshot + 'a>,
}

impl<'a> Next<'a> {
    /// Wrap a continuation as the downstream chain.
    #[must_use]
    pub fn new(inner: impl FnOnce(&RequestSnapshot) -> ResponseSnapshot + 'a) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }

    /// Forward the request and return the downstream response.
    #[must_use]
    pub fn run(self, request: &RequestSnapshot) -> ResponseSnapshot {
        (self.inner)(request)
    }
}

/// A synchronous intercept point in a client's filter chain.
///
/// Implementations receive the outgoing request and the downstream
/// continuation and return the response to hand back upstream. A filter
/// that only observes traffic forwards the request unchanged and returns
/// the downstream response as is.
pub trait HttpFilter {
    /// Intercept one exchange.
    fn around(&self, request: &RequestSnapshot, next: Next<'_>) -> ResponseSnapshot;
}
