//! Immutable descriptions of one HTTP exchange.

/// Outgoing request as the client is about to send it.
///
/// # Examples
///
/// ```
/// use casefile_http::RequestSnapshot;
///
/// let request = RequestSnapshot::new("GET", "http://localhost:8080/hello")
///     .with_header("Accept", "*/*");
/// assert_eq!(request.method(), "GET");
/// assert!(request.body().is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestSnapshot {
    method: String,
    url: String,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl RequestSnapshot {
    /// Describe a request by method and URL.
    #[must_use]
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Append a header, keeping declaration order.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the request body text.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// The request method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The request URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Headers in declaration order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The body text, when present.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// Response as received from the server.
///
/// # Examples
///
/// ```
/// use casefile_http::ResponseSnapshot;
///
/// let response = ResponseSnapshot::new(200, "OK").with_body("some body");
/// assert_eq!(response.status_line(), "HTTP/1.1 200 OK");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseSnapshot {
    version: String,
    status_code: u16,
    reason: String,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl ResponseSnapshot {
    /// Describe a response by status code and reason phrase.
    ///
    /// The HTTP version defaults to `HTTP/1.1`.
    #[must_use]
    pub fn new(status_code: u16, reason: impl Into<String>) -> Self {
        Self {
            version: "HTTP/1.1".to_owned(),
            status_code,
            reason: reason.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Override the HTTP version, e.g. `HTTP/2`.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Append a header, keeping arrival order.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the response body text.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// The HTTP version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The numeric status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// The reason phrase.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Headers in arrival order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The body text, when present.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// The status line, e.g. `HTTP/1.1 200 OK`.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!("{} {} {}", self.version, self.status_code, self.reason)
    }
}
