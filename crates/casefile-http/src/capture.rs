//! Attachment-capturing filter.

use std::fmt::Write;

use casefile::Recorder;

use crate::filter::{HttpFilter, Next};
use crate::snapshot::{RequestSnapshot, ResponseSnapshot};

const DEFAULT_REQUEST_NAME: &str = "Request";
const ATTACHMENT_CONTENT_TYPE: &str = "text/plain";

/// Filter that records each exchange as a pair of text attachments.
///
/// Per call, the rendered request is attached to the currently active test
/// record, the call is forwarded downstream, and the rendered response is
/// attached afterwards — request first, always. The response attachment's
/// default name is that call's own status line, resolved only once the
/// response exists; configured names are used verbatim instead.
///
/// Configuration is captured at construction, so one instance can serve any
/// number of sequential or overlapping calls without the calls influencing
/// each other's attachment names.
///
/// # Examples
///
/// ```
/// use casefile::test_support::within_test_context;
/// use casefile_http::{HttpCapture, HttpFilter, Next, RequestSnapshot, ResponseSnapshot};
///
/// let report = within_test_context(|recorder| {
///     let filter = HttpCapture::new(recorder.clone());
///     let request = RequestSnapshot::new("GET", "http://localhost/hello");
///     let response = filter.around(
///         &request,
///         Next::new(|_| ResponseSnapshot::new(200, "OK").with_body("some body")),
///     );
///     assert_eq!(response.status_code(), 200);
/// });
/// let names: Vec<&str> = report.test_records()[0]
///     .attachments()
///     .iter()
///     .map(|attachment| attachment.name())
///     .collect();
/// assert_eq!(names, vec!["Request", "HTTP/1.1 200 OK"]);
/// ```
pub struct HttpCapture {
    recorder: Recorder,
    request_name: Option<String>,
    response_name: Option<String>,
}

impl HttpCapture {
    /// Create a capture filter attaching through the given recorder.
    #[must_use]
    pub fn new(recorder: Recorder) -> Self {
        Self {
            recorder,
            request_name: None,
            response_name: None,
        }
    }

    /// Name request attachments instead of the default `Request`.
    #[must_use]
    pub fn with_request_attachment_name(mut self, name: impl Into<String>) -> Self {
        self.request_name = Some(name.into());
        self
    }

    /// Name response attachments verbatim instead of the status line.
    #[must_use]
    pub fn with_response_attachment_name(mut self, name: impl Into<String>) -> Self {
        self.response_name = Some(name.into());
        self
    }

    // Attaching must never disturb the exchange itself; a report without an
    // attachment beats an aborted call.
    fn attach(&self, name: &str, text: &str) {
        if let Err(error) =
            self.recorder
                .add_attachment(name, text.as_bytes(), ATTACHMENT_CONTENT_TYPE)
        {
            log::warn!("could not attach {name:?} to the active test record: {error}");
        }
    }
}

impl HttpFilter for HttpCapture {
    fn around(&self, request: &RequestSnapshot, next: Next<'_>) -> ResponseSnapshot {
        let request_name = self.request_name.as_deref().unwrap_or(DEFAULT_REQUEST_NAME);
        self.attach(request_name, &render_request(request));

        let response = next.run(request);

        let response_name = self
            .response_name
            .clone()
            .unwrap_or_else(|| response.status_line());
        self.attach(&response_name, &render_response(&response));

        response
    }
}

/// Render a request as readable text: request line, headers, blank line,
/// body.
fn render_request(request: &RequestSnapshot) -> String {
    let mut text = format!("{} {}", request.method(), request.url());
    render_tail(&mut text, request.headers(), request.body());
    text
}

/// Render a response as readable text: status line, headers, blank line,
/// body.
fn render_response(response: &ResponseSnapshot) -> String {
    let mut text = response.status_line();
    render_tail(&mut text, response.headers(), response.body());
    text
}

fn render_tail(text: &mut String, headers: &[(String, String)], body: Option<&str>) {
    for (name, value) in headers {
        // Writing to a String cannot fail; ignore the formatter's Result.
        let _ = write!(text, "\n{name}: {value}");
    }
    if let Some(body) = body {
        text.push_str("\n\n");
        text.push_str(body);
    }
}
