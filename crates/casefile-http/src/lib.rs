//! HTTP-call attachment capturer for `casefile`.
//!
//! [`HttpCapture`] sits in an HTTP test client's filter chain. For each call
//! it renders the outgoing request and the incoming response as text and
//! registers both as attachments on the currently active test record,
//! request first, then forwards the response unchanged. The client pipeline
//! itself stays out of scope: callers hand the filter a [`RequestSnapshot`]
//! and a [`Next`] continuation and receive the [`ResponseSnapshot`] the
//! continuation produced.

mod capture;
mod filter;
mod snapshot;

pub use capture::HttpCapture;
pub use filter::{HttpFilter, Next};
pub use snapshot::{RequestSnapshot, ResponseSnapshot};
