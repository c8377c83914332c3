//! Report lifecycle for `casefile`.
//!
//! The crate owns the path a [`casefile_model::TestRecord`] travels from
//! allocation to persistence. A [`Recorder`] is an explicit, cloneable
//! handle to the one record that is currently collecting events; adapters
//! receive a recorder at construction instead of consulting ambient
//! thread-local state, so several execution contexts can run concurrently,
//! each against its own recorder.
//!
//! Finished records and attachment bytes leave through the [`ReportSink`]
//! seam. [`InMemorySink`] collects them for assertions; [`JsonDirSink`]
//! materialises them as one JSON file per record plus raw attachment files.

mod recorder;
mod sink;

/// Helpers for driving a recorder in cross-crate tests.
#[cfg(feature = "test-support")]
pub mod test_support;

pub use recorder::{Recorder, RecorderError};
pub use sink::{InMemorySink, JsonDirSink, ReportSink, SinkError};
