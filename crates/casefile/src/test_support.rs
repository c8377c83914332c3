//! Helpers for observing what a recorder produced.
//!
//! These helpers exist for the adapter crates' behaviour tests: they build a
//! fresh [`Recorder`] over an [`InMemorySink`], run the caller's scenario
//! against it, and return everything the sink received. Gated behind the
//! `test-support` feature so production builds carry none of it.

use std::sync::Arc;

use casefile_model::{AttachmentSource, TestRecord};

use crate::recorder::Recorder;
use crate::sink::{InMemorySink, ReportSink};

/// Everything an observed run delivered to its sink.
pub struct RunReport {
    records: Vec<TestRecord>,
    attachments: Vec<(AttachmentSource, Vec<u8>)>,
}

impl RunReport {
    /// Finished test records, in arrival order.
    #[must_use]
    pub fn test_records(&self) -> &[TestRecord] {
        &self.records
    }

    /// Stored attachment bytes, in arrival order, one entry per source.
    #[must_use]
    pub fn attachments(&self) -> &[(AttachmentSource, Vec<u8>)] {
        &self.attachments
    }

    /// Bytes stored under the given source, if any.
    #[must_use]
    pub fn attachment_bytes(&self, source: &AttachmentSource) -> Option<&[u8]> {
        self.attachments
            .iter()
            .find(|(stored, _)| stored == source)
            .map(|(_, bytes)| bytes.as_slice())
    }
}

/// Run a scenario against a fresh recorder and report what its sink saw.
///
/// # Examples
///
/// ```
/// use casefile::test_support::observe;
/// use casefile_model::TestRecord;
///
/// let report = observe(|recorder| {
///     recorder.start_test(TestRecord::new("Add a to b", "simple.story: Add a to b"));
///     if let Err(error) = recorder.finish_test() {
///         log::warn!("failed to finish record: {error}");
///     }
/// });
/// assert_eq!(report.test_records().len(), 1);
/// ```
pub fn observe(run: impl FnOnce(&Recorder)) -> RunReport {
    let sink = Arc::new(InMemorySink::new());
    let recorder = Recorder::new(Arc::clone(&sink) as Arc<dyn ReportSink>);
    run(&recorder);
    RunReport {
        records: sink.test_records(),
        attachments: sink.attachments(),
    }
}

/// Run a closure inside a synthetic test record and report what it captured.
///
/// Opens a throwaway record before the closure runs and finishes it
/// afterwards, so code that attaches to the "current" record (such as an
/// HTTP capture filter) has one to attach to.
pub fn within_test_context(run: impl FnOnce(&Recorder)) -> RunReport {
    observe(|recorder| {
        recorder.start_test(TestRecord::new("test context", "test context"));
        run(recorder);
        if let Err(error) = recorder.finish_test() {
            log::warn!("failed to finish synthetic test record: {error}");
        }
    })
}
