//! Recorder handle for the in-flight test record.
//!
//! A [`Recorder`] keeps at most one open [`TestRecord`] and applies every
//! mutation to it under an internal lock. Cloning the handle shares the same
//! record, so an adapter and a filter running inside the same execution
//! context observe one consistent report. A poisoned lock is recovered
//! rather than propagated: a panic in one caller must not silence the whole
//! report.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use thiserror::Error;

use casefile_model::{
    Attachment, AttachmentSource, Parameter, Stage, Status, StatusDetails, StepRecord, TestRecord,
};

use crate::sink::{ReportSink, SinkError};

/// Error raised by recorder operations.
#[derive(Debug, Error)]
pub enum RecorderError {
    /// An operation needed an open test record, but none is active.
    #[error("no test record is currently active")]
    NoActiveTest,
    /// A step verdict arrived, but the active record has no steps.
    #[error("no step record is currently open")]
    NoActiveStep,
    /// The sink refused the record or attachment bytes.
    #[error("report sink failed")]
    Sink(#[from] SinkError),
}

/// Cloneable handle to the currently collecting test record.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use casefile::{InMemorySink, Recorder, ReportSink};
/// use casefile_model::{Status, StepRecord, TestRecord};
///
/// let sink = Arc::new(InMemorySink::new());
/// let recorder = Recorder::new(Arc::clone(&sink) as Arc<dyn ReportSink>);
/// recorder.start_test(TestRecord::new("Add a to b", "simple.story: Add a to b"));
/// recorder.start_step(StepRecord::new("Given a is 5"))?;
/// recorder.update_step(|step| step.resolve(Status::Passed, None))?;
/// recorder.finish_test()?;
/// assert_eq!(sink.test_records().len(), 1);
/// # Ok::<(), casefile::RecorderError>(())
/// ```
#[derive(Clone)]
pub struct Recorder {
    current: Arc<Mutex<Option<TestRecord>>>,
    sink: Arc<dyn ReportSink>,
}

impl Recorder {
    /// Create a recorder writing finished records through the given sink.
    #[must_use]
    pub fn new(sink: Arc<dyn ReportSink>) -> Self {
        Self {
            current: Arc::new(Mutex::new(None)),
            sink,
        }
    }

    fn lock_current(&self) -> MutexGuard<'_, Option<TestRecord>> {
        match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Open a record and stamp its start instant.
    ///
    /// The record becomes the target of every subsequent mutation until
    /// [`Recorder::finish_test`] closes it. A record that is still open when
    /// the next one starts is discarded with a warning; the caller's event
    /// stream skipped a finish.
    pub fn start_test(&self, mut record: TestRecord) {
        record.set_start(Utc::now().timestamp_millis());
        record.set_stage(Stage::Running);
        let mut current = self.lock_current();
        if let Some(discarded) = current.replace(record) {
            log::warn!(
                "discarding unfinished test record {:?}: a new record started",
                discarded.name()
            );
        }
    }

    /// Whether a record is currently open.
    #[must_use]
    pub fn has_active_test(&self) -> bool {
        self.lock_current().is_some()
    }

    /// Read the currently open record, if any.
    pub fn with_current_test<R>(&self, read: impl FnOnce(&TestRecord) -> R) -> Option<R> {
        self.lock_current().as_ref().map(read)
    }

    /// Mutate the currently open record.
    ///
    /// # Errors
    ///
    /// Returns [`RecorderError::NoActiveTest`] when no record is open.
    pub fn update_test(&self, update: impl FnOnce(&mut TestRecord)) -> Result<(), RecorderError> {
        let mut current = self.lock_current();
        let record = current.as_mut().ok_or(RecorderError::NoActiveTest)?;
        update(record);
        Ok(())
    }

    /// Append a step to the currently open record.
    ///
    /// # Errors
    ///
    /// Returns [`RecorderError::NoActiveTest`] when no record is open.
    pub fn start_step(&self, step: StepRecord) -> Result<(), RecorderError> {
        self.update_test(|record| record.push_step(step))
    }

    /// Mutate the most recently appended step.
    ///
    /// # Errors
    ///
    /// Returns [`RecorderError::NoActiveTest`] when no record is open and
    /// [`RecorderError::NoActiveStep`] when the record has no steps yet.
    pub fn update_step(&self, update: impl FnOnce(&mut StepRecord)) -> Result<(), RecorderError> {
        let mut current = self.lock_current();
        let record = current.as_mut().ok_or(RecorderError::NoActiveTest)?;
        let step = record.last_step_mut().ok_or(RecorderError::NoActiveStep)?;
        update(step);
        Ok(())
    }

    /// Apply a verdict to the most recently appended step.
    ///
    /// A step that already carries a verdict is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`RecorderError::NoActiveTest`] when no record is open and
    /// [`RecorderError::NoActiveStep`] when the record has no steps yet.
    pub fn resolve_step(
        &self,
        status: Status,
        details: Option<StatusDetails>,
    ) -> Result<(), RecorderError> {
        self.update_step(|step| step.resolve(status, details))
    }

    /// Add a parameter to the currently open record.
    ///
    /// # Errors
    ///
    /// Returns [`RecorderError::NoActiveTest`] when no record is open.
    pub fn add_parameter(&self, parameter: Parameter) -> Result<(), RecorderError> {
        self.update_test(|record| record.add_parameter(parameter))
    }

    /// Store attachment bytes through the sink and link them to the
    /// currently open record.
    ///
    /// Mints a fresh [`AttachmentSource`] per call, so repeated captures
    /// under the same display name stay individually addressable.
    ///
    /// # Errors
    ///
    /// Returns [`RecorderError::NoActiveTest`] when no record is open and
    /// [`RecorderError::Sink`] when the sink rejects the bytes.
    pub fn add_attachment(
        &self,
        name: impl Into<String>,
        bytes: &[u8],
        content_type: impl Into<String>,
    ) -> Result<AttachmentSource, RecorderError> {
        let content_type = content_type.into();
        let mut current = self.lock_current();
        let record = current.as_mut().ok_or(RecorderError::NoActiveTest)?;
        let source = AttachmentSource::generate(&content_type);
        self.sink.write_attachment(&source, bytes)?;
        record.add_attachment(Attachment::new(name, source.clone(), content_type));
        Ok(source)
    }

    /// Close the currently open record and hand it to the sink.
    ///
    /// Stamps the stop instant unless the caller already did, marks the
    /// record finished, and writes it through the sink. The recorder holds
    /// no record afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`RecorderError::NoActiveTest`] when no record is open and
    /// [`RecorderError::Sink`] when the sink rejects the record.
    pub fn finish_test(&self) -> Result<(), RecorderError> {
        let mut record = self
            .lock_current()
            .take()
            .ok_or(RecorderError::NoActiveTest)?;
        if record.stop().is_none() {
            record.set_stop(Utc::now().timestamp_millis());
        }
        record.set_stage(Stage::Finished);
        self.sink.write_test(&record)?;
        Ok(())
    }
}
