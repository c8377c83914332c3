//! Persistence seam for finished records and attachment bytes.
//!
//! Sinks own the persisted report format; the recorder only promises to
//! hand each finished record over exactly once and to store every
//! attachment's bytes under its unique source before linking it.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::sync::{Mutex, MutexGuard};

use camino::Utf8PathBuf;
use thiserror::Error;
use uuid::Uuid;

use casefile_model::{AttachmentSource, TestRecord};

/// Error raised by a sink while persisting report data.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The underlying storage could not be written.
    #[error("failed to write report data")]
    Io(#[from] std::io::Error),
    /// The record could not be serialised.
    #[error("failed to serialise test record")]
    Serialise(#[from] serde_json::Error),
}

/// Destination for finished test records and attachment bytes.
///
/// Implementations must tolerate being shared across threads; the recorder
/// hands records over from whichever thread finishes the test.
pub trait ReportSink: Send + Sync {
    /// Persist one finished test record.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] when the record cannot be stored.
    fn write_test(&self, record: &TestRecord) -> Result<(), SinkError>;

    /// Persist attachment bytes under their unique source.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] when the bytes cannot be stored.
    fn write_attachment(&self, source: &AttachmentSource, bytes: &[u8]) -> Result<(), SinkError>;
}

/// Sink that collects records and attachment bytes in memory.
///
/// Finished records keep their arrival order; attachment bytes are stored as
/// `(source, bytes)` pairs, so a test can assert that each source was
/// written exactly once.
///
/// # Examples
///
/// ```
/// use casefile::{InMemorySink, ReportSink};
/// use casefile_model::TestRecord;
///
/// let sink = InMemorySink::new();
/// sink.write_test(&TestRecord::new("Add a to b", "simple.story: Add a to b"))?;
/// assert_eq!(sink.test_records().len(), 1);
/// # Ok::<(), casefile::SinkError>(())
/// ```
#[derive(Default)]
pub struct InMemorySink {
    records: Mutex<Vec<TestRecord>>,
    attachments: Mutex<Vec<(AttachmentSource, Vec<u8>)>>,
}

impl InMemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_records(&self) -> MutexGuard<'_, Vec<TestRecord>> {
        match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn lock_attachments(&self) -> MutexGuard<'_, Vec<(AttachmentSource, Vec<u8>)>> {
        match self.attachments.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Snapshot of the finished records, in arrival order.
    #[must_use]
    pub fn test_records(&self) -> Vec<TestRecord> {
        self.lock_records().clone()
    }

    /// Snapshot of the stored attachments, in arrival order.
    #[must_use]
    pub fn attachments(&self) -> Vec<(AttachmentSource, Vec<u8>)> {
        self.lock_attachments().clone()
    }

    /// Bytes stored under the given source, if any.
    #[must_use]
    pub fn attachment_bytes(&self, source: &AttachmentSource) -> Option<Vec<u8>> {
        self.lock_attachments()
            .iter()
            .find(|(stored, _)| stored == source)
            .map(|(_, bytes)| bytes.clone())
    }
}

impl ReportSink for InMemorySink {
    fn write_test(&self, record: &TestRecord) -> Result<(), SinkError> {
        self.lock_records().push(record.clone());
        Ok(())
    }

    fn write_attachment(&self, source: &AttachmentSource, bytes: &[u8]) -> Result<(), SinkError> {
        self.lock_attachments()
            .push((source.clone(), bytes.to_vec()));
        Ok(())
    }
}

/// Sink that materialises the report in a directory.
///
/// Each record becomes `<uuid>-record.json`; each attachment lands in a file
/// named after its source, so the record's attachment links resolve by
/// filename. The directory is created on first write.
pub struct JsonDirSink {
    directory: Utf8PathBuf,
}

impl JsonDirSink {
    /// Create a sink writing into the given directory.
    #[must_use]
    pub fn new(directory: impl Into<Utf8PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// The directory the sink writes into.
    #[must_use]
    pub fn directory(&self) -> &Utf8PathBuf {
        &self.directory
    }

    fn ensure_directory(&self) -> Result<(), SinkError> {
        fs::create_dir_all(&self.directory)?;
        Ok(())
    }
}

impl ReportSink for JsonDirSink {
    fn write_test(&self, record: &TestRecord) -> Result<(), SinkError> {
        self.ensure_directory()?;
        let path = self.directory.join(format!("{}-record.json", Uuid::new_v4()));
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, record)?;
        writer.flush()?;
        Ok(())
    }

    fn write_attachment(&self, source: &AttachmentSource, bytes: &[u8]) -> Result<(), SinkError> {
        self.ensure_directory()?;
        fs::write(self.directory.join(source.as_str()), bytes)?;
        Ok(())
    }
}
