//! Named, content-addressed artifacts linked to a test record.
//!
//! An attachment couples a display name with an [`AttachmentSource`], the
//! opaque reference under which a sink stores the raw bytes. Display names
//! may collide; sources are minted uniquely per capture.

use derive_more::{Deref, From};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque reference to an attachment's stored bytes.
///
/// Sources are minted once per captured artifact and never reused, so a sink
/// can key its byte store by source even when display names repeat.
///
/// # Examples
///
/// ```
/// use casefile_model::AttachmentSource;
///
/// let first = AttachmentSource::generate("text/plain");
/// let second = AttachmentSource::generate("text/plain");
/// assert_ne!(first, second);
/// assert!(first.as_str().ends_with(".txt"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Deref, From)]
pub struct AttachmentSource(String);

impl AttachmentSource {
    /// Mint a fresh source for one captured artifact.
    ///
    /// The reference embeds a v4 UUID plus an extension derived from the
    /// content type, mirroring how sinks lay attachments out on disk.
    #[must_use]
    pub fn generate(content_type: &str) -> Self {
        Self(format!(
            "{}-attachment.{}",
            Uuid::new_v4(),
            extension_for(content_type)
        ))
    }

    /// View the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttachmentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// File extension used when materialising an attachment of the given
/// content type.
fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "text/plain" => "txt",
        "text/html" => "html",
        "text/csv" => "csv",
        "application/json" => "json",
        "application/xml" | "text/xml" => "xml",
        _ => "bin",
    }
}

/// A named artifact linked to a test record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    name: String,
    source: AttachmentSource,
    content_type: String,
}

impl Attachment {
    /// Link a display name to a stored artifact.
    ///
    /// # Examples
    ///
    /// ```
    /// use casefile_model::{Attachment, AttachmentSource};
    ///
    /// let source = AttachmentSource::generate("text/plain");
    /// let attachment = Attachment::new("Request", source.clone(), "text/plain");
    /// assert_eq!(attachment.name(), "Request");
    /// assert_eq!(attachment.source(), &source);
    /// ```
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        source: AttachmentSource,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source,
            content_type: content_type.into(),
        }
    }

    /// The display name shown alongside the record.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The opaque reference to the stored bytes.
    #[must_use]
    pub fn source(&self) -> &AttachmentSource {
        &self.source
    }

    /// The declared content type of the stored bytes.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}
