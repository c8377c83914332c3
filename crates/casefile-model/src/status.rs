//! Verdicts and progress markers for report records.
//!
//! A record that has not been evaluated carries no [`Status`] at all
//! (`Option<Status>::None`); the absence of a verdict is meaningful and must
//! never be coerced into a concrete one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Verdict assigned to a test or step record once it has been evaluated.
///
/// Severity orders the variants for aggregation: `Failed` outranks `Broken`,
/// which outranks `Passed`. Unevaluated records have no status and never
/// participate in aggregation.
///
/// # Examples
///
/// ```
/// use casefile_model::Status;
///
/// assert!(Status::Failed.severity() > Status::Broken.severity());
/// assert!(Status::Broken.severity() > Status::Passed.severity());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The record completed and every assertion held.
    Passed,
    /// An assertion mismatch was observed.
    Failed,
    /// An unexpected error interrupted execution.
    Broken,
}

impl Status {
    /// Retrieve the lowercase label for the verdict.
    ///
    /// # Examples
    ///
    /// ```
    /// use casefile_model::Status;
    ///
    /// assert_eq!(Status::Broken.label(), "broken");
    /// ```
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Broken => "broken",
        }
    }

    /// Rank used when aggregating several verdicts into one.
    ///
    /// Higher values win: a scenario with both a failed and a broken step
    /// reports `Failed` overall.
    #[must_use]
    pub const fn severity(self) -> u8 {
        match self {
            Self::Passed => 1,
            Self::Broken => 2,
            Self::Failed => 3,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Progress marker for a test record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// The record is still collecting events.
    #[default]
    Running,
    /// The record has been finalised and handed to the sink.
    Finished,
}

impl Stage {
    /// Retrieve the lowercase label for the stage.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Free-text explanation attached to a verdict.
///
/// `message` carries the assertion or error text; `trace` optionally carries
/// a longer backtrace-style rendering when the source framework provides
/// one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDetails {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    trace: Option<String>,
}

impl StatusDetails {
    /// Create details carrying only a message.
    ///
    /// # Examples
    ///
    /// ```
    /// use casefile_model::StatusDetails;
    ///
    /// let details = StatusDetails::from_message("expected: <15> but was: <123>");
    /// assert_eq!(details.message(), Some("expected: <15> but was: <123>"));
    /// assert_eq!(details.trace(), None);
    /// ```
    #[must_use]
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            trace: None,
        }
    }

    /// Attach a trace rendering to the details.
    #[must_use]
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// The assertion or error message, when present.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The trace rendering, when present.
    #[must_use]
    pub fn trace(&self) -> Option<&str> {
        self.trace.as_deref()
    }
}
