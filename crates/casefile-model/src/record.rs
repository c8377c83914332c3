//! Report records for executed scenarios and their steps.
//!
//! A [`TestRecord`] is created when a scenario starts, mutated while step and
//! parameter events arrive, and finalised exactly once when the scenario
//! finishes. After finalisation the record is handed to a sink and treated as
//! immutable. Verdicts are terminal: [`StepRecord::resolve`] and
//! [`TestRecord::resolve`] apply a status only when none is set, so a step
//! that never executed keeps its meaningful absence of a verdict.

use serde::{Deserialize, Serialize};

use crate::attachment::Attachment;
use crate::status::{Stage, Status, StatusDetails};

/// A named value attached to a test record, such as one example-table cell.
///
/// Values roundtrip exactly as given; no trimming or normalisation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    name: String,
    value: String,
}

impl Parameter {
    /// Pair a name with its string value.
    ///
    /// # Examples
    ///
    /// ```
    /// use casefile_model::Parameter;
    ///
    /// let parameter = Parameter::new("a", "1");
    /// assert_eq!(parameter.name(), "a");
    /// assert_eq!(parameter.value(), "1");
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The parameter's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter's value, exactly as supplied.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// One step within a test record.
///
/// A step starts with no verdict. Steps that never execute (pending or
/// skipped after an earlier failure) keep `status` unset; consumers must not
/// read absence as failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    status_details: Option<StatusDetails>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    steps: Vec<StepRecord>,
}

impl StepRecord {
    /// Start a step with the given display name and no verdict.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: None,
            status_details: None,
            steps: Vec::new(),
        }
    }

    /// The step's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The step's verdict, if one was reached.
    #[must_use]
    pub fn status(&self) -> Option<Status> {
        self.status
    }

    /// Details accompanying the verdict, if any.
    #[must_use]
    pub fn status_details(&self) -> Option<&StatusDetails> {
        self.status_details.as_ref()
    }

    /// Nested sub-steps, in declared order.
    #[must_use]
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Apply a verdict if none has been reached yet.
    ///
    /// Verdicts are terminal: once a status is set, later calls leave the
    /// step untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use casefile_model::{Status, StepRecord};
    ///
    /// let mut step = StepRecord::new("When result is computed");
    /// step.resolve(Status::Passed, None);
    /// step.resolve(Status::Failed, None);
    /// assert_eq!(step.status(), Some(Status::Passed));
    /// ```
    pub fn resolve(&mut self, status: Status, details: Option<StatusDetails>) {
        if self.status.is_none() {
            self.status = Some(status);
            self.status_details = details;
        }
    }
}

/// Structured report entity for one executed scenario.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    name: String,
    full_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    status_details: Option<StatusDetails>,
    stage: Stage,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    start: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    stop: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    steps: Vec<StepRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    parameters: Vec<Parameter>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    attachments: Vec<Attachment>,
}

impl TestRecord {
    /// Open a record for a scenario about to run.
    ///
    /// `name` is the scenario's display name; `full_name` identifies it
    /// within its story, e.g. `"simple.story: Add a to b"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use casefile_model::{Stage, TestRecord};
    ///
    /// let record = TestRecord::new("Add a to b", "simple.story: Add a to b");
    /// assert_eq!(record.stage(), Stage::Running);
    /// assert!(record.status().is_none());
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_name: full_name.into(),
            description: None,
            status: None,
            status_details: None,
            stage: Stage::Running,
            start: None,
            stop: None,
            steps: Vec::new(),
            parameters: Vec::new(),
            attachments: Vec::new(),
        }
    }

    /// The scenario's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scenario's fully qualified name within its story.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Free-form description, if the story carries one.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The record's verdict, if one was reached.
    #[must_use]
    pub fn status(&self) -> Option<Status> {
        self.status
    }

    /// Details accompanying the verdict, if any.
    #[must_use]
    pub fn status_details(&self) -> Option<&StatusDetails> {
        self.status_details.as_ref()
    }

    /// Whether the record is still open or has been finalised.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Start instant in epoch milliseconds, once stamped.
    #[must_use]
    pub fn start(&self) -> Option<i64> {
        self.start
    }

    /// Stop instant in epoch milliseconds, once stamped.
    #[must_use]
    pub fn stop(&self) -> Option<i64> {
        self.stop
    }

    /// Recorded steps, in the order they were reported.
    #[must_use]
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Recorded parameters, in the order they were added.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Recorded attachments, in the order they were registered.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Set or replace the record's description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    /// Move the record between [`Stage::Running`] and [`Stage::Finished`].
    pub fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
    }

    /// Stamp the start instant in epoch milliseconds.
    pub fn set_start(&mut self, start: i64) {
        self.start = Some(start);
    }

    /// Stamp the stop instant in epoch milliseconds.
    pub fn set_stop(&mut self, stop: i64) {
        self.stop = Some(stop);
    }

    /// Append a step to the record.
    pub fn push_step(&mut self, step: StepRecord) {
        self.steps.push(step);
    }

    /// The most recently appended step, for applying its verdict.
    pub fn last_step_mut(&mut self) -> Option<&mut StepRecord> {
        self.steps.last_mut()
    }

    /// Append a parameter to the record.
    pub fn add_parameter(&mut self, parameter: Parameter) {
        self.parameters.push(parameter);
    }

    /// Link an attachment to the record.
    pub fn add_attachment(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
    }

    /// Apply a verdict if none has been reached yet.
    ///
    /// Mirrors [`StepRecord::resolve`]: verdicts are terminal.
    pub fn resolve(&mut self, status: Status, details: Option<StatusDetails>) {
        if self.status.is_none() {
            self.status = Some(status);
            self.status_details = details;
        }
    }
}
