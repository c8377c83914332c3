//! Lifecycle events emitted by a story runner.
//!
//! Runner-specific callback interfaces collapse into one sum type so the
//! translator can be driven by any runner (or by a test) that can produce
//! the semantic events. Runners emit [`StoryEvent::StepStarted`] only for
//! steps they actually execute; steps that never run arrive as standalone
//! [`StoryEvent::StepPending`] or [`StoryEvent::StepNotPerformed`] events.

/// Why a step did not pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepFailure {
    /// An assertion compared actual against expected and mismatched.
    Assertion {
        /// The assertion's own rendering, e.g. `expected: <15> but was: <123>`.
        message: String,
    },
    /// Execution stopped for any other reason.
    Error {
        /// The error's display text.
        message: String,
    },
}

impl StepFailure {
    /// Record an assertion mismatch.
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion {
            message: message.into(),
        }
    }

    /// Record an unexpected error.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// The failure's display text.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Assertion { message } | Self::Error { message } => message,
        }
    }
}

/// One semantic event in a story run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoryEvent {
    /// A story begins. Given-story inclusions announce themselves with
    /// `given_story: true` and leave the importing scenario's record open.
    StoryStarted {
        /// The story's file name, e.g. `simple.story`.
        name: String,
        /// Free-text narrative the story carries, shared by its scenarios.
        description: Option<String>,
        /// Whether this story runs as a given-story inclusion.
        given_story: bool,
    },
    /// A scenario begins. `example_count` is zero for plain scenarios; a
    /// parameterised scenario defers record creation to its example rows.
    ScenarioStarted {
        /// The scenario's title from the story text.
        title: String,
        /// Number of example-table rows the scenario will run with.
        example_count: usize,
    },
    /// One example-table row begins within the current scenario.
    ExampleStarted {
        /// Zero-based row index.
        index: usize,
        /// Column name and cell value pairs, in table order.
        row: Vec<(String, String)>,
    },
    /// The runner starts executing a step.
    StepStarted {
        /// The step line as written in the story.
        text: String,
    },
    /// The running step completed without failure.
    StepSucceeded {
        /// The step line as written in the story.
        text: String,
    },
    /// The running step failed.
    StepFailed {
        /// The step line as written in the story.
        text: String,
        /// What went wrong.
        failure: StepFailure,
    },
    /// A step has no matching definition; it never starts.
    StepPending {
        /// The step line as written in the story.
        text: String,
    },
    /// A step was skipped because an earlier step in the scenario failed.
    StepNotPerformed {
        /// The step line as written in the story.
        text: String,
    },
    /// A story line that matches no step signature, such as a comment.
    Comment {
        /// The raw line.
        text: String,
    },
    /// The current scenario (or its last example row) is complete.
    ScenarioFinished,
    /// The story is complete.
    StoryFinished {
        /// Whether this closes a given-story inclusion.
        given_story: bool,
    },
}
