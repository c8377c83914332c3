//! Story-lifecycle translator for `casefile`.
//!
//! A BDD runner executes stories and announces its progress through
//! lifecycle callbacks. This crate models those callbacks as one
//! [`StoryEvent`] sum type and folds the stream into
//! [`casefile_model::TestRecord`]s through a [`StoryTranslator`]: one record
//! per scenario (or per example-table row), with each executed step's
//! verdict applied to the matching step record and the scenario's overall
//! verdict aggregated at finish.
//!
//! The translator never panics and never returns an error to the runner: a
//! reporting failure must not abort the story run it is reporting on, so
//! internal inconsistencies are logged and swallowed.

mod event;
mod translator;

pub use event::{StepFailure, StoryEvent};
pub use translator::StoryTranslator;
