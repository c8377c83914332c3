//! Report data model for `casefile`.
//!
//! The model describes one executed scenario as a [`TestRecord`]: its
//! verdict, timing, ordered [`StepRecord`]s, example-table [`Parameter`]s,
//! and captured [`Attachment`]s. The types carry no lifecycle logic of their
//! own; the `casefile` crate owns allocation and finalisation, and the
//! adapter crates mutate records through it.
//!
//! Verdicts are deliberately optional everywhere: a step or scenario that
//! never executed has `status() == None`, and that absence is part of the
//! report, not an error.

mod attachment;
mod record;
mod status;

pub use attachment::{Attachment, AttachmentSource};
pub use record::{Parameter, StepRecord, TestRecord};
pub use status::{Stage, Status, StatusDetails};
