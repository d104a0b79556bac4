//! Core data model for the contact desk.
//!
//! Channels come from static configuration; form snapshots, submissions and
//! outcomes are transient values produced while a patient uses one session.

mod channel;
mod form;
mod outcome;

pub use channel::{Capability, Channel};
pub use form::{Field, FormSnapshot};
pub use outcome::{Submission, SubmissionOutcome, SubmissionStatus};

/// Join field names for display: `name, message`.
pub fn join_fields<'a>(fields: impl IntoIterator<Item = &'a Field>) -> String {
    fields
        .into_iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
