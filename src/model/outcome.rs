//! Submission results and the deliver-intent handed off on acceptance.

use std::collections::BTreeSet;

use jiff::Timestamp;
use serde::Serialize;
use uuid::Uuid;

use super::Field;

/// A locally accepted message, ready for whatever transport picks it up.
///
/// Field values are trimmed. Acceptance says nothing about delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub channel_id: String,
    pub channel_name: String,
    pub patient_name: String,
    pub patient_contact: String,
    pub message: String,
    pub submitted_at: Timestamp,
}

/// Coarse result of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Rejected,
    Accepted,
}

/// What happened when the patient pressed send.
///
/// Rejection is an ordinary value: missing input is expected, not exceptional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubmissionOutcome {
    /// One or more required fields were empty or whitespace-only.
    /// The form keeps its values.
    Rejected { missing: BTreeSet<Field> },

    /// The message was accepted and the form cleared.
    #[serde(rename_all = "camelCase")]
    Accepted {
        channel_name: String,
        submission: Submission,
    },
}

impl SubmissionOutcome {
    pub fn status(&self) -> SubmissionStatus {
        match self {
            Self::Rejected { .. } => SubmissionStatus::Rejected,
            Self::Accepted { .. } => SubmissionStatus::Accepted,
        }
    }

    /// The missing fields, when rejected.
    pub fn reason(&self) -> Option<&BTreeSet<Field>> {
        match self {
            Self::Rejected { missing } => Some(missing),
            Self::Accepted { .. } => None,
        }
    }
}
