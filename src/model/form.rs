//! Form fields and point-in-time copies of what the patient typed.

use std::fmt;

use serde::Serialize;

/// One of the three inputs an inline channel asks for.
///
/// Ordered as they appear on the form, so a `BTreeSet<Field>` lists missing
/// fields top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Contact,
    Message,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 3] = [Field::Name, Field::Contact, Field::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Contact => "contact",
            Self::Message => "message",
        }
    }

    /// The field after this one, wrapping back to the first.
    pub fn next(self) -> Field {
        match self {
            Self::Name => Self::Contact,
            Self::Contact => Self::Message,
            Self::Message => Self::Name,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The form's values at one moment, detached from the live model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    pub name: String,
    pub contact: String,
    pub message: String,
}

impl FormSnapshot {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Contact => &self.contact,
            Field::Message => &self.message,
        }
    }
}
