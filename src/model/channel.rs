//! Contact channels: the catalog entries a patient chooses between.

use serde::Serialize;

/// A named way of reaching the clinic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    /// Unique identifier within a registry (e.g. `"online"`, `"phone"`).
    pub id: String,

    /// Human-readable label.
    pub display_name: String,

    /// What the patient can do through this channel.
    #[serde(flatten)]
    pub capability: Capability,
}

/// Whether a channel takes a message inline or only shows how to get in touch.
///
/// Each variant carries exactly the data its behavior needs, so a redirect
/// channel cannot exist without contact details and an inline channel cannot
/// exist without a contact-field label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "capability", rename_all = "kebab-case")]
pub enum Capability {
    /// The patient fills in name, contact and message here.
    #[serde(rename_all = "camelCase")]
    InlineForm {
        /// What the contact field asks for (e.g. "E-mail", "WhatsApp / Phone").
        contact_field_label: String,
        /// Hint text shown in the empty contact field.
        contact_field_placeholder: String,
    },

    /// The patient is shown a phone number, handle or address to use elsewhere.
    #[serde(rename_all = "camelCase")]
    RedirectOnly { contact_info: String },
}

impl Channel {
    pub fn accepts_inline(&self) -> bool {
        matches!(self.capability, Capability::InlineForm { .. })
    }

    /// The external contact details, present only for redirect channels.
    pub fn contact_info(&self) -> Option<&str> {
        match &self.capability {
            Capability::RedirectOnly { contact_info } => Some(contact_info),
            Capability::InlineForm { .. } => None,
        }
    }

    pub fn contact_field_label(&self) -> Option<&str> {
        match &self.capability {
            Capability::InlineForm {
                contact_field_label,
                ..
            } => Some(contact_field_label),
            Capability::RedirectOnly { .. } => None,
        }
    }

    pub fn contact_field_placeholder(&self) -> Option<&str> {
        match &self.capability {
            Capability::InlineForm {
                contact_field_placeholder,
                ..
            } => Some(contact_field_placeholder),
            Capability::RedirectOnly { .. } => None,
        }
    }
}

impl Capability {
    /// Short kebab-case name, matching the catalog file spelling.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InlineForm { .. } => "inline-form",
            Self::RedirectOnly { .. } => "redirect-only",
        }
    }
}
