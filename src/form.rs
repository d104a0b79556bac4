//! The patient's in-progress message.
//!
//! Setters never validate: typing must never fail. What the contact field
//! means comes from the selected channel, not from anything stored here.

use crate::model::{Channel, Field, FormSnapshot};

const NAME_LABEL: &str = "Full name";
const NAME_PLACEHOLDER: &str = "Enter your full name";
const MESSAGE_LABEL: &str = "Message";
const MESSAGE_PLACEHOLDER: &str =
    "Tell us how we can help (appointments, questions, test results, etc.)";

/// Labels and hints for the three inputs, as they apply to one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLabels<'c> {
    pub name_label: &'static str,
    pub name_placeholder: &'static str,
    pub contact_label: &'c str,
    pub contact_placeholder: &'c str,
    pub message_label: &'static str,
    pub message_placeholder: &'static str,
}

impl<'c> FormLabels<'c> {
    pub fn label(&self, field: Field) -> &'c str {
        match field {
            Field::Name => self.name_label,
            Field::Contact => self.contact_label,
            Field::Message => self.message_label,
        }
    }

    pub fn placeholder(&self, field: Field) -> &'c str {
        match field {
            Field::Name => self.name_placeholder,
            Field::Contact => self.contact_placeholder,
            Field::Message => self.message_placeholder,
        }
    }
}

/// Name, contact and message as currently typed.
#[derive(Debug, Clone, Default)]
pub struct FormModel {
    patient_name: String,
    patient_contact: String,
    message: String,
}

impl FormModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.patient_name = value.into();
    }

    pub fn set_contact(&mut self, value: impl Into<String>) {
        self.patient_contact = value.into();
    }

    pub fn set_message(&mut self, value: impl Into<String>) {
        self.message = value.into();
    }

    /// Sets a field by name.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        match field {
            Field::Name => self.set_name(value),
            Field::Contact => self.set_contact(value),
            Field::Message => self.set_message(value),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.patient_name,
            Field::Contact => &self.patient_contact,
            Field::Message => &self.message,
        }
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            name: self.patient_name.clone(),
            contact: self.patient_contact.clone(),
            message: self.message.clone(),
        }
    }

    /// Clears all three fields.
    pub(crate) fn reset(&mut self) {
        self.patient_name.clear();
        self.patient_contact.clear();
        self.message.clear();
    }

    /// Labels for `channel`, or `None` if it takes no inline message.
    pub fn labels<'c>(&self, channel: &'c Channel) -> Option<FormLabels<'c>> {
        Some(FormLabels {
            name_label: NAME_LABEL,
            name_placeholder: NAME_PLACEHOLDER,
            contact_label: channel.contact_field_label()?,
            contact_placeholder: channel.contact_field_placeholder()?,
            message_label: MESSAGE_LABEL,
            message_placeholder: MESSAGE_PLACEHOLDER,
        })
    }
}
