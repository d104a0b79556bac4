//! The channel catalog.
//!
//! Built once from configuration and never mutated afterwards. Sessions borrow
//! it; each session keeps its own selection and form.

use std::collections::HashSet;

use crate::model::{Capability, Channel};

/// Errors raised while building or querying a registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("channel catalog is empty")]
    Empty,

    #[error("duplicate channel id: {0}")]
    DuplicateId(String),

    #[error("default channel '{0}' is not in the catalog")]
    UnknownDefault(String),

    #[error("channel '{0}' is redirect-only but has no contact details")]
    MissingContactInfo(String),

    #[error("channel '{0}' accepts messages but has no contact field label")]
    MissingContactLabel(String),

    #[error("channel not found: {0}")]
    NotFound(String),
}

pub type Result<T> = core::result::Result<T, RegistryError>;

/// Ordered, immutable catalog of channels with one default.
#[derive(Debug, Clone)]
pub struct ChannelRegistry {
    channels: Vec<Channel>,
    default_index: usize,
    service_hours: Vec<String>,
}

impl ChannelRegistry {
    /// Builds a registry, checking every catalog invariant up front so that
    /// lookups of ids taken from [`list_channels`](Self::list_channels) cannot fail.
    pub fn new(channels: Vec<Channel>, default_id: &str) -> Result<Self> {
        if channels.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        for channel in &channels {
            if !seen.insert(channel.id.as_str()) {
                return Err(RegistryError::DuplicateId(channel.id.clone()));
            }
            match &channel.capability {
                Capability::RedirectOnly { contact_info } if contact_info.trim().is_empty() => {
                    return Err(RegistryError::MissingContactInfo(channel.id.clone()));
                }
                Capability::InlineForm {
                    contact_field_label,
                    ..
                } if contact_field_label.trim().is_empty() => {
                    return Err(RegistryError::MissingContactLabel(channel.id.clone()));
                }
                _ => {}
            }
        }

        let default_index = channels
            .iter()
            .position(|c| c.id == default_id)
            .ok_or_else(|| RegistryError::UnknownDefault(default_id.to_string()))?;

        tracing::debug!(
            channels = channels.len(),
            default = default_id,
            "channel registry built"
        );

        Ok(Self {
            channels,
            default_index,
            service_hours: Vec::new(),
        })
    }

    /// Attaches opening hours shown alongside redirect-only contact details.
    #[must_use]
    pub fn with_service_hours(mut self, hours: Vec<String>) -> Self {
        self.service_hours = hours;
        self
    }

    /// All channels in catalog order.
    pub fn list_channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn get_channel(&self, id: &str) -> Result<&Channel> {
        self.channels
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    pub fn default_channel_id(&self) -> &str {
        &self.default_channel().id
    }

    pub fn default_channel(&self) -> &Channel {
        &self.channels[self.default_index]
    }

    /// Index of a channel in catalog order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.channels.iter().position(|c| c.id == id)
    }

    pub fn service_hours(&self) -> &[String] {
        &self.service_hours
    }
}
