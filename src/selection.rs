//! Which channel the patient currently has selected.

use crate::model::Channel;
use crate::registry::ChannelRegistry;

#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("invalid channel: {0}")]
    InvalidChannel(String),
}

/// The active channel of one session.
///
/// Only the id is stored; every read resolves through the registry so callers
/// always see the channel that is selected *now*.
#[derive(Debug, Clone)]
pub struct SelectionState<'r> {
    registry: &'r ChannelRegistry,
    current_id: String,
}

impl<'r> SelectionState<'r> {
    /// Starts on the registry's default channel.
    pub fn new(registry: &'r ChannelRegistry) -> Self {
        Self {
            registry,
            current_id: registry.default_channel_id().to_string(),
        }
    }

    pub fn current(&self) -> &'r Channel {
        // The id only ever comes from the registry, so the fallback is unreachable.
        self.registry
            .get_channel(&self.current_id)
            .unwrap_or_else(|_| self.registry.default_channel())
    }

    /// Makes `id` the active channel. Unknown ids leave the selection untouched.
    pub fn select(&mut self, id: &str) -> Result<&'r Channel, SelectionError> {
        let channel = self.registry.get_channel(id).map_err(|_| {
            tracing::debug!(channel = id, "rejected selection of unknown channel");
            SelectionError::InvalidChannel(id.to_string())
        })?;
        if self.current_id != channel.id {
            tracing::debug!(from = %self.current_id, to = %channel.id, "channel selected");
            self.current_id.clone_from(&channel.id);
        }
        Ok(channel)
    }

    /// Returns to the registry default.
    pub fn reset(&mut self) -> &'r Channel {
        let channel = self.registry.default_channel();
        self.current_id.clone_from(&channel.id);
        channel
    }

    pub fn registry(&self) -> &'r ChannelRegistry {
        self.registry
    }
}
