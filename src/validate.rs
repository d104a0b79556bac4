//! Decides whether a form can be submitted through a channel.
//!
//! This is the authority on submittability; front ends that grey out a send
//! button are only a convenience.

use std::collections::BTreeSet;

use crate::model::{Channel, Field, FormSnapshot};

/// True only for inline channels with every field non-blank after trimming.
pub fn is_submittable(channel: &Channel, form: &FormSnapshot) -> bool {
    channel.accepts_inline() && missing_fields(channel, form).is_empty()
}

/// Fields that are empty or whitespace-only, in form order.
///
/// Reports the form's gaps regardless of channel; a redirect-only channel is
/// never submittable even when this is empty.
pub fn missing_fields(_channel: &Channel, form: &FormSnapshot) -> BTreeSet<Field> {
    Field::ALL
        .into_iter()
        .filter(|f| form.get(*f).trim().is_empty())
        .collect()
}
