//! Output formatting for CLI display.

use crate::form::FormModel;
use crate::model::{Capability, Channel, Field};
use crate::registry::ChannelRegistry;

/// One line per channel: id, kind, name, and a default marker.
pub(super) fn format_channel_line(channel: &Channel, is_default: bool) -> String {
    let marker = if is_default { "  (default)" } else { "" };
    format!(
        "{:<12} [{}]  {}{marker}",
        channel.id,
        channel.capability.kind(),
        channel.display_name
    )
}

/// What a patient needs to know to use `channel`.
///
/// Inline channels list the form's fields; redirect channels show the contact
/// details, opening hours, and a pointer to the default channel when that one
/// takes messages directly.
pub(super) fn describe_channel(channel: &Channel, registry: &ChannelRegistry) -> Vec<String> {
    let mut lines = Vec::new();

    match &channel.capability {
        Capability::InlineForm { .. } => {
            lines.push(format!("{}: fill in your details and send a message", channel.display_name));
            if let Some(labels) = FormModel::new().labels(channel) {
                for field in Field::ALL {
                    let placeholder = labels.placeholder(field);
                    if placeholder.is_empty() {
                        lines.push(format!("  --{field:<8} {}", labels.label(field)));
                    } else {
                        lines.push(format!(
                            "  --{field:<8} {} ({placeholder})",
                            labels.label(field)
                        ));
                    }
                }
            }
        }
        Capability::RedirectOnly { contact_info } => {
            lines.push(format!("Contact us via {}", channel.display_name));
            lines.push(format!("  {contact_info}"));

            let hours = registry.service_hours();
            if !hours.is_empty() {
                lines.push(String::new());
                lines.push("Service hours:".to_string());
                lines.extend(hours.iter().map(|h| format!("  {h}")));
            }

            let default = registry.default_channel();
            if default.accepts_inline() && default.id != channel.id {
                lines.push(String::new());
                lines.push(format!(
                    "Tip: for immediate help, use {} (`contact-desk submit`).",
                    default.display_name
                ));
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::sample_registry;

    #[test]
    fn channel_line_marks_default() {
        let registry = sample_registry();
        let online = registry.get_channel("online").unwrap();
        let phone = registry.get_channel("phone").unwrap();

        let line = format_channel_line(online, true);
        assert!(line.starts_with("online"));
        assert!(line.contains("[inline-form]"));
        assert!(line.ends_with("(default)"));

        let line = format_channel_line(phone, false);
        assert!(line.contains("[redirect-only]"));
        assert!(!line.contains("default"));
    }

    #[test]
    fn inline_description_lists_fields() {
        let registry = sample_registry();
        let lines = describe_channel(registry.get_channel("online").unwrap(), &registry);
        assert!(lines.iter().any(|l| l.contains("--contact") && l.contains("E-mail")));
        assert!(lines.iter().any(|l| l.contains("--message")));
    }

    #[test]
    fn redirect_description_shows_contact_hours_and_tip() {
        let registry = sample_registry().with_service_hours(vec!["Saturday: 8am to 12pm".into()]);
        let lines = describe_channel(registry.get_channel("phone").unwrap(), &registry);
        assert_eq!(lines[0], "Contact us via Phone");
        assert_eq!(lines[1], "  (11) 3456-7890");
        assert!(lines.iter().any(|l| l.contains("Saturday")));
        assert!(lines.iter().any(|l| l.starts_with("Tip:") && l.contains("Online Support")));
    }

    #[test]
    fn redirect_description_omits_empty_hours() {
        let registry = sample_registry();
        let lines = describe_channel(registry.get_channel("whatsapp").unwrap(), &registry);
        assert!(!lines.iter().any(|l| l == "Service hours:"));
    }
}
