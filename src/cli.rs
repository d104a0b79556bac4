//! CLI interface for the contact desk.
//!
//! Each subcommand runs one short session against the loaded catalog:
//! arguments in, plain text (or `--json`) out. Notices go to stderr.
//! Run without a subcommand to open the interactive desk.

mod format;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::model::{SubmissionOutcome, SubmissionStatus, join_fields};
use crate::notify::StderrNotifier;
use crate::registry::ChannelRegistry;
use crate::submit::SubmissionController;

use format::{describe_channel, format_channel_line};

/// Contact desk: reach the clinic through the channel that suits you.
#[derive(Debug, Parser)]
#[command(name = "contact-desk", after_long_help = USAGE_HELP)]
pub struct Cli {
    /// Channel catalog file (TOML). Overrides `CONTACT_DESK_CATALOG`
    /// and `~/.contact-desk/channels.toml`.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

const USAGE_HELP: &str = r#"Examples:
  contact-desk                       open the interactive desk
  contact-desk channels              list channels
  contact-desk show phone            how to reach us by phone
  contact-desk submit --name Ana --contact ana@x.com --message "Question about my appointment""#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List channels in catalog order.
    Channels {
        /// Print the catalog as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show how to use one channel: the form it asks for, or where to reach us.
    Show {
        /// Channel id (see `channels`).
        id: String,
    },

    /// Send a message through a channel that accepts one.
    ///
    /// Prints the submission ID on success. Exits non-zero if a field is
    /// missing or the channel only lists contact details.
    Submit {
        /// Channel id. Defaults to the catalog's default channel.
        #[arg(long)]
        channel: Option<String>,

        /// Your full name.
        #[arg(long, default_value = "")]
        name: String,

        /// How we reach you back (what this means depends on the channel).
        #[arg(long, default_value = "")]
        contact: String,

        /// What you need help with.
        #[arg(long, default_value = "")]
        message: String,

        /// Print the outcome as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Run a CLI command, returning an error message on failure.
pub fn run(command: Command, registry: &ChannelRegistry) -> Result<(), String> {
    match command {
        Command::Channels { json } => cmd_channels(registry, json),
        Command::Show { id } => cmd_show(registry, &id),
        Command::Submit {
            channel,
            name,
            contact,
            message,
            json,
        } => cmd_submit(
            registry,
            channel.as_deref(),
            Entry {
                name,
                contact,
                message,
            },
            json,
        ),
    }
}

/// Field values given on the command line.
struct Entry {
    name: String,
    contact: String,
    message: String,
}

fn cmd_channels(registry: &ChannelRegistry, json: bool) -> Result<(), String> {
    if json {
        let json = serde_json::to_string_pretty(registry.list_channels())
            .map_err(|e| format!("failed to serialize channels: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    let default_id = registry.default_channel_id();
    for channel in registry.list_channels() {
        println!("{}", format_channel_line(channel, channel.id == default_id));
    }
    Ok(())
}

fn cmd_show(registry: &ChannelRegistry, id: &str) -> Result<(), String> {
    let channel = registry.get_channel(id).map_err(|e| e.to_string())?;
    for line in describe_channel(channel, registry) {
        println!("{line}");
    }
    Ok(())
}

fn cmd_submit(
    registry: &ChannelRegistry,
    channel: Option<&str>,
    entry: Entry,
    json: bool,
) -> Result<(), String> {
    let mut desk = SubmissionController::new(registry, StderrNotifier);

    if let Some(id) = channel {
        desk.select(id).map_err(|e| e.to_string())?;
    }

    let form = desk.form_mut();
    form.set_name(entry.name);
    form.set_contact(entry.contact);
    form.set_message(entry.message);

    let outcome = desk.submit().map_err(|e| {
        let current = desk.current();
        match current.contact_info() {
            Some(info) => format!("{e}; contact {} at {info}", current.display_name),
            None => e.to_string(),
        }
    })?;

    tracing::debug!(status = ?outcome.status(), "cli submission finished");

    if json {
        let json = serde_json::to_string_pretty(&outcome)
            .map_err(|e| format!("failed to serialize outcome: {e}"))?;
        println!("{json}");
    } else if let SubmissionOutcome::Accepted { submission, .. } = &outcome {
        println!("{}", submission.id);
    }

    match outcome.status() {
        SubmissionStatus::Accepted => Ok(()),
        SubmissionStatus::Rejected => Err(format!(
            "submission rejected: missing {}",
            join_fields(outcome.reason().into_iter().flatten())
        )),
    }
}
