//! Channel catalog configuration.
//!
//! Resolved in order: `--catalog <path>`, the `CONTACT_DESK_CATALOG` env var,
//! `~/.contact-desk/channels.toml`, and finally the built-in catalog.

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::model::{Capability, Channel};
use crate::registry::{ChannelRegistry, RegistryError};

/// Environment variable naming a catalog file.
pub const CATALOG_ENV: &str = "CONTACT_DESK_CATALOG";

/// The clinic's own channels, used when no catalog file exists.
pub const BUILTIN_CATALOG: &str = r#"
service-hours = ["Monday to Friday: 8am to 6pm", "Saturday: 8am to 12pm"]

[[channel]]
id = "online"
name = "Online Support"
capability = "inline-form"
default = true
contact-label = "E-mail"
contact-placeholder = "you@example.com"

[[channel]]
id = "whatsapp"
name = "WhatsApp"
capability = "redirect-only"
contact = "(11) 99999-9999"

[[channel]]
id = "phone"
name = "Phone"
capability = "redirect-only"
contact = "(11) 3456-7890"

[[channel]]
id = "email"
name = "E-mail"
capability = "redirect-only"
contact = "atendimento@clinicamediacare.com.br"

[[channel]]
id = "instagram"
name = "Instagram"
capability = "redirect-only"
contact = "@clinicamediacare"

[[channel]]
id = "facebook"
name = "Facebook"
capability = "redirect-only"
contact = "Clínica MediaCare"
"#;

/// Errors that can occur while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}", path = path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid catalog at {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid catalog at {origin}: no channel is marked `default = true`")]
    NoDefault { origin: String },

    #[error(
        "invalid catalog at {origin}: channels '{first}' and '{second}' are both marked default"
    )]
    MultipleDefaults {
        origin: String,
        first: String,
        second: String,
    },

    #[error("invalid catalog at {origin}: channel '{id}' is missing `{key}`")]
    MissingKey {
        origin: String,
        id: String,
        key: &'static str,
    },

    #[error("invalid catalog at {origin}: channel '{id}' is {capability} and cannot set `{key}`")]
    UnexpectedKey {
        origin: String,
        id: String,
        capability: &'static str,
        key: &'static str,
    },

    #[error("invalid catalog at {origin}: {source}")]
    Registry {
        origin: String,
        #[source]
        source: RegistryError,
    },
}

/// On-disk catalog layout.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    service_hours: Vec<String>,
    #[serde(rename = "channel")]
    channels: Vec<ChannelEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ChannelEntry {
    id: String,
    name: String,
    capability: CapabilityKind,
    #[serde(default)]
    default: bool,
    contact: Option<String>,
    contact_label: Option<String>,
    contact_placeholder: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum CapabilityKind {
    InlineForm,
    RedirectOnly,
}

impl CapabilityKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::InlineForm => "inline-form",
            Self::RedirectOnly => "redirect-only",
        }
    }
}

/// Where the catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Builtin,
}

impl CatalogSource {
    /// Picks the catalog source: explicit path, env var, home file, built-in.
    pub fn resolve(explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            return Self::File(path.to_path_buf());
        }

        if let Ok(path) = env::var(CATALOG_ENV)
            && !path.is_empty()
        {
            return Self::File(PathBuf::from(path));
        }

        match default_path() {
            Some(path) if path.is_file() => Self::File(path),
            _ => Self::Builtin,
        }
    }

    pub fn load(&self) -> Result<ChannelRegistry, ConfigError> {
        match self {
            Self::File(path) => {
                let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                tracing::debug!(path = %path.display(), "loading channel catalog");
                parse_catalog(&contents, &path.display().to_string())
            }
            Self::Builtin => parse_catalog(BUILTIN_CATALOG, "built-in catalog"),
        }
    }
}

/// The per-user catalog path: `~/.contact-desk/channels.toml`.
pub fn default_path() -> Option<PathBuf> {
    app_dir().map(|d| d.join("channels.toml"))
}

/// The per-user application directory: `~/.contact-desk/`.
pub fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".contact-desk"))
}

/// Parses catalog TOML into a registry. `origin` names the source in errors.
pub fn parse_catalog(contents: &str, origin: &str) -> Result<ChannelRegistry, ConfigError> {
    let file: CatalogFile = toml::from_str(contents).map_err(|source| ConfigError::Parse {
        origin: origin.to_string(),
        source,
    })?;

    let mut default_id: Option<String> = None;
    let mut channels = Vec::with_capacity(file.channels.len());

    for entry in file.channels {
        if entry.default {
            if let Some(first) = &default_id {
                return Err(ConfigError::MultipleDefaults {
                    origin: origin.to_string(),
                    first: first.clone(),
                    second: entry.id,
                });
            }
            default_id = Some(entry.id.clone());
        }
        channels.push(entry.into_channel(origin)?);
    }

    let default_id = default_id.ok_or_else(|| ConfigError::NoDefault {
        origin: origin.to_string(),
    })?;

    let registry =
        ChannelRegistry::new(channels, &default_id).map_err(|source| ConfigError::Registry {
            origin: origin.to_string(),
            source,
        })?;

    Ok(registry.with_service_hours(file.service_hours))
}

impl ChannelEntry {
    fn into_channel(self, origin: &str) -> Result<Channel, ConfigError> {
        if let Some(key) = self.stray_key() {
            return Err(ConfigError::UnexpectedKey {
                origin: origin.to_string(),
                id: self.id,
                capability: self.capability.as_str(),
                key,
            });
        }

        let missing = |key: &'static str| ConfigError::MissingKey {
            origin: origin.to_string(),
            id: self.id.clone(),
            key,
        };

        let capability = match self.capability {
            CapabilityKind::InlineForm => Capability::InlineForm {
                contact_field_label: self
                    .contact_label
                    .ok_or_else(|| missing("contact-label"))?,
                contact_field_placeholder: self.contact_placeholder.unwrap_or_default(),
            },
            CapabilityKind::RedirectOnly => Capability::RedirectOnly {
                contact_info: self.contact.ok_or_else(|| missing("contact"))?,
            },
        };

        Ok(Channel {
            id: self.id,
            display_name: self.name,
            capability,
        })
    }

    /// The first key set that the entry's capability has no use for.
    fn stray_key(&self) -> Option<&'static str> {
        match self.capability {
            CapabilityKind::InlineForm => self.contact.as_ref().map(|_| "contact"),
            CapabilityKind::RedirectOnly => {
                if self.contact_label.is_some() {
                    Some("contact-label")
                } else if self.contact_placeholder.is_some() {
                    Some("contact-placeholder")
                } else {
                    None
                }
            }
        }
    }
}
