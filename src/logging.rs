//! Tracing subscriber setup.
//!
//! The filter comes from `CONTACT_DESK_LOG` (e.g. `contact_desk=debug`) and
//! defaults to warnings only. The interactive UI owns the terminal, so it logs
//! to a file instead of stderr.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "CONTACT_DESK_LOG";

const DEFAULT_FILTER: &str = "contact_desk=warn";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to open log file {path}: {source}", path = path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to initialize tracing subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// The TUI log file: `~/.contact-desk/contact-desk.log`.
    pub fn default_file() -> Option<Self> {
        crate::config::app_dir().map(|d| Self::File(d.join("contact-desk.log")))
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Call once, before anything logs.
pub fn init(target: &LogTarget) -> Result<(), LoggingError> {
    match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(env_filter())
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .try_init()?,
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            tracing_subscriber::registry()
                .with(env_filter())
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()?;
        }
    }
    Ok(())
}

fn open_log_file(path: &Path) -> Result<fs::File, LoggingError> {
    let open = || -> io::Result<fs::File> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(path)
    };
    open().map_err(|source| LoggingError::Open {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use super::*;

    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Runs `f` under a thread-local subscriber using `filter` and returns what it logged.
    pub(crate) fn capture_logs(filter: &str, f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    /// Runs `f` under the filter used when `CONTACT_DESK_LOG` is unset.
    pub(crate) fn capture_default_logs(f: impl FnOnce()) -> String {
        capture_logs(DEFAULT_FILTER, f)
    }

    #[test]
    fn log_file_created_with_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("desk.log");
        open_log_file(&path).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn log_file_error_names_path() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be opened for appending.
        let err = open_log_file(dir.path()).unwrap_err();
        assert!(matches!(err, LoggingError::Open { .. }));
        assert!(err.to_string().contains(&dir.path().display().to_string()));
    }

    #[test]
    fn default_file_lives_in_app_dir() {
        if let Some(LogTarget::File(path)) = LogTarget::default_file() {
            assert!(path.ends_with(".contact-desk/contact-desk.log"));
        }
    }
}
