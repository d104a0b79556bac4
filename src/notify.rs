//! Telling the patient how a submission went.
//!
//! The desk only asks for a notice to be shown; how it is shown belongs to
//! the front end. Notices are fire-and-forget.

use std::cell::RefCell;

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Receives user-facing notices from the submission controller.
pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, message: &str, severity: Severity) {
        (**self).notify(message, severity);
    }
}

/// Prints notices to stderr, for one-shot CLI use.
#[derive(Debug, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => eprintln!("{message}"),
            Severity::Error => eprintln!("✗ {message}"),
        }
    }
}

/// A notice as last shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

/// Keeps the most recent notice for a status line to render.
#[derive(Debug, Default)]
pub struct StatusLine {
    last: RefCell<Option<Notice>>,
}

impl StatusLine {
    pub fn current(&self) -> Option<Notice> {
        self.last.borrow().clone()
    }

    pub fn clear(&self) {
        self.last.borrow_mut().take();
    }
}

impl Notifier for StatusLine {
    fn notify(&self, message: &str, severity: Severity) {
        *self.last.borrow_mut() = Some(Notice {
            message: message.to_string(),
            severity,
        });
    }
}
