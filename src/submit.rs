//! One patient session: selection, form, and the submit transition.
//!
//! ```text
//! select ──▶ (form unchanged)
//! edit   ──▶ (form updated)
//! submit ──▶ Rejected: form kept, notice shown
//!        └─▶ Accepted: form cleared, notice shown, submission handed back
//! ```
//!
//! The machine has no terminal state. Submitting on a redirect-only channel is
//! a caller bug, reported as [`SubmitError::InvalidOperation`].

use jiff::Timestamp;
use uuid::Uuid;

use crate::form::{FormLabels, FormModel};
use crate::model::{Channel, Submission, SubmissionOutcome, join_fields};
use crate::notify::{Notifier, Severity};
use crate::registry::ChannelRegistry;
use crate::selection::{SelectionError, SelectionState};
use crate::validate;

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("channel '{0}' does not accept inline messages")]
    InvalidOperation(String),
}

/// Owns a session's selection and form and drives submissions through them.
///
/// Each session gets its own controller; nothing here is shared.
pub struct SubmissionController<'r, N> {
    selection: SelectionState<'r>,
    form: FormModel,
    notifier: N,
}

impl<'r, N: Notifier> SubmissionController<'r, N> {
    pub fn new(registry: &'r ChannelRegistry, notifier: N) -> Self {
        Self {
            selection: SelectionState::new(registry),
            form: FormModel::new(),
            notifier,
        }
    }

    pub fn registry(&self) -> &'r ChannelRegistry {
        self.selection.registry()
    }

    pub fn current(&self) -> &'r Channel {
        self.selection.current()
    }

    pub fn select(&mut self, id: &str) -> Result<&'r Channel, SelectionError> {
        self.selection.select(id)
    }

    /// Jumps back to the default channel.
    pub fn reset_selection(&mut self) -> &'r Channel {
        self.selection.reset()
    }

    pub fn form(&self) -> &FormModel {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormModel {
        &mut self.form
    }

    /// Form labels for the channel selected right now.
    pub fn labels(&self) -> Option<FormLabels<'r>> {
        self.form.labels(self.current())
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Validates the form against the channel active at call time.
    ///
    /// On rejection the form keeps its values. On acceptance the trimmed values
    /// are packaged into a [`Submission`] and the form is cleared.
    pub fn submit(&mut self) -> Result<SubmissionOutcome, SubmitError> {
        let channel = self.selection.current();
        if !channel.accepts_inline() {
            tracing::debug!(channel = %channel.id, "submit attempted on redirect-only channel");
            return Err(SubmitError::InvalidOperation(channel.id.clone()));
        }

        let snapshot = self.form.snapshot();
        if !validate::is_submittable(channel, &snapshot) {
            let missing = validate::missing_fields(channel, &snapshot);
            let fields = join_fields(&missing);
            tracing::info!(channel = %channel.id, missing = %fields, "submission rejected");
            self.notify(
                &format!("Required fields missing: please fill in {fields}."),
                Severity::Error,
            );
            return Ok(SubmissionOutcome::Rejected { missing });
        }

        let submission = Submission {
            id: Uuid::new_v4(),
            channel_id: channel.id.clone(),
            channel_name: channel.display_name.clone(),
            patient_name: snapshot.name.trim().to_string(),
            patient_contact: snapshot.contact.trim().to_string(),
            message: snapshot.message.trim().to_string(),
            submitted_at: Timestamp::now(),
        };
        self.form.reset();

        tracing::info!(
            channel = %channel.id,
            submission = %submission.id,
            "submission accepted"
        );
        self.notify(
            &format!(
                "Message sent via {}. We will be in touch soon.",
                channel.display_name
            ),
            Severity::Info,
        );

        Ok(SubmissionOutcome::Accepted {
            channel_name: channel.display_name.clone(),
            submission,
        })
    }

    fn notify(&self, message: &str, severity: Severity) {
        tracing::debug!(?severity, notice = message, "handing notice to notifier");
        self.notifier.notify(message, severity);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::logging::tests::{capture_default_logs, capture_logs};
    use crate::model::{Field, FormSnapshot, SubmissionStatus};
    use crate::notify::tests::RecordingNotifier;
    use crate::registry::tests::sample_registry;

    fn fill(
        controller: &mut SubmissionController<'_, &RecordingNotifier>,
        name: &str,
        contact: &str,
        message: &str,
    ) {
        let form = controller.form_mut();
        form.set_name(name);
        form.set_contact(contact);
        form.set_message(message);
    }

    #[test]
    fn accepted_submission_resets_form() {
        let registry = sample_registry();
        let notifier = RecordingNotifier::default();
        let mut controller = SubmissionController::new(&registry, &notifier);
        fill(&mut controller, "Ana", "ana@x.com", "Dúvida sobre consulta");

        let outcome = controller.submit().unwrap();

        assert_eq!(outcome.status(), SubmissionStatus::Accepted);
        assert_eq!(controller.form().snapshot(), FormSnapshot::default());

        let SubmissionOutcome::Accepted {
            channel_name,
            submission,
        } = outcome
        else {
            panic!("expected acceptance");
        };
        assert_eq!(channel_name, "Online Support");
        assert_eq!(submission.channel_id, "online");
        assert_eq!(submission.patient_name, "Ana");
        assert_eq!(submission.message, "Dúvida sobre consulta");

        let notices = notifier.notices.borrow();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Info);
        assert!(notices[0].message.contains("Online Support"));
    }

    #[test]
    fn blank_message_is_rejected_and_form_kept() {
        for message in ["", "   "] {
            let registry = sample_registry();
            let notifier = RecordingNotifier::default();
            let mut controller = SubmissionController::new(&registry, &notifier);
            fill(&mut controller, "Ana", "ana@x.com", message);

            let outcome = controller.submit().unwrap();

            assert_eq!(outcome.status(), SubmissionStatus::Rejected);
            assert_eq!(outcome.reason(), Some(&BTreeSet::from([Field::Message])));
            let snap = controller.form().snapshot();
            assert_eq!(snap.name, "Ana");
            assert_eq!(snap.contact, "ana@x.com");
            assert_eq!(snap.message, message);

            let notices = notifier.notices.borrow();
            assert_eq!(notices.len(), 1);
            assert_eq!(notices[0].severity, Severity::Error);
            assert!(notices[0].message.contains("message"));
        }
    }

    #[test]
    fn submit_on_redirect_channel_is_invalid_operation() {
        let registry = sample_registry();
        let notifier = RecordingNotifier::default();
        let mut controller = SubmissionController::new(&registry, &notifier);
        fill(&mut controller, "Ana", "ana@x.com", "Hello");
        controller.select("phone").unwrap();

        let err = controller.submit().unwrap_err();
        assert!(matches!(err, SubmitError::InvalidOperation(id) if id == "phone"));
        assert!(notifier.notices.borrow().is_empty());
        assert_eq!(controller.form().snapshot().name, "Ana");
    }

    #[test]
    fn invalid_selection_keeps_previous_channel() {
        let registry = sample_registry();
        let notifier = RecordingNotifier::default();
        let mut controller = SubmissionController::new(&registry, &notifier);
        controller.select("whatsapp").unwrap();

        let err = controller.select("nonexistent-id").unwrap_err();
        assert!(matches!(err, SelectionError::InvalidChannel(_)));
        assert_eq!(controller.current().id, "whatsapp");
    }

    #[test]
    fn submit_uses_channel_selected_at_submit_time() {
        let registry = sample_registry();
        let notifier = RecordingNotifier::default();
        let mut controller = SubmissionController::new(&registry, &notifier);
        fill(&mut controller, "Ana", "ana@x.com", "Hello");

        // Labels were read while on the default channel, then the patient
        // switched away before pressing send.
        assert!(controller.labels().is_some());
        controller.select("phone").unwrap();
        assert!(controller.labels().is_none());
        assert!(controller.submit().is_err());

        controller.reset_selection();
        assert!(controller.submit().is_ok());
    }

    #[test]
    fn submitted_values_are_trimmed() {
        let registry = sample_registry();
        let notifier = RecordingNotifier::default();
        let mut controller = SubmissionController::new(&registry, &notifier);
        fill(&mut controller, "  Ana ", " ana@x.com\n", "\tHello ");

        let SubmissionOutcome::Accepted { submission, .. } = controller.submit().unwrap() else {
            panic!("expected acceptance");
        };
        assert_eq!(submission.patient_name, "Ana");
        assert_eq!(submission.patient_contact, "ana@x.com");
        assert_eq!(submission.message, "Hello");
    }

    #[test]
    fn machine_is_reenterable() {
        let registry = sample_registry();
        let notifier = RecordingNotifier::default();
        let mut controller = SubmissionController::new(&registry, &notifier);

        assert_eq!(
            controller.submit().unwrap().status(),
            SubmissionStatus::Rejected
        );
        fill(&mut controller, "Ana", "ana@x.com", "First");
        assert_eq!(
            controller.submit().unwrap().status(),
            SubmissionStatus::Accepted
        );
        fill(&mut controller, "Ana", "ana@x.com", "Second");
        assert_eq!(
            controller.submit().unwrap().status(),
            SubmissionStatus::Accepted
        );
        assert_eq!(notifier.notices.borrow().len(), 3);
    }

    #[test]
    fn sessions_are_independent() {
        let registry = sample_registry();
        let mut first = SubmissionController::new(&registry, RecordingNotifier::default());
        let second = SubmissionController::new(&registry, RecordingNotifier::default());

        first.select("phone").unwrap();
        first.form_mut().set_name("Ana");

        assert_eq!(second.current().id, "online");
        assert_eq!(second.form().snapshot(), FormSnapshot::default());
    }

    #[test]
    fn returned_errors_stay_quiet_under_default_filter() {
        let registry = sample_registry();
        let logs = capture_default_logs(|| {
            let mut controller = SubmissionController::new(&registry, RecordingNotifier::default());
            assert!(controller.select("nonexistent-id").is_err());
            controller.select("phone").unwrap();
            assert!(controller.submit().is_err());
        });
        assert!(logs.is_empty(), "{logs}");
    }

    #[test]
    fn notices_are_logged_at_debug_on_hand_off() {
        let registry = sample_registry();
        let logs = capture_logs("contact_desk=debug", || {
            let mut controller = SubmissionController::new(&registry, RecordingNotifier::default());
            controller.submit().unwrap();
        });
        assert!(logs.contains("handing notice to notifier"), "{logs}");
        assert!(logs.contains("Required fields missing"), "{logs}");
    }
}
