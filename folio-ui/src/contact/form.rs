use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use folio_common::email::{EmailDelivery, OutboundEmail};
use folio_common::{ContactFormDraft, Field, ValidationError};

use super::notice::{Notice, MSG_SEND_FAILED, MSG_SENT};

/// How long `Sent` is shown before the form re-enables itself
pub const SENT_RESET_AFTER: Duration = Duration::from_secs(3);

/// Result of the most recent submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionOutcome {
    #[default]
    Idle,
    Sent,
    Failed,
}

/// Why a submit was refused before anything was sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("submit is disabled")]
    SubmitDisabled,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Contact form component state
///
/// Owns the draft exclusively. The outcome is published on a `watch` channel
/// so a view can re-render when the `Sent` → `Idle` timer fires. Dropping the
/// form (or calling [`ContactForm::unmount`]) cancels that timer and makes any
/// in-flight submit discard its result.
pub struct ContactForm {
    draft: ContactFormDraft,
    delivery: Arc<dyn EmailDelivery>,
    to_email: String,
    outcome: Arc<watch::Sender<SubmissionOutcome>>,
    notices: Vec<Notice>,
    mounted: CancellationToken,
    reset_timer: Option<JoinHandle<()>>,
}

impl ContactForm {
    /// Mounted, empty form delivering to `to_email`
    pub fn new(delivery: Arc<dyn EmailDelivery>, to_email: impl Into<String>) -> Self {
        let (outcome, _) = watch::channel(SubmissionOutcome::Idle);
        Self {
            draft: ContactFormDraft::default(),
            delivery,
            to_email: to_email.into(),
            outcome: Arc::new(outcome),
            notices: Vec::new(),
            mounted: CancellationToken::new(),
            reset_timer: None,
        }
    }

    pub fn draft(&self) -> &ContactFormDraft {
        &self.draft
    }

    /// Replace one field; the others are untouched
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        self.draft = self.draft.update_field(field, value);
    }

    pub fn outcome(&self) -> SubmissionOutcome {
        *self.outcome.borrow()
    }

    /// Receiver that sees every outcome change, including the timed reset
    pub fn subscribe(&self) -> watch::Receiver<SubmissionOutcome> {
        self.outcome.subscribe()
    }

    /// Submit control state: disabled while `Sent` or after unmount
    pub fn can_submit(&self) -> bool {
        self.outcome() != SubmissionOutcome::Sent && !self.mounted.is_cancelled()
    }

    /// Validate and hand the draft to the delivery collaborator
    ///
    /// Exactly one send per accepted call; failures are not retried.
    pub async fn submit(&mut self) -> Result<SubmissionOutcome, FormError> {
        if !self.can_submit() {
            debug!(outcome = ?self.outcome(), "Submit ignored while disabled");
            return Err(FormError::SubmitDisabled);
        }

        let contact = self.draft.validate()?;
        let email = OutboundEmail::new(&contact, &self.to_email);

        debug!(delivery = self.delivery.name(), "Sending contact message");
        let result = self.delivery.send(&email).await;

        if self.mounted.is_cancelled() {
            debug!("Form unmounted during send, result discarded");
            return Ok(self.outcome());
        }

        match result {
            Ok(()) => {
                info!(delivery = self.delivery.name(), "Contact message sent");
                self.draft.reset();
                self.notices.push(Notice::success(MSG_SENT));
                self.outcome.send_replace(SubmissionOutcome::Sent);
                self.schedule_reset();
                Ok(SubmissionOutcome::Sent)
            }
            Err(e) => {
                warn!(
                    delivery = self.delivery.name(),
                    error = %e,
                    "Contact message delivery failed"
                );
                self.notices.push(Notice::error(MSG_SEND_FAILED));
                self.outcome.send_replace(SubmissionOutcome::Failed);
                Ok(SubmissionOutcome::Failed)
            }
        }
    }

    /// Notices not yet shown
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Hand all pending notices to the view
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn dismiss(&mut self, index: usize) -> Option<Notice> {
        (index < self.notices.len()).then(|| self.notices.remove(index))
    }

    /// Token cancelled when the form goes away
    pub fn mount_token(&self) -> CancellationToken {
        self.mounted.clone()
    }

    pub fn is_mounted(&self) -> bool {
        !self.mounted.is_cancelled()
    }

    pub fn unmount(&self) {
        self.mounted.cancel();
    }

    fn schedule_reset(&mut self) {
        if let Some(previous) = self.reset_timer.take() {
            previous.abort();
        }

        let outcome = Arc::clone(&self.outcome);
        let mounted = self.mounted.clone();
        self.reset_timer = Some(tokio::spawn(async move {
            tokio::select! {
                _ = mounted.cancelled() => {}
                _ = tokio::time::sleep(SENT_RESET_AFTER) => {
                    outcome.send_if_modified(|current| {
                        if *current == SubmissionOutcome::Sent {
                            *current = SubmissionOutcome::Idle;
                            true
                        } else {
                            false
                        }
                    });
                }
            }
        }));
    }
}

impl Drop for ContactForm {
    fn drop(&mut self) {
        self.mounted.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_converts() {
        let err: FormError = ValidationError::InvalidEmail.into();
        assert_eq!(err, FormError::Validation(ValidationError::InvalidEmail));
        assert_eq!(err.to_string(), "invalid email address");
    }

    #[test]
    fn test_default_outcome_is_idle() {
        assert_eq!(SubmissionOutcome::default(), SubmissionOutcome::Idle);
    }
}
