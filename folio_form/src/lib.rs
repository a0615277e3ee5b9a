//! The interactive contact form: field values, inline annotations, the submit
//! button and the submission lifecycle.
//!
//! ```text
//! Idle -> Validating -> Idle             (invalid)
//!                    -> Sending -> Success -> Idle
//!                               -> Error   -> Idle
//! ```

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use folio_core_contact_contracts::{ContactSendMessageError, ContactService};
use folio_models::{
    contact::{FieldName, SubmissionOutcome, SubmissionRequest},
    form::{FormPhase, SubmitButton},
    notification::NotificationKind,
    validation::{ValidationReport, ValidationResult},
};
use folio_shared_contracts::{
    celebration::CelebrationService, notification::NotificationService,
};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

pub use binding::{FormBinding, FormBindingError};

mod binding;

#[cfg(test)]
mod tests;

pub struct ContactForm<Contact, NotificationS, Celebration> {
    inner: Arc<Inner<Contact, NotificationS, Celebration>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFormConfig {
    pub success_message: String,
    pub failure_message: String,
}

struct Inner<Contact, NotificationS, Celebration> {
    contact: Contact,
    notification: NotificationS,
    celebration: Celebration,
    config: ContactFormConfig,
    state: Mutex<FormState>,
    phase: watch::Sender<FormPhase>,
}

#[derive(Debug, Default)]
struct FormState {
    phase: FormPhase,
    fields: SubmissionRequest,
    annotations: BTreeMap<FieldName, String>,
    button: SubmitButton,
}

#[derive(Debug, Error)]
pub enum ContactFormSubmitError {
    #[error("The submission did not pass validation.")]
    Invalid(ValidationReport),
    #[error("A submission is already in progress.")]
    InProgress,
}

impl<Contact, NotificationS, Celebration> Clone for ContactForm<Contact, NotificationS, Celebration> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<Contact, NotificationS, Celebration> ContactForm<Contact, NotificationS, Celebration>
where
    Contact: ContactService,
    NotificationS: NotificationService,
    Celebration: CelebrationService,
{
    pub fn new(
        contact: Contact,
        notification: NotificationS,
        celebration: Celebration,
        config: ContactFormConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                contact,
                notification,
                celebration,
                config,
                state: Mutex::default(),
                phase: watch::Sender::new(FormPhase::Idle),
            }),
        }
    }

    /// Replaces the value of a field. An existing annotation on the field is
    /// cleared until the field is validated again.
    pub fn input(&self, field: FieldName, value: impl Into<String>) {
        let mut state = self.inner.state();
        *state.fields.get_mut(field) = value.into();
        if state.annotations.remove(&field).is_some() {
            debug!(%field, "cleared annotation on input");
        }
    }

    /// Validates a field after it lost focus and updates its annotation.
    pub fn blur(&self, field: FieldName) -> ValidationResult {
        let mut state = self.inner.state();
        let result = self
            .inner
            .contact
            .validate_field(field, state.fields.get(field));
        state.annotate(field, &result);
        result
    }

    /// Runs the submit lifecycle once.
    ///
    /// Calls the relay at most once. The relay is not called when validation
    /// fails or while another submission of this form is still being sent.
    /// The button is back in its idle state when this returns, whatever the
    /// outcome.
    #[tracing::instrument(skip_all)]
    pub async fn submit(&self) -> Result<SubmissionOutcome, ContactFormSubmitError> {
        let request = {
            let mut state = self.inner.state();
            if state.phase == FormPhase::Sending {
                debug!("submit ignored while sending");
                return Err(ContactFormSubmitError::InProgress);
            }

            self.inner.transition(&mut state, FormPhase::Validating);
            let request = state.fields.clone();
            let report = self.inner.contact.validate(&request);
            state.annotate_all(&report);
            if !report.is_valid() {
                self.inner.transition(&mut state, FormPhase::Idle);
                return Err(ContactFormSubmitError::Invalid(report));
            }

            self.inner.transition(&mut state, FormPhase::Sending);
            state.button = SubmitButton::LOADING;
            request
        };

        let _idle = IdleGuard(&*self.inner);

        let outcome = match self.inner.contact.send_message(request).await {
            Ok(outcome) => outcome,
            Err(ContactSendMessageError::Invalid(report)) => {
                self.inner.state().annotate_all(&report);
                return Err(ContactFormSubmitError::Invalid(report));
            }
        };

        match &outcome {
            SubmissionOutcome::Success => {
                {
                    let mut state = self.inner.state();
                    self.inner.transition(&mut state, FormPhase::Success);
                    state.fields.clear();
                    state.annotations.clear();
                }
                self.inner.notification.present(
                    self.inner.config.success_message.clone(),
                    NotificationKind::Success,
                );
                self.inner.celebration.celebrate();
            }
            SubmissionOutcome::Failure(reason) => {
                warn!(%reason, "contact form submission failed");
                {
                    let mut state = self.inner.state();
                    self.inner.transition(&mut state, FormPhase::Error);
                }
                self.inner.notification.present(
                    self.inner.config.failure_message.clone(),
                    NotificationKind::Error,
                );
            }
        }

        Ok(outcome)
    }

    pub fn fields(&self) -> SubmissionRequest {
        self.inner.state().fields.clone()
    }

    pub fn annotation(&self, field: FieldName) -> Option<String> {
        self.inner.state().annotations.get(&field).cloned()
    }

    pub fn annotations(&self) -> BTreeMap<FieldName, String> {
        self.inner.state().annotations.clone()
    }

    pub fn button(&self) -> SubmitButton {
        self.inner.state().button
    }

    pub fn phase(&self) -> FormPhase {
        self.inner.state().phase
    }

    /// Observes phase transitions, e.g. to wait until a send is in flight.
    pub fn subscribe_phase(&self) -> watch::Receiver<FormPhase> {
        self.inner.phase.subscribe()
    }

    pub fn notifications(&self) -> &NotificationS {
        &self.inner.notification
    }
}

impl<Contact, NotificationS, Celebration> Inner<Contact, NotificationS, Celebration> {
    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, state: &mut FormState, phase: FormPhase) {
        debug!(from = ?state.phase, to = ?phase, "form phase changed");
        state.phase = phase;
        self.phase.send_replace(phase);
    }
}

impl FormState {
    fn annotate(&mut self, field: FieldName, result: &ValidationResult) {
        match (&result.message, result.valid) {
            (Some(message), false) => {
                self.annotations.insert(field, message.clone());
            }
            _ => {
                self.annotations.remove(&field);
            }
        }
    }

    fn annotate_all(&mut self, report: &ValidationReport) {
        for field in FieldName::ALL {
            if let Some(result) = report.get(field) {
                self.annotate(field, result);
            }
        }
    }
}

/// Returns the form to `Idle` with an enabled button once a send finishes,
/// including when the submit future is dropped mid-send.
struct IdleGuard<'a, Contact, NotificationS, Celebration>(
    &'a Inner<Contact, NotificationS, Celebration>,
);

impl<Contact, NotificationS, Celebration> Drop for IdleGuard<'_, Contact, NotificationS, Celebration> {
    fn drop(&mut self) {
        let mut state = self.0.state();
        state.button = SubmitButton::IDLE;
        self.0.transition(&mut state, FormPhase::Idle);
    }
}
