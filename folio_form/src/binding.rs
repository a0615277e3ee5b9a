use folio_core_contact_contracts::ContactService;
use folio_models::form::FormEvent;
use folio_shared_contracts::{
    celebration::CelebrationService, notification::NotificationService,
};
use thiserror::Error;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::debug;

use crate::{ContactForm, ContactFormSubmitError};

/// Handle to a form whose behaviors are attached to an event stream.
///
/// Dropping the handle stops event processing as well. [`FormBinding::detach`]
/// additionally waits until every event dispatched so far has been taken off
/// the queue.
#[derive(Debug)]
pub struct FormBinding {
    events: mpsc::UnboundedSender<FormEvent>,
    listener: JoinHandle<()>,
}

#[derive(Debug, Error)]
pub enum FormBindingError {
    #[error("The form is no longer attached.")]
    Detached,
}

impl<Contact, NotificationS, Celebration> ContactForm<Contact, NotificationS, Celebration>
where
    Contact: ContactService,
    NotificationS: NotificationService,
    Celebration: CelebrationService,
{
    /// Attaches input, blur and submit handling to this form.
    ///
    /// Every submit runs as its own task, so a submit that arrives while a
    /// send is in flight is rejected instead of queued.
    pub fn attach(&self) -> FormBinding {
        let (events, mut rx) = mpsc::unbounded_channel();
        let form = self.clone();

        let listener = tokio::spawn(async move {
            debug!("form attached");
            while let Some(event) = rx.recv().await {
                form.handle(event);
            }
            debug!("form detached");
        });

        FormBinding { events, listener }
    }

    fn handle(&self, event: FormEvent) {
        match event {
            FormEvent::Input { field, value } => self.input(field, value),
            FormEvent::Blur(field) => {
                self.blur(field);
            }
            FormEvent::Submit => {
                let form = self.clone();
                tokio::spawn(async move {
                    match form.submit().await {
                        Ok(outcome) => debug!(?outcome, "submission finished"),
                        Err(ContactFormSubmitError::InProgress) => {
                            debug!("submit ignored, a submission is in flight")
                        }
                        Err(ContactFormSubmitError::Invalid(_)) => {
                            debug!("submission withheld by validation")
                        }
                    }
                });
            }
        }
    }
}

impl FormBinding {
    pub fn dispatch(&self, event: FormEvent) -> Result<(), FormBindingError> {
        self.events
            .send(event)
            .map_err(|_| FormBindingError::Detached)
    }

    /// Stops listening once the pending events are taken off the queue.
    ///
    /// Input and blur events have been applied when this returns. A
    /// dispatched submit has only been spawned as its own task, so it may
    /// still validate and call the relay afterwards, and a send that is in
    /// flight is not cancelled. Wait on [`ContactForm::subscribe_phase`] to
    /// observe the submission finishing.
    pub async fn detach(self) {
        let Self { events, listener } = self;
        drop(events);
        if let Err(err) = listener.await {
            debug!("form listener ended abnormally: {err}");
        }
    }
}
