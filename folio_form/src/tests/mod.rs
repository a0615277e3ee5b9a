use folio_core_contact_contracts::{ContactService, MockContactService};
use folio_models::{
    contact::{FieldName, SubmissionOutcome, SubmissionRequest},
    validation::{ValidationReport, ValidationResult},
};
use folio_shared_contracts::{
    celebration::{CelebrationService, MockCelebrationService},
    notification::{MockNotificationService, NotificationService},
};
use tokio::sync::oneshot;

use crate::{ContactForm, ContactFormConfig};

mod binding;
mod submit;

type Sut = ContactForm<MockContactService, MockNotificationService, MockCelebrationService>;

const SUCCESS_MESSAGE: &str = "Your message has been sent! Thank you 🙌";
const FAILURE_MESSAGE: &str = "Failed to send message. Please try again.";

fn config() -> ContactFormConfig {
    ContactFormConfig {
        success_message: SUCCESS_MESSAGE.into(),
        failure_message: FAILURE_MESSAGE.into(),
    }
}

fn make_sut(
    contact: MockContactService,
    notification: MockNotificationService,
    celebration: MockCelebrationService,
) -> Sut {
    ContactForm::new(contact, notification, celebration, config())
}

fn valid_request() -> SubmissionRequest {
    SubmissionRequest {
        name: "Al".into(),
        email: "a@b.co".into(),
        subject: "Hi".into(),
        message: "Hello!".into(),
    }
}

fn invalid_request() -> SubmissionRequest {
    SubmissionRequest {
        name: "A".into(),
        email: "bad".into(),
        subject: "".into(),
        message: "hi".into(),
    }
}

fn valid_report() -> ValidationReport {
    FieldName::ALL
        .into_iter()
        .map(|field| (field, ValidationResult::ok()))
        .collect()
}

fn invalid_report() -> ValidationReport {
    [
        (
            FieldName::Name,
            ValidationResult::error("Name must be at least 2 characters"),
        ),
        (
            FieldName::Email,
            ValidationResult::error("Please enter a valid email address"),
        ),
        (FieldName::Subject, ValidationResult::error("This field is required")),
        (
            FieldName::Message,
            ValidationResult::error("Message must be at least 5 characters"),
        ),
    ]
    .into_iter()
    .collect()
}

fn fill<Contact, NotificationS, Celebration>(
    sut: &ContactForm<Contact, NotificationS, Celebration>,
    request: &SubmissionRequest,
) where
    Contact: ContactService,
    NotificationS: NotificationService,
    Celebration: CelebrationService,
{
    for field in FieldName::ALL {
        sut.input(field, request.get(field));
    }
}

/// A contact service whose single send only resolves once the returned
/// sender fires.
fn blocking_contact(
    request: SubmissionRequest,
) -> (MockContactService, oneshot::Sender<SubmissionOutcome>) {
    let (tx, rx) = oneshot::channel();

    let mut contact = MockContactService::new().with_validate(request.clone(), valid_report());
    contact
        .expect_send_message()
        .once()
        .with(mockall::predicate::eq(request))
        .return_once(move |_| {
            Box::pin(async move {
                Ok(rx
                    .await
                    .unwrap_or(SubmissionOutcome::Failure(
                        folio_models::contact::SubmissionFailure::RelayUnavailable,
                    )))
            })
        });

    (contact, tx)
}
