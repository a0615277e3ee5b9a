use std::sync::{Arc, Mutex, OnceLock};

use folio_core_contact_contracts::MockContactService;
use folio_models::{
    contact::{FieldName, SubmissionFailure, SubmissionOutcome, SubmissionRequest},
    form::{ButtonLabel, FormPhase, SubmitButton},
    notification::{NotificationId, NotificationKind},
};
use folio_shared_contracts::{
    celebration::MockCelebrationService, notification::MockNotificationService,
};
use folio_utils::assert_matches;
use pretty_assertions::assert_eq;
use tokio::sync::watch;

use super::*;
use crate::ContactFormSubmitError;

#[tokio::test]
async fn ok() {
    // Arrange
    let contact = MockContactService::new()
        .with_validate(valid_request(), valid_report())
        .with_send_message(valid_request(), SubmissionOutcome::Success);
    let notification = MockNotificationService::new()
        .with_present(SUCCESS_MESSAGE.into(), NotificationKind::Success);
    let celebration = MockCelebrationService::new().with_celebrate();

    let sut = make_sut(contact, notification, celebration);
    fill(&sut, &valid_request());

    // Act
    let result = sut.submit().await;

    // Assert
    assert_matches!(result, Ok(SubmissionOutcome::Success));
    assert_eq!(sut.fields(), SubmissionRequest::default());
    assert_eq!(sut.button(), SubmitButton::IDLE);
    assert_eq!(sut.phase(), FormPhase::Idle);
    assert!(sut.annotations().is_empty());
}

#[tokio::test]
async fn relay_failure_keeps_fields() {
    // Arrange
    let contact = MockContactService::new()
        .with_validate(valid_request(), valid_report())
        .with_send_message(
            valid_request(),
            SubmissionOutcome::Failure(SubmissionFailure::RelayUnavailable),
        );
    let notification = MockNotificationService::new()
        .with_present(FAILURE_MESSAGE.into(), NotificationKind::Error);
    let celebration = MockCelebrationService::new();

    let sut = make_sut(contact, notification, celebration);
    fill(&sut, &valid_request());

    // Act
    let result = sut.submit().await;

    // Assert
    assert_matches!(
        result,
        Ok(SubmissionOutcome::Failure(SubmissionFailure::RelayUnavailable))
    );
    assert_eq!(sut.fields(), valid_request());
    assert_eq!(sut.button(), SubmitButton::IDLE);
    assert_eq!(sut.phase(), FormPhase::Idle);
}

#[tokio::test]
async fn invalid_withholds_submission() {
    // Arrange
    let contact =
        MockContactService::new().with_validate(invalid_request(), invalid_report());

    let sut = make_sut(
        contact,
        MockNotificationService::new(),
        MockCelebrationService::new(),
    );
    fill(&sut, &invalid_request());

    // Act
    let result = sut.submit().await;

    // Assert
    assert_matches!(result, Err(ContactFormSubmitError::Invalid(report)) if !report.is_valid());
    assert_eq!(sut.fields(), invalid_request());
    assert_eq!(
        sut.annotation(FieldName::Name).as_deref(),
        Some("Name must be at least 2 characters")
    );
    assert_eq!(
        sut.annotation(FieldName::Email).as_deref(),
        Some("Please enter a valid email address")
    );
    assert_eq!(sut.annotations().len(), 4);
    assert_eq!(sut.button(), SubmitButton::IDLE);
    assert_eq!(sut.phase(), FormPhase::Idle);
}

#[tokio::test]
async fn second_submit_while_sending_is_rejected() {
    // Arrange
    let (contact, release) = blocking_contact(valid_request());
    let notification = MockNotificationService::new()
        .with_present(SUCCESS_MESSAGE.into(), NotificationKind::Success);
    let celebration = MockCelebrationService::new().with_celebrate();

    let sut = make_sut(contact, notification, celebration);
    fill(&sut, &valid_request());
    let mut phase = sut.subscribe_phase();

    let first = tokio::spawn({
        let sut = sut.clone();
        async move { sut.submit().await }
    });
    phase
        .wait_for(|phase| *phase == FormPhase::Sending)
        .await
        .unwrap();

    // Act
    let button = sut.button();
    let second = sut.submit().await;

    // Assert
    assert_eq!(button.label, ButtonLabel::Loading);
    assert!(!button.enabled);
    assert_matches!(second, Err(ContactFormSubmitError::InProgress));
    assert_eq!(sut.phase(), FormPhase::Sending);

    release.send(SubmissionOutcome::Success).unwrap();
    assert_matches!(first.await.unwrap(), Ok(SubmissionOutcome::Success));
    assert_eq!(sut.button(), SubmitButton::IDLE);
}

#[tokio::test]
async fn phases_on_success() {
    // Arrange
    let log = PhaseLog::default();
    let contact = logging_contact(&log, SubmissionOutcome::Success);
    let notification = logging_notification(&log, SUCCESS_MESSAGE, NotificationKind::Success);
    let celebration = MockCelebrationService::new().with_celebrate();

    let sut = make_sut(contact, notification, celebration);
    fill(&sut, &valid_request());
    log.watch(&sut);

    // Act
    sut.submit().await.unwrap();
    log.record();

    // Assert
    assert_eq!(
        log.phases(),
        [
            FormPhase::Validating,
            FormPhase::Sending,
            FormPhase::Success,
            FormPhase::Idle
        ]
    );
}

#[tokio::test]
async fn phases_on_relay_failure() {
    // Arrange
    let log = PhaseLog::default();
    let contact = logging_contact(
        &log,
        SubmissionOutcome::Failure(SubmissionFailure::RelayUnavailable),
    );
    let notification = logging_notification(&log, FAILURE_MESSAGE, NotificationKind::Error);

    let sut = make_sut(contact, notification, MockCelebrationService::new());
    fill(&sut, &valid_request());
    log.watch(&sut);

    // Act
    sut.submit().await.unwrap();
    log.record();

    // Assert
    assert_eq!(
        log.phases(),
        [
            FormPhase::Validating,
            FormPhase::Sending,
            FormPhase::Error,
            FormPhase::Idle
        ]
    );
}

#[tokio::test]
async fn abandoned_send_returns_to_idle() {
    // Arrange
    let (contact, _release) = blocking_contact(valid_request());

    let sut = make_sut(
        contact,
        MockNotificationService::new(),
        MockCelebrationService::new(),
    );
    fill(&sut, &valid_request());
    let mut phase = sut.subscribe_phase();

    let submit = tokio::spawn({
        let sut = sut.clone();
        async move { sut.submit().await }
    });
    phase
        .wait_for(|phase| *phase == FormPhase::Sending)
        .await
        .unwrap();

    // Act
    submit.abort();
    let _ = submit.await;

    // Assert
    assert_eq!(sut.phase(), FormPhase::Idle);
    assert_eq!(sut.button(), SubmitButton::IDLE);
    assert_eq!(sut.fields(), valid_request());
}

/// Records the phase of a form each time one of its collaborators is called.
#[derive(Debug, Clone, Default)]
struct PhaseLog {
    receiver: Arc<OnceLock<watch::Receiver<FormPhase>>>,
    phases: Arc<Mutex<Vec<FormPhase>>>,
}

impl PhaseLog {
    fn watch(&self, sut: &Sut) {
        self.receiver.set(sut.subscribe_phase()).unwrap();
    }

    fn record(&self) {
        let phase = *self.receiver.get().unwrap().borrow();
        self.phases.lock().unwrap().push(phase);
    }

    fn phases(&self) -> Vec<FormPhase> {
        self.phases.lock().unwrap().clone()
    }
}

fn logging_contact(log: &PhaseLog, outcome: SubmissionOutcome) -> MockContactService {
    let mut contact = MockContactService::new();
    contact.expect_validate().once().returning({
        let log = log.clone();
        move |_| {
            log.record();
            valid_report()
        }
    });
    contact.expect_send_message().once().return_once({
        let log = log.clone();
        move |_| {
            log.record();
            Box::pin(std::future::ready(Ok(outcome)))
        }
    });
    contact
}

fn logging_notification(
    log: &PhaseLog,
    message: &'static str,
    kind: NotificationKind,
) -> MockNotificationService {
    let mut notification = MockNotificationService::new();
    notification
        .expect_present()
        .once()
        .withf(move |m, k| m == message && *k == kind)
        .returning({
            let log = log.clone();
            move |_, _| {
                log.record();
                NotificationId::generate()
            }
        });
    notification
}
