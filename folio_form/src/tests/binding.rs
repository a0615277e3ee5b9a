use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use folio_core_contact_contracts::MockContactService;
use folio_models::{
    contact::{FieldName, SubmissionOutcome, SubmissionRequest},
    form::{FormEvent, FormPhase},
    notification::NotificationKind,
    validation::ValidationResult,
};
use folio_shared_contracts::{
    celebration::MockCelebrationService,
    notification::{MockNotificationService, NotificationService},
};
use folio_shared_impl::notification::{NotificationServiceConfig, NotificationServiceImpl};
use tokio::sync::Notify;

use super::*;

#[tokio::test]
async fn events_are_handled_in_order() {
    // Arrange
    let contact = MockContactService::new().with_validate_field(
        FieldName::Name,
        "A".into(),
        ValidationResult::error("Name must be at least 2 characters"),
    );

    let sut = make_sut(
        contact,
        MockNotificationService::new(),
        MockCelebrationService::new(),
    );
    let binding = sut.attach();

    // Act
    binding
        .dispatch(FormEvent::Input {
            field: FieldName::Name,
            value: "A".into(),
        })
        .unwrap();
    binding.dispatch(FormEvent::Blur(FieldName::Name)).unwrap();
    binding
        .dispatch(FormEvent::Input {
            field: FieldName::Email,
            value: "a@b.co".into(),
        })
        .unwrap();
    binding.detach().await;

    // Assert
    assert_eq!(sut.fields().name, "A");
    assert_eq!(sut.fields().email, "a@b.co");
    assert_eq!(
        sut.annotation(FieldName::Name).as_deref(),
        Some("Name must be at least 2 characters")
    );
}

#[tokio::test]
async fn concurrent_submit_events_send_once() {
    // Arrange
    let calls = Arc::new(AtomicUsize::new(0));
    let gate = Arc::new(Notify::new());

    let mut contact = MockContactService::new();
    contact.expect_validate().returning(|request| {
        if *request == valid_request() {
            valid_report()
        } else {
            invalid_report()
        }
    });
    contact.expect_send_message().returning({
        let calls = Arc::clone(&calls);
        let gate = Arc::clone(&gate);
        move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            let gate = Arc::clone(&gate);
            Box::pin(async move {
                gate.notified().await;
                Ok(SubmissionOutcome::Success)
            })
        }
    });

    let mut celebration = MockCelebrationService::new();
    celebration.expect_celebrate().returning(|| None);

    let notification = NotificationServiceImpl::new(NotificationServiceConfig {
        ttl: Duration::from_secs(60),
    });

    let sut = ContactForm::new(contact, notification, celebration, config());
    fill(&sut, &valid_request());
    let mut phase = sut.subscribe_phase();
    let binding = sut.attach();

    // Act
    binding.dispatch(FormEvent::Submit).unwrap();
    binding.dispatch(FormEvent::Submit).unwrap();
    phase
        .wait_for(|phase| *phase == FormPhase::Sending)
        .await
        .unwrap();
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    gate.notify_one();
    phase
        .wait_for(|phase| *phase == FormPhase::Idle)
        .await
        .unwrap();
    binding.detach().await;

    // Assert
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(sut.notifications().active().len(), 1);
    assert_eq!(sut.fields(), SubmissionRequest::default());
}

#[tokio::test]
async fn dispatched_submit_finishes_after_detach() {
    // Arrange
    let (contact, release) = blocking_contact(valid_request());
    let notification = MockNotificationService::new()
        .with_present(SUCCESS_MESSAGE.into(), NotificationKind::Success);
    let celebration = MockCelebrationService::new().with_celebrate();

    let sut = make_sut(contact, notification, celebration);
    fill(&sut, &valid_request());
    let mut phase = sut.subscribe_phase();
    let binding = sut.attach();

    // Act
    binding.dispatch(FormEvent::Submit).unwrap();
    binding.detach().await;

    // Assert
    phase
        .wait_for(|phase| *phase == FormPhase::Sending)
        .await
        .unwrap();
    release.send(SubmissionOutcome::Success).unwrap();
    phase
        .wait_for(|phase| *phase == FormPhase::Idle)
        .await
        .unwrap();
    assert_eq!(sut.fields(), SubmissionRequest::default());
}
