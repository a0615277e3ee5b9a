use std::future::Future;

use folio_models::{
    contact::{FieldName, SubmissionOutcome, SubmissionRequest},
    validation::{ValidationReport, ValidationResult},
};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Validates a single field, e.g. when it loses focus.
    fn validate_field(&self, field: FieldName, value: &str) -> ValidationResult;

    /// Validates every field of the request without sending anything.
    fn validate(&self, request: &SubmissionRequest) -> ValidationReport;

    /// Validates the request and hands it to the relay exactly once.
    ///
    /// Relay errors never surface here. They collapse into
    /// [`SubmissionOutcome::Failure`] and are only logged.
    fn send_message(
        &self,
        request: SubmissionRequest,
    ) -> impl Future<Output = Result<SubmissionOutcome, ContactSendMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error("The submission did not pass validation.")]
    Invalid(ValidationReport),
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_validate(mut self, request: SubmissionRequest, result: ValidationReport) -> Self {
        self.expect_validate()
            .once()
            .with(mockall::predicate::eq(request))
            .return_once(|_| result);
        self
    }

    pub fn with_validate_field(
        mut self,
        field: FieldName,
        value: String,
        result: ValidationResult,
    ) -> Self {
        self.expect_validate_field()
            .once()
            .with(
                mockall::predicate::eq(field),
                mockall::predicate::eq(value),
            )
            .return_once(|_, _| result);
        self
    }

    pub fn with_send_message(mut self, request: SubmissionRequest, result: SubmissionOutcome) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(request))
            .return_once(|_| Box::pin(std::future::ready(Ok(result))));
        self
    }
}
