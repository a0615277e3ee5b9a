use folio_models::{
    contact::{FieldName, SubmissionRequest},
    validation::{ValidationReport, ValidationResult},
};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ValidationService: Send + Sync + 'static {
    /// Validates a single field value against its configured constraints.
    fn validate_field(&self, field: FieldName, value: &str) -> ValidationResult;

    /// Validates every field of the request.
    fn validate(&self, request: &SubmissionRequest) -> ValidationReport;
}

#[cfg(feature = "mock")]
impl MockValidationService {
    pub fn with_validate(mut self, request: SubmissionRequest, result: ValidationReport) -> Self {
        self.expect_validate()
            .once()
            .with(mockall::predicate::eq(request))
            .return_once(|_| result);
        self
    }
}
