use folio_core_contact_contracts::{ContactSendMessageError, ContactService};
use folio_extern_contracts::relay::{RelayApiService, RelayMessage};
use folio_models::{
    contact::{FieldName, SubmissionFailure, SubmissionOutcome, SubmissionRequest},
    validation::{ValidationReport, ValidationResult},
};
use folio_shared_contracts::validation::ValidationService;
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Validation, RelayApi> {
    validation: Validation,
    relay_api: RelayApi,
}

impl<Validation, RelayApi> ContactServiceImpl<Validation, RelayApi> {
    pub fn new(validation: Validation, relay_api: RelayApi) -> Self {
        Self {
            validation,
            relay_api,
        }
    }
}

impl<Validation, RelayApi> ContactService for ContactServiceImpl<Validation, RelayApi>
where
    Validation: ValidationService,
    RelayApi: RelayApiService,
{
    fn validate_field(&self, field: FieldName, value: &str) -> ValidationResult {
        self.validation.validate_field(field, value)
    }

    fn validate(&self, request: &SubmissionRequest) -> ValidationReport {
        self.validation.validate(request)
    }

    #[tracing::instrument(skip_all)]
    async fn send_message(
        &self,
        request: SubmissionRequest,
    ) -> Result<SubmissionOutcome, ContactSendMessageError> {
        let report = self.validation.validate(&request);
        if !report.is_valid() {
            return Err(ContactSendMessageError::Invalid(report));
        }

        let email = request.email.trim();
        let message = RelayMessage {
            from_name: request.name.trim().into(),
            from_email: email.into(),
            reply_to: email.into(),
            subject: request.subject.trim().into(),
            message: request.message.trim().into(),
        };

        match self.relay_api.send(message).await {
            Ok(response) => {
                info!(status = response.status, "contact message delivered");
                Ok(SubmissionOutcome::Success)
            }
            Err(err) => {
                error!("Failed to send contact message: {err:#}");
                Ok(SubmissionOutcome::Failure(
                    SubmissionFailure::RelayUnavailable,
                ))
            }
        }
    }
}
