use anyhow::bail;
use folio_config::Config;
use folio_form::ContactFormSubmitError;
use folio_models::contact::{FieldName, SubmissionOutcome, SubmissionRequest};
use folio_shared_contracts::notification::NotificationService;

use super::{print_annotations, print_notifications, FieldArgs};
use crate::environment;

/// Fills a contact form with the given values and submits it.
pub async fn submit(config: Config, fields: FieldArgs) -> anyhow::Result<()> {
    let form = environment::contact_form(&config)?;

    let request = SubmissionRequest::from(fields);
    for field in FieldName::ALL {
        form.input(field, request.get(field));
    }

    let result = form.submit().await;
    print_notifications(&form.notifications().active());

    match result {
        Ok(SubmissionOutcome::Success) => Ok(()),
        Ok(SubmissionOutcome::Failure(reason)) => bail!("Failed to send message: {reason}"),
        Err(ContactFormSubmitError::Invalid(report)) => {
            print_annotations(&form.annotations());
            bail!(
                "The message was not sent, {} field(s) are invalid",
                report.errors().count()
            )
        }
        Err(err @ ContactFormSubmitError::InProgress) => Err(err.into()),
    }
}
