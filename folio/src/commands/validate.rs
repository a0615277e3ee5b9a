use anyhow::bail;
use folio_config::Config;
use folio_models::{
    contact::{FieldName, SubmissionRequest},
    form::FormEvent,
};

use super::{print_annotations, FieldArgs};
use crate::environment;

/// Types the given values into a contact form and leaves every field once,
/// without submitting.
pub async fn validate(config: Config, fields: FieldArgs) -> anyhow::Result<()> {
    let form = environment::contact_form(&config)?;
    let binding = form.attach();

    let mut request = SubmissionRequest::from(fields);
    for field in FieldName::ALL {
        let value = std::mem::take(request.get_mut(field));
        binding.dispatch(FormEvent::Input { field, value })?;
        binding.dispatch(FormEvent::Blur(field))?;
    }
    binding.detach().await;

    let annotations = form.annotations();
    if !annotations.is_empty() {
        print_annotations(&annotations);
        bail!("{} field(s) are invalid", annotations.len());
    }

    println!("All fields are valid");
    Ok(())
}
