use anyhow::Context;
use folio_config::{Config, RelayConfig, RelayProvider};
use folio_core_contact_impl::ContactServiceImpl;
use folio_extern_impl::{
    http::HttpClient,
    relay::{
        EmailJsApiServiceConfig, EmailJsApiServiceImpl, FormspreeApiServiceConfig,
        FormspreeApiServiceImpl, RelayApiServiceImpl,
    },
};
use folio_form::{ContactForm, ContactFormConfig};
use folio_shared_impl::{
    celebration::{CelebrationServiceConfig, CelebrationServiceImpl},
    notification::{NotificationServiceConfig, NotificationServiceImpl},
    validation::ValidationServiceImpl,
};
use tracing::debug;

use crate::celebration::TerminalCelebration;

pub type Contact = ContactServiceImpl<ValidationServiceImpl, RelayApiServiceImpl>;
pub type Form =
    ContactForm<Contact, NotificationServiceImpl, TerminalCelebration<CelebrationServiceImpl>>;

/// Wires a contact form from the configuration.
pub fn contact_form(config: &Config) -> anyhow::Result<Form> {
    let validation = ValidationServiceImpl::new(config.validation.clone());
    let contact = ContactServiceImpl::new(validation, relay_api(&config.relay)?);

    let notification = NotificationServiceImpl::new(NotificationServiceConfig {
        ttl: config.notification.ttl.into(),
    });

    let celebration = TerminalCelebration::new(CelebrationServiceImpl::new(
        CelebrationServiceConfig {
            enable: config.celebration.enable,
            confetti: config.celebration.confetti,
        },
    ));

    Ok(ContactForm::new(
        contact,
        notification,
        celebration,
        ContactFormConfig {
            success_message: config.messages.success.clone(),
            failure_message: config.messages.failure.clone(),
        },
    ))
}

pub fn relay_api(config: &RelayConfig) -> anyhow::Result<RelayApiServiceImpl> {
    let client = HttpClient::new().context("Failed to create http client")?;
    debug!(provider = config.provider.as_str(), "creating relay client");

    let relay = match config.provider {
        RelayProvider::EmailJs => {
            let emailjs = config
                .emailjs
                .as_ref()
                .context("relay.emailjs is missing")?;
            let emailjs_config = EmailJsApiServiceConfig::new(
                emailjs.endpoint_override.clone(),
                &emailjs.service_id,
                &emailjs.template_id,
                &emailjs.public_key,
                emailjs.private_key.as_deref(),
            )?;
            RelayApiServiceImpl::EmailJs(EmailJsApiServiceImpl::new(emailjs_config, client))
        }
        RelayProvider::Formspree => {
            let formspree = config
                .formspree
                .as_ref()
                .context("relay.formspree is missing")?;
            let formspree_config = FormspreeApiServiceConfig {
                endpoint: formspree.endpoint.clone().into(),
            };
            RelayApiServiceImpl::Formspree(FormspreeApiServiceImpl::new(formspree_config, client))
        }
    };

    Ok(relay)
}
