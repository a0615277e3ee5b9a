use std::collections::BTreeMap;

use clap::Args;
use folio_models::{
    contact::{FieldName, SubmissionRequest},
    notification::{Notification, NotificationKind},
};

pub mod submit;
pub mod validate;

/// Values of the contact form fields. Omitted fields are left empty.
#[derive(Debug, Args)]
pub struct FieldArgs {
    /// Your name
    #[arg(long, default_value_t)]
    pub name: String,
    /// Your email address
    #[arg(long, default_value_t)]
    pub email: String,
    /// Subject of the message
    #[arg(long, default_value_t)]
    pub subject: String,
    /// The message itself
    #[arg(long, default_value_t)]
    pub message: String,
}

impl From<FieldArgs> for SubmissionRequest {
    fn from(value: FieldArgs) -> Self {
        Self {
            name: value.name,
            email: value.email,
            subject: value.subject,
            message: value.message,
        }
    }
}

fn print_annotations(annotations: &BTreeMap<FieldName, String>) {
    for (field, message) in annotations {
        eprintln!("{}: {message}", field.label());
    }
}

fn print_notifications(notifications: &[Notification]) {
    for notification in notifications {
        let icon = match notification.kind {
            NotificationKind::Success => "✔",
            NotificationKind::Error => "✘",
        };
        println!("{icon} {}", notification.message);
    }
}
