use serde::{Deserialize, Serialize};

use crate::macros::id;

id!(NotificationId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient message that is not attached to any form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    Shown(Notification),
    Dismissed {
        id: NotificationId,
        reason: DismissReason,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// The close control was used before the timer elapsed.
    Closed,
    /// The auto-dismiss timer elapsed.
    Expired,
}
