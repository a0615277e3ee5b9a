use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use folio_models::notification::{
    DismissReason, Notification, NotificationEvent, NotificationId, NotificationKind,
};
use folio_shared_contracts::notification::NotificationService;
use tokio::{sync::broadcast, task::AbortHandle};
use tracing::debug;

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct NotificationServiceImpl {
    inner: Arc<Inner>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationServiceConfig {
    /// Time after which a notification removes itself.
    pub ttl: Duration,
}

#[derive(Debug)]
struct Inner {
    config: NotificationServiceConfig,
    entries: Mutex<Vec<Entry>>,
    events: broadcast::Sender<NotificationEvent>,
}

#[derive(Debug)]
struct Entry {
    notification: Notification,
    timer: AbortHandle,
}

impl NotificationServiceImpl {
    pub fn new(config: NotificationServiceConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                entries: Mutex::new(Vec::new()),
                events: broadcast::channel(EVENT_CAPACITY).0,
            }),
        }
    }
}

impl Inner {
    fn entries(&self) -> MutexGuard<'_, Vec<Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Removes the notification under the lock, so only one of the close
    /// control and the timer can succeed.
    fn remove(&self, id: NotificationId, reason: DismissReason) -> bool {
        let mut entries = self.entries();
        let Some(index) = entries.iter().position(|x| x.notification.id == id) else {
            return false;
        };

        let entry = entries.remove(index);
        if reason == DismissReason::Closed {
            entry.timer.abort();
        }

        debug!(%id, ?reason, "dismissed notification");
        let _ = self.events.send(NotificationEvent::Dismissed { id, reason });
        true
    }
}

impl NotificationService for NotificationServiceImpl {
    fn present(&self, message: String, kind: NotificationKind) -> NotificationId {
        let notification = Notification {
            id: NotificationId::generate(),
            message,
            kind,
        };
        let id = notification.id;

        let mut entries = self.inner.entries();

        let timer = tokio::spawn(expire(
            Arc::downgrade(&self.inner),
            id,
            self.inner.config.ttl,
        ))
        .abort_handle();

        entries.push(Entry {
            notification: notification.clone(),
            timer,
        });

        debug!(%id, ?kind, "presenting notification");
        let _ = self.inner.events.send(NotificationEvent::Shown(notification));

        id
    }

    fn dismiss(&self, id: NotificationId) -> bool {
        self.inner.remove(id, DismissReason::Closed)
    }

    fn active(&self) -> Vec<Notification> {
        self.inner
            .entries()
            .iter()
            .map(|x| x.notification.clone())
            .collect()
    }

    fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.inner.events.subscribe()
    }
}

async fn expire(inner: Weak<Inner>, id: NotificationId, ttl: Duration) {
    tokio::time::sleep(ttl).await;
    if let Some(inner) = inner.upgrade() {
        inner.remove(id, DismissReason::Expired);
    }
}
