//! The module contains the notification feed.
//!
//! The feed is most-recent-first and tracks an unread counter. Reading is
//! monotonic: a notification goes unread -> read exactly once and never
//! back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub severity: Severity,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

/// Unread-tracked, most-recent-first feed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NotificationFeed {
    items: Vec<Notification>,
    unread: usize,
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends a new unread notification and returns its id.
    pub fn emit(
        &mut self,
        severity: Severity,
        message: String,
        created_at: DateTime<Utc>,
    ) -> Uuid {
        let notification = Notification {
            id: Uuid::new_v4(),
            severity,
            message,
            created_at,
            read: false,
        };
        let id = notification.id;
        self.items.insert(0, notification);
        self.unread += 1;
        id
    }

    /// Marks a notification as read.
    ///
    /// Marking an already-read or unknown id is a no-op, so the unread
    /// counter can never underflow.
    pub fn mark_read(&mut self, id: Uuid) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) if !item.read => {
                item.read = true;
                self.unread -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn unread_count(&self) -> usize {
        self.unread
    }

    /// Most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    /// The latest `n` notifications, most recent first.
    pub fn latest(&self, n: usize) -> &[Notification] {
        &self.items[..n.min(self.items.len())]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
