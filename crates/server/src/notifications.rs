//! Notification feed endpoints.

use api_types::notification::{NotificationListResponse, NotificationView, Severity};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::server::AppState;

fn map_severity(severity: engine::Severity) -> Severity {
    match severity {
        engine::Severity::Info => Severity::Info,
        engine::Severity::Success => Severity::Success,
        engine::Severity::Warning => Severity::Warning,
        engine::Severity::Error => Severity::Error,
    }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
}

/// Latest notifications, most recent first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<NotificationListResponse> {
    let engine = state.engine.lock().await;
    let feed = engine.notifications();
    let limit = params.limit.unwrap_or(feed.len());

    let notifications = feed
        .latest(limit)
        .iter()
        .map(|notification| NotificationView {
            id: notification.id,
            severity: map_severity(notification.severity),
            message: notification.message.clone(),
            created_at: notification.created_at,
            read: notification.read,
        })
        .collect();

    Json(NotificationListResponse {
        notifications,
        unread: feed.unread_count(),
    })
}

/// Marking an already-read or unknown notification is a no-op.
pub async fn mark_read(State(state): State<AppState>, Path(id): Path<Uuid>) -> StatusCode {
    let mut engine = state.engine.lock().await;
    engine.mark_notification_read(id);

    StatusCode::OK
}
