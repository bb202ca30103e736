//! The module contains the purchase history records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::leads::Lead;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseStatus {
    Completed,
    Pending,
    Failed,
}

impl PurchaseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Failed => "failed",
        }
    }
}

/// An immutable record created at successful settlement.
///
/// The contained leads are snapshots taken at commit time; later inventory
/// refreshes never touch them. History is append-only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Purchase {
    pub id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub leads: Vec<Lead>,
    pub total_minor: i64,
    pub status: PurchaseStatus,
}

impl Purchase {
    pub fn completed(leads: Vec<Lead>, total_minor: i64, occurred_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            occurred_at,
            leads,
            total_minor,
            status: PurchaseStatus::Completed,
        }
    }
}
