use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod lead {
    use super::*;

    /// A lead as rendered in the marketplace grid.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct LeadView {
        pub id: Uuid,
        pub category: String,
        pub region: String,
        pub city: String,
        pub score: u8,
        pub price_minor: i64,
        pub income_minor: Option<i64>,
        pub age: Option<u8>,
        pub credit_score: Option<u16>,
        pub urgency: Option<u8>,
        pub exclusive: bool,
        pub description: String,
        pub listed_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LeadListResponse {
        pub leads: Vec<LeadView>,
    }

    /// Filter payload. All constraints are optional; absent ones impose no
    /// restriction. Ranges are inclusive and must satisfy `min <= max`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct LeadFilter {
        pub category: Option<String>,
        pub region: Option<String>,
        pub city: Option<String>,
        pub score_min: Option<u8>,
        pub score_max: Option<u8>,
        pub price_min_minor: Option<i64>,
        pub price_max_minor: Option<i64>,
        pub income_floor_minor: Option<i64>,
        /// One of `any`, `under30`, `from30_to50`, `over50`.
        pub age_bucket: Option<String>,
        pub credit_min: Option<u16>,
        pub credit_max: Option<u16>,
        pub urgency_min: Option<u8>,
        pub urgency_max: Option<u8>,
        pub exclusive_only: Option<bool>,
    }
}

pub mod cart {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CartToggle {
        pub lead_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CartView {
        pub lead_ids: Vec<Uuid>,
        pub total_minor: i64,
        /// Members that no longer resolve against the inventory; excluded
        /// from the total.
        pub stale_ids: Vec<Uuid>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ToggleResponse {
        pub in_cart: bool,
        pub cart: CartView,
    }

    /// Result of a settlement attempt.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case", tag = "outcome")]
    pub enum SettleResponse {
        EmptyCart,
        Committed {
            purchase_id: Uuid,
            total_minor: i64,
            leads: usize,
        },
        Rejected {
            total_minor: i64,
            balance_minor: i64,
        },
    }
}

pub mod account {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountView {
        pub balance_minor: i64,
        pub daily_budget_minor: i64,
        pub weekly_budget_minor: i64,
        pub spent_today_minor: i64,
        pub spent_this_week_minor: i64,
        pub spent_total_minor: i64,
        pub leads_acquired_today: u32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TopUp {
        pub amount_minor: i64,
    }
}

pub mod purchase {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseView {
        pub id: Uuid,
        pub occurred_at: DateTime<Utc>,
        pub leads: Vec<super::lead::LeadView>,
        pub total_minor: i64,
        pub status: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseListResponse {
        pub purchases: Vec<PurchaseView>,
    }
}

pub mod notification {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Severity {
        Info,
        Success,
        Warning,
        Error,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct NotificationView {
        pub id: Uuid,
        pub severity: Severity,
        pub message: String,
        pub created_at: DateTime<Utc>,
        pub read: bool,
    }

    /// Most recent first.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct NotificationListResponse {
        pub notifications: Vec<NotificationView>,
        pub unread: usize,
    }
}

pub mod policy {
    use super::*;

    /// A typed AI-manager setting value; the tag is the declared kind.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case", tag = "kind", content = "value")]
    pub enum SettingValue {
        Toggle(bool),
        Slider(i64),
        Select(String),
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PolicySettingView {
        pub name: String,
        pub value: SettingValue,
        pub description: String,
        pub options: Vec<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PolicySettingsResponse {
        pub settings: Vec<PolicySettingView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PolicySettingUpdate {
        pub value: SettingValue,
    }

    /// Result of one policy evaluation.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case", tag = "outcome")]
    pub enum PolicyRunResponse {
        Disabled,
        NoMatches,
        Committed {
            purchase_id: Uuid,
            total_minor: i64,
            leads: usize,
        },
        Rejected {
            total_minor: i64,
        },
    }
}
