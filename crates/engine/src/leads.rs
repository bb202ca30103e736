//! The module contains the representation of a marketplace lead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A purchasable lead offered in the marketplace.
///
/// Leads are created by the publisher-side flow and are read-only for the
/// acquisition engine: once listed, a lead never changes. Prices are stored
/// as integer minor currency units (`i64`) to avoid floating-point drift.
///
/// `times_sold` counts prior sales; a lead with `times_sold == 0` is
/// *exclusive* (never sold before).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Lead {
    /// Stable identifier for this lead.
    pub id: Uuid,
    /// Vertical/category, e.g. "mortgage" or "auto-insurance".
    pub category: String,
    pub region: String,
    pub city: String,
    /// Quality score in `[0, 100]`.
    pub score: u8,
    /// Asking price in minor units. Always > 0 for a listed lead.
    pub price_minor: i64,
    pub income_minor: Option<i64>,
    pub age: Option<u8>,
    pub credit_score: Option<u16>,
    /// Urgency on a 0..=10 scale.
    pub urgency: Option<u8>,
    pub times_sold: u32,
    pub description: String,
    pub listed_at: DateTime<Utc>,
}

impl Lead {
    /// Returns `true` if the lead has never been sold.
    #[must_use]
    pub fn is_exclusive(&self) -> bool {
        self.times_sold == 0
    }
}

/// Builder-style constructor used by seeds and tests.
///
/// Only the attributes every lead must carry are required; the optional
/// borrower attributes default to `None`.
#[derive(Debug)]
pub struct LeadDraft {
    pub category: String,
    pub region: String,
    pub city: String,
    pub score: u8,
    pub price_minor: i64,
    pub income_minor: Option<i64>,
    pub age: Option<u8>,
    pub credit_score: Option<u16>,
    pub urgency: Option<u8>,
    pub times_sold: u32,
    pub description: String,
}

impl LeadDraft {
    pub fn new(category: &str, region: &str, city: &str, score: u8, price_minor: i64) -> Self {
        Self {
            category: category.to_string(),
            region: region.to_string(),
            city: city.to_string(),
            score,
            price_minor,
            income_minor: None,
            age: None,
            credit_score: None,
            urgency: None,
            times_sold: 0,
            description: String::new(),
        }
    }

    pub fn income_minor(mut self, value: i64) -> Self {
        self.income_minor = Some(value);
        self
    }

    pub fn age(mut self, value: u8) -> Self {
        self.age = Some(value);
        self
    }

    pub fn credit_score(mut self, value: u16) -> Self {
        self.credit_score = Some(value);
        self
    }

    pub fn urgency(mut self, value: u8) -> Self {
        self.urgency = Some(value);
        self
    }

    pub fn times_sold(mut self, value: u32) -> Self {
        self.times_sold = value;
        self
    }

    pub fn description(mut self, value: &str) -> Self {
        self.description = value.to_string();
        self
    }

    pub fn listed(self, listed_at: DateTime<Utc>) -> Lead {
        Lead {
            id: Uuid::new_v4(),
            category: self.category,
            region: self.region,
            city: self.city,
            score: self.score,
            price_minor: self.price_minor,
            income_minor: self.income_minor,
            age: self.age,
            credit_score: self.credit_score,
            urgency: self.urgency,
            times_sold: self.times_sold,
            description: self.description,
            listed_at,
        }
    }
}
