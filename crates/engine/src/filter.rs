//! The module contains the inventory filter.
//!
//! A [`LeadQuery`] is a pure conjunction of optional constraints: a lead
//! passes iff it satisfies every constraint that is supplied, and a
//! constraint that is absent is trivially true. Filtering never mutates
//! anything and keeps the input order.

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine, leads::Lead};

/// An inclusive numeric range used by query constraints.
///
/// Construction enforces `min <= max`, so a `Bounds` value is valid by
/// existence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds<T> {
    min: T,
    max: T,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub fn new(min: T, max: T) -> ResultEngine<Self> {
        if min > max {
            return Err(EngineError::InvalidBounds(
                "min must not exceed max".to_string(),
            ));
        }
        Ok(Self { min, max })
    }

    /// Inclusive on both ends.
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }
}

/// Age bucket predicate.
///
/// Age itself is numeric on the lead; the bucket is resolved at evaluation
/// time: under 30, 30 to 50 inclusive, over 50.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBucket {
    #[default]
    Any,
    Under30,
    From30To50,
    Over50,
}

impl AgeBucket {
    fn matches(self, age: u8) -> bool {
        match self {
            Self::Any => true,
            Self::Under30 => age < 30,
            Self::From30To50 => (30..=50).contains(&age),
            Self::Over50 => age > 50,
        }
    }
}

/// Whether previously sold leads are acceptable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalesMode {
    #[default]
    All,
    ExclusiveOnly,
}

/// A multi-criteria query against the lead inventory.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LeadQuery {
    pub category: Option<String>,
    pub region: Option<String>,
    /// Case-insensitive substring match on the city name.
    pub city: Option<String>,
    pub score: Option<Bounds<u8>>,
    pub price_minor: Option<Bounds<i64>>,
    /// Minimum monthly income, inclusive.
    pub income_floor_minor: Option<i64>,
    #[serde(default)]
    pub age_bucket: AgeBucket,
    pub credit_score: Option<Bounds<u16>>,
    pub urgency: Option<Bounds<u8>>,
    #[serde(default)]
    pub sales_mode: SalesMode,
}

impl LeadQuery {
    /// Evaluates the full conjunction against a single lead.
    ///
    /// A lead missing an attribute required by an active constraint fails
    /// that constraint (conservative exclusion), it never panics.
    pub fn matches(&self, lead: &Lead) -> bool {
        if let Some(category) = &self.category
            && !lead.category.eq_ignore_ascii_case(category)
        {
            return false;
        }
        if let Some(region) = &self.region
            && !lead.region.eq_ignore_ascii_case(region)
        {
            return false;
        }
        if let Some(city) = &self.city
            && !lead.city.to_lowercase().contains(&city.to_lowercase())
        {
            return false;
        }
        if let Some(score) = &self.score
            && !score.contains(lead.score)
        {
            return false;
        }
        if let Some(price) = &self.price_minor
            && !price.contains(lead.price_minor)
        {
            return false;
        }
        if let Some(floor) = self.income_floor_minor {
            match lead.income_minor {
                Some(income) if income >= floor => {}
                _ => return false,
            }
        }
        if self.age_bucket != AgeBucket::Any {
            match lead.age {
                Some(age) if self.age_bucket.matches(age) => {}
                _ => return false,
            }
        }
        if let Some(credit) = &self.credit_score {
            match lead.credit_score {
                Some(value) if credit.contains(value) => {}
                _ => return false,
            }
        }
        if let Some(urgency) = &self.urgency {
            match lead.urgency {
                Some(value) if urgency.contains(value) => {}
                _ => return false,
            }
        }
        if self.sales_mode == SalesMode::ExclusiveOnly && !lead.is_exclusive() {
            return false;
        }

        true
    }
}

/// Filters `inventory` against `query`, preserving the input order.
///
/// An empty result is valid output; there are no error conditions.
pub fn filter_leads<'a>(inventory: &'a [Lead], query: &LeadQuery) -> Vec<&'a Lead> {
    inventory.iter().filter(|lead| query.matches(lead)).collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::leads::LeadDraft;

    fn inventory() -> Vec<Lead> {
        let listed_at = Utc.timestamp_opt(0, 0).unwrap();
        vec![
            LeadDraft::new("mortgage", "Central", "Springfield", 92, 8500)
                .income_minor(120_000)
                .age(34)
                .credit_score(710)
                .urgency(8)
                .listed(listed_at),
            LeadDraft::new("mortgage", "Central", "Shelbyville", 78, 6500)
                .age(27)
                .times_sold(3)
                .listed(listed_at),
            LeadDraft::new("auto-insurance", "North", "Capital City", 55, 5500)
                .age(58)
                .listed(listed_at),
        ]
    }

    #[test]
    fn empty_query_passes_everything() {
        let inventory = inventory();
        let result = filter_leads(&inventory, &LeadQuery::default());
        assert_eq!(result.len(), inventory.len());
    }

    #[test]
    fn score_and_price_are_a_conjunction() {
        let inventory = inventory();
        let query = LeadQuery {
            score: Some(Bounds::new(90, 100).unwrap()),
            price_minor: Some(Bounds::new(0, 10_000).unwrap()),
            ..LeadQuery::default()
        };

        let result = filter_leads(&inventory, &query);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].score, 92);
    }

    #[test]
    fn bounds_are_inclusive() {
        let inventory = inventory();
        let query = LeadQuery {
            score: Some(Bounds::new(78, 92).unwrap()),
            ..LeadQuery::default()
        };

        assert_eq!(filter_leads(&inventory, &query).len(), 2);
    }

    #[test]
    fn missing_attribute_fails_the_active_constraint() {
        let inventory = inventory();
        // Only the first lead carries a credit score.
        let query = LeadQuery {
            credit_score: Some(Bounds::new(0, 850).unwrap()),
            ..LeadQuery::default()
        };

        let result = filter_leads(&inventory, &query);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].credit_score, Some(710));
    }

    #[test]
    fn age_buckets() {
        let inventory = inventory();

        let under30 = LeadQuery {
            age_bucket: AgeBucket::Under30,
            ..LeadQuery::default()
        };
        assert_eq!(filter_leads(&inventory, &under30)[0].age, Some(27));

        let middle = LeadQuery {
            age_bucket: AgeBucket::From30To50,
            ..LeadQuery::default()
        };
        assert_eq!(filter_leads(&inventory, &middle)[0].age, Some(34));

        let over50 = LeadQuery {
            age_bucket: AgeBucket::Over50,
            ..LeadQuery::default()
        };
        assert_eq!(filter_leads(&inventory, &over50)[0].age, Some(58));
    }

    #[test]
    fn exclusive_only_drops_previously_sold() {
        let inventory = inventory();
        let query = LeadQuery {
            sales_mode: SalesMode::ExclusiveOnly,
            ..LeadQuery::default()
        };

        let result = filter_leads(&inventory, &query);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|lead| lead.is_exclusive()));
    }

    #[test]
    fn city_match_is_a_case_insensitive_substring() {
        let inventory = inventory();
        let query = LeadQuery {
            city: Some("spring".to_string()),
            ..LeadQuery::default()
        };

        let result = filter_leads(&inventory, &query);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].city, "Springfield");
    }

    #[test]
    fn relaxing_a_constraint_never_shrinks_the_result() {
        let inventory = inventory();
        let strict = LeadQuery {
            region: Some("Central".to_string()),
            score: Some(Bounds::new(70, 100).unwrap()),
            ..LeadQuery::default()
        };
        let relaxed = LeadQuery {
            score: Some(Bounds::new(70, 100).unwrap()),
            ..LeadQuery::default()
        };

        assert!(filter_leads(&inventory, &relaxed).len() >= filter_leads(&inventory, &strict).len());
    }

    #[test]
    fn invalid_bounds_are_rejected() {
        assert_eq!(
            Bounds::new(10, 5).unwrap_err(),
            EngineError::InvalidBounds("min must not exceed max".to_string())
        );
    }
}
