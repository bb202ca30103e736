//! Demo inventory used when no upstream lead feed is wired in.

use chrono::{Duration, Utc};
use engine::{Lead, LeadDraft};

pub fn inventory() -> Vec<Lead> {
    let now = Utc::now();

    vec![
        LeadDraft::new("mortgage", "Central", "Springfield", 92, 8500)
            .income_minor(120_000)
            .age(34)
            .credit_score(710)
            .urgency(8)
            .description("Pre-approved, looking to close within 30 days")
            .listed(now - Duration::hours(2)),
        LeadDraft::new("mortgage", "Central", "Shelbyville", 78, 6500)
            .income_minor(86_000)
            .age(27)
            .credit_score(655)
            .urgency(5)
            .times_sold(2)
            .description("First-time buyer, comparing rates")
            .listed(now - Duration::hours(5)),
        LeadDraft::new("mortgage", "North", "Capital City", 85, 7200)
            .income_minor(104_000)
            .age(41)
            .urgency(6)
            .description("Refinance, current rate 7.1%")
            .listed(now - Duration::hours(8)),
        LeadDraft::new("auto-insurance", "North", "Capital City", 74, 5500)
            .age(58)
            .urgency(3)
            .description("Two vehicles, clean record")
            .listed(now - Duration::hours(12)),
        LeadDraft::new("auto-insurance", "South", "Ogdenville", 67, 4200)
            .age(23)
            .credit_score(590)
            .times_sold(1)
            .description("Policy expiring this month")
            .listed(now - Duration::days(1)),
        LeadDraft::new("life-insurance", "South", "North Haverbrook", 88, 9100)
            .income_minor(150_000)
            .age(47)
            .credit_score(740)
            .urgency(9)
            .description("Term policy, quote requested today")
            .listed(now - Duration::hours(1)),
        LeadDraft::new("life-insurance", "Central", "Springfield", 59, 3000)
            .age(31)
            .times_sold(4)
            .description("Price shopping, low engagement")
            .listed(now - Duration::days(2)),
    ]
}
