//! The module contains the buyer's budget ledger.
//!
//! The ledger tracks one hard constraint and two soft ones. Balance is the
//! hard gate: no debit may drive it negative. The daily and weekly budgets
//! are advisory telemetry only; exceeding them produces a warning upstream
//! but never blocks a settlement.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// Account balance and spend tracking, in minor currency units.
///
/// Initialized from account state at session start and recreated per
/// session; the engine owns every mutation through [`debit`], [`credit`] and
/// the day/week rollover.
///
/// [`debit`]: Ledger::debit
/// [`credit`]: Ledger::credit
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ledger {
    pub balance_minor: i64,
    pub daily_budget_minor: i64,
    pub weekly_budget_minor: i64,
    pub spent_today_minor: i64,
    pub spent_this_week_minor: i64,
    /// Lifetime spend; survives the day and week rollovers.
    pub spent_total_minor: i64,
    pub leads_acquired_today: u32,
    day: NaiveDate,
    iso_week: (i32, u32),
}

impl Ledger {
    pub fn new(
        balance_minor: i64,
        daily_budget_minor: i64,
        weekly_budget_minor: i64,
        today: NaiveDate,
    ) -> Self {
        Self {
            balance_minor,
            daily_budget_minor,
            weekly_budget_minor,
            spent_today_minor: 0,
            spent_this_week_minor: 0,
            spent_total_minor: 0,
            leads_acquired_today: 0,
            day: today,
            iso_week: iso_week(today),
        }
    }

    /// The hard affordability gate: balance sufficiency only.
    pub fn can_afford(&self, amount_minor: i64) -> bool {
        amount_minor <= self.balance_minor
    }

    /// Resets the daily and weekly counters when the date has moved on.
    pub fn roll_over(&mut self, today: NaiveDate) {
        if today != self.day {
            self.day = today;
            self.spent_today_minor = 0;
            self.leads_acquired_today = 0;
        }
        let week = iso_week(today);
        if week != self.iso_week {
            self.iso_week = week;
            self.spent_this_week_minor = 0;
        }
    }

    /// Debits `amount_minor` from the balance and records the spend.
    ///
    /// Rejects non-positive amounts with `InvalidAmount` and amounts above
    /// the balance with `InsufficientFunds`; in both cases nothing changes.
    /// After a successful debit the balance is never negative.
    pub fn debit(&mut self, amount_minor: i64, today: NaiveDate) -> ResultEngine<()> {
        if amount_minor <= 0 {
            return Err(EngineError::InvalidAmount(
                "debit amount must be > 0".to_string(),
            ));
        }
        if !self.can_afford(amount_minor) {
            return Err(EngineError::InsufficientFunds(format!(
                "amount {amount_minor} exceeds balance {}",
                self.balance_minor
            )));
        }

        self.roll_over(today);
        self.balance_minor -= amount_minor;
        self.spent_today_minor += amount_minor;
        self.spent_this_week_minor += amount_minor;
        self.spent_total_minor += amount_minor;
        Ok(())
    }

    /// Credits the balance (top-up).
    pub fn credit(&mut self, amount_minor: i64) -> ResultEngine<()> {
        if amount_minor <= 0 {
            return Err(EngineError::InvalidAmount(
                "credit amount must be > 0".to_string(),
            ));
        }
        self.balance_minor += amount_minor;
        Ok(())
    }

    /// Advisory check, never blocks a settlement.
    pub fn over_daily_budget(&self) -> bool {
        self.daily_budget_minor > 0 && self.spent_today_minor > self.daily_budget_minor
    }

    /// Advisory check, never blocks a settlement.
    pub fn over_weekly_budget(&self) -> bool {
        self.weekly_budget_minor > 0 && self.spent_this_week_minor > self.weekly_budget_minor
    }
}

fn iso_week(day: NaiveDate) -> (i32, u32) {
    let week = day.iso_week();
    (week.year(), week.week())
}
