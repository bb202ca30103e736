//! The lead acquisition engine.
//!
//! The engine owns the whole marketplace state for one buyer session: the
//! lead inventory snapshot, the cart, the budget ledger, the purchase
//! history, the notification feed and the auto-acquisition policy. Every
//! operation runs to completion before the next one is processed; the
//! settlement path is the single transaction boundary, so a rejected
//! settlement leaves ledger, history and cart exactly as they were.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use cart::{CartTotal, Selection};
pub use error::EngineError;
pub use filter::{AgeBucket, Bounds, LeadQuery, SalesMode, filter_leads};
pub use leads::{Lead, LeadDraft};
pub use ledger::Ledger;
pub use notifications::{Notification, NotificationFeed, Severity};
pub use policy::{
    AutoPolicy, PolicySetting, SETTING_ENABLED, SETTING_MAX_PRICE, SETTING_MIN_SCORE,
    SETTING_STRATEGY, SettingValue, Strategy,
};
pub use purchases::{Purchase, PurchaseStatus};

mod cart;
mod error;
mod filter;
mod leads;
mod ledger;
mod notifications;
mod policy;
mod purchases;
mod util;

type ResultEngine<T> = Result<T, EngineError>;

/// Outcome of a settlement attempt.
///
/// Rejection is a normal outcome, not an error: the cart is preserved so
/// the buyer can adjust it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettlementOutcome {
    /// Nothing to settle; no side effects, no notification.
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

/// Outcome of one auto-acquisition policy evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PolicyOutcome {
    Disabled,
    NoMatches,
    Committed {
        purchase_id: Uuid,
        total_minor: i64,
        leads: usize,
    },
    /// The batch was not affordable; the cart was restored to its
    /// pre-policy state.
    Rejected { total_minor: i64 },
}

#[derive(Debug)]
pub struct Engine {
    inventory: Vec<Lead>,
    cart: Selection,
    ledger: Ledger,
    purchases: Vec<Purchase>,
    feed: NotificationFeed,
    policy: AutoPolicy,
}

impl Engine {
    /// Return a builder for `Engine`.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn inventory(&self) -> &[Lead] {
        &self.inventory
    }

    pub fn cart(&self) -> &Selection {
        &self.cart
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn purchases(&self) -> &[Purchase] {
        &self.purchases
    }

    pub fn notifications(&self) -> &NotificationFeed {
        &self.feed
    }

    pub fn policy(&self) -> &AutoPolicy {
        &self.policy
    }

    /// Filters the current inventory snapshot. Pure and order-preserving.
    pub fn filter(&self, query: &LeadQuery) -> Vec<Lead> {
        filter_leads(&self.inventory, query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Toggles a lead in the cart.
    ///
    /// Returns `true` if the lead is in the cart afterwards. Toggling an id
    /// that is neither in the cart nor in the inventory is a no-op: the
    /// engine validates membership so the cart never gains a dangling
    /// reference.
    pub fn toggle_cart(&mut self, id: Uuid) -> bool {
        if self.cart.contains(id) {
            self.cart.remove(id);
            return false;
        }
        if self.inventory.iter().any(|lead| lead.id == id) {
            self.cart.insert(id);
            return true;
        }
        tracing::warn!(%id, "toggle ignored: lead not in inventory");
        false
    }

    /// The cart resolved against the current inventory snapshot.
    pub fn cart_total(&self) -> CartTotal {
        self.cart.total(&self.inventory)
    }

    /// Abandoning a pending selection is always safe.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Settles the current cart manually.
    pub fn settle(&mut self, now: DateTime<Utc>) -> SettlementOutcome {
        self.settle_batch(now, false)
    }

    /// Credits the balance and notifies.
    pub fn top_up(&mut self, amount_minor: i64, now: DateTime<Utc>) -> ResultEngine<()> {
        self.ledger.credit(amount_minor)?;
        self.feed.emit(
            Severity::Success,
            format!("Balance topped up by {}", util::fmt_amount(amount_minor)),
            now,
        );
        Ok(())
    }

    /// Updates one AI-manager setting; the value must match the setting's
    /// declared kind.
    pub fn update_policy_setting(&mut self, name: &str, value: SettingValue) -> ResultEngine<()> {
        self.policy.update(name, value)
    }

    pub fn mark_notification_read(&mut self, id: Uuid) -> bool {
        self.feed.mark_read(id)
    }

    /// Replaces the inventory with a fresh snapshot.
    ///
    /// Cart members that no longer resolve are pruned with a warning, and
    /// an enabled policy is re-evaluated against the new snapshot.
    pub fn refresh_inventory(&mut self, snapshot: Vec<Lead>, now: DateTime<Utc>) -> PolicyOutcome {
        self.inventory = snapshot;
        self.prune_stale_cart(now);
        self.run_policy(now)
    }

    /// Evaluates the auto-acquisition policy against the inventory.
    ///
    /// Matching leads join the current selection and the whole batch is
    /// settled through the same all-or-nothing path as a manual purchase.
    /// A run that selects nothing new leaves the cart untouched, and if the
    /// batch is rejected the policy's additions are rolled back so the
    /// manual cart is left as it was.
    pub fn run_policy(&mut self, now: DateTime<Utc>) -> PolicyOutcome {
        if !self.policy.enabled() {
            return PolicyOutcome::Disabled;
        }

        let picks = self.policy.select(&self.inventory);
        let added: Vec<Uuid> = picks
            .into_iter()
            .filter(|id| self.cart.insert(*id))
            .collect();
        // Without a fresh pick the policy has nothing to buy; a pending
        // manual selection must never be settled on its behalf.
        if added.is_empty() {
            return PolicyOutcome::NoMatches;
        }

        match self.settle_batch(now, true) {
            SettlementOutcome::Committed {
                purchase_id,
                total_minor,
                leads,
            } => {
                tracing::info!(%purchase_id, leads, "policy batch settled");
                PolicyOutcome::Committed {
                    purchase_id,
                    total_minor,
                    leads,
                }
            }
            SettlementOutcome::Rejected { total_minor, .. } => {
                // Strict all-or-nothing: never partially fund a policy
                // batch. Roll the policy's additions back.
                for id in added {
                    self.cart.remove(id);
                }
                PolicyOutcome::Rejected { total_minor }
            }
            SettlementOutcome::EmptyCart => PolicyOutcome::NoMatches,
        }
    }

    /// The single transaction boundary: `Idle -> Validating -> {Committed |
    /// Rejected} -> Idle`. Either every effect of the purchase happens
    /// (debit, history append, cart clear, notification) or none does.
    fn settle_batch(&mut self, now: DateTime<Utc>, automatic: bool) -> SettlementOutcome {
        if self.cart.is_empty() {
            return SettlementOutcome::EmptyCart;
        }

        let today = now.date_naive();
        self.ledger.roll_over(today);
        self.prune_stale_cart(now);
        if self.cart.is_empty() {
            return SettlementOutcome::EmptyCart;
        }

        let CartTotal { total_minor, .. } = self.cart.total(&self.inventory);
        let by = if automatic { " by the AI manager" } else { "" };

        if let Err(err) = self.ledger.debit(total_minor, today) {
            tracing::info!(total_minor, "settlement rejected: {err}");
            self.feed.emit(
                Severity::Error,
                format!(
                    "Purchase{by} rejected: cart total {} exceeds balance {}",
                    util::fmt_amount(total_minor),
                    util::fmt_amount(self.ledger.balance_minor)
                ),
                now,
            );
            return SettlementOutcome::Rejected {
                total_minor,
                balance_minor: self.ledger.balance_minor,
            };
        }

        // Snapshot the sold leads and take them off the shelf.
        let sold_ids: Vec<Uuid> = self.cart.ids().to_vec();
        let mut sold = Vec::with_capacity(sold_ids.len());
        for id in &sold_ids {
            if let Some(index) = self.inventory.iter().position(|lead| lead.id == *id) {
                let mut lead = self.inventory.remove(index);
                lead.times_sold += 1;
                sold.push(lead);
            }
        }

        let count = sold.len();
        let purchase = Purchase::completed(sold, total_minor, now);
        let purchase_id = purchase.id;
        self.purchases.push(purchase);
        self.ledger.leads_acquired_today += count as u32;
        self.cart.clear();

        tracing::info!(%purchase_id, leads = count, total_minor, "settlement committed");
        self.feed.emit(
            Severity::Success,
            format!(
                "Purchased {count} lead(s) for {}{by}",
                util::fmt_amount(total_minor)
            ),
            now,
        );
        if self.ledger.over_daily_budget() {
            self.feed.emit(
                Severity::Warning,
                format!(
                    "Daily budget exceeded: spent {} of {} today",
                    util::fmt_amount(self.ledger.spent_today_minor),
                    util::fmt_amount(self.ledger.daily_budget_minor)
                ),
                now,
            );
        }
        if self.ledger.over_weekly_budget() {
            self.feed.emit(
                Severity::Warning,
                format!(
                    "Weekly budget exceeded: spent {} of {} this week",
                    util::fmt_amount(self.ledger.spent_this_week_minor),
                    util::fmt_amount(self.ledger.weekly_budget_minor)
                ),
                now,
            );
        }

        SettlementOutcome::Committed {
            purchase_id,
            total_minor,
            leads: count,
        }
    }

    /// Drops cart members that no longer resolve against the inventory and
    /// surfaces the drop instead of mispricing the cart.
    fn prune_stale_cart(&mut self, now: DateTime<Utc>) {
        let stale = self.cart.total(&self.inventory).stale;
        if stale.is_empty() {
            return;
        }

        for id in &stale {
            self.cart.remove(*id);
            tracing::warn!(%id, "dropped stale cart member");
        }
        self.feed.emit(
            Severity::Warning,
            format!(
                "{} lead(s) in your cart are no longer available and were removed",
                stale.len()
            ),
            now,
        );
    }
}

/// The builder for `Engine`.
#[derive(Debug, Default)]
pub struct EngineBuilder {
    inventory: Vec<Lead>,
    ledger: Option<Ledger>,
    policy: Option<AutoPolicy>,
}

impl EngineBuilder {
    /// Seeds the initial inventory snapshot.
    pub fn inventory(mut self, inventory: Vec<Lead>) -> EngineBuilder {
        self.inventory = inventory;
        self
    }

    /// Seeds the ledger from the resolved account state.
    pub fn ledger(mut self, ledger: Ledger) -> EngineBuilder {
        self.ledger = Some(ledger);
        self
    }

    pub fn policy(mut self, policy: AutoPolicy) -> EngineBuilder {
        self.policy = Some(policy);
        self
    }

    /// Construct `Engine`.
    pub fn build(self) -> Engine {
        let ledger = self
            .ledger
            .unwrap_or_else(|| Ledger::new(0, 0, 0, Utc::now().date_naive()));

        Engine {
            inventory: self.inventory,
            cart: Selection::new(),
            ledger,
            purchases: Vec::new(),
            feed: NotificationFeed::new(),
            policy: self.policy.unwrap_or_default(),
        }
    }
}
