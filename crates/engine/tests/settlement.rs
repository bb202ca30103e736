use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use engine::{
    AutoPolicy, Engine, Lead, LeadDraft, Ledger, PolicyOutcome, SETTING_ENABLED, SETTING_MAX_PRICE,
    SETTING_MIN_SCORE, SettingValue, Severity, SettlementOutcome,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 12, 0, 0).unwrap()
}

fn priced_inventory() -> Vec<Lead> {
    vec![
        LeadDraft::new("mortgage", "Central", "Springfield", 92, 8500).listed(now()),
        LeadDraft::new("mortgage", "Central", "Shelbyville", 81, 6500).listed(now()),
        LeadDraft::new("auto-insurance", "North", "Capital City", 74, 5500).listed(now()),
    ]
}

fn engine_with_balance(balance_minor: i64) -> Engine {
    Engine::builder()
        .inventory(priced_inventory())
        .ledger(Ledger::new(balance_minor, 5000, 20_000, now().date_naive()))
        .build()
}

#[test]
fn unaffordable_full_cart_is_rejected_without_side_effects() {
    let mut engine = engine_with_balance(10_000);
    let ids: Vec<Uuid> = engine.inventory().iter().map(|lead| lead.id).collect();
    for id in &ids {
        assert!(engine.toggle_cart(*id));
    }

    // 8500 + 6500 + 5500 = 20500 > 10000.
    let outcome = engine.settle(now());

    assert_eq!(
        outcome,
        SettlementOutcome::Rejected {
            total_minor: 20_500,
            balance_minor: 10_000,
        }
    );
    assert_eq!(engine.ledger().balance_minor, 10_000);
    assert!(engine.purchases().is_empty());
    // The cart is preserved so the buyer can adjust it.
    assert_eq!(engine.cart().len(), 3);
    let top = engine.notifications().iter().next().unwrap();
    assert_eq!(top.severity, Severity::Error);
}

#[test]
fn smaller_but_still_unaffordable_cart_is_also_rejected() {
    let mut engine = engine_with_balance(10_000);
    let ids: Vec<Uuid> = engine
        .inventory()
        .iter()
        .filter(|lead| lead.price_minor <= 6500)
        .map(|lead| lead.id)
        .collect();
    for id in &ids {
        engine.toggle_cart(*id);
    }

    // 6500 + 5500 = 12000 > 10000.
    let outcome = engine.settle(now());

    assert!(matches!(outcome, SettlementOutcome::Rejected { .. }));
    assert_eq!(engine.ledger().balance_minor, 10_000);
    assert_eq!(engine.cart().len(), 2);
}

#[test]
fn affordable_cart_commits_atomically() {
    let mut engine = engine_with_balance(10_000);
    let cheapest = engine
        .inventory()
        .iter()
        .find(|lead| lead.price_minor == 5500)
        .map(|lead| lead.id)
        .unwrap();
    engine.toggle_cart(cheapest);

    let unread_before = engine.notifications().unread_count();
    let outcome = engine.settle(now());

    let SettlementOutcome::Committed {
        total_minor, leads, ..
    } = outcome
    else {
        panic!("expected commit, got {outcome:?}");
    };
    assert_eq!(total_minor, 5500);
    assert_eq!(leads, 1);
    assert_eq!(engine.ledger().balance_minor, 4500);
    assert_eq!(engine.ledger().leads_acquired_today, 1);
    assert!(engine.cart().is_empty());

    assert_eq!(engine.purchases().len(), 1);
    let purchase = &engine.purchases()[0];
    assert_eq!(purchase.total_minor, 5500);
    assert_eq!(purchase.leads.len(), 1);
    assert_eq!(purchase.leads[0].times_sold, 1);

    // Exactly one success notification; the 5500 spend exceeds the daily
    // budget of 5000 which adds one advisory warning on top.
    assert_eq!(engine.notifications().unread_count(), unread_before + 2);
    // The sold lead left the inventory.
    assert!(engine.inventory().iter().all(|lead| lead.id != cheapest));
}

#[test]
fn settling_an_empty_cart_is_a_silent_no_op() {
    let mut engine = engine_with_balance(10_000);

    assert_eq!(engine.settle(now()), SettlementOutcome::EmptyCart);
    assert!(engine.notifications().is_empty());
    assert_eq!(engine.ledger().balance_minor, 10_000);
}

#[test]
fn stale_cart_members_are_dropped_and_flagged_before_commit() {
    let mut engine = engine_with_balance(10_000);
    let keep = engine.inventory()[2].id;
    let gone = engine.inventory()[0].id;
    engine.toggle_cart(keep);
    engine.toggle_cart(gone);

    // The first lead disappears with the next inventory refresh.
    let remaining: Vec<Lead> = engine
        .inventory()
        .iter()
        .filter(|lead| lead.id != gone)
        .cloned()
        .collect();
    engine.refresh_inventory(remaining, now());

    assert!(
        engine
            .notifications()
            .iter()
            .any(|n| n.severity == Severity::Warning && n.message.contains("no longer available"))
    );

    let outcome = engine.settle(now());
    let SettlementOutcome::Committed { total_minor, .. } = outcome else {
        panic!("expected commit, got {outcome:?}");
    };
    // Only the surviving member was priced and purchased.
    assert_eq!(total_minor, 5500);
    assert_eq!(engine.purchases()[0].leads.len(), 1);
}

#[test]
fn toggling_an_unknown_id_is_a_no_op() {
    let mut engine = engine_with_balance(10_000);

    assert!(!engine.toggle_cart(Uuid::new_v4()));
    assert!(engine.cart().is_empty());
}

#[test]
fn top_up_raises_balance_and_notifies() {
    let mut engine = engine_with_balance(1000);
    engine.top_up(5000, now()).unwrap();

    assert_eq!(engine.ledger().balance_minor, 6000);
    let top = engine.notifications().iter().next().unwrap();
    assert_eq!(top.severity, Severity::Success);

    assert!(engine.top_up(0, now()).is_err());
    assert_eq!(engine.ledger().balance_minor, 6000);
}

fn enabled_policy(min_score: i64, max_price_minor: i64) -> AutoPolicy {
    let mut policy = AutoPolicy::default();
    policy
        .update(SETTING_ENABLED, SettingValue::Toggle(true))
        .unwrap();
    policy
        .update(SETTING_MIN_SCORE, SettingValue::Slider(min_score))
        .unwrap();
    policy
        .update(SETTING_MAX_PRICE, SettingValue::Slider(max_price_minor))
        .unwrap();
    policy
}

#[test]
fn policy_buys_matching_leads_through_the_same_path() {
    let mut engine = Engine::builder()
        .inventory(priced_inventory())
        .ledger(Ledger::new(50_000, 50_000, 100_000, now().date_naive()))
        .policy(enabled_policy(80, 10_000))
        .build();

    let outcome = engine.run_policy(now());

    let PolicyOutcome::Committed {
        total_minor, leads, ..
    } = outcome
    else {
        panic!("expected commit, got {outcome:?}");
    };
    // Scores 92 and 81 pass the floor of 80; the 74 does not.
    assert_eq!(leads, 2);
    assert_eq!(total_minor, 15_000);
    assert_eq!(engine.ledger().balance_minor, 35_000);
    assert!(
        engine
            .notifications()
            .iter()
            .any(|n| n.message.contains("AI manager"))
    );
}

#[test]
fn unaffordable_policy_batch_is_all_or_nothing() {
    let mut engine = Engine::builder()
        .inventory(priced_inventory())
        // Could afford the cheapest matching lead alone, but not the batch.
        .ledger(Ledger::new(7000, 50_000, 100_000, now().date_naive()))
        .policy(enabled_policy(80, 10_000))
        .build();

    let outcome = engine.run_policy(now());

    assert_eq!(outcome, PolicyOutcome::Rejected { total_minor: 15_000 });
    assert_eq!(engine.ledger().balance_minor, 7000);
    assert!(engine.purchases().is_empty());
    // The policy's picks were rolled back.
    assert!(engine.cart().is_empty());
}

#[test]
fn rejected_policy_batch_keeps_the_manual_cart() {
    let mut engine = Engine::builder()
        .inventory(priced_inventory())
        .ledger(Ledger::new(7000, 50_000, 100_000, now().date_naive()))
        .policy(enabled_policy(90, 10_000))
        .build();

    // Manual pick below the policy's score floor.
    let manual = engine
        .inventory()
        .iter()
        .find(|lead| lead.score == 74)
        .map(|lead| lead.id)
        .unwrap();
    engine.toggle_cart(manual);

    // Policy adds the 8500 lead; 8500 + 5500 = 14000 > 7000.
    let outcome = engine.run_policy(now());

    assert!(matches!(outcome, PolicyOutcome::Rejected { .. }));
    assert_eq!(engine.cart().ids(), &[manual]);
}

#[test]
fn policy_without_matches_leaves_the_manual_cart_alone() {
    let mut engine = Engine::builder()
        .inventory(priced_inventory())
        .ledger(Ledger::new(50_000, 50_000, 100_000, now().date_naive()))
        // No lead reaches score 99 at a price of at most 1.
        .policy(enabled_policy(99, 1))
        .build();

    let manual = engine.inventory()[2].id;
    engine.toggle_cart(manual);

    let outcome = engine.run_policy(now());

    assert_eq!(outcome, PolicyOutcome::NoMatches);
    // The pending manual selection stays uncommitted.
    assert_eq!(engine.cart().ids(), &[manual]);
    assert!(engine.purchases().is_empty());
    assert_eq!(engine.ledger().balance_minor, 50_000);
}

#[test]
fn disabled_policy_does_nothing() {
    let mut engine = engine_with_balance(50_000);

    assert_eq!(engine.run_policy(now()), PolicyOutcome::Disabled);
    assert!(engine.purchases().is_empty());
    assert!(engine.notifications().is_empty());
}

#[test]
fn refresh_runs_an_enabled_policy_against_the_new_snapshot() {
    let mut engine = Engine::builder()
        .inventory(Vec::new())
        .ledger(Ledger::new(50_000, 50_000, 100_000, now().date_naive()))
        .policy(enabled_policy(80, 10_000))
        .build();

    let outcome = engine.refresh_inventory(priced_inventory(), now());

    assert!(matches!(outcome, PolicyOutcome::Committed { leads: 2, .. }));
}
