//! Daily bonus and coin-to-credit conversion flows.

use chrono::NaiveDate;
use docket_catalog::default_roadmap;
use docket_core::{DocketError, RewardConfig, UserId, WalletError};
use docket_engine::CaseEngine;
use docket_events::{CaseEventKind, RecordingSink};
use docket_storage::{MemoryStore, WalletStore};
use std::sync::Arc;

fn engine() -> (CaseEngine, MemoryStore, RecordingSink, UserId) {
    let store = MemoryStore::new();
    let sink = RecordingSink::new();
    let engine = CaseEngine::new(
        Arc::new(default_roadmap().clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(sink.clone()),
        RewardConfig::default(),
    )
    .unwrap();
    let user = docket_core::new_user_id();
    engine.start_case(user).unwrap();
    (engine, store, sink, user)
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

#[test]
fn first_claim_starts_a_streak() {
    let (engine, _, _, user) = engine();
    let claim = engine.claim_daily_bonus(&user, day(1)).unwrap();
    assert_eq!(claim.streak, 1);
    assert_eq!(claim.coins_earned, 5);

    let wallet = engine.wallet(&user).unwrap();
    assert_eq!(wallet.coin_balance, 5);
    assert_eq!(wallet.login_streak, 1);
    assert_eq!(wallet.last_claim_date, Some(day(1)));
}

#[test]
fn consecutive_days_walk_the_schedule() {
    let (engine, _, _, user) = engine();
    let mut total = 0u64;
    for (i, expected) in [5u32, 7, 10, 12, 15, 20, 30].iter().enumerate() {
        let claim = engine.claim_daily_bonus(&user, day(1 + i as u32)).unwrap();
        assert_eq!(claim.streak, 1 + i as u32);
        assert_eq!(claim.coins_earned, *expected);
        total += *expected as u64;
    }
    assert_eq!(engine.wallet(&user).unwrap().coin_balance, total);
}

#[test]
fn streak_past_schedule_clamps_to_last_entry() {
    let (engine, store, _, user) = engine();
    // Simulate an established 9-day streak claimed through day 9.
    store.record_claim(&user, day(9), 9).unwrap();

    let claim = engine.claim_daily_bonus(&user, day(10)).unwrap();
    assert_eq!(claim.streak, 10);
    // 7-entry schedule: streak 10 pays the last entry.
    assert_eq!(claim.coins_earned, 30);
}

#[test]
fn missed_day_resets_the_streak() {
    let (engine, _, _, user) = engine();
    engine.claim_daily_bonus(&user, day(1)).unwrap();
    engine.claim_daily_bonus(&user, day(2)).unwrap();

    // Day 3 skipped.
    let claim = engine.claim_daily_bonus(&user, day(4)).unwrap();
    assert_eq!(claim.streak, 1);
    assert_eq!(claim.coins_earned, 5);
}

#[test]
fn second_claim_same_day_is_rejected() {
    let (engine, _, _, user) = engine();
    engine.claim_daily_bonus(&user, day(1)).unwrap();
    let result = engine.claim_daily_bonus(&user, day(1));
    assert!(matches!(
        result,
        Err(DocketError::Wallet(WalletError::AlreadyClaimedToday { .. }))
    ));
    // Balance unchanged by the rejected claim.
    assert_eq!(engine.wallet(&user).unwrap().coin_balance, 5);
}

#[test]
fn conversion_caps_at_seven_credits_and_keeps_remainder() {
    let (engine, store, _, user) = engine();
    store.credit(&user, 4000).unwrap();

    let conversion = engine.convert_coins(&user).unwrap();
    assert_eq!(conversion.credits_granted, 7);
    assert_eq!(conversion.coins_debited, 3500);
    assert_eq!(conversion.remaining_balance, 500);
    assert_eq!(engine.wallet(&user).unwrap().coin_balance, 500);
}

#[test]
fn conversion_below_one_credit_fails() {
    let (engine, store, _, user) = engine();
    store.credit(&user, 499).unwrap();

    let result = engine.convert_coins(&user);
    assert!(matches!(
        result,
        Err(DocketError::Wallet(WalletError::InsufficientBalance {
            balance: 499,
            required: 500
        }))
    ));
    assert_eq!(engine.wallet(&user).unwrap().coin_balance, 499);
}

#[test]
fn conversion_debits_exactly_the_converted_amount() {
    let (engine, store, _, user) = engine();
    store.credit(&user, 1234).unwrap();

    let conversion = engine.convert_coins(&user).unwrap();
    assert_eq!(conversion.credits_granted, 2);
    assert_eq!(conversion.coins_debited, 1000);
    assert_eq!(conversion.remaining_balance, 234);
}

#[test]
fn bonus_and_conversion_emit_events() {
    let (engine, store, sink, user) = engine();
    engine.claim_daily_bonus(&user, day(1)).unwrap();
    store.credit(&user, 995).unwrap();
    engine.convert_coins(&user).unwrap();

    let events = sink.events();
    assert!(events.iter().any(|e| matches!(
        e.kind,
        CaseEventKind::DailyBonusClaimed {
            streak: 1,
            coins_earned: 5
        }
    )));
    assert!(events.iter().any(|e| matches!(
        e.kind,
        CaseEventKind::CoinsConverted {
            credits: 2,
            coins_debited: 1000
        }
    )));
}
