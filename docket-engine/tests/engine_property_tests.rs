//! Property-based tests for the completion engine's ledger invariants.

use docket_catalog::default_roadmap;
use docket_core::{RewardConfig, StageId, SubstageId, UserId};
use docket_engine::CaseEngine;
use docket_events::NullSink;
use docket_storage::MemoryStore;
use proptest::prelude::*;
use std::sync::Arc;

fn engine() -> (CaseEngine, MemoryStore, UserId) {
    let store = MemoryStore::new();
    let engine = CaseEngine::new(
        Arc::new(default_roadmap().clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(NullSink),
        RewardConfig::default(),
    )
    .unwrap();
    let user = docket_core::new_user_id();
    engine.start_case(user).unwrap();
    (engine, store, user)
}

/// Total coins the default roadmap pays for fully completing a stage:
/// every substage plus the stage bonus.
fn stage_value(stage_id: &StageId) -> u32 {
    let stage = default_roadmap().stage(stage_id).unwrap();
    stage.bonus_coins + stage.substages.iter().map(|s| s.coins).sum::<u32>()
}

fn any_stage_id() -> impl Strategy<Value = StageId> {
    prop::sample::select(
        default_roadmap()
            .stages()
            .iter()
            .map(|s| s.id.clone())
            .collect::<Vec<_>>(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Completing a substage N times yields exactly one ledger entry and
    /// one wallet credit, for any N >= 1.
    #[test]
    fn prop_substage_completion_is_idempotent(n in 1usize..12) {
        let (engine, store, user) = engine();
        let stage = StageId::from("complaint-filed");
        let substage = SubstageId::from("cf-1");

        for _ in 0..n {
            engine.complete_substage(&user, &stage, &substage).unwrap();
        }

        prop_assert_eq!(store.ledger_len(), 1);
        prop_assert_eq!(engine.wallet(&user).unwrap().coin_balance, 50);
    }

    /// For any stage, any number of revert/redo cycles pays the stage's
    /// value exactly once.
    #[test]
    fn prop_revert_redo_pays_once(stage_id in any_stage_id(), cycles in 1usize..5) {
        let (engine, _, user) = engine();

        for _ in 0..cycles {
            engine.complete_stage(&user, &stage_id).unwrap();
            engine.revert_stage(&user, &stage_id).unwrap();
        }
        engine.complete_stage(&user, &stage_id).unwrap();

        prop_assert_eq!(
            engine.wallet(&user).unwrap().coin_balance,
            stage_value(&stage_id) as u64
        );
    }

    /// Bulk completion and substage-by-substage completion produce the
    /// same ledger and the same balance.
    #[test]
    fn prop_bulk_equals_individual(stage_id in any_stage_id()) {
        let (bulk_engine, bulk_store, bulk_user) = engine();
        let (step_engine, step_store, step_user) = engine();

        bulk_engine.complete_stage(&bulk_user, &stage_id).unwrap();

        let stage = default_roadmap().stage(&stage_id).unwrap();
        for substage in &stage.substages {
            step_engine
                .complete_substage(&step_user, &stage_id, &substage.id)
                .unwrap();
        }
        if stage.is_empty() {
            step_engine.complete_stage(&step_user, &stage_id).unwrap();
        }

        prop_assert_eq!(bulk_store.ledger_len(), step_store.ledger_len());
        prop_assert_eq!(
            bulk_engine.wallet(&bulk_user).unwrap().coin_balance,
            step_engine.wallet(&step_user).unwrap().coin_balance
        );
    }

    /// Completing stages in any order never awards a unit twice: the
    /// final balance is the sum of distinct stage values.
    #[test]
    fn prop_any_completion_order_sums_distinct_units(
        mut order in prop::sample::subsequence(
            default_roadmap().stages().iter().map(|s| s.id.clone()).collect::<Vec<_>>(),
            1..=6,
        )
    ) {
        let (engine, _, user) = engine();
        // Complete each selected stage twice, interleaved.
        order.extend(order.clone());
        let expected: u64 = {
            let mut ids = order.clone();
            ids.sort();
            ids.dedup();
            ids.iter().map(|id| stage_value(id) as u64).sum()
        };

        for stage_id in &order {
            engine.complete_stage(&user, stage_id).unwrap();
        }

        prop_assert_eq!(engine.wallet(&user).unwrap().coin_balance, expected);
    }
}
