//! In-memory store implementing all three storage traits.

use crate::{ProgressStore, RewardLedger, WalletStore};
use chrono::Utc;
use docket_core::{
    new_entry_id, AwardResult, ClaimDate, DocketError, DocketResult, FileRef, LedgerEntry,
    ProgressError, StageId, SubstageId, SubstageProgress, UnitId, UserId, Wallet, WalletError,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
struct CaseRecord {
    substages: HashMap<SubstageId, SubstageProgress>,
    stage_completed: HashMap<StageId, bool>,
    stage_expanded: HashMap<StageId, bool>,
}

#[derive(Debug, Default)]
struct State {
    cases: HashMap<UserId, CaseRecord>,
    ledger: HashMap<(UserId, UnitId), LedgerEntry>,
    wallets: HashMap<UserId, Wallet>,
}

/// In-memory storage for tests and single-process deployments.
///
/// One lock guards ledger and wallets together, so `try_award`'s
/// insert-if-absent and the wallet credit commit in a single critical
/// section - the in-process equivalent of the unique-constraint +
/// transaction a database implementation uses.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ledger entries across all users.
    pub fn ledger_len(&self) -> usize {
        self.state.read().unwrap().ledger.len()
    }

    /// Drop all stored data.
    pub fn clear(&self) {
        let mut state = self.state.write().unwrap();
        state.cases.clear();
        state.ledger.clear();
        state.wallets.clear();
    }

    fn with_case<T>(
        &self,
        user_id: &UserId,
        f: impl FnOnce(&mut CaseRecord) -> T,
    ) -> DocketResult<T> {
        let mut state = self.state.write().unwrap();
        let record = state
            .cases
            .get_mut(user_id)
            .ok_or(DocketError::Progress(ProgressError::CaseNotFound {
                user_id: *user_id,
            }))?;
        Ok(f(record))
    }

    fn read_case<T>(
        &self,
        user_id: &UserId,
        f: impl FnOnce(&CaseRecord) -> T,
    ) -> DocketResult<T> {
        let state = self.state.read().unwrap();
        let record = state
            .cases
            .get(user_id)
            .ok_or(DocketError::Progress(ProgressError::CaseNotFound {
                user_id: *user_id,
            }))?;
        Ok(f(record))
    }
}

impl ProgressStore for MemoryStore {
    fn init_case(&self, user_id: UserId) -> DocketResult<()> {
        let mut state = self.state.write().unwrap();
        state.cases.entry(user_id).or_default();
        Ok(())
    }

    fn set_substage_completed(
        &self,
        user_id: &UserId,
        substage_id: &SubstageId,
        completed: bool,
    ) -> DocketResult<()> {
        self.with_case(user_id, |record| {
            record
                .substages
                .entry(substage_id.clone())
                .or_default()
                .completed = completed;
        })
    }

    fn set_entered_data(
        &self,
        user_id: &UserId,
        substage_id: &SubstageId,
        value: String,
    ) -> DocketResult<()> {
        self.with_case(user_id, |record| {
            record
                .substages
                .entry(substage_id.clone())
                .or_default()
                .entered_data = Some(value);
        })
    }

    fn append_uploaded_file(
        &self,
        user_id: &UserId,
        substage_id: &SubstageId,
        file_ref: FileRef,
    ) -> DocketResult<()> {
        self.with_case(user_id, |record| {
            record
                .substages
                .entry(substage_id.clone())
                .or_default()
                .uploaded_file_refs
                .push(file_ref);
        })
    }

    fn clear_substage_content(
        &self,
        user_id: &UserId,
        substage_id: &SubstageId,
    ) -> DocketResult<()> {
        self.with_case(user_id, |record| {
            if let Some(progress) = record.substages.get_mut(substage_id) {
                progress.entered_data = None;
                progress.uploaded_file_refs.clear();
            }
        })
    }

    fn set_stage_completed(
        &self,
        user_id: &UserId,
        stage_id: &StageId,
        completed: bool,
    ) -> DocketResult<()> {
        self.with_case(user_id, |record| {
            record.stage_completed.insert(stage_id.clone(), completed);
        })
    }

    fn set_stage_expanded(
        &self,
        user_id: &UserId,
        stage_id: &StageId,
        expanded: bool,
    ) -> DocketResult<()> {
        self.with_case(user_id, |record| {
            record.stage_expanded.insert(stage_id.clone(), expanded);
        })
    }

    fn substage_progress(
        &self,
        user_id: &UserId,
        substage_id: &SubstageId,
    ) -> DocketResult<SubstageProgress> {
        self.read_case(user_id, |record| {
            record.substages.get(substage_id).cloned().unwrap_or_default()
        })
    }

    fn stage_completed_flag(&self, user_id: &UserId, stage_id: &StageId) -> DocketResult<bool> {
        self.read_case(user_id, |record| {
            record.stage_completed.get(stage_id).copied().unwrap_or(false)
        })
    }

    fn stage_expanded(&self, user_id: &UserId, stage_id: &StageId) -> DocketResult<bool> {
        self.read_case(user_id, |record| {
            record.stage_expanded.get(stage_id).copied().unwrap_or(false)
        })
    }

    fn completed_substages(&self, user_id: &UserId) -> DocketResult<BTreeSet<SubstageId>> {
        self.read_case(user_id, |record| {
            record
                .substages
                .iter()
                .filter(|(_, p)| p.completed)
                .map(|(id, _)| id.clone())
                .collect()
        })
    }

    fn completed_stages(&self, user_id: &UserId) -> DocketResult<BTreeSet<StageId>> {
        self.read_case(user_id, |record| {
            record
                .stage_completed
                .iter()
                .filter(|(_, &done)| done)
                .map(|(id, _)| id.clone())
                .collect()
        })
    }
}

impl RewardLedger for MemoryStore {
    fn try_award(
        &self,
        user_id: &UserId,
        unit_id: UnitId,
        coins: u32,
    ) -> DocketResult<AwardResult> {
        let mut state = self.state.write().unwrap();
        let key = (*user_id, unit_id.clone());

        if state.ledger.contains_key(&key) {
            return Ok(AwardResult::already_awarded());
        }

        // Insert and credit under the same lock; a failure on either side
        // leaves both untouched.
        let wallet = state
            .wallets
            .get_mut(user_id)
            .ok_or(DocketError::Wallet(WalletError::WalletNotFound {
                user_id: *user_id,
            }))?;
        wallet.coin_balance += coins as u64;

        state.ledger.insert(
            key,
            LedgerEntry {
                entry_id: new_entry_id(),
                user_id: *user_id,
                unit_id,
                coins_awarded: coins,
                awarded_at: Utc::now(),
            },
        );

        Ok(AwardResult::granted(coins))
    }

    fn entry(&self, user_id: &UserId, unit_id: &UnitId) -> DocketResult<Option<LedgerEntry>> {
        let state = self.state.read().unwrap();
        Ok(state.ledger.get(&(*user_id, unit_id.clone())).cloned())
    }

    fn entries_for_user(&self, user_id: &UserId) -> DocketResult<Vec<LedgerEntry>> {
        let state = self.state.read().unwrap();
        let mut entries: Vec<_> = state
            .ledger
            .values()
            .filter(|e| &e.user_id == user_id)
            .cloned()
            .collect();
        // UUIDv7 entry ids sort by creation time.
        entries.sort_by(|a, b| a.entry_id.cmp(&b.entry_id));
        Ok(entries)
    }
}

impl WalletStore for MemoryStore {
    fn create_wallet(&self, user_id: UserId) -> DocketResult<Wallet> {
        let mut state = self.state.write().unwrap();
        Ok(state
            .wallets
            .entry(user_id)
            .or_insert_with(|| Wallet::new(user_id, Utc::now()))
            .clone())
    }

    fn wallet(&self, user_id: &UserId) -> DocketResult<Wallet> {
        let state = self.state.read().unwrap();
        state
            .wallets
            .get(user_id)
            .cloned()
            .ok_or(DocketError::Wallet(WalletError::WalletNotFound {
                user_id: *user_id,
            }))
    }

    fn credit(&self, user_id: &UserId, coins: u64) -> DocketResult<Wallet> {
        let mut state = self.state.write().unwrap();
        let wallet = state
            .wallets
            .get_mut(user_id)
            .ok_or(DocketError::Wallet(WalletError::WalletNotFound {
                user_id: *user_id,
            }))?;
        wallet.coin_balance += coins;
        Ok(wallet.clone())
    }

    fn debit(&self, user_id: &UserId, coins: u64) -> DocketResult<Wallet> {
        let mut state = self.state.write().unwrap();
        let wallet = state
            .wallets
            .get_mut(user_id)
            .ok_or(DocketError::Wallet(WalletError::WalletNotFound {
                user_id: *user_id,
            }))?;
        if wallet.coin_balance < coins {
            return Err(DocketError::Wallet(WalletError::InsufficientBalance {
                balance: wallet.coin_balance,
                required: coins,
            }));
        }
        wallet.coin_balance -= coins;
        Ok(wallet.clone())
    }

    fn record_claim(&self, user_id: &UserId, date: ClaimDate, streak: u32) -> DocketResult<()> {
        let mut state = self.state.write().unwrap();
        let wallet = state
            .wallets
            .get_mut(user_id)
            .ok_or(DocketError::Wallet(WalletError::WalletNotFound {
                user_id: *user_id,
            }))?;
        wallet.last_claim_date = Some(date);
        wallet.login_streak = streak;
        Ok(())
    }
}
