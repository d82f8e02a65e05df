//! DOCKET Storage - Storage Traits and In-Memory Implementation
//!
//! Defines the storage abstraction layer for case progress, the reward
//! ledger, and wallets. [`MemoryStore`] is the reference implementation,
//! used by tests and single-process deployments; a server-side
//! implementation backs the same traits with a database, using a unique
//! constraint on `(user_id, unit_id)` for the ledger.
//!
//! The stores are deliberately catalog-agnostic: they record state for
//! whatever IDs they are handed. Validating that an ID exists, and that a
//! mutation applies to the substage's kind, is the engine's job.

mod memory;

pub use memory::MemoryStore;

use docket_core::{
    AwardResult, ClaimDate, DocketResult, FileRef, LedgerEntry, StageId, SubstageId,
    SubstageProgress, UnitId, UserId, Wallet,
};
use std::collections::BTreeSet;

/// Per-user case progress storage.
///
/// All operations except `init_case` fail with `ProgressError::CaseNotFound`
/// for users that never started a case.
pub trait ProgressStore: Send + Sync {
    /// Create an empty progress record for a user. Idempotent.
    fn init_case(&self, user_id: UserId) -> DocketResult<()>;

    /// Set or clear a substage's completed flag.
    fn set_substage_completed(
        &self,
        user_id: &UserId,
        substage_id: &SubstageId,
        completed: bool,
    ) -> DocketResult<()>;

    /// Store the user-entered data for a substage.
    fn set_entered_data(
        &self,
        user_id: &UserId,
        substage_id: &SubstageId,
        value: String,
    ) -> DocketResult<()>;

    /// Append an opaque uploaded-file reference to a substage.
    fn append_uploaded_file(
        &self,
        user_id: &UserId,
        substage_id: &SubstageId,
        file_ref: FileRef,
    ) -> DocketResult<()>;

    /// Clear a substage's entered data and uploaded-file references.
    /// Used by stage reversal, which is a full content reset.
    fn clear_substage_content(
        &self,
        user_id: &UserId,
        substage_id: &SubstageId,
    ) -> DocketResult<()>;

    /// Set or clear a stage's explicit completed flag. Meaningful for
    /// zero-substage stages and as the cascade marker for the stage bonus.
    fn set_stage_completed(
        &self,
        user_id: &UserId,
        stage_id: &StageId,
        completed: bool,
    ) -> DocketResult<()>;

    /// UI-state only: whether the stage is expanded in the roadmap view.
    fn set_stage_expanded(
        &self,
        user_id: &UserId,
        stage_id: &StageId,
        expanded: bool,
    ) -> DocketResult<()>;

    /// Read one substage's progress. Substages never touched report the
    /// default (incomplete, no content).
    fn substage_progress(
        &self,
        user_id: &UserId,
        substage_id: &SubstageId,
    ) -> DocketResult<SubstageProgress>;

    /// Read a stage's explicit completed flag.
    fn stage_completed_flag(&self, user_id: &UserId, stage_id: &StageId) -> DocketResult<bool>;

    /// Read a stage's expanded flag.
    fn stage_expanded(&self, user_id: &UserId, stage_id: &StageId) -> DocketResult<bool>;

    /// IDs of all substages currently marked complete.
    fn completed_substages(&self, user_id: &UserId) -> DocketResult<BTreeSet<SubstageId>>;

    /// IDs of all stages with the explicit completed flag set.
    fn completed_stages(&self, user_id: &UserId) -> DocketResult<BTreeSet<StageId>>;
}

/// The reward ledger: authoritative record of what ever paid out.
///
/// This is the anti-farming boundary. `try_award` must be atomic per
/// `(user, unit)`: insert-if-absent and the wallet credit commit together,
/// so concurrent requests for the same unit yield exactly one grant.
pub trait RewardLedger: Send + Sync {
    /// Award `coins` for a unit of work, unless that unit already paid out.
    ///
    /// A repeat award is an expected, silent no-op (`granted = false`),
    /// never an error: the UI calls completion idempotently. Transient
    /// backend failures surface as `LedgerError::ServiceUnavailable` and
    /// are safe to retry.
    fn try_award(&self, user_id: &UserId, unit_id: UnitId, coins: u32)
        -> DocketResult<AwardResult>;

    /// Read the entry for a unit, if it ever paid out.
    fn entry(&self, user_id: &UserId, unit_id: &UnitId) -> DocketResult<Option<LedgerEntry>>;

    /// All entries for a user, oldest first.
    fn entries_for_user(&self, user_id: &UserId) -> DocketResult<Vec<LedgerEntry>>;
}

/// Wallet storage. Balances change only through ledger awards and the
/// bonus/conversion operations - never by direct writes.
pub trait WalletStore: Send + Sync {
    /// Create a zeroed wallet for a user. Idempotent: an existing wallet
    /// is returned untouched.
    fn create_wallet(&self, user_id: UserId) -> DocketResult<Wallet>;

    /// Read a wallet.
    fn wallet(&self, user_id: &UserId) -> DocketResult<Wallet>;

    /// Credit coins, returning the updated wallet.
    fn credit(&self, user_id: &UserId, coins: u64) -> DocketResult<Wallet>;

    /// Debit coins, returning the updated wallet. Fails with
    /// `WalletError::InsufficientBalance` rather than going negative.
    fn debit(&self, user_id: &UserId, coins: u64) -> DocketResult<Wallet>;

    /// Record a daily bonus claim: the claim date and the new streak.
    fn record_claim(&self, user_id: &UserId, date: ClaimDate, streak: u32) -> DocketResult<()>;
}
