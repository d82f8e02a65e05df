//! Core entity structures

use crate::{ClaimDate, EntryId, FileRef, Phase, StageId, SubstageId, SubstageKind, Timestamp, UnitId, UserId};
use serde::{Deserialize, Serialize};

/// Substage - smallest unit of trackable work in a case.
///
/// This is the static catalog definition; per-user completion state lives
/// in [`SubstageProgress`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substage {
    pub id: SubstageId,
    pub name: String,
    pub description: Option<String>,
    /// Coins awarded the first time this substage completes.
    pub coins: u32,
    pub kind: SubstageKind,
}

/// Stage - ordered group of substages representing one step of litigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub id: StageId,
    pub name: String,
    pub description: Option<String>,
    /// Bonus coins awarded once when every substage of the stage completes.
    pub bonus_coins: u32,
    pub substages: Vec<Substage>,
    /// Phase this stage belongs to, for phase progress reporting.
    pub phase: Phase,
}

impl Stage {
    /// Whether this stage carries no substages and is completed explicitly.
    pub fn is_empty(&self) -> bool {
        self.substages.is_empty()
    }

    pub fn substage(&self, id: &SubstageId) -> Option<&Substage> {
        self.substages.iter().find(|s| &s.id == id)
    }

    pub fn substage_ids(&self) -> impl Iterator<Item = &SubstageId> {
        self.substages.iter().map(|s| &s.id)
    }
}

/// Per-user mutable state for one substage.
///
/// `entered_data` is only meaningful for `DataEntryRequired` substages and
/// `uploaded_file_refs` only for `UploadRequired` ones; the engine enforces
/// this at mutation time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstageProgress {
    pub completed: bool,
    pub entered_data: Option<String>,
    pub uploaded_file_refs: Vec<FileRef>,
}

/// Read-model for one stage: catalog definition joined with per-user state.
/// `completed` is derived ("all substages complete"), except for stages with
/// zero substages, whose explicit flag is reported as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSnapshot {
    pub stage: Stage,
    pub completed: bool,
    pub substage_progress: Vec<(SubstageId, SubstageProgress)>,
    /// UI-state only, no business meaning.
    pub expanded: bool,
}

/// Read-model for a whole case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSnapshot {
    pub user_id: UserId,
    pub phase: Phase,
    pub stages: Vec<StageSnapshot>,
    pub coin_balance: u64,
}

/// Ledger entry - the permanent record that a unit of work paid out.
/// At most one entry ever exists per `(user_id, unit_id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub entry_id: EntryId,
    pub user_id: UserId,
    pub unit_id: UnitId,
    pub coins_awarded: u32,
    pub awarded_at: Timestamp,
}

/// Outcome of a `try_award` call.
///
/// `granted = false` means the unit had already paid out; that is an
/// expected no-op, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardResult {
    pub granted: bool,
    pub coins_granted: u32,
}

impl AwardResult {
    pub fn granted(coins: u32) -> Self {
        Self {
            granted: true,
            coins_granted: coins,
        }
    }

    pub fn already_awarded() -> Self {
        Self {
            granted: false,
            coins_granted: 0,
        }
    }
}

/// Wallet - per-user coin balance and daily-claim bookkeeping.
/// Mutated only by ledger awards and bonus operations, never directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub user_id: UserId,
    pub coin_balance: u64,
    pub login_streak: u32,
    pub last_claim_date: Option<ClaimDate>,
    pub created_at: Timestamp,
}

impl Wallet {
    pub fn new(user_id: UserId, created_at: Timestamp) -> Self {
        Self {
            user_id,
            coin_balance: 0,
            login_streak: 0,
            last_claim_date: None,
            created_at,
        }
    }
}

/// Result of a completion engine operation, shaped so the UI can tell a
/// first-time completion from an idempotent replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionOutcome {
    /// Coins actually granted by this call (0 on replay).
    pub coins_earned: u32,
    /// Whether this call tipped the enclosing stage into completion.
    pub stage_auto_completed: bool,
    /// False when the target was already complete before this call; the UI
    /// suppresses celebratory feedback on replays.
    pub newly_completed: bool,
}

/// Result of a coin-to-credit conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    pub credits_granted: u32,
    pub coins_debited: u64,
    pub remaining_balance: u64,
}
