//! DOCKET Events - Domain Events and Notification Sink
//!
//! The completion engine emits a domain event for every externally visible
//! status change. Events are consumed out of band (push notifications,
//! the other party's counsel view, analytics); delivery mechanics are not
//! part of this crate, only the contract.
//!
//! # Traits
//!
//! - `EventSink`: the notification collaborator the engine publishes to
//! - `NullSink`: discards everything (single-player deployments)
//! - `RecordingSink`: in-memory capture for tests

mod sink;

pub use sink::{EventSink, NullSink, RecordingSink};

use docket_core::{Phase, Timestamp, UnitId, UserId};
use serde::{Deserialize, Serialize};

/// A domain event describing one status change on a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseEvent {
    pub user_id: UserId,
    pub occurred_at: Timestamp,
    pub kind: CaseEventKind,
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseEventKind {
    /// A substage transitioned to complete. Not emitted on idempotent
    /// replays; `coins_earned` is what this completion actually paid.
    SubstageCompleted { unit_id: UnitId, coins_earned: u32 },
    /// Every substage of a stage is now complete (or an empty stage was
    /// completed explicitly).
    StageCompleted { unit_id: UnitId, coins_earned: u32 },
    /// The derived phase changed as a result of an engine operation.
    /// Reversal can move the phase down as well as up.
    PhaseChanged { from: Phase, to: Phase },
    /// A stage was reverted to incomplete.
    StageReverted { unit_id: UnitId },
    /// The daily login bonus was claimed.
    DailyBonusClaimed { streak: u32, coins_earned: u32 },
    /// Coins were converted to credits.
    CoinsConverted { credits: u32, coins_debited: u64 },
}

impl CaseEvent {
    pub fn new(user_id: UserId, occurred_at: Timestamp, kind: CaseEventKind) -> Self {
        Self {
            user_id,
            occurred_at,
            kind,
        }
    }
}
