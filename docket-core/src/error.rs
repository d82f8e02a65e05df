//! Error types for DOCKET operations

use crate::{StageId, SubstageId, SubstageKind, UnitId, UserId};
use thiserror::Error;

/// Catalog lookup errors. These are local validation failures: surfaced to
/// the caller, never retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Stage not found: {id}")]
    StageNotFound { id: StageId },

    #[error("Substage not found: {id}")]
    SubstageNotFound { id: SubstageId },

    #[error("Substage {substage_id} does not belong to stage {stage_id}")]
    SubstageNotInStage {
        stage_id: StageId,
        substage_id: SubstageId,
    },
}

/// Progress store errors: a mutation that does not apply to the target
/// substage's kind, or per-user state that was never initialized.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProgressError {
    #[error("No case record for user {user_id}")]
    CaseNotFound { user_id: UserId },

    #[error("Substage {substage_id} is {kind:?}, data entry does not apply")]
    DataEntryNotSupported {
        substage_id: SubstageId,
        kind: SubstageKind,
    },

    #[error("Substage {substage_id} is {kind:?}, file upload does not apply")]
    UploadNotSupported {
        substage_id: SubstageId,
        kind: SubstageKind,
    },
}

/// Ledger errors. `ServiceUnavailable` is transient and safe to retry:
/// `try_award` is idempotent per `(user, unit)`, and the engine applies no
/// progress mutation until the ledger has answered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Award ledger unavailable: {reason}")]
    ServiceUnavailable { reason: String },

    #[error("Ledger entry not found for user {user_id}, unit {unit_id}")]
    EntryNotFound { user_id: UserId, unit_id: UnitId },
}

/// Wallet errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("Wallet not found for user {user_id}")]
    WalletNotFound { user_id: UserId },

    #[error("Insufficient balance: have {balance} coins, need {required}")]
    InsufficientBalance { balance: u64, required: u64 },

    #[error("Daily bonus already claimed on {date}")]
    AlreadyClaimedToday { date: crate::ClaimDate },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all DOCKET errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocketError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Progress error: {0}")]
    Progress(#[from] ProgressError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl DocketError {
    /// Whether a failed call may be retried verbatim. Only transient
    /// ledger unavailability qualifies; everything else is a definitive
    /// answer about current state.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DocketError::Ledger(LedgerError::ServiceUnavailable { .. })
        )
    }
}

/// Result type alias for DOCKET operations.
pub type DocketResult<T> = Result<T, DocketError>;
