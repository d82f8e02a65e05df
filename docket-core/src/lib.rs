//! DOCKET Core - Entity Types
//!
//! Pure data structures with no behavior. All other crates depend on this.
//! This crate contains ONLY data types - no business logic.

mod config;
mod entities;
mod enums;
mod error;
mod identity;

pub use config::RewardConfig;
pub use entities::{
    AwardResult, CaseSnapshot, CompletionOutcome, Conversion, LedgerEntry, Stage, StageSnapshot,
    Substage, SubstageProgress, Wallet,
};
pub use enums::{Phase, SubstageKind, UnitId};
pub use error::{
    CatalogError, ConfigError, DocketError, DocketResult, LedgerError, ProgressError, WalletError,
};
pub use identity::{new_entry_id, new_user_id, ClaimDate, EntryId, FileRef, Timestamp, UserId};
pub use identity::{StageId, SubstageId};
