//! Enum types for DOCKET entities

use crate::{StageId, SubstageId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Substage kind discriminator. Resolved once from the catalog; the kind
/// decides which mutations (data entry, file upload) apply to a substage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubstageKind {
    /// Requires a file to be uploaded (e.g. a signed retainer).
    UploadRequired,
    /// Requires the user to enter a piece of data (e.g. a court date).
    DataEntryRequired,
    /// Plain checkbox, nothing to attach.
    Simple,
}

/// Coarse case status, derived from which transition substages are complete.
/// Ordering matters: `Trial > Litigation > PreLitigation`, highest phase wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    PreLitigation,
    Litigation,
    Trial,
}

impl Phase {
    /// Human-readable phase name for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::PreLitigation => "Pre-Litigation",
            Phase::Litigation => "Litigation",
            Phase::Trial => "Trial",
        }
    }

    /// Icon asset name associated with the phase.
    pub fn icon_name(&self) -> &'static str {
        match self {
            Phase::PreLitigation => "phase_pre_litigation",
            Phase::Litigation => "phase_litigation",
            Phase::Trial => "phase_trial",
        }
    }

    /// Phases checked from highest to lowest when classifying.
    pub fn descending() -> [Phase; 3] {
        [Phase::Trial, Phase::Litigation, Phase::PreLitigation]
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Unit of work a ledger entry can be keyed by: a whole stage (the
/// completion bonus) or a single substage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitId {
    Stage(StageId),
    Substage(SubstageId),
}

impl UnitId {
    pub fn as_str(&self) -> &str {
        match self {
            UnitId::Stage(id) => id.as_str(),
            UnitId::Substage(id) => id.as_str(),
        }
    }
}

impl From<StageId> for UnitId {
    fn from(id: StageId) -> Self {
        UnitId::Stage(id)
    }
}

impl From<SubstageId> for UnitId {
    fn from(id: SubstageId) -> Self {
        UnitId::Substage(id)
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
