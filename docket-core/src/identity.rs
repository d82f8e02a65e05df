//! Identity types for DOCKET entities

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// User identifier using UUIDv7 for timestamp-sortable IDs.
/// UUIDv7 embeds a Unix timestamp, making IDs naturally sortable by creation time.
pub type UserId = Uuid;

/// Ledger entry identifier (UUIDv7).
pub type EntryId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Calendar date used for daily bonus claims. Timezone resolution is the
/// caller's responsibility; the engine only compares dates.
pub type ClaimDate = NaiveDate;

/// Opaque reference to an uploaded file, handed over by the upload service.
/// The engine never dereferences it.
pub type FileRef = String;

/// Generate a new UUIDv7 UserId (timestamp-sortable).
pub fn new_user_id() -> UserId {
    Uuid::now_v7()
}

/// Generate a new UUIDv7 ledger entry ID (timestamp-sortable).
pub fn new_entry_id() -> EntryId {
    Uuid::now_v7()
}

/// Stage identifier - a catalog-defined slug (e.g. "complaint-filed").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageId(pub String);

impl StageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Substage identifier - a globally unique catalog-defined slug (e.g. "cf-1").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubstageId(pub String);

impl SubstageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubstageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubstageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
