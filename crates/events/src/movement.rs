//! Stock movement history entries.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Storage format of [`MovementRecord::timestamp`].
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Kind of stock mutation recorded in an item's history.
///
/// Stored as a plain label. Labels written by older tooling (`RETIRER`,
/// `AJOUTER`, ...) map onto the same variants; anything unknown is kept
/// verbatim in [`MovementAction::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MovementAction {
    Create,
    Add,
    Remove,
    Adjust,
    ReserveNew,
    ReserveModify,
    ReserveDelete,
    Other(String),
}

impl MovementAction {
    /// Parse a stored label (case-insensitive, surrounding whitespace ignored).
    pub fn from_label(label: &str) -> Self {
        let upper = label.trim().to_uppercase();
        match upper.as_str() {
            "CREATE" | "CRÉATION" | "CREATION" => Self::Create,
            "ADD" | "AJOUTER" => Self::Add,
            "REMOVE" | "RETIRER" => Self::Remove,
            "ADJUST" | "AJUSTER" => Self::Adjust,
            "RESERVE_NEW" | "NOUV_RESERVATION" => Self::ReserveNew,
            "RESERVE_MODIFY" | "MODIF_RESERVATION" => Self::ReserveModify,
            "RESERVE_DELETE" | "SUPPR_RESERVATION" => Self::ReserveDelete,
            _ => Self::Other(upper),
        }
    }

    /// Canonical label written for new records.
    pub fn label(&self) -> &str {
        match self {
            Self::Create => "CREATE",
            Self::Add => "ADD",
            Self::Remove => "REMOVE",
            Self::Adjust => "ADJUST",
            Self::ReserveNew => "RESERVE_NEW",
            Self::ReserveModify => "RESERVE_MODIFY",
            Self::ReserveDelete => "RESERVE_DELETE",
            Self::Other(label) => label,
        }
    }

    /// True for actions representing stock leaving inventory.
    pub fn is_removal(&self) -> bool {
        matches!(self, Self::Remove)
    }
}

impl From<String> for MovementAction {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<MovementAction> for String {
    fn from(value: MovementAction) -> Self {
        value.label().to_string()
    }
}

impl core::fmt::Display for MovementAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of an item's append-only history.
///
/// `quantity` is the canonical imperial string produced when the movement was
/// recorded. Readers trust it and never re-validate it. `timestamp` is kept as
/// text so rows with a damaged date still load; see [`MovementRecord::occurred_at`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRecord {
    #[serde(alias = "date")]
    pub timestamp: String,
    pub action: MovementAction,
    #[serde(alias = "quantite")]
    pub quantity: String,
    #[serde(default)]
    pub note: String,
}

impl MovementRecord {
    pub fn new(
        timestamp: impl Into<String>,
        action: MovementAction,
        quantity: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            action,
            quantity: quantity.into(),
            note: note.into(),
        }
    }

    pub fn at(
        when: NaiveDateTime,
        action: MovementAction,
        quantity: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self::new(
            when.format(TIMESTAMP_FORMAT).to_string(),
            action,
            quantity,
            note,
        )
    }

    /// Parsed timestamp, or `None` when the stored text is malformed.
    ///
    /// Accepts the storage format and RFC 3339 (converted to its local wall time).
    pub fn occurred_at(&self) -> Option<NaiveDateTime> {
        let raw = self.timestamp.trim();
        NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|dt| dt.naive_local())
            })
    }
}
