//! Generation record model.
//!
//! One record is produced per successful generation and lives in the
//! in-memory `HistoryLedger`, optionally mirrored to the `records` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single input → verse → floating-text generation.
///
/// Older front-end builds stored history as `{id, input, poetry,
/// floatingText, timestamp}`; those keys are accepted on deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRecord {
    pub id: String,
    #[serde(alias = "input")]
    pub input_text: String,
    #[serde(alias = "poetry")]
    pub display_text: String,
    #[serde(alias = "floatingText")]
    pub decoration_text: String,
    #[serde(alias = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl GenerationRecord {
    /// Build a record stamped with a time-ordered id and the current time.
    pub fn new(input_text: String, display_text: String, decoration_text: String) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            input_text,
            display_text,
            decoration_text,
            created_at: Utc::now(),
        }
    }
}
