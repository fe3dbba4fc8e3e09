use crate::domain::counter::{Counter, CounterId};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default file name prefix for exported backups
pub const DEFAULT_EXPORT_PREFIX: &str = "counters-backup";

/// Read-only copy of the collection, ready to be written out as a backup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub counters: Vec<Counter>,
    pub current_counter_id: Option<CounterId>,
    pub exported_at: DateTime<Utc>,
}

impl ExportSnapshot {
    pub fn new(counters: Vec<Counter>, current_counter_id: Option<CounterId>) -> Self {
        Self {
            counters,
            current_counter_id,
            exported_at: Utc::now(),
        }
    }

    /// Pretty-printed JSON document
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Download file name, e.g. `counters-backup-2024-01-15.json`
    pub fn file_name(&self, prefix: &str) -> String {
        format!("{}-{}.json", prefix, self.exported_at.format("%Y-%m-%d"))
    }
}
