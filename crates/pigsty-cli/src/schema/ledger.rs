use chrono::{DateTime, Utc};
use pigsty_engine::StatisticsLedger;
use serde::{Deserialize, Serialize};

/// Persisted win/loss ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerFile {
    /// When the ledger was last written (RFC 3339)
    pub updated_at: DateTime<Utc>,
    pub ledger: StatisticsLedger,
}
