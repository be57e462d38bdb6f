// In-memory scan store
//
// Each mutation does its whole read-modify-write under one write guard with
// no await point inside, so interleaved dispatches never observe the same
// pre-state.

use serde::Serialize;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Lifecycle of a mock scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Queued,
    Running,
    Completed,
}

impl ScanStatus {
    fn next(self) -> Self {
        match self {
            ScanStatus::Queued => ScanStatus::Running,
            ScanStatus::Running | ScanStatus::Completed => ScanStatus::Completed,
        }
    }
}

/// A scan owned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanRecord {
    pub id: u64,
    pub name: String,
    pub target: String,
    #[serde(rename = "type")]
    pub scan_type: String,
    pub status: ScanStatus,
    /// Unix timestamp (seconds)
    pub created: i64,
}

struct StoreState {
    scans: BTreeMap<u64, ScanRecord>,
    next_id: u64,
}

pub struct MockStore {
    state: RwLock<StoreState>,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                scans: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Insert a queued scan named `<prefix>-<id>`
    pub async fn insert_scan(
        &self,
        target: &str,
        scan_type: &str,
        name_prefix: &str,
    ) -> ScanRecord {
        let mut state = self.state.write().await;

        let id = state.next_id;
        state.next_id += 1;

        let record = ScanRecord {
            id,
            name: format!("{}-{}", name_prefix, id),
            target: target.to_string(),
            scan_type: scan_type.to_string(),
            status: ScanStatus::Queued,
            created: chrono::Utc::now().timestamp(),
        };
        state.scans.insert(id, record.clone());
        record
    }

    pub async fn get(&self, id: u64) -> Option<ScanRecord> {
        self.state.read().await.scans.get(&id).cloned()
    }

    /// Move a scan one step along its lifecycle and return the new state
    pub async fn advance_status(&self, id: u64) -> Option<ScanRecord> {
        let mut state = self.state.write().await;
        let record = state.scans.get_mut(&id)?;
        record.status = record.status.next();
        Some(record.clone())
    }

    /// All scans in id order
    pub async fn list(&self) -> Vec<ScanRecord> {
        self.state.read().await.scans.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.scans.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}
