//! Vessel persistence collaborator and an in-memory implementation.
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::ids::VesselId;
use crate::voyage::{VesselPositionSnapshot, VoyageSeed};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("write for vessel {vessel} exceeded {budget_ms} ms")]
    Timeout { vessel: VesselId, budget_ms: u64 },
    #[error("write for vessel {0} was rejected")]
    Rejected(VesselId),
}

/// Result of a successful write call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Stored,
    /// A snapshot with a later `as_of` was already stored; nothing changed.
    Stale,
}

#[async_trait::async_trait]
pub trait VesselStore: Send + Sync {
    /// Voyages that should be active when the scheduler starts.
    async fn active_voyage_seeds(&self) -> Result<Vec<VoyageSeed>, StoreError>;

    async fn write_snapshot(
        &self,
        snapshot: &VesselPositionSnapshot,
    ) -> Result<WriteOutcome, StoreError>;
}

#[derive(Debug, Default)]
struct VesselRecord {
    latest: Option<VesselPositionSnapshot>,
    history: Vec<VesselPositionSnapshot>,
}

/// Keeps snapshots in memory. Writes older than the stored snapshot are
/// ignored, so a late writer can never roll a vessel backwards.
#[derive(Debug, Default)]
pub struct MemoryVesselStore {
    seeds: RwLock<Vec<VoyageSeed>>,
    records: RwLock<HashMap<VesselId, VesselRecord>>,
    keep_history: bool,
}

impl MemoryVesselStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_history() -> Self {
        Self {
            keep_history: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_seeds(seeds: Vec<VoyageSeed>) -> Self {
        Self {
            seeds: RwLock::new(seeds),
            ..Self::default()
        }
    }

    pub async fn add_seed(&self, seed: VoyageSeed) {
        self.seeds.write().await.push(seed);
    }

    pub async fn latest(&self, vessel: &VesselId) -> Option<VesselPositionSnapshot> {
        self.records
            .read()
            .await
            .get(vessel)
            .and_then(|record| record.latest.clone())
    }

    /// Every accepted snapshot for `vessel`, oldest first. Empty unless the
    /// store was built with history.
    pub async fn history(&self, vessel: &VesselId) -> Vec<VesselPositionSnapshot> {
        self.records
            .read()
            .await
            .get(vessel)
            .map(|record| record.history.clone())
            .unwrap_or_default()
    }

    /// Latest snapshot of every vessel, ordered by vessel id.
    pub async fn snapshots(&self) -> Vec<VesselPositionSnapshot> {
        let records = self.records.read().await;
        let mut latest: Vec<VesselPositionSnapshot> = records
            .values()
            .filter_map(|record| record.latest.clone())
            .collect();
        latest.sort_by(|a, b| a.vessel_id.cmp(&b.vessel_id));
        latest
    }

    /// Forget a vessel entirely, seeds included.
    pub async fn remove_vessel(&self, vessel: &VesselId) -> bool {
        self.seeds.write().await.retain(|seed| &seed.vessel_id != vessel);
        self.records.write().await.remove(vessel).is_some()
    }
}

#[async_trait::async_trait]
impl VesselStore for MemoryVesselStore {
    async fn active_voyage_seeds(&self) -> Result<Vec<VoyageSeed>, StoreError> {
        Ok(self.seeds.read().await.clone())
    }

    async fn write_snapshot(
        &self,
        snapshot: &VesselPositionSnapshot,
    ) -> Result<WriteOutcome, StoreError> {
        let mut records = self.records.write().await;
        let record = records.entry(snapshot.vessel_id.clone()).or_default();
        if record
            .latest
            .as_ref()
            .is_some_and(|stored| stored.as_of > snapshot.as_of)
        {
            return Ok(WriteOutcome::Stale);
        }
        record.latest = Some(snapshot.clone());
        if self.keep_history {
            record.history.push(snapshot.clone());
        }
        Ok(WriteOutcome::Stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Direction;
    use crate::voyage::VoyageStatus;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn snapshot(vessel: &str, as_of: DateTime<Utc>, progress: f64) -> VesselPositionSnapshot {
        VesselPositionSnapshot {
            vessel_id: VesselId::from(vessel),
            lat: 0.0,
            lng: 0.0,
            status: VoyageStatus::Sailing,
            progress_percent: progress,
            speed_knots: 14.0,
            direction: Direction::Outbound,
            as_of,
        }
    }

    #[tokio::test]
    async fn stale_writes_are_ignored() {
        let store = MemoryVesselStore::with_history();
        let t0 = Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap();
        let newer = snapshot("V", t0 + Duration::minutes(30), 40.0);
        assert_eq!(
            store.write_snapshot(&newer).await,
            Ok(WriteOutcome::Stored)
        );
        assert_eq!(
            store.write_snapshot(&snapshot("V", t0, 35.0)).await,
            Ok(WriteOutcome::Stale)
        );
        let vessel = VesselId::from("V");
        assert_eq!(store.latest(&vessel).await, Some(newer));
        assert_eq!(store.history(&vessel).await.len(), 1);
    }

    #[tokio::test]
    async fn removing_a_vessel_drops_its_seed() {
        let t0 = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let seed = VoyageSeed {
            vessel_id: VesselId::from("V"),
            origin_id: "SGSIN".into(),
            destination_id: "AEJEA".into(),
            start_time: t0,
            end_time: t0 + Duration::days(8),
            vessel_class: crate::route::VesselClass::Tanker,
            round_trip: false,
        };
        let store = MemoryVesselStore::with_seeds(vec![seed]);
        store.write_snapshot(&snapshot("V", t0, 0.0)).await.unwrap();
        assert!(store.remove_vessel(&VesselId::from("V")).await);
        assert!(store.active_voyage_seeds().await.unwrap().is_empty());
        assert!(store.snapshots().await.is_empty());
    }
}
