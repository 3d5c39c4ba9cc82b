use anyhow::{Context, Result, bail};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use seaway_engine::numbers::round_f64_to_i64;
use seaway_engine::{FacilityDirectory, FacilityId, VesselClass, VesselId, VoyageSeed};

const DEFAULT_FLEET_DATA: &str = include_str!("../assets/fleet.json");
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// One vessel assignment, timed relative to the fleet epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetEntry {
    pub vessel_id: VesselId,
    pub vessel_class: VesselClass,
    pub origin_id: FacilityId,
    pub destination_id: FacilityId,
    #[serde(default)]
    pub depart_after_hours: u32,
    pub duration_days: f64,
    #[serde(default)]
    pub round_trip: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fleet {
    /// Fixed start for simulations; real-time runs start from the wall clock.
    #[serde(default)]
    pub epoch: Option<DateTime<Utc>>,
    pub vessels: Vec<FleetEntry>,
}

impl Fleet {
    pub fn from_json(json: &str) -> Result<Self> {
        let fleet: Self = serde_json::from_str(json).context("fleet file is not valid JSON")?;
        for entry in &fleet.vessels {
            if !entry.duration_days.is_finite() || entry.duration_days < 0.0 {
                bail!(
                    "vessel {} has an invalid duration of {} days",
                    entry.vessel_id,
                    entry.duration_days
                );
            }
        }
        Ok(fleet)
    }

    pub fn load_default() -> Result<Self> {
        Self::from_json(DEFAULT_FLEET_DATA)
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Self::load_default();
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fleet {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("in {}", path.display()))
    }

    /// Concrete voyages with departures measured from `epoch`.
    pub fn seeds(&self, epoch: DateTime<Utc>) -> Vec<VoyageSeed> {
        self.vessels
            .iter()
            .map(|entry| {
                let start_time = epoch + Duration::hours(i64::from(entry.depart_after_hours));
                let sailing = round_f64_to_i64(entry.duration_days * MILLIS_PER_DAY);
                VoyageSeed {
                    vessel_id: entry.vessel_id.clone(),
                    origin_id: entry.origin_id.clone(),
                    destination_id: entry.destination_id.clone(),
                    start_time,
                    end_time: start_time + Duration::milliseconds(sailing),
                    vessel_class: entry.vessel_class,
                    round_trip: entry.round_trip,
                }
            })
            .collect()
    }

    /// Ports referenced by the fleet that `directory` cannot place.
    pub fn unknown_ports(&self, directory: &dyn FacilityDirectory) -> Vec<FacilityId> {
        let mut missing: Vec<FacilityId> = self
            .vessels
            .iter()
            .flat_map(|entry| [&entry.origin_id, &entry.destination_id])
            .filter(|id| !directory.contains(id))
            .cloned()
            .collect();
        missing.sort();
        missing.dedup();
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seaway_engine::PortCatalog;

    #[test]
    fn demo_fleet_resolves_against_bundled_ports() {
        let fleet = Fleet::load_default().unwrap();
        assert!(fleet.epoch.is_some());
        assert!(fleet.vessels.len() >= 5);
        assert!(fleet.unknown_ports(PortCatalog::default_catalog()).is_empty());
    }

    #[test]
    fn seeds_are_offset_from_the_epoch() {
        let fleet = Fleet::from_json(
            r#"{"vessels":[{"vessel_id":"V","vessel_class":"tanker","origin_id":"A",
                "destination_id":"B","depart_after_hours":6,"duration_days":1.5}]}"#,
        )
        .unwrap();
        let epoch = DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let seed = &fleet.seeds(epoch)[0];
        assert_eq!(seed.start_time - epoch, Duration::hours(6));
        assert_eq!(seed.end_time - seed.start_time, Duration::hours(36));
        assert!(!seed.round_trip);
    }

    #[test]
    fn negative_durations_are_rejected() {
        let json = r#"{"vessels":[{"vessel_id":"V","vessel_class":"tanker","origin_id":"A",
            "destination_id":"B","duration_days":-2.0}]}"#;
        assert!(Fleet::from_json(json).is_err());
    }
}
