//! Active voyages and the snapshots derived from them.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::ids::{FacilityId, VesselId};
use crate::numbers::{floor_f64_to_u32, i64_to_f64};
use crate::route::{Direction, Route, VesselClass};

pub mod progress;

pub use progress::VoyageProgressor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoyageStatus {
    NotStarted,
    Sailing,
    Approaching,
    Complete,
}

impl VoyageStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::Sailing => "Sailing",
            Self::Approaching => "Approaching",
            Self::Complete => "Complete",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl fmt::Display for VoyageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A vessel's assignment to a route over a time window.
#[derive(Debug, Clone)]
pub struct Voyage {
    pub vessel_id: VesselId,
    pub route: Arc<Route>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Whole days elapsed as of the last tick.
    pub current_day: u32,
    pub direction: Direction,
    pub last_update: Option<DateTime<Utc>>,
    pub round_trip: bool,
}

impl Voyage {
    #[must_use]
    pub fn new(
        vessel_id: VesselId,
        route: Arc<Route>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        let round_trip = route.is_round_trip();
        Self {
            vessel_id,
            route,
            start_time,
            end_time,
            current_day: 0,
            direction: Direction::Outbound,
            last_update: None,
            round_trip,
        }
    }

    #[must_use]
    pub fn vessel_class(&self) -> VesselClass {
        self.route.vessel_class
    }

    /// Fraction of the voyage window elapsed at `now`, clamped to `[0, 1]`.
    /// Zero-length windows count as finished.
    #[must_use]
    pub fn elapsed_fraction(&self, now: DateTime<Utc>) -> f64 {
        let total = (self.end_time - self.start_time).num_milliseconds();
        if total <= 0 {
            return if now >= self.start_time { 1.0 } else { 0.0 };
        }
        let elapsed = (now - self.start_time).num_milliseconds();
        (i64_to_f64(elapsed) / i64_to_f64(total)).clamp(0.0, 1.0)
    }

    /// Whole days between the start and `now`; zero before departure.
    #[must_use]
    pub fn elapsed_days(&self, now: DateTime<Utc>) -> u32 {
        let hours = (now - self.start_time).num_hours();
        floor_f64_to_u32(i64_to_f64(hours) / 24.0)
    }

    /// Record the outcome of a tick.
    pub fn record_tick(&mut self, snapshot: &VesselPositionSnapshot) {
        self.current_day = self.elapsed_days(snapshot.as_of);
        self.direction = snapshot.direction;
        self.last_update = Some(snapshot.as_of);
    }
}

/// Externally visible position of a vessel as of a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselPositionSnapshot {
    pub vessel_id: VesselId,
    pub lat: f64,
    pub lng: f64,
    pub status: VoyageStatus,
    pub progress_percent: f64,
    pub speed_knots: f64,
    pub direction: Direction,
    pub as_of: DateTime<Utc>,
}

/// Persisted voyage assignment used to repopulate the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoyageSeed {
    pub vessel_id: VesselId,
    pub origin_id: FacilityId,
    pub destination_id: FacilityId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub vessel_class: VesselClass,
    #[serde(default)]
    pub round_trip: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use crate::route::{RouteKey, RouteSource, RouteTier};
    use chrono::{Duration, TimeZone};

    fn voyage(days: i64) -> Voyage {
        let key = RouteKey::new("A", "B", VesselClass::GeneralCargo);
        let route = Route::from_path(
            &key,
            &[Coordinate::new(30.0, -40.0), Coordinate::new(30.0, -30.0)],
            RouteSource::Synthesized,
            RouteTier::Coastal,
            None,
        );
        let start = Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap();
        Voyage::new(
            VesselId::from("V1"),
            Arc::new(route),
            start,
            start + Duration::days(days),
        )
    }

    #[test]
    fn elapsed_fraction_clamps_to_window() {
        let v = voyage(10);
        assert!(v.elapsed_fraction(v.start_time - Duration::days(1)).abs() < f64::EPSILON);
        assert!((v.elapsed_fraction(v.start_time + Duration::days(5)) - 0.5).abs() < 1e-9);
        assert!((v.elapsed_fraction(v.end_time + Duration::days(3)) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_length_window_is_finished_at_start() {
        let v = voyage(0);
        assert!((v.elapsed_fraction(v.start_time) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn record_tick_updates_bookkeeping() {
        let mut v = voyage(10);
        let at = v.start_time + Duration::hours(80);
        let snapshot = VesselPositionSnapshot {
            vessel_id: v.vessel_id.clone(),
            lat: 30.0,
            lng: -35.0,
            status: VoyageStatus::Sailing,
            progress_percent: 33.3,
            speed_knots: 15.0,
            direction: Direction::Outbound,
            as_of: at,
        };
        v.record_tick(&snapshot);
        assert_eq!(v.current_day, 3);
        assert_eq!(v.last_update, Some(at));
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&VoyageStatus::NotStarted).unwrap(),
            r#""not_started""#
        );
        assert_eq!(VoyageStatus::NotStarted.to_string(), "Not Started");
    }
}
