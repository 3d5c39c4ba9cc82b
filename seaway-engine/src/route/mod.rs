//! Routes: ordered waypoint paths between two facilities.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{HOURS_PER_DAY, KM_PER_NAUTICAL_MILE};
use crate::geo::{Coordinate, haversine_km};
use crate::ids::FacilityId;

pub mod cache;
pub mod corridors;
pub mod synth;

pub use cache::{CacheStats, RouteCache};
pub use corridors::{CORRIDORS, Corridor, CorridorId, CorridorPlan};
pub use synth::RouteSynthesizer;

/// Hull category; decides cruise speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VesselClass {
    Container,
    Tanker,
    BulkCarrier,
    GeneralCargo,
    RoRo,
}

impl VesselClass {
    pub const ALL: [Self; 5] = [
        Self::Container,
        Self::Tanker,
        Self::BulkCarrier,
        Self::GeneralCargo,
        Self::RoRo,
    ];

    #[must_use]
    pub const fn cruise_knots(self) -> f64 {
        match self {
            Self::Container => 20.0,
            Self::Tanker => 14.0,
            Self::BulkCarrier => 13.0,
            Self::GeneralCargo => 15.0,
            Self::RoRo => 18.0,
        }
    }

    /// Distance covered in one day at cruise speed.
    #[must_use]
    pub fn km_per_day(self) -> f64 {
        self.cruise_knots() * KM_PER_NAUTICAL_MILE * HOURS_PER_DAY
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Tanker => "tanker",
            Self::BulkCarrier => "bulk_carrier",
            Self::GeneralCargo => "general_cargo",
            Self::RoRo => "ro_ro",
        }
    }
}

impl fmt::Display for VesselClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown vessel class '{0}'")]
pub struct UnknownVesselClass(pub String);

impl FromStr for VesselClass {
    type Err = UnknownVesselClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "container" | "containership" => Ok(Self::Container),
            "tanker" => Ok(Self::Tanker),
            "bulkcarrier" | "bulk" => Ok(Self::BulkCarrier),
            "generalcargo" | "cargo" => Ok(Self::GeneralCargo),
            "roro" => Ok(Self::RoRo),
            _ => Err(UnknownVesselClass(s.to_string())),
        }
    }
}

/// What the segment ending at a waypoint looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegStatus {
    InPort,
    Sailing,
    Approaching,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Outbound,
    Inbound,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Outbound => "outbound",
            Self::Inbound => "inbound",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteSource {
    Synthesized,
    Advisory,
    Fallback,
}

/// Distance band that picked the synthesis strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteTier {
    OceanCrossing,
    Regional,
    Coastal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub coordinate: Coordinate,
    pub sequence_index: usize,
    /// Days from voyage start at cruise speed.
    pub day_offset: f64,
    pub leg_status: LegStatus,
    pub direction: Direction,
}

/// Cache identity of a one-way route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteKey {
    pub origin: FacilityId,
    pub destination: FacilityId,
    pub vessel_class: VesselClass,
}

impl RouteKey {
    #[must_use]
    pub fn new(
        origin: impl Into<FacilityId>,
        destination: impl Into<FacilityId>,
        vessel_class: VesselClass,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            vessel_class,
        }
    }

    #[must_use]
    pub fn touches(&self, facility: &FacilityId) -> bool {
        &self.origin == facility || &self.destination == facility
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{} [{}]", self.origin, self.destination, self.vessel_class)
    }
}

/// Immutable waypoint path. Shared through the cache as `Arc<Route>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub origin_id: FacilityId,
    pub destination_id: FacilityId,
    pub vessel_class: VesselClass,
    pub waypoints: Vec<Waypoint>,
    pub total_distance_km: f64,
    pub source: RouteSource,
    pub tier: RouteTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corridor: Option<String>,
}

impl Route {
    /// Build a one-way route over `path`, assigning day offsets and leg states.
    /// The path must already start at the origin and end at the destination.
    #[must_use]
    pub fn from_path(
        key: &RouteKey,
        path: &[Coordinate],
        source: RouteSource,
        tier: RouteTier,
        corridor: Option<&str>,
    ) -> Self {
        let km_per_day = key.vessel_class.km_per_day();
        let last = path.len().saturating_sub(1);
        let mut travelled = 0.0;
        let mut waypoints = Vec::with_capacity(path.len());
        for (idx, &coordinate) in path.iter().enumerate() {
            if idx > 0 {
                travelled += haversine_km(path[idx - 1], coordinate);
            }
            let leg_status = if idx == 0 {
                LegStatus::InPort
            } else if idx == last {
                LegStatus::Approaching
            } else {
                LegStatus::Sailing
            };
            waypoints.push(Waypoint {
                coordinate,
                sequence_index: idx,
                day_offset: travelled / km_per_day,
                leg_status,
                direction: Direction::Outbound,
            });
        }
        Self {
            origin_id: key.origin.clone(),
            destination_id: key.destination.clone(),
            vessel_class: key.vessel_class,
            waypoints,
            total_distance_km: travelled,
            source,
            tier,
            corridor: corridor.map(str::to_string),
        }
    }

    #[must_use]
    pub fn key(&self) -> RouteKey {
        RouteKey::new(
            self.origin_id.clone(),
            self.destination_id.clone(),
            self.vessel_class,
        )
    }

    /// Simulated days needed to run every waypoint, dwells included.
    #[must_use]
    pub fn total_days(&self) -> f64 {
        self.waypoints.last().map_or(0.0, |w| w.day_offset)
    }

    #[must_use]
    pub fn first_coordinate(&self) -> Option<Coordinate> {
        self.waypoints.first().map(|w| w.coordinate)
    }

    #[must_use]
    pub fn last_coordinate(&self) -> Option<Coordinate> {
        self.waypoints.last().map(|w| w.coordinate)
    }

    #[must_use]
    pub fn is_round_trip(&self) -> bool {
        self.waypoints
            .iter()
            .any(|w| w.direction == Direction::Inbound)
    }

    /// Day window `[start, arrival]` of one direction, dwell at the far end excluded.
    #[must_use]
    pub fn direction_span(&self, direction: Direction) -> Option<(f64, f64)> {
        let arrival = |dir: Direction| {
            self.waypoints
                .iter()
                .find(|w| w.direction == dir && w.leg_status == LegStatus::Approaching)
                .map(|w| w.day_offset)
        };
        let outbound_end = arrival(Direction::Outbound)?;
        match direction {
            Direction::Outbound => Some((0.0, outbound_end)),
            Direction::Inbound => arrival(Direction::Inbound).map(|end| (outbound_end, end)),
        }
    }

    /// Continuous round trip: outbound, dwell at the destination, the
    /// reversed path home, then a dwell at the origin.
    #[must_use]
    pub fn round_trip(&self, dwell_days: f64) -> Self {
        let outbound: Vec<Waypoint> = self
            .waypoints
            .iter()
            .filter(|w| w.direction == Direction::Outbound)
            .copied()
            .collect();
        let Some(arrival) = outbound.last().copied() else {
            return self.clone();
        };
        let dwell = if dwell_days.is_finite() { dwell_days.max(0.0) } else { 0.0 };
        let km_per_day = self.vessel_class.km_per_day();

        let mut waypoints = outbound.clone();
        let mut day = arrival.day_offset;
        if dwell > 0.0 {
            day += dwell;
            push_inbound(&mut waypoints, arrival.coordinate, day, LegStatus::InPort);
        }
        let mut previous = arrival.coordinate;
        let homeward: Vec<Coordinate> = outbound
            .iter()
            .rev()
            .skip(1)
            .map(|w| w.coordinate)
            .collect();
        let home_idx = homeward.len().saturating_sub(1);
        for (idx, coordinate) in homeward.into_iter().enumerate() {
            day += haversine_km(previous, coordinate) / km_per_day;
            previous = coordinate;
            let status = if idx == home_idx {
                LegStatus::Approaching
            } else {
                LegStatus::Sailing
            };
            push_inbound(&mut waypoints, coordinate, day, status);
        }
        if dwell > 0.0 {
            day += dwell;
            push_inbound(&mut waypoints, previous, day, LegStatus::InPort);
        }

        Self {
            waypoints,
            total_distance_km: self.total_distance_km * 2.0,
            ..self.clone()
        }
    }
}

fn push_inbound(
    waypoints: &mut Vec<Waypoint>,
    coordinate: Coordinate,
    day_offset: f64,
    leg_status: LegStatus,
) {
    let sequence_index = waypoints.len();
    waypoints.push(Waypoint {
        coordinate,
        sequence_index,
        day_offset,
        leg_status,
        direction: Direction::Inbound,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Route {
        let key = RouteKey::new("A", "B", VesselClass::Container);
        let path = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 5.0),
            Coordinate::new(0.0, 10.0),
        ];
        Route::from_path(&key, &path, RouteSource::Synthesized, RouteTier::Regional, None)
    }

    #[test]
    fn vessel_class_parses_loosely() {
        assert_eq!("Bulk Carrier".parse(), Ok(VesselClass::BulkCarrier));
        assert_eq!("ro-ro".parse(), Ok(VesselClass::RoRo));
        assert_eq!("CONTAINER".parse(), Ok(VesselClass::Container));
        assert!("submarine".parse::<VesselClass>().is_err());
        let json = serde_json::to_string(&VesselClass::GeneralCargo).unwrap();
        assert_eq!(json, r#""general_cargo""#);
    }

    #[test]
    fn day_offsets_follow_cruise_speed() {
        let route = sample();
        let per_day = VesselClass::Container.km_per_day();
        assert!((per_day - 888.96).abs() < 1e-9);
        let last = route.waypoints.last().unwrap();
        assert!((last.day_offset - route.total_distance_km / per_day).abs() < 1e-9);
        assert_eq!(route.waypoints[0].leg_status, LegStatus::InPort);
        assert_eq!(route.waypoints[1].leg_status, LegStatus::Sailing);
        assert_eq!(last.leg_status, LegStatus::Approaching);
    }

    #[test]
    fn round_trip_returns_home() {
        let one_way = sample();
        let trip = one_way.round_trip(2.0);
        assert!(trip.is_round_trip());
        assert_eq!(trip.waypoints.len(), 3 + 1 + 2 + 1);
        assert!(trip.last_coordinate().unwrap().approx_eq(Coordinate::new(0.0, 0.0)));
        assert!((trip.total_days() - (2.0 * one_way.total_days() + 4.0)).abs() < 1e-9);
        for (idx, w) in trip.waypoints.iter().enumerate() {
            assert_eq!(w.sequence_index, idx);
        }
        for pair in trip.waypoints.windows(2) {
            assert!(pair[1].day_offset >= pair[0].day_offset);
        }
        let (start, end) = trip.direction_span(Direction::Inbound).unwrap();
        assert!((start - one_way.total_days()).abs() < 1e-9);
        assert!((end - (2.0 * one_way.total_days() + 2.0)).abs() < 1e-9);
    }

    #[test]
    fn round_trip_without_dwell_skips_port_waypoints() {
        let trip = sample().round_trip(0.0);
        assert_eq!(trip.waypoints.len(), 5);
        assert!(trip.waypoints[3..].iter().all(|w| w.direction == Direction::Inbound));
    }

    #[test]
    fn key_touches_both_ends() {
        let key = sample().key();
        assert!(key.touches(&FacilityId::new("A")));
        assert!(key.touches(&FacilityId::new("B")));
        assert!(!key.touches(&FacilityId::new("C")));
    }
}
