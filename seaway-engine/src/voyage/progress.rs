//! Position of a voyage at a point in time.
use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::f64::consts::PI;
use std::hash::Hasher;
use twox_hash::XxHash64;

use crate::classifier::classify_static;
use crate::config::ProgressConfig;
use crate::constants::EARTH_RADIUS_KM;
use crate::geo::{Coordinate, haversine_km, lateral_shift, lerp};
use crate::ids::VesselId;
use crate::numbers::clamp_percent;
use crate::route::{Direction, LegStatus, Waypoint};

use super::{VesselPositionSnapshot, Voyage, VoyageStatus};

/// Derives snapshots from voyages. Holds configuration only, so `advance`
/// is a pure function of its arguments.
#[derive(Debug, Clone, Default)]
pub struct VoyageProgressor {
    config: ProgressConfig,
}

impl VoyageProgressor {
    #[must_use]
    pub const fn new(config: ProgressConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn advance(&self, voyage: &Voyage, now: DateTime<Utc>) -> VesselPositionSnapshot {
        let route = &voyage.route;
        let waypoints = route.waypoints.as_slice();
        let origin = route.first_coordinate().unwrap_or_else(|| Coordinate::new(0.0, 0.0));
        let snapshot = |at: Coordinate, status, percent, speed, direction| VesselPositionSnapshot {
            vessel_id: voyage.vessel_id.clone(),
            lat: at.lat(),
            lng: at.lng(),
            status,
            progress_percent: percent,
            speed_knots: speed,
            direction,
            as_of: now,
        };

        if now < voyage.start_time {
            return snapshot(origin, VoyageStatus::NotStarted, 0.0, 0.0, Direction::Outbound);
        }
        if now >= voyage.end_time || waypoints.len() < 2 {
            let last = waypoints.last();
            let at = last.map_or(origin, |w| w.coordinate);
            let direction = last.map_or(Direction::Outbound, |w| w.direction);
            return snapshot(at, VoyageStatus::Complete, 100.0, 0.0, direction);
        }

        let fraction = voyage.elapsed_fraction(now);
        let day = fraction * route.total_days();
        let segment = active_segment(waypoints, day);
        let (from, to) = (waypoints[segment], waypoints[segment + 1]);
        let span = to.day_offset - from.day_offset;
        let t = if span > 0.0 {
            ((day - from.day_offset) / span).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let mut at = lerp(from.coordinate, to.coordinate, t);
        if waypoints.len() > 2 && to.leg_status != LegStatus::InPort {
            at = self.curve(&voyage.vessel_id, segment, from, to, t, at);
        }

        let status = if to.leg_status == LegStatus::Approaching {
            VoyageStatus::Approaching
        } else {
            VoyageStatus::Sailing
        };
        let speed = if to.leg_status == LegStatus::InPort {
            0.0
        } else {
            voyage.vessel_class().cruise_knots()
        };
        let direction = to.direction;
        let percent = if voyage.round_trip {
            route
                .direction_span(direction)
                .map_or(fraction * 100.0, |(lo, hi)| {
                    if hi > lo {
                        (day - lo) / (hi - lo) * 100.0
                    } else {
                        100.0
                    }
                })
        } else {
            fraction * 100.0
        };
        snapshot(at, status, clamp_percent(percent), speed, direction)
    }

    /// Sideways bow on a segment: zero at both ends, bounded, and dropped
    /// when it would land the vessel ashore.
    fn curve(
        &self,
        vessel: &VesselId,
        segment: usize,
        from: Waypoint,
        to: Waypoint,
        t: f64,
        base: Coordinate,
    ) -> Coordinate {
        let km_per_degree = EARTH_RADIUS_KM * PI / 180.0;
        let length_deg = haversine_km(from.coordinate, to.coordinate) / km_per_degree;
        let magnitude = ((PI * t).sin() * self.config.lateral_curve_factor * length_deg)
            .min(self.config.max_lateral_deg);
        if magnitude <= 0.0 {
            return base;
        }
        let offset = jitter_sign(vessel, segment) * magnitude;
        let shifted = lateral_shift(base, from.coordinate, to.coordinate, offset);
        if classify_static(shifted).water {
            shifted
        } else {
            base
        }
    }
}

/// Index of the segment whose day window contains `day`.
fn active_segment(waypoints: &[Waypoint], day: f64) -> usize {
    let last = waypoints.len().saturating_sub(2);
    waypoints
        .windows(2)
        .position(|pair| day <= pair[1].day_offset)
        .unwrap_or(last)
}

/// Stable +1/-1 per vessel and segment.
fn jitter_sign(vessel: &VesselId, segment: usize) -> f64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(vessel.as_str().as_bytes());
    hasher.write_u64(u64::try_from(segment).unwrap_or(u64::MAX));
    let mut rng = ChaCha20Rng::seed_from_u64(hasher.finish());
    if rng.gen_bool(0.5) { 1.0 } else { -1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{Route, RouteKey, RouteSource, RouteTier, VesselClass};
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).unwrap()
    }

    fn atlantic_route() -> Route {
        let key = RouteKey::new("A", "B", VesselClass::Container);
        let path = [
            Coordinate::new(35.0, -60.0),
            Coordinate::new(37.0, -50.0),
            Coordinate::new(39.0, -40.0),
            Coordinate::new(41.0, -30.0),
        ];
        Route::from_path(&key, &path, RouteSource::Synthesized, RouteTier::OceanCrossing, None)
    }

    fn voyage(route: Route, days: i64) -> Voyage {
        Voyage::new(
            VesselId::from("MV-1"),
            Arc::new(route),
            start(),
            start() + Duration::days(days),
        )
    }

    #[test]
    fn window_ends_pin_progress() {
        let progressor = VoyageProgressor::default();
        let v = voyage(atlantic_route(), 10);
        let before = progressor.advance(&v, start() - Duration::hours(1));
        assert_eq!(before.status, VoyageStatus::NotStarted);
        assert!((before.lat - 35.0).abs() < 1e-9);

        let at_start = progressor.advance(&v, start());
        assert!(at_start.progress_percent.abs() < 1e-9);

        let at_end = progressor.advance(&v, v.end_time);
        assert_eq!(at_end.status, VoyageStatus::Complete);
        assert!((at_end.progress_percent - 100.0).abs() < 1e-9);
        assert!((at_end.lng + 30.0).abs() < 1e-9);
        assert!(at_end.speed_knots.abs() < f64::EPSILON);
    }

    #[test]
    fn midway_is_sailing_at_half() {
        let progressor = VoyageProgressor::default();
        let v = voyage(atlantic_route(), 10);
        let mid = progressor.advance(&v, start() + Duration::days(5));
        assert_eq!(mid.status, VoyageStatus::Sailing);
        assert!((mid.progress_percent - 50.0).abs() < 1e-6);
        assert!((mid.speed_knots - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn final_leg_is_approaching() {
        let progressor = VoyageProgressor::default();
        let v = voyage(atlantic_route(), 10);
        let late = progressor.advance(&v, start() + Duration::hours(230));
        assert_eq!(late.status, VoyageStatus::Approaching);
    }

    #[test]
    fn advance_is_idempotent() {
        let progressor = VoyageProgressor::default();
        let v = voyage(atlantic_route(), 10);
        let now = start() + Duration::hours(101);
        assert_eq!(progressor.advance(&v, now), progressor.advance(&v, now));
    }

    #[test]
    fn lateral_offset_is_bounded() {
        let progressor = VoyageProgressor::default();
        let v = voyage(atlantic_route(), 10);
        let config = ProgressConfig::default();
        for hour in (1..240).step_by(7) {
            let now = start() + Duration::hours(hour);
            let snap = progressor.advance(&v, now);
            let fraction = v.elapsed_fraction(now);
            let day = fraction * v.route.total_days();
            let segment = active_segment(&v.route.waypoints, day);
            let (from, to) = (v.route.waypoints[segment], v.route.waypoints[segment + 1]);
            let t = (day - from.day_offset) / (to.day_offset - from.day_offset);
            let straight = lerp(from.coordinate, to.coordinate, t);
            let drift = (snap.lat - straight.lat()).hypot(snap.lng - straight.lng());
            // Longitude is stretched by 1/cos(lat) at these latitudes.
            assert!(drift <= config.max_lateral_deg * 1.5 + 1e-9, "drift {drift}");
        }
    }

    #[test]
    fn two_point_routes_stay_on_the_line() {
        let progressor = VoyageProgressor::default();
        let key = RouteKey::new("A", "B", VesselClass::Tanker);
        let route = Route::from_path(
            &key,
            &[Coordinate::new(0.0, -30.0), Coordinate::new(0.0, -20.0)],
            RouteSource::Synthesized,
            RouteTier::Regional,
            None,
        );
        let v = voyage(route, 4);
        let snap = progressor.advance(&v, start() + Duration::days(2));
        assert!(snap.lat.abs() < 1e-9);
        assert!((snap.lng + 25.0).abs() < 1e-9);
    }

    #[test]
    fn zero_duration_voyage_is_complete() {
        let progressor = VoyageProgressor::default();
        let v = voyage(atlantic_route(), 0);
        let snap = progressor.advance(&v, start());
        assert_eq!(snap.status, VoyageStatus::Complete);
    }

    #[test]
    fn round_trip_progress_resets_on_the_way_home() {
        let progressor = VoyageProgressor::default();
        let route = atlantic_route().round_trip(2.0);
        let total = route.total_days();
        let (_, outbound_end) = route.direction_span(Direction::Outbound).unwrap();
        let v = voyage(route, 20);
        let scale = |days: f64| {
            let hours = (days / total * 480.0).round();
            start() + Duration::hours(hours as i64)
        };
        let outbound = progressor.advance(&v, scale(outbound_end * 0.9));
        assert_eq!(outbound.direction, Direction::Outbound);
        assert!(outbound.progress_percent > 80.0);

        let homeward = progressor.advance(&v, scale(outbound_end + 3.0));
        assert_eq!(homeward.direction, Direction::Inbound);
        assert!(homeward.progress_percent < outbound.progress_percent);
    }

    #[test]
    fn jitter_is_stable_per_vessel_and_segment() {
        let vessel = VesselId::from("MV-1");
        assert!((jitter_sign(&vessel, 3) - jitter_sign(&vessel, 3)).abs() < f64::EPSILON);
    }
}
