//! Waypoint synthesis between two coordinates.
use crate::advisory::{bounded, check_suggestion};
use crate::classifier::GeoClassifier;
use crate::config::RoutingConfig;
use crate::constants::{
    CORRIDOR_MAX_GAP_FRACTION, CORRIDOR_MAX_GAP_KM, CORRIDOR_MIN_ANCHORS, LOG_TARGET_ROUTE,
    MIN_VALID_INTERMEDIATES,
};
use crate::geo::{Coordinate, great_circle_point, haversine_km};
use crate::numbers::{floor_f64_to_u32, usize_to_f64};

use super::corridors::{CORRIDORS, CorridorId, CorridorPlan};
use super::{Route, RouteKey, RouteSource, RouteTier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Advisory,
    Corridor,
    Regional,
    Coastal,
    GreatCircle,
    DirectLine,
}

#[derive(Debug, Clone)]
struct Candidate {
    strategy: Strategy,
    intermediates: Vec<Coordinate>,
    corridor: Option<CorridorId>,
}

impl Candidate {
    fn new(strategy: Strategy, intermediates: Vec<Coordinate>) -> Self {
        Self {
            strategy,
            intermediates,
            corridor: None,
        }
    }
}

/// Builds water-only waypoint paths. Never fails.
#[derive(Debug, Clone)]
pub struct RouteSynthesizer {
    classifier: GeoClassifier,
    config: RoutingConfig,
}

impl RouteSynthesizer {
    #[must_use]
    pub const fn new(classifier: GeoClassifier, config: RoutingConfig) -> Self {
        Self { classifier, config }
    }

    #[must_use]
    pub const fn classifier(&self) -> &GeoClassifier {
        &self.classifier
    }

    #[must_use]
    pub fn tier_for(&self, distance_km: f64) -> RouteTier {
        if distance_km > self.config.ocean_crossing_km {
            RouteTier::OceanCrossing
        } else if distance_km >= self.config.regional_km {
            RouteTier::Regional
        } else {
            RouteTier::Coastal
        }
    }

    /// Build a route from `origin` to `destination` for the key's vessel class.
    ///
    /// The first and last waypoints are exactly `origin` and `destination`;
    /// every waypoint in between classified as water when it was placed.
    pub async fn build_route(
        &self,
        key: &RouteKey,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Route {
        let direct_km = haversine_km(origin, destination);
        let tier = self.tier_for(direct_km);

        if let Some(candidate) = self.advisory_candidate(key, origin, destination).await {
            if let Some(kept) = self.validate(&candidate).await {
                return self.assemble(key, origin, destination, tier, &candidate, kept);
            }
            log::debug!(
                target: LOG_TARGET_ROUTE,
                "advisory route for {key} is degenerate; using heuristics"
            );
        }

        let primary = self.heuristic(tier, origin, destination, direct_km);
        if let Some(kept) = self.validate(&primary).await {
            return self.assemble(key, origin, destination, tier, &primary, kept);
        }
        log::debug!(
            target: LOG_TARGET_ROUTE,
            "{:?} candidate for {key} is degenerate; regenerating",
            primary.strategy
        );

        let mut chain = Vec::with_capacity(2);
        if primary.strategy != Strategy::Corridor
            && let Some(plan) = self.best_corridor(origin, destination, direct_km)
        {
            chain.push(corridor_candidate(plan));
        }
        if primary.strategy != Strategy::Regional {
            chain.push(self.regional(origin, destination, direct_km));
        }
        for candidate in chain {
            if let Some(kept) = self.validate(&candidate).await {
                return self.assemble(key, origin, destination, tier, &candidate, kept);
            }
        }

        let direct = Candidate::new(
            Strategy::DirectLine,
            self.sampled_line(origin, destination, direct_km),
        );
        let kept = self.water_only(&direct.intermediates).await;
        self.assemble(key, origin, destination, tier, &direct, kept)
    }

    async fn advisory_candidate(
        &self,
        key: &RouteKey,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Option<Candidate> {
        if !self.config.use_advisory_routes {
            return None;
        }
        let advisory = self.classifier.advisory();
        let call = advisory.suggest_route(origin, destination, key.vessel_class);
        let suggestion = match bounded(self.classifier.advisory_timeout(), call).await {
            Ok(Some(points)) => check_suggestion(points),
            Ok(None) => return None,
            Err(err) => Err(err),
        };
        match suggestion {
            Ok(points) => {
                let inner = points[1..points.len() - 1].to_vec();
                Some(Candidate::new(Strategy::Advisory, inner))
            }
            Err(err) => {
                log::debug!(
                    target: LOG_TARGET_ROUTE,
                    "advisory '{}' gave no route for {key}: {err}",
                    advisory.name()
                );
                None
            }
        }
    }

    fn heuristic(
        &self,
        tier: RouteTier,
        origin: Coordinate,
        destination: Coordinate,
        direct_km: f64,
    ) -> Candidate {
        match tier {
            RouteTier::OceanCrossing => self
                .best_corridor(origin, destination, direct_km)
                .map_or_else(
                    || {
                        Candidate::new(
                            Strategy::GreatCircle,
                            self.sampled_line(origin, destination, direct_km),
                        )
                    },
                    corridor_candidate,
                ),
            RouteTier::Regional => self.regional(origin, destination, direct_km),
            RouteTier::Coastal => {
                let intermediates = if direct_km > self.config.coastal_midpoint_min_km {
                    vec![great_circle_point(origin, destination, 0.5)]
                } else {
                    Vec::new()
                };
                Candidate::new(Strategy::Coastal, intermediates)
            }
        }
    }

    /// Shortest corridor whose anchor run stays within the detour limit and
    /// whose ends sit close enough to both endpoints.
    fn best_corridor(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        direct_km: f64,
    ) -> Option<CorridorPlan> {
        let max_gap = CORRIDOR_MAX_GAP_KM.max(direct_km * CORRIDOR_MAX_GAP_FRACTION);
        let max_path = direct_km * self.config.detour_limit;
        CORRIDORS
            .iter()
            .filter_map(|corridor| corridor.plan(origin, destination))
            .filter(|plan| {
                plan.anchors.len() >= CORRIDOR_MIN_ANCHORS
                    && plan.max_gap_km <= max_gap
                    && plan.path_km <= max_path
            })
            .min_by(|a, b| a.path_km.total_cmp(&b.path_km))
    }

    fn regional(&self, origin: Coordinate, destination: Coordinate, direct_km: f64) -> Candidate {
        let count = if direct_km > self.config.regional_dense_km {
            3
        } else {
            2
        };
        Candidate::new(Strategy::Regional, evenly_spaced(origin, destination, count))
    }

    fn sampled_line(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        direct_km: f64,
    ) -> Vec<Coordinate> {
        let segments = floor_f64_to_u32((direct_km / self.config.direct_sample_km).ceil());
        let count = usize::try_from(segments.saturating_sub(1))
            .unwrap_or(usize::MAX)
            .clamp(1, self.config.direct_max_samples);
        evenly_spaced(origin, destination, count)
    }

    async fn water_only(&self, points: &[Coordinate]) -> Vec<Coordinate> {
        let mut kept = Vec::with_capacity(points.len());
        for &point in points {
            if self.classifier.is_water(point).await {
                kept.push(point);
            }
        }
        kept
    }

    /// Water-only intermediates of a candidate, or `None` when too few survive.
    async fn validate(&self, candidate: &Candidate) -> Option<Vec<Coordinate>> {
        let kept = self.water_only(&candidate.intermediates).await;
        let proposed = candidate.intermediates.len();
        if proposed >= MIN_VALID_INTERMEDIATES && kept.len() < MIN_VALID_INTERMEDIATES {
            return None;
        }
        Some(kept)
    }

    fn assemble(
        &self,
        key: &RouteKey,
        origin: Coordinate,
        destination: Coordinate,
        tier: RouteTier,
        candidate: &Candidate,
        kept: Vec<Coordinate>,
    ) -> Route {
        let mut path = Vec::with_capacity(kept.len() + 2);
        path.push(origin);
        for point in kept {
            let duplicate = path.last().is_some_and(|last: &Coordinate| last.approx_eq(point));
            if !duplicate && !point.approx_eq(destination) {
                path.push(point);
            }
        }
        path.push(destination);

        let source = match candidate.strategy {
            Strategy::Advisory => RouteSource::Advisory,
            Strategy::DirectLine => RouteSource::Fallback,
            Strategy::Corridor | Strategy::Regional | Strategy::Coastal | Strategy::GreatCircle => {
                RouteSource::Synthesized
            }
        };
        let route = Route::from_path(
            key,
            &path,
            source,
            tier,
            candidate.corridor.map(CorridorId::label),
        );
        log::debug!(
            target: LOG_TARGET_ROUTE,
            "built {key}: {:?} via {:?}, {} waypoints, {:.0} km",
            tier,
            candidate.strategy,
            route.waypoints.len(),
            route.total_distance_km
        );
        route
    }
}

fn corridor_candidate(plan: CorridorPlan) -> Candidate {
    Candidate {
        strategy: Strategy::Corridor,
        intermediates: plan.anchors,
        corridor: Some(plan.id),
    }
}

/// `count` great-circle points strictly between the endpoints.
fn evenly_spaced(origin: Coordinate, destination: Coordinate, count: usize) -> Vec<Coordinate> {
    let denominator = usize_to_f64(count + 1);
    (1..=count)
        .map(|step| great_circle_point(origin, destination, usize_to_f64(step) / denominator))
        .collect()
}
