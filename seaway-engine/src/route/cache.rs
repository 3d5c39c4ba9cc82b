//! Process-wide route memoization.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::constants::LOG_TARGET_ROUTE;
use crate::geo::Coordinate;
use crate::ids::FacilityId;

use super::synth::RouteSynthesizer;
use super::{Route, RouteKey};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Routes keyed by origin, destination and vessel class.
///
/// Concurrent builds for the same key are allowed; the first insert wins and
/// every caller receives the stored route.
#[derive(Debug, Default)]
pub struct RouteCache {
    routes: RwLock<HashMap<RouteKey, Arc<Route>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl RouteCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &RouteKey) -> Option<Arc<Route>> {
        let found = self
            .routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned();
        let counter = if found.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Cached route for `key`, building it with `synth` on a miss.
    pub async fn get_or_build(
        &self,
        synth: &RouteSynthesizer,
        key: &RouteKey,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Arc<Route> {
        if let Some(route) = self.get(key) {
            return route;
        }
        let built = synth.build_route(key, origin, destination).await;
        self.insert(built)
    }

    /// Store `route` unless its key is already present; returns the stored entry.
    pub fn insert(&self, route: Route) -> Arc<Route> {
        let key = route.key();
        let mut routes = self.routes.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(routes.entry(key).or_insert_with(|| Arc::new(route)))
    }

    pub fn invalidate(&self, key: &RouteKey) -> bool {
        self.routes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
            .is_some()
    }

    /// Drop every route touching `facility`; returns how many were removed.
    pub fn invalidate_facility(&self, facility: &FacilityId) -> usize {
        let mut routes = self.routes.write().unwrap_or_else(PoisonError::into_inner);
        let before = routes.len();
        routes.retain(|key, _| !key.touches(facility));
        let removed = before - routes.len();
        if removed > 0 {
            log::debug!(
                target: LOG_TARGET_ROUTE,
                "invalidated {removed} cached routes touching {facility}"
            );
        }
        removed
    }

    pub fn clear(&self) {
        self.routes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::GeoClassifier;
    use crate::config::RoutingConfig;
    use crate::route::{RouteSource, RouteTier, VesselClass};

    fn route(origin: &str, destination: &str) -> Route {
        let key = RouteKey::new(origin, destination, VesselClass::Tanker);
        let path = [Coordinate::new(30.0, -40.0), Coordinate::new(31.0, -39.0)];
        Route::from_path(
            &key,
            &path,
            RouteSource::Synthesized,
            RouteTier::Coastal,
            None,
        )
    }

    #[test]
    fn first_insert_wins() {
        let cache = RouteCache::new();
        let first = cache.insert(route("A", "B"));
        let mut second = route("A", "B");
        second.total_distance_km = 1.0;
        let stored = cache.insert(second);
        assert!(Arc::ptr_eq(&first, &stored));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn invalidated_key_misses_then_accepts_a_fresh_route() {
        let cache = RouteCache::new();
        let key = RouteKey::new("A", "B", VesselClass::Tanker);
        let original = cache.insert(route("A", "B"));
        cache.insert(route("B", "A"));

        assert!(cache.invalidate(&key));
        assert!(!cache.invalidate(&key));
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&key).is_none());
        assert_eq!(cache.stats().misses, 1);

        let mut rebuilt = route("A", "B");
        rebuilt.total_distance_km = 42.0;
        let stored = cache.insert(rebuilt);
        assert!(!Arc::ptr_eq(&original, &stored));
        let fetched = cache.get(&key).unwrap();
        assert!(Arc::ptr_eq(&stored, &fetched));
        assert!((fetched.total_distance_km - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn facility_invalidation_hits_both_directions() {
        let cache = RouteCache::new();
        cache.insert(route("A", "B"));
        cache.insert(route("B", "C"));
        cache.insert(route("C", "D"));
        assert_eq!(cache.invalidate_facility(&FacilityId::from("B")), 2);
        assert_eq!(cache.len(), 1);
        assert!(
            cache
                .get(&RouteKey::new("C", "D", VesselClass::Tanker))
                .is_some()
        );
    }

    #[tokio::test]
    async fn get_or_build_counts_hits_and_misses() {
        let cache = RouteCache::new();
        let synth = RouteSynthesizer::new(GeoClassifier::default(), RoutingConfig::default());
        let key = RouteKey::new("X", "Y", VesselClass::Container);
        let a = Coordinate::new(30.0, -40.0);
        let b = Coordinate::new(32.0, -38.0);
        let first = cache.get_or_build(&synth, &key, a, b).await;
        let again = cache.get_or_build(&synth, &key, a, b).await;
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(
            cache.stats(),
            CacheStats {
                entries: 1,
                hits: 1,
                misses: 1
            }
        );
        cache.clear();
        assert!(cache.is_empty());
    }
}
