use seaway_engine::advisory::{AdvisoryError, GeoAdvisory};
use seaway_engine::classifier::{ClassificationTier, classify_static, known_land, known_water};
use seaway_engine::{
    ClassifierConfig, Coordinate, FacilityDirectory, GeoClassifier, PortCatalog, RouteCache,
    RouteKey, RouteSource, RouteSynthesizer, RouteTier, RoutingConfig, VesselClass,
};
use std::sync::Arc;

struct AlwaysFails;

#[async_trait::async_trait]
impl GeoAdvisory for AlwaysFails {
    async fn is_water(&self, _at: Coordinate) -> Result<bool, AdvisoryError> {
        Err(AdvisoryError::Unavailable("offline".to_string()))
    }

    async fn suggest_route(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
        _class: VesselClass,
    ) -> Result<Option<Vec<Coordinate>>, AdvisoryError> {
        Err(AdvisoryError::Unavailable("offline".to_string()))
    }
}

fn synthesizer(advisory: impl GeoAdvisory + 'static) -> RouteSynthesizer {
    let classifier = GeoClassifier::new(Arc::new(advisory), &ClassifierConfig::default());
    RouteSynthesizer::new(classifier, RoutingConfig::default())
}

#[test]
fn continental_interiors_are_land_and_open_oceans_are_water() {
    let interiors = [
        (39.1, -94.6),  // Kansas City
        (-15.8, -47.9), // Brasilia
        (48.8, 2.3),    // Paris
        (9.0, 20.0),    // Chad
        (55.75, 37.6),  // Moscow
        (30.0, 100.0),  // Sichuan
        (-25.0, 134.0), // central Australia
    ];
    for (lat, lng) in interiors {
        let at = Coordinate::new(lat, lng);
        assert!(known_land(at).is_some(), "{at} should be known land");
        assert!(!classify_static(at).water);
    }
    let oceans = [(30.0, -40.0), (0.0, -140.0), (-30.0, 80.0), (-55.0, 0.0)];
    for (lat, lng) in oceans {
        let at = Coordinate::new(lat, lng);
        assert!(known_water(at).is_some(), "{at} should be known water");
        assert_eq!(classify_static(at).tier, ClassificationTier::KnownWater);
    }
}

#[tokio::test]
async fn singapore_to_the_gulf_follows_a_named_corridor() {
    let synth = synthesizer(AlwaysFails);
    let key = RouteKey::new("SG", "AE", VesselClass::Tanker);
    let origin = Coordinate::new(1.0, 103.0);
    let destination = Coordinate::new(25.0, 55.0);
    let route = synth.build_route(&key, origin, destination).await;
    assert_eq!(route.tier, RouteTier::OceanCrossing);
    assert_eq!(route.corridor.as_deref(), Some("Indian Ocean / Arabian Gulf"));
    assert!(route.waypoints.len() >= 4);
    assert_eq!(route.first_coordinate(), Some(origin));
    assert_eq!(route.last_coordinate(), Some(destination));
}

#[tokio::test]
async fn failing_advisory_still_yields_land_free_routes_between_all_ports() {
    let synth = synthesizer(AlwaysFails);
    let catalog = PortCatalog::load_from_static();
    let ports: Vec<_> = catalog.ports().iter().map(|p| p.id.clone()).collect();
    for origin_id in &ports {
        for destination_id in &ports {
            if origin_id == destination_id {
                continue;
            }
            let origin = catalog.coordinate(origin_id).unwrap();
            let destination = catalog.coordinate(destination_id).unwrap();
            let key = RouteKey::new(
                origin_id.clone(),
                destination_id.clone(),
                VesselClass::Container,
            );
            let route = synth.build_route(&key, origin, destination).await;
            assert_ne!(route.source, RouteSource::Advisory);
            assert_eq!(route.first_coordinate(), Some(origin), "{key}");
            assert_eq!(route.last_coordinate(), Some(destination), "{key}");
            let inner = &route.waypoints[1..route.waypoints.len() - 1];
            for waypoint in inner {
                assert!(
                    classify_static(waypoint.coordinate).water,
                    "{key}: {} is ashore",
                    waypoint.coordinate
                );
            }
            let offsets: Vec<f64> = route.waypoints.iter().map(|w| w.day_offset).collect();
            assert!(offsets.windows(2).all(|pair| pair[0] <= pair[1]), "{key}");
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_builds_converge_on_one_route() {
    let cache = Arc::new(RouteCache::new());
    let synth = Arc::new(synthesizer(AlwaysFails));
    let key = RouteKey::new("NLRTM", "USNYC", VesselClass::RoRo);
    let origin = Coordinate::new(51.95, 4.05);
    let destination = Coordinate::new(40.67, -74.05);

    let mut builds = tokio::task::JoinSet::new();
    for _ in 0..8 {
        let cache = Arc::clone(&cache);
        let synth = Arc::clone(&synth);
        let key = key.clone();
        builds.spawn(async move { cache.get_or_build(&synth, &key, origin, destination).await });
    }
    let mut routes = Vec::new();
    while let Some(route) = builds.join_next().await {
        routes.push(route.unwrap());
    }
    let stored = cache.get(&key).unwrap();
    assert!(routes.iter().all(|route| Arc::ptr_eq(route, &stored)));
    assert_eq!(cache.len(), 1);
    assert_eq!(stored.corridor.as_deref(), Some("Trans-Atlantic"));
}
