use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use seaway_engine::advisory::{AdvisoryError, GeoAdvisory};
use seaway_engine::geo::great_circle_point;
use seaway_engine::numbers::usize_to_f64;
use seaway_engine::{Coordinate, VesselClass, classify_static};

/// Intermediate points offered along the great circle.
const SUGGESTED_POINTS: usize = 6;

/// Continental interiors offered as a deliberately bad route.
const INLAND_DETOUR: [(f64, f64); 3] = [(23.0, 10.0), (45.0, 75.0), (-10.0, -55.0)];

/// What a suggestion call hands back when it does not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Suggestion {
    NoOpinion,
    Water,
    Truncated,
    Inland,
}

/// Stand-in for a remote geospatial service: answers from the static tables,
/// but fails and stalls at seeded random. Route suggestions are sometimes
/// usable, sometimes truncated to one point, sometimes routed overland.
#[derive(Debug)]
pub struct FlakyAdvisory {
    rng: Mutex<ChaCha20Rng>,
    failure_rate: f64,
    latency: Duration,
}

impl FlakyAdvisory {
    pub fn new(seed: u64, failure_rate: f64, latency: Duration) -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::seed_from_u64(seed)),
            failure_rate: failure_rate.clamp(0.0, 1.0),
            latency,
        }
    }

    /// One roll per call: `(fails, stalls)`.
    fn roll(&self) -> (bool, bool) {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let fails = rng.gen_bool(self.failure_rate);
        let stalls = rng.gen_bool(0.5);
        (fails, stalls)
    }

    fn pick_suggestion(&self) -> Suggestion {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        match rng.gen_range(0..4) {
            0 => Suggestion::NoOpinion,
            1 => Suggestion::Water,
            2 => Suggestion::Truncated,
            _ => Suggestion::Inland,
        }
    }

    async fn answer(&self) -> Result<(), AdvisoryError> {
        let (fails, stalls) = self.roll();
        if !self.latency.is_zero() && stalls {
            tokio::time::sleep(self.latency).await;
        }
        if fails {
            return Err(AdvisoryError::Unavailable("service returned 503".to_string()));
        }
        Ok(())
    }
}

/// Great-circle points between the endpoints that the static tables call water.
fn water_path(origin: Coordinate, destination: Coordinate) -> Option<Vec<Coordinate>> {
    let steps = SUGGESTED_POINTS + 1;
    let inner: Vec<Coordinate> = (1..steps)
        .map(|i| great_circle_point(origin, destination, usize_to_f64(i) / usize_to_f64(steps)))
        .filter(|&point| classify_static(point).water)
        .collect();
    if inner.len() < 2 {
        return None;
    }
    let mut path = Vec::with_capacity(inner.len() + 2);
    path.push(origin);
    path.extend(inner);
    path.push(destination);
    Some(path)
}

#[async_trait::async_trait]
impl GeoAdvisory for FlakyAdvisory {
    async fn is_water(&self, at: Coordinate) -> Result<bool, AdvisoryError> {
        self.answer().await?;
        Ok(classify_static(at).water)
    }

    async fn suggest_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        _class: VesselClass,
    ) -> Result<Option<Vec<Coordinate>>, AdvisoryError> {
        self.answer().await?;
        let points = match self.pick_suggestion() {
            Suggestion::NoOpinion => None,
            Suggestion::Water => water_path(origin, destination),
            Suggestion::Truncated => Some(vec![origin]),
            Suggestion::Inland => {
                let mut path = vec![origin];
                path.extend(
                    INLAND_DETOUR
                        .iter()
                        .map(|&(lat, lng)| Coordinate::new(lat, lng)),
                );
                path.push(destination);
                Some(path)
            }
        };
        Ok(points)
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

/// A configured advisory whose service is down.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineAdvisory;

#[async_trait::async_trait]
impl GeoAdvisory for OfflineAdvisory {
    async fn is_water(&self, _at: Coordinate) -> Result<bool, AdvisoryError> {
        Err(AdvisoryError::Unavailable("connection refused".to_string()))
    }

    async fn suggest_route(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
        _class: VesselClass,
    ) -> Result<Option<Vec<Coordinate>>, AdvisoryError> {
        Err(AdvisoryError::Unavailable("connection refused".to_string()))
    }

    fn name(&self) -> &str {
        "offline"
    }
}
