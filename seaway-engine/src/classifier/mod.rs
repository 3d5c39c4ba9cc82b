//! Land/water classification.
//!
//! Three tiers are consulted in order and the first answer wins:
//!
//! 1. continental land boxes (with carved-out lakes, gulfs and inland seas),
//! 2. open ocean and major sea boxes,
//! 3. the geospatial advisory, bounded by a short timeout, backed by a static
//!    table of marginal seas and straits when the advisory cannot answer.
//!
//! Classification never fails. The worst case is the static answer, and
//! points nothing claims are treated as land.
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::advisory::{GeoAdvisory, NoAdvisory, bounded};
use crate::config::ClassifierConfig;
use crate::constants::LOG_TARGET_CLASSIFIER;
use crate::geo::Coordinate;

pub mod regions;

pub use regions::{Continent, LandRegion, StaticEntry, WaterRegion};
use regions::{KNOWN_LAND, KNOWN_WATER, STATIC_FALLBACK};

/// Which tier produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationTier {
    KnownLand,
    KnownWater,
    Advisory,
    StaticFallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub water: bool,
    pub tier: ClassificationTier,
}

impl Classification {
    const fn new(water: bool, tier: ClassificationTier) -> Self {
        Self { water, tier }
    }
}

/// Land mass box containing `at`, honoring exclusions.
#[must_use]
pub fn known_land(at: Coordinate) -> Option<&'static LandRegion> {
    KNOWN_LAND.iter().find(|region| region.contains(at))
}

/// Ocean or sea box containing `at`.
#[must_use]
pub fn known_water(at: Coordinate) -> Option<&'static WaterRegion> {
    KNOWN_WATER.iter().find(|region| region.bounds.contains(at))
}

fn static_table(at: Coordinate) -> bool {
    STATIC_FALLBACK
        .iter()
        .find(|entry| entry.bounds.contains(at))
        .is_some_and(|entry| entry.water)
}

/// Classification from the fixed tables only; never consults an advisory.
#[must_use]
pub fn classify_static(at: Coordinate) -> Classification {
    fixed_tiers(at).unwrap_or_else(|| {
        Classification::new(static_table(at), ClassificationTier::StaticFallback)
    })
}

fn fixed_tiers(at: Coordinate) -> Option<Classification> {
    if known_land(at).is_some() {
        return Some(Classification::new(false, ClassificationTier::KnownLand));
    }
    if known_water(at).is_some() {
        return Some(Classification::new(true, ClassificationTier::KnownWater));
    }
    None
}

/// Decides whether a coordinate is navigable water.
#[derive(Clone)]
pub struct GeoClassifier {
    advisory: Arc<dyn GeoAdvisory>,
    timeout: Duration,
}

impl std::fmt::Debug for GeoClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoClassifier")
            .field("advisory", &self.advisory.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for GeoClassifier {
    fn default() -> Self {
        Self::new(Arc::new(NoAdvisory), &ClassifierConfig::default())
    }
}

impl GeoClassifier {
    #[must_use]
    pub fn new(advisory: Arc<dyn GeoAdvisory>, config: &ClassifierConfig) -> Self {
        Self {
            advisory,
            timeout: config.advisory_timeout(),
        }
    }

    #[must_use]
    pub fn advisory(&self) -> &Arc<dyn GeoAdvisory> {
        &self.advisory
    }

    #[must_use]
    pub const fn advisory_timeout(&self) -> Duration {
        self.timeout
    }

    /// Full three-tier classification.
    pub async fn classify(&self, at: Coordinate) -> Classification {
        if let Some(answer) = fixed_tiers(at) {
            return answer;
        }
        match bounded(self.timeout, self.advisory.is_water(at)).await {
            Ok(water) => Classification::new(water, ClassificationTier::Advisory),
            Err(err) => {
                log::debug!(
                    target: LOG_TARGET_CLASSIFIER,
                    "advisory '{}' could not classify {at}: {err}; using static table",
                    self.advisory.name()
                );
                Classification::new(static_table(at), ClassificationTier::StaticFallback)
            }
        }
    }

    pub async fn is_water(&self, at: Coordinate) -> bool {
        self.classify(at).await.water
    }

    #[must_use]
    pub fn classify_static(&self, at: Coordinate) -> Classification {
        classify_static(at)
    }
}
