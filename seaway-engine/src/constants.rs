//! Centralized physical constants and default tuning values for the engine.
//!
//! Configuration defaults in [`crate::config`] read from here so the
//! deterministic route and progress math can only drift through reviewed
//! code changes.

// Geometry -----------------------------------------------------------------
pub const EARTH_RADIUS_KM: f64 = 6_371.0;
pub const KM_PER_NAUTICAL_MILE: f64 = 1.852;
pub const HOURS_PER_DAY: f64 = 24.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;

// Coordinates considered identical when every axis differs by less than this.
pub const COORDINATE_EPSILON_DEG: f64 = 1e-9;

// Route tiers --------------------------------------------------------------
pub const OCEAN_CROSSING_THRESHOLD_KM: f64 = 3_000.0;
pub const REGIONAL_THRESHOLD_KM: f64 = 1_000.0;
pub const REGIONAL_DENSE_THRESHOLD_KM: f64 = 2_000.0;
pub const COASTAL_MIDPOINT_MIN_KM: f64 = 300.0;
pub const CORRIDOR_DETOUR_LIMIT: f64 = 2.5;
pub const CORRIDOR_MIN_ANCHORS: usize = 2;
// An endpoint may sit at most this far from its corridor: the larger of the
// absolute bound and the fraction of the direct distance.
pub const CORRIDOR_MAX_GAP_KM: f64 = 1_500.0;
pub const CORRIDOR_MAX_GAP_FRACTION: f64 = 0.3;
pub const DIRECT_LINE_SAMPLE_KM: f64 = 500.0;
pub const DIRECT_LINE_MAX_SAMPLES: usize = 24;
pub const MIN_VALID_INTERMEDIATES: usize = 2;

// Advisory -----------------------------------------------------------------
pub const ADVISORY_TIMEOUT_MS: u64 = 800;

// Progress -----------------------------------------------------------------
pub const LATERAL_CURVE_FACTOR: f64 = 0.04;
pub const MAX_LATERAL_OFFSET_DEG: f64 = 0.75;
pub const DEFAULT_DWELL_DAYS: f64 = 2.0;

// Scheduler ----------------------------------------------------------------
pub const TICK_INTERVAL_SECS: u64 = 30 * 60;
pub const TICK_WORKERS: usize = 8;
pub const WRITE_TIMEOUT_MS: u64 = 5_000;

// Logging targets ----------------------------------------------------------
pub(crate) const LOG_TARGET_CLASSIFIER: &str = "seaway::classifier";
pub(crate) const LOG_TARGET_ROUTE: &str = "seaway::route";
pub(crate) const LOG_TARGET_SCHEDULER: &str = "seaway::scheduler";
