//! Engine tuning loaded from JSON with per-field defaults.
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::constants::{
    ADVISORY_TIMEOUT_MS, COASTAL_MIDPOINT_MIN_KM, CORRIDOR_DETOUR_LIMIT, DEFAULT_DWELL_DAYS,
    DIRECT_LINE_MAX_SAMPLES, DIRECT_LINE_SAMPLE_KM, LATERAL_CURVE_FACTOR, MAX_LATERAL_OFFSET_DEG,
    OCEAN_CROSSING_THRESHOLD_KM, REGIONAL_DENSE_THRESHOLD_KM, REGIONAL_THRESHOLD_KM,
    TICK_INTERVAL_SECS, TICK_WORKERS, WRITE_TIMEOUT_MS,
};
use crate::numbers::usize_to_f64;

/// Errors raised when engine configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be at least {min:.2} (got {value:.2})")]
    MinViolation {
        field: &'static str,
        min: f64,
        value: f64,
    },
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error(
        "routing thresholds out of order: {lower} ({lower_km:.0} km) >= {upper} ({upper_km:.0} km)"
    )]
    ThresholdOrder {
        lower: &'static str,
        lower_km: f64,
        upper: &'static str,
        upper_km: f64,
    },
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

impl EngineConfig {
    /// Parse a JSON document, filling absent fields with defaults, and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineConfigLoadError`] when the JSON is malformed or a value is out of bounds.
    pub fn from_json(json: &str) -> Result<Self, EngineConfigLoadError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when any field violates the documented bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.classifier.validate()?;
        self.routing.validate()?;
        self.progress.validate()?;
        self.scheduler.validate()?;
        Ok(())
    }
}

/// Failure to turn a JSON document into a valid [`EngineConfig`].
#[derive(Debug, Error)]
pub enum EngineConfigLoadError {
    #[error("engine config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Land/water classification settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "ClassifierConfig::default_advisory_timeout_ms")]
    pub advisory_timeout_ms: u64,
}

impl ClassifierConfig {
    const fn default_advisory_timeout_ms() -> u64 {
        ADVISORY_TIMEOUT_MS
    }

    #[must_use]
    pub const fn advisory_timeout(&self) -> Duration {
        Duration::from_millis(self.advisory_timeout_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=30_000).contains(&self.advisory_timeout_ms) {
            return Err(ConfigError::RangeViolation {
                field: "classifier.advisory_timeout_ms",
                min: 1.0,
                max: 30_000.0,
                value: millis_to_f64(self.advisory_timeout_ms),
            });
        }
        Ok(())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            advisory_timeout_ms: Self::default_advisory_timeout_ms(),
        }
    }
}

/// Route synthesis thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingConfig {
    #[serde(default = "RoutingConfig::default_ocean_crossing_km")]
    pub ocean_crossing_km: f64,
    #[serde(default = "RoutingConfig::default_regional_km")]
    pub regional_km: f64,
    #[serde(default = "RoutingConfig::default_regional_dense_km")]
    pub regional_dense_km: f64,
    #[serde(default = "RoutingConfig::default_coastal_midpoint_min_km")]
    pub coastal_midpoint_min_km: f64,
    #[serde(default = "RoutingConfig::default_detour_limit")]
    pub detour_limit: f64,
    #[serde(default = "RoutingConfig::default_direct_sample_km")]
    pub direct_sample_km: f64,
    #[serde(default = "RoutingConfig::default_direct_max_samples")]
    pub direct_max_samples: usize,
    #[serde(default = "RoutingConfig::default_use_advisory_routes")]
    pub use_advisory_routes: bool,
}

impl RoutingConfig {
    const fn default_ocean_crossing_km() -> f64 {
        OCEAN_CROSSING_THRESHOLD_KM
    }

    const fn default_regional_km() -> f64 {
        REGIONAL_THRESHOLD_KM
    }

    const fn default_regional_dense_km() -> f64 {
        REGIONAL_DENSE_THRESHOLD_KM
    }

    const fn default_coastal_midpoint_min_km() -> f64 {
        COASTAL_MIDPOINT_MIN_KM
    }

    const fn default_detour_limit() -> f64 {
        CORRIDOR_DETOUR_LIMIT
    }

    const fn default_direct_sample_km() -> f64 {
        DIRECT_LINE_SAMPLE_KM
    }

    const fn default_direct_max_samples() -> usize {
        DIRECT_LINE_MAX_SAMPLES
    }

    const fn default_use_advisory_routes() -> bool {
        true
    }

    fn validate(&self) -> Result<(), ConfigError> {
        positive("routing.coastal_midpoint_min_km", self.coastal_midpoint_min_km)?;
        positive("routing.direct_sample_km", self.direct_sample_km)?;
        ordered(
            ("routing.coastal_midpoint_min_km", self.coastal_midpoint_min_km),
            ("routing.regional_km", self.regional_km),
        )?;
        ordered(
            ("routing.regional_km", self.regional_km),
            ("routing.regional_dense_km", self.regional_dense_km),
        )?;
        ordered(
            ("routing.regional_dense_km", self.regional_dense_km),
            ("routing.ocean_crossing_km", self.ocean_crossing_km),
        )?;
        if !(1.0..=10.0).contains(&self.detour_limit) {
            return Err(ConfigError::RangeViolation {
                field: "routing.detour_limit",
                min: 1.0,
                max: 10.0,
                value: self.detour_limit,
            });
        }
        if !(1..=256).contains(&self.direct_max_samples) {
            return Err(ConfigError::RangeViolation {
                field: "routing.direct_max_samples",
                min: 1.0,
                max: 256.0,
                value: usize_to_f64(self.direct_max_samples),
            });
        }
        Ok(())
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            ocean_crossing_km: Self::default_ocean_crossing_km(),
            regional_km: Self::default_regional_km(),
            regional_dense_km: Self::default_regional_dense_km(),
            coastal_midpoint_min_km: Self::default_coastal_midpoint_min_km(),
            detour_limit: Self::default_detour_limit(),
            direct_sample_km: Self::default_direct_sample_km(),
            direct_max_samples: Self::default_direct_max_samples(),
            use_advisory_routes: Self::default_use_advisory_routes(),
        }
    }
}

/// Position interpolation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressConfig {
    #[serde(default = "ProgressConfig::default_lateral_curve_factor")]
    pub lateral_curve_factor: f64,
    #[serde(default = "ProgressConfig::default_max_lateral_deg")]
    pub max_lateral_deg: f64,
    #[serde(default = "ProgressConfig::default_dwell_days")]
    pub dwell_days: f64,
}

impl ProgressConfig {
    const fn default_lateral_curve_factor() -> f64 {
        LATERAL_CURVE_FACTOR
    }

    const fn default_max_lateral_deg() -> f64 {
        MAX_LATERAL_OFFSET_DEG
    }

    const fn default_dwell_days() -> f64 {
        DEFAULT_DWELL_DAYS
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=0.5).contains(&self.lateral_curve_factor) {
            return Err(ConfigError::RangeViolation {
                field: "progress.lateral_curve_factor",
                min: 0.0,
                max: 0.5,
                value: self.lateral_curve_factor,
            });
        }
        if !(0.0..=5.0).contains(&self.max_lateral_deg) {
            return Err(ConfigError::RangeViolation {
                field: "progress.max_lateral_deg",
                min: 0.0,
                max: 5.0,
                value: self.max_lateral_deg,
            });
        }
        if !(0.0..=60.0).contains(&self.dwell_days) {
            return Err(ConfigError::RangeViolation {
                field: "progress.dwell_days",
                min: 0.0,
                max: 60.0,
                value: self.dwell_days,
            });
        }
        Ok(())
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            lateral_curve_factor: Self::default_lateral_curve_factor(),
            max_lateral_deg: Self::default_max_lateral_deg(),
            dwell_days: Self::default_dwell_days(),
        }
    }
}

/// Tick loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default = "SchedulerConfig::default_tick_interval_secs")]
    pub tick_interval_secs: u64,
    #[serde(default = "SchedulerConfig::default_workers")]
    pub workers: usize,
    #[serde(default = "SchedulerConfig::default_write_timeout_ms")]
    pub write_timeout_ms: u64,
}

impl SchedulerConfig {
    const fn default_tick_interval_secs() -> u64 {
        TICK_INTERVAL_SECS
    }

    const fn default_workers() -> usize {
        TICK_WORKERS
    }

    const fn default_write_timeout_ms() -> u64 {
        WRITE_TIMEOUT_MS
    }

    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs)
    }

    #[must_use]
    pub const fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_secs == 0 {
            return Err(ConfigError::MinViolation {
                field: "scheduler.tick_interval_secs",
                min: 1.0,
                value: 0.0,
            });
        }
        if !(1..=1_024).contains(&self.workers) {
            return Err(ConfigError::RangeViolation {
                field: "scheduler.workers",
                min: 1.0,
                max: 1_024.0,
                value: usize_to_f64(self.workers),
            });
        }
        if self.write_timeout_ms == 0 {
            return Err(ConfigError::MinViolation {
                field: "scheduler.write_timeout_ms",
                min: 1.0,
                value: 0.0,
            });
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: Self::default_tick_interval_secs(),
            workers: Self::default_workers(),
            write_timeout_ms: Self::default_write_timeout_ms(),
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::MinViolation {
            field,
            min: f64::MIN_POSITIVE,
            value,
        })
    }
}

fn ordered(lower: (&'static str, f64), upper: (&'static str, f64)) -> Result<(), ConfigError> {
    if lower.1 < upper.1 {
        Ok(())
    } else {
        Err(ConfigError::ThresholdOrder {
            lower: lower.0,
            lower_km: lower.1,
            upper: upper.0,
            upper_km: upper.1,
        })
    }
}

fn millis_to_f64(value: u64) -> f64 {
    num_traits::cast::cast::<u64, f64>(value).unwrap_or(f64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let cfg = EngineConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.scheduler.workers, 8);
        assert_eq!(cfg.classifier.advisory_timeout(), Duration::from_millis(800));
        assert_eq!(cfg.scheduler.tick_interval(), Duration::from_secs(1_800));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = EngineConfig::from_json(r#"{"scheduler": {"workers": 3}}"#).unwrap();
        assert_eq!(cfg.scheduler.workers, 3);
        assert_eq!(cfg.scheduler.write_timeout_ms, 5_000);
        assert!((cfg.routing.detour_limit - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_workers_rejected() {
        let mut cfg = EngineConfig::default();
        cfg.scheduler.workers = 0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::RangeViolation {
                field: "scheduler.workers",
                ..
            })
        ));
    }

    #[test]
    fn thresholds_must_increase() {
        let mut cfg = EngineConfig::default();
        cfg.routing.regional_km = 5_000.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ThresholdOrder { .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = EngineConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, EngineConfigLoadError::Parse(_)));
        let err = EngineConfig::from_json(r#"{"progress": {"max_lateral_deg": 9.0}}"#).unwrap_err();
        assert!(matches!(err, EngineConfigLoadError::Invalid(_)));
    }
}
