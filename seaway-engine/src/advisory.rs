//! Optional geospatial advisory service.
//!
//! The engine never depends on an advisory answering. Every call goes through
//! [`bounded`], and any error (including a blown budget) sends the caller
//! down its deterministic path.
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::geo::Coordinate;
use crate::route::VesselClass;

/// Why an advisory answer could not be used.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdvisoryError {
    #[error("advisory unavailable: {0}")]
    Unavailable(String),
    #[error("advisory exceeded its {budget_ms} ms budget")]
    Timeout { budget_ms: u64 },
    #[error("advisory returned an unusable answer: {0}")]
    Malformed(String),
}

/// External land/water and routing oracle.
#[async_trait::async_trait]
pub trait GeoAdvisory: Send + Sync {
    /// Whether the coordinate is navigable water.
    async fn is_water(&self, at: Coordinate) -> Result<bool, AdvisoryError>;

    /// A proposed waypoint list from `origin` to `destination`. `Ok(None)`
    /// means the advisory has no opinion.
    async fn suggest_route(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
        _class: VesselClass,
    ) -> Result<Option<Vec<Coordinate>>, AdvisoryError> {
        Ok(None)
    }

    /// Short label used in logs and reports.
    fn name(&self) -> &str {
        "advisory"
    }
}

/// The absent advisory: every question is unanswerable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAdvisory;

#[async_trait::async_trait]
impl GeoAdvisory for NoAdvisory {
    async fn is_water(&self, _at: Coordinate) -> Result<bool, AdvisoryError> {
        Err(AdvisoryError::Unavailable("no advisory configured".to_string()))
    }

    fn name(&self) -> &str {
        "none"
    }
}

/// Await an advisory future for at most `budget`.
///
/// # Errors
///
/// Returns [`AdvisoryError::Timeout`] when the budget elapses, or the inner
/// error unchanged.
pub async fn bounded<T, F>(budget: Duration, call: F) -> Result<T, AdvisoryError>
where
    F: Future<Output = Result<T, AdvisoryError>>,
{
    match tokio::time::timeout(budget, call).await {
        Ok(result) => result,
        Err(_) => Err(AdvisoryError::Timeout {
            budget_ms: u64::try_from(budget.as_millis()).unwrap_or(u64::MAX),
        }),
    }
}

/// Reject advisory waypoint lists that cannot describe a route.
///
/// # Errors
///
/// Returns [`AdvisoryError::Malformed`] when fewer than two points are given.
pub fn check_suggestion(points: Vec<Coordinate>) -> Result<Vec<Coordinate>, AdvisoryError> {
    if points.len() < 2 {
        return Err(AdvisoryError::Malformed(format!(
            "route suggestion has {} point(s)",
            points.len()
        )));
    }
    Ok(points)
}
