//! Seaway Voyage Engine
//!
//! Simulates commercial vessels moving between ports: decides where water is,
//! synthesizes water-only routes, and periodically publishes each active
//! vessel's position to a store. No UI or transport concerns live here.

pub mod advisory;
pub mod classifier;
pub mod clock;
pub mod config;
pub mod constants;
pub mod geo;
pub mod ids;
pub mod numbers;
pub mod ports;
pub mod route;
pub mod scheduler;
pub mod store;
pub mod voyage;

// Re-export commonly used types
pub use advisory::{AdvisoryError, GeoAdvisory, NoAdvisory};
pub use classifier::{Classification, ClassificationTier, GeoClassifier, classify_static};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    ClassifierConfig, ConfigError, EngineConfig, EngineConfigLoadError, ProgressConfig,
    RoutingConfig, SchedulerConfig,
};
pub use geo::{Coordinate, InvalidCoordinate, haversine_km};
pub use ids::{FacilityId, VesselId};
pub use ports::{CatalogError, FacilityDirectory, Port, PortCatalog};
pub use route::{
    CacheStats, CorridorId, Direction, LegStatus, Route, RouteCache, RouteKey, RouteSource,
    RouteSynthesizer, RouteTier, VesselClass, Waypoint,
};
pub use scheduler::{StartVoyageError, TickFailure, TickReport, VoyageScheduler};
pub use store::{MemoryVesselStore, StoreError, VesselStore, WriteOutcome};
pub use voyage::{VesselPositionSnapshot, Voyage, VoyageProgressor, VoyageSeed, VoyageStatus};
