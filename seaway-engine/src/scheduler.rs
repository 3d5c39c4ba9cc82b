//! The active-voyage set and the periodic tick that publishes positions.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock, Semaphore, watch};
use tokio::task::JoinSet;
use tokio::time::{MissedTickBehavior, timeout};

use crate::advisory::GeoAdvisory;
use crate::classifier::GeoClassifier;
use crate::clock::Clock;
use crate::config::{EngineConfig, SchedulerConfig};
use crate::constants::LOG_TARGET_SCHEDULER;
use crate::geo::Coordinate;
use crate::ids::{FacilityId, VesselId};
use crate::ports::FacilityDirectory;
use crate::route::{Route, RouteCache, RouteKey, RouteSynthesizer};
use crate::store::{StoreError, VesselStore, WriteOutcome};
use crate::voyage::{VesselPositionSnapshot, Voyage, VoyageProgressor, VoyageSeed};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StartVoyageError {
    #[error("facility {0} has no known position")]
    UnknownFacility(FacilityId),
    #[error("voyage ends at {end} before it starts at {start}")]
    EndsBeforeStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("voyage for vessel {0} was replaced or stopped while its route was built")]
    Superseded(VesselId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickFailure {
    pub vessel_id: Option<VesselId>,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub at: DateTime<Utc>,
    pub processed: usize,
    pub written: usize,
    pub stale: usize,
    pub failures: Vec<TickFailure>,
    /// Results dropped because the voyage was stopped or replaced mid-tick.
    pub discarded: usize,
    pub snapshots: Vec<VesselPositionSnapshot>,
}

impl TickReport {
    const fn empty(at: DateTime<Utc>) -> Self {
        Self {
            at,
            processed: 0,
            written: 0,
            stale: 0,
            failures: Vec::new(),
            discarded: 0,
            snapshots: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct ActiveVoyage {
    voyage: Voyage,
    generation: u64,
}

/// Latest generation for a vessel with starts still building their route.
/// Entries exist only while `in_flight > 0`.
#[derive(Debug, Clone, Copy)]
struct PendingGeneration {
    latest: u64,
    in_flight: usize,
}

/// Registration of one in-flight start; dropping it releases the entry.
struct PendingStart<'a> {
    pending: &'a std::sync::Mutex<HashMap<VesselId, PendingGeneration>>,
    vessel: VesselId,
    generation: u64,
}

impl PendingStart<'_> {
    fn is_current(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&self.vessel)
            .is_some_and(|entry| entry.latest == self.generation)
    }
}

impl Drop for PendingStart<'_> {
    fn drop(&mut self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = pending.get_mut(&self.vessel) {
            entry.in_flight = entry.in_flight.saturating_sub(1);
            if entry.in_flight == 0 {
                pending.remove(&self.vessel);
            }
        }
    }
}

type WriteResult = (VesselId, u64, VesselPositionSnapshot, Result<WriteOutcome, StoreError>);

/// Owns the route cache and every active voyage.
pub struct VoyageScheduler {
    synthesizer: RouteSynthesizer,
    cache: RouteCache,
    progressor: VoyageProgressor,
    directory: Arc<dyn FacilityDirectory>,
    store: Arc<dyn VesselStore>,
    clock: Arc<dyn Clock>,
    config: SchedulerConfig,
    dwell_days: f64,
    voyages: RwLock<HashMap<VesselId, ActiveVoyage>>,
    pending: std::sync::Mutex<HashMap<VesselId, PendingGeneration>>,
    next_generation: AtomicU64,
    tick_gate: Mutex<()>,
    permits: Arc<Semaphore>,
}

impl std::fmt::Debug for VoyageScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoyageScheduler")
            .field("synthesizer", &self.synthesizer)
            .field("cache", &self.cache.stats())
            .field("clock", &self.clock)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl VoyageScheduler {
    #[must_use]
    pub fn new(
        config: &EngineConfig,
        advisory: Arc<dyn GeoAdvisory>,
        directory: Arc<dyn FacilityDirectory>,
        store: Arc<dyn VesselStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let classifier = GeoClassifier::new(advisory, &config.classifier);
        Self {
            synthesizer: RouteSynthesizer::new(classifier, config.routing.clone()),
            cache: RouteCache::new(),
            progressor: VoyageProgressor::new(config.progress.clone()),
            directory,
            store,
            clock,
            config: config.scheduler.clone(),
            dwell_days: config.progress.dwell_days,
            voyages: RwLock::new(HashMap::new()),
            pending: std::sync::Mutex::new(HashMap::new()),
            next_generation: AtomicU64::new(1),
            tick_gate: Mutex::new(()),
            permits: Arc::new(Semaphore::new(config.scheduler.workers.max(1))),
        }
    }

    #[must_use]
    pub const fn route_cache(&self) -> &RouteCache {
        &self.cache
    }

    #[must_use]
    pub const fn synthesizer(&self) -> &RouteSynthesizer {
        &self.synthesizer
    }

    fn register_start(&self, vessel: &VesselId) -> PendingStart<'_> {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = pending.entry(vessel.clone()).or_insert(PendingGeneration {
            latest: generation,
            in_flight: 0,
        });
        entry.latest = generation;
        entry.in_flight += 1;
        PendingStart {
            pending: &self.pending,
            vessel: vessel.clone(),
            generation,
        }
    }

    /// Supersede any start still building a route for `vessel`.
    fn supersede_pending(&self, vessel: &VesselId) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = pending.get_mut(vessel) {
            entry.latest = self.next_generation.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn position_of(&self, id: &FacilityId) -> Result<Coordinate, StartVoyageError> {
        self.directory
            .coordinate(id)
            .ok_or_else(|| StartVoyageError::UnknownFacility(id.clone()))
    }

    /// Build or fetch the route and make the voyage active, replacing any
    /// earlier voyage for the same vessel.
    ///
    /// # Errors
    ///
    /// Fails when a facility is unknown, the window ends before it starts,
    /// or a later start/stop for the vessel overtook this one.
    pub async fn start_voyage(&self, plan: VoyageSeed) -> Result<Voyage, StartVoyageError> {
        if plan.end_time < plan.start_time {
            return Err(StartVoyageError::EndsBeforeStart {
                start: plan.start_time,
                end: plan.end_time,
            });
        }
        let origin = self.position_of(&plan.origin_id)?;
        let destination = self.position_of(&plan.destination_id)?;
        let start = self.register_start(&plan.vessel_id);

        let key = RouteKey::new(
            plan.origin_id.clone(),
            plan.destination_id.clone(),
            plan.vessel_class,
        );
        let one_way = self
            .cache
            .get_or_build(&self.synthesizer, &key, origin, destination)
            .await;
        let route: Arc<Route> = if plan.round_trip {
            Arc::new(one_way.round_trip(self.dwell_days))
        } else {
            one_way
        };
        let voyage = Voyage::new(plan.vessel_id.clone(), route, plan.start_time, plan.end_time);

        let mut voyages = self.voyages.write().await;
        if !start.is_current() {
            log::debug!(
                target: LOG_TARGET_SCHEDULER,
                "discarding superseded start for vessel {}",
                plan.vessel_id
            );
            return Err(StartVoyageError::Superseded(plan.vessel_id));
        }
        voyages.insert(
            plan.vessel_id.clone(),
            ActiveVoyage {
                voyage: voyage.clone(),
                generation: start.generation,
            },
        );
        log::info!(
            target: LOG_TARGET_SCHEDULER,
            "vessel {} sailing {} ({} waypoints, {:.0} km, {:?})",
            plan.vessel_id,
            key,
            voyage.route.waypoints.len(),
            voyage.route.total_distance_km,
            voyage.route.source
        );
        Ok(voyage)
    }

    /// Remove a vessel's voyage. Returns whether one was active.
    pub async fn stop_voyage(&self, vessel: &VesselId) -> bool {
        self.supersede_pending(vessel);
        let removed = self.voyages.write().await.remove(vessel).is_some();
        if removed {
            log::info!(target: LOG_TARGET_SCHEDULER, "stopped voyage for vessel {vessel}");
        }
        removed
    }

    /// Repopulate the active set from the store. Seeds that cannot start are
    /// logged and skipped; returns how many voyages were started.
    ///
    /// # Errors
    ///
    /// Returns the store error when the seed list itself cannot be read.
    pub async fn seed_from_store(&self) -> Result<usize, StoreError> {
        let seeds = self.store.active_voyage_seeds().await?;
        let mut started = 0;
        for seed in seeds {
            let vessel = seed.vessel_id.clone();
            match self.start_voyage(seed).await {
                Ok(_) => started += 1,
                Err(err) => log::warn!(
                    target: LOG_TARGET_SCHEDULER,
                    "skipping stored voyage for vessel {vessel}: {err}"
                ),
            }
        }
        Ok(started)
    }

    /// Active voyages ordered by vessel id.
    pub async fn active_voyages(&self) -> Vec<Voyage> {
        let mut voyages: Vec<Voyage> = self
            .voyages
            .read()
            .await
            .values()
            .map(|active| active.voyage.clone())
            .collect();
        voyages.sort_by(|a, b| a.vessel_id.cmp(&b.vessel_id));
        voyages
    }

    pub async fn is_active(&self, vessel: &VesselId) -> bool {
        self.voyages.read().await.contains_key(vessel)
    }

    /// Tick immediately at the clock's current time.
    pub async fn force_tick(&self) -> TickReport {
        self.tick(self.clock.now()).await
    }

    /// Advance every active voyage to `now` and persist the snapshots.
    ///
    /// One vessel's failed or slow write never aborts the others.
    pub async fn tick(&self, now: DateTime<Utc>) -> TickReport {
        let _gate = self.tick_gate.lock().await;
        let work: Vec<(VesselId, u64, VesselPositionSnapshot)> = self
            .voyages
            .read()
            .await
            .iter()
            .map(|(vessel, active)| {
                let snapshot = self.progressor.advance(&active.voyage, now);
                (vessel.clone(), active.generation, snapshot)
            })
            .collect();

        let mut report = TickReport::empty(now);
        report.processed = work.len();
        if work.is_empty() {
            return report;
        }

        let budget = self.config.write_timeout();
        let budget_ms = self.config.write_timeout_ms;
        let mut writes: JoinSet<WriteResult> = JoinSet::new();
        for (vessel, generation, snapshot) in work {
            let store = Arc::clone(&self.store);
            let permits = Arc::clone(&self.permits);
            writes.spawn(async move {
                let result = match permits.acquire_owned().await {
                    Ok(_permit) => match timeout(budget, store.write_snapshot(&snapshot)).await {
                        Ok(result) => result,
                        Err(_) => Err(StoreError::Timeout {
                            vessel: vessel.clone(),
                            budget_ms,
                        }),
                    },
                    Err(_) => Err(StoreError::Unavailable("write pool closed".to_string())),
                };
                (vessel, generation, snapshot, result)
            });
        }

        let mut accepted = Vec::new();
        while let Some(joined) = writes.join_next().await {
            match joined {
                Ok((vessel, generation, snapshot, Ok(WriteOutcome::Stored))) => {
                    report.written += 1;
                    accepted.push((vessel, generation, snapshot));
                }
                Ok((vessel, _, _, Ok(WriteOutcome::Stale))) => {
                    log::debug!(
                        target: LOG_TARGET_SCHEDULER,
                        "store already holds a newer snapshot for vessel {vessel}"
                    );
                    report.stale += 1;
                }
                Ok((vessel, _, _, Err(err))) => {
                    log::warn!(
                        target: LOG_TARGET_SCHEDULER,
                        "snapshot for vessel {vessel} not written: {err}"
                    );
                    report.failures.push(TickFailure {
                        vessel_id: Some(vessel),
                        reason: err.to_string(),
                    });
                }
                Err(err) => {
                    log::warn!(target: LOG_TARGET_SCHEDULER, "snapshot write task failed: {err}");
                    report.failures.push(TickFailure {
                        vessel_id: None,
                        reason: err.to_string(),
                    });
                }
            }
        }

        {
            let mut voyages = self.voyages.write().await;
            for (vessel, generation, snapshot) in accepted {
                match voyages.get_mut(&vessel) {
                    Some(active) if active.generation == generation => {
                        active.voyage.record_tick(&snapshot);
                        report.snapshots.push(snapshot);
                    }
                    _ => report.discarded += 1,
                }
            }
        }
        report.snapshots.sort_by(|a, b| a.vessel_id.cmp(&b.vessel_id));

        log::info!(
            target: LOG_TARGET_SCHEDULER,
            "tick at {now}: {} processed, {} written, {} stale, {} failed, {} discarded",
            report.processed,
            report.written,
            report.stale,
            report.failures.len(),
            report.discarded
        );
        report
    }

    /// Tick on a fixed period until `shutdown` carries `true` or its sender
    /// is dropped. Returns the number of ticks run.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> usize {
        let mut interval = tokio::time::interval(self.config.tick_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        log::info!(
            target: LOG_TARGET_SCHEDULER,
            "scheduler running every {:?}",
            self.config.tick_interval()
        );
        let mut ticks = 0;
        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                _ = interval.tick() => {
                    self.force_tick().await;
                    ticks += 1;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
        log::info!(target: LOG_TARGET_SCHEDULER, "scheduler stopped after {ticks} ticks");
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::{AdvisoryError, NoAdvisory};
    use crate::clock::ManualClock;
    use crate::ports::PortCatalog;
    use crate::route::VesselClass;
    use crate::store::MemoryVesselStore;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap()
    }

    fn scheduler(store: Arc<MemoryVesselStore>) -> VoyageScheduler {
        VoyageScheduler::new(
            &EngineConfig::default(),
            Arc::new(NoAdvisory),
            Arc::new(PortCatalog::load_from_static()),
            store,
            Arc::new(ManualClock::new(t0())),
        )
    }

    fn plan(vessel: &str, days: i64) -> VoyageSeed {
        VoyageSeed {
            vessel_id: VesselId::from(vessel),
            origin_id: "NLRTM".into(),
            destination_id: "USNYC".into(),
            start_time: t0(),
            end_time: t0() + Duration::days(days),
            vessel_class: VesselClass::Container,
            round_trip: false,
        }
    }

    #[tokio::test]
    async fn rejects_unknown_ports_and_inverted_windows() {
        let sched = scheduler(Arc::new(MemoryVesselStore::new()));
        let mut bad_port = plan("V", 5);
        bad_port.destination_id = "XXNOP".into();
        assert_eq!(
            sched.start_voyage(bad_port).await.unwrap_err(),
            StartVoyageError::UnknownFacility("XXNOP".into())
        );
        assert!(matches!(
            sched.start_voyage(plan("V", -1)).await,
            Err(StartVoyageError::EndsBeforeStart { .. })
        ));
        assert!(sched.active_voyages().await.is_empty());
    }

    #[tokio::test]
    async fn restarting_replaces_the_voyage() {
        let sched = scheduler(Arc::new(MemoryVesselStore::new()));
        sched.start_voyage(plan("V", 5)).await.unwrap();
        sched.start_voyage(plan("V", 9)).await.unwrap();
        let active = sched.active_voyages().await;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].end_time, t0() + Duration::days(9));
        assert_eq!(sched.route_cache().len(), 1);
    }

    #[tokio::test]
    async fn stopped_voyages_are_not_ticked() {
        let store = Arc::new(MemoryVesselStore::new());
        let sched = scheduler(Arc::clone(&store));
        sched.start_voyage(plan("A", 10)).await.unwrap();
        sched.start_voyage(plan("B", 10)).await.unwrap();
        assert!(sched.stop_voyage(&VesselId::from("B")).await);
        assert!(!sched.stop_voyage(&VesselId::from("B")).await);

        let report = sched.tick(t0() + Duration::days(2)).await;
        assert_eq!(report.processed, 1);
        assert_eq!(report.written, 1);
        assert!(store.latest(&VesselId::from("B")).await.is_none());
        let a = sched.active_voyages().await;
        assert_eq!(a[0].current_day, 2);
    }

    #[tokio::test]
    async fn seeds_with_unknown_ports_are_skipped() {
        let mut broken = plan("B", 4);
        broken.origin_id = "NOWHERE".into();
        let store = Arc::new(MemoryVesselStore::with_seeds(vec![plan("A", 4), broken]));
        let sched = scheduler(store);
        assert_eq!(sched.seed_from_store().await, Ok(1));
        assert!(sched.is_active(&VesselId::from("A")).await);
    }

    #[tokio::test(start_paused = true)]
    async fn run_ticks_until_shutdown() {
        let store = Arc::new(MemoryVesselStore::with_history());
        let sched = Arc::new(scheduler(Arc::clone(&store)));
        sched.start_voyage(plan("A", 10)).await.unwrap();
        let (tx, rx) = watch::channel(false);
        let runner = {
            let sched = Arc::clone(&sched);
            tokio::spawn(async move { sched.run(rx).await })
        };
        tokio::time::sleep(std::time::Duration::from_secs(1800 * 2 + 60)).await;
        tx.send(true).unwrap();
        // Immediate first tick plus two periods.
        assert_eq!(runner.await.unwrap(), 3);
        assert_eq!(store.history(&VesselId::from("A")).await.len(), 3);
    }

    fn pending_starts(sched: &VoyageScheduler) -> usize {
        sched.pending.lock().unwrap().len()
    }

    #[tokio::test]
    async fn start_stop_churn_leaves_no_bookkeeping() {
        let sched = scheduler(Arc::new(MemoryVesselStore::new()));
        for n in 0..500 {
            let vessel = format!("MV-{n}");
            sched.start_voyage(plan(&vessel, 5)).await.unwrap();
            assert!(sched.stop_voyage(&VesselId::from(vessel.as_str())).await);
        }
        sched.stop_voyage(&VesselId::from("NEVER-STARTED")).await;
        assert!(sched.active_voyages().await.is_empty());
        assert_eq!(pending_starts(&sched), 0);
    }

    /// Route suggestions that take half a second.
    struct SlowRoutes;

    #[async_trait::async_trait]
    impl GeoAdvisory for SlowRoutes {
        async fn is_water(&self, _at: Coordinate) -> Result<bool, AdvisoryError> {
            Err(AdvisoryError::Unavailable("routes only".to_string()))
        }

        async fn suggest_route(
            &self,
            _origin: Coordinate,
            _destination: Coordinate,
            _class: VesselClass,
        ) -> Result<Option<Vec<Coordinate>>, AdvisoryError> {
            tokio::time::sleep(std::time::Duration::from_millis(500)).await;
            Ok(None)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn overtaken_starts_release_their_bookkeeping() {
        let sched = VoyageScheduler::new(
            &EngineConfig::default(),
            Arc::new(SlowRoutes),
            Arc::new(PortCatalog::load_from_static()),
            Arc::new(MemoryVesselStore::new()),
            Arc::new(ManualClock::new(t0())),
        );
        let vessel = VesselId::from("V");
        let (first, second, pending_mid_build) = tokio::join!(
            sched.start_voyage(plan("V", 5)),
            async {
                tokio::time::sleep(std::time::Duration::from_millis(100)).await;
                sched.start_voyage(plan("V", 9)).await
            },
            async {
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                pending_starts(&sched)
            }
        );
        assert_eq!(pending_mid_build, 1);
        assert_eq!(first.unwrap_err(), StartVoyageError::Superseded(vessel.clone()));
        assert_eq!(second.unwrap().end_time, t0() + Duration::days(9));
        assert!(sched.is_active(&vessel).await);
        assert_eq!(pending_starts(&sched), 0);
    }
}
