use chrono::{DateTime, Duration, TimeZone, Utc};
use seaway_engine::advisory::{AdvisoryError, GeoAdvisory};
use seaway_engine::store::{StoreError, VesselStore, WriteOutcome};
use seaway_engine::{
    Coordinate, Direction, EngineConfig, ManualClock, MemoryVesselStore, NoAdvisory, PortCatalog,
    StartVoyageError, VesselClass, VesselId, VesselPositionSnapshot, VoyageScheduler, VoyageSeed,
    VoyageStatus,
};
use std::sync::Arc;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap()
}

fn plan(vessel: &str, origin: &str, destination: &str, days: i64) -> VoyageSeed {
    VoyageSeed {
        vessel_id: VesselId::from(vessel),
        origin_id: origin.into(),
        destination_id: destination.into(),
        start_time: t0(),
        end_time: t0() + Duration::days(days),
        vessel_class: VesselClass::Container,
        round_trip: false,
    }
}

fn scheduler_with(
    advisory: Arc<dyn GeoAdvisory>,
    store: Arc<dyn VesselStore>,
    clock: Arc<ManualClock>,
) -> VoyageScheduler {
    VoyageScheduler::new(
        &EngineConfig::default(),
        advisory,
        Arc::new(PortCatalog::load_from_static()),
        store,
        clock,
    )
}

#[tokio::test]
async fn day_five_of_ten_is_sailing_at_half_way() {
    let store = Arc::new(MemoryVesselStore::new());
    let clock = Arc::new(ManualClock::new(t0()));
    let sched = scheduler_with(Arc::new(NoAdvisory), store.clone(), clock.clone());
    sched
        .start_voyage(plan("MV-HALF", "NLRTM", "USNYC", 10))
        .await
        .unwrap();

    clock.advance(Duration::days(5));
    let report = sched.force_tick().await;
    assert_eq!(report.written, 1);

    let snapshot = store.latest(&VesselId::from("MV-HALF")).await.unwrap();
    assert_eq!(snapshot.status, VoyageStatus::Sailing);
    assert!((snapshot.progress_percent - 50.0).abs() < 0.01);
    assert_eq!(snapshot.as_of, t0() + Duration::days(5));
}

#[tokio::test]
async fn stopping_mid_voyage_freezes_the_published_position() {
    let store = Arc::new(MemoryVesselStore::new());
    let clock = Arc::new(ManualClock::new(t0() + Duration::days(2)));
    let sched = scheduler_with(Arc::new(NoAdvisory), store.clone(), clock.clone());
    let vessel = VesselId::from("MV-STOP");
    sched
        .start_voyage(plan("MV-STOP", "SGSIN", "AEJEA", 12))
        .await
        .unwrap();
    sched.force_tick().await;
    let before = store.latest(&vessel).await.unwrap();

    assert!(sched.stop_voyage(&vessel).await);
    clock.advance(Duration::days(3));
    let report = sched.force_tick().await;
    assert_eq!(report.processed, 0);
    assert_eq!(store.latest(&vessel).await, Some(before));
}

#[tokio::test]
async fn round_trips_come_home() {
    let store = Arc::new(MemoryVesselStore::with_history());
    let clock = Arc::new(ManualClock::new(t0()));
    let sched = scheduler_with(Arc::new(NoAdvisory), store.clone(), clock.clone());
    let mut seed = plan("MV-LOOP", "HKHKG", "CNSHA", 6);
    seed.round_trip = true;
    let voyage = sched.start_voyage(seed).await.unwrap();
    assert!(voyage.round_trip);

    let mut last_direction = Direction::Outbound;
    for _ in 0..12 {
        clock.advance(Duration::hours(12));
        let report = sched.force_tick().await;
        last_direction = report.snapshots[0].direction;
    }
    assert_eq!(last_direction, Direction::Inbound);
    let home = store.latest(&VesselId::from("MV-LOOP")).await.unwrap();
    assert_eq!(home.status, VoyageStatus::Complete);
    let hong_kong = Coordinate::new(22.29, 114.16);
    assert!(Coordinate::new(home.lat, home.lng).approx_eq(hong_kong));
}

#[tokio::test]
async fn round_trip_progress_only_resets_at_the_turnaround() {
    let store = Arc::new(MemoryVesselStore::with_history());
    let clock = Arc::new(ManualClock::new(t0()));
    let sched = scheduler_with(Arc::new(NoAdvisory), store.clone(), clock);
    let mut seed = plan("MV-SHUTTLE", "HKHKG", "CNSHA", 6);
    seed.round_trip = true;
    sched.start_voyage(seed).await.unwrap();

    for step in 0..=52 {
        let report = sched.tick(t0() + Duration::hours(3 * step)).await;
        assert_eq!(report.written, 1, "tick {step}");
    }

    let history = store.history(&VesselId::from("MV-SHUTTLE")).await;
    assert_eq!(history.len(), 53);
    let mut turnarounds = 0;
    for pair in history.windows(2) {
        let (before, after) = (&pair[0], &pair[1]);
        if before.direction == after.direction {
            assert!(
                after.progress_percent >= before.progress_percent,
                "progress fell from {} to {} at {}",
                before.progress_percent,
                after.progress_percent,
                after.as_of
            );
        } else {
            turnarounds += 1;
            assert_eq!(before.direction, Direction::Outbound);
            assert_eq!(after.direction, Direction::Inbound);
            assert!(after.progress_percent < before.progress_percent);
        }
    }
    assert_eq!(turnarounds, 1);
    let last = history.last().unwrap();
    assert_eq!(last.status, VoyageStatus::Complete);
    assert!((last.progress_percent - 100.0).abs() < f64::EPSILON);
}

/// Never answers a write for one vessel.
struct StallingStore {
    inner: MemoryVesselStore,
    stalled: VesselId,
}

#[async_trait::async_trait]
impl VesselStore for StallingStore {
    async fn active_voyage_seeds(&self) -> Result<Vec<VoyageSeed>, StoreError> {
        self.inner.active_voyage_seeds().await
    }

    async fn write_snapshot(
        &self,
        snapshot: &VesselPositionSnapshot,
    ) -> Result<WriteOutcome, StoreError> {
        if snapshot.vessel_id == self.stalled {
            tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        }
        self.inner.write_snapshot(snapshot).await
    }
}

#[tokio::test(start_paused = true)]
async fn a_stalled_write_times_out_without_blocking_the_fleet() {
    let store = Arc::new(StallingStore {
        inner: MemoryVesselStore::new(),
        stalled: VesselId::from("MV-SLOW"),
    });
    let clock = Arc::new(ManualClock::new(t0() + Duration::days(1)));
    let sched = scheduler_with(Arc::new(NoAdvisory), store.clone(), clock);
    for vessel in ["MV-SLOW", "MV-A", "MV-B"] {
        sched
            .start_voyage(plan(vessel, "NLRTM", "DEHAM", 3))
            .await
            .unwrap();
    }

    let report = sched.force_tick().await;
    assert_eq!(report.processed, 3);
    assert_eq!(report.written, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].vessel_id, Some(VesselId::from("MV-SLOW")));
    assert!(store.inner.latest(&VesselId::from("MV-A")).await.is_some());

    let active = sched.active_voyages().await;
    let slow = active
        .iter()
        .find(|v| v.vessel_id.as_str() == "MV-SLOW")
        .unwrap();
    assert!(slow.last_update.is_none());
    assert_eq!(active.len(), 3);
}

#[tokio::test]
async fn late_ticks_do_not_roll_vessels_backwards() {
    let store = Arc::new(MemoryVesselStore::new());
    let clock = Arc::new(ManualClock::new(t0()));
    let sched = scheduler_with(Arc::new(NoAdvisory), store.clone(), clock);
    sched
        .start_voyage(plan("MV-LATE", "SGSIN", "MYPKG", 2))
        .await
        .unwrap();

    let later = t0() + Duration::hours(30);
    sched.tick(later).await;
    let report = sched.tick(t0() + Duration::hours(6)).await;
    assert_eq!(report.stale, 1);
    assert_eq!(report.written, 0);
    let stored = store.latest(&VesselId::from("MV-LATE")).await.unwrap();
    assert_eq!(stored.as_of, later);
    let voyage = &sched.active_voyages().await[0];
    assert_eq!(voyage.last_update, Some(later));
}

/// Takes its time proposing routes so a stop can overtake the start.
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
async fn a_stop_during_route_building_wins() {
    let store = Arc::new(MemoryVesselStore::new());
    let clock = Arc::new(ManualClock::new(t0()));
    let sched = scheduler_with(Arc::new(SlowRoutes), store, clock);
    let vessel = VesselId::from("MV-RACE");

    let (started, stopped) = tokio::join!(
        sched.start_voyage(plan("MV-RACE", "NLRTM", "USNYC", 10)),
        async {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            sched.stop_voyage(&vessel).await
        }
    );
    assert!(!stopped);
    assert_eq!(started.unwrap_err(), StartVoyageError::Superseded(vessel.clone()));
    assert!(!sched.is_active(&vessel).await);
}
