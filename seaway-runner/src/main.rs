mod advisory;
mod fleet;
mod reports;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use seaway_engine::{
    Clock, EngineConfig, GeoAdvisory, ManualClock, MemoryVesselStore, NoAdvisory, PortCatalog,
    SystemClock, VoyageScheduler, VoyageSeed,
};

use advisory::{FlakyAdvisory, OfflineAdvisory};
use fleet::Fleet;
use reports::{SimulationReport, VoyageSummary};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RunMode {
    /// Fast-forward a simulated clock over the fleet and report
    Simulate,
    /// Tick in real time until Ctrl-C
    Serve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AdvisoryKind {
    /// No geospatial advisory; static tables only
    None,
    /// Seeded advisory that fails, stalls and proposes good and bad routes
    Flaky,
    /// Advisory whose service never answers
    Offline,
}

#[derive(Debug, Parser)]
#[command(name = "seaway", version = "0.1.0")]
#[command(about = "Maritime voyage simulation - synthesize routes and track a fleet over time")]
struct Args {
    /// Run mode: simulate (fast-forward) or serve (real time)
    #[arg(long, value_enum, default_value_t = RunMode::Simulate)]
    mode: RunMode,

    /// Fleet file (JSON); the built-in demo fleet is used when omitted
    #[arg(long)]
    fleet: Option<PathBuf>,

    /// Port catalog (JSON); the built-in catalog is used when omitted
    #[arg(long)]
    ports: Option<PathBuf>,

    /// Engine configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ticks to simulate (simulate mode only)
    #[arg(long, default_value_t = 96)]
    ticks: usize,

    /// Minutes between ticks; overrides the configuration
    #[arg(long)]
    tick_minutes: Option<u64>,

    /// Concurrent snapshot writes per tick; overrides the configuration
    #[arg(long)]
    workers: Option<usize>,

    /// Geospatial advisory to consult
    #[arg(long, value_enum, default_value_t = AdvisoryKind::None)]
    advisory: AdvisoryKind,

    /// Probability that a flaky advisory call fails
    #[arg(long, default_value_t = 0.3)]
    advisory_failure_rate: f64,

    /// Latency injected into roughly half of the flaky advisory calls
    #[arg(long, default_value_t = 0)]
    advisory_latency_ms: u64,

    /// Seed for the flaky advisory
    #[arg(long, default_value_t = 1337)]
    seed: u64,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console", "csv"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// List the port catalog and exit
    #[arg(long)]
    list_ports: bool,

    /// Print a line per tick
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let catalog = load_catalog(args.ports.as_deref())?;
    if maybe_list_ports(&args, &catalog)? {
        return Ok(());
    }

    let config = load_config(&args)?;
    let fleet = Fleet::load(args.fleet.as_deref())?;
    log::info!(
        "loaded {} vessels against {} ports",
        fleet.vessels.len(),
        catalog.len()
    );
    if args.report == "console" || args.output.is_some() {
        announce_banner();
    }
    for missing in fleet.unknown_ports(&catalog) {
        eprintln!("⚠️  Fleet references unknown port {}", missing.as_str().yellow());
    }

    let advisory = build_advisory(&args);
    let report = match args.mode {
        RunMode::Simulate => simulate(&args, &config, &fleet, catalog, advisory).await?,
        RunMode::Serve => serve(&config, &fleet, catalog, advisory).await?,
    };
    write_report(&args, &report)
}

fn load_catalog(path: Option<&Path>) -> Result<PortCatalog> {
    let Some(path) = path else {
        return Ok(PortCatalog::load_from_static());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read ports {}", path.display()))?;
    PortCatalog::from_json(&json)
        .with_context(|| format!("invalid port catalog {}", path.display()))
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            EngineConfig::from_json(&json)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    if let Some(minutes) = args.tick_minutes {
        config.scheduler.tick_interval_secs = minutes.saturating_mul(60);
    }
    if let Some(workers) = args.workers {
        config.scheduler.workers = workers;
    }
    config
        .validate()
        .context("configuration rejected after command-line overrides")?;
    Ok(config)
}

fn maybe_list_ports(args: &Args, catalog: &PortCatalog) -> Result<bool> {
    if !args.list_ports {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available ports:")?;
    for port in catalog.ports() {
        writeln!(
            output_target.writer(),
            "  {:7} {:25} {:3} ({:8.3}, {:8.3})",
            port.id.as_str(),
            port.name,
            port.country,
            port.lat,
            port.lng
        )?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🚢 Seaway Voyage Simulator".bright_cyan().bold());
    println!("{}", "==========================".cyan());
}

fn build_advisory(args: &Args) -> Arc<dyn GeoAdvisory> {
    match args.advisory {
        AdvisoryKind::None => Arc::new(NoAdvisory),
        AdvisoryKind::Offline => Arc::new(OfflineAdvisory),
        AdvisoryKind::Flaky => Arc::new(FlakyAdvisory::new(
            args.seed,
            args.advisory_failure_rate,
            Duration::from_millis(args.advisory_latency_ms),
        )),
    }
}

fn describe(seed: &VoyageSeed) -> String {
    format!("{} ({} → {})", seed.vessel_id, seed.origin_id, seed.destination_id)
}

async fn start_fleet(
    scheduler: &VoyageScheduler,
    seeds: &[VoyageSeed],
    report: &mut SimulationReport,
) -> Result<()> {
    let started = scheduler
        .seed_from_store()
        .await
        .context("could not read voyages from the store")?;
    for seed in seeds {
        if !scheduler.is_active(&seed.vessel_id).await {
            report.rejected_voyages.push(describe(seed));
        }
    }
    log::info!("{started} of {} voyages under way", seeds.len());
    Ok(())
}

async fn summarize(
    scheduler: &VoyageScheduler,
    store: &MemoryVesselStore,
    report: &mut SimulationReport,
) {
    for voyage in scheduler.active_voyages().await {
        let latest = store.latest(&voyage.vessel_id).await;
        report.voyages.push(VoyageSummary::new(&voyage, latest.as_ref()));
    }
    report.cache = scheduler.route_cache().stats();
}

async fn simulate(
    args: &Args,
    config: &EngineConfig,
    fleet: &Fleet,
    catalog: PortCatalog,
    advisory: Arc<dyn GeoAdvisory>,
) -> Result<SimulationReport> {
    let epoch = fleet.epoch.unwrap_or_else(Utc::now);
    let seeds = fleet.seeds(epoch);
    let clock = Arc::new(ManualClock::new(epoch));
    let store = Arc::new(MemoryVesselStore::with_seeds(seeds.clone()));
    let mut report = SimulationReport::new(advisory.name(), epoch);
    let scheduler = VoyageScheduler::new(
        config,
        advisory,
        Arc::new(catalog),
        store.clone(),
        clock.clone(),
    );
    start_fleet(&scheduler, &seeds, &mut report).await?;

    let step = chrono::Duration::from_std(config.scheduler.tick_interval())
        .context("tick interval does not fit a calendar duration")?;
    for n in 1..=args.ticks {
        clock.advance(step);
        let tick = scheduler.force_tick().await;
        if args.verbose {
            println!(
                "🕐 tick {n:>4} @ {}: {} written, {} failed",
                tick.at.format("%Y-%m-%d %H:%M"),
                tick.written,
                tick.failures.len()
            );
        }
        report.tally(&tick);
    }

    summarize(&scheduler, &store, &mut report).await;
    Ok(report)
}

async fn serve(
    config: &EngineConfig,
    fleet: &Fleet,
    catalog: PortCatalog,
    advisory: Arc<dyn GeoAdvisory>,
) -> Result<SimulationReport> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let epoch: DateTime<Utc> = clock.now();
    let seeds = fleet.seeds(epoch);
    let store = Arc::new(MemoryVesselStore::with_seeds(seeds.clone()));
    let mut report = SimulationReport::new(advisory.name(), epoch);
    let scheduler = Arc::new(VoyageScheduler::new(
        config,
        advisory,
        Arc::new(catalog),
        store.clone(),
        Arc::clone(&clock),
    ));
    start_fleet(&scheduler, &seeds, &mut report).await?;

    println!(
        "{}",
        format!(
            "⏱️  Ticking every {:?}; press Ctrl-C to stop",
            config.scheduler.tick_interval()
        )
        .bright_blue()
    );
    let (shutdown, signal) = watch::channel(false);
    let runner = {
        let scheduler = Arc::clone(&scheduler);
        tokio::spawn(async move { scheduler.run(signal).await })
    };
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    shutdown.send(true).ok();
    report.ticks = runner.await.context("scheduler task failed")?;
    report.finished_at = clock.now();

    summarize(&scheduler, &store, &mut report).await;
    Ok(report)
}

fn write_report(args: &Args, report: &SimulationReport) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, report)?,
        "markdown" => reports::generate_markdown_report(&mut output_target, report)?,
        "csv" => reports::generate_csv_report(&mut output_target, report)?,
        _ => reports::generate_console_report(&mut output_target, report)?,
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
