use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use std::borrow::Cow;
use std::io::Write;

use seaway_engine::{
    CacheStats, Direction, FacilityId, RouteSource, RouteTier, TickReport, VesselClass, VesselId,
    VesselPositionSnapshot, Voyage, VoyageStatus,
};

#[derive(Debug, Clone, Serialize)]
pub struct VoyageSummary {
    pub vessel_id: VesselId,
    pub vessel_class: VesselClass,
    pub origin_id: FacilityId,
    pub destination_id: FacilityId,
    pub tier: RouteTier,
    pub source: RouteSource,
    pub corridor: Option<String>,
    pub waypoints: usize,
    pub distance_km: f64,
    pub round_trip: bool,
    pub status: VoyageStatus,
    pub progress_percent: f64,
    pub lat: f64,
    pub lng: f64,
    pub direction: Direction,
    pub last_update: Option<DateTime<Utc>>,
}

impl VoyageSummary {
    pub fn new(voyage: &Voyage, latest: Option<&VesselPositionSnapshot>) -> Self {
        let route = &voyage.route;
        let fallback = route.first_coordinate();
        Self {
            vessel_id: voyage.vessel_id.clone(),
            vessel_class: route.vessel_class,
            origin_id: route.origin_id.clone(),
            destination_id: route.destination_id.clone(),
            tier: route.tier,
            source: route.source,
            corridor: route.corridor.clone(),
            waypoints: route.waypoints.len(),
            distance_km: route.total_distance_km,
            round_trip: voyage.round_trip,
            status: latest.map_or(VoyageStatus::NotStarted, |s| s.status),
            progress_percent: latest.map_or(0.0, |s| s.progress_percent),
            lat: latest.map_or_else(|| fallback.map_or(0.0, |c| c.lat()), |s| s.lat),
            lng: latest.map_or_else(|| fallback.map_or(0.0, |c| c.lng()), |s| s.lng),
            direction: latest.map_or(voyage.direction, |s| s.direction),
            last_update: voyage.last_update,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub advisory: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub ticks: usize,
    pub written: usize,
    pub stale: usize,
    pub failed_writes: usize,
    pub discarded: usize,
    pub rejected_voyages: Vec<String>,
    pub cache: CacheStats,
    pub voyages: Vec<VoyageSummary>,
}

impl SimulationReport {
    pub fn new(advisory: &str, started_at: DateTime<Utc>) -> Self {
        Self {
            advisory: advisory.to_string(),
            started_at,
            finished_at: started_at,
            ticks: 0,
            written: 0,
            stale: 0,
            failed_writes: 0,
            discarded: 0,
            rejected_voyages: Vec::new(),
            cache: CacheStats::default(),
            voyages: Vec::new(),
        }
    }

    pub fn tally(&mut self, tick: &TickReport) {
        self.ticks += 1;
        self.written += tick.written;
        self.stale += tick.stale;
        self.failed_writes += tick.failures.len();
        self.discarded += tick.discarded;
        self.finished_at = tick.at;
    }

    fn count(&self, status: VoyageStatus) -> usize {
        self.voyages.iter().filter(|v| v.status == status).count()
    }
}

fn label<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

pub fn generate_console_report(out: &mut dyn Write, report: &SimulationReport) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "🚢 Fleet Simulation Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "===========================".cyan())?;
    writeln!(
        out,
        "Window: {} → {}",
        report.started_at.format("%Y-%m-%d %H:%M"),
        report.finished_at.format("%Y-%m-%d %H:%M")
    )?;
    writeln!(out, "Advisory: {}", report.advisory)?;
    writeln!(out, "Ticks: {}", report.ticks)?;
    writeln!(
        out,
        "Writes: {} stored, {} stale, {}",
        report.written,
        report.stale,
        format!("{} failed", report.failed_writes).red()
    )?;
    writeln!(
        out,
        "Route cache: {} routes, {} hits, {} misses",
        report.cache.entries, report.cache.hits, report.cache.misses
    )?;
    writeln!(
        out,
        "Voyages: {} sailing, {} approaching, {} complete, {} not started",
        report.count(VoyageStatus::Sailing),
        report.count(VoyageStatus::Approaching),
        report.count(VoyageStatus::Complete),
        report.count(VoyageStatus::NotStarted)
    )?;
    writeln!(out)?;

    for voyage in &report.voyages {
        let status = match voyage.status {
            VoyageStatus::Complete => "✅ Complete".green(),
            VoyageStatus::Approaching => "⚓ Approaching".yellow(),
            VoyageStatus::Sailing => "🌊 Sailing".blue(),
            VoyageStatus::NotStarted => "⏳ Not Started".dimmed(),
        };
        writeln!(
            out,
            "{status} {} ({})",
            voyage.vessel_id.as_str().bold(),
            label(&voyage.vessel_class)
        )?;
        writeln!(
            out,
            "   {} → {}{}: {:.0} km, {} waypoints, {}",
            voyage.origin_id,
            voyage.destination_id,
            if voyage.round_trip { " and back" } else { "" },
            voyage.distance_km,
            voyage.waypoints,
            voyage
                .corridor
                .as_deref()
                .map_or_else(|| label(&voyage.tier), |c| format!("via {c}"))
        )?;
        writeln!(
            out,
            "   {:.1}% {} at ({:.3}, {:.3})",
            voyage.progress_percent, voyage.direction, voyage.lat, voyage.lng
        )?;
    }

    if !report.rejected_voyages.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "Rejected voyages:".yellow().bold())?;
        for rejected in &report.rejected_voyages {
            writeln!(out, "  • {}", rejected.red())?;
        }
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, report: &SimulationReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, report: &SimulationReport) -> Result<()> {
    writeln!(out, "# Seaway Fleet Simulation\n")?;
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Advisory**: {}", report.advisory)?;
    writeln!(out, "- **Started**: {}", report.started_at.to_rfc3339())?;
    writeln!(out, "- **Finished**: {}", report.finished_at.to_rfc3339())?;
    writeln!(out, "- **Ticks**: {}", report.ticks)?;
    writeln!(
        out,
        "- **Writes**: {} stored, {} stale, {} failed",
        report.written, report.stale, report.failed_writes
    )?;
    writeln!(out, "- **Cached routes**: {}\n", report.cache.entries)?;

    writeln!(out, "## Voyages\n")?;
    writeln!(
        out,
        "| Vessel | Class | Route | Tier | Corridor | Status | Progress | Position |"
    )?;
    writeln!(out, "|---|---|---|---|---|---|---|---|")?;
    for voyage in &report.voyages {
        writeln!(
            out,
            "| {} | {} | {} → {} | {} | {} | {} | {:.1}% | {:.3}, {:.3} |",
            voyage.vessel_id,
            label(&voyage.vessel_class),
            voyage.origin_id,
            voyage.destination_id,
            label(&voyage.tier),
            voyage.corridor.as_deref().unwrap_or("-"),
            voyage.status,
            voyage.progress_percent,
            voyage.lat,
            voyage.lng
        )?;
    }
    if !report.rejected_voyages.is_empty() {
        writeln!(out, "\n## Rejected\n")?;
        for rejected in &report.rejected_voyages {
            writeln!(out, "- {rejected}")?;
        }
    }
    Ok(())
}

const CSV_HEADER: [&str; 14] = [
    "vessel_id",
    "vessel_class",
    "origin_id",
    "destination_id",
    "tier",
    "source",
    "corridor",
    "waypoints",
    "distance_km",
    "status",
    "progress_percent",
    "direction",
    "lat",
    "lng",
];

/// Quote a free-text CSV field when it holds a separator, quote or line break.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

pub fn generate_csv_report(out: &mut dyn Write, report: &SimulationReport) -> Result<()> {
    writeln!(out, "{}", CSV_HEADER.join(","))?;
    for voyage in &report.voyages {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{:.1},{},{:.2},{},{:.5},{:.5}",
            csv_field(voyage.vessel_id.as_str()),
            label(&voyage.vessel_class),
            csv_field(voyage.origin_id.as_str()),
            csv_field(voyage.destination_id.as_str()),
            label(&voyage.tier),
            label(&voyage.source),
            csv_field(voyage.corridor.as_deref().unwrap_or("")),
            voyage.waypoints,
            voyage.distance_km,
            label(&voyage.status),
            voyage.progress_percent,
            voyage.direction,
            voyage.lat,
            voyage.lng
        )?;
    }
    Ok(())
}
