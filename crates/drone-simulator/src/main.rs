//! Drone Fleet Simulator CLI
//!
//! Runs a delivery scenario tick by tick and prints the execution report.

use anyhow::{Context, Result, ensure};
use chrono::Utc;
use clap::Parser;
use drone_domain::FleetReport;
use drone_persistence::{DroneRepository, InMemoryDroneRepository};
use drone_simulator::{FleetSimulator, SimulationConfig};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "drone-simulator")]
#[command(about = "Simulate a drone delivery fleet")]
struct Args {
    /// Number of drones (overrides SIM_DRONES)
    #[arg(short, long)]
    drones: Option<usize>,

    /// Number of deliveries (overrides SIM_DELIVERIES)
    #[arg(short = 'n', long)]
    deliveries: Option<usize>,

    /// RNG seed (overrides SIM_SEED)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Tick limit (overrides SIM_MAX_TICKS)
    #[arg(long)]
    max_ticks: Option<u32>,

    /// Real-time delay between ticks in milliseconds
    #[arg(long, default_value = "0")]
    tick_ms: u64,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,

    /// Save the final fleet state and verify it reads back unchanged
    #[arg(long)]
    persist: bool,
}

impl Args {
    fn apply(&self, mut config: SimulationConfig) -> SimulationConfig {
        if let Some(drones) = self.drones {
            config.drone_count = drones;
        }
        if let Some(deliveries) = self.deliveries {
            config.delivery_count = deliveries;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(max_ticks) = self.max_ticks {
            config.max_ticks = max_ticks;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("drone_simulator=info".parse()?)
                .add_directive("drone_domain=warn".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = args.apply(SimulationConfig::from_env());

    info!(
        "Starting fleet simulation: {} drones, {} deliveries, seed {:?}",
        config.drone_count, config.delivery_count, config.seed
    );

    let max_ticks = config.max_ticks;
    let mut sim = FleetSimulator::from_config(config, Utc::now())
        .context("failed to build simulation scenario")?;

    info!("Run ID: {}", sim.run_id);

    while !sim.is_finished() && sim.tick() < max_ticks {
        let telemetry = sim.step();

        for snap in telemetry.iter().filter(|s| s.is_battery_critical() && s.leg.is_some()) {
            warn!(
                "  {} battery critical: {:.1}% at ({:.1}, {:.1})",
                snap.drone_id, snap.battery_remaining_pct, snap.position.x, snap.position.y
            );
        }

        if sim.tick() % 30 == 0 {
            let airborne = telemetry.iter().filter(|s| s.leg.is_some()).count();
            info!("Tick {} | {} drones airborne", sim.tick(), airborne);
        }

        if args.tick_ms > 0 {
            sleep(Duration::from_millis(args.tick_ms)).await;
        }
    }

    let report = sim.report();
    log_report(&report);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if args.persist {
        let repo = InMemoryDroneRepository::new();
        repo.save_fleet(sim.fleet()).await?;

        let restored = repo.list().await?;
        ensure!(
            restored.len() == sim.fleet().len(),
            "persisted {} drones, read back {}",
            sim.fleet().len(),
            restored.len()
        );
        for drone in &restored {
            ensure!(
                sim.fleet().get(drone.id()) == Some(drone),
                "drone {} changed across persistence",
                drone.id()
            );
        }
        info!("Persisted and verified {} drone records", restored.len());
    }

    Ok(())
}

fn log_report(report: &FleetReport) {
    info!("=== DELIVERY EXECUTION REPORT ===");
    info!("Total Deliveries: {}", report.total_deliveries);
    info!("Completed: {}", report.completed_deliveries);
    info!("Failed: {}", report.failed_deliveries);
    info!("In Progress: {}", report.in_progress_deliveries);

    for (drone_id, stats) in &report.drone_statistics {
        info!(
            "Drone {}: battery {:.1}% | distance {:.1} units | {} deliveries",
            drone_id, stats.battery_remaining_pct, stats.distance_traveled, stats.deliveries_completed
        );
    }
}
