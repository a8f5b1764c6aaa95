//! # Drone Simulator
//!
//! Delivery fleet simulator driving drones through the feasibility-checked
//! movement contract of `drone-domain`.
//!
//! ## Features
//!
//! - Seedable random scenarios (depots, drop-off points, payloads, windows)
//! - Nearest-feasible dispatch that reserves the return leg
//! - Straight-line flight at each drone's speed
//! - Per-tick telemetry and a final fleet report

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod dispatch;
pub mod error;
pub mod flight;
pub mod scenario;
pub mod simulation;
pub mod telemetry;

pub use config::SimulationConfig;
pub use dispatch::{DispatchDecision, Dispatcher};
pub use error::SimulationError;
pub use flight::{FlightLeg, LegKind};
pub use scenario::ScenarioGenerator;
pub use simulation::FleetSimulator;
pub use telemetry::TelemetrySnapshot;
