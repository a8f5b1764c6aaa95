//! # Simulation Configuration
//!
//! Environment-based configuration for fleet simulation runs.

use std::env;
use std::str::FromStr;

use crate::error::{Result, SimulationError};

/// Simulation run configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Side length of the square operating area
    pub area_size: f64,

    /// Number of drones in the fleet
    pub drone_count: usize,

    /// Number of delivery requests
    pub delivery_count: usize,

    /// Drone template: payload capacity
    pub max_weight: f64,

    /// Drone template: energy capacity (one unit per unit distance)
    pub battery_capacity: f64,

    /// Drone template: distance units per simulated second
    pub speed: f64,

    /// Mean delivery payload
    pub payload_mean: f64,

    /// Payload standard deviation
    pub payload_std_dev: f64,

    /// Simulated seconds per tick
    pub tick_seconds: f64,

    /// Hard stop for a run
    pub max_ticks: u32,

    /// RNG seed for reproducible scenarios
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            area_size: 100.0,
            drone_count: 3,
            delivery_count: 10,
            max_weight: 5.0,
            battery_capacity: 300.0,
            speed: 10.0,
            payload_mean: 2.0,
            payload_std_dev: 1.0,
            tick_seconds: 1.0,
            max_ticks: 500,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Load configuration from `SIM_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            area_size: parse(&lookup, "SIM_AREA_SIZE").unwrap_or(defaults.area_size),
            drone_count: parse(&lookup, "SIM_DRONES").unwrap_or(defaults.drone_count),
            delivery_count: parse(&lookup, "SIM_DELIVERIES").unwrap_or(defaults.delivery_count),
            max_weight: parse(&lookup, "SIM_MAX_WEIGHT").unwrap_or(defaults.max_weight),
            battery_capacity: parse(&lookup, "SIM_BATTERY_CAPACITY").unwrap_or(defaults.battery_capacity),
            speed: parse(&lookup, "SIM_SPEED").unwrap_or(defaults.speed),
            payload_mean: parse(&lookup, "SIM_PAYLOAD_MEAN").unwrap_or(defaults.payload_mean),
            payload_std_dev: parse(&lookup, "SIM_PAYLOAD_STD_DEV").unwrap_or(defaults.payload_std_dev),
            tick_seconds: parse(&lookup, "SIM_TICK_SECONDS").unwrap_or(defaults.tick_seconds),
            max_ticks: parse(&lookup, "SIM_MAX_TICKS").unwrap_or(defaults.max_ticks),
            seed: parse(&lookup, "SIM_SEED").or(defaults.seed),
        }
    }

    /// Reject values the simulator cannot run with.
    ///
    /// Drone capacities are left alone; degenerate drones are legal and
    /// simply never receive work.
    pub fn validate(&self) -> Result<()> {
        if !(self.area_size.is_finite() && self.area_size > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "area size must be positive, got {}",
                self.area_size
            )));
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "speed must be positive, got {}",
                self.speed
            )));
        }
        if !(self.tick_seconds.is_finite() && self.tick_seconds > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "tick duration must be positive, got {}",
                self.tick_seconds
            )));
        }
        if !(self.payload_std_dev.is_finite() && self.payload_std_dev >= 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "payload std dev must be non-negative, got {}",
                self.payload_std_dev
            )));
        }
        Ok(())
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}
