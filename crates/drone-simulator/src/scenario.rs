//! Random fleet and delivery scenario generation.

use chrono::{DateTime, Duration, Utc};
use drone_domain::{Delivery, Drone, Fleet, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};

/// Smallest payload a generated delivery carries.
const MIN_PAYLOAD: f64 = 0.1;

/// Builds drones and deliveries from a [`SimulationConfig`].
pub struct ScenarioGenerator {
    config: SimulationConfig,
    rng: StdRng,
    payload: Normal<f64>,
}

impl ScenarioGenerator {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let payload = Normal::new(config.payload_mean, config.payload_std_dev)
            .map_err(|e| SimulationError::InvalidConfig(format!("payload distribution: {e}")))?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            rng,
            payload,
        })
    }

    /// Depots spread evenly along the southern edge of the area.
    pub fn generate_fleet(&self) -> Result<Fleet> {
        let mut fleet = Fleet::new();
        let count = self.config.drone_count;

        for i in 0..count {
            let x = self.config.area_size * (i + 1) as f64 / (count + 1) as f64;
            let drone = Drone::new(
                format!("drone-{:02}", i + 1),
                self.config.max_weight,
                self.config.battery_capacity,
                self.config.speed,
                Position::new(x, 0.0),
            );
            fleet.add(drone)?;
        }

        Ok(fleet)
    }

    /// Deliveries with uniform drop-off points, normally distributed
    /// payloads, priority 1-3 and a 30-180 minute window opening at `now`.
    pub fn generate_deliveries(&mut self, now: DateTime<Utc>) -> Vec<Delivery> {
        (0..self.config.delivery_count)
            .map(|i| {
                let position = Position::new(
                    self.rng.gen_range(0.0..=self.config.area_size),
                    self.rng.gen_range(0.0..=self.config.area_size),
                );
                let weight = self.payload.sample(&mut self.rng).max(MIN_PAYLOAD);
                let priority = self.rng.gen_range(1..=3);
                let window = Duration::minutes(self.rng.gen_range(30..=180));

                Delivery::new(
                    format!("delivery-{:02}", i + 1),
                    position,
                    weight,
                    priority,
                    now,
                    now + window,
                )
            })
            .collect()
    }
}
