//! Fleet-level simulation flying straight-line delivery trips.

use std::collections::HashMap;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use drone_domain::{Delivery, DeliveryStatus, Fleet, FleetReport};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::SimulationConfig;
use crate::dispatch::{DispatchDecision, Dispatcher};
use crate::error::Result;
use crate::flight::{settle_charge, FlightLeg, LegKind};
use crate::scenario::ScenarioGenerator;
use crate::telemetry::TelemetrySnapshot;

/// Simulator owning a fleet and its delivery queue.
pub struct FleetSimulator {
    pub run_id: Uuid,
    config: SimulationConfig,
    fleet: Fleet,
    deliveries: Vec<Delivery>,
    legs: HashMap<String, FlightLeg>,
    dispatcher: Dispatcher,
    start_time: DateTime<Utc>,
    tick: u32,
}

impl FleetSimulator {
    /// Simulate a given fleet and delivery set.
    pub fn new(
        config: SimulationConfig,
        fleet: Fleet,
        deliveries: Vec<Delivery>,
        start_time: DateTime<Utc>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            run_id: Uuid::new_v4(),
            config,
            fleet,
            deliveries,
            legs: HashMap::new(),
            dispatcher: Dispatcher,
            start_time,
            tick: 0,
        })
    }

    /// Simulate a randomly generated scenario.
    pub fn from_config(config: SimulationConfig, start_time: DateTime<Utc>) -> Result<Self> {
        let mut generator = ScenarioGenerator::new(config.clone())?;
        let fleet = generator.generate_fleet()?;
        let deliveries = generator.generate_deliveries(start_time);

        Self::new(config, fleet, deliveries, start_time)
    }

    pub const fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    pub const fn tick(&self) -> u32 {
        self.tick
    }

    /// Simulated wall-clock time of the current tick. Saturates at the
    /// latest representable time.
    pub fn now(&self) -> DateTime<Utc> {
        StdDuration::try_from_secs_f64(f64::from(self.tick) * self.config.tick_seconds)
            .ok()
            .and_then(|elapsed| Duration::from_std(elapsed).ok())
            .and_then(|elapsed| self.start_time.checked_add_signed(elapsed))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// No pending work and every drone back at its depot.
    pub fn is_finished(&self) -> bool {
        self.legs.is_empty()
            && self
                .deliveries
                .iter()
                .all(|d| d.status != DeliveryStatus::Pending)
    }

    /// Advance one tick: dispatch waiting deliveries, move every busy drone,
    /// then capture telemetry.
    pub fn step(&mut self) -> Vec<TelemetrySnapshot> {
        self.dispatch();
        self.advance();
        self.tick += 1;

        let now = self.now();
        self.fleet
            .iter()
            .map(|drone| {
                TelemetrySnapshot::capture(
                    self.run_id,
                    self.tick,
                    now,
                    drone,
                    self.legs.get(drone.id()),
                )
            })
            .collect()
    }

    /// Step until finished or the tick limit is reached.
    pub fn run(&mut self) -> FleetReport {
        while !self.is_finished() && self.tick < self.config.max_ticks {
            self.step();
        }

        if !self.is_finished() {
            warn!(run_id = %self.run_id, tick = self.tick, "tick limit reached with work outstanding");
        }
        self.report()
    }

    pub fn report(&self) -> FleetReport {
        self.fleet.report(&self.deliveries)
    }

    fn dispatch(&mut self) {
        let now = self.now();

        let mut pending: Vec<usize> = (0..self.deliveries.len())
            .filter(|&i| self.deliveries[i].status == DeliveryStatus::Pending)
            .collect();
        pending.sort_by(|&a, &b| self.deliveries[a].dispatch_order(&self.deliveries[b]));

        for idx in pending {
            let delivery = &self.deliveries[idx];

            if now > delivery.time_window_end {
                warn!(delivery_id = %delivery.id, "delivery window closed before dispatch");
                self.deliveries[idx].mark_failed();
                continue;
            }

            match self.dispatcher.decide(&self.fleet, &self.legs, delivery) {
                DispatchDecision::Assign(drone_id) => self.assign(idx, &drone_id),
                DispatchDecision::Wait => {}
                DispatchDecision::Unservable => {
                    warn!(
                        delivery_id = %delivery.id,
                        weight = delivery.weight,
                        "no drone can serve delivery"
                    );
                    self.deliveries[idx].mark_failed();
                }
            }
        }
    }

    fn assign(&mut self, idx: usize, drone_id: &str) {
        let delivery = &mut self.deliveries[idx];
        let Some(drone) = self.fleet.get_mut(drone_id) else {
            return;
        };

        if let Err(err) = drone.load(delivery.weight) {
            warn!(delivery_id = %delivery.id, error = %err, "load rejected");
            return;
        }

        delivery.assign_to_drone(drone_id);
        self.legs.insert(
            drone_id.to_string(),
            FlightLeg::outbound(
                &delivery.id,
                &drone.current_position(),
                delivery.position,
                delivery.weight,
            ),
        );

        info!(
            drone_id,
            delivery_id = %delivery.id,
            priority = delivery.priority,
            weight = delivery.weight,
            "delivery assigned"
        );
    }

    fn advance(&mut self) {
        let mut busy: Vec<String> = self.legs.keys().cloned().collect();
        busy.sort();

        for drone_id in busy {
            let Some(mut leg) = self.legs.get(&drone_id).cloned() else {
                continue;
            };
            let Some(drone) = self.fleet.get_mut(&drone_id) else {
                continue;
            };

            let max_step = drone.speed() * self.config.tick_seconds;
            let (next, flown) = leg.next_step(&drone.current_position(), max_step);
            let charge = settle_charge(drone.current_battery(), flown);

            if let Err(err) = drone.try_update_position(next, charge) {
                warn!(drone_id = %drone_id, error = %err, "move aborted");
                self.legs.remove(&drone_id);
                if leg.kind == LegKind::Outbound {
                    self.fail_delivery(&leg.delivery_id);
                }
                continue;
            }

            leg.fly(flown);
            if !leg.is_complete() {
                self.legs.insert(drone_id, leg);
                continue;
            }

            match leg.kind {
                LegKind::Outbound => {
                    if let Err(err) = drone.unload(leg.payload) {
                        warn!(drone_id = %drone_id, error = %err, "unload rejected");
                    }
                    let home = drone.start_position();
                    let homeward = FlightLeg::homeward(&leg.delivery_id, &leg.target, home);
                    self.complete_delivery(&leg.delivery_id);
                    self.legs.insert(drone_id, homeward);
                }
                LegKind::Return => {
                    debug!(drone_id = %drone_id, "drone back at depot");
                    self.legs.remove(&drone_id);
                }
            }
        }
    }

    fn complete_delivery(&mut self, delivery_id: &str) {
        if let Some(delivery) = self.deliveries.iter_mut().find(|d| d.id == delivery_id) {
            delivery.mark_completed();
            info!(delivery_id, drone_id = ?delivery.assigned_drone, "delivery completed");
        }
    }

    fn fail_delivery(&mut self, delivery_id: &str) {
        if let Some(delivery) = self.deliveries.iter_mut().find(|d| d.id == delivery_id) {
            delivery.mark_failed();
        }
    }
}
