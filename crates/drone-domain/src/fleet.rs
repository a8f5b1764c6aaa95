//! Fleet ownership and execution reporting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::delivery::{Delivery, DeliveryStatus};
use crate::drone::Drone;
use crate::error::{DomainError, Result};

/// Owning collection of drones keyed by id, in registration order.
///
/// Collaborators borrow drones through [`Fleet::get`] / [`Fleet::get_mut`];
/// there is never a second copy to diverge from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fleet {
    drones: Vec<Drone>,
}

impl Fleet {
    pub const fn new() -> Self {
        Self { drones: Vec::new() }
    }

    /// Register a drone. Ids must be unique.
    pub fn add(&mut self, drone: Drone) -> Result<()> {
        if self.get(drone.id()).is_some() {
            return Err(DomainError::DuplicateDrone(drone.id().to_string()));
        }
        info!(drone_id = %drone.id(), "drone added to fleet");
        self.drones.push(drone);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Drone> {
        self.drones.iter().find(|d| d.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Drone> {
        self.drones.iter_mut().find(|d| d.id() == id)
    }

    pub fn remove(&mut self, id: &str) -> Result<Drone> {
        let idx = self
            .drones
            .iter()
            .position(|d| d.id() == id)
            .ok_or_else(|| DomainError::NotFound {
                entity_type: "Drone".to_string(),
                id: id.to_string(),
            })?;
        Ok(self.drones.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.drones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drones.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Drone> {
        self.drones.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Drone> {
        self.drones.iter_mut()
    }

    /// Reset every drone for a fresh planning run
    pub fn reset_all(&mut self) {
        self.drones.iter_mut().for_each(Drone::reset);
    }

    /// Summarize delivery outcomes and per-drone usage.
    #[must_use]
    pub fn report(&self, deliveries: &[Delivery]) -> FleetReport {
        let count = |status: DeliveryStatus| deliveries.iter().filter(|d| d.status == status).count();

        let drone_statistics = self
            .drones
            .iter()
            .map(|drone| {
                let deliveries_completed = deliveries
                    .iter()
                    .filter(|d| {
                        d.status == DeliveryStatus::Completed
                            && d.assigned_drone.as_deref() == Some(drone.id())
                    })
                    .count();

                let stats = DroneStatistics {
                    battery_remaining_pct: drone.get_remaining_battery_percentage(),
                    distance_traveled: drone.distance_traveled(),
                    deliveries_completed,
                };
                (drone.id().to_string(), stats)
            })
            .collect();

        FleetReport {
            total_deliveries: deliveries.len(),
            completed_deliveries: count(DeliveryStatus::Completed),
            failed_deliveries: count(DeliveryStatus::Failed),
            in_progress_deliveries: count(DeliveryStatus::InProgress),
            drone_statistics,
        }
    }
}

impl<'a> IntoIterator for &'a Fleet {
    type Item = &'a Drone;
    type IntoIter = std::slice::Iter<'a, Drone>;

    fn into_iter(self) -> Self::IntoIter {
        self.drones.iter()
    }
}

/// Per-drone usage figures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DroneStatistics {
    pub battery_remaining_pct: f64,
    pub distance_traveled: f64,
    pub deliveries_completed: usize,
}

/// Delivery execution report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetReport {
    pub total_deliveries: usize,
    pub completed_deliveries: usize,
    pub failed_deliveries: usize,
    pub in_progress_deliveries: usize,
    pub drone_statistics: BTreeMap<String, DroneStatistics>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use chrono::{Duration, Utc};

    fn fleet() -> Fleet {
        let mut fleet = Fleet::new();
        fleet
            .add(Drone::new("drone1", 5.0, 100.0, 10.0, Position::new(0.0, 0.0)))
            .unwrap();
        fleet
            .add(Drone::new("drone2", 7.0, 120.0, 12.0, Position::new(100.0, 0.0)))
            .unwrap();
        fleet
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut fleet = fleet();
        let err = fleet
            .add(Drone::new("drone1", 1.0, 1.0, 1.0, Position::default()))
            .unwrap_err();
        assert_eq!(err, DomainError::DuplicateDrone("drone1".to_string()));
        assert_eq!(fleet.len(), 2);
    }

    #[test]
    fn test_get_mut_mutates_canonical_instance() {
        let mut fleet = fleet();
        fleet
            .get_mut("drone2")
            .unwrap()
            .update_position(Position::new(90.0, 0.0), 10.0);

        assert_eq!(fleet.get("drone2").unwrap().current_battery(), 110.0);
        assert!(fleet.get("drone3").is_none());
    }

    #[test]
    fn test_remove_and_reset_all() {
        let mut fleet = fleet();
        fleet
            .get_mut("drone1")
            .unwrap()
            .update_position(Position::new(3.0, 4.0), 5.0);
        fleet.reset_all();
        assert_eq!(fleet.get("drone1").unwrap().route().len(), 1);

        let removed = fleet.remove("drone1").unwrap();
        assert_eq!(removed.id(), "drone1");
        assert!(matches!(
            fleet.remove("drone1"),
            Err(DomainError::NotFound { .. })
        ));
        assert_eq!(fleet.iter().count(), 1);
    }

    #[test]
    fn test_report() {
        let mut fleet = fleet();
        let drone = fleet.get_mut("drone1").unwrap();
        drone.update_position(Position::new(3.0, 4.0), 5.0);
        drone.update_position(Position::new(0.0, 0.0), 5.0);

        let now = Utc::now();
        let window_end = now + Duration::hours(1);
        let mut done = Delivery::new("a", Position::new(3.0, 4.0), 2.0, 1, now, window_end);
        done.assign_to_drone("drone1");
        done.mark_completed();
        let mut failed = Delivery::new("b", Position::new(70.0, 40.0), 9.0, 2, now, window_end);
        failed.mark_failed();
        let pending = Delivery::new("c", Position::new(1.0, 1.0), 1.0, 1, now, window_end);

        let report = fleet.report(&[done, failed, pending]);
        assert_eq!(report.total_deliveries, 3);
        assert_eq!(report.completed_deliveries, 1);
        assert_eq!(report.failed_deliveries, 1);
        assert_eq!(report.in_progress_deliveries, 0);

        let stats = report.drone_statistics["drone1"];
        assert_eq!(stats.deliveries_completed, 1);
        assert!((stats.distance_traveled - 10.0).abs() < 1e-9);
        assert!((stats.battery_remaining_pct - 90.0).abs() < 1e-9);

        let idle = report.drone_statistics["drone2"];
        assert_eq!(idle.deliveries_completed, 0);
        assert_eq!(idle.distance_traveled, 0.0);
        assert_eq!(idle.battery_remaining_pct, 100.0);
    }
}
