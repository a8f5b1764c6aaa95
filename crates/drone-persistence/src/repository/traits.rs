//! # Repository Traits
//!
//! Abstract repository interfaces for drone state.
//! Implementations can be swapped for different backends (in-memory, database, etc.)

use async_trait::async_trait;

use crate::error::Result;
use drone_domain::{Drone, Fleet};

/// Repository for Drone entity operations
#[async_trait]
pub trait DroneRepository: Send + Sync {
    /// Get drone by ID
    async fn get(&self, drone_id: &str) -> Result<Option<Drone>>;

    /// All stored drones, ordered by ID
    async fn list(&self) -> Result<Vec<Drone>>;

    /// Insert or replace a drone
    async fn save(&self, drone: &Drone) -> Result<()>;

    /// Delete drone
    async fn delete(&self, drone_id: &str) -> Result<()>;

    /// Save every drone of a fleet
    async fn save_fleet(&self, fleet: &Fleet) -> Result<()> {
        for drone in fleet {
            self.save(drone).await?;
        }
        Ok(())
    }
}
