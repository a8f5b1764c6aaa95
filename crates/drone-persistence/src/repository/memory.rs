//! In-memory repository keeping each drone as its JSON record.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{PersistenceError, Result};
use crate::repository::traits::DroneRepository;
use drone_domain::{Drone, DroneRecord};

/// Drone store backed by a map of serialized records.
///
/// Reads always go through `Drone::from_record`, so a stored drone comes
/// back exactly as it was persisted or not at all.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDroneRepository {
    records: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryDroneRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored drones
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Raw stored record, as it would be transmitted
    pub async fn raw(&self, drone_id: &str) -> Option<String> {
        self.records.read().await.get(drone_id).cloned()
    }

    fn decode(json: &str) -> Result<Drone> {
        let record: DroneRecord = serde_json::from_str(json)?;
        Ok(Drone::from_record(record)?)
    }
}

#[async_trait]
impl DroneRepository for InMemoryDroneRepository {
    async fn get(&self, drone_id: &str) -> Result<Option<Drone>> {
        let records = self.records.read().await;
        records.get(drone_id).map(|json| Self::decode(json)).transpose()
    }

    async fn list(&self) -> Result<Vec<Drone>> {
        let records = self.records.read().await;
        let mut drones = records
            .values()
            .map(|json| Self::decode(json))
            .collect::<Result<Vec<_>>>()?;
        drones.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(drones)
    }

    async fn save(&self, drone: &Drone) -> Result<()> {
        let json = drone.to_record().to_json()?;
        self.records
            .write()
            .await
            .insert(drone.id().to_string(), json);

        debug!(drone_id = %drone.id(), route_len = drone.route().len(), "drone saved");
        Ok(())
    }

    async fn delete(&self, drone_id: &str) -> Result<()> {
        self.records
            .write()
            .await
            .remove(drone_id)
            .map(|_| ())
            .ok_or_else(|| PersistenceError::NotFound {
                entity_type: "Drone".to_string(),
                key: drone_id.to_string(),
            })
    }
}
