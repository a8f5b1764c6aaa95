//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Infeasible move for drone {drone_id}: requires {required} energy, {available} available")]
    InfeasibleMove {
        drone_id: String,
        required: f64,
        available: f64,
    },

    #[error("Capacity exceeded for drone {drone_id}: requested {requested}, {available} available")]
    CapacityExceeded {
        drone_id: String,
        requested: f64,
        available: f64,
    },

    #[error("Invalid payload for drone {drone_id}: {weight}")]
    InvalidPayload { drone_id: String, weight: f64 },

    #[error("Invalid drone record: {0}")]
    InvalidRecord(String),

    #[error("Drone already registered: {0}")]
    DuplicateDrone(String),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidRecord(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
