//! Simulator error types.

use drone_domain::DomainError;
use thiserror::Error;

/// Simulation errors.
#[derive(Error, Debug)]
pub enum SimulationError {
    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Domain rule violated while building or running a scenario
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, SimulationError>;
