//! # Drone Persistence Library
//!
//! Repository layer for drone state. Drones are stored as their flat
//! [`drone_domain::DroneRecord`] so a restored drone carries its full route
//! history, battery and payload.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use drone_persistence::{DroneRepository, InMemoryDroneRepository};
//!
//! let repo = InMemoryDroneRepository::new();
//! repo.save(&drone).await?;
//! let restored = repo.get(drone.id()).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod repository;

pub use error::{PersistenceError, Result};
pub use repository::{DroneRepository, InMemoryDroneRepository};
