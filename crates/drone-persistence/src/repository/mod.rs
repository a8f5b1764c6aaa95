//! # Repository Module
//!
//! Repository pattern implementations for drone persistence.

pub mod memory;
pub mod traits;

pub use memory::InMemoryDroneRepository;
pub use traits::DroneRepository;
