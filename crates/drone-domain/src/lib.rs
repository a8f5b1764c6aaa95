//! # Drone Delivery Fleet - Domain Model
//!
//! State and physical constraints of delivery drones, the deliveries they
//! carry and the fleet that owns them. Route planners, optimizers and
//! reporters consume these types; none of them live here.
//!
//! Energy model: one unit of battery per unit of distance travelled.

pub mod delivery;
pub mod drone;
pub mod error;
pub mod fleet;
pub mod position;

pub use delivery::{Delivery, DeliveryStatus};
pub use drone::{Drone, DroneBuilder, DroneRecord};
pub use error::{DomainError, Result};
pub use fleet::{DroneStatistics, Fleet, FleetReport};
pub use position::Position;
