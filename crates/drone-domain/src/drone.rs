//! Drone entity: fixed capacities plus mutable operating state.
//!
//! Energy is consumed at one unit per unit of distance. Speed is carried for
//! route-time calculations done by callers and never enters the depletion
//! formula.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{DomainError, Result};
use crate::position::Position;

/// Delivery drone state.
///
/// `current_position` always equals the last element of `route`, and `route`
/// always starts at `start_position`. Battery is allowed to go below zero
/// through [`Drone::update_position`]; such a drone is stranded.
///
/// # Examples
///
/// ```
/// use drone_domain::{Drone, Position};
///
/// let mut drone = Drone::new("drone1", 5.0, 100.0, 10.0, Position::new(0.0, 0.0));
/// assert!(drone.can_carry(5.0));
///
/// drone.update_position(Position::new(3.0, 4.0), 50.0);
/// assert_eq!(drone.current_battery(), 50.0);
/// assert_eq!(drone.get_remaining_battery_percentage(), 50.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "DroneRecord", try_from = "DroneRecord")]
pub struct Drone {
    id: String,
    max_weight: f64,
    battery_capacity: f64,
    speed: f64,
    start_position: Position,

    current_position: Position,
    current_battery: f64,
    current_weight: f64,
    route: Vec<Position>,
}

impl Drone {
    /// Create a drone at its start position with a full battery and no payload.
    ///
    /// Capacities are not validated; zero or negative values yield a drone
    /// that can carry or travel nothing.
    pub fn new(
        id: impl Into<String>,
        max_weight: f64,
        battery_capacity: f64,
        speed: f64,
        start_position: Position,
    ) -> Self {
        Self {
            id: id.into(),
            max_weight,
            battery_capacity,
            speed,
            start_position,
            current_position: start_position,
            current_battery: battery_capacity,
            current_weight: 0.0,
            route: vec![start_position],
        }
    }

    /// Start building a drone whose operating state is partially known.
    pub fn builder(
        id: impl Into<String>,
        max_weight: f64,
        battery_capacity: f64,
        speed: f64,
        start_position: Position,
    ) -> DroneBuilder {
        DroneBuilder {
            id: id.into(),
            max_weight,
            battery_capacity,
            speed,
            start_position,
            current_position: None,
            current_battery: None,
            current_weight: None,
            route: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn max_weight(&self) -> f64 {
        self.max_weight
    }

    pub const fn battery_capacity(&self) -> f64 {
        self.battery_capacity
    }

    pub const fn speed(&self) -> f64 {
        self.speed
    }

    pub const fn start_position(&self) -> Position {
        self.start_position
    }

    pub const fn current_position(&self) -> Position {
        self.current_position
    }

    pub const fn current_battery(&self) -> f64 {
        self.current_battery
    }

    pub const fn current_weight(&self) -> f64 {
        self.current_weight
    }

    /// Full travel history, starting at the start position
    pub fn route(&self) -> &[Position] {
        &self.route
    }

    /// Whether `weight` more payload fits. The upper bound is inclusive.
    #[must_use]
    pub fn can_carry(&self, weight: f64) -> bool {
        self.current_weight + weight <= self.max_weight
    }

    /// Whether the remaining battery covers `distance`. Inclusive.
    #[must_use]
    pub fn has_sufficient_battery(&self, distance: f64) -> bool {
        self.current_battery >= distance
    }

    /// Move to `new_position`, spending `distance` energy.
    ///
    /// Feasibility is the caller's responsibility: the battery is not floored
    /// and the distance is not recomputed from the positions. Use
    /// [`Drone::try_update_position`] for the checked variant.
    pub fn update_position(&mut self, new_position: Position, distance: f64) {
        let was_stranded = self.is_stranded();

        self.current_position = new_position;
        self.current_battery -= distance;
        self.route.push(new_position);

        debug!(
            drone_id = %self.id,
            x = new_position.x,
            y = new_position.y,
            distance,
            battery = self.current_battery,
            "drone moved"
        );

        if !was_stranded && self.is_stranded() {
            warn!(drone_id = %self.id, battery = self.current_battery, "drone stranded");
        }
    }

    /// Checked move. Fails with [`DomainError::InfeasibleMove`] and leaves the
    /// drone untouched when the battery does not cover `distance`.
    pub fn try_update_position(&mut self, new_position: Position, distance: f64) -> Result<()> {
        if !self.has_sufficient_battery(distance) {
            return Err(DomainError::InfeasibleMove {
                drone_id: self.id.clone(),
                required: distance,
                available: self.current_battery,
            });
        }

        self.update_position(new_position, distance);
        Ok(())
    }

    /// Add payload, enforcing the capacity limit.
    pub fn load(&mut self, weight: f64) -> Result<()> {
        self.check_payload(weight)?;

        if !self.can_carry(weight) {
            return Err(DomainError::CapacityExceeded {
                drone_id: self.id.clone(),
                requested: weight,
                available: self.max_weight - self.current_weight,
            });
        }

        self.current_weight += weight;
        debug!(drone_id = %self.id, weight, total = self.current_weight, "payload loaded");
        Ok(())
    }

    /// Remove payload. Removing more than is carried is rejected.
    pub fn unload(&mut self, weight: f64) -> Result<()> {
        self.check_payload(weight)?;

        if weight > self.current_weight {
            return Err(DomainError::InvalidPayload {
                drone_id: self.id.clone(),
                weight,
            });
        }

        self.current_weight -= weight;
        debug!(drone_id = %self.id, weight, total = self.current_weight, "payload unloaded");
        Ok(())
    }

    fn check_payload(&self, weight: f64) -> Result<()> {
        if weight.is_finite() && weight >= 0.0 {
            Ok(())
        } else {
            Err(DomainError::InvalidPayload {
                drone_id: self.id.clone(),
                weight,
            })
        }
    }

    /// Return every mutable field to its initial value.
    pub fn reset(&mut self) {
        self.current_position = self.start_position;
        self.current_battery = self.battery_capacity;
        self.current_weight = 0.0;
        self.route.clear();
        self.route.push(self.start_position);
    }

    /// Remaining battery as a percentage of capacity.
    ///
    /// A zero-capacity drone reports `0.0`.
    #[must_use]
    pub fn get_remaining_battery_percentage(&self) -> f64 {
        if self.battery_capacity == 0.0 {
            return 0.0;
        }
        (self.current_battery / self.battery_capacity) * 100.0
    }

    /// Battery depleted below zero
    #[must_use]
    pub fn is_stranded(&self) -> bool {
        self.current_battery < 0.0
    }

    /// Sum of straight-line segment lengths along the route
    #[must_use]
    pub fn distance_traveled(&self) -> f64 {
        self.route
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum()
    }

    /// Flat record of every field, for persistence or transmission.
    #[must_use]
    pub fn to_record(&self) -> DroneRecord {
        DroneRecord {
            id: self.id.clone(),
            max_weight: self.max_weight,
            battery_capacity: self.battery_capacity,
            speed: self.speed,
            start_position: self.start_position,
            current_position: self.current_position,
            current_battery: self.current_battery,
            current_weight: self.current_weight,
            route: self.route.clone(),
        }
    }

    /// Restore a drone from a record produced by [`Drone::to_record`].
    ///
    /// Like [`Drone::new`], the id is taken as is.
    pub fn from_record(record: DroneRecord) -> Result<Self> {
        Self::builder(
            record.id,
            record.max_weight,
            record.battery_capacity,
            record.speed,
            record.start_position,
        )
        .with_current_position(record.current_position)
        .with_current_battery(record.current_battery)
        .with_current_weight(record.current_weight)
        .with_route(record.route)
        .build()
    }
}

/// Two-phase construction for drones restored mid-run.
///
/// Unset fields default from the required ones: battery from capacity,
/// weight to zero, position from the route tail (or the start position) and
/// route from the start position plus any explicit current position.
#[derive(Debug, Clone)]
#[must_use]
pub struct DroneBuilder {
    id: String,
    max_weight: f64,
    battery_capacity: f64,
    speed: f64,
    start_position: Position,
    current_position: Option<Position>,
    current_battery: Option<f64>,
    current_weight: Option<f64>,
    route: Option<Vec<Position>>,
}

impl DroneBuilder {
    pub fn with_current_position(mut self, position: Position) -> Self {
        self.current_position = Some(position);
        self
    }

    pub fn with_current_battery(mut self, battery: f64) -> Self {
        self.current_battery = Some(battery);
        self
    }

    pub fn with_current_weight(mut self, weight: f64) -> Self {
        self.current_weight = Some(weight);
        self
    }

    pub fn with_route(mut self, route: Vec<Position>) -> Self {
        self.route = Some(route);
        self
    }

    /// Fill defaults and check route consistency.
    pub fn build(self) -> Result<Drone> {
        let start = self.start_position;

        let route = match (self.route, self.current_position) {
            (Some(route), _) => route,
            (None, Some(current)) if current != start => vec![start, current],
            (None, _) => vec![start],
        };

        let Some(&tail) = route.last() else {
            return Err(DomainError::InvalidRecord("route must not be empty".to_string()));
        };
        if route[0] != start {
            return Err(DomainError::InvalidRecord(format!(
                "route starts at {:?}, expected start position {:?}",
                route[0], start
            )));
        }

        let current_position = self.current_position.unwrap_or(tail);
        if current_position != tail {
            return Err(DomainError::InvalidRecord(format!(
                "current position {current_position:?} does not match route end {tail:?}"
            )));
        }

        Ok(Drone {
            id: self.id,
            max_weight: self.max_weight,
            battery_capacity: self.battery_capacity,
            speed: self.speed,
            start_position: start,
            current_position,
            current_battery: self.current_battery.unwrap_or(self.battery_capacity),
            current_weight: self.current_weight.unwrap_or(0.0),
            route,
        })
    }
}

/// Serialized drone. Field names are part of the persisted format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DroneRecord {
    pub id: String,
    pub max_weight: f64,
    pub battery_capacity: f64,
    pub speed: f64,
    pub start_position: Position,
    pub current_position: Position,
    pub current_battery: f64,
    pub current_weight: f64,
    pub route: Vec<Position>,
}

impl DroneRecord {
    /// Serialize the record. Non-finite numbers have no JSON form and are
    /// rejected with `InvalidRecord`.
    pub fn to_json(&self) -> Result<String> {
        self.check_finite()?;
        Ok(serde_json::to_string(self)?)
    }

    /// Fails on the first NaN or infinite scalar or coordinate.
    pub fn check_finite(&self) -> Result<()> {
        let scalars = [
            ("max_weight", self.max_weight),
            ("battery_capacity", self.battery_capacity),
            ("speed", self.speed),
            ("current_battery", self.current_battery),
            ("current_weight", self.current_weight),
        ];
        if let Some((field, value)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(DomainError::InvalidRecord(format!(
                "{field} is not finite: {value}"
            )));
        }

        let positions = [
            ("start_position", &self.start_position),
            ("current_position", &self.current_position),
        ]
        .into_iter()
        .chain(self.route.iter().map(|p| ("route", p)));
        for (field, p) in positions {
            if !(p.x.is_finite() && p.y.is_finite()) {
                return Err(DomainError::InvalidRecord(format!(
                    "{field} has a non-finite coordinate: {p:?}"
                )));
            }
        }
        Ok(())
    }

    /// Parse a record; missing or malformed fields map to `InvalidRecord`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<Drone> for DroneRecord {
    fn from(drone: Drone) -> Self {
        Self {
            id: drone.id,
            max_weight: drone.max_weight,
            battery_capacity: drone.battery_capacity,
            speed: drone.speed,
            start_position: drone.start_position,
            current_position: drone.current_position,
            current_battery: drone.current_battery,
            current_weight: drone.current_weight,
            route: drone.route,
        }
    }
}

impl TryFrom<DroneRecord> for Drone {
    type Error = DomainError;

    fn try_from(record: DroneRecord) -> Result<Self> {
        Self::from_record(record)
    }
}
