//! Nearest-feasible delivery dispatch.
//!
//! The dispatcher never mutates drones. It only consults the feasibility
//! predicates so the caller can commit the assignment afterwards.

use std::collections::HashMap;

use drone_domain::{Delivery, Drone, Fleet};

use crate::flight::{round_trip, FlightLeg};

/// Outcome of trying to place one delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchDecision {
    /// Assign to this idle drone now
    Assign(String),
    /// Some busy drone will be able to take it later
    Wait,
    /// No drone can ever take it
    Unservable,
}

/// Selects drones for deliveries.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher;

impl Dispatcher {
    /// Pick the nearest idle drone that can carry the payload and fly the
    /// round trip back to its depot.
    pub fn decide(
        &self,
        fleet: &Fleet,
        legs: &HashMap<String, FlightLeg>,
        delivery: &Delivery,
    ) -> DispatchDecision {
        let nearest_idle = fleet
            .iter()
            .filter(|drone| !legs.contains_key(drone.id()))
            .filter(|drone| Self::can_serve_now(drone, delivery))
            .min_by(|a, b| {
                let da = a.current_position().distance_to(&delivery.position);
                let db = b.current_position().distance_to(&delivery.position);
                da.total_cmp(&db).then_with(|| a.id().cmp(b.id()))
            });

        if let Some(drone) = nearest_idle {
            return DispatchDecision::Assign(drone.id().to_string());
        }

        let serviceable_later = fleet
            .iter()
            .filter_map(|drone| legs.get(drone.id()).map(|leg| (drone, leg)))
            .any(|(drone, leg)| Self::can_serve_after(drone, leg, delivery));

        if serviceable_later {
            DispatchDecision::Wait
        } else {
            DispatchDecision::Unservable
        }
    }

    fn can_serve_now(drone: &Drone, delivery: &Delivery) -> bool {
        let needed = round_trip(
            &drone.current_position(),
            &delivery.position,
            &drone.start_position(),
        );
        drone.can_carry(delivery.weight) && drone.has_sufficient_battery(needed)
    }

    /// Whether the drone could take the delivery once its current trip ends.
    fn can_serve_after(drone: &Drone, leg: &FlightLeg, delivery: &Delivery) -> bool {
        let home = drone.start_position();
        let projected = drone.current_battery() - leg.remaining_distance(&home);

        delivery.weight <= drone.max_weight()
            && projected >= round_trip(&home, &delivery.position, &home)
    }
}
