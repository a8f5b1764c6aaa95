//! Straight-line flight legs between depot and drop-off points.

use drone_domain::Position;
use serde::{Deserialize, Serialize};

/// Phase of a delivery trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegKind {
    Outbound,
    Return,
}

/// One leg a drone is currently flying.
///
/// `remaining` is the distance still to charge for this leg. It starts at
/// the same value the dispatcher reserved, so the charges of a whole leg add
/// up to its planned length rather than to re-measured hops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightLeg {
    pub delivery_id: String,
    pub kind: LegKind,
    pub target: Position,
    /// Payload dropped on arrival of the outbound leg
    pub payload: f64,
    pub remaining: f64,
}

impl FlightLeg {
    pub fn outbound(delivery_id: &str, from: &Position, target: Position, payload: f64) -> Self {
        Self {
            delivery_id: delivery_id.to_string(),
            kind: LegKind::Outbound,
            target,
            payload,
            remaining: from.distance_to(&target),
        }
    }

    pub fn homeward(delivery_id: &str, from: &Position, home: Position) -> Self {
        Self {
            delivery_id: delivery_id.to_string(),
            kind: LegKind::Return,
            target: home,
            payload: 0.0,
            remaining: from.distance_to(&home),
        }
    }

    /// Distance still to fly until the drone is home again.
    #[must_use]
    pub fn remaining_distance(&self, home: &Position) -> f64 {
        match self.kind {
            LegKind::Outbound => self.remaining + self.target.distance_to(home),
            LegKind::Return => self.remaining,
        }
    }

    /// Next position and the distance to charge for it, flying at most
    /// `max_step`. The final step lands exactly on `target`.
    #[must_use]
    pub fn next_step(&self, current: &Position, max_step: f64) -> (Position, f64) {
        if self.remaining <= max_step {
            (self.target, self.remaining)
        } else {
            (current.interpolate(&self.target, max_step / self.remaining), max_step)
        }
    }

    /// Record a committed step.
    pub fn fly(&mut self, flown: f64) {
        self.remaining = (self.remaining - flown).max(0.0);
    }

    pub fn is_complete(&self) -> bool {
        self.remaining <= 0.0
    }
}

/// Energy needed to fly `from` → `drop_off` → `home`.
#[must_use]
pub fn round_trip(from: &Position, drop_off: &Position, home: &Position) -> f64 {
    from.distance_to(drop_off) + drop_off.distance_to(home)
}

/// Charge for a step given the battery left.
///
/// Per-step subtraction rounds differently from the reserved round trip, so
/// an exactly budgeted drone can end a few ulps short on its last hop. A
/// shortfall within `ROUNDING_SLACK` of the step is settled from what is
/// left; anything larger is charged in full and left for the checked move
/// to reject.
#[must_use]
pub fn settle_charge(battery: f64, distance: f64) -> f64 {
    let shortfall = distance - battery;
    if shortfall > 0.0 && shortfall <= ROUNDING_SLACK * distance.max(1.0) {
        battery
    } else {
        distance
    }
}

const ROUNDING_SLACK: f64 = 1e-9;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_step_partial_and_final() {
        let origin = Position::new(0.0, 0.0);
        let target = Position::new(30.0, 40.0);
        let mut leg = FlightLeg::outbound("d1", &origin, target, 2.0);
        assert_eq!(leg.remaining, 50.0);

        let (next, flown) = leg.next_step(&origin, 10.0);
        assert_eq!(flown, 10.0);
        assert!((next.x - 6.0).abs() < 1e-9);
        assert!((next.y - 8.0).abs() < 1e-9);

        leg.fly(flown);
        assert_eq!(leg.remaining, 40.0);
        assert!(!leg.is_complete());

        leg.remaining = 5.0;
        let (last, flown) = leg.next_step(&Position::new(27.0, 36.0), 10.0);
        assert_eq!(last, target);
        assert_eq!(flown, 5.0);
        leg.fly(flown);
        assert!(leg.is_complete());
    }

    #[test]
    fn test_leg_charges_sum_to_planned_length() {
        let home = Position::new(0.0, 0.0);
        let drop_off = Position::new(2.59, 6.5);
        let mut leg = FlightLeg::homeward("d1", &drop_off, home);
        let planned = leg.remaining;

        let mut at = drop_off;
        let mut charged = Vec::new();
        while !leg.is_complete() {
            let (next, flown) = leg.next_step(&at, 3.3);
            leg.fly(flown);
            charged.push(flown);
            at = next;
        }

        assert_eq!(at, home);
        assert_eq!(charged.len(), 3);
        assert!((charged.iter().sum::<f64>() - planned).abs() < 1e-12);
    }

    #[test]
    fn test_empty_leg_is_complete_after_one_step() {
        let p = Position::new(1.0, 1.0);
        let leg = FlightLeg::homeward("d1", &p, p);
        assert_eq!(leg.next_step(&p, 10.0), (p, 0.0));
    }

    #[test]
    fn test_remaining_distance() {
        let home = Position::new(0.0, 0.0);
        let out = FlightLeg::outbound("d1", &home, Position::new(30.0, 40.0), 2.0);
        assert!((out.remaining_distance(&home) - 100.0).abs() < 1e-9);

        let back = FlightLeg::homeward("d1", &Position::new(3.0, 4.0), home);
        assert!((back.remaining_distance(&home) - 5.0).abs() < 1e-9);
        assert!((round_trip(&home, &Position::new(3.0, 4.0), &home) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_settle_charge() {
        assert_eq!(settle_charge(10.0, 4.0), 4.0);
        assert_eq!(settle_charge(2.0, 2.0 + 1e-14), 2.0);
        assert_eq!(settle_charge(2.0, 2.5), 2.5);
        assert_eq!(settle_charge(-1e-15, 0.0), -1e-15);
    }
}
