//! Per-tick drone telemetry.

use chrono::{DateTime, Utc};
use drone_domain::{Drone, Position};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::flight::{FlightLeg, LegKind};

/// Telemetry snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub run_id: Uuid,
    pub drone_id: String,
    pub tick: u32,
    pub timestamp: DateTime<Utc>,
    pub position: Position,
    pub battery_remaining_pct: f64,
    pub current_weight: f64,
    pub leg: Option<LegKind>,
    pub delivery_id: Option<String>,
    pub stranded: bool,
}

impl TelemetrySnapshot {
    /// Read-only capture of a drone's state.
    pub fn capture(
        run_id: Uuid,
        tick: u32,
        timestamp: DateTime<Utc>,
        drone: &Drone,
        leg: Option<&FlightLeg>,
    ) -> Self {
        Self {
            run_id,
            drone_id: drone.id().to_string(),
            tick,
            timestamp,
            position: drone.current_position(),
            battery_remaining_pct: drone.get_remaining_battery_percentage(),
            current_weight: drone.current_weight(),
            leg: leg.map(|l| l.kind),
            delivery_id: leg.map(|l| l.delivery_id.clone()),
            stranded: drone.is_stranded(),
        }
    }

    /// Below 20% remaining
    pub fn is_battery_critical(&self) -> bool {
        self.battery_remaining_pct < 20.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture() {
        let mut drone = Drone::new("drone1", 5.0, 100.0, 10.0, Position::new(0.0, 0.0));
        drone.load(2.0).unwrap();
        drone.update_position(Position::new(3.0, 4.0), 85.0);

        let leg = FlightLeg::outbound(
            "delivery1",
            &Position::new(0.0, 0.0),
            Position::new(6.0, 8.0),
            2.0,
        );
        let snap = TelemetrySnapshot::capture(Uuid::new_v4(), 3, Utc::now(), &drone, Some(&leg));

        assert_eq!(snap.drone_id, "drone1");
        assert_eq!(snap.tick, 3);
        assert_eq!(snap.position, Position::new(3.0, 4.0));
        assert_eq!(snap.battery_remaining_pct, 15.0);
        assert_eq!(snap.current_weight, 2.0);
        assert_eq!(snap.leg, Some(LegKind::Outbound));
        assert_eq!(snap.delivery_id.as_deref(), Some("delivery1"));
        assert!(!snap.stranded);
        assert!(snap.is_battery_critical());
    }
}
