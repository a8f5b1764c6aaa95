use drone_domain::{Drone, DroneRecord, Position};
use proptest::prelude::*;

fn position() -> impl Strategy<Value = Position> {
    (-1000.0..1000.0f64, -1000.0..1000.0f64).prop_map(|(x, y)| Position::new(x, y))
}

fn drone() -> impl Strategy<Value = Drone> {
    (".*", 0.0..50.0f64, 0.0..500.0f64, 0.1..30.0f64, position()).prop_map(
        |(id, max_weight, battery, speed, start)| Drone::new(id, max_weight, battery, speed, start),
    )
}

proptest! {
    #[test]
    fn prop_can_carry_within_capacity(max_weight in 0.0..100.0f64, a in 0.0..1.0f64, b in 0.0..1.0f64) {
        let w1 = max_weight * a;
        let w2 = (max_weight - w1) * b;
        prop_assume!(w1 + w2 <= max_weight);
        let mut drone = Drone::new("d", max_weight, 10.0, 1.0, Position::default());
        drone.load(w1).unwrap();
        prop_assert!(drone.can_carry(w2));
    }

    #[test]
    fn prop_sufficient_battery_iff_covered(battery in -100.0..500.0f64, distance in -100.0..600.0f64) {
        let drone = Drone::builder("d", 1.0, 500.0, 1.0, Position::default())
            .with_current_battery(battery)
            .build()
            .unwrap();
        prop_assert_eq!(drone.has_sufficient_battery(distance), battery >= distance);
        prop_assert!(drone.has_sufficient_battery(battery));
    }

    #[test]
    fn prop_update_position_spends_exact_distance(
        drone in drone(),
        moves in prop::collection::vec((position(), 0.0..300.0f64), 1..8),
    ) {
        let mut drone = drone;
        for (target, distance) in moves {
            let before = drone.current_battery();
            let route_len = drone.route().len();

            drone.update_position(target, distance);

            prop_assert_eq!(drone.current_position(), target);
            prop_assert_eq!(drone.current_battery(), before - distance);
            prop_assert_eq!(drone.route().len(), route_len + 1);
            prop_assert_eq!(drone.route().last().copied(), Some(target));
            prop_assert_eq!(drone.route()[0], drone.start_position());
        }
    }

    #[test]
    fn prop_reset_restores_initial_state(
        drone in drone(),
        moves in prop::collection::vec((position(), 0.0..300.0f64), 0..8),
        payload in 0.0..1.0f64,
    ) {
        let mut drone = drone;
        let initial = drone.clone();
        let _ = drone.load(drone.max_weight() * payload);
        for (target, distance) in moves {
            drone.update_position(target, distance);
        }

        drone.reset();
        prop_assert_eq!(drone, initial);
    }

    #[test]
    fn prop_record_round_trip(
        drone in drone(),
        moves in prop::collection::vec((position(), 0.0..300.0f64), 0..8),
        payload in 0.0..1.0f64,
    ) {
        let mut drone = drone;
        drone.load(drone.max_weight() * payload).unwrap();
        for (target, distance) in moves {
            drone.update_position(target, distance);
        }

        let restored = Drone::from_record(drone.to_record()).unwrap();
        prop_assert_eq!(&restored, &drone);

        let json = serde_json::to_string(&drone).unwrap();
        let parsed: Drone = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(&parsed, &drone);

        let record = DroneRecord::from_json(&drone.to_record().to_json().unwrap()).unwrap();
        prop_assert_eq!(Drone::from_record(record).unwrap(), drone);
    }
}
