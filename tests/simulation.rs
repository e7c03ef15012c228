use approx::{assert_abs_diff_eq, assert_relative_eq};
use gravity_sim::{
    BodyConfig, BodyId, ForceModel, NewtonianGravity, PhysicsConfig, ScenarioConfig, SimError,
    Simulation, Snapshot, Vector,
};

const FRAME_MS: f64 = 16.67;

/// The symmetric two-body setup: equal masses at (±128, 0) moving at ±2.4.
fn two_body() -> Simulation {
    Simulation::from_scenario(&ScenarioConfig::two_body()).expect("valid scenario")
}

fn run(frames: usize) -> Snapshot {
    let mut sim = two_body();
    for _ in 0..frames {
        sim.tick(FRAME_MS).unwrap();
    }
    sim.snapshot()
}

fn three_body() -> Vec<BodyConfig> {
    vec![
        BodyConfig::new("a", Vector::new(0.0, 0.0), 50.0, 10.0),
        BodyConfig::new("b", Vector::new(100.0, 0.0), 50.0, 20.0),
        BodyConfig::new("c", Vector::new(0.0, 200.0), 50.0, 40.0),
    ]
}

#[test]
fn two_body_scenario_matches_configuration() {
    let snapshot = two_body().snapshot();
    let ids: Vec<&str> = snapshot.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, ["1", "2"]);
    assert_eq!(snapshot.bodies()[0].velocity, Vector::new(0.0, 2.4));
    assert_eq!(snapshot.bodies()[1].velocity, Vector::new(0.0, -2.4));
    assert_eq!(snapshot.bodies()[0].mass, 100.0);
}

#[test]
fn two_body_conserves_center_of_mass_velocity() {
    let mut sim = two_body();
    let initial = sim.center_of_mass_velocity();
    for _ in 0..600 {
        sim.tick(FRAME_MS).unwrap();
        let current = sim.center_of_mass_velocity();
        assert_abs_diff_eq!(current.x(), initial.x(), epsilon = 1e-9);
        assert_abs_diff_eq!(current.y(), initial.y(), epsilon = 1e-9);
    }
    assert_eq!(sim.tick_count(), 600);
    assert_relative_eq!(sim.elapsed_seconds(), 600.0 * FRAME_MS / 1000.0, max_relative = 1e-9);
}

#[test]
fn two_body_run_is_bit_for_bit_reproducible() {
    let first = run(600);
    let second = run(600);
    assert_eq!(first, second);
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.position.x().to_bits(), b.position.x().to_bits());
        assert_eq!(a.position.y().to_bits(), b.position.y().to_bits());
        assert_eq!(a.velocity.x().to_bits(), b.velocity.x().to_bits());
        assert_eq!(a.velocity.y().to_bits(), b.velocity.y().to_bits());
    }
}

#[test]
fn two_body_stays_finite_and_symmetric() {
    let snapshot = run(600);
    let (a, b) = (&snapshot.bodies()[0], &snapshot.bodies()[1]);
    assert!(a.position.is_finite() && a.velocity.is_finite());
    assert_eq!(a.position.clone(), -b.position.clone());
    assert_eq!(a.velocity.clone(), -b.velocity.clone());
    // they have fallen towards each other
    assert!(a.position.magnitude() < 128.0);
}

#[test]
fn zero_tick_is_a_no_op() {
    let mut sim = two_body();
    sim.tick(FRAME_MS).unwrap();
    let before: Vec<_> = sim.bodies().to_vec();
    sim.tick(0.0).unwrap();
    for (a, b) in before.iter().zip(sim.bodies()) {
        assert_eq!(a.position(), b.position());
        assert_eq!(a.velocity(), b.velocity());
        assert_eq!(a.acceleration(), b.acceleration());
    }
}

#[test]
fn tick_before_reset_fails() {
    let mut sim = Simulation::new();
    assert!(matches!(sim.tick(FRAME_MS), Err(SimError::NotInitialized)));
}

#[test]
fn set_mass_zero_is_clamped_to_one() {
    let mut sim = two_body();
    sim.set_mass(&BodyId::from("1"), 0.0).unwrap();
    assert_eq!(sim.snapshot().get(&BodyId::from("1")).unwrap().mass, 1.0);
}

#[test]
fn set_mass_unknown_id_fails() {
    let mut sim = two_body();
    let err = sim.set_mass(&BodyId::from("nonexistent"), 50.0).unwrap_err();
    assert!(matches!(err, SimError::UnknownBodyId(ref id) if id.as_str() == "nonexistent"));
    // the loop keeps running after a bad mutator call
    sim.tick(FRAME_MS).unwrap();
}

#[test]
fn inverse_square_law() {
    let gravity = NewtonianGravity::default();
    let force_at = |distance: f64| {
        let mut sim = Simulation::new();
        sim.reset(&[
            BodyConfig::new("a", Vector::new(0.0, 0.0), 50.0, 30.0),
            BodyConfig::new("b", Vector::new(distance, 0.0), 50.0, 70.0),
        ])
        .unwrap();
        sim.net_force(&BodyId::from("a")).unwrap().magnitude()
    };
    assert_relative_eq!(force_at(40.0) / force_at(80.0), 4.0, max_relative = 1e-9);
    assert_relative_eq!(
        force_at(40.0),
        gravity.gravitational_constant * 30.0 * 70.0 / 1600.0,
        max_relative = 1e-12
    );
}

#[test]
fn force_scales_with_each_mass_independently() {
    let force_with = |m1: f64, m2: f64| {
        let mut sim = Simulation::new();
        sim.reset(&[
            BodyConfig::new("a", Vector::new(0.0, 0.0), 50.0, m1),
            BodyConfig::new("b", Vector::new(0.0, 30.0), 50.0, m2),
        ])
        .unwrap();
        sim.net_force(&BodyId::from("a")).unwrap().magnitude()
    };
    let base = force_with(10.0, 10.0);
    assert_relative_eq!(force_with(20.0, 10.0) / base, 2.0, max_relative = 1e-12);
    assert_relative_eq!(force_with(10.0, 50.0) / base, 5.0, max_relative = 1e-12);
    assert_relative_eq!(force_with(20.0, 50.0) / base, 10.0, max_relative = 1e-12);
}

#[test]
fn three_body_net_force_is_sum_of_both_pairs() {
    let mut sim = Simulation::new();
    sim.reset(&three_body()).unwrap();
    let gravity = sim.force_model().clone();
    let bodies = sim.bodies();

    for (i, target) in bodies.iter().enumerate() {
        let contributions: Vec<Vector> = bodies
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, source)| gravity.pairwise_force(target, source).unwrap())
            .collect();
        assert_eq!(contributions.len(), 2);

        let expected: Vector = contributions.into_iter().sum();
        let net = sim.net_force(target.id()).unwrap();
        assert_relative_eq!(net.x(), expected.x(), max_relative = 1e-12);
        assert_relative_eq!(net.y(), expected.y(), max_relative = 1e-12);
    }

    // "a" is pulled by both neighbours, not just the first one
    let on_a = sim.net_force(&BodyId::from("a")).unwrap();
    assert!(on_a.x() > 0.0 && on_a.y() > 0.0);
}

#[test]
fn three_body_conserves_momentum() {
    let mut sim = Simulation::new();
    sim.reset(&three_body()).unwrap();
    let initial = sim.total_momentum();
    for _ in 0..300 {
        sim.tick(FRAME_MS).unwrap();
    }
    let current = sim.total_momentum();
    assert_abs_diff_eq!(current.x(), initial.x(), epsilon = 1e-6);
    assert_abs_diff_eq!(current.y(), initial.y(), epsilon = 1e-6);
}

#[test]
fn coincident_bodies_do_not_produce_nan() {
    let mut sim = Simulation::new();
    sim.reset(&[
        BodyConfig::new("a", Vector::new(5.0, 5.0), 50.0, 10.0),
        BodyConfig::new("b", Vector::new(5.0, 5.0), 50.0, 10.0),
        BodyConfig::new("c", Vector::new(5.0, 5.3), 50.0, 10.0),
    ])
    .unwrap();
    for _ in 0..10 {
        sim.tick(FRAME_MS).unwrap();
    }
    for body in &sim.snapshot() {
        assert!(body.position.is_finite(), "{} went non-finite", body.id);
        assert!(body.velocity.is_finite(), "{} went non-finite", body.id);
    }
}

#[test]
fn close_encounter_force_is_bounded() {
    let physics = PhysicsConfig {
        gravitational_constant: 1.0,
        min_distance: 2.0,
    };
    let mut sim = Simulation::from_physics(&physics);
    sim.reset(&[
        BodyConfig::new("a", Vector::new(0.0, 0.0), 50.0, 3.0),
        BodyConfig::new("b", Vector::new(0.001, 0.0), 50.0, 4.0),
    ])
    .unwrap();
    let force = sim.net_force(&BodyId::from("a")).unwrap();
    assert_relative_eq!(force.magnitude(), 3.0, max_relative = 1e-12);
}

#[test]
fn reset_replaces_the_whole_body_set() {
    let mut sim = two_body();
    sim.tick(FRAME_MS).unwrap();
    sim.reset(&three_body()).unwrap();
    let ids: Vec<String> = sim.snapshot().iter().map(|b| b.id.to_string()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
    assert!(sim.body(&BodyId::from("1")).is_none());
}

#[test]
fn color_hint_passes_through_to_snapshot() {
    let snapshot = two_body().snapshot();
    assert_eq!(snapshot.bodies()[0].color_hint.as_deref(), Some("rgb(200, 0, 0)"));
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["bodies"][1]["color_hint"], "rgb(0, 200, 0)");
    assert_eq!(json["bodies"][0]["position"]["x"], 128.0);
}

#[test]
fn heavy_bodies_far_apart_still_attract() {
    let physics = PhysicsConfig {
        gravitational_constant: 1.0,
        min_distance: 1.0,
    };
    let mut sim = Simulation::from_physics(&physics);
    sim.reset(&[
        BodyConfig::new("a", Vector::new(0.0, 0.0), 50.0, 1e300),
        BodyConfig::new("b", Vector::new(1e160, 0.0), 50.0, 1e300),
    ])
    .unwrap();
    let force = sim.net_force(&BodyId::from("a")).unwrap();
    assert!(force.is_finite());
    assert_relative_eq!(force.x(), 1e280, max_relative = 1e-12);
    sim.tick(FRAME_MS).unwrap();
    assert!(sim.bodies().iter().all(|b| b.position().is_finite()));
}
