//! Unit tests for the explicit Euler step

use glam::Vec2;
use particlefall_core::tests::test_helpers::{engine_with_particles, frictionless_config};
use particlefall_core::{EngineConfig, ParticleEngine};

#[test]
fn test_integrate_matches_closed_form() {
    let config = EngineConfig {
        gravity: -0.001,
        air_resistance: 0.98,
        ..EngineConfig::default()
    };
    let mut engine = engine_with_particles(config, &[(0.1, 0.5, 0.02, -0.01)]);

    let mut pos = Vec2::new(0.1, 0.5);
    let mut vel = Vec2::new(0.02, -0.01);
    for _ in 0..120 {
        engine.integrate();

        pos.x += vel.x;
        pos.y += vel.y;
        vel.y += config.gravity;
        vel.x *= config.air_resistance;
        vel.y *= config.air_resistance;
    }

    let particle = engine.particles()[0];
    assert_eq!(particle.pos, pos);
    assert_eq!(particle.vel, vel);
}

#[test]
fn test_position_uses_pre_gravity_velocity() {
    let config = EngineConfig {
        gravity: -0.5,
        air_resistance: 1.0,
        ..EngineConfig::default()
    };
    let mut engine = engine_with_particles(config, &[(0.0, 0.0, 0.0, 0.0)]);

    engine.integrate();

    let particle = engine.particles()[0];
    // Gravity only reaches the position on the following step
    assert_eq!(particle.pos, Vec2::ZERO);
    assert_eq!(particle.vel, Vec2::new(0.0, -0.5));

    engine.integrate();
    assert_eq!(engine.particles()[0].pos, Vec2::new(0.0, -0.5));
}

#[test]
fn test_air_resistance_scales_both_axes() {
    let config = EngineConfig {
        gravity: 0.0,
        air_resistance: 0.5,
        ..EngineConfig::default()
    };
    let mut engine = engine_with_particles(config, &[(0.0, 0.0, 0.4, -0.2)]);

    engine.integrate();

    let particle = engine.particles()[0];
    assert_eq!(particle.pos, Vec2::new(0.4, -0.2));
    assert_eq!(particle.vel, Vec2::new(0.2, -0.1));
}

#[test]
fn test_integrate_is_deterministic() {
    let particles = [(0.0, 0.5, 0.013, 0.021), (-0.7, 0.5, -0.029, 0.004)];
    let mut a = engine_with_particles(EngineConfig::default(), &particles);
    let mut b = engine_with_particles(EngineConfig::default(), &particles);

    for _ in 0..500 {
        a.integrate();
        a.resolve_collisions();
        b.integrate();
        b.resolve_collisions();
    }

    assert_eq!(a.particles(), b.particles());
}

#[test]
fn test_overlapping_particles_do_not_interact() {
    let mut pair = engine_with_particles(
        frictionless_config(),
        &[(0.0, 0.0, 0.01, 0.0), (0.0, 0.0, -0.01, 0.0)],
    );
    let mut alone = engine_with_particles(frictionless_config(), &[(0.0, 0.0, 0.01, 0.0)]);

    for _ in 0..10 {
        pair.integrate();
        pair.resolve_collisions();
        alone.integrate();
        alone.resolve_collisions();
    }

    assert_eq!(pair.particles()[0], alone.particles()[0]);
    assert_eq!(pair.particles()[1].vel, Vec2::new(-0.01, 0.0));
}

#[test]
fn test_integrate_empty_engine() {
    let mut engine = ParticleEngine::new(EngineConfig::default());
    engine.integrate();
    engine.resolve_collisions();
    assert!(engine.is_empty());
}
