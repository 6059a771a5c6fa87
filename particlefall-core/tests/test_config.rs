//! Unit tests for configuration loading and validation

use particlefall_core::{ConfigError, EngineConfig, SimulationConfig};

#[test]
fn test_defaults_match_reference_values() {
    let config = EngineConfig::default();
    assert_eq!(config.particle_size, 0.05);
    assert_eq!(config.air_resistance, 0.98);
    assert_eq!(config.gravity, -0.001);
    assert_eq!(config.lifetime, 5.0);
    assert_eq!(config.wall_damping, 1.2);
    assert_eq!(config.floor_damping, 0.8);
    assert_eq!(config.min_velocity_for_settling, 0.001);
    assert_eq!(config.min_height_for_settling, -0.95);
    assert_eq!(config.min_age_for_settling, 1.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_default_config_round_trips_through_toml() {
    let config = SimulationConfig::default();
    let text = config.to_toml_string().expect("serialize");
    let parsed = SimulationConfig::from_toml_str(&text).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn test_partial_toml_fills_defaults() {
    let source = r#"
tick_rate_hz = 30.0

[engine]
gravity = -0.002
wall_damping = 0.5

[emitter]
particles_per_tick = 4
seed = 7
"#;
    let config = SimulationConfig::from_toml_str(source).expect("parse");

    assert_eq!(config.tick_rate_hz, 30.0);
    assert_eq!(config.engine.gravity, -0.002);
    assert_eq!(config.engine.wall_damping, 0.5);
    assert_eq!(config.engine.lifetime, EngineConfig::default().lifetime);
    assert_eq!(config.emitter.particles_per_tick, 4);
    assert_eq!(config.emitter.seed, Some(7));
    assert_eq!(config.emitter.max_particles, None);
}

#[test]
fn test_empty_toml_is_default() {
    let config = SimulationConfig::from_toml_str("").expect("parse");
    assert_eq!(config, SimulationConfig::default());
}

#[test]
fn test_damping_above_one_is_accepted() {
    let config = EngineConfig {
        wall_damping: 3.0,
        floor_damping: 2.0,
        ..EngineConfig::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_air_resistance_out_of_range_is_rejected() {
    let config = EngineConfig {
        air_resistance: 1.5,
        ..EngineConfig::default()
    };
    match config.validate() {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "air_resistance"),
        other => panic!("expected invalid air_resistance, got {:?}", other),
    }
}

#[test]
fn test_non_finite_value_is_rejected() {
    let config = EngineConfig {
        gravity: f32::NAN,
        ..EngineConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Invalid { field: "gravity", .. })
    ));
}

#[test]
fn test_zero_tick_rate_is_rejected() {
    let result = SimulationConfig::from_toml_str("tick_rate_hz = 0.0");
    assert!(matches!(
        result,
        Err(ConfigError::Invalid { field: "tick_rate_hz", .. })
    ));
}

#[test]
fn test_malformed_toml_is_a_parse_error() {
    let result = SimulationConfig::from_toml_str("[engine\ngravity = ");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_wrong_type_is_a_parse_error() {
    let result = SimulationConfig::from_toml_str("[engine]\nlifetime = \"long\"");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let result = SimulationConfig::from_toml_file("/nonexistent/particlefall.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}
