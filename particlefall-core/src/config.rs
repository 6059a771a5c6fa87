//! Tunable constants for the engine, the emitter and the driving loop.
//!
//! Configuration values are plain data. They are handed to the engine at
//! construction and only replaced as a whole through
//! [`ParticleEngine::reconfigure`](crate::engine::ParticleEngine::reconfigure).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Physics and lifecycle tunables of a [`ParticleEngine`](crate::ParticleEngine)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Full edge length of a rendered particle quad
    pub particle_size: f32,
    /// Velocity multiplier applied every step
    pub air_resistance: f32,
    /// Added to the vertical velocity every step
    pub gravity: f32,
    /// Seconds until a particle is force-expired
    pub lifetime: f32,
    /// Restitution on the left/right walls. May exceed 1.
    pub wall_damping: f32,
    /// Restitution on the floor and ceiling. May exceed 1.
    pub floor_damping: f32,
    pub min_velocity_for_settling: f32,
    pub min_height_for_settling: f32,
    pub min_age_for_settling: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            particle_size: 0.05,
            air_resistance: 0.98,
            gravity: -0.001,
            lifetime: 5.0,
            wall_damping: 1.2,
            floor_damping: 0.8,
            min_velocity_for_settling: 0.001,
            min_height_for_settling: -0.95,
            min_age_for_settling: 1.0,
        }
    }
}

impl EngineConfig {
    /// Half the quad edge; also the distance kept from every boundary
    pub fn half_extent(&self) -> f32 {
        self.particle_size * 0.5
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let fields = [
            ("particle_size", self.particle_size),
            ("air_resistance", self.air_resistance),
            ("gravity", self.gravity),
            ("lifetime", self.lifetime),
            ("wall_damping", self.wall_damping),
            ("floor_damping", self.floor_damping),
            ("min_velocity_for_settling", self.min_velocity_for_settling),
            ("min_height_for_settling", self.min_height_for_settling),
            ("min_age_for_settling", self.min_age_for_settling),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::invalid(field, "must be finite"));
            }
        }

        if self.particle_size < 0.0 {
            return Err(ConfigError::invalid("particle_size", "must not be negative"));
        }
        if !(0.0..=1.0).contains(&self.air_resistance) {
            return Err(ConfigError::invalid(
                "air_resistance",
                format!("must be within [0, 1], got {}", self.air_resistance),
            ));
        }
        if self.lifetime < 0.0 {
            return Err(ConfigError::invalid("lifetime", "must not be negative"));
        }
        if self.min_age_for_settling < 0.0 {
            return Err(ConfigError::invalid(
                "min_age_for_settling",
                "must not be negative",
            ));
        }

        Ok(())
    }
}

/// Spawn source of the driving loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Height at which particles appear
    pub origin_y: f32,
    /// Spawn x is drawn from `[-half_width, half_width)`
    pub half_width: f32,
    /// Each velocity component is drawn from `[-spread / 2, spread / 2)`
    pub velocity_spread: f32,
    pub particles_per_tick: u32,
    /// Optional population cap; spawning stops while the engine is at the cap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_particles: Option<usize>,
    /// RNG seed, `None` seeds from OS entropy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            origin_y: 0.5,
            half_width: 1.0,
            velocity_spread: 0.06,
            particles_per_tick: 1,
            max_particles: None,
            seed: None,
        }
    }
}

impl EmitterConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.origin_y.is_finite() {
            return Err(ConfigError::invalid("origin_y", "must be finite"));
        }
        if !self.half_width.is_finite() || self.half_width < 0.0 {
            return Err(ConfigError::invalid(
                "half_width",
                "must be finite and not negative",
            ));
        }
        if !self.velocity_spread.is_finite() || self.velocity_spread < 0.0 {
            return Err(ConfigError::invalid(
                "velocity_spread",
                "must be finite and not negative",
            ));
        }
        Ok(())
    }
}

/// Everything needed to drive a [`Simulation`](crate::Simulation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed ticks per second
    pub tick_rate_hz: f64,
    pub engine: EngineConfig,
    pub emitter: EmitterConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60.0,
            engine: EngineConfig::default(),
            emitter: EmitterConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Load and validate a TOML config file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !self.tick_rate_hz.is_finite() || self.tick_rate_hz <= 0.0 {
            return Err(ConfigError::invalid(
                "tick_rate_hz",
                format!("must be a positive number, got {}", self.tick_rate_hz),
            ));
        }
        self.engine.validate()?;
        self.emitter.validate()
    }

    /// Duration of one tick in seconds
    pub fn tick_seconds(&self) -> f64 {
        1.0 / self.tick_rate_hz
    }
}
