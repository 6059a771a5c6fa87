pub mod clock;
pub mod config;
pub mod emitter;
pub mod engine;
pub mod geometry;
pub mod simulation;

pub use clock::{FixedTimestep, MAX_STEPS_PER_FRAME};
pub use config::{ConfigError, ConfigResult, EmitterConfig, EngineConfig, SimulationConfig};
pub use emitter::Emitter;
pub use engine::{EngineStats, ExpiryReason, ExpiryReport, Particle, ParticleEngine};
pub use geometry::{RenderGeometry, INDICES_PER_QUAD, QUAD_INDICES, VERTICES_PER_QUAD};
pub use simulation::{run_headless, Simulation, SimulationSummary, TickReport};
