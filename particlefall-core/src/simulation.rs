use crate::config::SimulationConfig;
use crate::emitter::Emitter;
use crate::engine::{EngineStats, ExpiryReport, ParticleEngine};
use crate::geometry::RenderGeometry;

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub expired: ExpiryReport,
    pub spawned: usize,
    pub live: usize,
}

/// Final state of a run without a renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSummary {
    pub ticks: u64,
    pub elapsed_seconds: f64,
    pub live: usize,
    pub stats: EngineStats,
}

/// Engine plus emitter, driven one fixed tick at a time
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    engine: ParticleEngine,
    emitter: Emitter,
    ticks: u64,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            engine: ParticleEngine::new(config.engine),
            emitter: Emitter::new(config.emitter),
            config,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn engine(&self) -> &ParticleEngine {
        &self.engine
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Geometry of the current state. Drivers render this before calling
    /// [`Simulation::tick`], so a frame shows the previous step's result.
    pub fn render_geometry(&self) -> RenderGeometry {
        self.engine.export_render_geometry()
    }

    /// Run one fixed step: expire, integrate, collide, then spawn
    pub fn tick(&mut self) -> TickReport {
        self.engine.advance_time(self.config.tick_seconds());

        let expired = self.engine.expire_particles();
        self.engine.integrate();
        self.engine.resolve_collisions();
        let spawned = self.emitter.emit(&mut self.engine);

        self.ticks += 1;

        TickReport {
            expired,
            spawned,
            live: self.engine.particle_count(),
        }
    }

    /// Apply a new configuration between ticks. Live particles are kept.
    pub fn reconfigure(&mut self, config: SimulationConfig) {
        tracing::info!(
            target: "simulation",
            tick_rate_hz = config.tick_rate_hz,
            "applying new configuration"
        );
        self.engine.reconfigure(config.engine);
        self.emitter.reconfigure(config.emitter);
        self.config = config;
    }

    /// Drop all particles and restart the clock
    pub fn reset(&mut self) {
        self.engine.clear();
        self.engine.set_time(0.0);
        self.emitter = Emitter::new(self.config.emitter);
        self.ticks = 0;
    }

    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            ticks: self.ticks,
            elapsed_seconds: self.engine.now(),
            live: self.engine.particle_count(),
            stats: self.engine.stats(),
        }
    }
}

/// Run `ticks` steps without a renderer
pub fn run_headless(config: SimulationConfig, ticks: u64) -> SimulationSummary {
    let mut simulation = Simulation::new(config);
    for _ in 0..ticks {
        simulation.tick();
    }

    let summary = simulation.summary();
    tracing::info!(
        target: "simulation",
        ticks = summary.ticks,
        live = summary.live,
        spawned = summary.stats.spawned,
        "headless run finished"
    );
    summary
}
