use crate::config::EngineConfig;
use crate::geometry::RenderGeometry;
use glam::Vec2;

/// A single live particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    /// Displacement per step
    pub vel: Vec2,
    /// Absolute simulation time after which the particle times out
    pub deadline: f64,
    /// Absolute simulation time of the spawn
    pub spawned_at: f64,
}

impl Particle {
    /// Seconds since the spawn, measured at `now`
    pub fn age(&self, now: f64) -> f64 {
        now - self.spawned_at
    }
}

/// Why a particle left the live set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpiryReason {
    /// Its deadline passed
    Timeout,
    /// It came to rest near the floor after the grace period
    Settled,
}

/// Outcome of a single [`ParticleEngine::expire_particles`] pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpiryReport {
    pub timed_out: usize,
    pub settled: usize,
}

impl ExpiryReport {
    pub fn total(&self) -> usize {
        self.timed_out + self.settled
    }

    fn record(&mut self, reason: ExpiryReason) {
        match reason {
            ExpiryReason::Timeout => self.timed_out += 1,
            ExpiryReason::Settled => self.settled += 1,
        }
    }
}

/// Cumulative counters since the engine was created or cleared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub spawned: u64,
    pub timed_out: u64,
    pub settled: u64,
}

/// Owns the particle population and advances it one step at a time.
///
/// The engine keeps no upper bound on its population. Callers that spawn
/// faster than particles expire must cap the population themselves (see
/// [`EmitterConfig::max_particles`](crate::EmitterConfig::max_particles)).
#[derive(Debug, Clone)]
pub struct ParticleEngine {
    config: EngineConfig,
    particles: Vec<Particle>,
    now: f64,
    stats: EngineStats,
}

impl ParticleEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_time(config, 0.0)
    }

    /// Create an engine whose clock starts at `now`
    pub fn with_time(config: EngineConfig, now: f64) -> Self {
        Self {
            config,
            particles: Vec::new(),
            now,
            stats: EngineStats::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the tunables between steps.
    ///
    /// Live particles keep the deadline they were spawned with; the new
    /// lifetime only applies to later spawns.
    pub fn reconfigure(&mut self, config: EngineConfig) {
        tracing::debug!(target: "engine", ?config, "engine reconfigured");
        self.config = config;
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn set_time(&mut self, now: f64) {
        self.now = now;
    }

    pub fn advance_time(&mut self, dt: f64) {
        self.now += dt;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Drop every particle and reset the counters
    pub fn clear(&mut self) {
        self.particles.clear();
        self.stats = EngineStats::default();
    }

    /// Append a particle. Positions outside the unit box are accepted and get
    /// pulled back by the next collision pass.
    pub fn spawn(&mut self, pos_x: f32, pos_y: f32, vel_x: f32, vel_y: f32) {
        self.particles.push(Particle {
            pos: Vec2::new(pos_x, pos_y),
            vel: Vec2::new(vel_x, vel_y),
            deadline: self.now + f64::from(self.config.lifetime),
            spawned_at: self.now,
        });
        self.stats.spawned += 1;
    }

    /// Advance every particle by one explicit Euler step.
    ///
    /// The position moves with the velocity of the previous step; gravity and
    /// drag are applied to the velocity afterwards.
    pub fn integrate(&mut self) {
        let gravity = self.config.gravity;
        let drag = self.config.air_resistance;

        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.vel.y += gravity;
            particle.vel *= drag;
        }
    }

    /// Clamp particles into the box and bounce them off its edges.
    ///
    /// Both axes are tested independently, so a corner hit reflects both
    /// velocity components in the same pass.
    pub fn resolve_collisions(&mut self) {
        let bound = self.config.half_extent();
        let min = -1.0 + bound;
        let max = 1.0 - bound;
        let wall = self.config.wall_damping;
        let floor = self.config.floor_damping;

        for particle in &mut self.particles {
            if let Some(x) = clamp_to_box(particle.pos.x, min, max) {
                particle.pos.x = x;
                particle.vel.x *= -wall;
            }
            if let Some(y) = clamp_to_box(particle.pos.y, min, max) {
                particle.pos.y = y;
                particle.vel.y *= -floor;
            }
        }
    }

    /// The expiry policy for one particle at the current time
    pub fn expiry_reason(&self, particle: &Particle) -> Option<ExpiryReason> {
        expiry_reason_at(&self.config, particle, self.now)
    }

    /// Remove every particle that timed out or settled.
    ///
    /// Survivors keep their relative order. The population is compacted in a
    /// single pass, so two adjacent expiring particles are both removed.
    pub fn expire_particles(&mut self) -> ExpiryReport {
        let mut report = ExpiryReport::default();
        let now = self.now;
        let config = self.config;

        self.particles.retain(|particle| {
            match expiry_reason_at(&config, particle, now) {
                Some(reason) => {
                    report.record(reason);
                    false
                }
                None => true,
            }
        });

        self.stats.timed_out += report.timed_out as u64;
        self.stats.settled += report.settled as u64;

        if report.total() > 0 {
            tracing::trace!(
                target: "engine",
                timed_out = report.timed_out,
                settled = report.settled,
                live = self.particles.len(),
                "expired particles"
            );
        }

        report
    }

    /// Project the live set into quads for the renderer
    pub fn export_render_geometry(&self) -> RenderGeometry {
        RenderGeometry::from_particles(&self.particles, self.config.half_extent())
    }
}

fn expiry_reason_at(
    config: &EngineConfig,
    particle: &Particle,
    now: f64,
) -> Option<ExpiryReason> {
    if particle.deadline < now {
        return Some(ExpiryReason::Timeout);
    }

    let resting = particle.pos.y < config.min_height_for_settling
        && particle.vel.y.abs() < config.min_velocity_for_settling;
    if resting && particle.age(now) > f64::from(config.min_age_for_settling) {
        return Some(ExpiryReason::Settled);
    }

    None
}

/// `Some(boundary)` when `value` lies outside `[min, max]`
fn clamp_to_box(value: f32, min: f32, max: f32) -> Option<f32> {
    if value < min {
        Some(min)
    } else if value > max {
        Some(max)
    } else {
        None
    }
}
