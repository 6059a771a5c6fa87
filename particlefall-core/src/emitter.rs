use crate::config::EmitterConfig;
use crate::engine::ParticleEngine;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Spawn source along a horizontal band.
///
/// Every tick it drops `particles_per_tick` particles at a random x within
/// the band, each with a random velocity inside the configured spread.
#[derive(Debug, Clone)]
pub struct Emitter {
    config: EmitterConfig,
    rng: StdRng,
}

impl Emitter {
    pub fn new(config: EmitterConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Swap the configuration. The RNG is only reseeded when the seed changed.
    pub fn reconfigure(&mut self, config: EmitterConfig) {
        if config.seed != self.config.seed {
            *self = Self::new(config);
        } else {
            self.config = config;
        }
    }

    /// Spawn this tick's particles into `engine`, returning how many were added
    pub fn emit(&mut self, engine: &mut ParticleEngine) -> usize {
        let mut spawned = 0;

        for _ in 0..self.config.particles_per_tick {
            if let Some(cap) = self.config.max_particles {
                if engine.particle_count() >= cap {
                    break;
                }
            }

            let x = symmetric(&mut self.rng, self.config.half_width);
            let half_spread = self.config.velocity_spread * 0.5;
            let vel_x = symmetric(&mut self.rng, half_spread);
            let vel_y = symmetric(&mut self.rng, half_spread);

            engine.spawn(x, self.config.origin_y, vel_x, vel_y);
            spawned += 1;
        }

        spawned
    }
}

/// Uniform sample from `[-half, half)`; zero for an empty range
fn symmetric(rng: &mut StdRng, half: f32) -> f32 {
    if half > 0.0 {
        rng.gen_range(-half..half)
    } else {
        0.0
    }
}
