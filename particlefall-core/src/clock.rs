use std::time::Duration;

/// Most ticks a single frame may run before the backlog is dropped
pub const MAX_STEPS_PER_FRAME: u32 = 8;

/// Turns elapsed wall time into a whole number of fixed-rate ticks.
///
/// Drivers sleep for [`FixedTimestep::time_until_next_step`] between frames
/// instead of polling the clock.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimestep {
    step_seconds: f64,
    accumulator_seconds: f64,
}

impl FixedTimestep {
    pub fn new(rate_hz: f64) -> Self {
        Self {
            step_seconds: 1.0 / rate_hz,
            accumulator_seconds: 0.0,
        }
    }

    pub fn step_seconds(&self) -> f64 {
        self.step_seconds
    }

    pub fn step_duration(&self) -> Duration {
        Duration::from_secs_f64(self.step_seconds)
    }

    /// Add `frame_dt_seconds` of elapsed time and return how many ticks are due
    pub fn consume_steps(&mut self, frame_dt_seconds: f64) -> u32 {
        self.accumulator_seconds += frame_dt_seconds.max(0.0);
        let mut steps = 0u32;
        while self.accumulator_seconds >= self.step_seconds {
            self.accumulator_seconds -= self.step_seconds;
            steps += 1;
            if steps >= MAX_STEPS_PER_FRAME {
                if self.accumulator_seconds >= self.step_seconds {
                    tracing::warn!(
                        target: "clock",
                        dropped_seconds = self.accumulator_seconds,
                        "simulation fell behind, dropping backlog"
                    );
                }
                self.accumulator_seconds = 0.0;
                break;
            }
        }
        steps
    }

    /// Wall time left until the next tick is due
    pub fn time_until_next_step(&self) -> Duration {
        Duration::from_secs_f64((self.step_seconds - self.accumulator_seconds).max(0.0))
    }

    pub fn reset(&mut self) {
        self.accumulator_seconds = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::{FixedTimestep, MAX_STEPS_PER_FRAME};

    #[test]
    fn fixed_clock_caps_steps() {
        let mut clock = FixedTimestep::new(120.0);
        let steps = clock.consume_steps(0.5);
        assert_eq!(steps, MAX_STEPS_PER_FRAME);
        assert_eq!(clock.consume_steps(0.0), 0);
    }

    #[test]
    fn partial_frames_accumulate() {
        let mut clock = FixedTimestep::new(60.0);
        assert_eq!(clock.consume_steps(0.01), 0);
        assert_eq!(clock.consume_steps(0.01), 1);
        assert!(clock.time_until_next_step() < clock.step_duration());
    }

    #[test]
    fn negative_frame_time_is_ignored() {
        let mut clock = FixedTimestep::new(60.0);
        assert_eq!(clock.consume_steps(-1.0), 0);
        assert_eq!(clock.time_until_next_step(), clock.step_duration());
    }
}
