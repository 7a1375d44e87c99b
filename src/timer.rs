/// Looping timer advanced by external ticks, used to drive periodic animations
#[derive(Debug, Clone)]
pub struct Timer {
    duration: f32,
    elapsed: f32,
}

impl Timer {
    pub fn new(duration: f32) -> Self {
        debug_assert!(duration > 0.0, "Timer duration must be greater than 0");
        Self {
            duration,
            elapsed: 0.0,
        }
    }

    /// Advances the timer by `delta` seconds, starting a new cycle each time it reaches the end
    pub fn tick(&mut self, delta: f32) {
        self.elapsed += delta.max(0.0);
        if self.duration > 0.0 && self.elapsed >= self.duration {
            // big deltas can wrap more than one cycle at once
            self.elapsed = self.elapsed.rem_euclid(self.duration);
        }
    }

    /// Starts the timer again from zero
    #[inline]
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
    }

    /// Value between 0 and 1 for the current cycle
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }

        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }
}
