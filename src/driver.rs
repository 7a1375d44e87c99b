use crate::curtain::FillCurtain;
use crate::wave::WaveView;

pub const DEFAULT_FILL_STEP: f32 = 0.1;
pub const DEFAULT_WATER_LEVEL_SCALE: f32 = 0.9;

/// Owns the fill fraction of a container and pushes it to the renderers
#[derive(Debug, Clone)]
pub struct FillDriver {
    fraction: f32,
    step: f32,
    water_level_scale: f32,
}

impl Default for FillDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FillDriver {
    pub fn new() -> Self {
        Self {
            fraction: 0.0,
            step: DEFAULT_FILL_STEP,
            water_level_scale: DEFAULT_WATER_LEVEL_SCALE,
        }
    }

    /// Amount added or removed on each increase or decrease
    pub fn with_step(mut self, step: f32) -> Self {
        debug_assert!(step > 0.0, "Fill step must be greater than 0");
        self.step = step;
        self
    }

    /// Factor applied to the fraction to get the wave water level
    pub fn with_water_level_scale(mut self, scale: f32) -> Self {
        self.water_level_scale = scale;
        self
    }

    pub fn with_fraction(mut self, fraction: f32) -> Self {
        self.fraction = round2(fraction.clamp(0.0, 1.0));
        self
    }

    /// Current fraction in [0, 1], rounded to 2 decimals
    #[inline]
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    #[inline]
    pub fn water_level(&self) -> f32 {
        self.fraction * self.water_level_scale
    }

    #[inline]
    pub fn can_increase(&self) -> bool {
        self.fraction < 1.0
    }

    #[inline]
    pub fn can_decrease(&self) -> bool {
        self.fraction > 0.0
    }

    /// Adds one step, returns false if the container was already full
    pub fn increase(&mut self) -> bool {
        if !self.can_increase() {
            return false;
        }

        self.set_fraction(self.fraction + self.step);
        true
    }

    /// Removes one step, returns false if the container was already empty
    pub fn decrease(&mut self) -> bool {
        if !self.can_decrease() {
            return false;
        }

        self.set_fraction(self.fraction - self.step);
        true
    }

    /// Pushes the fraction to the curtain and the scaled level to the wave
    pub fn apply(&self, view: &mut WaveView, curtain: &mut FillCurtain) -> Result<(), String> {
        curtain.set_fraction(self.fraction)?;
        view.set_water_level_ratio(self.water_level());
        Ok(())
    }

    fn set_fraction(&mut self, fraction: f32) {
        self.fraction = round2(fraction.clamp(0.0, 1.0));
        log::debug!("Fill fraction set to {}", self.fraction);
    }
}

#[inline]
fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
