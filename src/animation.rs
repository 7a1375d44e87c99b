use crate::timer::Timer;
use crate::wave::WaveView;
use utils::signal::CancelSignal;

/// Time in seconds for the waves to move one full view width
pub const DEFAULT_WAVE_SHIFT_PERIOD: f32 = 1.0;

/// Handle returned when an animation starts, it can be cloned and sent to
/// other threads to stop it.
#[derive(Clone, Debug, Default)]
pub struct AnimationHandle(CancelSignal);

impl AnimationHandle {
    /// Stops the animation, the last drawn frame stays as it is
    pub fn cancel(&self) {
        self.0.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.is_cancelled()
    }
}

/// Loops the wave shift ratio from 0 to 1, driven by external ticks
#[derive(Debug)]
pub struct WaveShiftAnimation {
    timer: Timer,
    handle: Option<AnimationHandle>,
}

impl Default for WaveShiftAnimation {
    fn default() -> Self {
        Self::new(DEFAULT_WAVE_SHIFT_PERIOD)
    }
}

impl WaveShiftAnimation {
    pub fn new(period: f32) -> Self {
        Self {
            timer: Timer::new(period),
            handle: None,
        }
    }

    /// Shows the waves and starts the loop from the beginning
    pub fn start(&mut self, view: &mut WaveView) -> AnimationHandle {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }

        view.set_show_wave(true);
        view.set_wave_shift_ratio(0.0);
        self.timer.restart();

        let handle = AnimationHandle::default();
        self.handle = Some(handle.clone());
        log::debug!("Wave shift animation started");
        handle
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_cancelled())
    }

    /// Advances the animation, returns false once it is not running anymore
    pub fn tick(&mut self, delta: f32, view: &mut WaveView) -> bool {
        if !self.is_running() {
            if self.handle.take().is_some() {
                log::debug!("Wave shift animation cancelled");
            }
            return false;
        }

        self.timer.tick(delta);
        view.set_wave_shift_ratio(self.timer.progress());
        true
    }
}
