/// Timing for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Wall-clock delta after clamping, in seconds.
    pub real_dt: f32,
    /// Simulated delta: `real_dt * speed`, or 0 while paused.
    pub sim_dt: f32,
    /// Accumulated simulated time after this frame.
    pub elapsed: f32,
}

/// Simulation clock with a live speed multiplier and a pause switch.
///
/// Every frame advances by the clamped wall-clock delta. Rules linear in
/// `sim_dt` give the same result at any frame rate.
#[derive(Debug, Clone)]
pub struct SimClock {
    elapsed: f32,
    speed: f32,
    paused: bool,
    /// Frame deltas above this are clamped (tab switches, debugger stalls).
    max_dt: f32,
}

impl SimClock {
    pub fn new(speed: f32, max_dt: f32) -> Self {
        Self {
            elapsed: 0.0,
            speed,
            paused: false,
            max_dt,
        }
    }

    /// Advance by one frame of wall-clock time.
    pub fn advance(&mut self, real_dt: f32) -> FrameTime {
        let real_dt = if real_dt.is_finite() { real_dt.clamp(0.0, self.max_dt) } else { 0.0 };
        let sim_dt = if self.paused { 0.0 } else { real_dt * self.speed };
        self.elapsed += sim_dt;
        FrameTime {
            real_dt,
            sim_dt,
            elapsed: self.elapsed,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Flip the pause switch. Returns the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(1.0, 0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_by_speed() {
        let mut clock = SimClock::new(0.5, 1.0);
        let frame = clock.advance(0.1);
        assert!((frame.sim_dt - 0.05).abs() < 1e-6);
        assert!((clock.elapsed() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn pause_freezes_elapsed() {
        let mut clock = SimClock::new(1.0, 1.0);
        clock.advance(0.2);
        clock.toggle_pause();
        let frame = clock.advance(0.2);
        assert_eq!(frame.sim_dt, 0.0);
        assert!((frame.real_dt - 0.2).abs() < 1e-6);
        assert!((clock.elapsed() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn clamps_long_frames() {
        let mut clock = SimClock::new(1.0, 0.1);
        let frame = clock.advance(5.0);
        assert!((frame.real_dt - 0.1).abs() < 1e-6);
    }

    #[test]
    fn rejects_negative_and_nan() {
        let mut clock = SimClock::new(1.0, 0.1);
        assert_eq!(clock.advance(-1.0).sim_dt, 0.0);
        assert_eq!(clock.advance(f32::NAN).sim_dt, 0.0);
    }

    #[test]
    fn granularity_does_not_change_elapsed() {
        let mut coarse = SimClock::new(2.0, 1.0);
        let mut fine = SimClock::new(2.0, 1.0);
        coarse.advance(1.0);
        for _ in 0..10 {
            fine.advance(0.1);
        }
        assert!((coarse.elapsed() - fine.elapsed()).abs() < 1e-5);
    }
}
