use std::time::{Duration, Instant};

/// Wall-clock frame timing for the application loop.
///
/// Produces the per-frame Δt handed to the simulation. Long stalls (window
/// drags, debugger breaks) are clamped so a single frame never integrates
/// more than `max_step` seconds.
#[derive(Debug)]
pub struct FrameClock {
    last_frame: Instant,
    elapsed: f32,
    max_step: f32,
}

impl FrameClock {
    pub fn new(max_step: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            elapsed: 0.0,
            max_step,
        }
    }

    /// Advance to `now` and return the clamped frame delta in seconds.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = now
            .saturating_duration_since(self.last_frame)
            .as_secs_f32()
            .min(self.max_step);
        self.last_frame = now;
        self.elapsed += dt;
        dt
    }

    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Sum of all clamped deltas handed out so far.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.1)
    }
}

/// Ring buffer of recent frame durations for HUD statistics.
#[derive(Debug)]
pub struct FrameTimer {
    history: Vec<Duration>,
    capacity: usize,
    index: usize,
    filled: bool,
}

impl FrameTimer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: vec![Duration::ZERO; capacity],
            capacity,
            index: 0,
            filled: false,
        }
    }

    pub fn record(&mut self, dt: Duration) {
        self.history[self.index] = dt;
        self.index = (self.index + 1) % self.capacity;
        if self.index == 0 {
            self.filled = true;
        }
    }

    fn samples(&self) -> &[Duration] {
        let count = if self.filled { self.capacity } else { self.index };
        &self.history[..count]
    }

    pub fn average(&self) -> Duration {
        let samples = self.samples();
        if samples.is_empty() {
            return Duration::ZERO;
        }
        samples.iter().sum::<Duration>() / samples.len() as u32
    }

    pub fn max(&self) -> Duration {
        self.samples().iter().copied().max().unwrap_or(Duration::ZERO)
    }

    /// Frames per second derived from the average frame time.
    pub fn fps(&self) -> f32 {
        let avg = self.average().as_secs_f32();
        if avg > 0.0 { 1.0 / avg } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_clamps_long_frames() {
        let start = Instant::now();
        let mut clock = FrameClock::new(0.1);
        clock.last_frame = start;
        let dt = clock.tick_at(start + Duration::from_secs(2));
        assert!((dt - 0.1).abs() < 1e-6);
        assert!((clock.elapsed() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn clock_reports_short_frames_unchanged() {
        let start = Instant::now();
        let mut clock = FrameClock::new(0.1);
        clock.last_frame = start;
        let dt = clock.tick_at(start + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-4);
    }

    #[test]
    fn timer_average_of_partial_history() {
        let mut timer = FrameTimer::new(8);
        timer.record(Duration::from_millis(10));
        timer.record(Duration::from_millis(20));
        assert_eq!(timer.average(), Duration::from_millis(15));
        assert_eq!(timer.max(), Duration::from_millis(20));
    }

    #[test]
    fn timer_wraps_and_forgets_old_samples() {
        let mut timer = FrameTimer::new(2);
        timer.record(Duration::from_millis(100));
        timer.record(Duration::from_millis(10));
        timer.record(Duration::from_millis(10));
        assert_eq!(timer.average(), Duration::from_millis(10));
    }

    #[test]
    fn empty_timer_reports_zero_fps() {
        let timer = FrameTimer::new(4);
        assert_eq!(timer.fps(), 0.0);
    }
}
