//! Monotonic frame clock

use std::time::{Duration, Instant};

#[derive(Debug, Default)]
pub struct FrameClock {
    started: Option<Instant>,
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        let now = Instant::now();
        self.started = Some(now);
        self.last = Some(now);
    }

    pub fn stop(&mut self) {
        self.started = None;
        self.last = None;
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Seconds since the previous tick; zero while stopped
    pub fn tick(&mut self) -> f32 {
        let Some(last) = self.last else {
            return 0.0;
        };
        let now = Instant::now();
        self.last = Some(now);
        now.duration_since(last).as_secs_f32()
    }

    /// Time since `start`
    pub fn elapsed(&self) -> Duration {
        self.started.map(|s| s.elapsed()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_clock_reports_nothing() {
        let mut clock = FrameClock::new();
        assert!(!clock.is_running());
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_ticks_are_monotonic() {
        let mut clock = FrameClock::new();
        clock.start();
        std::thread::sleep(Duration::from_millis(2));
        let dt = clock.tick();
        assert!(dt > 0.0);
        assert!(clock.tick() >= 0.0);

        clock.stop();
        assert!(!clock.is_running());
        assert_eq!(clock.tick(), 0.0);
    }
}
