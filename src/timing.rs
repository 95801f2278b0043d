use std::time::Duration;

use circular_buffer::CircularBuffer;
use thousands::Separable;

/// Number of frames the rolling statistics cover.
pub const TIMING_WINDOW_SIZE: usize = 120;

/// Rolling window of recent frame durations.
#[derive(Debug, Default)]
pub struct FrameTimings {
    frames: CircularBuffer<TIMING_WINDOW_SIZE, Duration>,
}

impl FrameTimings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one frame; the oldest is dropped once the window is full.
    pub fn add(&mut self, duration: Duration) {
        self.frames.push_back(duration);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Mean and standard deviation of the window.
    pub fn stats(&self) -> (Duration, Duration) {
        if self.frames.is_empty() {
            return (Duration::ZERO, Duration::ZERO);
        }

        let millis: Vec<f64> = self.frames.iter().map(|d| d.as_secs_f64() * 1000.0).collect();
        let count = millis.len() as f64;
        let mean = millis.iter().sum::<f64>() / count;
        let variance = millis.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count;

        (
            Duration::from_secs_f64(mean / 1000.0),
            Duration::from_secs_f64(variance.sqrt() / 1000.0),
        )
    }

    pub fn average(&self) -> Duration {
        self.stats().0
    }

    /// Frames per second implied by the average frame time.
    pub fn fps(&self) -> f64 {
        let average = self.average().as_secs_f64();
        if average == 0.0 {
            return 0.0;
        }
        1.0 / average
    }

    /// One-line summary, e.g. `60 FPS (16.67ms ± 0.21ms)`.
    pub fn format_display(&self) -> String {
        let (average, std_dev) = self.stats();
        let fps = match self.fps() {
            f if f > 1000.0 => format!("{} FPS", (f as u64).separate_with_commas()),
            f if f < 10.0 => format!("{:.1} FPS", f),
            f => format!("{:.0} FPS", f),
        };
        format!(
            "{} ({:.2}ms ± {:.2}ms)",
            fps,
            average.as_secs_f64() * 1000.0,
            std_dev.as_secs_f64() * 1000.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_drops_oldest() {
        let mut timings = FrameTimings::new();
        for _ in 0..TIMING_WINDOW_SIZE {
            timings.add(Duration::from_millis(100));
        }
        for _ in 0..TIMING_WINDOW_SIZE {
            timings.add(Duration::from_millis(20));
        }

        assert_eq!(timings.len(), TIMING_WINDOW_SIZE);
        assert_eq!(timings.average(), Duration::from_millis(20));
        assert_eq!(timings.stats().1, Duration::ZERO);
    }

    #[test]
    fn test_empty_window_reports_zero() {
        let timings = FrameTimings::new();
        assert_eq!(timings.fps(), 0.0);
        assert_eq!(timings.format_display(), "0.0 FPS (0.00ms ± 0.00ms)");
    }

    #[test]
    fn test_format_display_rounds_fps() {
        let mut timings = FrameTimings::new();
        timings.add(Duration::from_millis(10));
        assert_eq!(timings.format_display(), "100 FPS (10.00ms ± 0.00ms)");
    }
}
