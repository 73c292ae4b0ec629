//! Frame timing.
//!
//! [`FrameClock`] turns wall-clock instants into the global animation time
//! the wave field runs on. [`FpsCounter`] measures the achieved frame rate
//! by counting frames over fixed one-second windows.
//!
//! All methods take the current [`Instant`] explicitly so that callers (and
//! tests) control the timeline.
//!
//! ```ignore
//! let mut fps = FpsCounter::new(Instant::now());
//!
//! // Once per rendered frame:
//! if let Some(rate) = fps.record_frame(Instant::now()) {
//!     println!("FPS: {}", rate);
//! }
//! ```

use std::time::{Duration, Instant};

/// Length of one FPS measurement window.
pub const FPS_WINDOW: Duration = Duration::from_millis(1000);

/// Global animation time source.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    /// Start the clock at `start`.
    pub fn new(start: Instant) -> Self {
        Self { start }
    }

    /// Seconds elapsed between the clock's start and `now`.
    #[inline]
    pub fn seconds(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.start).as_secs_f32()
    }

    /// The instant the clock started.
    #[inline]
    pub fn start_instant(&self) -> Instant {
        self.start
    }
}

/// Windowed frame counter.
///
/// Frames are counted until a frame arrives at least [`FPS_WINDOW`] after
/// the window opened. That frame closes the window: the count so far is
/// published as the FPS value, the counter returns to zero and the next
/// window opens at that frame's instant.
///
/// The closing frame is not counted in either window, so a steady 60 Hz
/// loop reads 59.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    /// Frames counted in the current window.
    frames: u32,
    /// When the current window opened.
    window_start: Instant,
    /// Window length.
    window: Duration,
    /// Last published value.
    fps: u32,
}

impl FpsCounter {
    /// Create a counter whose first window opens at `now`.
    pub fn new(now: Instant) -> Self {
        Self::with_window(now, FPS_WINDOW)
    }

    /// Create a counter with a custom window length.
    pub fn with_window(now: Instant, window: Duration) -> Self {
        Self {
            frames: 0,
            window_start: now,
            window,
            fps: 0,
        }
    }

    /// Record one frame at `now`.
    ///
    /// Returns the newly published FPS value when this frame closed a window.
    pub fn record_frame(&mut self, now: Instant) -> Option<u32> {
        if now.saturating_duration_since(self.window_start) >= self.window {
            self.fps = self.frames;
            self.frames = 0;
            self.window_start = now;
            return Some(self.fps);
        }
        self.frames += 1;
        None
    }

    /// Latest published frames-per-second value (0 before the first window closes).
    #[inline]
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Frames counted so far in the open window.
    #[inline]
    pub fn pending_frames(&self) -> u32 {
        self.frames
    }

    /// When the open window started.
    #[inline]
    pub fn window_start(&self) -> Instant {
        self.window_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_sixty_frames_then_close() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::new(t0);
        for i in 0..60 {
            assert_eq!(fps.record_frame(t0 + ms(i * 16)), None);
        }
        assert_eq!(fps.pending_frames(), 60);
        assert_eq!(fps.fps(), 0);

        assert_eq!(fps.record_frame(t0 + ms(1005)), Some(60));
        assert_eq!(fps.fps(), 60);
        assert_eq!(fps.pending_frames(), 0);
        assert_eq!(fps.window_start(), t0 + ms(1005));
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::new(t0);
        fps.record_frame(t0 + ms(500));
        assert_eq!(fps.record_frame(t0 + ms(999)), None);
        assert_eq!(fps.record_frame(t0 + ms(1000)), Some(2));
    }

    #[test]
    fn test_value_persists_between_windows() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::new(t0);
        for i in 0..30 {
            fps.record_frame(t0 + ms(i * 33));
        }
        fps.record_frame(t0 + ms(1001));
        for i in 1..10 {
            fps.record_frame(t0 + ms(1001 + i * 10));
        }
        assert_eq!(fps.fps(), 30);
        assert_eq!(fps.pending_frames(), 9);
    }

    #[test]
    fn test_steady_sixty_hz_reads_fifty_nine() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::new(t0);
        let published: Vec<u32> = (1..=360u32)
            .filter_map(|k| fps.record_frame(t0 + Duration::from_micros(16_667) * k))
            .collect();
        assert_eq!(published, vec![59; 6]);
    }

    #[test]
    fn test_long_stall_publishes_count() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::new(t0);
        fps.record_frame(t0 + ms(10));
        assert_eq!(fps.record_frame(t0 + ms(5000)), Some(1));
    }

    #[test]
    fn test_clock_seconds() {
        let t0 = Instant::now();
        let clock = FrameClock::new(t0);
        assert_eq!(clock.seconds(t0), 0.0);
        assert!((clock.seconds(t0 + ms(1500)) - 1.5).abs() < 1e-6);
    }
}
