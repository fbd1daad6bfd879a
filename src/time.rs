//! Frame clock for the host loop.
//!
//! [`Time`] measures the real time between frames and hands the simulation a
//! delta in seconds. The delta is the actual elapsed time, so a dropped or
//! late frame simply produces a larger step on the next call.
//!
//! # Example
//!
//! ```
//! use pyre::time::Time;
//!
//! let mut time = Time::new();
//! let dt = time.update();
//! assert!(dt >= 0.0);
//! assert_eq!(time.frame(), 1);
//! ```

use std::time::Instant;

/// Time tracking for the render loop.
#[derive(Debug)]
pub struct Time {
    last_frame: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    paused: bool,
    time_scale: f32,
}

impl Time {
    /// Create a new clock starting from now.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            paused: false,
            time_scale: 1.0,
        }
    }

    /// Restart frame timing from now without touching elapsed time.
    ///
    /// Call after blocking setup so the next delta excludes it.
    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    fn reset_at(&mut self, now: Instant) {
        self.last_frame = now;
        self.delta_secs = 0.0;
    }

    /// Advance the clock. Call once per frame; returns the scaled delta.
    pub fn update(&mut self) -> f32 {
        self.update_at(Instant::now())
    }

    fn update_at(&mut self, now: Instant) -> f32 {
        let raw = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_count += 1;

        self.delta_secs = if self.paused {
            0.0
        } else {
            raw.as_secs_f32() * self.time_scale
        };
        self.elapsed_secs += self.delta_secs;
        self.delta_secs
    }

    /// Simulated seconds since start, excluding pauses.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Seconds advanced by the last [`Time::update`].
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Toggle pause. While paused `update` returns 0.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Set the time scale multiplier; negative values clamp to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_time_new() {
        let time = Time::new();
        assert_eq!(time.frame(), 0);
        assert!(!time.is_paused());
        assert_eq!(time.time_scale, 1.0);
    }

    #[test]
    fn test_update_uses_real_delta() {
        let mut time = Time::new();
        let start = time.last_frame;
        let dt = time.update_at(start + Duration::from_millis(250));

        assert!((dt - 0.25).abs() < 1e-6);
        assert!((time.elapsed() - 0.25).abs() < 1e-6);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_pause() {
        let mut time = Time::new();
        let start = time.last_frame;
        time.update_at(start + Duration::from_millis(100));

        time.toggle_pause();
        let elapsed_before = time.elapsed();
        let dt = time.update_at(start + Duration::from_millis(600));

        // Elapsed should not increase while paused
        assert_eq!(dt, 0.0);
        assert_eq!(time.elapsed(), elapsed_before);

        time.toggle_pause();
        let dt = time.update_at(start + Duration::from_millis(700));
        assert!((dt - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_time_scale() {
        let mut time = Time::new();
        time.set_time_scale(2.0);
        let start = time.last_frame;
        let dt = time.update_at(start + Duration::from_millis(100));
        assert!((dt - 0.2).abs() < 1e-6);

        // Negative scale should clamp to 0
        time.set_time_scale(-1.0);
        assert_eq!(time.time_scale, 0.0);
    }

    #[test]
    fn test_reset_excludes_setup_time() {
        let mut time = Time::new();
        let start = time.last_frame;

        // Three seconds of blocking setup before the first frame.
        time.reset_at(start + Duration::from_secs(3));
        let dt = time.update_at(start + Duration::from_millis(3016));

        assert!((dt - 0.016).abs() < 1e-5, "{}", dt);
        assert!((time.elapsed() - 0.016).abs() < 1e-5);
        assert_eq!(time.frame(), 1);
    }
}
