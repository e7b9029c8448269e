//! Game clock with day counting.

use crate::atmosphere::env::GameTime;

/// Tracks the current hour within a 24-hour cycle plus elapsed day count.
#[derive(Clone, Debug)]
pub struct TimeOfDay {
    /// Current hour, in the range `[0.0, 24.0)`.
    hour: f32,
    /// Number of full days that have elapsed.
    day_count: u32,
}

impl TimeOfDay {
    /// Create a new time on day 0 at the given hour.
    pub fn new(start_hour: f32) -> Self {
        let mut t = Self { hour: 0.0, day_count: 0 };
        t.set(start_hour);
        t
    }

    /// Advance by in-game hours, wrapping into following days.
    pub fn advance_hours(&mut self, hours: f32) {
        if hours <= 0.0 {
            return;
        }
        self.hour += hours;
        while self.hour >= 24.0 {
            self.hour -= 24.0;
            self.day_count += 1;
        }
    }

    /// Advance by real seconds at `timescale` game seconds per real second.
    pub fn advance_seconds(&mut self, seconds: f32, timescale: f32) {
        self.advance_hours(seconds * timescale / 3600.0);
    }

    /// Set the hour directly, clamping to `[0.0, 24.0]`. The day is unchanged.
    pub fn set(&mut self, hour: f32) {
        self.hour = hour.clamp(0.0, 24.0);
        // Normalize 24.0 to 0.0
        if self.hour >= 24.0 {
            self.hour = 0.0;
        }
    }

    #[inline]
    pub fn hour(&self) -> f32 {
        self.hour
    }

    #[inline]
    pub fn day_count(&self) -> u32 {
        self.day_count
    }

    #[inline]
    pub fn timestamp(&self) -> GameTime {
        GameTime { day: self.day_count, hour: self.hour }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps() {
        assert_eq!(TimeOfDay::new(30.0).hour(), 0.0);
        assert_eq!(TimeOfDay::new(-5.0).hour(), 0.0);
        assert_eq!(TimeOfDay::new(14.0).hour(), 14.0);
    }

    #[test]
    fn test_advance_wraps_day() {
        let mut t = TimeOfDay::new(23.0);
        t.advance_hours(2.0);
        assert!((t.hour() - 1.0).abs() < 1e-4);
        assert_eq!(t.day_count(), 1);
    }

    #[test]
    fn test_advance_multiple_days() {
        let mut t = TimeOfDay::new(0.0);
        t.advance_hours(72.0);
        assert!(t.hour().abs() < 1e-3);
        assert_eq!(t.day_count(), 3);
    }

    #[test]
    fn test_advance_seconds_with_timescale() {
        let mut t = TimeOfDay::new(10.0);
        // 30x timescale: 120 real seconds is one game hour.
        t.advance_seconds(120.0, 30.0);
        assert!((t.hour() - 11.0).abs() < 1e-4);
    }

    #[test]
    fn test_negative_advance_ignored() {
        let mut t = TimeOfDay::new(10.0);
        t.advance_hours(-3.0);
        assert_eq!(t.hour(), 10.0);
    }

    #[test]
    fn test_timestamp() {
        let mut t = TimeOfDay::new(20.0);
        t.advance_hours(6.5);
        let ts = t.timestamp();
        assert_eq!(ts.day, 1);
        assert!((ts.hour - 2.5).abs() < 1e-4);
    }
}
