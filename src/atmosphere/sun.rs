//! Sun position calculation.
//!
//! The sun runs east to west at a fixed angle from overhead. Day and night
//! arcs may take different times, since sunrise and night start mark the
//! hours the sun is level with the horizon.

use glam::Vec3;

/// Vertical component of the sun vector, roughly `tan(-15°)`.
const SUN_PITCH: f32 = -0.268;

/// Direction light travels from the sun, for a given hour.
///
/// Hours are shifted into a 24-hour window beginning at `sunrise_time`. The
/// day arc spans `sunrise_time..night_start`, the night arc the rest.
pub fn compute_sun_direction(hour: f32, sunrise_time: f32, night_start: f32) -> Vec3 {
    let adjusted_hour = if hour < sunrise_time { hour + 24.0 } else { hour };
    let adjusted_night_start = if night_start < sunrise_time {
        night_start + 24.0
    } else {
        night_start
    };

    let is_night = adjusted_hour >= adjusted_night_start;
    let day_duration = adjusted_night_start - sunrise_time;
    let night_duration = 24.0 - day_duration;

    let theta = if is_night {
        std::f32::consts::PI * (adjusted_hour - adjusted_night_start) / night_duration
    } else {
        std::f32::consts::PI * (adjusted_hour - sunrise_time) / day_duration
    };

    Vec3::new(theta.cos(), SUN_PITCH, theta.sin()) * -1.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
