//! Time-of-day colors for a single weather profile.
//!
//! The day is split into night, sunrise, day and sunset ranges derived from
//! the configured sunrise/sunset times and durations. Flat ranges return a
//! profile's phase color unchanged; the sunrise and sunset ranges each fade
//! through the phase color on either side of a pivot hour.

use crate::atmosphere::color::{DayPhase, Lerp};
use crate::atmosphere::profile::WeatherProfile;
use crate::core::Color;

// ---------------------------------------------------------------------------
// DayPhases
// ---------------------------------------------------------------------------

/// Hour boundaries of the four daily phases.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DayPhases {
    pub sunrise_time: f32,
    /// Sunset time plus sunset duration.
    pub night_start: f32,
    /// Half an hour before sunrise.
    pub night_end: f32,
    /// Sunrise time plus sunrise duration.
    pub day_start: f32,
    /// Sunset time.
    pub day_end: f32,
}

impl DayPhases {
    pub fn new(sunrise_time: f32, sunset_time: f32, sunrise_duration: f32, sunset_duration: f32) -> Self {
        Self {
            sunrise_time,
            night_start: sunset_time + sunset_duration,
            night_end: sunrise_time - 0.5,
            day_start: sunrise_time + sunrise_duration,
            day_end: sunset_time,
        }
    }

    /// Night for fog depth and darkness queries.
    ///
    /// NOTE: this boundary is not the same as the night color range used by
    /// [`DailyColorResolver::resolve`] (`<= night_end` / `>= night_start + 1`).
    /// Both are kept as-is; they are not meant to coincide.
    #[inline]
    pub fn is_night(&self, hour: f32) -> bool {
        hour < self.sunrise_time || hour > self.night_start - 1.0
    }

    /// Whether the sun disc should be drawn.
    #[inline]
    pub fn is_sun_up(&self, hour: f32) -> bool {
        !(hour >= self.night_start || hour <= self.sunrise_time)
    }
}

// ---------------------------------------------------------------------------
// DailyColors
// ---------------------------------------------------------------------------

/// Colors of one weather at one hour, before any weather blending.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DailyColors {
    pub fog_color: Color,
    pub ambient_color: Color,
    pub sun_color: Color,
    pub sky_color: Color,
    pub fog_depth: f32,
    pub night_fade: f32,
    pub is_night: bool,
}

#[derive(Clone, Copy)]
struct Palette {
    fog: Color,
    ambient: Color,
    sun: Color,
    sky: Color,
}

impl Palette {
    fn flat(profile: &WeatherProfile, phase: DayPhase) -> Self {
        Self {
            fog: profile.fog_colors.get(phase),
            ambient: profile.ambient_colors.get(phase),
            sun: profile.sun_colors.get(phase),
            sky: profile.sky_colors.get(phase),
        }
    }

    fn blend(profile: &WeatherProfile, from: DayPhase, to: DayPhase, factor: f32) -> Self {
        let a = Self::flat(profile, from);
        let b = Self::flat(profile, to);
        Self {
            fog: a.fog.lerp(&b.fog, factor),
            ambient: a.ambient.lerp(&b.ambient, factor),
            sun: a.sun.lerp(&b.sun, factor),
            sky: a.sky.lerp(&b.sky, factor),
        }
    }
}

// ---------------------------------------------------------------------------
// DailyColorResolver
// ---------------------------------------------------------------------------

/// Resolves [`DailyColors`] for any hour and profile.
///
/// Night fade is only assigned in the night range, the sunrise fade-in and
/// the sunset fade-out. Everywhere else it keeps the last value this resolver
/// produced, so one resolver should be reused across calls.
#[derive(Clone, Debug)]
pub struct DailyColorResolver {
    phases: DayPhases,
    night_fade: f32,
}

impl DailyColorResolver {
    pub fn new(phases: DayPhases) -> Self {
        Self { phases, night_fade: 0.0 }
    }

    pub fn resolve(&mut self, hour: f32, profile: &WeatherProfile) -> DailyColors {
        let p = self.phases;
        let is_night = p.is_night(hour);
        let fog_depth = if is_night {
            profile.land_fog_night_depth
        } else {
            profile.land_fog_day_depth
        };

        let palette = if hour <= p.night_end || hour >= p.night_start + 1.0 {
            self.night_fade = 1.0;
            Palette::flat(profile, DayPhase::Night)
        } else if hour >= p.night_end && hour <= p.day_start + 1.0 {
            if hour <= p.sunrise_time {
                let factor = (p.sunrise_time - hour) / 0.5;
                self.night_fade = factor;
                Palette::blend(profile, DayPhase::Sunrise, DayPhase::Night, factor)
            } else {
                // Night fade keeps its previous value.
                let factor = (hour - p.sunrise_time) / 3.0;
                Palette::blend(profile, DayPhase::Sunrise, DayPhase::Day, factor)
            }
        } else if hour >= p.day_start + 1.0 && hour <= p.day_end - 1.0 {
            Palette::flat(profile, DayPhase::Day)
        } else if hour >= p.day_end - 1.0 && hour <= p.night_start + 1.0 {
            let pivot = p.day_end + 1.0;
            if hour <= pivot {
                let factor = (pivot - hour) / 2.0;
                Palette::blend(profile, DayPhase::Sunset, DayPhase::Day, factor)
            } else {
                let factor = (hour - pivot) / 2.0;
                self.night_fade = factor;
                Palette::blend(profile, DayPhase::Sunset, DayPhase::Night, factor)
            }
        } else {
            // Only reachable with overlapping sunrise/sunset settings.
            log::trace!("Hour {hour} outside every daily phase, using day colors");
            Palette::flat(profile, DayPhase::Day)
        };

        DailyColors {
            fog_color: palette.fog,
            ambient_color: palette.ambient,
            sun_color: palette.sun,
            sky_color: palette.sky,
            fog_depth,
            night_fade: self.night_fade,
            is_night,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
