//! Linear interpolation for scalars and colors.
//!
//! All blends use the weighted form `a * (1 - t) + b * t`, so `t = 0`
//! returns `a` exactly and `t = 1` returns `b` exactly.

use crate::core::Color;

// ---------------------------------------------------------------------------
// Lerp trait
// ---------------------------------------------------------------------------

/// Trait for types that can be linearly interpolated.
pub trait Lerp: Clone {
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self * (1.0 - t) + other * t
    }
}

impl Lerp for [f32; 4] {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        [
            self[0].lerp(&other[0], t),
            self[1].lerp(&other[1], t),
            self[2].lerp(&other[2], t),
            self[3].lerp(&other[3], t),
        ]
    }
}

/// The four phases a day's colors are keyed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DayPhase {
    Sunrise,
    Day,
    Sunset,
    Night,
}

/// Four colors keyed to the phases of the day.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhaseColors {
    pub sunrise: Color,
    pub day: Color,
    pub sunset: Color,
    pub night: Color,
}

impl PhaseColors {
    #[inline]
    pub fn get(&self, phase: DayPhase) -> Color {
        match phase {
            DayPhase::Sunrise => self.sunrise,
            DayPhase::Day => self.day,
            DayPhase::Sunset => self.sunset,
            DayPhase::Night => self.night,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
