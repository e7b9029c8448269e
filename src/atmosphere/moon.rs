//! Moon position, phase and visibility.
//!
//! Each moon rises on one horizon, travels 180 degrees to the opposite one and
//! then snaps back to the rising horizon until its next rise. The rise hour
//! drifts by a fixed increment every day, so a rise can slip past midnight
//! into the next day.

use serde::{Deserialize, Serialize};

use crate::atmosphere::fallback::{FallbackSource, SchemaReader};
use crate::core::{ConfigErrors, Result};

/// Fastest allowed speed, so that every moon can complete its arc within
/// a single day.
pub const MAX_MOON_SPEED: f32 = 180.0 / 23.0;

/// Day of the month the calendar starts on.
const START_DAY: u32 = 16;

/// The two moons of the sky.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Moon {
    Masser,
    Secunda,
}

impl Moon {
    pub fn config_name(self) -> &'static str {
        match self {
            Self::Masser => "Masser",
            Self::Secunda => "Secunda",
        }
    }
}

/// Eight-step phase cycle, three days per step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoonPhase {
    Full = 0,
    WaningGibbous = 1,
    ThirdQuarter = 2,
    WaningCrescent = 3,
    New = 4,
    WaxingCrescent = 5,
    FirstQuarter = 6,
    WaxingGibbous = 7,
}

impl MoonPhase {
    const ALL: [MoonPhase; 8] = [
        Self::Full,
        Self::WaningGibbous,
        Self::ThirdQuarter,
        Self::WaningCrescent,
        Self::New,
        Self::WaxingCrescent,
        Self::FirstQuarter,
        Self::WaxingGibbous,
    ];

    fn from_index(index: u32) -> Self {
        Self::ALL[(index % 8) as usize]
    }
}

/// Everything the sky renderer needs to place and draw one moon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoonState {
    /// Degrees travelled from the rising horizon, in `[0, 180)`.
    pub rotation_from_horizon: f32,
    pub axis_offset: f32,
    pub phase: MoonPhase,
    /// 0 = solid sky-colored disc, 1 = fully textured.
    pub shadow_blend: f32,
    /// Overall opacity.
    pub alpha: f32,
}

/// Static orbit and fade parameters of one moon.
#[derive(Clone, Debug)]
pub struct MoonModel {
    pub fade_in_start: f32,
    pub fade_in_finish: f32,
    pub fade_out_start: f32,
    pub fade_out_finish: f32,
    pub axis_offset: f32,
    /// Clamped to [`MAX_MOON_SPEED`].
    speed: f32,
    pub daily_increment: f32,
    pub fade_start_angle: f32,
    pub fade_end_angle: f32,
    pub shadow_early_fade_angle: f32,
}

impl MoonModel {
    /// Build a model, clamping `speed` to [`MAX_MOON_SPEED`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        fade_in_start: f32,
        fade_in_finish: f32,
        fade_out_start: f32,
        fade_out_finish: f32,
        axis_offset: f32,
        speed: f32,
        daily_increment: f32,
        fade_start_angle: f32,
        fade_end_angle: f32,
        shadow_early_fade_angle: f32,
    ) -> Self {
        Self {
            fade_in_start,
            fade_in_finish,
            fade_out_start,
            fade_out_finish,
            axis_offset,
            speed: speed.min(MAX_MOON_SPEED),
            daily_increment,
            fade_start_angle,
            fade_end_angle,
            shadow_early_fade_angle,
        }
    }

    /// Read `Moons_<Name>_*` keys.
    pub fn from_fallbacks(moon: Moon, source: &dyn FallbackSource) -> Result<Self> {
        let (model, errors) = Self::read(moon, source);
        errors.into_result()?;
        Ok(model)
    }

    pub(crate) fn read(moon: Moon, source: &dyn FallbackSource) -> (Self, ConfigErrors) {
        let mut r = SchemaReader::new(source, format!("Moons_{}_", moon.config_name()));
        let model = Self::new(
            r.float("Fade_In_Start"),
            r.float("Fade_In_Finish"),
            r.float("Fade_Out_Start"),
            r.float("Fade_Out_Finish"),
            r.float("Axis_Offset"),
            r.float("Speed"),
            r.float("Daily_Increment"),
            r.float("Fade_Start_Angle"),
            r.float("Fade_End_Angle"),
            r.float("Moon_Shadow_Early_Fade_Angle"),
        );
        (model, r.finish())
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Position, phase and visibility for the given day and hour.
    pub fn calculate_state(&self, days_passed: u32, game_hour: f32) -> MoonState {
        let rotation_from_horizon = self.angle(days_passed, game_hour);
        MoonState {
            rotation_from_horizon,
            axis_offset: self.axis_offset,
            phase: self.phase(days_passed, game_hour),
            shadow_blend: self.shadow_blend(rotation_from_horizon),
            alpha: self.early_moon_shadow_alpha(rotation_from_horizon) * self.hourly_alpha(game_hour),
        }
    }

    /// Three cases: rise and set on the same day, set without rising
    /// (yesterday's rise slipped past midnight), and set then rise.
    pub fn angle(&self, days_passed: u32, game_hour: f32) -> f32 {
        let rise_today = self.moon_rise_hour(days_passed);
        let mut angle = 0.0;

        if game_hour < rise_today {
            let rise_yesterday = self.moon_rise_hour(days_passed.wrapping_sub(1));
            if rise_yesterday < 24.0 {
                let angle_yesterday = self.rotation(24.0 - rise_yesterday);
                if angle_yesterday < 180.0 {
                    // Rose yesterday but has not set yet.
                    angle = self.rotation(game_hour) + angle_yesterday;
                }
            }
        } else {
            angle = self.rotation(game_hour - rise_today);
        }

        if angle >= 180.0 {
            // Set: back to the rising horizon.
            angle = 0.0;
        }
        angle
    }

    /// Hour of the rise on `days_passed`. Deliberately not wrapped after
    /// adding the increment: values >= 24 mean the rise is postponed to the
    /// next day.
    pub fn moon_rise_hour(&self, days_passed: u32) -> f32 {
        let days_since_epoch = days_passed.wrapping_sub(1).wrapping_add(START_DAY);
        self.daily_increment + (days_since_epoch as f32 * self.daily_increment) % 24.0
    }

    /// 15 degrees per hour scaled by speed; speed 1 is a full turn per day.
    #[inline]
    pub fn rotation(&self, hours: f32) -> f32 {
        15.0 * self.speed * hours
    }

    /// Yesterday's phase until the moon has risen today.
    pub fn phase(&self, days_passed: u32, game_hour: f32) -> MoonPhase {
        if game_hour < self.moon_rise_hour(days_passed) {
            MoonPhase::from_index(days_passed / 3)
        } else {
            MoonPhase::from_index(days_passed.wrapping_add(1) / 3)
        }
    }

    /// Ratio of textured surface to solid disc over the arc.
    pub fn shadow_blend(&self, angle: f32) -> f32 {
        let fade_angle = self.fade_start_angle - self.fade_end_angle;
        let fade_end_angle2 = 180.0 - self.fade_end_angle;
        let fade_start_angle2 = 180.0 - self.fade_start_angle;

        if angle >= self.fade_end_angle && angle < self.fade_start_angle {
            (angle - self.fade_end_angle) / fade_angle
        } else if angle >= self.fade_start_angle && angle < fade_start_angle2 {
            1.0
        } else if angle >= fade_start_angle2 && angle < fade_end_angle2 {
            (fade_end_angle2 - angle) / fade_angle
        } else {
            0.0
        }
    }

    /// Opacity by time of day: fades out in the morning, fades in later.
    pub fn hourly_alpha(&self, game_hour: f32) -> f32 {
        if game_hour >= self.fade_out_start && game_hour < self.fade_out_finish {
            (self.fade_out_finish - game_hour) / (self.fade_out_finish - self.fade_out_start)
        } else if game_hour >= self.fade_out_finish && game_hour < self.fade_in_start {
            0.0
        } else if game_hour >= self.fade_in_start && game_hour < self.fade_in_finish {
            (game_hour - self.fade_in_start) / (self.fade_in_finish - self.fade_in_start)
        } else {
            1.0
        }
    }

    /// Opacity near the horizons, mirrored around 90 degrees.
    pub fn early_moon_shadow_alpha(&self, angle: f32) -> f32 {
        let early_fade_angle1 = self.fade_end_angle - self.shadow_early_fade_angle;
        let fade_end_angle2 = 180.0 - self.fade_end_angle;
        let early_fade_angle2 = fade_end_angle2 + self.shadow_early_fade_angle;

        if angle >= early_fade_angle1 && angle < self.fade_end_angle {
            (angle - early_fade_angle1) / self.shadow_early_fade_angle
        } else if angle >= self.fade_end_angle && angle < fade_end_angle2 {
            1.0
        } else if angle >= fade_end_angle2 && angle < early_fade_angle2 {
            (early_fade_angle2 - angle) / self.shadow_early_fade_angle
        } else {
            0.0
        }
    }
}
