//! Per-tick weather result and its GPU uniform.

use bytemuck::{Pod, Zeroable};

use crate::atmosphere::color::Lerp;
use crate::atmosphere::daily::DailyColors;
use crate::atmosphere::profile::WeatherProfile;
use crate::core::Color;

// ---------------------------------------------------------------------------
// CPU-side result
// ---------------------------------------------------------------------------

/// Fully resolved weather parameters for one instant, recomputed every tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeatherResult {
    // Clouds
    pub cloud_texture: String,
    /// Texture being faded in, empty when stable.
    pub next_cloud_texture: String,
    pub cloud_blend_factor: f32,
    pub cloud_speed: f32,

    // Colors
    pub fog_color: Color,
    pub ambient_color: Color,
    pub sun_color: Color,
    pub sky_color: Color,
    pub sun_disc_color: Color,

    pub fog_depth: f32,
    pub wind_speed: f32,
    pub glare_view: f32,
    pub night_fade: f32,
    pub is_night: bool,
    pub is_storm: bool,

    // Precipitation and effects
    pub rain_speed: f32,
    pub rain_frequency: f32,
    pub particle_effect: String,
    pub rain_effect: String,

    // Sound
    pub ambient_loop_sound: String,
    pub ambient_sound_volume: f32,
    /// Fade applied to particle and rain effects.
    pub effect_fade: f32,
}

impl WeatherResult {
    /// Result for a single weather with no transition running.
    pub fn stable(profile: &WeatherProfile, daily: &DailyColors) -> Self {
        Self {
            cloud_texture: profile.cloud_texture.clone(),
            next_cloud_texture: String::new(),
            cloud_blend_factor: 0.0,
            cloud_speed: profile.cloud_speed,
            fog_color: daily.fog_color,
            ambient_color: daily.ambient_color,
            sun_color: daily.sun_color,
            sky_color: daily.sky_color,
            sun_disc_color: profile.sun_disc_sunset_color,
            fog_depth: daily.fog_depth,
            wind_speed: profile.wind_speed,
            glare_view: profile.glare_view,
            night_fade: daily.night_fade,
            is_night: daily.is_night,
            is_storm: profile.is_storm,
            rain_speed: profile.rain_speed,
            rain_frequency: profile.rain_frequency,
            particle_effect: profile.particle_effect.clone(),
            rain_effect: profile.rain_effect.clone(),
            ambient_loop_sound: profile.ambient_loop_sound.clone(),
            ambient_sound_volume: 1.0,
            effect_fade: 1.0,
        }
    }

    /// Cross-fade from `self` towards `other` at linear progress `factor`.
    ///
    /// Continuous values are interpolated. Effects, storm state and the
    /// ambient loop come from whichever side owns the current half, with the
    /// volume dipping to zero at the midpoint. Clouds follow the target
    /// profile's own blend curve.
    pub fn blend(&self, other: &Self, factor: f32, target: &WeatherProfile) -> Self {
        let (side, volume) = if factor < 0.5 {
            (self, 1.0 - factor * 2.0)
        } else {
            (other, 2.0 * (factor - 0.5))
        };

        Self {
            cloud_texture: self.cloud_texture.clone(),
            next_cloud_texture: other.cloud_texture.clone(),
            cloud_blend_factor: target.cloud_blend_factor(factor),
            cloud_speed: self.cloud_speed.lerp(&other.cloud_speed, factor),
            fog_color: self.fog_color.lerp(&other.fog_color, factor),
            ambient_color: self.ambient_color.lerp(&other.ambient_color, factor),
            sun_color: self.sun_color.lerp(&other.sun_color, factor),
            sky_color: self.sky_color.lerp(&other.sky_color, factor),
            sun_disc_color: self.sun_disc_color.lerp(&other.sun_disc_color, factor),
            fog_depth: self.fog_depth.lerp(&other.fog_depth, factor),
            wind_speed: self.wind_speed.lerp(&other.wind_speed, factor),
            glare_view: self.glare_view.lerp(&other.glare_view, factor),
            night_fade: self.night_fade.lerp(&other.night_fade, factor),
            is_night: self.is_night,
            is_storm: side.is_storm,
            rain_speed: side.rain_speed,
            rain_frequency: side.rain_frequency,
            particle_effect: side.particle_effect.clone(),
            rain_effect: side.rain_effect.clone(),
            ambient_loop_sound: side.ambient_loop_sound.clone(),
            ambient_sound_volume: volume,
            effect_fade: volume,
        }
    }
}

// ---------------------------------------------------------------------------
// GPU uniform
// ---------------------------------------------------------------------------

/// Flag bit set in [`SkyUniform::flags`] at night.
pub const SKY_FLAG_NIGHT: u32 = 1 << 0;
/// Flag bit set in [`SkyUniform::flags`] during storms.
pub const SKY_FLAG_STORM: u32 = 1 << 1;

/// GPU-ready sky parameters.
///
/// Colors are full `vec4`s so every field stays 16-byte aligned for WGSL.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct SkyUniform {
    // -- Colors (5 x 16 = 80 bytes) --
    pub sky_color: [f32; 4],
    pub fog_color: [f32; 4],
    pub ambient_color: [f32; 4],
    pub sun_color: [f32; 4],
    pub sun_disc_color: [f32; 4],

    // -- Scalars (16 bytes) --
    pub fog_depth: f32,
    pub cloud_blend_factor: f32,
    pub cloud_speed: f32,
    pub glare_view: f32,

    // -- Fades (16 bytes) --
    pub night_fade: f32,
    pub wind_speed: f32,
    pub effect_fade: f32,
    pub flags: u32,
}

impl From<&WeatherResult> for SkyUniform {
    fn from(r: &WeatherResult) -> Self {
        let mut flags = 0;
        if r.is_night {
            flags |= SKY_FLAG_NIGHT;
        }
        if r.is_storm {
            flags |= SKY_FLAG_STORM;
        }
        Self {
            sky_color: r.sky_color,
            fog_color: r.fog_color,
            ambient_color: r.ambient_color,
            sun_color: r.sun_color,
            sun_disc_color: r.sun_disc_color,
            fog_depth: r.fog_depth,
            cloud_blend_factor: r.cloud_blend_factor,
            cloud_speed: r.cloud_speed,
            glare_view: r.glare_view,
            night_fade: r.night_fade,
            wind_speed: r.wind_speed,
            effect_fade: r.effect_fade,
            flags,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
