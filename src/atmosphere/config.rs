//! Global weather settings and the full content bundle read at startup.

use serde::{Deserialize, Serialize};

use crate::atmosphere::daily::DayPhases;
use crate::atmosphere::fallback::{FallbackMap, FallbackSource, SchemaReader};
use crate::atmosphere::moon::{Moon, MoonModel};
use crate::atmosphere::profile::WeatherProfiles;
use crate::core::{ConfigErrors, Result};

/// World position storms blow away from.
pub const STORM_LANDMARK: [f32; 3] = [19950.0, 72032.0, 27831.0];

// ---------------------------------------------------------------------------
// WeatherConfig
// ---------------------------------------------------------------------------

/// Settings shared by every weather type.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Hour the sun reaches the horizon in the morning.
    pub sunrise_time: f32,
    /// Hour the sunset begins.
    pub sunset_time: f32,
    pub sunrise_duration: f32,
    pub sunset_duration: f32,
    /// In-game hours between regional weather rolls.
    pub hours_between_weather_changes: f32,
    /// Duration of one lightning flash, in real seconds.
    pub thunder_threshold: f32,
    pub thunder_sound_ids: [String; 4],
    /// Global fall speed of rain drops.
    pub rain_speed: f32,
    /// Weathers with a wind speed above this are storms.
    pub storm_wind_speed: f32,
    /// Hour the manager starts at before the first `set_hour`.
    pub start_hour: f32,
    /// See [`STORM_LANDMARK`].
    pub storm_landmark: [f32; 3],
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            sunrise_time: 6.0,
            sunset_time: 18.0,
            sunrise_duration: 2.0,
            sunset_duration: 2.0,
            hours_between_weather_changes: 20.0,
            thunder_threshold: 0.6,
            thunder_sound_ids: [
                "Thunder0".to_string(),
                "Thunder1".to_string(),
                "Thunder2".to_string(),
                "Thunder3".to_string(),
            ],
            rain_speed: 575.0,
            storm_wind_speed: 0.7,
            start_hour: 14.0,
            storm_landmark: STORM_LANDMARK,
        }
    }
}

impl WeatherConfig {
    pub fn from_fallbacks(source: &dyn FallbackSource) -> Result<Self> {
        let (config, errors) = Self::read(source);
        errors.into_result()?;
        Ok(config)
    }

    pub(crate) fn read(source: &dyn FallbackSource) -> (Self, ConfigErrors) {
        let mut r = SchemaReader::new(source, "Weather_");
        let mut config = Self {
            sunrise_time: r.float("Sunrise_Time"),
            sunset_time: r.float("Sunset_Time"),
            sunrise_duration: r.float("Sunrise_Duration"),
            sunset_duration: r.float("Sunset_Duration"),
            hours_between_weather_changes: r.float("Hours_Between_Weather_Changes"),
            thunder_threshold: r.float("Thunderstorm_Thunder_Threshold"),
            thunder_sound_ids: [
                r.text("Thunderstorm_Thunder_Sound_ID_0"),
                r.text("Thunderstorm_Thunder_Sound_ID_1"),
                r.text("Thunderstorm_Thunder_Sound_ID_2"),
                r.text("Thunderstorm_Thunder_Sound_ID_3"),
            ],
            rain_speed: r.float("Precip_Gravity"),
            ..Self::default()
        };
        let mut errors = r.finish();

        // A game setting rather than a weather fallback, so it has no prefix.
        let mut setting = SchemaReader::new(source, "");
        config.storm_wind_speed = setting.float("fStromWindSpeed");
        errors.extend(setting.finish());

        (config, errors)
    }

    /// Phase boundaries derived from the sunrise and sunset settings.
    pub fn day_phases(&self) -> DayPhases {
        DayPhases::new(
            self.sunrise_time,
            self.sunset_time,
            self.sunrise_duration,
            self.sunset_duration,
        )
    }
}

// ---------------------------------------------------------------------------
// WeatherContent
// ---------------------------------------------------------------------------

/// Everything read from content at startup: global settings, one profile per
/// weather and both moons.
#[derive(Clone, Debug)]
pub struct WeatherContent {
    pub config: WeatherConfig,
    pub profiles: WeatherProfiles,
    pub masser: MoonModel,
    pub secunda: MoonModel,
}

impl WeatherContent {
    /// Read and validate all content. Every bad key is reported in one
    /// [`Error::Config`](crate::core::Error::Config).
    pub fn from_fallbacks(source: &dyn FallbackSource) -> Result<Self> {
        let (config, mut errors) = WeatherConfig::read(source);
        let (masser, masser_errors) = MoonModel::read(Moon::Masser, source);
        let (secunda, secunda_errors) = MoonModel::read(Moon::Secunda, source);
        errors.extend(masser_errors);
        errors.extend(secunda_errors);

        let profiles = WeatherProfiles::from_fallbacks(source, config.storm_wind_speed, config.rain_speed);
        let profiles = match profiles {
            Ok(profiles) => profiles,
            Err(crate::core::Error::Config(profile_errors)) => {
                errors.extend(profile_errors);
                return Err(crate::core::Error::Config(errors));
            }
            Err(other) => return Err(other),
        };
        errors.into_result()?;

        log::info!(
            "Weather content ready: sunrise {:.1}h, sunset {:.1}h, {:.0}h between changes",
            config.sunrise_time,
            config.sunset_time,
            config.hours_between_weather_changes
        );
        Ok(Self { config, profiles, masser, secunda })
    }

    /// The content shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_fallbacks(&FallbackMap::builtin())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
