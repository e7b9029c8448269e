//! Per-weather parameter sets.
//!
//! A [`WeatherProfile`] is read once from fallback content and never changes.
//! [`WeatherProfiles`] holds one profile for each [`WeatherKind`].

use serde::{Deserialize, Serialize};

use crate::atmosphere::color::PhaseColors;
use crate::atmosphere::fallback::{FallbackSource, SchemaReader};
use crate::atmosphere::kind::WeatherKind;
use crate::core::{Color, ConfigErrors, ConfigIssue, Result};

/// Mesh used for rain drops by weathers that have precipitation enabled.
pub const RAIN_EFFECT: &str = "meshes\\raindrop.nif";

/// Content "transition delta" units per hour of transition.
const DELTAS_PER_HOUR: f32 = 0.00835;

/// All parameters of one weather type.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeatherProfile {
    pub kind: WeatherKind,
    pub cloud_texture: String,

    pub sky_colors: PhaseColors,
    pub fog_colors: PhaseColors,
    pub ambient_colors: PhaseColors,
    pub sun_colors: PhaseColors,
    pub sun_disc_sunset_color: Color,

    pub land_fog_day_depth: f32,
    pub land_fog_night_depth: f32,

    pub wind_speed: f32,
    pub cloud_speed: f32,
    pub glare_view: f32,
    /// Fall speed of rain drops (global precipitation gravity).
    pub rain_speed: f32,
    /// How often new rain drops enter.
    pub rain_frequency: f32,
    /// Abstract per-update transition rate. Always > 0.
    pub transition_delta: f32,
    /// Ceiling on cloud cross-fade progress. Always > 0.
    pub clouds_maximum_percent: f32,

    pub ambient_loop_sound: String,
    pub particle_effect: String,
    pub rain_effect: String,

    /// Wind speed exceeds the storm threshold.
    pub is_storm: bool,
}

impl WeatherProfile {
    /// Read the profile for `kind` from `Weather_<Name>_*` keys.
    pub fn from_fallbacks(
        kind: WeatherKind,
        source: &dyn FallbackSource,
        storm_wind_speed: f32,
        rain_speed: f32,
    ) -> Result<Self> {
        let (profile, errors) = Self::read(kind, source, storm_wind_speed, rain_speed);
        errors.into_result()?;
        Ok(profile)
    }

    pub(crate) fn read(
        kind: WeatherKind,
        source: &dyn FallbackSource,
        storm_wind_speed: f32,
        rain_speed: f32,
    ) -> (Self, ConfigErrors) {
        let prefix = format!("Weather_{}_", kind.config_name());
        let mut r = SchemaReader::new(source, prefix.clone());

        let wind_speed = r.float("Wind_Speed");
        let using_precip = r.flag("Using_Precip");

        let profile = Self {
            kind,
            cloud_texture: r.text("Cloud_Texture"),
            sky_colors: read_phase_colors(&mut r, "Sky"),
            fog_colors: read_phase_colors(&mut r, "Fog"),
            ambient_colors: read_phase_colors(&mut r, "Ambient"),
            sun_colors: read_phase_colors(&mut r, "Sun"),
            sun_disc_sunset_color: r.color("Sun_Disc_Sunset_Color"),
            land_fog_day_depth: r.float("Land_Fog_Day_Depth"),
            land_fog_night_depth: r.float("Land_Fog_Night_Depth"),
            wind_speed,
            cloud_speed: r.float("Cloud_Speed"),
            glare_view: r.float("Glare_View"),
            rain_speed,
            rain_frequency: r.float("Rain_Entrance_Speed"),
            transition_delta: r.float("Transition_Delta"),
            clouds_maximum_percent: r.float("Clouds_Maximum_Percent"),
            ambient_loop_sound: kind.ambient_loop_sound().to_string(),
            particle_effect: kind.particle_effect().to_string(),
            rain_effect: if using_precip { RAIN_EFFECT.to_string() } else { String::new() },
            is_storm: wind_speed > storm_wind_speed,
        };

        let mut errors = r.finish();
        // Both are used as divisors.
        for (field, value) in [
            ("Transition_Delta", profile.transition_delta),
            ("Clouds_Maximum_Percent", profile.clouds_maximum_percent),
        ] {
            if source.fallback(&format!("{prefix}{field}")).is_some() && value <= 0.0 {
                errors.push(ConfigIssue::Malformed {
                    key: format!("{prefix}{field}"),
                    value: value.to_string(),
                    expected: "positive float",
                });
            }
        }

        (profile, errors)
    }

    /// Real seconds needed to fully transition away from this weather.
    #[inline]
    pub fn transition_seconds(&self) -> f32 {
        (DELTAS_PER_HOUR / self.transition_delta) * 60.0 * 60.0
    }

    /// Cloud cross-fade progress for a linear transition ratio. Clouds finish
    /// early when the maximum percent is below 1.
    #[inline]
    pub fn cloud_blend_factor(&self, transition_ratio: f32) -> f32 {
        transition_ratio / self.clouds_maximum_percent
    }
}

fn read_phase_colors(r: &mut SchemaReader<'_>, group: &str) -> PhaseColors {
    PhaseColors {
        sunrise: r.color(&format!("{group}_Sunrise_Color")),
        day: r.color(&format!("{group}_Day_Color")),
        sunset: r.color(&format!("{group}_Sunset_Color")),
        night: r.color(&format!("{group}_Night_Color")),
    }
}

// ---------------------------------------------------------------------------
// WeatherProfiles
// ---------------------------------------------------------------------------

/// One profile per weather kind, indexed by [`WeatherKind::index`].
#[derive(Clone, Debug)]
pub struct WeatherProfiles {
    profiles: Vec<WeatherProfile>,
}

impl WeatherProfiles {
    /// Read all ten profiles, reporting every bad key across all of them.
    pub fn from_fallbacks(
        source: &dyn FallbackSource,
        storm_wind_speed: f32,
        rain_speed: f32,
    ) -> Result<Self> {
        let mut errors = ConfigErrors::default();
        let mut profiles = Vec::with_capacity(WeatherKind::COUNT);
        for kind in WeatherKind::ALL {
            let (profile, profile_errors) = WeatherProfile::read(kind, source, storm_wind_speed, rain_speed);
            errors.extend(profile_errors);
            profiles.push(profile);
        }
        errors.into_result()?;

        log::debug!(
            "Loaded {} weather profiles ({} storms)",
            profiles.len(),
            profiles.iter().filter(|p| p.is_storm).count()
        );
        Ok(Self { profiles })
    }

    #[inline]
    pub fn get(&self, kind: WeatherKind) -> &WeatherProfile {
        &self.profiles[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeatherProfile> {
        self.profiles.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::fallback::FallbackMap;

    fn builtin() -> WeatherProfiles {
        WeatherProfiles::from_fallbacks(&FallbackMap::builtin(), 0.7, 575.0).unwrap()
    }

    #[test]
    fn test_transition_seconds() {
        let profiles = builtin();
        let clear = profiles.get(WeatherKind::Clear);
        let expected = 0.00835 / clear.transition_delta * 3600.0;
        assert!((clear.transition_seconds() - expected).abs() < 1e-3);
        // delta 0.015 -> 2004 seconds
        assert!((clear.transition_seconds() - 2004.0).abs() < 0.1);
    }

    #[test]
    fn test_cloud_blend_factor_divides_by_max_percent() {
        let profiles = builtin();
        let thunder = profiles.get(WeatherKind::Thunderstorm);
        assert!((thunder.cloud_blend_factor(0.33) - 0.33 / thunder.clouds_maximum_percent).abs() < 1e-6);
        let clear = profiles.get(WeatherKind::Clear);
        assert!((clear.cloud_blend_factor(0.4) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_storm_flag_from_wind_speed() {
        let profiles = builtin();
        assert!(!profiles.get(WeatherKind::Clear).is_storm);
        assert!(!profiles.get(WeatherKind::Rain).is_storm);
        assert!(profiles.get(WeatherKind::Ashstorm).is_storm);
        assert!(profiles.get(WeatherKind::Blight).is_storm);
        assert!(profiles.get(WeatherKind::Blizzard).is_storm);
    }

    #[test]
    fn test_effects_and_precipitation() {
        let profiles = builtin();
        let rain = profiles.get(WeatherKind::Rain);
        assert_eq!(rain.rain_effect, RAIN_EFFECT);
        assert_eq!(rain.ambient_loop_sound, "rain");
        assert_eq!(rain.rain_speed, 575.0);
        let snow = profiles.get(WeatherKind::Snow);
        assert!(snow.rain_effect.is_empty());
        assert_eq!(snow.particle_effect, "meshes\\snow.nif");
    }

    #[test]
    fn test_colors_read_from_content() {
        let profiles = builtin();
        let day = profiles.get(WeatherKind::Clear).sky_colors.day;
        assert!((day[0] - 95.0 / 255.0).abs() < 1e-6);
        assert!((day[1] - 135.0 / 255.0).abs() < 1e-6);
        assert!((day[2] - 203.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_missing_keys_aggregate_across_profiles() {
        let mut map = FallbackMap::builtin();
        map.remove("Weather_Clear_Wind_Speed");
        map.remove("Weather_Snow_Glare_View");
        map.insert("Weather_Rain_Transition_Delta", "0");

        let err = WeatherProfiles::from_fallbacks(&map, 0.7, 575.0).unwrap_err();
        match err {
            crate::core::Error::Config(errors) => {
                assert_eq!(errors.len(), 3, "{errors}");
                let text = errors.to_string();
                assert!(text.contains("Weather_Clear_Wind_Speed"));
                assert!(text.contains("Weather_Snow_Glare_View"));
                assert!(text.contains("Weather_Rain_Transition_Delta"));
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }
}
