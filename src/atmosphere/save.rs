//! Persisted weather state.
//!
//! Only the fields below survive a save. Thunder timers, region overrides and
//! everything read from content start fresh after a load.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::atmosphere::kind::WeatherKind;
use crate::core::{Error, Result};

/// Saved manager state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub hour: f32,
    pub wind_speed: f32,
    pub current_weather: String,
    /// Empty when no transition is running.
    pub next_weather: String,
    pub current_region: String,
    pub first_update: bool,
    pub remaining_transition_time: f32,
    /// Unconsumed game time, in seconds.
    pub time_passed: f64,
}

impl WeatherSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::debug!("Weather state saved to {}", path.as_ref().display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Parse the current and next weather names.
    pub fn weathers(&self) -> Result<(WeatherKind, Option<WeatherKind>)> {
        let current = parse_weather(&self.current_weather)?;
        let next = if self.next_weather.is_empty() {
            None
        } else {
            Some(parse_weather(&self.next_weather)?)
        };
        Ok((current, next))
    }
}

fn parse_weather(name: &str) -> Result<WeatherKind> {
    WeatherKind::from_name(name).ok_or_else(|| Error::UnknownWeather(name.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
