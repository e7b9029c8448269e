//! The ten weather kinds and their external numeric ids.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::Error;

/// Closed set of weather types. The discriminant is the id scripts use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherKind {
    #[default]
    Clear = 0,
    Cloudy = 1,
    Foggy = 2,
    Overcast = 3,
    Rain = 4,
    Thunderstorm = 5,
    Ashstorm = 6,
    Blight = 7,
    Snow = 8,
    Blizzard = 9,
}

impl WeatherKind {
    /// Canonical order, shared by region probability tables and script ids.
    pub const ALL: [WeatherKind; 10] = [
        Self::Clear,
        Self::Cloudy,
        Self::Foggy,
        Self::Overcast,
        Self::Rain,
        Self::Thunderstorm,
        Self::Ashstorm,
        Self::Blight,
        Self::Snow,
        Self::Blizzard,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Numeric id (0-9).
    #[inline]
    pub fn id(self) -> u32 {
        self as u32
    }

    /// Map a script id back to a kind. Anything out of range is `Clear`.
    pub fn from_id(id: u32) -> Self {
        Self::ALL.get(id as usize).copied().unwrap_or(Self::Clear)
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lower-case lookup name, e.g. `"thunderstorm"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
            Self::Foggy => "foggy",
            Self::Overcast => "overcast",
            Self::Rain => "rain",
            Self::Thunderstorm => "thunderstorm",
            Self::Ashstorm => "ashstorm",
            Self::Blight => "blight",
            Self::Snow => "snow",
            Self::Blizzard => "blizzard",
        }
    }

    /// Capitalised segment used in fallback keys, e.g. `Weather_Thunderstorm_...`.
    pub fn config_name(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Cloudy => "Cloudy",
            Self::Foggy => "Foggy",
            Self::Overcast => "Overcast",
            Self::Rain => "Rain",
            Self::Thunderstorm => "Thunderstorm",
            Self::Ashstorm => "Ashstorm",
            Self::Blight => "Blight",
            Self::Snow => "Snow",
            Self::Blizzard => "Blizzard",
        }
    }

    /// Case-insensitive name lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Looping ambient sound played while this weather is active ("" = none).
    pub fn ambient_loop_sound(self) -> &'static str {
        match self {
            Self::Rain => "rain",
            Self::Thunderstorm => "rain heavy",
            Self::Ashstorm => "ashstorm",
            Self::Blight => "blight",
            Self::Blizzard => "BM Blizzard",
            _ => "",
        }
    }

    /// Particle mesh drawn around the player ("" = none).
    pub fn particle_effect(self) -> &'static str {
        match self {
            Self::Ashstorm => "meshes\\ashcloud.nif",
            Self::Blight => "meshes\\blightcloud.nif",
            Self::Snow => "meshes\\snow.nif",
            Self::Blizzard => "meshes\\blizzard.nif",
            _ => "",
        }
    }
}

impl fmt::Display for WeatherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WeatherKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Error::UnknownWeather(s.to_string()))
    }
}
