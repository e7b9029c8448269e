//! Capabilities the weather manager needs from the rest of the game.
//!
//! The manager owns one value of each trait and calls into them from
//! [`WeatherManager::update`](crate::atmosphere::WeatherManager::update).
//! None of these calls may block.

use glam::Vec3;

use crate::atmosphere::moon::{Moon, MoonState};
use crate::atmosphere::region::RegionChances;
use crate::atmosphere::state::WeatherResult;
use crate::core::{Color, Error, Result};

/// In-game calendar position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GameTime {
    /// Whole days since the start of the game.
    pub day: u32,
    /// Hour within the day, `[0, 24)`.
    pub hour: f32,
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// World state read each tick.
pub trait WorldClock {
    /// Whether the player is somewhere the sky is visible.
    fn is_exterior(&self) -> bool;

    fn timestamp(&self) -> GameTime;

    fn player_position(&self) -> Vec3;

    /// Region the player is in, if any.
    fn player_region(&self) -> Option<String>;

    /// Weather probabilities for a region, `None` when the region is unknown.
    fn region_chances(&self, region: &str) -> Option<RegionChances>;

    /// Like [`region_chances`](Self::region_chances) but unknown regions are
    /// an error.
    fn find_region(&self, region: &str) -> Result<RegionChances> {
        self.region_chances(region)
            .ok_or_else(|| Error::RegionNotFound(region.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Sound
// ---------------------------------------------------------------------------

/// Opaque handle to a playing looped sound.
pub type SoundHandle = u64;

pub trait SoundSink {
    /// Start a looping sound. Returns `None` if it could not be started.
    fn play_loop(&mut self, id: &str, volume: f32) -> Option<SoundHandle>;

    fn stop(&mut self, handle: SoundHandle);

    fn set_volume(&mut self, handle: SoundHandle, volume: f32);

    /// Fire-and-forget one-shot sound.
    fn play_once(&mut self, id: &str, volume: f32, pitch: f32);
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// Renderer-facing output of each exterior tick.
pub trait SceneSink {
    fn configure_fog(&mut self, depth: f32, color: Color);
    fn set_ambient_color(&mut self, color: Color);
    fn set_sun_color(&mut self, color: Color);
    /// Unit vector pointing from the sun towards the scene.
    fn set_sun_direction(&mut self, direction: Vec3);
    fn set_weather(&mut self, result: &WeatherResult);
    fn set_storm_direction(&mut self, direction: Vec3);
    fn set_sky_enabled(&mut self, enabled: bool);
    fn set_sun_enabled(&mut self, enabled: bool);
    fn set_moon_state(&mut self, moon: Moon, state: MoonState);
}

// ---------------------------------------------------------------------------
// Randomness
// ---------------------------------------------------------------------------

/// Source of uniform dice rolls.
pub trait RandomSource {
    /// Uniform integer in `[0, max)`. `max` is always at least 1.
    fn roll_dice(&mut self, max: u32) -> u32;
}
