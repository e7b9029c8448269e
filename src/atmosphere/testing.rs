//! Test doubles for the manager's collaborators.

use std::collections::HashMap;

use glam::Vec3;

use crate::atmosphere::env::{GameTime, RandomSource, SceneSink, SoundHandle, SoundSink, WorldClock};
use crate::atmosphere::moon::{Moon, MoonState};
use crate::atmosphere::region::RegionChances;
use crate::atmosphere::state::WeatherResult;
use crate::atmosphere::time::TimeOfDay;
use crate::core::Color;

// ---------------------------------------------------------------------------
// Dice
// ---------------------------------------------------------------------------

/// Replays a fixed list of rolls, cycling when exhausted. Each roll is
/// reduced modulo the requested range.
pub struct ScriptedDice {
    rolls: Vec<u32>,
    cursor: usize,
    /// Ranges requested so far.
    pub requests: Vec<u32>,
}

impl ScriptedDice {
    pub fn new(rolls: Vec<u32>) -> Self {
        assert!(!rolls.is_empty());
        Self { rolls, cursor: 0, requests: Vec::new() }
    }
}

impl RandomSource for ScriptedDice {
    fn roll_dice(&mut self, max: u32) -> u32 {
        self.requests.push(max);
        let roll = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        roll % max.max(1)
    }
}

// ---------------------------------------------------------------------------
// Sound
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingSound {
    next_handle: SoundHandle,
    /// Every loop started, in order.
    pub loops_started: Vec<(String, f32)>,
    pub stopped: Vec<SoundHandle>,
    /// Loops still playing, by handle.
    pub playing: HashMap<SoundHandle, (String, f32)>,
    pub one_shots: Vec<(String, f32, f32)>,
}

impl RecordingSound {
    /// Id and volume of the only playing loop, if exactly one is playing.
    pub fn current_loop(&self) -> Option<(String, f32)> {
        if self.playing.len() == 1 {
            self.playing.values().next().cloned()
        } else {
            None
        }
    }
}

impl SoundSink for RecordingSound {
    fn play_loop(&mut self, id: &str, volume: f32) -> Option<SoundHandle> {
        self.next_handle += 1;
        self.loops_started.push((id.to_string(), volume));
        self.playing.insert(self.next_handle, (id.to_string(), volume));
        Some(self.next_handle)
    }

    fn stop(&mut self, handle: SoundHandle) {
        self.stopped.push(handle);
        self.playing.remove(&handle);
    }

    fn set_volume(&mut self, handle: SoundHandle, volume: f32) {
        if let Some(entry) = self.playing.get_mut(&handle) {
            entry.1 = volume;
        }
    }

    fn play_once(&mut self, id: &str, volume: f32, pitch: f32) {
        self.one_shots.push((id.to_string(), volume, pitch));
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// Keeps the last value pushed through each call.
#[derive(Default)]
pub struct RecordingScene {
    pub fog: Option<(f32, Color)>,
    pub ambient_color: Option<Color>,
    pub sun_color: Option<Color>,
    pub sun_direction: Option<Vec3>,
    pub weather: Option<WeatherResult>,
    pub weather_updates: usize,
    pub storm_direction: Option<Vec3>,
    pub sky_enabled: Option<bool>,
    pub sun_enabled: Option<bool>,
    pub moons: HashMap<Moon, MoonState>,
}

impl SceneSink for RecordingScene {
    fn configure_fog(&mut self, depth: f32, color: Color) {
        self.fog = Some((depth, color));
    }

    fn set_ambient_color(&mut self, color: Color) {
        self.ambient_color = Some(color);
    }

    fn set_sun_color(&mut self, color: Color) {
        self.sun_color = Some(color);
    }

    fn set_sun_direction(&mut self, direction: Vec3) {
        self.sun_direction = Some(direction);
    }

    fn set_weather(&mut self, result: &WeatherResult) {
        self.weather = Some(result.clone());
        self.weather_updates += 1;
    }

    fn set_storm_direction(&mut self, direction: Vec3) {
        self.storm_direction = Some(direction);
    }

    fn set_sky_enabled(&mut self, enabled: bool) {
        self.sky_enabled = Some(enabled);
    }

    fn set_sun_enabled(&mut self, enabled: bool) {
        self.sun_enabled = Some(enabled);
    }

    fn set_moon_state(&mut self, moon: Moon, state: MoonState) {
        self.moons.insert(moon, state);
    }
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// Mutable world with a player in a named region.
pub struct TestWorld {
    pub exterior: bool,
    pub clock: TimeOfDay,
    pub position: Vec3,
    pub region: Option<String>,
    pub regions: HashMap<String, RegionChances>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self {
            exterior: true,
            clock: TimeOfDay::new(14.0),
            position: Vec3::ZERO,
            region: None,
            regions: HashMap::new(),
        }
    }
}

impl TestWorld {
    /// Exterior world with the player in `region`, which always rolls `chances`.
    pub fn in_region(region: &str, chances: [u8; 10]) -> Self {
        let mut world = Self { region: Some(region.to_string()), ..Self::default() };
        world.add_region(region, chances);
        world
    }

    pub fn add_region(&mut self, region: &str, chances: [u8; 10]) {
        self.regions
            .insert(region.to_lowercase(), RegionChances::from_array(chances));
    }
}

impl WorldClock for TestWorld {
    fn is_exterior(&self) -> bool {
        self.exterior
    }

    fn timestamp(&self) -> GameTime {
        self.clock.timestamp()
    }

    fn player_position(&self) -> Vec3 {
        self.position
    }

    fn player_region(&self) -> Option<String> {
        self.region.clone()
    }

    fn region_chances(&self, region: &str) -> Option<RegionChances> {
        self.regions.get(&region.to_lowercase()).copied()
    }
}
