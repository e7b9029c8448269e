//! The weather manager: regional weather rolls, transitions, per-tick result
//! and everything pushed to the scene and sound collaborators.

use std::collections::HashMap;

use glam::Vec3;

use crate::atmosphere::config::WeatherContent;
use crate::atmosphere::daily::{DailyColorResolver, DayPhases};
use crate::atmosphere::env::{RandomSource, SceneSink, SoundHandle, SoundSink, WorldClock};
use crate::atmosphere::kind::WeatherKind;
use crate::atmosphere::moon::Moon;
use crate::atmosphere::region::RegionChances;
use crate::atmosphere::save::WeatherSnapshot;
use crate::atmosphere::state::WeatherResult;
use crate::atmosphere::sun::compute_sun_direction;
use crate::atmosphere::thunder::ThunderState;
use crate::atmosphere::weather::WeatherStateMachine;
use crate::core::Result;

/// Drives the weather simulation. Call [`update`](Self::update) once per
/// frame; script commands may be issued between frames.
pub struct WeatherManager<W, S, C, R> {
    world: W,
    sound: S,
    scene: C,
    rng: R,

    content: WeatherContent,
    phases: DayPhases,
    colors: DailyColorResolver,

    hour: f32,
    wind_speed: f32,
    is_storm: bool,
    storm_direction: Vec3,
    weather: WeatherStateMachine,
    result: WeatherResult,

    current_region: String,
    /// Game seconds not yet consumed by `update`.
    time_passed: f64,
    /// Game seconds until the region rolls new weather.
    weather_update_time: f32,
    region_overrides: HashMap<String, WeatherKind>,
    region_mods: HashMap<String, RegionChances>,

    thunder: ThunderState,
    ambient_sound: Option<SoundHandle>,
    playing_sound_id: String,
}

impl<W, S, C, R> WeatherManager<W, S, C, R>
where
    W: WorldClock,
    S: SoundSink,
    C: SceneSink,
    R: RandomSource,
{
    pub fn new(content: WeatherContent, world: W, sound: S, scene: C, rng: R) -> Self {
        let phases = content.config.day_phases();
        let hour = content.config.start_hour;
        let weather_update_time = content.config.hours_between_weather_changes * 3600.0;
        Self {
            world,
            sound,
            scene,
            rng,
            content,
            phases,
            colors: DailyColorResolver::new(phases),
            hour,
            wind_speed: 0.0,
            is_storm: false,
            storm_direction: Vec3::Y,
            weather: WeatherStateMachine::new(WeatherKind::Clear),
            result: WeatherResult::default(),
            current_region: String::new(),
            time_passed: 0.0,
            weather_update_time,
            region_overrides: HashMap::new(),
            region_mods: HashMap::new(),
            thunder: ThunderState::default(),
            ambient_sound: None,
            playing_sound_id: String::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Tick
    // -----------------------------------------------------------------------

    /// Advance one frame. `duration` is real seconds since the last frame and
    /// only drives thunder; weather transitions run on game time supplied
    /// through [`advance_time`](Self::advance_time).
    pub fn update(&mut self, duration: f32, paused: bool) {
        let time_passed = self.time_passed as f32;
        self.time_passed = 0.0;
        self.weather_update_time -= time_passed;

        if !self.world.is_exterior() {
            self.scene.set_sky_enabled(false);
            self.stop_sounds();
            return;
        }
        self.scene.set_sky_enabled(true);

        self.switch_to_next_weather();
        self.weather.advance(time_passed);

        self.result = self.resolve_result();
        self.wind_speed = self.result.wind_speed;
        self.is_storm = self.result.is_storm;

        if self.is_storm {
            let landmark = Vec3::from(self.content.config.storm_landmark);
            let mut direction = self.world.player_position() - landmark;
            direction.z = 0.0;
            self.storm_direction = direction.normalize_or_zero();
            self.scene.set_storm_direction(self.storm_direction);
        }

        self.scene
            .configure_fog(self.result.fog_depth, self.result.fog_color);

        self.scene.set_sun_enabled(self.phases.is_sun_up(self.hour));
        self.scene.set_sun_direction(compute_sun_direction(
            self.hour,
            self.phases.sunrise_time,
            self.phases.night_start,
        ));

        let time = self.world.timestamp();
        self.scene
            .set_moon_state(Moon::Masser, self.content.masser.calculate_state(time.day, time.hour));
        self.scene
            .set_moon_state(Moon::Secunda, self.content.secunda.calculate_state(time.day, time.hour));

        if !paused && self.weather.current() == WeatherKind::Thunderstorm && !self.weather.is_transitioning() {
            self.thunder.update(
                duration,
                self.content.config.thunder_threshold,
                &self.content.config.thunder_sound_ids,
                &mut self.rng,
                &mut self.sound,
            );
        }

        self.scene.set_ambient_color(self.result.ambient_color);
        self.scene.set_sun_color(self.result.sun_color);
        self.scene.set_weather(&self.result);

        self.update_ambient_sound();
    }

    fn resolve_result(&mut self) -> WeatherResult {
        let profiles = &self.content.profiles;
        let current = profiles.get(self.weather.current());
        let from = WeatherResult::stable(current, &self.colors.resolve(self.hour, current));

        match (self.weather.next(), self.weather.progress(profiles)) {
            (Some(next), Some(factor)) => {
                let target = profiles.get(next);
                let to = WeatherResult::stable(target, &self.colors.resolve(self.hour, target));
                from.blend(&to, factor, target)
            }
            _ => from,
        }
    }

    /// Roll new weather when the timer runs out or the player changes region.
    fn switch_to_next_weather(&mut self) {
        let region = self
            .world
            .player_region()
            .unwrap_or_default()
            .to_lowercase();
        if self.weather_update_time > 0.0 && region == self.current_region {
            return;
        }

        self.weather_update_time = self.content.config.hours_between_weather_changes * 3600.0;

        let kind = if let Some(&forced) = self.region_overrides.get(&region) {
            log::debug!("Region '{region}' forced to {forced}");
            forced
        } else if let Some(chances) = self.world.region_chances(&region) {
            let chances = self.region_mods.get(&region).copied().unwrap_or(chances);
            chances.next_weather(&mut self.rng)
        } else {
            WeatherKind::Clear
        };
        log::debug!("Region '{region}' rolled {kind}");
        self.current_region = region;

        self.set_weather(kind, false);
    }

    fn update_ambient_sound(&mut self) {
        if self.playing_sound_id != self.result.ambient_loop_sound {
            self.stop_sounds();
            let id = &self.result.ambient_loop_sound;
            if !id.is_empty() {
                log::debug!("Ambient loop '{id}'");
                self.ambient_sound = self.sound.play_loop(id, 1.0);
            }
            self.playing_sound_id = id.clone();
        }
        if let Some(handle) = self.ambient_sound {
            self.sound.set_volume(handle, self.result.ambient_sound_volume);
        }
    }

    fn stop_sounds(&mut self) {
        if let Some(handle) = self.ambient_sound.take() {
            self.sound.stop(handle);
            self.playing_sound_id.clear();
        }
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Change weather, with a transition unless `instant`.
    pub fn set_weather(&mut self, kind: WeatherKind, instant: bool) {
        self.weather.set_weather(kind, instant, &self.content.profiles);
    }

    /// Force a region to a weather id (0-9, anything else is clear). The region
    /// must exist.
    pub fn change_weather(&mut self, region: &str, id: u32) -> Result<()> {
        self.world.find_region(region)?;

        let kind = WeatherKind::from_id(id);
        log::info!("Region '{region}' weather forced to {kind}");
        self.region_overrides.insert(region.to_lowercase(), kind);

        let in_region = self
            .world
            .player_region()
            .is_some_and(|r| r.eq_ignore_ascii_case(region));
        if in_region {
            self.set_weather(kind, false);
        }
        Ok(())
    }

    /// Replace a region's weather chances. If the current weather can no
    /// longer occur there, a new roll happens on the next update.
    pub fn mod_region(&mut self, region: &str, chances: &[u8]) {
        let chances = RegionChances::from_slice(chances);
        let current = self.weather.current();
        log::debug!("Region '{region}' chances set to {:?}", chances.0);
        self.region_mods.insert(region.to_lowercase(), chances);
        if chances.chance(current) == 0 {
            self.weather_update_time = 0.0;
        }
    }

    pub fn set_hour(&mut self, hour: f32) {
        self.hour = hour;
    }

    /// Queue game time for the next update.
    pub fn advance_time(&mut self, hours: f64) {
        self.time_passed += hours * 3600.0;
    }

    /// Forget region overrides and thunder state and stop the ambient loop.
    pub fn clear(&mut self) {
        self.stop_sounds();
        self.region_overrides.clear();
        self.region_mods.clear();
        self.thunder = ThunderState::default();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Numeric id of the current weather.
    pub fn weather_id(&self) -> u32 {
        self.weather.current().id()
    }

    pub fn current_weather(&self) -> WeatherKind {
        self.weather.current()
    }

    pub fn next_weather(&self) -> Option<WeatherKind> {
        self.weather.next()
    }

    pub fn is_in_storm(&self) -> bool {
        self.is_storm
    }

    pub fn storm_direction(&self) -> Vec3 {
        self.storm_direction
    }

    pub fn wind_speed(&self) -> f32 {
        self.wind_speed
    }

    /// Outdoors at night.
    pub fn is_dark(&self) -> bool {
        self.world.is_exterior() && self.phases.is_night(self.hour)
    }

    pub fn hour(&self) -> f32 {
        self.hour
    }

    /// Result of the last exterior update.
    pub fn result(&self) -> &WeatherResult {
        &self.result
    }

    pub fn thunder(&self) -> &ThunderState {
        &self.thunder
    }

    pub fn region_override(&self, region: &str) -> Option<WeatherKind> {
        self.region_overrides.get(&region.to_lowercase()).copied()
    }

    pub fn content(&self) -> &WeatherContent {
        &self.content
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    pub fn scene(&self) -> &C {
        &self.scene
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    pub fn snapshot(&self) -> WeatherSnapshot {
        WeatherSnapshot {
            hour: self.hour,
            wind_speed: self.wind_speed,
            current_weather: self.weather.current().name().to_string(),
            next_weather: self
                .weather
                .next()
                .map(|k| k.name().to_string())
                .unwrap_or_default(),
            current_region: self.current_region.clone(),
            first_update: self.weather.is_first_update(),
            remaining_transition_time: self.weather.remaining(),
            time_passed: self.time_passed,
        }
    }

    /// Load saved state. Unsaved state resets to defaults. On error nothing
    /// changes.
    pub fn restore(&mut self, snapshot: &WeatherSnapshot) -> Result<()> {
        let (current, next) = snapshot.weathers()?;

        self.clear();
        self.hour = snapshot.hour;
        self.wind_speed = snapshot.wind_speed;
        self.weather = WeatherStateMachine::from_parts(
            current,
            next,
            snapshot.remaining_transition_time,
            snapshot.first_update,
        );
        self.current_region = snapshot.current_region.clone();
        self.time_passed = snapshot.time_passed;

        log::info!(
            "Weather restored: {current}{} in '{}' at {:.2}h",
            next.map(|n| format!(" -> {n}")).unwrap_or_default(),
            self.current_region,
            self.hour
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::testing::{RecordingScene, RecordingSound, ScriptedDice, TestWorld};
    use crate::core::Error;

    type TestManager = WeatherManager<TestWorld, RecordingSound, RecordingScene, ScriptedDice>;

    const ALWAYS_CLEAR: [u8; 10] = [100, 0, 0, 0, 0, 0, 0, 0, 0, 0];
    const ALWAYS_RAIN: [u8; 10] = [0, 0, 0, 0, 100, 0, 0, 0, 0, 0];
    const ALWAYS_THUNDER: [u8; 10] = [0, 0, 0, 0, 0, 100, 0, 0, 0, 0];

    fn manager(world: TestWorld, rolls: Vec<u32>) -> TestManager {
        let content = WeatherContent::builtin().unwrap();
        WeatherManager::new(
            content,
            world,
            RecordingSound::default(),
            RecordingScene::default(),
            ScriptedDice::new(rolls),
        )
    }

    fn clear_seconds(m: &TestManager) -> f32 {
        m.content().profiles.get(WeatherKind::Clear).transition_seconds()
    }

    #[test]
    fn test_initial_state() {
        let m = manager(TestWorld::default(), vec![0]);
        assert_eq!(m.hour(), 14.0);
        assert_eq!(m.storm_direction(), Vec3::Y);
        assert_eq!(m.current_weather(), WeatherKind::Clear);
        assert_eq!(m.next_weather(), None);
        assert!(m.snapshot().first_update);
    }

    #[test]
    fn test_first_update_applies_region_weather_instantly() {
        let mut m = manager(TestWorld::in_region("Bitter Coast", ALWAYS_RAIN), vec![0]);
        m.update(0.016, false);
        assert_eq!(m.current_weather(), WeatherKind::Rain);
        assert_eq!(m.next_weather(), None);
        assert_eq!(m.snapshot().current_region, "bitter coast");

        let scene = m.scene();
        assert_eq!(scene.sky_enabled, Some(true));
        assert_eq!(scene.weather_updates, 1);
        assert_eq!(scene.weather.as_ref().map(|r| r.rain_effect.is_empty()), Some(false));
        assert_eq!(m.sound().current_loop(), Some(("rain".to_string(), 1.0)));
    }

    #[test]
    fn test_unknown_region_falls_back_to_clear() {
        let mut world = TestWorld::default();
        world.region = Some("nowhere".to_string());
        let mut m = manager(world, vec![0]);
        m.set_weather(WeatherKind::Snow, true);
        m.update(0.016, false);
        // "nowhere" differs from the empty starting region, so a roll happens.
        assert_eq!(m.next_weather(), Some(WeatherKind::Clear));
    }

    #[test]
    fn test_region_change_starts_transition() {
        let mut world = TestWorld::in_region("a", ALWAYS_CLEAR);
        world.add_region("b", ALWAYS_RAIN);
        let mut m = manager(world, vec![0]);
        m.update(0.016, false);
        assert_eq!(m.current_weather(), WeatherKind::Clear);

        m.world_mut().region = Some("B".to_string());
        m.update(0.016, false);
        assert_eq!(m.current_weather(), WeatherKind::Clear);
        assert_eq!(m.next_weather(), Some(WeatherKind::Rain));
        assert_eq!(m.snapshot().remaining_transition_time, clear_seconds(&m));
    }

    #[test]
    fn test_transition_completes_with_game_time() {
        let mut world = TestWorld::in_region("a", ALWAYS_CLEAR);
        world.add_region("b", ALWAYS_RAIN);
        let mut m = manager(world, vec![0]);
        m.update(0.016, false);
        m.world_mut().region = Some("b".to_string());
        m.update(0.016, false);

        let total = clear_seconds(&m) as f64;
        m.advance_time(total * 0.25 / 3600.0);
        m.update(0.016, false);
        let r = m.result().clone();
        assert!(r.ambient_sound_volume > 0.0 && r.ambient_sound_volume < 1.0);
        assert!(r.ambient_loop_sound.is_empty());
        assert_eq!(r.next_cloud_texture, m.content().profiles.get(WeatherKind::Rain).cloud_texture);

        m.advance_time(total / 3600.0);
        m.update(0.016, false);
        assert_eq!(m.current_weather(), WeatherKind::Rain);
        assert_eq!(m.next_weather(), None);
        assert_eq!(m.result().ambient_sound_volume, 1.0);
    }

    #[test]
    fn test_hours_between_changes_triggers_reroll() {
        let mut m = manager(TestWorld::in_region("a", ALWAYS_CLEAR), vec![0]);
        m.update(0.016, false);
        m.world_mut().add_region("a", ALWAYS_RAIN);

        m.advance_time(19.9);
        m.update(0.016, false);
        assert_eq!(m.next_weather(), None);

        // Lapse the timer with a step shorter than the transition.
        m.advance_time(0.2);
        m.update(0.016, false);
        assert_eq!(m.current_weather(), WeatherKind::Clear);
        assert_eq!(m.next_weather(), Some(WeatherKind::Rain));
    }

    #[test]
    fn test_long_step_completes_rerolled_transition() {
        let mut m = manager(TestWorld::in_region("a", ALWAYS_CLEAR), vec![0]);
        m.update(0.016, false);
        m.world_mut().add_region("a", ALWAYS_RAIN);

        m.advance_time(19.0);
        m.update(0.016, false);
        m.advance_time(1.0);
        m.update(0.016, false);
        assert_eq!(m.current_weather(), WeatherKind::Rain);
        assert_eq!(m.next_weather(), None);
    }

    #[test]
    fn test_interior_disables_sky_and_sound() {
        let mut m = manager(TestWorld::in_region("a", ALWAYS_RAIN), vec![0]);
        m.update(0.016, false);
        assert!(m.sound().current_loop().is_some());

        m.world_mut().exterior = false;
        let updates = m.scene().weather_updates;
        m.update(0.016, false);
        assert_eq!(m.scene().sky_enabled, Some(false));
        assert_eq!(m.scene().weather_updates, updates);
        assert!(m.sound().playing.is_empty());

        // Back outside the loop restarts.
        m.world_mut().exterior = true;
        m.update(0.016, false);
        assert_eq!(m.scene().sky_enabled, Some(true));
        assert_eq!(m.sound().current_loop(), Some(("rain".to_string(), 1.0)));
        assert_eq!(m.sound().loops_started.len(), 2);
    }

    #[test]
    fn test_is_dark() {
        let mut m = manager(TestWorld::default(), vec![0]);
        m.set_hour(2.0);
        assert!(m.is_dark());
        m.set_hour(12.0);
        assert!(!m.is_dark());
        m.set_hour(19.5);
        assert!(m.is_dark());

        m.set_hour(2.0);
        m.world_mut().exterior = false;
        assert!(!m.is_dark());
    }

    #[test]
    fn test_sun_enabled_by_hour() {
        let mut m = manager(TestWorld::in_region("a", ALWAYS_CLEAR), vec![0]);
        m.set_hour(12.0);
        m.update(0.016, false);
        assert_eq!(m.scene().sun_enabled, Some(true));
        assert!(m.scene().sun_direction.is_some());

        for hour in [6.0, 20.0, 23.0, 3.0] {
            m.set_hour(hour);
            m.update(0.016, false);
            assert_eq!(m.scene().sun_enabled, Some(false), "hour {hour}");
        }
    }

    #[test]
    fn test_moons_pushed_every_exterior_tick() {
        let mut m = manager(TestWorld::in_region("a", ALWAYS_CLEAR), vec![0]);
        m.update(0.016, false);
        assert_eq!(m.scene().moons.len(), 2);
        let masser = m.scene().moons[&Moon::Masser];
        let time = m.world().timestamp();
        assert_eq!(masser, m.content().masser.calculate_state(time.day, time.hour));
    }

    #[test]
    fn test_storm_direction_points_away_from_landmark() {
        let mut world = TestWorld::in_region("a", [0, 0, 0, 0, 0, 0, 100, 0, 0, 0]);
        world.position = Vec3::new(19950.0 + 300.0, 72032.0, 0.0);
        let mut m = manager(world, vec![0]);
        m.update(0.016, false);
        assert_eq!(m.current_weather(), WeatherKind::Ashstorm);
        assert!(m.is_in_storm());
        let dir = m.storm_direction();
        assert!((dir - Vec3::X).length() < 1e-5, "{dir:?}");
        assert_eq!(m.scene().storm_direction, Some(dir));
        assert!(m.wind_speed() > 0.7);
    }

    #[test]
    fn test_thunder_only_in_settled_thunderstorm() {
        let mut m = manager(TestWorld::in_region("a", ALWAYS_THUNDER), vec![0]);
        m.update(0.0, false);
        assert_eq!(m.current_weather(), WeatherKind::Thunderstorm);

        // 4% per second, default threshold 50.
        m.update(12.5, false);
        assert!(m.thunder().is_flashing());
        m.update(0.3, false);
        assert_eq!(m.sound().one_shots.len(), 1);
        assert_eq!(m.sound().one_shots[0].0, "Thunder0");

        // Paused ticks leave the timers alone.
        let before = m.thunder().clone();
        m.update(5.0, true);
        assert_eq!(m.thunder(), &before);
    }

    #[test]
    fn test_no_thunder_outside_thunderstorm() {
        let mut m = manager(TestWorld::in_region("a", ALWAYS_RAIN), vec![0]);
        m.update(0.0, false);
        m.update(100.0, false);
        assert_eq!(m.thunder(), &ThunderState::default());
    }

    #[test]
    fn test_change_weather_sets_override_and_transitions() {
        let mut world = TestWorld::in_region("Ascadian Isles", ALWAYS_CLEAR);
        world.add_region("Sheogorad", ALWAYS_CLEAR);
        let mut m = manager(world, vec![0]);
        m.update(0.016, false);

        m.change_weather("ascadian isles", 5).unwrap();
        assert_eq!(m.region_override("Ascadian Isles"), Some(WeatherKind::Thunderstorm));
        assert_eq!(m.next_weather(), Some(WeatherKind::Thunderstorm));

        m.change_weather("Sheogorad", 8).unwrap();
        assert_eq!(m.region_override("sheogorad"), Some(WeatherKind::Snow));
        assert_eq!(m.next_weather(), Some(WeatherKind::Thunderstorm));

        m.change_weather("Sheogorad", 42).unwrap();
        assert_eq!(m.region_override("sheogorad"), Some(WeatherKind::Clear));
    }

    #[test]
    fn test_change_weather_unknown_region() {
        let mut m = manager(TestWorld::in_region("a", ALWAYS_CLEAR), vec![0]);
        match m.change_weather("atlantis", 1) {
            Err(Error::RegionNotFound(region)) => assert_eq!(region, "atlantis"),
            other => panic!("expected region error, got {other:?}"),
        }
        assert_eq!(m.region_override("atlantis"), None);
    }

    #[test]
    fn test_override_used_on_next_roll() {
        let mut world = TestWorld::in_region("a", ALWAYS_CLEAR);
        world.add_region("b", ALWAYS_CLEAR);
        let mut m = manager(world, vec![0]);
        m.update(0.016, false);
        m.change_weather("b", 9).unwrap();

        m.world_mut().region = Some("b".to_string());
        m.update(0.016, false);
        assert_eq!(m.next_weather(), Some(WeatherKind::Blizzard));
    }

    #[test]
    fn test_mod_region_forces_reroll() {
        let mut m = manager(TestWorld::in_region("a", ALWAYS_CLEAR), vec![0]);
        m.update(0.016, false);

        // Clear still possible: no reroll.
        m.mod_region("a", &[50, 50]);
        m.update(0.016, false);
        assert_eq!(m.next_weather(), None);

        m.mod_region("A", &ALWAYS_RAIN);
        m.update(0.016, false);
        assert_eq!(m.next_weather(), Some(WeatherKind::Rain));
    }

    #[test]
    fn test_ambient_volume_follows_transition() {
        let mut world = TestWorld::in_region("a", ALWAYS_RAIN);
        world.add_region("b", ALWAYS_CLEAR);
        let mut m = manager(world, vec![0]);
        m.update(0.016, false);
        m.world_mut().region = Some("b".to_string());
        m.update(0.016, false);

        let total = m.content().profiles.get(WeatherKind::Rain).transition_seconds() as f64;
        m.advance_time(total * 0.25 / 3600.0);
        m.update(0.016, false);
        let (id, volume) = m.sound().current_loop().unwrap();
        assert_eq!(id, "rain");
        assert!((volume - 0.5).abs() < 1e-3, "{volume}");

        // Past the midpoint the loop switches to clear's (none).
        m.advance_time(total * 0.5 / 3600.0);
        m.update(0.016, false);
        assert!(m.sound().playing.is_empty());
    }

    #[test]
    fn test_snapshot_round_trip_resets_unsaved_state() {
        let mut world = TestWorld::in_region("a", ALWAYS_THUNDER);
        world.add_region("b", ALWAYS_CLEAR);
        let mut m = manager(world, vec![0]);
        m.set_hour(9.5);
        m.update(0.0, false);
        m.update(3.0, false);
        m.change_weather("b", 4).unwrap();
        m.world_mut().region = Some("b".to_string());
        m.update(0.0, false);
        m.advance_time(0.1);

        let snap = m.snapshot();
        assert_eq!(snap.current_weather, "thunderstorm");
        assert_eq!(snap.next_weather, "rain");
        assert!((snap.time_passed - 360.0).abs() < 1e-6);
        assert_ne!(m.thunder(), &ThunderState::default());

        let mut fresh = manager(TestWorld::default(), vec![0]);
        fresh.restore(&snap).unwrap();
        assert_eq!(fresh.snapshot(), snap);

        m.restore(&snap).unwrap();
        assert_eq!(m.snapshot(), snap);
        assert_eq!(m.thunder().chance_needed, 50.0);
        assert_eq!(m.thunder(), &ThunderState::default());
        assert_eq!(m.region_override("b"), None);
    }

    #[test]
    fn test_failed_restore_leaves_state() {
        let mut m = manager(TestWorld::in_region("a", ALWAYS_RAIN), vec![0]);
        m.update(0.016, false);
        let before = m.snapshot();

        let mut bad = before.clone();
        bad.hour = 3.0;
        bad.current_weather = "fog of war".to_string();
        assert!(matches!(m.restore(&bad), Err(Error::UnknownWeather(_))));
        assert_eq!(m.snapshot(), before);
    }

    #[test]
    fn test_clear_resets_script_state() {
        let mut world = TestWorld::in_region("a", ALWAYS_RAIN);
        world.add_region("b", ALWAYS_CLEAR);
        let mut m = manager(world, vec![0]);
        m.update(0.016, false);
        m.change_weather("b", 2).unwrap();
        m.mod_region("b", &ALWAYS_RAIN);

        m.clear();
        assert_eq!(m.region_override("b"), None);
        assert!(m.sound().playing.is_empty());
        assert_eq!(m.thunder(), &ThunderState::default());
    }

    #[test]
    fn test_weather_id() {
        let mut m = manager(TestWorld::default(), vec![0]);
        m.set_weather(WeatherKind::Blight, true);
        assert_eq!(m.weather_id(), 7);
    }
}
