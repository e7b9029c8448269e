//! Run the weather manager against an in-memory world and print an hourly
//! table of the resulting sky.
//!
//! Usage:
//!   cargo run --release --bin simulate_weather -- --hours 48 --region "bitter coast region"
//!
//! Options:
//!   --hours N        game hours to simulate (default 24)
//!   --step M         game minutes per tick (default 10)
//!   --seed S         dice seed (default 42)
//!   --region NAME    region the player stands in (default "ascadian isles region")
//!   --config FILE    fallback overrides (.json or openmw.cfg lines)

use std::collections::HashMap;

use glam::Vec3;

use weather_sim::atmosphere::{
    ChaChaDice, FallbackMap, GameTime, Moon, MoonState, RegionChances, SceneSink, SoundHandle,
    SoundSink, TimeOfDay, WeatherContent, WeatherManager, WeatherResult, WorldClock,
};
use weather_sim::core::{Color, Result};

/// Game seconds per real second.
const TIMESCALE: f32 = 30.0;

/// Chances of a few well-known regions.
const REGIONS: &[(&str, [u8; 10])] = &[
    ("ascadian isles region", [45, 35, 5, 5, 5, 5, 0, 0, 0, 0]),
    ("bitter coast region", [10, 20, 30, 10, 20, 10, 0, 0, 0, 0]),
    ("red mountain region", [0, 0, 0, 0, 0, 0, 80, 20, 0, 0]),
    ("sheogorad", [20, 30, 10, 10, 10, 10, 0, 0, 0, 10]),
    ("solstheim", [10, 10, 10, 10, 0, 0, 0, 0, 40, 30]),
];

// ---------------------------------------------------------------------------
// In-memory collaborators
// ---------------------------------------------------------------------------

struct DemoWorld {
    clock: TimeOfDay,
    region: String,
    regions: HashMap<String, RegionChances>,
}

impl WorldClock for DemoWorld {
    fn is_exterior(&self) -> bool {
        true
    }

    fn timestamp(&self) -> GameTime {
        self.clock.timestamp()
    }

    fn player_position(&self) -> Vec3 {
        Vec3::new(-10000.0, 20000.0, 500.0)
    }

    fn player_region(&self) -> Option<String> {
        Some(self.region.clone())
    }

    fn region_chances(&self, region: &str) -> Option<RegionChances> {
        self.regions.get(&region.to_lowercase()).copied()
    }
}

#[derive(Default)]
struct LogSound {
    next_handle: SoundHandle,
    thunder_claps: u32,
}

impl SoundSink for LogSound {
    fn play_loop(&mut self, id: &str, volume: f32) -> Option<SoundHandle> {
        self.next_handle += 1;
        log::info!("Loop '{id}' started at {volume:.2}");
        Some(self.next_handle)
    }

    fn stop(&mut self, handle: SoundHandle) {
        log::debug!("Loop {handle} stopped");
    }

    fn set_volume(&mut self, _handle: SoundHandle, _volume: f32) {}

    fn play_once(&mut self, id: &str, _volume: f32, _pitch: f32) {
        self.thunder_claps += 1;
        log::debug!("One-shot '{id}'");
    }
}

#[derive(Default)]
struct LastFrame {
    weather: WeatherResult,
    sun_enabled: bool,
    masser: Option<MoonState>,
    secunda: Option<MoonState>,
}

impl SceneSink for LastFrame {
    fn configure_fog(&mut self, _depth: f32, _color: Color) {}
    fn set_ambient_color(&mut self, _color: Color) {}
    fn set_sun_color(&mut self, _color: Color) {}
    fn set_sun_direction(&mut self, _direction: Vec3) {}

    fn set_weather(&mut self, result: &WeatherResult) {
        self.weather = result.clone();
    }

    fn set_storm_direction(&mut self, _direction: Vec3) {}
    fn set_sky_enabled(&mut self, _enabled: bool) {}

    fn set_sun_enabled(&mut self, enabled: bool) {
        self.sun_enabled = enabled;
    }

    fn set_moon_state(&mut self, moon: Moon, state: MoonState) {
        match moon {
            Moon::Masser => self.masser = Some(state),
            Moon::Secunda => self.secunda = Some(state),
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn color_hex(c: Color) -> String {
    let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("#{:02x}{:02x}{:02x}", byte(c[0]), byte(c[1]), byte(c[2]))
}

fn moon_cell(state: Option<MoonState>) -> String {
    match state {
        Some(s) if s.alpha > 0.0 => format!("{:>5.1}° {:.2}", s.rotation_from_horizon, s.alpha),
        _ => "-".to_string(),
    }
}

fn run(args: &[String]) -> Result<()> {
    let hours: f32 = parse_arg(args, "--hours", 24.0);
    let step_minutes: f32 = parse_arg::<f32>(args, "--step", 10.0).max(1.0);
    let seed: u64 = parse_arg(args, "--seed", 42);
    let region: String = parse_arg(args, "--region", "ascadian isles region".to_string());
    let config: Option<String> = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .cloned();

    let mut fallbacks = FallbackMap::builtin();
    if let Some(path) = &config {
        fallbacks.merge(FallbackMap::load(path)?);
    }
    let content = WeatherContent::from_fallbacks(&fallbacks)?;
    let start_hour = content.config.start_hour;

    let world = DemoWorld {
        clock: TimeOfDay::new(start_hour),
        region: region.clone(),
        regions: REGIONS
            .iter()
            .map(|(name, chances)| (name.to_string(), RegionChances::from_array(*chances)))
            .collect(),
    };
    if world.region_chances(&region).is_none() {
        log::warn!("Unknown region '{region}', weather will stay clear");
    }

    let mut manager = WeatherManager::new(
        content,
        world,
        LogSound::default(),
        LastFrame::default(),
        ChaChaDice::from_seed_u64(seed),
    );

    log::info!("Simulating {hours}h in '{region}' ({step_minutes} min steps, seed {seed})");
    println!(
        "{:>4} {:>6}  {:<13} {:<13} {:>5} {:>5}  {:<8} {:<8} {:>4}  {:<12} {:<12}",
        "day", "hour", "weather", "next", "fog", "wind", "sky", "ambient", "sun", "masser", "secunda"
    );

    let step_hours = step_minutes / 60.0;
    let ticks = (hours / step_hours).ceil() as u32;
    let real_dt = step_hours * 3600.0 / TIMESCALE;
    let mut last_printed_hour = None;

    for _ in 0..ticks {
        {
            let world = manager.world_mut();
            world.clock.advance_hours(step_hours);
        }
        let time = manager.world().timestamp();
        manager.set_hour(time.hour);
        manager.advance_time(f64::from(step_hours));
        manager.update(real_dt, false);

        let whole_hour = (time.day, time.hour as u32);
        if last_printed_hour == Some(whole_hour) {
            continue;
        }
        last_printed_hour = Some(whole_hour);

        let frame = manager.scene();
        let r = &frame.weather;
        println!(
            "{:>4} {:>6.2}  {:<13} {:<13} {:>5.2} {:>5.2}  {:<8} {:<8} {:>4}  {:<12} {:<12}",
            time.day,
            time.hour,
            manager.current_weather().name(),
            manager.next_weather().map(|k| k.name()).unwrap_or("-"),
            r.fog_depth,
            r.wind_speed,
            color_hex(r.sky_color),
            color_hex(r.ambient_color),
            if frame.sun_enabled { "up" } else { "down" },
            moon_cell(frame.masser),
            moon_cell(frame.secunda),
        );
    }

    log::info!(
        "Finished in {} with {} thunder claps",
        manager.current_weather(),
        manager.sound().thunder_claps
    );
    Ok(())
}

fn main() {
    weather_sim::core::logging::init();

    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
