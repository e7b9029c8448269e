//! Regional weather and sky simulation.
//!
//! Weather is rolled per region from weighted chances, cross-faded over a
//! per-weather transition time and resolved against the hour of day into a
//! [`WeatherResult`] every frame. The main entry point is [`WeatherManager`],
//! which is built from [`WeatherContent`] and talks to the rest of the game
//! through the traits in [`env`].

pub mod color;
pub mod config;
pub mod daily;
pub mod env;
pub mod fallback;
pub mod kind;
pub mod manager;
pub mod moon;
pub mod profile;
pub mod region;
pub mod rng;
pub mod save;
pub mod state;
pub mod sun;
pub mod thunder;
pub mod time;
pub mod weather;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports
pub use color::{DayPhase, Lerp, PhaseColors};
pub use config::{WeatherConfig, WeatherContent};
pub use daily::{DailyColorResolver, DailyColors, DayPhases};
pub use env::{GameTime, RandomSource, SceneSink, SoundHandle, SoundSink, WorldClock};
pub use fallback::{FallbackMap, FallbackSource, SchemaReader};
pub use kind::WeatherKind;
pub use manager::WeatherManager;
pub use moon::{Moon, MoonModel, MoonPhase, MoonState};
pub use profile::{WeatherProfile, WeatherProfiles};
pub use region::RegionChances;
pub use rng::ChaChaDice;
pub use save::WeatherSnapshot;
pub use state::{SkyUniform, WeatherResult};
pub use sun::compute_sun_direction;
pub use thunder::ThunderState;
pub use time::TimeOfDay;
pub use weather::WeatherStateMachine;
