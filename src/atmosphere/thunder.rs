//! Lightning and thunder timing during thunderstorms.

use crate::atmosphere::env::{RandomSource, SoundSink};

/// Chance gained per real second while no flash is active, in percent.
const CHANCE_PER_SECOND: f32 = 4.0;
/// Chance needed for the first strike after a reset.
const INITIAL_CHANCE_NEEDED: f32 = 50.0;
/// Delay between a flash starting and its thunder clap.
const SOUND_DELAY: f32 = 0.25;
/// Delay after a clap, long enough that a flash plays at most one.
const SOUND_COOLDOWN: f32 = 1000.0;

/// Timers for the lightning flash and its thunder sound.
#[derive(Clone, Debug, PartialEq)]
pub struct ThunderState {
    /// Seconds left in the active flash, `<= 0` when idle.
    pub flash: f32,
    /// Accumulated strike chance, in percent.
    pub chance: f32,
    /// Chance at which the next strike happens.
    pub chance_needed: f32,
    pub sound_delay: f32,
}

impl Default for ThunderState {
    fn default() -> Self {
        Self {
            flash: 0.0,
            chance: 0.0,
            chance_needed: INITIAL_CHANCE_NEEDED,
            sound_delay: SOUND_DELAY,
        }
    }
}

impl ThunderState {
    #[inline]
    pub fn is_flashing(&self) -> bool {
        self.flash > 0.0
    }

    /// Advance by `duration` real seconds of an unpaused thunderstorm.
    ///
    /// `threshold` is the flash length. One of `sound_ids` is played at
    /// random once per flash.
    pub fn update(
        &mut self,
        duration: f32,
        threshold: f32,
        sound_ids: &[String; 4],
        rng: &mut dyn RandomSource,
        sound: &mut dyn SoundSink,
    ) {
        if self.flash > 0.0 {
            self.sound_delay -= duration;
            if self.sound_delay <= 0.0 {
                let pick = rng.roll_dice(sound_ids.len() as u32) as usize;
                if let Some(id) = sound_ids.get(pick) {
                    log::debug!("Thunder: {id}");
                    sound.play_once(id, 1.0, 1.0);
                }
                self.sound_delay = SOUND_COOLDOWN;
            }

            self.flash -= duration;
            if self.flash <= 0.0 {
                self.chance_needed = rng.roll_dice(100) as f32;
                self.chance = 0.0;
            }
        } else {
            self.chance += duration * CHANCE_PER_SECOND;
            if self.chance >= self.chance_needed {
                log::trace!("Lightning strike at {:.1}% chance", self.chance);
                self.flash = threshold;
                self.sound_delay = SOUND_DELAY;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
