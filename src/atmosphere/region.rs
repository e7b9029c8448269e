//! Regional weather probabilities and the weighted draw over them.

use serde::{Deserialize, Serialize};

use crate::atmosphere::env::RandomSource;
use crate::atmosphere::kind::WeatherKind;

/// Relative weights of each weather in one region, in [`WeatherKind::ALL`]
/// order. Content is expected to make them sum to 100.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionChances(pub [u8; WeatherKind::COUNT]);

impl RegionChances {
    pub const fn from_array(weights: [u8; WeatherKind::COUNT]) -> Self {
        Self(weights)
    }

    /// Build from a script-supplied list. Missing trailing weights are zero
    /// and extra ones are ignored.
    pub fn from_slice(weights: &[u8]) -> Self {
        let mut out = [0u8; WeatherKind::COUNT];
        for (slot, w) in out.iter_mut().zip(weights) {
            *slot = *w;
        }
        Self(out)
    }

    #[inline]
    pub fn chance(&self, kind: WeatherKind) -> u8 {
        self.0[kind.index()]
    }

    /// Sum of all weights.
    pub fn total(&self) -> u32 {
        self.0.iter().map(|&w| u32::from(w)).sum()
    }

    /// Roll the next weather for this region.
    pub fn next_weather(&self, rng: &mut dyn RandomSource) -> WeatherKind {
        next_weather(&self.0, rng)
    }
}

/// Weighted draw over `chances`, indexed like [`WeatherKind::ALL`].
///
/// A roll in `[0, 100)` picks the first weather whose running total exceeds
/// it. Weights that sum to less than the roll fall back to clear.
///
/// This is a `1..=100` roll compared with `<=`. Engines that compare a
/// `1..=100` roll with `<` pick the following weather on exact boundaries.
pub fn next_weather(chances: &[u8], rng: &mut dyn RandomSource) -> WeatherKind {
    let roll = rng.roll_dice(100);
    let mut sum = 0u32;
    for (kind, &chance) in WeatherKind::ALL.iter().zip(chances) {
        sum += u32::from(chance);
        if roll < sum {
            return *kind;
        }
    }
    log::warn!("Weather chances sum to {sum}, below roll {roll}; using clear");
    WeatherKind::Clear
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
