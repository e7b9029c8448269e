//! Weather state machine.
//!
//! Tracks the current weather and at most one in-flight transition towards a
//! next weather. A transition lasts [`WeatherProfile::transition_seconds`] of
//! the weather it starts from.
//!
//! [`WeatherProfile::transition_seconds`]: crate::atmosphere::profile::WeatherProfile::transition_seconds

use crate::atmosphere::kind::WeatherKind;
use crate::atmosphere::profile::WeatherProfiles;

/// Current weather plus an optional transition towards the next one.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherStateMachine {
    current: WeatherKind,
    next: Option<WeatherKind>,
    /// Seconds left in the current transition. Meaningless when stable.
    remaining: f32,
    /// The first weather request is applied without a transition.
    first_update: bool,
}

impl Default for WeatherStateMachine {
    fn default() -> Self {
        Self::new(WeatherKind::Clear)
    }
}

impl WeatherStateMachine {
    pub fn new(initial: WeatherKind) -> Self {
        Self {
            current: initial,
            next: None,
            remaining: 0.0,
            first_update: true,
        }
    }

    /// Rebuild from persisted fields.
    pub fn from_parts(
        current: WeatherKind,
        next: Option<WeatherKind>,
        remaining: f32,
        first_update: bool,
    ) -> Self {
        Self { current, next, remaining, first_update }
    }

    #[inline]
    pub fn current(&self) -> WeatherKind {
        self.current
    }

    #[inline]
    pub fn next(&self) -> Option<WeatherKind> {
        self.next
    }

    #[inline]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    #[inline]
    pub fn is_first_update(&self) -> bool {
        self.first_update
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.next.is_some()
    }

    /// Request a weather change.
    ///
    /// Requesting the current weather while stable does nothing. `instant`
    /// (or the very first request) switches without a transition. If a
    /// transition is already past its halfway point, its target becomes the
    /// new starting weather.
    pub fn set_weather(&mut self, kind: WeatherKind, instant: bool, profiles: &WeatherProfiles) {
        if kind == self.current && self.next.is_none() {
            self.first_update = false;
            return;
        }

        if instant || self.first_update {
            log::debug!("Weather set to {kind} without transition");
            self.next = None;
            self.current = kind;
        } else {
            if let Some(next) = self.next {
                let total = profiles.get(self.current).transition_seconds();
                if self.remaining / total <= 0.5 {
                    self.current = next;
                }
            }
            self.next = Some(kind);
            self.remaining = profiles.get(self.current).transition_seconds();
            log::info!(
                "Weather transition {} -> {kind} over {:.0}s",
                self.current,
                self.remaining
            );
        }
        self.first_update = false;
    }

    /// Count down the transition. Returns the new weather when the transition
    /// finishes during this call.
    pub fn advance(&mut self, elapsed: f32) -> Option<WeatherKind> {
        let next = self.next?;
        self.remaining -= elapsed;
        if self.remaining < 0.0 {
            log::info!("Weather transition to {next} finished");
            self.current = next;
            self.next = None;
            return Some(next);
        }
        None
    }

    /// Linear progress `[0, 1]` of the running transition, `None` when stable.
    pub fn progress(&self, profiles: &WeatherProfiles) -> Option<f32> {
        self.next?;
        Some(1.0 - self.remaining / profiles.get(self.current).transition_seconds())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
