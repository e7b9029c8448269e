//! Named configuration values ("fallbacks") and the schema reader that turns
//! them into typed settings.
//!
//! Content ships weather parameters as flat `Key -> string` pairs such as
//! `Weather_Clear_Sky_Day_Color = "95,135,203"`. [`FallbackMap`] stores those
//! pairs, and [`SchemaReader`] reads typed fields under a common key prefix,
//! collecting every missing or malformed key instead of stopping at the
//! first one.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Color, ConfigErrors, ConfigIssue, Result};

/// Content shipped with the crate, in `openmw.cfg` fallback syntax.
const BUILTIN_FALLBACKS: &str = include_str!("../../assets/weather.cfg");

// ---------------------------------------------------------------------------
// Source trait
// ---------------------------------------------------------------------------

/// Lookup of raw configuration strings by key.
pub trait FallbackSource {
    fn fallback(&self, key: &str) -> Option<&str>;
}

// ---------------------------------------------------------------------------
// FallbackMap
// ---------------------------------------------------------------------------

/// In-memory fallback table.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FallbackMap {
    values: HashMap<String, String>,
}

impl FallbackMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default content set for all ten weathers, both moons and the
    /// global day/night settings.
    pub fn builtin() -> Self {
        Self::from_cfg_str(BUILTIN_FALLBACKS)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn merge(&mut self, other: FallbackMap) {
        self.values.extend(other.values);
    }

    /// Parse `fallback=Key,Value` lines. Anything else (comments, other
    /// settings, blank lines) is skipped.
    pub fn from_cfg_str(text: &str) -> Self {
        let mut map = Self::new();
        for line in text.lines() {
            let line = line.trim();
            let Some(entry) = line.strip_prefix("fallback=") else {
                continue;
            };
            match entry.split_once(',') {
                Some((key, value)) => map.insert(key.trim(), value.trim()),
                None => log::warn!("Ignoring fallback line without a value: {line}"),
            }
        }
        map
    }

    /// Parse a JSON object. Numbers and booleans are accepted alongside
    /// strings and stored in their textual form.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut map = Self::new();
        for (key, value) in raw {
            let text = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Bool(b) => if b { "1".to_string() } else { "0".to_string() },
                other => other.to_string(),
            };
            map.insert(key, text);
        }
        Ok(map)
    }

    /// Load from disk: `.json` files as JSON, everything else as cfg lines.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let map = if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
            Self::from_json_str(&text)?
        } else {
            Self::from_cfg_str(&text)
        };
        log::info!("Loaded {} fallback values from {}", map.len(), path.display());
        Ok(map)
    }
}

impl FallbackSource for FallbackMap {
    fn fallback(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl FallbackSource for HashMap<String, String> {
    fn fallback(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Value parsing
// ---------------------------------------------------------------------------

pub fn parse_float(value: &str) -> Option<f32> {
    value.trim().parse().ok()
}

/// `"r,g,b"` with byte channels -> linear color with opaque alpha.
pub fn parse_color(value: &str) -> Option<Color> {
    let mut channels = value.split(',').map(|c| c.trim().parse::<u8>());
    let r = channels.next()?.ok()?;
    let g = channels.next()?.ok()?;
    let b = channels.next()?.ok()?;
    if channels.next().is_some() {
        return None;
    }
    Some([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0])
}

/// Integer flag, non-zero is true.
pub fn parse_flag(value: &str) -> Option<bool> {
    value.trim().parse::<i32>().ok().map(|v| v != 0)
}

// ---------------------------------------------------------------------------
// SchemaReader
// ---------------------------------------------------------------------------

/// Reads typed fields named relative to a key prefix, e.g. prefix
/// `Weather_Rain_` + field `Wind_Speed`.
///
/// Failed reads return the type's default and are recorded; call
/// [`finish`](Self::finish) to get the collected issues.
pub struct SchemaReader<'a> {
    source: &'a dyn FallbackSource,
    prefix: String,
    errors: ConfigErrors,
}

impl<'a> SchemaReader<'a> {
    pub fn new(source: &'a dyn FallbackSource, prefix: impl Into<String>) -> Self {
        Self {
            source,
            prefix: prefix.into(),
            errors: ConfigErrors::default(),
        }
    }

    pub fn float(&mut self, field: &str) -> f32 {
        self.read(field, parse_float, "float")
    }

    pub fn color(&mut self, field: &str) -> Color {
        self.read(field, parse_color, "color")
    }

    pub fn flag(&mut self, field: &str) -> bool {
        self.read(field, parse_flag, "flag")
    }

    pub fn text(&mut self, field: &str) -> String {
        self.read(field, |v| Some(v.to_string()), "string")
    }

    /// Issues collected so far.
    pub fn finish(self) -> ConfigErrors {
        self.errors
    }

    fn read<T: Default>(
        &mut self,
        field: &str,
        parse: impl Fn(&str) -> Option<T>,
        expected: &'static str,
    ) -> T {
        let key = format!("{}{}", self.prefix, field);
        let Some(value) = self.source.fallback(&key) else {
            self.errors.push(ConfigIssue::Missing { key });
            return T::default();
        };
        match parse(value) {
            Some(parsed) => parsed,
            None => {
                self.errors.push(ConfigIssue::Malformed {
                    key,
                    value: value.to_string(),
                    expected,
                });
                T::default()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
