//! Error types for the weather simulation

use std::fmt;

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid weather configuration:\n{0}")]
    Config(ConfigErrors),

    #[error("Unknown weather: {0:?}")]
    UnknownWeather(String),

    #[error("Region not found: {0:?}")]
    RegionNotFound(String),
}

/// A single problem found while reading a configuration key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigIssue {
    /// The key was not present in the fallback source.
    Missing { key: String },
    /// The key was present but its value could not be parsed.
    Malformed { key: String, value: String, expected: &'static str },
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { key } => write!(f, "missing key {key}"),
            Self::Malformed { key, value, expected } => {
                write!(f, "key {key} = {value:?} is not a valid {expected}")
            }
        }
    }
}

/// Every issue collected during one validation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigErrors(pub Vec<ConfigIssue>);

impl ConfigErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn push(&mut self, issue: ConfigIssue) {
        self.0.push(issue);
    }

    /// Move all issues from `other` into `self`.
    pub fn extend(&mut self, other: ConfigErrors) {
        self.0.extend(other.0);
    }

    /// `Ok(())` when nothing was collected, otherwise `Error::Config`.
    pub fn into_result(self) -> crate::core::Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Config(self))
        }
    }
}

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {issue}")?;
        }
        Ok(())
    }
}
