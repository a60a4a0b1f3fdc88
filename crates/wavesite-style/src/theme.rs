use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Attribute on the root element that carries the current mode.
///
/// Style rules select on it and the wave renderer is driven by the same
/// value, so both always agree.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Two-valued display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// The page starts dark.
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub const ALL: [Self; 2] = [Self::Dark, Self::Light];

    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Literal attribute value: `"dark"` or `"light"`.
    #[must_use]
    pub const fn as_attr(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Human-facing label: `"Dark"` or `"Light"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }

    /// Parse an attribute value, ignoring surrounding whitespace and case.
    #[must_use]
    pub fn from_attr(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_attr().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_attr())
    }
}

/// Returned when a string is neither `"dark"` nor `"light"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownThemeMode(pub String);

impl fmt::Display for UnknownThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme mode {:?} (expected \"dark\" or \"light\")", self.0)
    }
}

impl std::error::Error for UnknownThemeMode {}

impl FromStr for ThemeMode {
    type Err = UnknownThemeMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_attr(s).ok_or_else(|| UnknownThemeMode(s.to_owned()))
    }
}
