use std::fmt;

use serde::{Deserialize, Serialize};

/// Theme mode as chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeMode {
    Light,
    Dark,
    SystemDefault,
}

impl ThemeMode {
    /// Next mode in the toolbar cycle: Light -> Dark -> SystemDefault -> Light.
    pub fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::SystemDefault,
            Self::SystemDefault => Self::Light,
        }
    }

    /// Resolve to the colour mode actually shown.
    pub fn resolve(self, system_dark: bool) -> ColorMode {
        match self {
            Self::Light => ColorMode::Light,
            Self::Dark => ColorMode::Dark,
            Self::SystemDefault if system_dark => ColorMode::Dark,
            Self::SystemDefault => ColorMode::Light,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::SystemDefault => "System",
        }
    }
}

/// Concrete colour mode, as written to the `data-color-mode` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Light,
    Dark,
}

impl ColorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
