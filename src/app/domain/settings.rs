use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::margin::PageMargin;
use super::theme::ThemeMode;
use crate::app::infrastructure::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_theme_mode")]
    pub theme_mode: ThemeMode,

    /// Margin applied to every exported page
    #[serde(default)]
    pub page_margin: PageMargin,

    #[serde(default = "default_panel_visible")]
    pub show_editor: bool,

    #[serde(default = "default_panel_visible")]
    pub show_preview: bool,

    #[serde(default = "default_font_size")]
    pub font_size: u32,
}

fn default_theme_mode() -> ThemeMode {
    ThemeMode::SystemDefault
}

fn default_panel_visible() -> bool {
    true
}

fn default_font_size() -> u32 {
    14
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme_mode: default_theme_mode(),
            page_margin: PageMargin::default(),
            show_editor: default_panel_visible(),
            show_preview: default_panel_visible(),
            font_size: default_font_size(),
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "no settings file, writing defaults");
                let default = Self::default();
                if let Err(e) = default.save_to(path) {
                    warn!(error = %e, "could not write default settings");
                }
                default
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("presspad");
        path.push("settings.json");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.theme_mode, ThemeMode::SystemDefault);
        assert_eq!(settings.page_margin.as_str(), "10mm");
        assert!(settings.show_editor);
        assert!(settings.show_preview);
        assert_eq!(settings.font_size, 14);
    }

    #[test]
    fn test_serialize_deserialize() {
        let settings = AppSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let loaded: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, loaded);
    }

    #[test]
    fn test_partial_config() {
        // Simulate old config missing new fields
        let json = r#"{"theme_mode": "Dark"}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.theme_mode, ThemeMode::Dark);
        assert_eq!(settings.page_margin, PageMargin::default());
        assert!(settings.show_preview);
    }

    #[test]
    fn test_invalid_margin_rejects_file() {
        let json = r#"{"page_margin": "huge"}"#;
        assert!(serde_json::from_str::<AppSettings>(json).is_err());
    }

    #[test]
    fn test_load_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("presspad").join("settings.json");

        let settings = AppSettings::load_from(&path);
        assert_eq!(settings, AppSettings::default());
        assert!(path.exists());
    }

    #[test]
    fn test_load_corrupt_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json at all").unwrap();

        assert_eq!(AppSettings::load_from(&path), AppSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = AppSettings {
            theme_mode: ThemeMode::Light,
            page_margin: PageMargin::parse("1in").unwrap(),
            show_editor: false,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();

        assert_eq!(AppSettings::load_from(&path), settings);
    }
}
