use super::theme::ThemeMode;
use crate::app::infrastructure::host::{DisplayHost, ThemeHost};

/// Theme mode and window title as the host shows them at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualState {
    pub theme_mode: ThemeMode,
    pub title: String,
}

impl VisualState {
    pub fn capture<H: ThemeHost + DisplayHost + ?Sized>(host: &H) -> Self {
        Self {
            theme_mode: host.theme_mode(),
            title: host.title(),
        }
    }
}
