//! Traits the host environment implements so the print pipeline can drive it.
//!
//! The FLTK front end implements these in `ui::host`; tests use a recording
//! mock. Everything here is single-threaded: a host is only ever touched
//! from the UI thread.

use crate::app::domain::theme::{ColorMode, ThemeMode};
use crate::app::infrastructure::error::Result;
use crate::app::services::snapshot::RenderSnapshot;

/// Opaque copy of everything the host currently displays.
///
/// Captured before a print transaction and handed back verbatim afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayContent(String);

impl DisplayContent {
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Theme collaborator.
pub trait ThemeHost {
    fn theme_mode(&self) -> ThemeMode;

    /// Apply a theme mode. `SystemDefault` is re-resolved by the host.
    fn set_theme_mode(&mut self, mode: ThemeMode);

    fn system_prefers_dark(&self) -> bool;

    fn resolved_color_mode(&self) -> ColorMode {
        self.theme_mode().resolve(self.system_prefers_dark())
    }
}

/// Display and print collaborator.
pub trait DisplayHost {
    fn title(&self) -> String;

    fn set_title(&mut self, title: &str);

    /// Whether the rendered preview exists to be exported.
    fn has_render_target(&self) -> bool;

    fn capture_content(&self) -> DisplayContent;

    fn restore_content(&mut self, content: DisplayContent);

    /// Replace everything on display with the snapshot.
    fn show_snapshot(&mut self, snapshot: &RenderSnapshot);

    /// Yield once so pending style changes reach the screen.
    fn await_render_pass(&mut self);

    /// Open the platform print dialog and block until it is dismissed.
    ///
    /// Accept and cancel are indistinguishable to the caller.
    fn print(&mut self) -> Result<()>;
}

/// Everything a print transaction needs from the host.
pub trait PrintHost: ThemeHost + DisplayHost {}

impl<T: ThemeHost + DisplayHost> PrintHost for T {}
