use crate::app::domain::theme::ColorMode;
use crate::app::services::renderer::{RenderBackend, RenderOptions, RenderedTree};

/// Which halves of the split view are showing. At least one always is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewController {
    show_editor: bool,
    show_preview: bool,
}

impl Default for PreviewController {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl PreviewController {
    /// Restores saved visibility; a saved "both hidden" comes back as both shown.
    pub fn new(show_editor: bool, show_preview: bool) -> Self {
        if !show_editor && !show_preview {
            return Self {
                show_editor: true,
                show_preview: true,
            };
        }
        Self {
            show_editor,
            show_preview,
        }
    }

    pub fn editor_visible(&self) -> bool {
        self.show_editor
    }

    pub fn preview_visible(&self) -> bool {
        self.show_preview
    }

    pub fn can_hide_editor(&self) -> bool {
        self.show_preview
    }

    pub fn can_hide_preview(&self) -> bool {
        self.show_editor
    }

    /// Toggle the editor panel. Returns the new visibility; refused (unchanged)
    /// when it would hide the last visible panel.
    pub fn toggle_editor(&mut self) -> bool {
        if !self.show_editor || self.can_hide_editor() {
            self.show_editor = !self.show_editor;
        }
        self.show_editor
    }

    /// Toggle the preview panel. Same rule as [`Self::toggle_editor`].
    pub fn toggle_preview(&mut self) -> bool {
        if !self.show_preview || self.can_hide_preview() {
            self.show_preview = !self.show_preview;
        }
        self.show_preview
    }

    /// Render the live preview, or `None` while the preview panel is hidden.
    pub fn render_live<R: RenderBackend + ?Sized>(
        &self,
        renderer: &R,
        markup: &str,
        color_mode: ColorMode,
    ) -> Option<RenderedTree> {
        if !self.show_preview {
            return None;
        }
        Some(renderer.render(markup, color_mode, RenderOptions::default()))
    }
}
