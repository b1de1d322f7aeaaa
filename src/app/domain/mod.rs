//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Document and the page-break directive
//! - Theme and colour modes, visual state
//! - Page margin and application settings

pub mod document;
pub mod margin;
pub mod settings;
pub mod theme;
pub mod visual_state;

pub use document::{DEFAULT_MARKDOWN, Document, PAGE_BREAK_MARKER, PAGE_BREAK_TOKEN};
pub use margin::{MarginBox, PageMargin};
pub use settings::AppSettings;
pub use theme::{ColorMode, ThemeMode};
pub use visual_state::VisualState;
