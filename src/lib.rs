//! PressPad: a split-view markdown editor whose preview exports to paginated
//! print output.
//!
//! The `app` module holds everything that does not need a display. The FLTK
//! front end lives in `ui` behind the `gui` feature.

pub mod app;
#[cfg(feature = "gui")]
pub mod ui;

pub use app::infrastructure::logging::init_logging;
