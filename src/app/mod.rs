//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (Document, ThemeMode, PageMargin, Settings)
//! - `controllers/` - Orchestration (PrintSession, confirmation gate, panels)
//! - `services/` - Business operations (document store, renderer, snapshots)
//! - `infrastructure/` - External integrations (storage, platform, host traits, error)
//! - `state.rs` - Main application coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use controllers::confirmation::{ConfirmationPrompt, ExportDecision, UserConfirmationGate};
pub use controllers::preview::PreviewController;
pub use controllers::print_session::{ExportOutcome, PrintPhase, PrintSession};
pub use domain::{AppSettings, ColorMode, Document, PageMargin, ThemeMode, VisualState};
pub use infrastructure::error::{AppError, Result};
pub use infrastructure::host::{DisplayContent, DisplayHost, PrintHost, ThemeHost};
pub use infrastructure::platform::detect_system_dark_mode;
pub use infrastructure::storage::{JsonFileStore, KeyValueStore, MemoryStore, SharedStore, shared};
pub use services::document_store::DocumentStore;
pub use services::renderer::{MarkdownRenderer, RenderBackend, RenderOptions, RenderedTree};
pub use services::snapshot::{RenderSnapshot, RenderSnapshotBuilder};
pub use state::{AppState, ExportFlow};
