//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - Document persistence
//! - Text operations (page-break directives)
//! - Markdown rendering
//! - Print snapshots
//! - Sheet layout for printing

pub mod document_store;
pub mod page_layout;
pub mod renderer;
pub mod snapshot;
pub mod text_ops;
