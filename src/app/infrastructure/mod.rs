//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - Host collaborator traits (theme, display, print)
//! - Key-value persistence
//! - Platform-specific detection
//! - Logging bootstrap
//! - Error types

pub mod error;
pub mod host;
pub mod logging;
pub mod platform;
pub mod storage;
