//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that coordinate between
//! domain models, services, and the host:
//! - Print/export transaction
//! - Print confirmation gate
//! - Split-view panel visibility and live preview

pub mod confirmation;
pub mod preview;
pub mod print_session;
