//! Application layer managing state and user workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! it resolves configuration, owns the loaded dataset and the UI state, and
//! exposes the operations key presses map to.

pub mod config;
pub mod state;

pub use config::*;
pub use state::*;
