//! Infrastructure layer providing external service integrations.
//!
//! This module contains the data loader, the system clipboard, the
//! preferences file and the log subscriber.

pub mod loader;
pub mod clipboard;
pub mod persistence;
pub mod logging;

pub use loader::*;
pub use clipboard::*;
pub use persistence::*;
pub use logging::*;
