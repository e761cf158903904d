//! Presentation layer handling terminal UI and user input.
//!
//! This module manages the terminal user interface using ratatui: the page
//! frame, one presenter per view mode, and keyboard input.

pub mod theme;
pub mod ui;
pub mod table_view;
pub mod card_view;
pub mod comparison_view;
pub mod input;

pub use theme::*;
pub use ui::*;
pub use table_view::*;
pub use card_view::*;
pub use comparison_view::*;
pub use input::*;
