//! Portage List - comparator of French umbrella companies
//!
//! Loads a CSV of "portage salarial" companies and presents it in a
//! terminal as a sortable, filterable and paginated table, a card grid or
//! a side-by-side comparison.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
