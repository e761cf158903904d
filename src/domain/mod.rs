pub mod models;
pub mod schema;
pub mod services;
pub mod errors;
pub mod table;
pub mod cards;
pub mod comparison;
pub mod preferences;

pub use models::*;
pub use schema::*;
pub use services::*;
pub use errors::*;
pub use table::*;
pub use cards::*;
pub use comparison::*;
pub use preferences::*;
