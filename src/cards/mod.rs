//! Card system: trivia card definitions and the catalog they come from.
//!
//! ## Key Types
//!
//! - `CardId`: Unique card identifier
//! - `Card`: Static card data (title, category, points, hints)
//! - `CardCatalog`: Ordered, immutable card pool with id lookup

pub mod catalog;
pub mod definition;

pub use catalog::CardCatalog;
pub use definition::{total_points, Card, CardId, MAX_POINTS, MIN_POINTS};
