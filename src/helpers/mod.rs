//! Helper functions for the presentation layer
//!
//! Date labels and category listings used by the CLI and the JSON API.

mod date;
mod list;

pub use date::*;
pub use list::*;
