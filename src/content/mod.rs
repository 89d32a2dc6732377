//! Content module - handles post documents and the aggregated post list

pub mod aggregate;
mod frontmatter;
pub mod loader;
mod post;

pub use frontmatter::{FrontMatter, FrontMatterError};
pub use post::{parse_date_string, Post};
