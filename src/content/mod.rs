//! Content module - the post collection and how it is loaded

pub mod loader;
mod post;

pub use loader::{LoadError, PostSource};
pub use post::{Post, TagSet};
