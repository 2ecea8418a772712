//! Helper functions for rendering
//!
//! HTML escaping and tag builders, post date parsing and display, and the
//! percent-encoding used inside URL fragments.

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
