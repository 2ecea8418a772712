//! Configuration module

mod site;

pub use site::Messages;
pub use site::SiteConfig;
