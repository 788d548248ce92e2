//! Configuration module

mod site;

pub use site::{ContactInfo, SiteConfig};
