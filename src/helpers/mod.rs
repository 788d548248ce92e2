//! Helper functions shared across the site

pub mod date;
pub mod url;

pub use date::{display_date, full_date, lastmod_date, parse_date_string};
pub use url::{full_url_for, query_escape, url_for};
