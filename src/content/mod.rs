//! Content models and the in-memory store

pub mod frontmatter;
pub mod markdown;
pub mod post;
pub mod store;

pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use post::{Author, Category, Post, Seo};
pub use store::{CompanyValue, ContentStore, Office, Service, TeamMember};

use thiserror::Error;

/// Errors raised while building the content store
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("front-matter in {name}: {message}")]
    FrontMatter { name: String, message: String },

    #[error("{name}: missing required field `{field}`")]
    MissingField { name: String, field: &'static str },

    #[error("{name}: unknown category `{category}`")]
    UnknownCategory { name: String, category: String },

    #[error("{name}: unparseable date `{value}`")]
    InvalidDate { name: String, value: String },

    #[error("duplicate slug `{slug}`")]
    DuplicateSlug { slug: String },

    #[error("{name}: {message}")]
    Data { name: String, message: String },
}
