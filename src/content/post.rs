//! Post model and the closed category set

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};

/// Article categories. The set is closed: content declaring anything
/// else is rejected at load time. Tags stay free-form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    TaxPlanning,
    TaxUpdates,
    FinancialManagement,
    Bookkeeping,
    Audit,
    FinancialAnalysis,
}

impl Category {
    /// All categories, in the order the site lists them
    pub const ALL: [Category; 6] = [
        Category::TaxPlanning,
        Category::TaxUpdates,
        Category::FinancialManagement,
        Category::Bookkeeping,
        Category::Audit,
        Category::FinancialAnalysis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::TaxPlanning => "Tax Planning",
            Category::TaxUpdates => "Tax Updates",
            Category::FinancialManagement => "Financial Management",
            Category::Bookkeeping => "Bookkeeping",
            Category::Audit => "Audit",
            Category::FinancialAnalysis => "Financial Analysis",
        }
    }

    /// Parse a display label back into a category
    pub fn parse(label: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.as_str() == label)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A blog post, fully rendered and ready to serve
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Stable numeric identifier
    pub id: u32,

    /// Post title
    pub title: String,

    /// URL slug, unique across the store; the sole external lookup key
    pub slug: String,

    /// Short summary shown on listing cards
    pub excerpt: String,

    /// Rendered HTML body
    pub content: String,

    /// Category (closed set)
    pub category: Category,

    /// Author details
    pub author: Author,

    /// Publication date
    pub date: DateTime<Local>,

    /// Last updated date
    pub updated: Option<DateTime<Local>>,

    /// Estimated reading time ("5 min read")
    pub read_time: String,

    /// Hero image reference
    pub image: String,

    /// Hero image alt text
    pub image_alt: String,

    /// Free-form tags, case-sensitive, not deduplicated
    pub tags: Vec<String>,

    /// Shown in the featured slot on the listing page
    pub featured: bool,

    /// Surfaces in the trending rail and the "popular" sort
    pub trending: bool,

    /// Search-engine metadata
    pub seo: Seo,

    /// Site-relative URL path (/blog/<slug>)
    pub path: String,

    /// Full permalink URL
    pub permalink: String,
}

impl Post {
    /// True when the post matches a case-insensitive search needle in
    /// title, excerpt, author name, or any tag. The needle must already
    /// be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(needle)
            || self.excerpt.to_lowercase().contains(needle)
            || self.author.name.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }
}

/// Post author details (embedded in the post, not a separate entity)
#[derive(Debug, Clone, Serialize)]
pub struct Author {
    pub name: String,
    pub role: String,
    pub avatar: String,
    pub bio: String,
}

/// Search-engine metadata for a post
#[derive(Debug, Clone, Serialize)]
pub struct Seo {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical: Option<String>,
}
