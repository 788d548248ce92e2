//! The blog listing pipeline: filter, sort, and paginate the post store
//!
//! The pipeline is a pure function of (posts, query). It never fails and
//! performs no I/O; every request rebuilds its result from the immutable
//! store.

use serde::Serialize;

use crate::content::{Category, Post};

/// Sort mode for the listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Latest,
    Oldest,
    Popular,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Latest => "latest",
            SortBy::Oldest => "oldest",
            SortBy::Popular => "popular",
        }
    }

    /// Parse a query-string value; anything unrecognized falls back to
    /// the default sort
    pub fn parse(value: &str) -> SortBy {
        match value {
            "oldest" => SortBy::Oldest,
            "popular" => SortBy::Popular,
            _ => SortBy::Latest,
        }
    }
}

impl Serialize for SortBy {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Transient filter/sort/page state, rebuilt from the URL on every
/// request and never persisted
#[derive(Debug, Clone, Default)]
pub struct Query {
    /// Selected category; `None` means all posts
    pub category: Option<Category>,
    /// Free-text search, matched case-insensitively
    pub search: String,
    /// Selected tag; empty means no tag filter. Exact, case-sensitive.
    pub tag: String,
    /// Sort mode
    pub sort: SortBy,
    /// 1-based page number
    pub page: usize,
}

impl Query {
    fn matches(&self, post: &Post, needle: &str) -> bool {
        let category_ok = match self.category {
            Some(category) => post.category == category,
            None => true,
        };
        let tag_ok = self.tag.is_empty() || post.tags.iter().any(|t| t == &self.tag);
        category_ok && tag_ok && post.matches_search(needle)
    }
}

/// One page of listing results plus pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct BlogPage<'a> {
    /// The visible slice of posts
    pub posts: Vec<&'a Post>,
    /// Current 1-based page, clamped to the valid range
    pub page: usize,
    /// Total pages after filtering (0 when nothing matched)
    pub total_pages: usize,
    /// Total posts after filtering
    pub total_posts: usize,
    /// 1-based index of the first visible post (0 when empty)
    pub first_index: usize,
    /// 1-based index of the last visible post (0 when empty)
    pub last_index: usize,
    pub per_page: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl BlogPage<'_> {
    /// True when the filters matched nothing; rendered as an explicit
    /// "no results" view rather than an empty page
    pub fn is_empty(&self) -> bool {
        self.total_posts == 0
    }
}

/// Run the full pipeline. Filter order follows the listing page:
/// category, then search, then tag, all of which must hold; then a
/// stable sort; then a page slice clamped to bounds.
pub fn paginate<'a>(posts: &'a [Post], query: &Query, per_page: usize) -> BlogPage<'a> {
    let per_page = per_page.max(1);
    let needle = query.search.trim().to_lowercase();

    let mut filtered: Vec<&Post> = posts
        .iter()
        .filter(|post| query.matches(post, &needle))
        .collect();

    match query.sort {
        SortBy::Latest => filtered.sort_by(|a, b| b.date.cmp(&a.date)),
        SortBy::Oldest => filtered.sort_by(|a, b| a.date.cmp(&b.date)),
        // Trending posts first; recency breaks ties within each bucket
        SortBy::Popular => filtered.sort_by(|a, b| {
            b.trending
                .cmp(&a.trending)
                .then_with(|| b.date.cmp(&a.date))
        }),
    }

    let total_posts = filtered.len();
    let total_pages = total_posts.div_ceil(per_page);

    // Out-of-range pages clamp to the last valid page instead of
    // rendering past the end
    let page = query.page.clamp(1, total_pages.max(1));

    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_posts);
    let visible: Vec<&Post> = if start < total_posts {
        filtered[start..end].to_vec()
    } else {
        Vec::new()
    };

    let (first_index, last_index) = if visible.is_empty() {
        (0, 0)
    } else {
        (start + 1, end)
    };

    BlogPage {
        posts: visible,
        page,
        total_pages,
        total_posts,
        first_index,
        last_index,
        per_page,
        has_prev: page > 1,
        has_next: page < total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Author, Seo};
    use chrono::{Local, TimeZone};

    fn post(id: u32, category: Category, day: u32, trending: bool, tags: &[&str]) -> Post {
        Post {
            id,
            title: format!("Post {} title", id),
            slug: format!("post-{}", id),
            excerpt: format!("Excerpt for post {}", id),
            content: String::new(),
            category,
            author: Author {
                name: format!("Author {}", id),
                role: String::new(),
                avatar: String::new(),
                bio: String::new(),
            },
            date: Local.with_ymd_and_hms(2026, 1, day, 0, 0, 0).unwrap(),
            updated: None,
            read_time: String::new(),
            image: String::new(),
            image_alt: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            featured: false,
            trending,
            seo: Seo {
                title: String::new(),
                description: String::new(),
                keywords: Vec::new(),
                canonical: None,
            },
            path: String::new(),
            permalink: String::new(),
        }
    }

    fn sample_posts() -> Vec<Post> {
        vec![
            post(1, Category::TaxPlanning, 12, true, &["Tax Tips", "IRS"]),
            post(2, Category::FinancialManagement, 10, true, &["Cash Flow"]),
            post(3, Category::TaxUpdates, 8, true, &["Tax Law", "IRS"]),
            post(4, Category::Bookkeeping, 5, false, &["Software"]),
            post(5, Category::Audit, 3, false, &["Compliance"]),
            post(6, Category::FinancialAnalysis, 1, true, &["KPIs"]),
        ]
    }

    fn query() -> Query {
        Query {
            page: 1,
            ..Query::default()
        }
    }

    #[test]
    fn test_all_posts_latest_single_page() {
        let posts = sample_posts();
        let page = paginate(&posts, &query(), 6);

        assert_eq!(page.total_posts, 6);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.posts.len(), 6);
        // Ordered by descending date
        let ids: Vec<u32> = page.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert!(!page.has_prev);
        assert!(!page.has_next);
    }

    #[test]
    fn test_category_filter_only_returns_that_category() {
        let posts = sample_posts();
        for category in Category::ALL {
            let q = Query {
                category: Some(category),
                ..query()
            };
            let page = paginate(&posts, &q, 6);
            assert!(page.posts.iter().all(|p| p.category == category));
        }
    }

    #[test]
    fn test_search_matches_title_excerpt_author_or_tag() {
        let posts = sample_posts();

        // Tag hit, case-insensitive
        let q = Query {
            search: "irs".to_string(),
            ..query()
        };
        let page = paginate(&posts, &q, 6);
        let ids: Vec<u32> = page.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);

        // Author hit
        let q = Query {
            search: "Author 5".to_string(),
            ..query()
        };
        let page = paginate(&posts, &q, 6);
        assert_eq!(page.posts.len(), 1);
        assert_eq!(page.posts[0].id, 5);

        // Every returned post actually contains the needle somewhere
        let q = Query {
            search: "post".to_string(),
            ..query()
        };
        let page = paginate(&posts, &q, 6);
        for p in &page.posts {
            let needle = "post";
            assert!(
                p.title.to_lowercase().contains(needle)
                    || p.excerpt.to_lowercase().contains(needle)
                    || p.author.name.to_lowercase().contains(needle)
                    || p.tags.iter().any(|t| t.to_lowercase().contains(needle))
            );
        }
    }

    #[test]
    fn test_tag_filter_is_exact_and_case_sensitive() {
        let posts = sample_posts();

        let q = Query {
            tag: "IRS".to_string(),
            ..query()
        };
        let page = paginate(&posts, &q, 6);
        assert_eq!(page.total_posts, 2);

        let q = Query {
            tag: "irs".to_string(),
            ..query()
        };
        let page = paginate(&posts, &q, 6);
        assert!(page.is_empty());
    }

    #[test]
    fn test_oldest_sort() {
        let posts = sample_posts();
        let q = Query {
            sort: SortBy::Oldest,
            ..query()
        };
        let page = paginate(&posts, &q, 6);
        let ids: Vec<u32> = page.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_popular_sort_puts_trending_first() {
        let posts = sample_posts();
        let q = Query {
            sort: SortBy::Popular,
            ..query()
        };
        let page = paginate(&posts, &q, 6);
        let flags: Vec<bool> = page.posts.iter().map(|p| p.trending).collect();
        assert_eq!(flags, vec![true, true, true, true, false, false]);
        // Recency tie-break inside each bucket
        let ids: Vec<u32> = page.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 6, 4, 5]);
    }

    #[test]
    fn test_pagination_slices_and_last_page_size() {
        let posts = sample_posts();
        let q = Query {
            page: 1,
            ..query()
        };
        let page = paginate(&posts, &q, 4);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.posts.len(), 4);
        assert_eq!(page.first_index, 1);
        assert_eq!(page.last_index, 4);
        assert!(page.has_next);

        let q = Query {
            page: 2,
            ..query()
        };
        let page = paginate(&posts, &q, 4);
        // Last page holds the remainder
        assert_eq!(page.posts.len(), 2);
        assert_eq!(page.first_index, 5);
        assert_eq!(page.last_index, 6);
        assert!(page.has_prev);
        assert!(!page.has_next);
    }

    #[test]
    fn test_out_of_range_page_clamps() {
        let posts = sample_posts();
        let q = Query {
            page: 99,
            ..query()
        };
        let page = paginate(&posts, &q, 4);
        assert_eq!(page.page, 2);
        assert_eq!(page.posts.len(), 2);

        let q = Query {
            page: 0,
            ..query()
        };
        let page = paginate(&posts, &q, 4);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_empty_result_is_explicit() {
        let posts = sample_posts();
        let q = Query {
            search: "no such thing anywhere".to_string(),
            ..query()
        };
        let page = paginate(&posts, &q, 6);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.first_index, 0);
        assert_eq!(page.last_index, 0);
        assert!(!page.has_prev);
        assert!(!page.has_next);
    }

    #[test]
    fn test_sort_parse_defaults_to_latest() {
        assert_eq!(SortBy::parse("oldest"), SortBy::Oldest);
        assert_eq!(SortBy::parse("popular"), SortBy::Popular);
        assert_eq!(SortBy::parse("latest"), SortBy::Latest);
        assert_eq!(SortBy::parse("bogus"), SortBy::Latest);
    }
}
