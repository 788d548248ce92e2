//! In-memory content store, populated once at startup

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::frontmatter::FrontMatter;
use super::markdown::MarkdownRenderer;
use super::post::{Author, Category, Post, Seo};
use super::ContentError;
use crate::config::SiteConfig;
use crate::helpers::url::full_url_for;

/// Embedded post documents. The file stem is the slug, so slugs are
/// unique as long as file names are.
const POST_SOURCES: &[(&str, &str)] = &[
    (
        "tax-planning-strategies-small-businesses-2026",
        include_str!("posts/tax-planning-strategies-small-businesses-2026.md"),
    ),
    (
        "understanding-cash-flow-management-complete-guide",
        include_str!("posts/understanding-cash-flow-management-complete-guide.md"),
    ),
    (
        "new-tax-laws-2026-what-you-need-to-know",
        include_str!("posts/new-tax-laws-2026-what-you-need-to-know.md"),
    ),
    (
        "bookkeeping-best-practices-growing-companies",
        include_str!("posts/bookkeeping-best-practices-growing-companies.md"),
    ),
    (
        "preparing-for-audit-step-by-step-guide",
        include_str!("posts/preparing-for-audit-step-by-step-guide.md"),
    ),
    (
        "financial-ratios-every-business-owner-should-know",
        include_str!("posts/financial-ratios-every-business-owner-should-know.md"),
    ),
];

const OFFICES_YML: &str = include_str!("data/offices.yml");
const SERVICES_YML: &str = include_str!("data/services.yml");
const ABOUT_YML: &str = include_str!("data/about.yml");

/// An office location shown on the locations page and fed to the map widget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Office {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub lat: f64,
    pub lng: f64,
    pub hours: String,
    pub services: Vec<String>,
    pub cpa_count: u32,
    pub clients: String,
    pub established: String,
    pub image: String,
}

/// A service offering on the services page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
    pub price: String,
}

/// A team member on the about page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub experience: String,
}

/// A company value on the about page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyValue {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
struct AboutData {
    team: Vec<TeamMember>,
    values: Vec<CompanyValue>,
}

/// A category with its post count, in site listing order
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// A tag with its usage count
#[derive(Debug, Clone, Serialize)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

/// The immutable content store. Built once at startup, never mutated.
#[derive(Debug, Clone)]
pub struct ContentStore {
    posts: Vec<Post>,
    by_slug: HashMap<String, usize>,
    offices: Vec<Office>,
    services: Vec<Service>,
    team: Vec<TeamMember>,
    values: Vec<CompanyValue>,
}

impl ContentStore {
    /// Build the store from the embedded content, enforcing the
    /// load-time invariants: unique slugs, known categories,
    /// parseable dates, required fields present.
    pub fn load(config: &SiteConfig) -> Result<Self, ContentError> {
        let renderer = MarkdownRenderer::new();

        let mut posts = Vec::with_capacity(POST_SOURCES.len());
        let mut by_slug = HashMap::new();

        for &(slug, source) in POST_SOURCES {
            let post = build_post(config, &renderer, slug, source)?;
            if by_slug.insert(post.slug.clone(), posts.len()).is_some() {
                return Err(ContentError::DuplicateSlug {
                    slug: post.slug.clone(),
                });
            }
            posts.push(post);
        }

        let offices: Vec<Office> =
            serde_yaml::from_str(OFFICES_YML).map_err(|e| ContentError::Data {
                name: "offices.yml".to_string(),
                message: e.to_string(),
            })?;

        let services: Vec<Service> =
            serde_yaml::from_str(SERVICES_YML).map_err(|e| ContentError::Data {
                name: "services.yml".to_string(),
                message: e.to_string(),
            })?;

        let about: AboutData = serde_yaml::from_str(ABOUT_YML).map_err(|e| ContentError::Data {
            name: "about.yml".to_string(),
            message: e.to_string(),
        })?;

        tracing::info!(
            posts = posts.len(),
            offices = offices.len(),
            services = services.len(),
            "content store loaded"
        );

        Ok(Self {
            posts,
            by_slug,
            offices,
            services,
            team: about.team,
            values: about.values,
        })
    }

    /// All posts in store order
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Look up a post by slug
    pub fn get(&self, slug: &str) -> Option<&Post> {
        self.by_slug.get(slug).map(|&i| &self.posts[i])
    }

    /// The first featured post, for the listing page's featured slot
    pub fn featured_post(&self) -> Option<&Post> {
        self.posts.iter().find(|p| p.featured)
    }

    /// Up to `limit` featured posts, in store order
    pub fn featured_posts(&self, limit: usize) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.featured).take(limit).collect()
    }

    /// Up to `limit` trending posts, in store order
    pub fn trending_posts(&self, limit: usize) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.trending).take(limit).collect()
    }

    /// The `n` most recent posts by publication date
    pub fn recent_posts(&self, n: usize) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.iter().collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        posts.truncate(n);
        posts
    }

    /// Up to `limit` other posts sharing the post's category, in store
    /// order. The subject post is never included.
    pub fn related_posts(&self, post: &Post, limit: usize) -> Vec<&Post> {
        related_posts(&self.posts, post, limit)
    }

    /// Post counts per category, in site listing order
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        Category::ALL
            .iter()
            .map(|&category| CategoryCount {
                category,
                count: self
                    .posts
                    .iter()
                    .filter(|p| p.category == category)
                    .count(),
            })
            .collect()
    }

    /// The `limit` most used tags. Counting preserves first-seen order
    /// so equal counts stay in store order.
    pub fn popular_tags(&self, limit: usize) -> Vec<TagCount> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for post in &self.posts {
            for tag in &post.tags {
                *counts.entry(tag.as_str()).or_insert(0) += 1;
            }
        }

        let mut tags: Vec<TagCount> = counts
            .into_iter()
            .map(|(name, count)| TagCount {
                name: name.to_string(),
                count,
            })
            .collect();
        tags.sort_by(|a, b| b.count.cmp(&a.count));
        tags.truncate(limit);
        tags
    }

    pub fn offices(&self) -> &[Office] {
        &self.offices
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn team(&self) -> &[TeamMember] {
        &self.team
    }

    pub fn values(&self) -> &[CompanyValue] {
        &self.values
    }
}

/// Select up to `limit` other posts sharing `post`'s category, in the
/// order they appear in `posts`.
pub fn related_posts<'a>(posts: &'a [Post], post: &Post, limit: usize) -> Vec<&'a Post> {
    posts
        .iter()
        .filter(|p| p.id != post.id && p.category == post.category)
        .take(limit)
        .collect()
}

fn build_post(
    config: &SiteConfig,
    renderer: &MarkdownRenderer,
    slug: &str,
    source: &str,
) -> Result<Post, ContentError> {
    let (fm, body) = FrontMatter::parse(slug, source)?;

    let missing = |field: &'static str| ContentError::MissingField {
        name: slug.to_string(),
        field,
    };

    let id = fm.id.ok_or_else(|| missing("id"))?;
    let title = fm.title.clone().ok_or_else(|| missing("title"))?;
    let excerpt = fm.excerpt.clone().ok_or_else(|| missing("excerpt"))?;

    let category_label = fm.category.clone().ok_or_else(|| missing("category"))?;
    let category =
        Category::parse(&category_label).ok_or_else(|| ContentError::UnknownCategory {
            name: slug.to_string(),
            category: category_label,
        })?;

    let date_value = fm.date.clone().ok_or_else(|| missing("date"))?;
    let date = fm.parse_date().ok_or_else(|| ContentError::InvalidDate {
        name: slug.to_string(),
        value: date_value,
    })?;
    let updated = match &fm.updated {
        Some(value) => Some(
            fm.parse_updated()
                .ok_or_else(|| ContentError::InvalidDate {
                    name: slug.to_string(),
                    value: value.clone(),
                })?,
        ),
        None => None,
    };

    let author_matter = fm.author.clone().ok_or_else(|| missing("author"))?;
    let author = Author {
        name: author_matter.name,
        role: author_matter.role,
        avatar: author_matter.avatar,
        bio: author_matter.bio,
    };

    let path = format!("/{}/{}", config.blog_dir, slug);
    let permalink = full_url_for(config, &path);

    // SEO defaults derive from the post itself when the block is absent
    let seo = match fm.seo.clone() {
        Some(seo) => Seo {
            title: seo.title,
            description: seo.description,
            keywords: seo.keywords,
            canonical: seo.canonical,
        },
        None => Seo {
            title: format!("{} | {}", title, config.title),
            description: excerpt.clone(),
            keywords: fm.tags.clone(),
            canonical: None,
        },
    };

    Ok(Post {
        id,
        title,
        slug: slug.to_string(),
        excerpt,
        content: renderer.render(body),
        category,
        author,
        date,
        updated,
        read_time: fm.read_time.clone().unwrap_or_default(),
        image: fm.image.clone().unwrap_or_default(),
        image_alt: fm.image_alt.clone().unwrap_or_default(),
        tags: fm.tags,
        featured: fm.featured,
        trending: fm.trending,
        seo,
        path,
        permalink,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn store() -> ContentStore {
        ContentStore::load(&SiteConfig::default()).unwrap()
    }

    fn sample_post(id: u32, category: Category) -> Post {
        Post {
            id,
            title: format!("Post {}", id),
            slug: format!("post-{}", id),
            excerpt: String::new(),
            content: String::new(),
            category,
            author: Author {
                name: "Author".to_string(),
                role: String::new(),
                avatar: String::new(),
                bio: String::new(),
            },
            date: Local.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            updated: None,
            read_time: String::new(),
            image: String::new(),
            image_alt: String::new(),
            tags: Vec::new(),
            featured: false,
            trending: false,
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

    #[test]
    fn test_load_embedded_content() {
        let store = store();
        assert_eq!(store.posts().len(), 6);
        assert_eq!(store.offices().len(), 5);
        assert_eq!(store.services().len(), 6);
        assert_eq!(store.team().len(), 4);
        assert_eq!(store.values().len(), 4);
    }

    #[test]
    fn test_slug_lookup() {
        let store = store();
        let post = store
            .get("tax-planning-strategies-small-businesses-2026")
            .unwrap();
        assert_eq!(post.id, 1);
        assert_eq!(post.category, Category::TaxPlanning);
        assert!(store.get("no-such-post").is_none());
    }

    #[test]
    fn test_flag_counts_match_content() {
        let store = store();
        let featured = store.posts().iter().filter(|p| p.featured).count();
        let trending = store.posts().iter().filter(|p| p.trending).count();
        assert_eq!(featured, 2);
        assert_eq!(trending, 4);
    }

    #[test]
    fn test_permalinks_use_site_url() {
        let store = store();
        for post in store.posts() {
            assert!(post.permalink.starts_with("https://primeaccounting.com/blog/"));
            assert!(post.path.starts_with("/blog/"));
        }
    }

    #[test]
    fn test_category_counts_cover_all_posts() {
        let store = store();
        let counts = store.category_counts();
        assert_eq!(counts.len(), Category::ALL.len());
        let total: usize = counts.iter().map(|c| c.count).sum();
        assert_eq!(total, store.posts().len());
    }

    #[test]
    fn test_popular_tags_sorted_by_count() {
        let store = store();
        let tags = store.popular_tags(15);
        assert!(!tags.is_empty());
        for pair in tags.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
    }

    #[test]
    fn test_recent_posts_sorted_desc() {
        let store = store();
        let recent = store.recent_posts(3);
        assert_eq!(recent.len(), 3);
        assert!(recent[0].date >= recent[1].date);
        assert!(recent[1].date >= recent[2].date);
    }

    #[test]
    fn test_default_query_returns_all_posts_newest_first() {
        let store = store();
        let query = crate::listing::Query {
            page: 1,
            ..Default::default()
        };
        let page = crate::listing::paginate(store.posts(), &query, 6);
        assert_eq!(page.total_posts, 6);
        assert_eq!(page.total_pages, 1);
        let ids: Vec<u32> = page.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_category_filter_against_embedded_content() {
        let store = store();
        let query = crate::listing::Query {
            category: Some(Category::TaxPlanning),
            page: 1,
            ..Default::default()
        };
        let page = crate::listing::paginate(store.posts(), &query, 6);
        assert_eq!(page.total_posts, 1);
        assert!(page
            .posts
            .iter()
            .all(|p| p.category == Category::TaxPlanning));
    }

    #[test]
    fn test_related_posts_excludes_subject_and_respects_limit() {
        let posts = vec![
            sample_post(1, Category::Audit),
            sample_post(2, Category::Audit),
            sample_post(3, Category::Audit),
            sample_post(4, Category::Bookkeeping),
            sample_post(5, Category::Audit),
        ];

        let related = related_posts(&posts, &posts[0], 2);
        let ids: Vec<u32> = related.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);

        // Fewer qualifying posts than the limit returns all of them
        let related = related_posts(&posts, &posts[3], 3);
        assert!(related.is_empty());

        let related = related_posts(&posts, &posts[1], 10);
        let ids: Vec<u32> = related.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }
}
