//! HTTP server: routes, page handlers, and the contact API

mod seo;

use anyhow::Result;
use axum::extract::{Path, Query as UrlQuery, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tera::Context;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::contact::{ContactForm, FieldError, Mailer};
use crate::content::{Category, ContentStore, Office};
use crate::helpers::url::{full_url_for, query_escape};
use crate::listing::{self, Query, SortBy};
use crate::templates::TemplateRenderer;

/// Shared state for all handlers
pub struct AppState {
    pub config: SiteConfig,
    pub store: ContentStore,
    pub renderer: TemplateRenderer,
    pub mailer: Option<Mailer>,
}

/// Start the site server
pub async fn start(state: AppState, ip: &str, port: u16, open: bool) -> Result<()> {
    let static_dir = state.config.static_dir.clone();
    let state = Arc::new(state);

    let app = Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/services", get(services))
        .route("/blog", get(blog))
        .route("/blog/:slug", get(blog_post))
        .route("/contact", get(contact))
        .route("/api/contact", post(submit_contact))
        .route("/locations", get(locations))
        .route("/sitemap.xml", get(seo::sitemap))
        .route("/robots.txt", get(seo::robots))
        .route("/site.webmanifest", get(seo::manifest))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Base template context shared by every page
fn base_context(state: &AppState, current: &str, title: &str, description: &str) -> Context {
    let mut context = Context::new();
    context.insert("config", &state.config);
    context.insert("current", current);
    context.insert("page_title", title);
    context.insert("meta_description", description);
    context.insert("meta_keywords", &state.config.keywords);
    context.insert("canonical", &Option::<String>::None);
    context.insert("og_image", &Option::<String>::None);
    context
}

fn render(state: &AppState, template: &str, context: &Context) -> Response {
    render_with_status(state, template, context, StatusCode::OK)
}

fn render_with_status(
    state: &AppState,
    template: &str,
    context: &Context,
    status: StatusCode,
) -> Response {
    match state.renderer.render(template, context) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("failed to render {}: {:#}", template, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

async fn home(State(state): State<Arc<AppState>>) -> Response {
    let title = format!("{} | {}", state.config.title, state.config.tagline);
    let mut context = base_context(&state, "home", &title, &state.config.description);
    let highlight_count = state.store.services().len().min(3);
    context.insert("services", &state.store.services()[..highlight_count]);
    context.insert("recent_posts", &state.store.recent_posts(3));
    render(&state, "home.html", &context)
}

async fn about(State(state): State<Arc<AppState>>) -> Response {
    let title = format!("About Us | {}", state.config.title);
    let mut context = base_context(
        &state,
        "about",
        &title,
        "Our story, values, and the team behind Prime Accounting.",
    );
    context.insert("team", state.store.team());
    context.insert("values", state.store.values());
    render(&state, "about.html", &context)
}

async fn services(State(state): State<Arc<AppState>>) -> Response {
    let title = format!("Our Services | {}", state.config.title);
    let mut context = base_context(
        &state,
        "services",
        &title,
        "Comprehensive accounting and financial solutions tailored to your specific needs.",
    );
    context.insert("services", state.store.services());
    render(&state, "services.html", &context)
}

/// Raw listing query parameters, read straight from the URL
#[derive(Debug, Default, Deserialize)]
struct ListingParams {
    category: Option<String>,
    q: Option<String>,
    tag: Option<String>,
    sort: Option<String>,
    page: Option<usize>,
}

impl ListingParams {
    /// Build the pipeline query. The "All Posts" sentinel and unknown
    /// category labels both mean no category filter.
    fn into_query(self) -> Query {
        let category = self
            .category
            .as_deref()
            .filter(|label| *label != "All Posts")
            .and_then(|label| {
                let parsed = Category::parse(label);
                if parsed.is_none() {
                    tracing::debug!("ignoring unknown category filter: {}", label);
                }
                parsed
            });

        Query {
            category,
            search: self.q.unwrap_or_default(),
            tag: self.tag.unwrap_or_default(),
            sort: SortBy::parse(self.sort.as_deref().unwrap_or("latest")),
            page: self.page.unwrap_or(1),
        }
    }
}

/// A sidebar filter link. Selecting a filter drops the page parameter,
/// which resets pagination to page 1.
#[derive(Debug, Serialize)]
struct FilterLink {
    label: String,
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
    selected: bool,
}

/// Build a listing URL for the given filter state (no page parameter)
fn listing_url(category: Option<Category>, search: &str, tag: &str, sort: SortBy) -> String {
    let mut parts = Vec::new();
    if let Some(category) = category {
        parts.push(format!("category={}", query_escape(category.as_str())));
    }
    if !search.is_empty() {
        parts.push(format!("q={}", query_escape(search)));
    }
    if !tag.is_empty() {
        parts.push(format!("tag={}", query_escape(tag)));
    }
    if sort != SortBy::Latest {
        parts.push(format!("sort={}", sort.as_str()));
    }

    if parts.is_empty() {
        "/blog".to_string()
    } else {
        format!("/blog?{}", parts.join("&"))
    }
}

/// Echo of the active query for the templates
#[derive(Debug, Serialize)]
struct QueryEcho {
    category: Option<&'static str>,
    search: String,
    tag: String,
    sort: &'static str,
}

async fn blog(
    State(state): State<Arc<AppState>>,
    UrlQuery(params): UrlQuery<ListingParams>,
) -> Response {
    let query = params.into_query();
    let page = listing::paginate(state.store.posts(), &query, state.config.per_page);

    let category_links: Vec<FilterLink> = std::iter::once(FilterLink {
        label: "All Posts".to_string(),
        url: listing_url(None, &query.search, &query.tag, query.sort),
        count: Some(state.store.posts().len()),
        selected: query.category.is_none(),
    })
    .chain(state.store.category_counts().into_iter().map(|entry| {
        let selected = query.category == Some(entry.category);
        FilterLink {
            label: entry.category.to_string(),
            url: listing_url(Some(entry.category), &query.search, &query.tag, query.sort),
            count: Some(entry.count),
            selected,
        }
    }))
    .collect();

    let sort_links: Vec<FilterLink> = [
        (SortBy::Latest, "Latest"),
        (SortBy::Oldest, "Oldest"),
        (SortBy::Popular, "Most Popular"),
    ]
    .into_iter()
    .map(|(sort, label)| FilterLink {
        label: label.to_string(),
        url: listing_url(query.category, &query.search, &query.tag, sort),
        count: None,
        selected: query.sort == sort,
    })
    .collect();

    let tag_links: Vec<FilterLink> = state
        .store
        .popular_tags(15)
        .into_iter()
        .map(|entry| {
            let selected = query.tag == entry.name;
            // Clicking the selected tag clears it
            let tag = if selected { "" } else { entry.name.as_str() };
            FilterLink {
                url: listing_url(query.category, &query.search, tag, query.sort),
                label: entry.name,
                count: Some(entry.count),
                selected,
            }
        })
        .collect();

    let base = listing_url(query.category, &query.search, &query.tag, query.sort);
    let pager_base = if base.contains('?') {
        format!("{}&", base)
    } else {
        format!("{}?", base)
    };

    let filters_active = query.category.is_some()
        || !query.search.is_empty()
        || !query.tag.is_empty()
        || query.sort != SortBy::Latest;

    let title = format!("Blog | {}", state.config.title);
    let mut context = base_context(
        &state,
        "blog",
        &title,
        "Financial insights, tax tips, and expert advice from our team of certified professionals.",
    );
    context.insert("page", &page);
    context.insert(
        "query",
        &QueryEcho {
            category: query.category.map(|c| c.as_str()),
            search: query.search.clone(),
            tag: query.tag.clone(),
            sort: query.sort.as_str(),
        },
    );
    context.insert("category_links", &category_links);
    context.insert("sort_links", &sort_links);
    context.insert("tag_links", &tag_links);
    context.insert("pager_base", &pager_base);
    context.insert("filters_active", &filters_active);
    context.insert("featured", &state.store.featured_post());
    context.insert("trending_posts", &state.store.trending_posts(4));
    context.insert("editors_picks", &state.store.featured_posts(3));
    context.insert("recent_posts", &state.store.recent_posts(3));

    render(&state, "blog.html", &context)
}

async fn blog_post(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    let Some(post) = state.store.get(&slug) else {
        return render_not_found(&state);
    };

    let related = state.store.related_posts(post, 3);

    let mut context = base_context(&state, "blog", &post.seo.title, &post.seo.description);
    context.insert("meta_keywords", &post.seo.keywords);
    let canonical = post
        .seo
        .canonical
        .clone()
        .unwrap_or_else(|| post.permalink.clone());
    context.insert("canonical", &Some(canonical));
    if !post.image.is_empty() {
        context.insert("og_image", &Some(full_url_for(&state.config, &post.image)));
    }
    context.insert("post", post);
    context.insert("related", &related);

    render(&state, "post.html", &context)
}

async fn contact(State(state): State<Arc<AppState>>) -> Response {
    let title = format!("Contact Us | {}", state.config.title);
    let context = base_context(
        &state,
        "contact",
        &title,
        "Ready to take control of your finances? Contact us today for a free consultation.",
    );
    render(&state, "contact.html", &context)
}

/// JSON response for contact submissions
#[derive(Debug, Serialize)]
struct ContactResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
}

const SEND_FAILED: &str = "Failed to send message. Please try again or contact us directly.";

async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ContactForm>,
) -> (StatusCode, Json<ContactResponse>) {
    if let Err(errors) = form.validate() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ContactResponse {
                success: false,
                message: "Please correct the highlighted fields.".to_string(),
                errors: Some(errors),
            }),
        );
    }

    let Some(mailer) = &state.mailer else {
        tracing::warn!("contact submission received but mail transport is not configured");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ContactResponse {
                success: false,
                message: SEND_FAILED.to_string(),
                errors: None,
            }),
        );
    };

    match mailer.send_contact(&form).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ContactResponse {
                success: true,
                message: "Your message has been sent successfully! We'll get back to you within 24 hours."
                    .to_string(),
                errors: None,
            }),
        ),
        Err(e) => {
            tracing::error!("contact mail delivery failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ContactResponse {
                    success: false,
                    message: SEND_FAILED.to_string(),
                    errors: None,
                }),
            )
        }
    }
}

/// Office fields handed to the map widget
#[derive(Debug, Serialize)]
struct MapOffice<'a> {
    id: u32,
    name: &'a str,
    address: &'a str,
    phone: &'a str,
    email: &'a str,
    lat: f64,
    lng: f64,
}

impl<'a> From<&'a Office> for MapOffice<'a> {
    fn from(office: &'a Office) -> Self {
        Self {
            id: office.id,
            name: &office.name,
            address: &office.address,
            phone: &office.phone,
            email: &office.email,
            lat: office.lat,
            lng: office.lng,
        }
    }
}

async fn locations(State(state): State<Arc<AppState>>) -> Response {
    let offices = state.store.offices();
    let Some(selected) = offices.first() else {
        return render_not_found(&state);
    };

    let map_offices: Vec<MapOffice> = offices.iter().map(MapOffice::from).collect();
    let offices_json = match serde_json::to_string(&map_offices) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("failed to serialize office map data: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response();
        }
    };

    let title = format!("Our Locations | {}", state.config.title);
    let mut context = base_context(
        &state,
        "locations",
        &title,
        "Visit us at any of our five strategic locations across the United States.",
    );
    context.insert("offices", offices);
    context.insert("selected", selected);
    context.insert("offices_json", &offices_json);

    render(&state, "locations.html", &context)
}

async fn not_found(State(state): State<Arc<AppState>>) -> Response {
    render_not_found(&state)
}

fn render_not_found(state: &AppState) -> Response {
    let title = format!("Page Not Found | {}", state.config.title);
    let context = base_context(
        state,
        "",
        &title,
        "The page you're looking for doesn't exist.",
    );
    render_with_status(state, "not_found.html", &context, StatusCode::NOT_FOUND)
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
