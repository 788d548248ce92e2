//! SEO surface: sitemap, robots, web manifest

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use chrono::Local;
use serde_json::json;
use std::sync::Arc;

use super::AppState;
use crate::helpers::date::lastmod_date;
use crate::helpers::url::full_url_for;

/// Static routes with their crawl hints
const STATIC_PAGES: &[(&str, &str, &str)] = &[
    ("/", "daily", "1.0"),
    ("/services", "weekly", "0.9"),
    ("/about", "monthly", "0.8"),
    ("/blog", "daily", "0.9"),
    ("/contact", "monthly", "0.8"),
    ("/locations", "weekly", "0.8"),
];

pub(super) async fn sitemap(State(state): State<Arc<AppState>>) -> Response {
    let today = lastmod_date(&Local::now());

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for &(path, changefreq, priority) in STATIC_PAGES {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    \
             <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>\n",
            full_url_for(&state.config, path),
            today,
            changefreq,
            priority
        ));
    }

    for post in state.store.posts() {
        let lastmod = post.updated.unwrap_or(post.date);
        xml.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    \
             <changefreq>weekly</changefreq>\n    <priority>0.8</priority>\n  </url>\n",
            post.permalink,
            lastmod_date(&lastmod)
        ));
    }

    xml.push_str("</urlset>\n");

    ([(header::CONTENT_TYPE, "application/xml")], xml).into_response()
}

pub(super) async fn robots(State(state): State<Arc<AppState>>) -> Response {
    let body = format!(
        "User-agent: *\nAllow: /\nDisallow: /api/\n\nSitemap: {}\n",
        full_url_for(&state.config, "/sitemap.xml")
    );
    ([(header::CONTENT_TYPE, "text/plain")], body).into_response()
}

pub(super) async fn manifest(State(state): State<Arc<AppState>>) -> Response {
    let config = &state.config;
    Json(json!({
        "name": config.title,
        "short_name": "PrimeAcct",
        "description": config.description,
        "start_url": "/",
        "display": "standalone",
        "background_color": config.background_color,
        "theme_color": config.theme_color,
        "icons": [
            { "src": "/static/favicon.ico", "sizes": "any", "type": "image/x-icon" },
            { "src": "/static/icon-192.png", "sizes": "192x192", "type": "image/png" },
            { "src": "/static/icon-512.png", "sizes": "512x512", "type": "image/png" }
        ]
    }))
    .into_response()
}
