//! Embedded site templates rendered with Tera
//!
//! All templates ship inside the binary; there is no theme directory to
//! deploy alongside it.

use anyhow::Result;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers::date::parse_date_string;
use crate::helpers::url::query_escape;

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Autoescaping stays on: templates echo request state (search
        // text, tag names); trusted HTML is marked `safe` at the call
        // site.
        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("about.html", include_str!("site/about.html")),
            ("services.html", include_str!("site/services.html")),
            ("blog.html", include_str!("site/blog.html")),
            ("post.html", include_str!("site/post.html")),
            ("contact.html", include_str!("site/contact.html")),
            ("locations.html", include_str!("site/locations.html")),
            ("not_found.html", include_str!("site/not_found.html")),
            // Partials
            ("partials/head.html", include_str!("site/partials/head.html")),
            ("partials/nav.html", include_str!("site/partials/nav.html")),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
            (
                "partials/pager.html",
                include_str!("site/partials/pager.html"),
            ),
            (
                "partials/post_card.html",
                include_str!("site/partials/post_card.html"),
            ),
            (
                "partials/sidebar.html",
                include_str!("site/partials/sidebar.html"),
            ),
        ])?;

        // Register custom filters
        tera.register_filter("display_date", display_date_filter);
        tera.register_filter("query_escape", query_escape_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: format a serialized date as the site displays it
/// ("Feb 12, 2026"). Accepts RFC 3339 or plain YYYY-MM-DD strings.
fn display_date_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("display_date", "value", String, value);
    match parse_date_string(&s) {
        Some(date) => Ok(tera::Value::String(
            crate::helpers::date::display_date(&date),
        )),
        None => Ok(tera::Value::String(s)),
    }
}

/// Tera filter: percent-encode a value for a query string
fn query_escape_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("query_escape", "value", String, value);
    Ok(tera::Value::String(query_escape(&s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_templates_load() {
        TemplateRenderer::new().unwrap();
    }

    #[test]
    fn test_render_not_found() {
        let config = SiteConfig::default();
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert("config", &config);
        context.insert("current", "");
        context.insert("page_title", "Page Not Found | Prime Accounting");
        context.insert("meta_description", "Page not found");
        context.insert("meta_keywords", &config.keywords);
        context.insert("canonical", &Option::<String>::None);
        context.insert("og_image", &Option::<String>::None);
        let html = renderer.render("not_found.html", &context).unwrap();
        assert!(html.contains("Page Not Found"));
        assert!(html.contains("Prime Accounting"));
    }

    #[test]
    fn test_display_date_filter() {
        let value = tera::Value::String("2026-02-12".to_string());
        let out = display_date_filter(&value, &HashMap::new()).unwrap();
        assert_eq!(out, tera::Value::String("Feb 12, 2026".to_string()));
    }

    #[test]
    fn test_query_escape_filter() {
        let value = tera::Value::String("Tax Tips".to_string());
        let out = query_escape_filter(&value, &HashMap::new()).unwrap();
        assert_eq!(out, tera::Value::String("Tax%20Tips".to_string()));
    }
}
