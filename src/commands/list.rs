//! List site content

use anyhow::Result;

use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let posts = site.store.posts();
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}]",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.category
                );
            }
        }
        "category" | "categories" => {
            let counts = site.store.category_counts();
            println!("Categories ({}):", counts.len());
            for entry in counts {
                println!("  {} ({})", entry.category, entry.count);
            }
        }
        "tag" | "tags" => {
            let tags = site.store.popular_tags(usize::MAX);
            println!("Tags ({}):", tags.len());
            for tag in tags {
                println!("  {} ({})", tag.name, tag.count);
            }
        }
        "office" | "offices" => {
            let offices = site.store.offices();
            println!("Offices ({}):", offices.len());
            for office in offices {
                println!("  {} - {} [{}]", office.name, office.address, office.phone);
            }
        }
        "route" | "routes" => {
            println!("Routes:");
            for route in [
                "/", "/about", "/services", "/blog", "/contact", "/locations",
                "/sitemap.xml", "/robots.txt", "/site.webmanifest",
            ] {
                println!("  GET  {}", route);
            }
            for post in site.store.posts() {
                println!("  GET  {}", post.path);
            }
            println!("  POST /api/contact");
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category, tag, office, route",
                content_type
            );
        }
    }

    Ok(())
}
