//! Verify the embedded content and the runtime environment

use anyhow::Result;

use crate::contact::MailConfig;
use crate::templates::TemplateRenderer;
use crate::Site;

/// Report what the site would serve. Content invariants (unique slugs,
/// known categories, parseable dates) were already enforced while
/// loading the store; getting here means they hold.
pub fn run(site: &Site) -> Result<()> {
    println!("Content:");
    println!("  {} posts", site.store.posts().len());
    println!("  {} offices", site.store.offices().len());
    println!("  {} services", site.store.services().len());
    println!(
        "  {} team members, {} values",
        site.store.team().len(),
        site.store.values().len()
    );

    TemplateRenderer::new()?;
    println!("Templates: ok");

    match MailConfig::from_env()? {
        Some(config) => println!(
            "Mail: configured ({}:{}, delivering to {})",
            config.host, config.port, config.recipient
        ),
        None => println!("Mail: not configured (contact submissions will fail)"),
    }

    println!("OK");
    Ok(())
}
