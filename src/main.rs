//! CLI entry point for prime-site

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "prime-site")]
#[command(version)]
#[command(about = "Marketing and blog site server for Prime Accounting", long_about = None)]
struct Cli {
    /// Path to site.yml (defaults to ./site.yml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the site server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// List site content
    List {
        /// Type of content to list (post, category, tag, office, route)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Verify content, templates, and mail configuration
    Check,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads SMTP settings
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "prime_site=debug,info"
    } else {
        "prime_site=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve { port, ip, open } => {
            let site = prime_site::Site::new(cli.config.as_deref())?;

            let mailer = match prime_site::contact::MailConfig::from_env()? {
                Some(mail_config) => Some(prime_site::contact::Mailer::new(
                    &mail_config,
                    &site.config.title,
                )?),
                None => {
                    tracing::warn!("SMTP is not configured; contact submissions will fail");
                    None
                }
            };

            let renderer = prime_site::templates::TemplateRenderer::new()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            let state = prime_site::server::AppState {
                config: site.config,
                store: site.store,
                renderer,
                mailer,
            };
            prime_site::server::start(state, &ip, port, open).await?;
        }

        Commands::List { r#type } => {
            let site = prime_site::Site::new(cli.config.as_deref())?;
            prime_site::commands::list::run(&site, &r#type)?;
        }

        Commands::Check => {
            let site = prime_site::Site::new(cli.config.as_deref())?;
            prime_site::commands::check::run(&site)?;
        }

        Commands::Version => {
            println!("prime-site version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
