//! CLI entry point for velog-blog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use velog_blog::commands::list::ListOptions;
use velog_blog::config::{SyncConfig, ACCOUNT_ENV};
use velog_blog::velog::VelogClient;
use velog_blog::Blog;

#[derive(Parser)]
#[command(name = "velog-blog")]
#[command(version)]
#[command(about = "Personal MDX blog with Velog mirroring", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mirror every Velog post of the configured account into the content directory
    Sync,

    /// List posts, newest first
    #[command(alias = "ls")]
    List {
        /// Only show posts in this category
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Show at most this many posts
        #[arg(short, long)]
        limit: Option<usize>,

        /// Merge the account's current Velog listing
        #[arg(long)]
        live: bool,
    },

    /// List categories with post counts
    Categories {
        /// Merge the account's current Velog listing
        #[arg(long)]
        live: bool,
    },

    /// Serve the post list as JSON
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "velog_blog=debug,info"
    } else {
        "velog_blog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    load_env_files(&base_dir);

    let blog = Blog::new(&base_dir)?;
    let account = blog.config.account_handle(std::env::var(ACCOUNT_ENV).ok());

    match cli.command {
        Commands::Sync => {
            let config = SyncConfig::resolve(&blog.config, std::env::var(ACCOUNT_ENV).ok())?;
            let client = VelogClient::from_config(&blog.config)?;
            velog_blog::commands::sync::run(&blog, &config, &client).await?;
        }

        Commands::List {
            category,
            limit,
            live,
        } => {
            let options = ListOptions {
                category,
                limit,
                live,
                account,
            };
            velog_blog::commands::list::run(&blog, &options).await?;
        }

        Commands::Categories { live } => {
            let options = ListOptions {
                live,
                account,
                ..Default::default()
            };
            velog_blog::commands::list::categories(&blog, &options).await?;
        }

        Commands::Serve { port, ip } => {
            tracing::info!("Starting server at http://{}:{}", ip, port);
            velog_blog::server::start(&blog, account, &ip, port).await?;
        }

        Commands::Version => {
            println!("velog-blog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Load `.env.local` then `.env` from the base directory.
/// Variables already set in the environment win.
fn load_env_files(base_dir: &Path) {
    for name in [".env.local", ".env"] {
        let path = base_dir.join(name);
        if path.is_file() {
            if let Err(e) = dotenvy::from_path(&path) {
                tracing::warn!("Failed to load {:?}: {}", path, e);
            }
        }
    }
}
