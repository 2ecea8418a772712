//! CLI entry point for hashfolio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hashfolio::commands;
use hashfolio::commands::view::ViewOptions;

#[derive(Parser)]
#[command(name = "hashfolio")]
#[command(author)]
#[command(version)]
#[command(about = "Render a post collection with search, tags and hash routing", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
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
    /// Render the page for a fragment and print it
    #[command(alias = "v")]
    View {
        /// URL fragment to open, e.g. '#/post/hello' or '#tag=rust'
        #[arg(default_value = "")]
        fragment: String,

        /// Search query
        #[arg(short, long)]
        query: Option<String>,

        /// Tag to filter by
        #[arg(short, long)]
        tag: Option<String>,

        /// Write the page to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Browse interactively, reading commands from stdin
    #[command(alias = "b")]
    Browse {
        /// URL fragment to start at
        #[arg(default_value = "")]
        fragment: String,
    },

    /// List site information
    List {
        /// Type of content to list (post, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "hashfolio=debug,info"
    } else {
        "hashfolio=info"
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

    match cli.command {
        Commands::View {
            fragment,
            query,
            tag,
            output,
        } => {
            let site = hashfolio::Hashfolio::new(&base_dir)?;
            let options = ViewOptions {
                fragment,
                query,
                tag,
            };
            commands::view::run(&site, &options, output.as_deref()).await?;
        }

        Commands::Browse { fragment } => {
            let site = hashfolio::Hashfolio::new(&base_dir)?;
            tracing::info!("Browsing {:?}", site.base_dir);
            commands::browse::run(&site, &fragment).await?;
        }

        Commands::List { r#type } => {
            let site = hashfolio::Hashfolio::new(&base_dir)?;
            commands::list::run(&site, &r#type).await?;
        }

        Commands::Version => {
            println!("hashfolio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
