//! pgm-lm (Programme List Manager)
//!
//! Loads the programme catalog from local storage (or the feed on first
//! run) and serves the list callbacks over HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use pgm_common::config::{self, TomlConfig};
use pgm_common::feed::FeedSource;
use pgm_common::normalize::{NormalizeMode, Normalizer};
use pgm_common::persistence::{MemoryGateway, PersistenceGateway, SqliteGateway};
use pgm_common::Catalog;
use pgm_lm::{build_router, AppState};

/// Command-line arguments for pgm-lm
#[derive(Parser, Debug)]
#[command(name = "pgm-lm")]
#[command(about = "Programme list manager")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "PGM_LM_PORT")]
    port: Option<u16>,

    /// Root folder holding the database and default feed
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Feed location: file path or http(s) URL
    #[arg(short, long, env = "PGM_FEED")]
    feed: Option<String>,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep data in memory only
    #[arg(long)]
    ephemeral: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let toml_config = TomlConfig::load(args.config.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&toml_config.logging.level)),
        )
        .init();

    info!("Starting Programme List Manager (pgm-lm) v{}", env!("CARGO_PKG_VERSION"));

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref(), &toml_config);
    info!("Root folder: {}", root_folder.display());

    let gateway: Arc<dyn PersistenceGateway> = if args.ephemeral {
        info!("Ephemeral mode: changes are kept in memory only");
        Arc::new(MemoryGateway::new())
    } else {
        let db_path = config::database_path(&root_folder);
        match SqliteGateway::open(&db_path).await {
            Ok(gateway) => {
                info!("✓ Connected to database {}", db_path.display());
                Arc::new(gateway)
            }
            Err(e) => {
                error!("Failed to open database: {}", e);
                return Err(e).context("Failed to open programme database");
            }
        }
    };

    let feed = FeedSource::parse(&config::feed_location(
        args.feed.as_deref(),
        &toml_config,
        &root_folder,
    ));
    info!("Feed: {}", feed);

    let normalizer = Normalizer::new(NormalizeMode::Strict, toml_config.image_base_url.clone());
    let mut catalog = Catalog::new(gateway, feed, normalizer);
    let view = catalog.load().await.context("Failed to load programme catalog")?;
    info!("✓ Catalog ready with {} programmes", view.total);

    let app = build_router(AppState::new(catalog));

    let port = args.port.unwrap_or(toml_config.port);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("pgm-lm listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
