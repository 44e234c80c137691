use feed_axum::{PRODUCT_FEED_PATH, config::AxumConfig, start_server};
use feed_core::ports::CatalogRepository;
use feed_local::{FileDb, MemoryDb};
use feed_sqlite::Db;
use feedserver::{AppConfig, Cli, FeedApp, StorageConfig};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // By convention, we leverage `tracing` to instrument and log various
    // operations throughout this project.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::import()?;

    let AppConfig {
        merchant_id,
        server,
        storage,
    } = AppConfig::load(&cli)?;

    // Each backend gets its own monomorphized server
    match storage {
        StorageConfig::Memory => {
            tracing::info!("Storing products in memory");
            serve(server, MemoryDb::new(), &merchant_id).await
        }
        StorageConfig::File { path } => {
            tracing::info!("Storing products in {}", path.display());
            serve(server, FileDb::open(path).await, &merchant_id).await
        }
        StorageConfig::Sqlite(config) => {
            match &config.database_path {
                Some(path) => tracing::info!("Storing products in SQLite at {}", path.display()),
                None => tracing::info!("Storing products in an in-memory SQLite database"),
            }
            serve(server, Db::open(&config).await?, &merchant_id).await
        }
    }
}

async fn serve<R>(server: AxumConfig, repository: R, merchant_id: &str) -> anyhow::Result<()>
where
    R: CatalogRepository + 'static,
{
    let merchant = if merchant_id.is_empty() {
        "Not configured"
    } else {
        merchant_id
    };
    tracing::info!(merchant_id = merchant, "Starting product feed service");
    tracing::info!(
        health = "/health",
        profile = "/ucp/profile",
        products = PRODUCT_FEED_PATH,
        docs = "/docs",
        "Endpoints"
    );

    let app = FeedApp::new(repository, merchant_id);
    start_server(server, app).await?;
    Ok(())
}
