#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

use sqlx::sqlite;
use std::{str::FromStr, time::Duration};
use tokio::try_join;

pub mod config;
mod r#impl;
mod types;

use config::SqliteConfig;

/// The product catalog as a SQLite `products` table.
///
/// Lookups and listings use `reader`. Upserts, replacements and deletions use
/// `writer`, which holds a single connection, so two writes never interleave.
/// Cloning shares both pools.
///
/// With no `database_path` the table lives in a private in-memory database
/// that disappears once the last clone is dropped.
///
/// ```no_run
/// # use feed_core::Catalog;
/// # use feed_sqlite::{Db, config::SqliteConfig};
/// # async fn example() -> Result<(), sqlx::Error> {
/// let db = Db::open(&SqliteConfig {
///     database_path: Some("products.db".into()),
///     create_if_missing: true,
/// })
/// .await?;
/// let catalog = Catalog::new(db);
/// println!("{} products", catalog.get_all_products().await?.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Db {
    /// Pool for catalog reads
    pub reader: sqlx::Pool<sqlx::Sqlite>,
    /// Single-connection pool for catalog writes
    pub writer: sqlx::Pool<sqlx::Sqlite>,
}

impl Db {
    /// Open the catalog database and bring the `products` table up to date.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened (or is missing and
    /// `create_if_missing` is off), or if the table migration fails.
    pub async fn open(config: &SqliteConfig) -> Result<Self, sqlx::Error> {
        let options = connect_options(config)?;

        // writes are serialized on a single connection
        let (reader, writer) = try_join!(
            sqlite::SqlitePoolOptions::new().connect_with(options.clone()),
            sqlite::SqlitePoolOptions::new()
                .max_connections(1)
                .connect_with(options),
        )?;

        sqlx::migrate!("./schema").run(&writer).await?;

        Ok(Self { reader, writer })
    }
}

fn connect_options(config: &SqliteConfig) -> Result<sqlite::SqliteConnectOptions, sqlx::Error> {
    // `:memory:` is rewritten by sqlx into a uniquely named shared-cache
    // database, which both pools then see
    let options = match &config.database_path {
        Some(path) => sqlite::SqliteConnectOptions::new().filename(path),
        None => sqlite::SqliteConnectOptions::from_str(":memory:")?,
    };

    Ok(options
        .busy_timeout(Duration::from_secs(5))
        .journal_mode(sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlite::SqliteSynchronous::Normal)
        .pragma("temp_store", "memory")
        .create_if_missing(config.create_if_missing))
}
