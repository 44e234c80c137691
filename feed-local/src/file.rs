use crate::{Table, replace, upsert_all};
use feed_core::{models::Product, ports::CatalogRepository};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::{fs, sync::RwLock};
use tracing::{Level, event};

/// Failure to write the catalog document.
///
/// Both variants display the same message. The cause is kept as the error
/// source and logged when it happens.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// The catalog could not be encoded as JSON
    #[error("failed to save products")]
    Encode(#[source] serde_json::Error),
    /// The document could not be written
    #[error("failed to save products")]
    Write(#[source] std::io::Error),
}

/// The on-disk layout of the catalog.
#[derive(Deserialize)]
struct Document {
    products: Vec<Product>,
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    products: Vec<&'a Product>,
}

/// A catalog mirrored to a JSON document on disk.
///
/// A `FileDb` only exists once its document has been loaded, so there is no
/// "not yet loaded" state to check on each call. The document is never read
/// again after [`FileDb::open`]; changes made to the file by other processes
/// are overwritten by the next save.
///
/// Every mutating call rewrites the whole document while holding the write
/// lock on the table, so a batch of upserts costs a single write.
#[derive(Clone, Debug)]
pub struct FileDb {
    path: Arc<PathBuf>,
    products: Arc<RwLock<Table>>,
}

impl FileDb {
    /// Load the catalog stored at `path`.
    ///
    /// If the document is missing or cannot be parsed, the catalog starts
    /// empty. The document is not touched until the first mutation.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let products = match load(&path).await {
            Ok(products) => {
                event!(
                    Level::INFO,
                    path = %path.display(),
                    count = products.len(),
                    "loaded product catalog"
                );
                products
            }
            Err(err) => {
                event!(
                    Level::WARN,
                    path = %path.display(),
                    err = err.to_string(),
                    "starting with an empty product catalog"
                );
                Table::default()
            }
        };

        Self {
            path: Arc::new(path),
            products: Arc::new(RwLock::new(products)),
        }
    }

    /// The location of the catalog document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn save(&self, table: &Table) -> Result<(), FileError> {
        let document = DocumentRef {
            products: table.values().collect(),
        };
        let bytes = serde_json::to_vec_pretty(&document).map_err(|err| {
            event!(Level::ERROR, err = err.to_string(), "failed to encode catalog");
            FileError::Encode(err)
        })?;

        write(&self.path, &bytes).await.map_err(|err| {
            event!(
                Level::ERROR,
                path = %self.path.display(),
                err = err.to_string(),
                "failed to write catalog"
            );
            FileError::Write(err)
        })
    }
}

async fn load(path: &Path) -> Result<Table, Box<dyn std::error::Error + Send + Sync>> {
    let bytes = fs::read(path).await?;
    let Document { products } = serde_json::from_slice(&bytes)?;
    let mut table = Table::default();
    upsert_all(&mut table, products);
    Ok(table)
}

async fn write(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, bytes).await
}

impl CatalogRepository for FileDb {
    type Error = FileError;

    async fn upsert_products(
        &self,
        products: Vec<Product>,
    ) -> Result<Vec<(String, Self::Error)>, Self::Error> {
        let mut table = self.products.write().await;
        upsert_all(&mut table, products);
        self.save(&table).await?;
        Ok(Vec::new())
    }

    async fn get_product(&self, product_id: &str) -> Result<Option<Product>, Self::Error> {
        Ok(self.products.read().await.get(product_id).cloned())
    }

    async fn list_products(&self) -> Result<Vec<Product>, Self::Error> {
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn replace_product(&self, product: Product) -> Result<bool, Self::Error> {
        let mut table = self.products.write().await;
        if !replace(&mut table, product) {
            return Ok(false);
        }
        self.save(&table).await?;
        Ok(true)
    }

    async fn delete_product(&self, product_id: &str) -> Result<bool, Self::Error> {
        let mut table = self.products.write().await;
        if table.shift_remove(product_id).is_none() {
            return Ok(false);
        }
        self.save(&table).await?;
        Ok(true)
    }
}
