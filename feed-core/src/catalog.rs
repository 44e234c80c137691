use crate::{
    models::{BatchOutcome, ItemError, Product, ProductDraft, ProductPatch, ValidationError},
    ports::CatalogRepository,
};
use tracing::{Level, event};

/// Why an update did not go through.
///
/// An unknown product id is not a failure; see [`Catalog::update_product`].
#[derive(Debug, thiserror::Error)]
pub enum UpdateError<E: std::error::Error + 'static> {
    /// The merged record breaks a catalog rule
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// The backing store failed
    #[error("repository failure: {0}")]
    Repository(#[source] E),
}

/// The catalog service: validation in front of a storage backend.
///
/// Every operation is a single validate-then-store step. The service keeps
/// no state of its own, so any caching is up to the backend.
#[derive(Debug, Clone)]
pub struct Catalog<R> {
    repository: R,
}

impl<R: CatalogRepository> Catalog<R> {
    /// Wrap a storage backend.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// The storage backend.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Validate and store a batch of drafts.
    ///
    /// Each draft stands alone: an invalid one is reported in the outcome and
    /// skipped, the rest are upserted. There is no rollback, so a storage
    /// failure on one item leaves the items before it stored. Errors are
    /// listed in submission order, whichever stage rejected the item.
    ///
    /// # Errors
    ///
    /// Only if the backend fails the batch as a whole (for instance when the
    /// file store cannot save).
    pub async fn add_products(&self, drafts: Vec<ProductDraft>) -> Result<BatchOutcome, R::Error> {
        let mut errors = Vec::new();
        let mut valid = Vec::with_capacity(drafts.len());
        let mut positions = Vec::with_capacity(drafts.len());

        for (position, draft) in drafts.into_iter().enumerate() {
            match draft.validate() {
                Ok(product) => {
                    positions.push((position, product.id.clone()));
                    valid.push(product);
                }
                Err(err) => errors.push((
                    position,
                    ItemError {
                        product_id: draft.id().map(str::to_owned),
                        error: err.to_string(),
                    },
                )),
            }
        }

        let attempted = valid.len();
        let failures = self.repository.upsert_products(valid).await?;
        let items_processed = attempted - failures.len();

        // failures arrive in submission order, so one pass pairs them with positions
        let mut positions = positions.into_iter();
        for (product_id, err) in failures {
            let position = positions
                .find(|(_, id)| *id == product_id)
                .map_or(usize::MAX, |(position, _)| position);
            errors.push((
                position,
                ItemError {
                    product_id: Some(product_id),
                    error: err.to_string(),
                },
            ));
        }
        errors.sort_by_key(|(position, _)| *position);
        let errors: Vec<ItemError> = errors.into_iter().map(|(_, error)| error).collect();

        event!(
            Level::DEBUG,
            items_processed,
            failed = errors.len(),
            "processed product batch"
        );
        Ok(BatchOutcome::new(items_processed, errors))
    }

    /// Get a single product, or `None` if the id is unknown.
    pub async fn get_product(&self, product_id: &str) -> Result<Option<Product>, R::Error> {
        self.repository.get_product(product_id).await
    }

    /// Get every product.
    ///
    /// The order is the backend's: insertion order for the local stores,
    /// ascending id for the relational one.
    pub async fn get_all_products(&self) -> Result<Vec<Product>, R::Error> {
        self.repository.list_products().await
    }

    /// Overlay `patch` onto an existing product and store the result.
    ///
    /// The product keeps its id whatever the patch says, and the merged
    /// record must pass the same validation as a new product.
    ///
    /// # Returns
    ///
    /// - Ok(Some(product)) with the stored record
    /// - Ok(None) if no product has this id
    /// - Err(UpdateError::Invalid) if the merged record is invalid; nothing is stored
    /// - Err(UpdateError::Repository) if the backend failed
    pub async fn update_product(
        &self,
        product_id: &str,
        patch: ProductPatch,
    ) -> Result<Option<Product>, UpdateError<R::Error>> {
        let Some(existing) = self
            .repository
            .get_product(product_id)
            .await
            .map_err(UpdateError::Repository)?
        else {
            return Ok(None);
        };

        let product = ProductDraft::merged(&existing, patch).validate()?;

        // the product may have been deleted since we read it
        let replaced = self
            .repository
            .replace_product(product.clone())
            .await
            .map_err(UpdateError::Repository)?;

        Ok(replaced.then_some(product))
    }

    /// Remove a product, returning whether it existed.
    pub async fn delete_product(&self, product_id: &str) -> Result<bool, R::Error> {
        self.repository.delete_product(product_id).await
    }
}
