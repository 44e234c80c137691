//! Catalog repository implementation for the SQLite database.

use crate::{
    Db,
    types::{ProductRow, decode},
};
use feed_core::{models::Product, ports::CatalogRepository};
use sqlx::{Sqlite, query::Query, sqlite::SqliteArguments};
use tracing::{Level, event};

const SELECT_PRODUCT: &str = r#"
    select
        id, title, description, price_value, price_currency, availability,
        link, image_link, brand, gtin, mpn, condition, category
    from
        products
"#;

/// Bind every column of `product`, in table order, as `$1..$13`.
fn bind_product<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    product: Product,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    query
        .bind(product.id)
        .bind(product.title)
        .bind(product.description)
        .bind(product.price.value)
        .bind(product.price.currency)
        .bind(product.availability.as_str())
        .bind(product.link)
        .bind(product.image_link)
        .bind(product.brand)
        .bind(product.gtin)
        .bind(product.mpn)
        .bind(product.condition.map(|condition| condition.as_str()))
        .bind(product.category)
}

impl CatalogRepository for Db {
    type Error = sqlx::Error;

    async fn upsert_products(
        &self,
        products: Vec<Product>,
    ) -> Result<Vec<(String, Self::Error)>, Self::Error> {
        let mut failures = Vec::new();

        // One statement per product; a failure does not undo earlier items
        for product in products {
            let product_id = product.id.clone();
            let query = sqlx::query(
                r#"
                insert into
                    products (
                        id, title, description, price_value, price_currency, availability,
                        link, image_link, brand, gtin, mpn, condition, category
                    )
                values
                    ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                on conflict (id) do update set
                    title = excluded.title,
                    description = excluded.description,
                    price_value = excluded.price_value,
                    price_currency = excluded.price_currency,
                    availability = excluded.availability,
                    link = excluded.link,
                    image_link = excluded.image_link,
                    brand = excluded.brand,
                    gtin = excluded.gtin,
                    mpn = excluded.mpn,
                    condition = excluded.condition,
                    category = excluded.category
                "#,
            );

            if let Err(err) = bind_product(query, product).execute(&self.writer).await {
                event!(
                    Level::WARN,
                    product_id = %product_id,
                    err = err.to_string(),
                    "failed to upsert product"
                );
                failures.push((product_id, err));
            }
        }

        Ok(failures)
    }

    async fn get_product(&self, product_id: &str) -> Result<Option<Product>, Self::Error> {
        let sql = format!("{SELECT_PRODUCT} where id = $1");
        sqlx::query_as::<_, ProductRow>(&sql)
            .bind(product_id)
            .fetch_optional(&self.reader)
            .await?
            .map(decode)
            .transpose()
    }

    async fn list_products(&self) -> Result<Vec<Product>, Self::Error> {
        let sql = format!("{SELECT_PRODUCT} order by id asc");
        sqlx::query_as::<_, ProductRow>(&sql)
            .fetch_all(&self.reader)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    async fn replace_product(&self, product: Product) -> Result<bool, Self::Error> {
        let query = sqlx::query(
            r#"
            update
                products
            set
                title = $2,
                description = $3,
                price_value = $4,
                price_currency = $5,
                availability = $6,
                link = $7,
                image_link = $8,
                brand = $9,
                gtin = $10,
                mpn = $11,
                condition = $12,
                category = $13
            where
                id = $1
            "#,
        );

        let result = bind_product(query, product).execute(&self.writer).await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_product(&self, product_id: &str) -> Result<bool, Self::Error> {
        let result = sqlx::query(
            r#"
            delete from
                products
            where
                id = $1
            "#,
        )
        .bind(product_id)
        .execute(&self.writer)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
