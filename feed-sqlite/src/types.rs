//! Row mapping between the `products` table and the core model.

use feed_core::models::{Price, Product, UnknownVariant};

/// One row of the `products` table, with enums kept as their text form.
#[derive(sqlx::FromRow)]
pub(crate) struct ProductRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price_value: f64,
    pub price_currency: String,
    pub availability: String,
    pub link: String,
    pub image_link: String,
    pub brand: Option<String>,
    pub gtin: Option<String>,
    pub mpn: Option<String>,
    pub condition: Option<String>,
    pub category: Option<String>,
}

impl TryFrom<ProductRow> for Product {
    type Error = UnknownVariant;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product {
            id: row.id,
            title: row.title,
            description: row.description,
            price: Price {
                value: row.price_value,
                currency: row.price_currency,
            },
            availability: row.availability.parse()?,
            link: row.link,
            image_link: row.image_link,
            brand: row.brand,
            gtin: row.gtin,
            mpn: row.mpn,
            condition: row.condition.as_deref().map(str::parse).transpose()?,
            category: row.category,
        })
    }
}

/// Decode a row, surfacing unknown enum text as a decode error.
pub(crate) fn decode(row: ProductRow) -> Result<Product, sqlx::Error> {
    Product::try_from(row).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}
