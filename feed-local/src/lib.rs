#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

use feed_core::models::Product;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

mod file;
mod memory;

pub use file::{FileDb, FileError};
pub use memory::MemoryDb;

/// Products keyed by id, iterated in insertion order.
///
/// Overwriting an id keeps its original position; removal shifts later
/// entries down so the order of the survivors is unchanged.
pub(crate) type Table = IndexMap<String, Product, FxBuildHasher>;

/// Insert or overwrite each product, in order.
pub(crate) fn upsert_all(table: &mut Table, products: Vec<Product>) {
    for product in products {
        table.insert(product.id.clone(), product);
    }
}

/// Overwrite an existing entry, leaving the table untouched if there is none.
pub(crate) fn replace(table: &mut Table, product: Product) -> bool {
    match table.get_mut(&product.id) {
        Some(entry) => {
            *entry = product;
            true
        }
        None => false,
    }
}
