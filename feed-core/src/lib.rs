#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

/// Core domain models for the product feed.
///
/// This module contains the `Product` record, the loosely-typed drafts that
/// callers submit, the validation rules that turn a draft into a product, and
/// the outcome types reported back for batch operations.
pub mod models;

/// Interface traits for the product feed.
///
/// These are the "ports" of the hexagonal architecture: storage backends
/// implement `CatalogRepository`, and outer layers (such as the HTTP server)
/// reach the catalog through `Application`.
pub mod ports;

mod catalog;
pub use catalog::{Catalog, UpdateError};
