mod draft;
mod outcome;
mod product;

pub use draft::{ProductDraft, ProductPatch, ValidationError};
pub use outcome::{BatchOutcome, ItemError};
pub use product::{Availability, Condition, Price, Product, UnknownVariant};
