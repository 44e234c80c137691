use super::{Availability, Condition, Product};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A set of top-level fields to overlay onto an existing product.
pub type ProductPatch = Map<String, Value>;

/// An unvalidated candidate product, exactly as a caller submitted it.
///
/// Any JSON value is a draft, so a malformed item is reported field by field
/// rather than failing deserialization of the whole request. [`ProductDraft::validate`] is the only way to obtain a
/// [`Product`] from a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(transparent)]
pub struct ProductDraft(pub Value);

/// The first rule a draft violates.
///
/// The messages are surfaced verbatim to API callers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// `id` is missing, not a string, or empty
    #[error("Product ID is required and must be a string")]
    Id,
    /// `title` is missing, not a string, or empty
    #[error("Product title is required and must be a string")]
    Title,
    /// `price` is missing, or `price.value` is not a non-negative number
    #[error("Product price must be a valid positive number")]
    Price,
    /// `price.currency` is missing, not a string, or empty
    #[error("Product currency is required and must be a string")]
    Currency,
    /// `availability` is not one of the known values
    #[error("Product availability must be one of: in_stock, out_of_stock, preorder, backorder")]
    Availability,
    /// `link` is missing, not a string, or empty
    #[error("Product link is required and must be a string")]
    Link,
    /// `image_link` is missing, not a string, or empty
    #[error("Product image_link is required and must be a string")]
    ImageLink,
    /// An optional text field holds something other than a string
    #[error("Product {0} must be a string")]
    NotAString(&'static str),
    /// `condition` is present but not one of the known values
    #[error("Product condition must be one of: new, refurbished, used")]
    Condition,
    /// The draft passed every field check but still could not be decoded
    #[error("Product is malformed: {0}")]
    Malformed(String),
}

const OPTIONAL_TEXT: [&str; 4] = ["brand", "gtin", "mpn", "category"];

impl ProductDraft {
    /// The draft's `id`, if it has a string one.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Overlay `patch` onto `existing`, one top-level field at a time.
    ///
    /// Nested objects are replaced rather than merged, so a patched `price`
    /// must carry both `value` and `currency`. The `id` of `existing` always
    /// wins over any `id` in the patch.
    pub fn merged(existing: &Product, patch: ProductPatch) -> Self {
        let mut draft = Self::from(existing);
        if let Value::Object(fields) = &mut draft.0 {
            fields.extend(patch);
            fields.insert("id".to_owned(), Value::String(existing.id.clone()));
        }
        draft
    }

    /// Check the draft against the catalog rules, stopping at the first
    /// violation, and decode it into a [`Product`].
    pub fn validate(&self) -> Result<Product, ValidationError> {
        let fields = self.0.as_object().ok_or(ValidationError::Id)?;

        let text = |key: &str| {
            fields
                .get(key)
                .and_then(Value::as_str)
                .filter(|value| !value.is_empty())
        };

        text("id").ok_or(ValidationError::Id)?;
        text("title").ok_or(ValidationError::Title)?;

        let price = fields
            .get("price")
            .and_then(Value::as_object)
            .ok_or(ValidationError::Price)?;
        price
            .get("value")
            .and_then(Value::as_f64)
            .filter(|value| *value >= 0.0)
            .ok_or(ValidationError::Price)?;
        price
            .get("currency")
            .and_then(Value::as_str)
            .filter(|currency| !currency.is_empty())
            .ok_or(ValidationError::Currency)?;

        text("availability")
            .and_then(|value| value.parse::<Availability>().ok())
            .ok_or(ValidationError::Availability)?;
        text("link").ok_or(ValidationError::Link)?;
        text("image_link").ok_or(ValidationError::ImageLink)?;

        // `description` defaults to empty but cannot be null
        if !matches!(fields.get("description"), None | Some(Value::String(_))) {
            return Err(ValidationError::NotAString("description"));
        }
        for key in OPTIONAL_TEXT {
            if !matches!(fields.get(key), None | Some(Value::Null | Value::String(_))) {
                return Err(ValidationError::NotAString(key));
            }
        }
        match fields.get("condition") {
            None | Some(Value::Null) => {}
            Some(Value::String(value)) if value.parse::<Condition>().is_ok() => {}
            Some(_) => return Err(ValidationError::Condition),
        }

        serde_json::from_value(self.0.clone())
            .map_err(|err| ValidationError::Malformed(err.to_string()))
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        // Product holds only strings, an f64 and unit enums
        Self(serde_json::to_value(product).expect("products always serialize"))
    }
}

impl From<Value> for ProductDraft {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
