use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A single entry of the merchant's product feed.
///
/// A `Product` only exists once a [`ProductDraft`](super::ProductDraft) has
/// passed validation, so every instance satisfies the catalog invariants:
/// non-empty `id`, `title`, `link` and `image_link`, a non-negative price
/// with a currency, and a known availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Product {
    /// Unique identifier, immutable once the product exists
    pub id: String,
    /// Display title
    pub title: String,
    /// Free-form description, possibly empty
    #[serde(default)]
    pub description: String,
    /// Unit price
    pub price: Price,
    /// Stock status
    pub availability: Availability,
    /// Canonical URL of the product page
    pub link: String,
    /// Canonical URL of the product image
    pub image_link: String,
    /// Brand name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Global trade item number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gtin: Option<String>,
    /// Manufacturer part number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mpn: Option<String>,
    /// Physical condition of the item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    /// Merchant-defined category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A monetary amount in a given currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Price {
    /// The amount, never negative
    pub value: f64,
    /// Currency code, e.g. "USD"
    pub currency: String,
}

/// Returned when a stored string does not name a known enum variant.
#[derive(Debug, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

macro_rules! string_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// The wire representation of this variant.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: $kind,
                        value: s.to_owned(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Stock status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// Available for immediate purchase
    InStock,
    /// Not currently purchasable
    OutOfStock,
    /// Purchasable ahead of release
    Preorder,
    /// Purchasable, shipped once restocked
    Backorder,
}

string_enum!(Availability, "availability", {
    InStock => "in_stock",
    OutOfStock => "out_of_stock",
    Preorder => "preorder",
    Backorder => "backorder",
});

/// Physical condition of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Brand new
    New,
    /// Restored by the manufacturer or a third party
    Refurbished,
    /// Previously owned
    Used,
}

string_enum!(Condition, "condition", {
    New => "new",
    Refurbished => "refurbished",
    Used => "used",
});
