use serde::{Deserialize, Serialize};

/// The result of submitting a batch of drafts.
///
/// Items are processed independently, so a batch can partially succeed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    /// True iff every item was stored
    pub success: bool,
    /// A human-readable summary
    pub message: String,
    /// The number of items that were stored
    pub items_processed: usize,
    /// One entry per item that was not stored, omitted when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ItemError>,
}

impl BatchOutcome {
    /// Summarize a processed batch.
    pub fn new(items_processed: usize, errors: Vec<ItemError>) -> Self {
        let success = errors.is_empty();
        let message = if success {
            "All products processed successfully"
        } else {
            "Some products failed to process"
        };
        Self {
            success,
            message: message.to_owned(),
            items_processed,
            errors,
        }
    }
}

/// Why a single item of a batch was not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ItemError {
    /// The id the item carried, if it had one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    /// What went wrong
    pub error: String,
}
