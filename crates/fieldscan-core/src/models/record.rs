//! Extracted record types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping from field label to extracted value.
///
/// Insertion order is the column order of the output row.
pub type FieldMap = IndexMap<String, String>;

/// One OCR line interpreted by the line-item parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemRecord {
    /// A line ending in a price.
    ParsedItem {
        /// Leading quantity token as written (`2x`, `Qty: 3`, `5`), or empty.
        quantity: String,
        /// Item description between quantity and price.
        item: String,
        /// Trailing price with `,` normalized to `.`.
        price: String,
    },
    /// Any other line, kept verbatim for context.
    RawLine {
        /// The original line text.
        text: String,
    },
}

impl ItemRecord {
    /// Column names of the autonomous flow output.
    pub const COLUMNS: [&'static str; 4] = ["Qty", "Item", "Price", "Info"];

    /// Whether this record is a priced line item.
    pub fn is_item(&self) -> bool {
        matches!(self, Self::ParsedItem { .. })
    }

    /// Project the record into the `[Qty, Item, Price, Info]` shape.
    pub fn to_row(&self) -> Vec<String> {
        match self {
            Self::ParsedItem {
                quantity,
                item,
                price,
            } => vec![quantity.clone(), item.clone(), price.clone(), String::new()],
            Self::RawLine { text } => vec![String::new(), String::new(), String::new(), text.clone()],
        }
    }
}
