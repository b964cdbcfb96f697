//! Line-item parsing for the autonomous flow.
//!
//! A receipt line is treated as an item when it ends in a two-decimal price.
//! Everything before the price is split into an optional quantity token and
//! the item name. Lines without a trailing price are kept as raw context.

use tracing::trace;

use crate::models::ItemRecord;

use super::patterns::{LEADING_QUANTITY, TRAILING_PRICE};

/// Classify one OCR line as a priced item or a raw line.
///
/// Only a price at the very end of the trimmed line counts; a price-like
/// substring elsewhere leaves the line as [`ItemRecord::RawLine`].
pub fn parse_item_line(line: &str) -> ItemRecord {
    let line = line.trim();

    let Some(price_match) = TRAILING_PRICE.find(line) else {
        return ItemRecord::RawLine {
            text: line.to_string(),
        };
    };

    let price = price_match.as_str().replace(',', ".");
    let text_before_price = line[..price_match.start()].trim();

    let (quantity, item) = split_quantity(text_before_price);
    trace!(quantity, item, price = %price, "parsed item line");

    ItemRecord::ParsedItem {
        quantity: quantity.to_string(),
        item: item.to_string(),
        price,
    }
}

/// Parse every line, preserving order.
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Vec<ItemRecord> {
    lines.iter().map(|l| parse_item_line(l.as_ref())).collect()
}

/// Split `text` into (quantity, item name).
fn split_quantity(text: &str) -> (&str, &str) {
    match LEADING_QUANTITY.captures(text) {
        Some(caps) => {
            let quantity = caps.get(1).map_or("", |m| m.as_str());
            let item = caps.get(2).map_or("", |m| m.as_str().trim());
            (quantity, item)
        }
        // Empty text before the price
        None => ("", text),
    }
}
