//! Common regex patterns for receipt line and field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Price in the right-aligned column: digits, `.` or `,`, two decimals, at end of line
    pub static ref TRAILING_PRICE: Regex = Regex::new(
        r"(\d+[.,]\d{2})$"
    ).unwrap();

    // Optional leading quantity (`2x`, `Qty: 3`, `5`) followed by the item name
    pub static ref LEADING_QUANTITY: Regex = Regex::new(
        r"^(?:(\d+x|(?i:qty)[:\-]?\s*\d+|\d+)\s+)?(.+)$"
    ).unwrap();

    // First run of digits and separators on a labelled line
    pub static ref NUMERIC_TOKEN: Regex = Regex::new(
        r"[\d.,]+"
    ).unwrap();

    // Markdown code fences around a JSON reply
    pub static ref CODE_FENCE: Regex = Regex::new(
        r"(?m)^```(?:json)?\s*|```$"
    ).unwrap();
}
