//! Targeted field lookup over OCR lines.

use tracing::debug;

use crate::models::FieldMap;

use super::patterns::NUMERIC_TOKEN;

/// Sentinel written for a field whose label appears on no line.
pub const NOT_FOUND: &str = "NA";

/// Looks up caller-specified labels in OCR lines.
///
/// Labels match as case-insensitive substrings anywhere in a line, so
/// `Total` also matches `Subtotal`. The earliest matching line wins and each
/// field is scanned independently of the others.
#[derive(Debug, Clone)]
pub struct FieldMatcher {
    na_sentinel: String,
}

impl FieldMatcher {
    /// Create a matcher using the `NA` sentinel.
    pub fn new() -> Self {
        Self {
            na_sentinel: NOT_FOUND.to_string(),
        }
    }

    /// Override the value used for fields that are not found.
    pub fn with_na_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.na_sentinel = sentinel.into();
        self
    }

    /// Produce one value per field, in field order.
    pub fn match_fields<L, F>(&self, lines: &[L], fields: &[F]) -> FieldMap
    where
        L: AsRef<str>,
        F: AsRef<str>,
    {
        let mut result = FieldMap::with_capacity(fields.len());

        for field in fields {
            let field = field.as_ref();
            let value = self
                .match_field(lines, field)
                .unwrap_or_else(|| self.na_sentinel.clone());
            debug!(field, value = %value, "matched field");
            result.insert(field.to_string(), value);
        }

        result
    }

    /// Value for a single field, or `None` when no line mentions it.
    pub fn match_field<L: AsRef<str>>(&self, lines: &[L], field: &str) -> Option<String> {
        let label = field.to_lowercase();

        lines
            .iter()
            .map(|l| l.as_ref())
            .find(|line| line.to_lowercase().contains(&label))
            .map(|line| match NUMERIC_TOKEN.find(line) {
                Some(token) => token.as_str().to_string(),
                None => line.trim().to_string(),
            })
    }
}

impl Default for FieldMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Match `fields` against `lines` with the default sentinel.
pub fn match_fields<L, F>(lines: &[L], fields: &[F]) -> FieldMap
where
    L: AsRef<str>,
    F: AsRef<str>,
{
    FieldMatcher::new().match_fields(lines, fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn map(pairs: &[(&str, &str)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_matching_line_wins() {
        let lines = ["Subtotal 45.00", "Total 54,20"];
        assert_eq!(match_fields(&lines, &["Total"]), map(&[("Total", "45.00")]));
    }

    #[test]
    fn test_substring_match_inside_longer_label() {
        let lines = ["Subtotal: 45.00"];
        assert_eq!(match_fields(&lines, &["Total"]), map(&[("Total", "45.00")]));
    }

    #[test]
    fn test_label_is_case_insensitive() {
        let lines = ["GRAND TOTAL 54,20"];
        assert_eq!(
            match_fields(&lines, &["grand total"]),
            map(&[("grand total", "54,20")])
        );
    }

    #[test]
    fn test_missing_label_is_na() {
        let lines = ["Total 54.20"];
        assert_eq!(match_fields(&lines, &["Discount"]), map(&[("Discount", "NA")]));
    }

    #[test]
    fn test_line_without_number_yields_line_text() {
        let lines = ["ACME MARKET", "Cashier: Anna"];
        assert_eq!(
            match_fields(&lines, &["cashier"]),
            map(&[("cashier", "Cashier: Anna")])
        );
    }

    #[test]
    fn test_token_is_not_normalized() {
        let lines = ["Date 01.02.2024", "Amount due: 1,234.50 EUR"];
        assert_eq!(
            match_fields(&lines, &["Amount", "Date"]),
            map(&[("Amount", "1,234.50"), ("Date", "01.02.2024")])
        );
    }

    #[test]
    fn test_output_follows_field_order() {
        let lines = ["Date 2024-01-01", "Total 9.99", "Tax 0.80"];
        let result = match_fields(&lines, &["Tax", "Date", "Total"]);

        let keys: Vec<&str> = result.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Tax", "Date", "Total"]);
        assert_eq!(result["Date"], "2024");
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let lines = vec!["Subtotal 45.00".to_string(), "VAT 8.55".to_string()];
        let fields = vec!["VAT".to_string(), "Tip".to_string()];
        let matcher = FieldMatcher::new();

        let first = matcher.match_fields(&lines, &fields);
        let second = matcher.match_fields(&lines, &fields);
        assert_eq!(first, second);
        assert_eq!(first, map(&[("VAT", "8.55"), ("Tip", "NA")]));
    }

    #[test]
    fn test_custom_sentinel() {
        let matcher = FieldMatcher::new().with_na_sentinel("");
        let lines = ["Total 1.00"];
        assert_eq!(matcher.match_fields(&lines, &["Tip"]), map(&[("Tip", "")]));
    }

    #[test]
    fn test_no_lines_gives_all_na() {
        let lines: [&str; 0] = [];
        assert_eq!(
            match_fields(&lines, &["Total", "Date"]),
            map(&[("Total", "NA"), ("Date", "NA")])
        );
    }
}
