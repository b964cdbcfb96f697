//! Tabular result assembly and serialization.

use std::fmt;
use std::io::Write;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::Result;
use crate::models::{FieldMap, ItemRecord};

/// Ordered rows under a fixed header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ResultTable {
    /// Create an empty table with the given header.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// One `[Qty, Item, Price, Info]` row per record, in record order.
    pub fn from_items(records: &[ItemRecord]) -> Self {
        let mut table = Self::new(ItemRecord::COLUMNS);
        table.rows = records.iter().map(ItemRecord::to_row).collect();
        table
    }

    /// One row per field map.
    ///
    /// Columns are the union of all keys in first-seen order; a row lacking a
    /// column gets an empty cell.
    pub fn from_field_maps(maps: &[FieldMap]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for map in maps {
            for key in map.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = maps
            .iter()
            .map(|map| {
                columns
                    .iter()
                    .map(|c| map.get(c).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    /// Column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `row` under `column`.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(index).map(String::as_str)
    }

    /// Write header and rows as comma-separated values.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Render as a CSV string.
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write the table as CSV to `path`.
    pub fn save_csv(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(file)
    }

    /// Rows as a JSON array of objects keyed by column.
    pub fn to_json(&self) -> Value {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = self
                    .columns
                    .iter()
                    .zip(row)
                    .map(|(c, v)| (c.clone(), Value::String(v.clone())))
                    .collect();
                Value::Object(object)
            })
            .collect();
        Value::Array(rows)
    }
}

impl fmt::Display for ResultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let write_line = |f: &mut fmt::Formatter<'_>, cells: &[String]| -> fmt::Result {
            let padded: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect();
            writeln!(f, "{}", padded.join(" | ").trim_end())
        };

        write_line(f, &self.columns)?;
        for row in &self.rows {
            write_line(f, row)?;
        }
        Ok(())
    }
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
    fn test_items_to_csv() {
        let records = vec![
            ItemRecord::RawLine {
                text: "ACME, Inc.".to_string(),
            },
            ItemRecord::ParsedItem {
                quantity: "2x".to_string(),
                item: "Widget".to_string(),
                price: "10.00".to_string(),
            },
        ];

        let csv = ResultTable::from_items(&records).to_csv_string().unwrap();
        assert_eq!(csv, "Qty,Item,Price,Info\n,,,\"ACME, Inc.\"\n2x,Widget,10.00,\n");
    }

    #[test]
    fn test_field_maps_union_columns() {
        let table = ResultTable::from_field_maps(&[
            map(&[("Total", "5.00"), ("Item", "Tea")]),
            map(&[("Total", "5.00"), ("Field", "Error")]),
        ]);

        assert_eq!(table.columns(), &["Total", "Item", "Field"]);
        assert_eq!(table.get(0, "Field"), Some(""));
        assert_eq!(table.get(1, "Field"), Some("Error"));
        assert_eq!(table.get(1, "Missing"), None);
    }

    #[test]
    fn test_to_json() {
        let table = ResultTable::from_field_maps(&[map(&[("Total", "5.00"), ("Date", "NA")])]);
        assert_eq!(
            table.to_json(),
            serde_json::json!([{"Total": "5.00", "Date": "NA"}])
        );
    }

    #[test]
    fn test_save_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        ResultTable::from_field_maps(&[map(&[("Total", "54,20")])])
            .save_csv(&path)
            .unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Total\n\"54,20\"\n");
    }
}
