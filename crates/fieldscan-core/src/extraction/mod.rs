//! Field extraction from OCR lines.
//!
//! Three flows share the same OCR lines:
//! - autonomous: every line through [`parse_item_line`], one row per line
//! - targeted: [`match_fields`] for caller labels, one row per document
//! - hybrid: targeted values layered with model-inferred records

mod field_matcher;
pub mod hybrid;
mod line_parser;
pub mod patterns;

pub use field_matcher::{FieldMatcher, NOT_FOUND, match_fields};
pub use hybrid::{error_record, infer_fields, merge_inferred};
pub use line_parser::{parse_item_line, parse_lines};

use tracing::info;

use crate::error::{ExtractionError, Result};
use crate::llm::TextGenerator;
use crate::models::config::OcrConfig;
use crate::ocr::{OcrOptions, Preprocessing};
use crate::table::ResultTable;

/// Extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Line-item parsing of every line.
    Autonomous,
    /// Lookup of caller-specified fields.
    Targeted,
    /// Lookup plus model inference.
    Hybrid,
}

impl Flow {
    /// Page preprocessing used by this flow.
    pub fn preprocessing(self) -> Preprocessing {
        match self {
            Self::Autonomous => Preprocessing::None,
            Self::Targeted | Self::Hybrid => Preprocessing::Binarize,
        }
    }

    /// OCR options used by this flow.
    pub fn ocr_options(self, config: &OcrConfig) -> OcrOptions {
        match self {
            Self::Autonomous => OcrOptions::engine_defaults(),
            Self::Targeted | Self::Hybrid => OcrOptions::for_binarized(config),
        }
    }
}

/// Autonomous flow: one `[Qty, Item, Price, Info]` row per line.
pub fn autonomous_table(lines: &[String]) -> Result<ResultTable> {
    ensure_lines(lines)?;

    let records = parse_lines(lines);
    let items = records.iter().filter(|r| r.is_item()).count();
    info!("Parsed {} items from {} lines", items, records.len());

    Ok(ResultTable::from_items(&records))
}

/// Targeted flow: a single row with one column per field.
pub fn targeted_table<F: AsRef<str>>(
    lines: &[String],
    fields: &[F],
    matcher: &FieldMatcher,
) -> Result<ResultTable> {
    ensure_fields(fields)?;
    ensure_lines(lines)?;

    let values = matcher.match_fields(lines, fields);
    Ok(ResultTable::from_field_maps(&[values]))
}

/// Hybrid flow: deterministic values overridden by inferred records.
///
/// A failing `generator` does not fail the flow; it yields an error row.
pub async fn hybrid_table<G, F>(
    lines: &[String],
    fields: &[F],
    matcher: &FieldMatcher,
    generator: &G,
    extra_instruction: Option<&str>,
) -> Result<ResultTable>
where
    G: TextGenerator,
    F: AsRef<str>,
{
    ensure_fields(fields)?;
    ensure_lines(lines)?;

    let deterministic = matcher.match_fields(lines, fields);
    let inferred = infer_fields(generator, fields, lines, extra_instruction).await;
    let rows = merge_inferred(&deterministic, inferred);

    Ok(ResultTable::from_field_maps(&rows))
}

fn ensure_lines(lines: &[String]) -> Result<()> {
    if lines.is_empty() {
        return Err(ExtractionError::NoData.into());
    }
    Ok(())
}

fn ensure_fields<F>(fields: &[F]) -> Result<()> {
    if fields.is_empty() {
        return Err(ExtractionError::NoFields.into());
    }
    Ok(())
}
