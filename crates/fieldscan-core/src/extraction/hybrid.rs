//! Hybrid extraction: deterministic field matching layered with model inference.

use tracing::{debug, warn};

use crate::error::LlmError;
use crate::llm::{InferredReply, TextGenerator, build_prompt, strip_code_fences};
use crate::models::FieldMap;

/// Ask `generator` for `fields` over the document lines.
///
/// Returns the inferred records, or the reason none could be obtained.
pub async fn infer_fields<G, F>(
    generator: &G,
    fields: &[F],
    lines: &[String],
    extra_instruction: Option<&str>,
) -> Result<Vec<FieldMap>, LlmError>
where
    G: TextGenerator,
    F: AsRef<str>,
{
    let document_text = lines.join("\n");
    let prompt = build_prompt(fields, &document_text, extra_instruction);

    let raw = generator.generate(&prompt).await?;
    debug!("Raw model reply: {:?}", raw);

    if raw.trim().is_empty() {
        return Err(LlmError::EmptyResponse);
    }

    let cleaned = strip_code_fences(&raw);
    debug!("Cleaned model reply:\n{}", cleaned);

    InferredReply::classify(&cleaned).into_records()
}

/// Synthetic record standing in for a failed inference.
pub fn error_record(message: impl Into<String>) -> FieldMap {
    let mut record = FieldMap::with_capacity(3);
    record.insert("Field".to_string(), "Error".to_string());
    record.insert("Value".to_string(), message.into());
    record.insert("Confidence".to_string(), "0".to_string());
    record
}

/// Layer inferred records over the deterministic field map.
///
/// One row per inferred record; inferred keys override deterministic ones.
/// A failed inference becomes a single [`error_record`] row instead of an
/// error, so the deterministic values are still written.
pub fn merge_inferred(
    deterministic: &FieldMap,
    inferred: Result<Vec<FieldMap>, LlmError>,
) -> Vec<FieldMap> {
    let records = match inferred {
        Ok(records) => records,
        Err(e) => {
            warn!("Error in model response: {}", e);
            vec![error_record(e.to_string())]
        }
    };

    if records.is_empty() {
        warn!("Model reply contained no records, keeping deterministic fields only");
        return vec![deterministic.clone()];
    }

    records
        .into_iter()
        .map(|record| {
            let mut row = deterministic.clone();
            row.extend(record);
            row
        })
        .collect()
}
