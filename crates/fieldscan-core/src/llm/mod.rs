//! Text generation service used by the hybrid flow.

mod gemini;
mod prompt;

pub use gemini::GeminiClient;
pub use prompt::build_prompt;

use std::future::Future;

use serde_json::Value;
use tracing::warn;

use crate::error::LlmError;
use crate::extraction::patterns::CODE_FENCE;
use crate::models::FieldMap;

/// A service that completes a text prompt.
pub trait TextGenerator {
    /// Send `prompt` and return the raw completion text.
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, LlmError>> + Send;
}

/// Remove Markdown code fences (```` ``` ```` or ```` ```json ````) around a reply.
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE.replace_all(text.trim(), "").trim().to_string()
}

/// Shape of a model reply after JSON parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum InferredReply {
    /// A single JSON object.
    Object(FieldMap),
    /// An array; only its object members are kept.
    ArrayOfObjects(Vec<FieldMap>),
    /// Not JSON, or JSON of another shape.
    Malformed {
        /// The text that was parsed.
        raw: String,
        /// Parser error when the text is not JSON at all.
        parse_error: Option<String>,
    },
}

impl InferredReply {
    /// Parse and classify an already fence-stripped reply.
    pub fn classify(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(object)) => Self::Object(object_to_fields(object)),
            Ok(Value::Array(items)) => {
                let mut records = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::Object(object) => records.push(object_to_fields(object)),
                        other => warn!("Skipping non-object item in reply: {}", other),
                    }
                }
                Self::ArrayOfObjects(records)
            }
            Ok(_) => Self::Malformed {
                raw: text.to_string(),
                parse_error: None,
            },
            Err(e) => Self::Malformed {
                raw: text.to_string(),
                parse_error: Some(e.to_string()),
            },
        }
    }

    /// Convert into inferred records.
    ///
    /// Unparseable text is an error. JSON of the wrong shape is skipped and
    /// yields no records.
    pub fn into_records(self) -> Result<Vec<FieldMap>, LlmError> {
        match self {
            Self::Object(fields) => Ok(vec![fields]),
            Self::ArrayOfObjects(records) => Ok(records),
            Self::Malformed {
                parse_error: Some(e),
                ..
            } => Err(LlmError::InvalidJson(e)),
            Self::Malformed {
                raw,
                parse_error: None,
            } => {
                warn!("Skipping reply that is neither an object nor an array: {}", raw);
                Ok(Vec::new())
            }
        }
    }
}

fn object_to_fields(object: serde_json::Map<String, Value>) -> FieldMap {
    object
        .into_iter()
        .map(|(key, value)| (key, value_to_cell(value)))
        .collect()
}

/// Render a JSON value as a table cell.
fn value_to_cell(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strip_code_fences() {
        let reply = "```json\n{\"Total\": \"54.20\"}\n```";
        assert_eq!(strip_code_fences(reply), "{\"Total\": \"54.20\"}");

        let reply = "```\n[{\"a\": 1}]\n```\n";
        assert_eq!(strip_code_fences(reply), "[{\"a\": 1}]");

        assert_eq!(strip_code_fences("  {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn test_classify_object_keeps_key_order() {
        let reply = InferredReply::classify(r#"{"Vendor": "ACME", "Date": "2024-01-01", "Items": 3}"#);
        let InferredReply::Object(fields) = reply else {
            panic!("expected object, got {reply:?}");
        };

        let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Vendor", "Date", "Items"]);
        assert_eq!(fields["Items"], "3");
    }

    #[test]
    fn test_classify_array_skips_non_objects() {
        let reply = InferredReply::classify(r#"[{"Total": "1.00"}, "noise", 5, {"Total": null}]"#);

        assert_eq!(
            reply,
            InferredReply::ArrayOfObjects(vec![
                [("Total".to_string(), "1.00".to_string())].into_iter().collect(),
                [("Total".to_string(), String::new())].into_iter().collect(),
            ])
        );
    }

    #[test]
    fn test_classify_malformed() {
        assert!(matches!(
            InferredReply::classify("Sure! The total is 5."),
            InferredReply::Malformed { raw, parse_error: Some(_) } if raw == "Sure! The total is 5."
        ));
        assert_eq!(
            InferredReply::classify("42"),
            InferredReply::Malformed {
                raw: "42".to_string(),
                parse_error: None,
            }
        );
    }

    #[test]
    fn test_unparseable_reply_is_an_error() {
        let err = InferredReply::classify("not json").into_records().unwrap_err();
        assert!(matches!(err, LlmError::InvalidJson(_)));
    }

    #[test]
    fn test_wrong_shape_yields_no_records() {
        for reply in ["42", "\"text\"", "true", "null"] {
            let records = InferredReply::classify(reply).into_records().unwrap();
            assert!(records.is_empty(), "reply {reply} produced records");
        }
    }
}
