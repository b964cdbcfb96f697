//! Prompt construction for field inference.

/// Build the field-inference prompt for `fields` over `document_text`.
///
/// `extra_instruction` is appended after the format instructions when set.
pub fn build_prompt<F: AsRef<str>>(
    fields: &[F],
    document_text: &str,
    extra_instruction: Option<&str>,
) -> String {
    let field_list = fields
        .iter()
        .map(|f| f.as_ref())
        .collect::<Vec<_>>()
        .join(", ");

    let mut prompt = format!(
        "Given the OCR-extracted text of a document, extract only the following fields: {field_list}.\n\n"
    );
    prompt.push_str("Please return the extracted fields in the following format:\n");
    prompt.push_str("{\n");
    prompt.push_str("  \"Field Name\": \"Value\",\n");
    prompt.push_str("  \"Field Name 2\": \"Value\",\n");
    prompt.push_str("  ...\n");
    prompt.push_str("}\n\n");
    prompt.push_str(
        "Do not include any extra explanations, formatting, or content beyond the JSON response.\n\n",
    );

    if let Some(extra) = extra_instruction.map(str::trim).filter(|s| !s.is_empty()) {
        prompt.push_str(extra);
        prompt.push_str("\n\n");
    }

    prompt.push_str("Document text:\n");
    prompt.push_str(document_text);
    prompt
}
