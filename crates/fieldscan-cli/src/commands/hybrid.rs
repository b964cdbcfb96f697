//! Hybrid command - label lookup plus inferred fields from a text model.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use tracing::info;

use fieldscan_core::error::ExtractionError;
use fieldscan_core::extraction::{FieldMatcher, Flow, hybrid_table};
use fieldscan_core::llm::GeminiClient;

use super::common::{OutputFormat, load_config, read_document_lines, validate_input, write_output};

/// Arguments for the hybrid command.
#[derive(Args)]
pub struct HybridArgs {
    /// Input file (.png, .jpg, .jpeg or .pdf)
    input: PathBuf,

    /// Field labels (comma-separated lists accepted) followed by the output file
    #[arg(num_args = 1.., required = true)]
    fields_and_output: Vec<String>,

    /// Extra instruction appended to the model prompt
    #[arg(short, long)]
    prompt: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,
}

impl HybridArgs {
    /// Field labels and the output path.
    fn split(&self) -> (Vec<String>, PathBuf) {
        match self.fields_and_output.split_last() {
            Some((output, fields)) => (split_fields(fields), PathBuf::from(output)),
            None => (Vec::new(), PathBuf::from("output.csv")),
        }
    }
}

/// Split `Total,Date` style arguments into separate labels.
fn split_fields(args: &[String]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.split(','))
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect()
}

pub async fn run(args: HybridArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let (fields, output) = args.split();

    validate_input(&args.input)?;
    if fields.is_empty() {
        return Err(ExtractionError::NoFields.into());
    }

    let config = load_config(config_path)?;
    let client = GeminiClient::from_env(&config.llm)?;

    let lines = read_document_lines(&args.input, Flow::Hybrid, &config).await?;
    let matcher = FieldMatcher::new().with_na_sentinel(&config.extraction.na_sentinel);
    let table = hybrid_table(&lines, fields.as_slice(), &matcher, &client, args.prompt.as_deref()).await?;
    write_output(&table, &output, args.format)?;

    info!("Completed in {:.2?}", start.elapsed());
    Ok(())
}
