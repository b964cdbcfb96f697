//! Fields command - look up caller-specified labels.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use tracing::info;

use fieldscan_core::extraction::{FieldMatcher, Flow, targeted_table};

use super::common::{OutputFormat, load_config, read_document_lines, validate_input, write_output};

/// Arguments for the fields command.
#[derive(Args)]
pub struct FieldsArgs {
    /// Input file (.png, .jpg, .jpeg or .pdf)
    input: PathBuf,

    /// Field labels followed by the output file
    #[arg(num_args = 2.., required = true)]
    fields_and_output: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,
}

impl FieldsArgs {
    /// Field labels and the output path.
    fn split(&self) -> (&[String], PathBuf) {
        match self.fields_and_output.split_last() {
            Some((output, fields)) => (fields, PathBuf::from(output)),
            None => (&[], PathBuf::from("output.csv")),
        }
    }
}

pub async fn run(args: FieldsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let (fields, output) = args.split();
    validate_input(&args.input)?;
    let config = load_config(config_path)?;

    let lines = read_document_lines(&args.input, Flow::Targeted, &config).await?;
    let matcher = FieldMatcher::new().with_na_sentinel(&config.extraction.na_sentinel);
    let table = targeted_table(&lines, fields, &matcher)?;
    write_output(&table, &output, args.format)?;

    info!("Completed in {:.2?}", start.elapsed());
    Ok(())
}
