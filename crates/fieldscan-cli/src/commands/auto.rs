//! Auto command - parse every OCR line as a line item.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use tracing::info;

use fieldscan_core::extraction::{Flow, autonomous_table};

use super::common::{OutputFormat, load_config, read_document_lines, validate_input, write_output};

/// Arguments for the auto command.
#[derive(Args)]
pub struct AutoArgs {
    /// Input file (.png, .jpg, .jpeg or .pdf)
    input: PathBuf,

    /// Output file
    #[arg(default_value = "output.csv")]
    output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,
}

pub async fn run(args: AutoArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    validate_input(&args.input)?;
    let config = load_config(config_path)?;

    let lines = read_document_lines(&args.input, Flow::Autonomous, &config).await?;
    let table = autonomous_table(&lines)?;
    write_output(&table, &args.output, args.format)?;

    info!("Completed in {:.2?}", start.elapsed());
    Ok(())
}
