//! Shared plumbing for the extraction commands.

use std::path::Path;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use fieldscan_core::error::DocumentError;
use fieldscan_core::extraction::Flow;
use fieldscan_core::models::config::FieldscanConfig;
use fieldscan_core::{DocumentReader, PdftoppmRasterizer, ResultTable, SourceDocument, create_backend};

use super::config::default_config_path;

/// Output file format.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated values with a header row
    #[default]
    Csv,
    /// JSON array of row objects
    Json,
}

/// Load the configuration from `config_path`, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FieldscanConfig> {
    if let Some(path) = config_path {
        return Ok(FieldscanConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading configuration from {}", default_path.display());
        Ok(FieldscanConfig::from_file(&default_path)?)
    } else {
        Ok(FieldscanConfig::default())
    }
}

/// Check that `input` exists and has a supported extension.
pub fn validate_input(input: &Path) -> anyhow::Result<()> {
    match SourceDocument::validate(input) {
        Ok(_) => Ok(()),
        Err(DocumentError::UnsupportedFormat(_)) => {
            anyhow::bail!("Supported formats: .png, .jpg, .jpeg, .pdf")
        }
        Err(e) => Err(e.into()),
    }
}

/// OCR every page of `input` with the preprocessing of `flow`.
///
/// Rasterization and OCR run external processes, so they are moved to the
/// blocking thread pool.
pub async fn read_document_lines(
    input: &Path,
    flow: Flow,
    config: &FieldscanConfig,
) -> anyhow::Result<Vec<String>> {
    let input = input.to_path_buf();
    let config = config.clone();

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message("Loading document...");

    let progress = pb.clone();
    let result = tokio::task::spawn_blocking(move || -> anyhow::Result<Vec<String>> {
        let document = SourceDocument::open(&input)?;
        info!("Processing file: {}", input.display());

        let rasterizer = PdftoppmRasterizer::from_config(&config.pdf);
        let ocr = create_backend(&config.ocr)?;

        let lines = DocumentReader::new(&rasterizer, ocr.as_ref())
            .with_preprocessing(flow.preprocessing())
            .with_options(flow.ocr_options(&config.ocr))
            .read_lines_with_progress(&document, |page, total| {
                progress.set_message(format!("Running OCR on page {}/{}", page, total));
            })?;
        Ok(lines)
    })
    .await;

    pb.finish_and_clear();
    result?
}

/// Write `table` to `output` in `format`.
pub fn write_output(table: &ResultTable, output: &Path, format: OutputFormat) -> anyhow::Result<()> {
    debug!("Result table before saving:\n{}", table);
    info!("Writing {} rows to {}", table.len(), output.display());

    let written = match format {
        OutputFormat::Csv => table.save_csv(output).map_err(anyhow::Error::from),
        OutputFormat::Json => serde_json::to_string_pretty(&table.to_json())
            .map_err(anyhow::Error::from)
            .and_then(|json| std::fs::write(output, json).map_err(anyhow::Error::from)),
    };

    if let Err(e) = written {
        anyhow::bail!("Failed to save output to {}: {}", output.display(), e);
    }

    println!(
        "{} Saved structured output to {}",
        style("✓").green(),
        output.display()
    );
    Ok(())
}
