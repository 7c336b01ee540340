//! Summary command - regenerate a summary PDF from a mapping or a certificate.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use form16_core::extraction::FieldEngine;
use form16_core::pdf::{render_summary_pdf, SummaryOptions};
use form16_core::report::Report;

use super::input::{extension, read_source};
use super::load_config;
use super::render::read_mapping;

/// Arguments for the summary command.
#[derive(Args)]
pub struct SummaryArgs {
    /// Field mapping (.json) or certificate (.pdf, .txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Output PDF path
    #[arg(short, long, required = true)]
    output: PathBuf,

    /// Include a sample of the source text (certificate input only)
    #[arg(long)]
    raw_sample: bool,
}

pub async fn run(args: SummaryArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let (report, raw_text) = if extension(&args.input) == "json" {
        (Report::from_mapping(&read_mapping(&args.input)?), None)
    } else {
        let source = read_source(&args.input, &config)?;
        let result = FieldEngine::from_config(&config.extraction).extract_detailed(&source.text).result;
        (Report::from_result(&result), Some(source.text))
    };

    let mut options = SummaryOptions::from_config(&config.report)
        .with_generated_on(chrono::Local::now().date_naive());
    if args.raw_sample || config.report.include_raw_sample {
        match &raw_text {
            Some(text) => options = options.with_raw_text(text, config.report.raw_sample_lines),
            None => info!("No source text available for the raw sample"),
        }
    }

    let bytes = render_summary_pdf(&report, &options)?;
    fs::write(&args.output, bytes)?;

    println!(
        "{} Summary PDF written to {}",
        style("✓").green(),
        args.output.display()
    );

    Ok(())
}
