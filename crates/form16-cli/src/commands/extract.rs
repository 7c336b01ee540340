//! Extract command - pull Form 16 fields from a single file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use form16_core::extraction::FieldEngine;
use form16_core::pdf::{render_summary_pdf, SummaryOptions};
use form16_core::report::Report;

use super::input::read_source;
use super::load_config;
use super::output::{format_result, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF or linearized text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Report suspicious identifiers and missing fields
    #[arg(long)]
    validate: bool,

    /// Also write a summary PDF to this path
    #[arg(long)]
    summary_pdf: Option<PathBuf>,

    /// Show extraction statistics
    #[arg(long)]
    show_stats: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Reading text...");
    pb.set_position(10);
    let source = read_source(&args.input, &config)?;

    pb.set_message("Extracting fields...");
    pb.set_position(50);
    let engine = FieldEngine::from_config(&config.extraction);
    let detailed = engine.extract_detailed(&source.text);
    let result = &detailed.result;

    pb.set_position(100);
    pb.finish_with_message("Done");

    if !result.looks_like_form16() {
        eprintln!(
            "{} No Form 16 fields were found; is {} a Form 16 certificate?",
            style("!").yellow(),
            args.input.display()
        );
    }

    if args.validate {
        let issues = result.issues();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    let output = format_result(result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if let Some(pdf_path) = &args.summary_pdf {
        let mut options = SummaryOptions::from_config(&config.report)
            .with_generated_on(chrono::Local::now().date_naive());
        if config.report.include_raw_sample {
            options = options.with_raw_text(&source.text, config.report.raw_sample_lines);
        }

        let bytes = render_summary_pdf(&Report::from_result(result), &options)?;
        fs::write(pdf_path, bytes)?;
        println!(
            "{} Summary PDF written to {}",
            style("✓").green(),
            pdf_path.display()
        );
    }

    if args.show_stats {
        println!();
        println!(
            "{} Fields found: {}/{}",
            style("ℹ").blue(),
            result.found_count(),
            form16_core::Field::ALL.len()
        );
        println!(
            "{} Pages: {}, text: {} bytes{}",
            style("ℹ").blue(),
            source.pages,
            source.text.len(),
            if detailed.truncated { " (truncated)" } else { "" }
        );
        println!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            detailed.processing_time_ms
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
