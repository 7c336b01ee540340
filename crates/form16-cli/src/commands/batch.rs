//! Batch processing command for multiple Form 16 files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, error, warn};

use form16_core::extraction::FieldEngine;
use form16_core::models::config::Form16Config;
use form16_core::models::form16::{ExtractionResult, Field};

use super::input::{is_supported, read_source};
use super::load_config;
use super::output::{format_result, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching .pdf/.txt files
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    result: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_supported(p))
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.jobs.max(1))
        .build()?;
    let engine = FieldEngine::from_config(&config.extraction);

    let results: Vec<FileResult> = pool.install(|| {
        files
            .par_iter()
            .map(|path| {
                let file_start = Instant::now();
                let outcome = process_single_file(path, &engine, &config);
                overall_pb.inc(1);

                let processing_time_ms = file_start.elapsed().as_millis() as u64;
                match outcome {
                    Ok(result) => FileResult {
                        path: path.clone(),
                        result: Some(result),
                        error: None,
                        processing_time_ms,
                    },
                    Err(e) => FileResult {
                        path: path.clone(),
                        result: None,
                        error: Some(e.to_string()),
                        processing_time_ms,
                    },
                }
            })
            .collect()
    });

    overall_pb.finish_with_message("Complete");

    for failed in results.iter().filter(|r| r.error.is_some()) {
        let message = failed.error.as_deref().unwrap_or("unknown error");
        if args.continue_on_error {
            warn!("Failed to process {}: {}", failed.path.display(), message);
        } else {
            error!("Failed to process {}: {}", failed.path.display(), message);
            anyhow::bail!("Processing failed for {}: {}", failed.path.display(), message);
        }
    }

    let successful: Vec<_> = results.iter().filter(|r| r.result.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    for file in &successful {
        if let (Some(result), Some(output_dir)) = (&file.result, &args.output_dir) {
            let output_name = file
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("form16");

            let output_path = output_dir.join(format!("{}.{}", output_name, args.format.extension()));
            fs::write(&output_path, format_result(result, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for file in &failed {
            println!(
                "  - {}: {}",
                file.path.display(),
                file.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(
    path: &Path,
    engine: &FieldEngine,
    config: &Form16Config,
) -> anyhow::Result<ExtractionResult> {
    let source = read_source(path, config)?;
    if source.text.trim().is_empty() {
        anyhow::bail!("No text found in {}", path.display());
    }

    let result = engine.extract_detailed(&source.text).result;
    if !result.looks_like_form16() {
        warn!("{}: no Form 16 fields found", path.display());
    }

    Ok(result)
}

/// One row per file: status, found count, every field, timing and error.
fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status", "found_fields"];
    header.extend(Field::ALL.iter().map(|f| f.key()));
    header.extend(["processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for file in results {
        let filename = file
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        let mut record = vec![filename];
        match &file.result {
            Some(result) => {
                record.push("success".to_string());
                record.push(result.found_count().to_string());
                record.extend(result.iter().map(|(_, v)| v.to_string()));
            }
            None => {
                record.push("error".to_string());
                record.push(String::new());
                record.extend(Field::ALL.iter().map(|_| String::new()));
            }
        }
        record.push(file.processing_time_ms.to_string());
        record.push(file.error.clone().unwrap_or_default());

        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
