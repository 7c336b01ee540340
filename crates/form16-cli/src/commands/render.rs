//! Render command - turn a field mapping into a report.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use serde_json::{Map, Value};

use form16_core::report::Report;

use super::output::{format_report, OutputFormat};

/// Arguments for the render command.
#[derive(Args)]
pub struct RenderArgs {
    /// JSON file holding the field mapping
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: RenderArgs) -> anyhow::Result<()> {
    let map = read_mapping(&args.input)?;
    let report = Report::from_mapping(&map);
    let output = format_report(&report, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Report written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    Ok(())
}

/// Read a JSON object from a file.
pub(crate) fn read_mapping(path: &Path) -> anyhow::Result<Map<String, Value>> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let content = fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&content)? {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("Expected a JSON object in {}", path.display()),
    }
}
