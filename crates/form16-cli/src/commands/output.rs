//! Output formatting shared by the commands.

use form16_core::models::form16::ExtractionResult;
use form16_core::report::Report;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text report
    Text,
}

impl OutputFormat {
    /// File extension for files written in this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Format an extraction result. JSON and CSV use the field keys.
pub fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(result.iter().map(|(field, value)| (field.key(), value))),
        OutputFormat::Text => Ok(Report::from_result(result).render_text()),
    }
}

/// Format a report. JSON keeps the section structure, CSV and text use labels.
pub fn format_report(report: &Report, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => format_csv(report.rows().map(|r| (r.label.as_str(), r.value.as_str()))),
        OutputFormat::Text => Ok(report.render_text()),
    }
}

fn format_csv<'a>(rows: impl Iterator<Item = (&'a str, &'a str)>) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["Field", "Value"])?;
    for (field, value) in rows {
        wtr.write_record([field, value])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}
