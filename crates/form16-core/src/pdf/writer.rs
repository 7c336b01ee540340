//! Summary document generation with lopdf.

use chrono::NaiveDate;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use tracing::debug;

use super::Result;
use crate::error::PdfError;
use crate::models::config::ReportConfig;
use crate::report::Report;

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN_LEFT: f32 = 50.0;
const VALUE_COLUMN: f32 = 270.0;
const TOP: f32 = 792.0;
const BOTTOM: f32 = 50.0;
const MAX_SAMPLE_CHARS: usize = 110;

/// Regular, bold, oblique and monospace faces, in resource order.
const FONTS: [(&str, &str); 4] = [
    ("F1", "Helvetica"),
    ("F2", "Helvetica-Bold"),
    ("F3", "Helvetica-Oblique"),
    ("F4", "Courier"),
];

/// What goes into a summary document besides the report itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOptions {
    pub title: String,
    pub footer: String,
    pub generated_on: Option<NaiveDate>,
    /// Lines of source text shown after the report; empty to omit.
    pub raw_sample: Vec<String>,
}

impl SummaryOptions {
    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            title: config.title.clone(),
            footer: config.footer.clone(),
            generated_on: None,
            raw_sample: Vec::new(),
        }
    }

    pub fn with_generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = Some(date);
        self
    }

    /// Keep the first `lines` non-blank lines of `text` as the raw sample.
    pub fn with_raw_text(mut self, text: &str, lines: usize) -> Self {
        self.raw_sample = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .take(lines)
            .map(|l| l.chars().take(MAX_SAMPLE_CHARS).collect())
            .collect();
        self
    }
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self::from_config(&ReportConfig::default())
    }
}

/// Lays text lines top to bottom, starting a new page when the cursor
/// passes the bottom margin.
struct PageLayout {
    pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    y: f32,
}

impl PageLayout {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Vec::new(),
            y: TOP,
        }
    }

    fn ensure_room(&mut self) {
        if self.y < BOTTOM {
            self.break_page();
        }
    }

    fn break_page(&mut self) {
        let ops = std::mem::take(&mut self.current);
        self.pages.push(ops);
        self.y = TOP;
    }

    fn text(&mut self, font: &str, size: f32, x: f32, text: &str) {
        self.current.push(Operation::new("BT", vec![]));
        self.current
            .push(Operation::new("Tf", vec![font.into(), size.into()]));
        self.current
            .push(Operation::new("Td", vec![x.into(), self.y.into()]));
        self.current
            .push(Operation::new("Tj", vec![Object::string_literal(pdf_text(text))]));
        self.current.push(Operation::new("ET", vec![]));
    }

    /// One line of text, then move the cursor down by `advance`.
    fn line(&mut self, font: &str, size: f32, text: &str, advance: f32) {
        self.ensure_room();
        self.text(font, size, MARGIN_LEFT, text);
        self.y -= advance;
    }

    fn row(&mut self, label: &str, value: &str) {
        self.ensure_room();
        self.text("F2", 10.0, MARGIN_LEFT + 10.0, label);
        self.text("F1", 10.0, VALUE_COLUMN, value);
        self.y -= 15.0;
    }

    fn gap(&mut self, amount: f32) {
        self.y -= amount;
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.break_page();
        }
        self.pages
    }
}

/// Bytes for a string literal in the standard fonts; non-ASCII becomes `?`.
fn pdf_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c as u8 } else { b'?' })
        .collect()
}

/// Render a report as an A4 summary PDF.
pub fn render_summary_pdf(report: &Report, options: &SummaryOptions) -> Result<Vec<u8>> {
    let mut layout = PageLayout::new();

    layout.line("F2", 16.0, &options.title, 20.0);
    if let Some(date) = options.generated_on {
        layout.line("F3", 9.0, &format!("Generated on {}", date.format("%Y-%m-%d")), 10.0);
    }
    layout.gap(14.0);

    for (i, section) in report.sections.iter().enumerate() {
        layout.line("F2", 12.0, &format!("{}. {}", i + 1, section.title), 18.0);
        for row in &section.rows {
            layout.row(&row.label, &row.value);
        }
        layout.gap(10.0);
    }

    if !options.raw_sample.is_empty() {
        layout.line("F2", 12.0, "Raw Text Sample", 16.0);
        for line in &options.raw_sample {
            layout.line("F4", 8.0, line, 11.0);
        }
        layout.gap(10.0);
    }

    if !options.footer.is_empty() {
        layout.line("F3", 8.0, &options.footer, 12.0);
    }

    let pages = layout.finish();
    debug!("Summary document laid out on {} pages", pages.len());
    build_document(pages)
}

fn build_document(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for (name, base) in FONTS {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => base,
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(name, Object::Reference(font_id));
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| PdfError::Build(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH),
                Object::Integer(PAGE_HEIGHT),
            ],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| PdfError::Build(e.to_string()))?;
    Ok(buffer)
}
