//! Paginated PDF report generation.
//!
//! Lines are written top-down from a cursor; whenever the next line would
//! fall below the bottom margin a fresh page is started before writing it.

use chrono::Utc;
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use tracing::debug;

use termlens_core::{ComparisonResult, format_percent};

use crate::{ExportArtifact, ExportError};

// A4 portrait.
const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const MARGIN_MM: f64 = 20.0;

const TITLE_SIZE: f64 = 18.0;
const HEADING_SIZE: f64 = 13.0;
const BODY_SIZE: f64 = 11.0;

/// Character budget for one wrapped line of body text on the page width.
const WRAP_WIDTH: usize = 90;

/// Build the human-readable PDF report for one comparison.
///
/// Filename is `<document_name>-analysis.pdf`. Missing sections render
/// empty; the only rejected input is an empty document name.
pub fn generate_document_report(
    result: &ComparisonResult,
    document_name: &str,
) -> Result<ExportArtifact, ExportError> {
    let name = document_name.trim();
    if name.is_empty() {
        return Err(ExportError::InvalidExportRequest);
    }

    let (doc, page, layer) = PdfDocument::new(
        "Contract Analysis Report",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_err)?;

    let mut writer = PageWriter {
        doc: &doc,
        layer: doc.get_page(page).get_layer(layer),
        y: PAGE_HEIGHT_MM - MARGIN_MM,
    };

    writer.write_line("Contract Analysis Report", TITLE_SIZE, &bold);
    writer.gap(2.0);
    writer.write_line(&format!("Document: {name}"), BODY_SIZE, &regular);
    writer.write_line(
        &format!("Generated: {}", Utc::now().format("%Y-%m-%d %H:%M UTC")),
        BODY_SIZE,
        &regular,
    );
    writer.write_line(
        &format!("Match Rate: {}", format_percent(result.match_percentage)),
        BODY_SIZE,
        &regular,
    );
    writer.write_line(
        &format!("Risk Score: {}", format_percent(result.risk_score)),
        BODY_SIZE,
        &regular,
    );

    writer.section("Recommendations", &bold);
    for rec in &result.recommendations {
        let entry = format!("[{}/{}] {}", rec.category, rec.priority, rec.text);
        for line in wrap_text(&entry, WRAP_WIDTH) {
            writer.write_line(&line, BODY_SIZE, &regular);
        }
        writer.gap(1.0);
    }

    writer.section("Matching Clauses", &bold);
    for m in &result.matches {
        writer.write_line(
            &format!(
                "{} ({})",
                m.expected.title(),
                format_percent(m.similarity * 100.0)
            ),
            BODY_SIZE,
            &bold,
        );
        if let Some(body) = m.expected.body() {
            for line in wrap_text(body, WRAP_WIDTH) {
                writer.write_line(&format!("    {line}"), BODY_SIZE, &regular);
            }
        }
        writer.gap(1.0);
    }

    writer.section("Discrepancies", &bold);
    for mismatch in &result.mismatches {
        writer.write_line(
            &format!("{} [{}]", mismatch.expected.title(), mismatch.status()),
            BODY_SIZE,
            &bold,
        );
        if let Some(body) = mismatch.expected.body() {
            for line in wrap_text(body, WRAP_WIDTH) {
                writer.write_line(&format!("    {line}"), BODY_SIZE, &regular);
            }
        }
        writer.gap(1.0);
    }

    drop(writer);
    let bytes = doc.save_to_bytes().map_err(pdf_err)?;
    debug!(bytes = bytes.len(), document = name, "generated PDF report");
    Ok(ExportArtifact {
        filename: format!("{name}-analysis.pdf"),
        bytes,
    })
}

fn pdf_err(err: impl std::fmt::Display) -> ExportError {
    ExportError::Pdf(err.to_string())
}

/// Cursor-based line writer over a growing set of pages.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    /// Baseline of the next line, in mm from the page bottom.
    y: f64,
}

impl PageWriter<'_> {
    fn write_line(&mut self, text: &str, size: f64, font: &IndirectFontRef) {
        let advance = size * 0.5;
        if self.y - advance < MARGIN_MM {
            self.new_page();
        }
        self.y -= advance;
        self.layer.use_text(text, size, Mm(MARGIN_MM), Mm(self.y), font);
    }

    fn section(&mut self, heading: &str, font: &IndirectFontRef) {
        self.gap(4.0);
        self.write_line(heading, HEADING_SIZE, font);
        self.gap(1.0);
    }

    fn gap(&mut self, mm: f64) {
        self.y -= mm;
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT_MM - MARGIN_MM;
    }
}

/// Greedy word wrap to a character budget. Words longer than the budget are
/// hard-broken.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        for piece in split_long_word(word, width) {
            let piece_len = piece.chars().count();
            if current_len > 0 && current_len + 1 + piece_len > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(&piece);
            current_len += piece_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_long_word(word: &str, width: usize) -> Vec<String> {
    if word.chars().count() <= width {
        return vec![word.to_string()];
    }
    word.chars()
        .collect::<Vec<_>>()
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
