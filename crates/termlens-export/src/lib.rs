//! Export artifact generation: turn a canonical comparison result into a
//! downloadable PDF report or XLSX workbook. Pure in-memory formatting of
//! already-fetched data; no network access.

mod report;
mod workbook;

use thiserror::Error;

pub use report::generate_document_report;
pub use workbook::generate_spreadsheet_report;

/// A generated export: a byte stream plus the filename to save it under.
///
/// Handed to the caller's file-save mechanism and discarded; never retained.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum ExportError {
    /// An export needs a document name to build its filename and header.
    #[error("a document name is required for export")]
    InvalidExportRequest,

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("spreadsheet generation failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

#[cfg(test)]
pub(crate) mod fixtures {
    use termlens_core::{Clause, ClauseMatch, ClauseMismatch, ComparisonResult, Recommendation};

    fn clause(number: i64, text: &str) -> Clause {
        Clause {
            number,
            text: text.to_string(),
            category: "Legal".into(),
            importance: "High".into(),
        }
    }

    /// Two matches (0.95, 0.60), one missing-clause mismatch, one
    /// recommendation.
    pub fn sample_result() -> ComparisonResult {
        ComparisonResult {
            id: "17".into(),
            match_percentage: 66.7,
            risk_score: 42.0,
            matches: vec![
                ClauseMatch {
                    expected: clause(1, "Payment Terms: all invoices are due within 30 days"),
                    actual: clause(1, "Payment Terms: all invoices are due within 30 days"),
                    similarity: 0.95,
                },
                ClauseMatch {
                    expected: clause(2, "Termination: either party may terminate on 30 days notice"),
                    actual: clause(3, "Termination: termination requires 90 days notice"),
                    similarity: 0.60,
                },
            ],
            mismatches: vec![ClauseMismatch {
                expected: clause(3, "Indemnification without any colon in the text"),
                actual: None,
                similarity: 0.0,
            }],
            recommendations: vec![Recommendation {
                text: "Add missing critical clause: Indemnification".into(),
                category: "critical_clause".into(),
                priority: "High".into(),
            }],
        }
    }

    /// A comparison with every list empty.
    pub fn empty_result() -> ComparisonResult {
        ComparisonResult {
            id: "2".into(),
            match_percentage: 0.0,
            risk_score: 0.0,
            matches: vec![],
            mismatches: vec![],
            recommendations: vec![],
        }
    }
}
