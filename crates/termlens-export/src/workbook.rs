//! Multi-sheet XLSX workbook generation.

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use tracing::debug;

use termlens_core::{ComparisonResult, format_percent};

use crate::{ExportArtifact, ExportError};

/// Shown in the Discrepancies sheet when the contract has no counterpart
/// clause at all.
const MISSING_CLAUSE_PLACEHOLDER: &str = "Not found in contract";

/// Build the four-sheet XLSX workbook for one comparison: Overview,
/// Recommendations, Matching Clauses, Discrepancies.
///
/// Filename is `<document_name>-analysis.xlsx`. Empty lists produce sheets
/// with headers only.
pub fn generate_spreadsheet_report(
    result: &ComparisonResult,
    document_name: &str,
) -> Result<ExportArtifact, ExportError> {
    let name = document_name.trim();
    if name.is_empty() {
        return Err(ExportError::InvalidExportRequest);
    }

    let mut workbook = Workbook::new();
    write_overview(workbook.add_worksheet(), result, name)?;
    write_recommendations(workbook.add_worksheet(), result)?;
    write_matches(workbook.add_worksheet(), result)?;
    write_mismatches(workbook.add_worksheet(), result)?;

    let bytes = workbook.save_to_buffer()?;
    debug!(bytes = bytes.len(), document = name, "generated XLSX report");
    Ok(ExportArtifact {
        filename: format!("{name}-analysis.xlsx"),
        bytes,
    })
}

fn write_overview(
    sheet: &mut Worksheet,
    result: &ComparisonResult,
    name: &str,
) -> Result<(), XlsxError> {
    sheet.set_name("Overview")?;
    sheet.write_string(0, 0, "Contract Analysis Report")?;
    sheet.write_string(1, 0, "Document")?;
    sheet.write_string(1, 1, name)?;
    sheet.write_string(2, 0, "Match Rate")?;
    sheet.write_string(2, 1, format_percent(result.match_percentage))?;
    sheet.write_string(3, 0, "Risk Score")?;
    sheet.write_string(3, 1, format_percent(result.risk_score))?;
    sheet.write_string(5, 0, "Total Clauses")?;
    sheet.write_number(5, 1, result.total_clauses() as f64)?;
    sheet.write_string(6, 0, "Matching Clauses")?;
    sheet.write_number(6, 1, result.matches.len() as f64)?;
    sheet.write_string(7, 0, "Discrepancies")?;
    sheet.write_number(7, 1, result.mismatches.len() as f64)?;
    Ok(())
}

fn write_recommendations(
    sheet: &mut Worksheet,
    result: &ComparisonResult,
) -> Result<(), XlsxError> {
    sheet.set_name("Recommendations")?;
    write_header(sheet, &["Category", "Priority", "Recommendation"])?;
    for (i, rec) in result.recommendations.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, rec.category.as_str())?;
        sheet.write_string(row, 1, rec.priority.as_str())?;
        sheet.write_string(row, 2, rec.text.as_str())?;
    }
    Ok(())
}

fn write_matches(sheet: &mut Worksheet, result: &ComparisonResult) -> Result<(), XlsxError> {
    sheet.set_name("Matching Clauses")?;
    write_header(sheet, &["Clause", "Category", "Importance", "Similarity"])?;
    for (i, m) in result.matches.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, m.expected.title())?;
        sheet.write_string(row, 1, m.expected.category.as_str())?;
        sheet.write_string(row, 2, m.expected.importance.as_str())?;
        sheet.write_string(row, 3, format_percent(m.similarity * 100.0))?;
    }
    Ok(())
}

fn write_mismatches(sheet: &mut Worksheet, result: &ComparisonResult) -> Result<(), XlsxError> {
    sheet.set_name("Discrepancies")?;
    write_header(
        sheet,
        &[
            "Clause",
            "Category",
            "Importance",
            "Status",
            "Expected Text",
            "Actual Text",
        ],
    )?;
    for (i, mismatch) in result.mismatches.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, mismatch.expected.title())?;
        sheet.write_string(row, 1, mismatch.expected.category.as_str())?;
        sheet.write_string(row, 2, mismatch.expected.importance.as_str())?;
        sheet.write_string(row, 3, mismatch.status())?;
        sheet.write_string(row, 4, mismatch.expected.text.as_str())?;
        let actual_text = mismatch
            .actual
            .as_ref()
            .map(|c| c.text.as_str())
            .unwrap_or(MISSING_CLAUSE_PLACEHOLDER);
        sheet.write_string(row, 5, actual_text)?;
    }
    Ok(())
}

fn write_header(sheet: &mut Worksheet, titles: &[&str]) -> Result<(), XlsxError> {
    for (col, title) in titles.iter().enumerate() {
        sheet.write_string(0, col as u16, *title)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{empty_result, sample_result};
    use calamine::{Data, DataType, Range, Reader, Xlsx};
    use std::io::Cursor;

    fn open(artifact: &ExportArtifact) -> Xlsx<Cursor<Vec<u8>>> {
        Xlsx::new(Cursor::new(artifact.bytes.clone())).expect("generated workbook must parse")
    }

    fn labelled_number(range: &Range<Data>, label: &str) -> Option<f64> {
        range
            .rows()
            .find(|row| row.first().and_then(|c| c.get_string()) == Some(label))
            .and_then(|row| row.get(1))
            .and_then(|cell| cell.as_f64())
    }

    fn labelled_string(range: &Range<Data>, label: &str) -> Option<String> {
        range
            .rows()
            .find(|row| row.first().and_then(|c| c.get_string()) == Some(label))
            .and_then(|row| row.get(1))
            .and_then(|cell| cell.get_string())
            .map(str::to_string)
    }

    #[test]
    fn workbook_has_the_four_sheets() {
        let artifact = generate_spreadsheet_report(&sample_result(), "vendor-agreement").unwrap();
        assert_eq!(artifact.filename, "vendor-agreement-analysis.xlsx");
        let workbook = open(&artifact);
        let sheet_names = workbook.sheet_names();
        let names: Vec<&str> = sheet_names.iter().map(String::as_str).collect();
        assert_eq!(
            names,
            ["Overview", "Recommendations", "Matching Clauses", "Discrepancies"]
        );
    }

    #[test]
    fn overview_reports_summary_counts() {
        // 2 matches + 1 mismatch → total 3 / matching 2 / discrepancies 1.
        let artifact = generate_spreadsheet_report(&sample_result(), "vendor-agreement").unwrap();
        let range = open(&artifact).worksheet_range("Overview").unwrap();
        assert_eq!(labelled_number(&range, "Total Clauses"), Some(3.0));
        assert_eq!(labelled_number(&range, "Matching Clauses"), Some(2.0));
        assert_eq!(labelled_number(&range, "Discrepancies"), Some(1.0));
        assert_eq!(labelled_string(&range, "Match Rate").as_deref(), Some("67%"));
        assert_eq!(labelled_string(&range, "Risk Score").as_deref(), Some("42%"));
    }

    #[test]
    fn match_rows_carry_title_and_similarity_percentage() {
        let artifact = generate_spreadsheet_report(&sample_result(), "vendor-agreement").unwrap();
        let range = open(&artifact).worksheet_range("Matching Clauses").unwrap();
        let rows: Vec<_> = range.rows().collect();
        assert_eq!(rows.len(), 3); // header + 2 matches
        assert_eq!(rows[1][0].get_string(), Some("Payment Terms"));
        assert_eq!(rows[1][3].get_string(), Some("95%"));
        assert_eq!(rows[2][0].get_string(), Some("Termination"));
        assert_eq!(rows[2][3].get_string(), Some("60%"));
    }

    #[test]
    fn missing_clause_row_uses_placeholder_and_full_title() {
        let artifact = generate_spreadsheet_report(&sample_result(), "vendor-agreement").unwrap();
        let range = open(&artifact).worksheet_range("Discrepancies").unwrap();
        let rows: Vec<_> = range.rows().collect();
        assert_eq!(rows.len(), 2);
        // Colon-less clause text: the whole text is the title.
        assert_eq!(
            rows[1][0].get_string(),
            Some("Indemnification without any colon in the text")
        );
        assert_eq!(rows[1][3].get_string(), Some("Missing"));
        assert_eq!(rows[1][5].get_string(), Some(MISSING_CLAUSE_PLACEHOLDER));
    }

    #[test]
    fn empty_result_produces_header_only_sheets() {
        let artifact = generate_spreadsheet_report(&empty_result(), "empty").unwrap();
        let mut workbook = open(&artifact);
        let recs = workbook.worksheet_range("Recommendations").unwrap();
        assert_eq!(recs.rows().count(), 1);
        let range = workbook.worksheet_range("Overview").unwrap();
        assert_eq!(labelled_number(&range, "Total Clauses"), Some(0.0));
    }

    #[test]
    fn empty_document_name_is_rejected() {
        assert!(matches!(
            generate_spreadsheet_report(&sample_result(), "  "),
            Err(ExportError::InvalidExportRequest)
        ));
    }
}
