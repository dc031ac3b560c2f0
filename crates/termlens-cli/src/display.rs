//! Terminal rendering for comparison results, documents, and the dashboard.
//!
//! Renders each comparison as a sectioned, human-readable card; sections
//! with no data are skipped.

use termlens_api::{ActivityEntry, HighRiskContract, Statistics};
use termlens_core::{Clause, ComparisonResult, DocumentDescriptor, format_percent};

const MAX_LIST_ITEMS: usize = 10;
const MAX_TEXT_CHARS: usize = 70;

// ── Comparison card ──

/// Print a single comparison as a vertical card.
pub fn print_result_card(result: &ComparisonResult) {
    println!("=== Comparison {} ===", result.id);
    println!(
        "Match Rate: {}    Risk Score: {}    Clauses: {}",
        format_percent(result.match_percentage),
        format_percent(result.risk_score),
        result.total_clauses()
    );
    println!();

    if !result.matches.is_empty() {
        println!("Matching Clauses ({}):", result.matches.len());
        for m in result.matches.iter().take(MAX_LIST_ITEMS) {
            println!(
                "  {:<50} {}",
                truncated(m.expected.title()),
                format_percent(m.similarity * 100.0)
            );
        }
        print_overflow(result.matches.len());
        println!();
    }

    if !result.mismatches.is_empty() {
        println!("Discrepancies ({}):", result.mismatches.len());
        for mismatch in result.mismatches.iter().take(MAX_LIST_ITEMS) {
            println!(
                "  {:<50} {}",
                truncated(mismatch.expected.title()),
                mismatch.status()
            );
        }
        print_overflow(result.mismatches.len());
        println!();
    }

    if !result.recommendations.is_empty() {
        println!("Recommendations ({}):", result.recommendations.len());
        for rec in result.recommendations.iter().take(MAX_LIST_ITEMS) {
            println!("  [{}/{}] {}", rec.category, rec.priority, truncated(&rec.text));
        }
        print_overflow(result.recommendations.len());
        println!();
    }
}

// ── Documents and clauses ──

pub fn print_document(doc: &DocumentDescriptor) {
    println!(
        "{:<30} id: {}  type: {}  clauses: {}",
        doc.name,
        doc.id,
        doc.document_type,
        doc.clauses.len()
    );
    print_clauses(&doc.clauses);
}

pub fn print_clauses(clauses: &[Clause]) {
    for clause in clauses.iter().take(MAX_LIST_ITEMS) {
        println!(
            "  {:>3}. [{}/{}] {}",
            clause.number,
            clause.category,
            clause.importance,
            truncated(clause.title())
        );
    }
    print_overflow(clauses.len());
}

// ── Dashboard ──

pub fn print_statistics(stats: &Statistics) {
    println!("Statistics");
    println!("  {:<26} {}", "total documents", stats.total_documents);
    println!("  {:<26} {}", "total comparisons", stats.total_comparisons);
    println!("  {:<26} {}", "documents (last 24h)", stats.recent_documents);
    println!(
        "  {:<26} {}",
        "average match",
        format_percent(stats.average_match_percentage)
    );
    println!(
        "  {:<26} {}",
        "average risk",
        format_percent(stats.average_risk_score)
    );
    if !stats.document_distribution.is_empty() {
        let parts: Vec<String> = stats
            .document_distribution
            .iter()
            .map(|(kind, count)| format!("{kind}: {count}"))
            .collect();
        println!("  {:<26} {}", "document types", parts.join(", "));
    }
    println!();
}

pub fn print_recent_activity(entries: &[ActivityEntry]) {
    if entries.is_empty() {
        return;
    }
    println!("Recent Activity ({}):", entries.len());
    for entry in entries.iter().take(MAX_LIST_ITEMS) {
        println!(
            "  {}  {} vs {}  match {}  risk {}",
            entry.date,
            truncated(&entry.source_document),
            truncated(&entry.target_document),
            format_percent(entry.match_percentage),
            format_percent(entry.risk_score)
        );
    }
    print_overflow(entries.len());
    println!();
}

pub fn print_high_risk(contracts: &[HighRiskContract]) {
    if contracts.is_empty() {
        println!("No high-risk contracts.");
        return;
    }
    println!("High-Risk Contracts ({}):", contracts.len());
    for contract in contracts.iter().take(MAX_LIST_ITEMS) {
        println!(
            "  #{:<6} {} vs {}  risk {}",
            contract.comparison_id,
            truncated(&contract.source_document),
            truncated(&contract.target_document),
            format_percent(contract.risk_score)
        );
    }
    print_overflow(contracts.len());
    println!();
}

// ── Helpers ──

fn print_overflow(total: usize) {
    if total > MAX_LIST_ITEMS {
        println!("  ... and {} more", total - MAX_LIST_ITEMS);
    }
}

fn truncated(text: &str) -> String {
    if text.chars().count() > MAX_TEXT_CHARS {
        let head: String = text.chars().take(MAX_TEXT_CHARS - 3).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_keeps_short_text_and_caps_long_text() {
        assert_eq!(truncated("short"), "short");
        let long = "x".repeat(100);
        let cut = truncated(&long);
        assert_eq!(cut.chars().count(), MAX_TEXT_CHARS);
        assert!(cut.ends_with("..."));
    }
}
