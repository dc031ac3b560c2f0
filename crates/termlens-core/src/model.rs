//! Canonical comparison types shared by the API client, exporters, and CLI.
//!
//! These are the client's own representation of a comparison, decoupled from
//! the backend wire format. They are built once per fetch by
//! [`crate::normalize::normalize_comparison`] and treated as immutable
//! afterwards.

use serde::{Deserialize, Serialize};

/// A numbered contract clause with its classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub number: i64,
    pub text: String,
    /// e.g. Legal, Financial, Operational.
    pub category: String,
    /// High, Medium, or Low.
    pub importance: String,
}

impl Clause {
    /// The clause title: everything before the first colon, trimmed.
    ///
    /// A clause without a colon has its whole text as the title.
    pub fn title(&self) -> &str {
        match self.text.split_once(':') {
            Some((head, _)) => head.trim(),
            None => self.text.trim(),
        }
    }

    /// The clause body after the first colon, if there is one.
    pub fn body(&self) -> Option<&str> {
        self.text
            .split_once(':')
            .map(|(_, tail)| tail.trim())
            .filter(|tail| !tail.is_empty())
    }
}

/// An expected-terms clause paired with the contract clause it matched.
///
/// `similarity` is always a fraction in `[0, 1]`, regardless of how the
/// backend expressed it on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseMatch {
    pub expected: Clause,
    pub actual: Clause,
    pub similarity: f64,
}

/// An expected-terms clause the contract failed to satisfy.
///
/// `actual` is `None` when no counterpart clause was found in the contract
/// at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseMismatch {
    pub expected: Clause,
    pub actual: Option<Clause>,
    pub similarity: f64,
}

impl ClauseMismatch {
    /// `"Mismatch"` when a differing contract clause exists, `"Missing"`
    /// when the clause is absent from the contract entirely.
    pub fn status(&self) -> &'static str {
        if self.actual.is_some() {
            "Mismatch"
        } else {
            "Missing"
        }
    }
}

/// A backend-generated suggestion attached to a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub text: String,
    pub category: String,
    pub priority: String,
}

/// The canonical, fully-typed result of one contract comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub id: String,
    /// 0–100.
    pub match_percentage: f64,
    /// 0–100.
    pub risk_score: f64,
    pub matches: Vec<ClauseMatch>,
    pub mismatches: Vec<ClauseMismatch>,
    pub recommendations: Vec<Recommendation>,
}

impl ComparisonResult {
    /// Total expected-terms clauses covered by this comparison.
    pub fn total_clauses(&self) -> usize {
        self.matches.len() + self.mismatches.len()
    }
}

/// What the upload endpoints return for each stored document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentDescriptor {
    pub id: String,
    pub name: String,
    pub document_type: String,
    pub clauses: Vec<Clause>,
}

/// Render a 0–100 value as a whole-number percentage, e.g. `87%`.
///
/// Every surface that shows a percentage goes through this so reports and
/// terminal output agree.
pub fn format_percent(value: f64) -> String {
    format!("{}%", value.round() as i64)
}
