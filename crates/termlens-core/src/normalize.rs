//! Response normalisation: backend comparison JSON → [`ComparisonResult`].
//!
//! The backend grew several near-identical response shapes (`comparison_id`
//! vs `id`, clause lists nested under `results` or not, similarities as
//! 0–100 percentages or 0–1 fractions). This module is the single place
//! that reconciles them. Malformed analytics degrade to zero values and
//! empty lists; only a response that is not comparison-shaped at all is
//! rejected.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::coerce;
use crate::model::{Clause, ClauseMatch, ClauseMismatch, ComparisonResult, Recommendation};

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("response does not contain a comparison result")]
    MalformedResponse,
}

const CLAUSE_LISTS: [&str; 3] = ["matches", "partial_matches", "mismatches"];

/// Build a canonical [`ComparisonResult`] from a raw backend response.
///
/// Pure function of its input. Every clause entry the backend sent ends up
/// in exactly one of `matches` (exact and partial matches) or `mismatches`;
/// none are dropped or duplicated.
pub fn normalize_comparison(raw: &Value) -> Result<ComparisonResult, NormalizeError> {
    let top = raw.as_object().ok_or(NormalizeError::MalformedResponse)?;
    let results = top.get("results").and_then(Value::as_object);

    let comparison_like = results.is_some()
        || top.contains_key("comparison_id")
        || top.contains_key("match_percentage")
        || CLAUSE_LISTS.iter().any(|k| top.contains_key(*k));
    if !comparison_like {
        return Err(NormalizeError::MalformedResponse);
    }

    let mut matches = Vec::new();
    for entry in list_field(top, results, "matches")
        .iter()
        .chain(list_field(top, results, "partial_matches"))
    {
        matches.push(ClauseMatch {
            expected: clause_of(field(entry, "expected_clause")),
            actual: clause_of(actual_field(entry)),
            similarity: unit_interval(similarity_of(entry)),
        });
    }

    let mismatches: Vec<ClauseMismatch> = list_field(top, results, "mismatches")
        .iter()
        .map(|entry| ClauseMismatch {
            expected: clause_of(field(entry, "expected_clause")),
            actual: optional_clause_of(actual_field(entry)),
            similarity: unit_interval(similarity_of(entry)),
        })
        .collect();

    let recommendations: Vec<Recommendation> = list_field(top, results, "recommendations")
        .iter()
        .map(recommendation_of)
        .collect();

    let result = ComparisonResult {
        id: coerce::string_of(top.get("comparison_id").or_else(|| top.get("id"))),
        match_percentage: coerce::f64_of(top.get("match_percentage")),
        risk_score: coerce::f64_of(top.get("risk_score")),
        matches,
        mismatches,
        recommendations,
    };
    debug!(
        id = %result.id,
        matches = result.matches.len(),
        mismatches = result.mismatches.len(),
        recommendations = result.recommendations.len(),
        "normalised comparison response"
    );
    Ok(result)
}

/// Look a list field up under `results` first, then at the top level.
/// Missing or non-list values read as empty.
fn list_field<'a>(
    top: &'a Map<String, Value>,
    results: Option<&'a Map<String, Value>>,
    key: &str,
) -> &'a [Value] {
    results
        .and_then(|r| r.get(key))
        .or_else(|| top.get(key))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn field<'a>(entry: &'a Value, key: &str) -> Option<&'a Value> {
    entry.as_object().and_then(|o| o.get(key))
}

/// The contract-side clause went by both names across backend versions.
fn actual_field(entry: &Value) -> Option<&Value> {
    field(entry, "contract_clause").or_else(|| field(entry, "actual_clause"))
}

fn similarity_of(entry: &Value) -> f64 {
    coerce::f64_of(field(entry, "similarity_score").or_else(|| field(entry, "similarity")))
}

/// Reconcile similarity units: values in `[0, 1]` are already fractions and
/// pass through untouched; anything above 1 is a backend percentage.
fn unit_interval(similarity: f64) -> f64 {
    let fraction = if similarity > 1.0 {
        similarity / 100.0
    } else {
        similarity
    };
    fraction.clamp(0.0, 1.0)
}

/// Normalise a single clause object from any endpoint that returns them.
///
/// Same coercion rules as the comparison lists: missing numbers become `0`,
/// missing text becomes `""`, category and importance fall back to the
/// backend's own defaults.
pub fn normalize_clause(value: &Value) -> Clause {
    clause_of(Some(value))
}

fn clause_of(value: Option<&Value>) -> Clause {
    let get = |key| value.and_then(|v| field(v, key));
    Clause {
        number: coerce::i64_of(get("number")),
        text: coerce::string_of(get("text")),
        category: string_or(coerce::string_of(get("category")), "Unknown"),
        importance: string_or(coerce::string_of(get("importance")), "Medium"),
    }
}

fn optional_clause_of(value: Option<&Value>) -> Option<Clause> {
    match value {
        Some(v) if v.is_object() => Some(clause_of(Some(v))),
        _ => None,
    }
}

fn recommendation_of(entry: &Value) -> Recommendation {
    let text = field(entry, "text").or_else(|| field(entry, "message"));
    let category = field(entry, "category").or_else(|| field(entry, "type"));
    Recommendation {
        text: coerce::string_of(text),
        category: string_or(coerce::string_of(category), "General"),
        priority: string_or(coerce::string_of(field(entry, "priority")), "Medium"),
    }
}

fn string_or(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}
