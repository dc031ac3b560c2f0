//! Typed payloads for the admin dashboard endpoints.
//!
//! All fields default when absent; the dashboard renders zeros rather than
//! failing on a partially-populated backend.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// GET /admin/statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub total_documents: i64,
    pub total_comparisons: i64,
    /// Documents processed in the last 24 hours.
    pub recent_documents: i64,
    pub average_match_percentage: f64,
    pub average_risk_score: f64,
    /// Document count per document type.
    pub document_distribution: BTreeMap<String, i64>,
}

/// One entry of GET /admin/recent-activity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityEntry {
    #[serde(rename = "type")]
    pub kind: String,
    /// ISO 8601 timestamp string.
    pub date: String,
    pub source_document: String,
    pub target_document: String,
    pub match_percentage: f64,
    pub risk_score: f64,
}

/// One entry of GET /admin/high-risk-contracts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HighRiskContract {
    pub comparison_id: i64,
    pub source_document: String,
    pub target_document: String,
    pub risk_score: f64,
    /// ISO 8601 timestamp string.
    pub comparison_date: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ActivityFeed {
    pub recent_activity: Vec<ActivityEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct HighRiskFeed {
    pub high_risk_contracts: Vec<HighRiskContract>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_deserialises_backend_shape() {
        let json = r#"{
            "total_documents": 42,
            "total_comparisons": 17,
            "recent_documents": 3,
            "average_match_percentage": 71.25,
            "average_risk_score": 38.5,
            "document_distribution": { "contract": 30, "expected_terms": 12 }
        }"#;
        let stats: Statistics = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_documents, 42);
        assert_eq!(stats.average_match_percentage, 71.25);
        assert_eq!(stats.document_distribution["contract"], 30);
    }

    #[test]
    fn missing_fields_default() {
        let stats: Statistics = serde_json::from_str("{}").unwrap();
        assert_eq!(stats.total_comparisons, 0);
        assert!(stats.document_distribution.is_empty());

        let feed: ActivityFeed = serde_json::from_str("{}").unwrap();
        assert!(feed.recent_activity.is_empty());
    }

    #[test]
    fn activity_entry_maps_type_field() {
        let json = r#"{
            "recent_activity": [{
                "type": "comparison",
                "date": "2026-08-27T10:00:00",
                "source_document": "expected.pdf",
                "target_document": "vendor.pdf",
                "match_percentage": 82.0,
                "risk_score": 21.0
            }]
        }"#;
        let feed: ActivityFeed = serde_json::from_str(json).unwrap();
        assert_eq!(feed.recent_activity[0].kind, "comparison");
        assert_eq!(feed.recent_activity[0].target_document, "vendor.pdf");
    }
}
