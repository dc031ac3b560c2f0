//! HTTP client for the contract-comparison backend.

use std::path::{Path, PathBuf};

use reqwest::multipart;
use serde_json::{Value, json};
use tracing::info;

use termlens_core::{
    Clause, ComparisonResult, DocumentDescriptor, coerce, normalize_clause, normalize_comparison,
};

use crate::error::ApiError;
use crate::types::{ActivityEntry, ActivityFeed, HighRiskContract, HighRiskFeed, Statistics};
use crate::validate;

/// Client for the backend's `/api` endpoints.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL, e.g.
    /// `http://localhost:5000/api` (no trailing slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Upload the expected-terms document and return its descriptor with
    /// extracted clauses.
    pub async fn upload_expected_terms(
        &self,
        path: &Path,
    ) -> Result<DocumentDescriptor, ApiError> {
        let part = file_part(path).await?;
        let form = multipart::Form::new().part("file", part);
        let url = format!("{}/upload/expected-terms", self.base_url);
        info!(url = %url, file = ?path.file_name(), "uploading expected-terms document");
        let resp = self.client.post(&url).multipart(form).send().await?;
        let value = read_json(resp).await?;
        upload_state(&value)?
            .get("expectedTerms")
            .filter(|v| v.is_object())
            .map(document_descriptor_of)
            .ok_or_else(|| ApiError::Unexpected("upload response lacks a document".into()))
    }

    /// Upload up to five contract documents in one batch.
    pub async fn upload_contracts(
        &self,
        paths: &[PathBuf],
    ) -> Result<Vec<DocumentDescriptor>, ApiError> {
        validate::validate_contract_batch(paths.len())?;
        let mut form = multipart::Form::new();
        for path in paths {
            form = form.part("files", file_part(path).await?);
        }
        let url = format!("{}/upload/contracts", self.base_url);
        info!(url = %url, files = paths.len(), "uploading contract documents");
        let resp = self.client.post(&url).multipart(form).send().await?;
        let value = read_json(resp).await?;
        let docs = upload_state(&value)?
            .get("contracts")
            .and_then(Value::as_array)
            .map(|list| list.iter().map(document_descriptor_of).collect())
            .unwrap_or_default();
        Ok(docs)
    }

    /// Run a comparison of the expected terms against the given contracts.
    /// Each backend comparison is normalised into the canonical model.
    pub async fn compare(
        &self,
        expected_terms_id: &str,
        contract_ids: &[String],
    ) -> Result<Vec<ComparisonResult>, ApiError> {
        validate::validate_compare_request(expected_terms_id, contract_ids)?;
        let url = format!("{}/compare", self.base_url);
        let body = json!({
            "expected_terms_id": expected_terms_id,
            "contract_ids": contract_ids,
        });
        info!(url = %url, contracts = contract_ids.len(), "requesting comparison");
        let resp = self.client.post(&url).json(&body).send().await?;
        let value = read_json(resp).await?;
        let comparisons = value
            .get("comparisons")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ApiError::Unexpected("compare response lacks a comparisons list".into())
            })?;
        comparisons
            .iter()
            .map(|c| normalize_comparison(c).map_err(ApiError::from))
            .collect()
    }

    /// Fetch a previously-run comparison by id.
    pub async fn comparison(&self, id: &str) -> Result<ComparisonResult, ApiError> {
        let url = format!("{}/comparison/{}", self.base_url, id);
        info!(url = %url, "fetching comparison");
        let value = self.get_value(url).await?;
        Ok(normalize_comparison(&value)?)
    }

    /// Fetch the extracted clauses of a stored document.
    pub async fn document_clauses(&self, id: &str) -> Result<Vec<Clause>, ApiError> {
        let url = format!("{}/documents/{}/clauses", self.base_url, id);
        info!(url = %url, "fetching document clauses");
        let value = self.get_value(url).await?;
        let clauses = value
            .get("clauses")
            .and_then(Value::as_array)
            .map(|list| list.iter().map(normalize_clause).collect())
            .unwrap_or_default();
        Ok(clauses)
    }

    /// GET /admin/statistics.
    pub async fn statistics(&self) -> Result<Statistics, ApiError> {
        let value = self
            .get_value(format!("{}/admin/statistics", self.base_url))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// GET /admin/recent-activity.
    pub async fn recent_activity(&self) -> Result<Vec<ActivityEntry>, ApiError> {
        let value = self
            .get_value(format!("{}/admin/recent-activity", self.base_url))
            .await?;
        let feed: ActivityFeed = serde_json::from_value(value)?;
        Ok(feed.recent_activity)
    }

    /// GET /admin/high-risk-contracts.
    pub async fn high_risk_contracts(&self) -> Result<Vec<HighRiskContract>, ApiError> {
        let value = self
            .get_value(format!("{}/admin/high-risk-contracts", self.base_url))
            .await?;
        let feed: HighRiskFeed = serde_json::from_value(value)?;
        Ok(feed.high_risk_contracts)
    }

    /// Whether the backend answers its health check.
    pub async fn health(&self) -> Result<bool, ApiError> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        Ok(resp.status().is_success())
    }

    async fn get_value(&self, url: String) -> Result<Value, ApiError> {
        let resp = self.client.get(&url).send().await?;
        read_json(resp).await
    }
}

async fn read_json(resp: reqwest::Response) -> Result<Value, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Server {
            status: status.as_u16(),
            body,
        });
    }
    Ok(resp.json().await?)
}

/// Validate a document and read it into a multipart part.
async fn file_part(path: &Path) -> Result<multipart::Part, ApiError> {
    let metadata = tokio::fs::metadata(path).await?;
    validate::validate_upload_file(path, metadata.len())?;
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    Ok(multipart::Part::bytes(bytes).file_name(file_name))
}

/// The upload endpoints wrap their payload in a `state` envelope.
fn upload_state(value: &Value) -> Result<&serde_json::Map<String, Value>, ApiError> {
    value
        .get("state")
        .and_then(Value::as_object)
        .ok_or_else(|| ApiError::Unexpected("upload response lacks a state envelope".into()))
}

fn document_descriptor_of(value: &Value) -> DocumentDescriptor {
    let get = |key: &str| value.get(key);
    DocumentDescriptor {
        id: coerce::string_of(get("id")),
        name: coerce::string_of(get("name").or_else(|| get("filename"))),
        document_type: coerce::string_of(get("type").or_else(|| get("document_type"))),
        clauses: get("clauses")
            .and_then(Value::as_array)
            .map(|list| list.iter().map(normalize_clause).collect())
            .unwrap_or_default(),
    }
}
