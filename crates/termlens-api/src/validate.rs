//! Client-side upload and comparison-request validation.
//!
//! These checks mirror what the backend enforces so obviously-bad requests
//! are rejected with a clear message before any bytes go over the wire.

use std::path::Path;

use crate::error::ApiError;

/// File extensions the backend can extract text from.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "doc", "docx", "txt"];

/// Maximum upload size: 16 MiB.
pub const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Maximum contract documents per upload batch and per comparison.
pub const MAX_CONTRACT_FILES: usize = 5;

/// Check a single document before upload: known extension, within the size
/// limit.
pub fn validate_upload_file(path: &Path, size: u64) -> Result<(), ApiError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ApiError::Validation(format!(
            "unsupported file type {:?}: expected one of .pdf, .doc, .docx, .txt",
            path.file_name().unwrap_or_default()
        )));
    }
    if size > MAX_FILE_SIZE {
        return Err(ApiError::Validation(format!(
            "{:?} is {} bytes, over the {} MiB limit",
            path.file_name().unwrap_or_default(),
            size,
            MAX_FILE_SIZE / (1024 * 1024)
        )));
    }
    Ok(())
}

/// Check a contract upload batch size: at least one file, at most five.
pub fn validate_contract_batch(count: usize) -> Result<(), ApiError> {
    if count == 0 {
        return Err(ApiError::Validation(
            "no contract files given".to_string(),
        ));
    }
    if count > MAX_CONTRACT_FILES {
        return Err(ApiError::Validation(format!(
            "{count} contract files given, maximum is {MAX_CONTRACT_FILES}"
        )));
    }
    Ok(())
}

/// Check a comparison request: a non-empty expected-terms id and 1–5
/// contract ids.
pub fn validate_compare_request(
    expected_terms_id: &str,
    contract_ids: &[String],
) -> Result<(), ApiError> {
    if expected_terms_id.trim().is_empty() {
        return Err(ApiError::Validation(
            "an expected-terms document id is required".to_string(),
        ));
    }
    if contract_ids.is_empty() {
        return Err(ApiError::Validation(
            "at least one contract id is required".to_string(),
        ));
    }
    if contract_ids.len() > MAX_CONTRACT_FILES {
        return Err(ApiError::Validation(format!(
            "{} contract ids given, maximum is {MAX_CONTRACT_FILES}",
            contract_ids.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn accepts_allowed_extensions_case_insensitively() {
        for name in ["terms.pdf", "terms.PDF", "c.doc", "c.docx", "c.TXT"] {
            assert!(validate_upload_file(&PathBuf::from(name), 1024).is_ok());
        }
    }

    #[test]
    fn rejects_unknown_extensions() {
        for name in ["terms.exe", "terms.csv", "terms", "terms.pdf.zip"] {
            assert!(matches!(
                validate_upload_file(&PathBuf::from(name), 1024),
                Err(ApiError::Validation(_))
            ));
        }
    }

    #[test]
    fn size_limit_is_sixteen_mebibytes_inclusive() {
        let path = PathBuf::from("contract.pdf");
        assert!(validate_upload_file(&path, MAX_FILE_SIZE).is_ok());
        assert!(matches!(
            validate_upload_file(&path, MAX_FILE_SIZE + 1),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn contract_batch_bounds() {
        assert!(matches!(
            validate_contract_batch(0),
            Err(ApiError::Validation(_))
        ));
        assert!(validate_contract_batch(1).is_ok());
        assert!(validate_contract_batch(5).is_ok());
        assert!(matches!(
            validate_contract_batch(6),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn compare_request_requires_ids() {
        let ids = |n: usize| -> Vec<String> { (0..n).map(|i| i.to_string()).collect() };
        assert!(matches!(
            validate_compare_request("", &ids(1)),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            validate_compare_request("1", &ids(0)),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            validate_compare_request("1", &ids(6)),
            Err(ApiError::Validation(_))
        ));
        assert!(validate_compare_request("1", &ids(5)).is_ok());
    }
}
