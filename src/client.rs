//! HTTP client for the annotation backend.
//!
//! Three endpoints matter to the engine: radargram metadata, the latest
//! prior submission, and submit. Responses are parsed through pure helper
//! functions so the wire handling is testable without sockets; the
//! [`SubmissionBackend`] trait is the seam a session uses, letting tests
//! drive a session against a fake backend.

use serde::Deserialize;
use thiserror::Error;

use crate::format::PersistedDocument;
use crate::model::RadargramMeta;

/// Errors from talking to the backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend rejected the request with HTTP 401.
    #[error("not logged in; log in and try again")]
    NotAuthenticated,

    /// The backend answered with a non-success status other than 401.
    #[error("request failed with HTTP status {status}")]
    Failed {
        /// The HTTP status code.
        status: u16,
    },

    /// The request never completed (DNS, connection, timeout).
    #[error("network error: {0}")]
    Transport(String),

    /// The response body could not be read or parsed.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The submission document could not be encoded.
    #[error("could not encode submission document: {0}")]
    Encode(String),
}

/// Successful submit acknowledgement.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitReceipt {
    /// Message from the backend, shown to the user.
    pub message: String,
}

/// The backend operations a session needs.
pub trait SubmissionBackend {
    /// Fetch the most recent submission for a radargram. `None` means no
    /// prior submission exists.
    fn fetch_latest(&self, radar_key: &str) -> Result<Option<PersistedDocument>, ClientError>;

    /// Transmit a document.
    fn submit(&self, document: &PersistedDocument) -> Result<SubmitReceipt, ClientError>;
}

/// Blocking HTTP client against the annotation backend.
pub struct SubmissionClient {
    agent: ureq::Agent,
    base_url: String,
}

impl SubmissionClient {
    /// Create a client for the given backend base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            agent: ureq::agent(),
            base_url,
        }
    }

    /// Fetch the metadata for a radargram.
    pub fn fetch_meta(&self, radar_key: &str) -> Result<RadargramMeta, ClientError> {
        let body = self.get(&format!("radargram_meta/{radar_key}.json"))?;
        serde_json::from_str(&body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    fn get(&self, path: &str) -> Result<String, ClientError> {
        let url = format!("{}/{}", self.base_url, path);
        log::debug!("GET {url}");
        let response = self.agent.get(&url).call().map_err(map_ureq_error)?;
        response
            .into_string()
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

impl SubmissionBackend for SubmissionClient {
    fn fetch_latest(&self, radar_key: &str) -> Result<Option<PersistedDocument>, ClientError> {
        let body = self.get(&format!("radargram_latest_submission/{radar_key}.json"))?;
        parse_latest_body(&body)
    }

    fn submit(&self, document: &PersistedDocument) -> Result<SubmitReceipt, ClientError> {
        let body =
            serde_json::to_string(document).map_err(|e| ClientError::Encode(e.to_string()))?;
        let url = format!("{}/submit-digitized", self.base_url);
        log::info!(
            "POST {url} ({} features)",
            document.features.features.len()
        );

        let response = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_string(&body)
            .map_err(map_ureq_error)?;

        let text = response
            .into_string()
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        parse_submit_body(&text)
    }
}

fn map_ureq_error(error: ureq::Error) -> ClientError {
    match error {
        ureq::Error::Status(401, _) => ClientError::NotAuthenticated,
        ureq::Error::Status(status, _) => ClientError::Failed { status },
        transport => ClientError::Transport(transport.to_string()),
    }
}

/// Parse the latest-submission response body.
///
/// The backend answers with the empty object `{}` when the user has never
/// submitted for this radargram.
fn parse_latest_body(body: &str) -> Result<Option<PersistedDocument>, ClientError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

    if value.as_object().is_some_and(|o| o.is_empty()) {
        return Ok(None);
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

fn parse_submit_body(body: &str) -> Result<SubmitReceipt, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_means_no_submission() {
        assert!(parse_latest_body("{}").unwrap().is_none());
    }

    #[test]
    fn test_latest_body_parses_document() {
        let body = r#"{
            "schema_version": 1,
            "date_modified": "2025-03-25T12:00:00.000Z",
            "width": 100,
            "height": 50,
            "radar_key": "dronbreen-20250325-DAT_0029_A1_1",
            "features": {"type": "FeatureCollection", "features": []}
        }"#;
        let document = parse_latest_body(body).unwrap().unwrap();
        assert_eq!(document.radar_key, "dronbreen-20250325-DAT_0029_A1_1");
        assert!(document.features.features.is_empty());
    }

    #[test]
    fn test_garbage_latest_body_is_invalid() {
        assert!(matches!(
            parse_latest_body("<html>gateway error</html>"),
            Err(ClientError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_submit_body_carries_message() {
        let receipt = parse_submit_body(r#"{"message": "Data submitted successfully"}"#).unwrap();
        assert_eq!(receipt.message, "Data submitted successfully");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = SubmissionClient::new("http://localhost:8081/");
        assert_eq!(client.base_url, "http://localhost:8081");
    }
}
