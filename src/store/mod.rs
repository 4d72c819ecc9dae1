//! REST client for the external record store.
//!
//! The store is consumed, not served: four record operations plus a version
//! probe. Requests are single-shot awaited calls with no retry and no
//! in-flight de-duplication; callers that tear down while a request is
//! outstanding revoke a [`Liveness`] token and drop the late response.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::models::{
    MatchRecord, MatchRecordDraft, MatchRecordDto, MatchRecordPayload, ValidationError,
};

/// Errors surfaced by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never completed (DNS, refused connection, reset...).
    #[error("Failed to reach the record store: {0}")]
    Transport(#[source] reqwest::Error),

    /// Non-success HTTP status. Carries the response body verbatim when the
    /// store provided one.
    #[error("Record store request failed (HTTP {status}): {message}")]
    Status { status: u16, message: String },

    /// A success response carried a body we could not decode.
    #[error("Failed to decode record store response: {0}")]
    Decode(#[source] reqwest::Error),

    /// The draft failed validation before any network call was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A "still interested" flag for in-flight requests.
///
/// The initiator keeps one clone and hands another to the task awaiting the
/// response; revoking the token tells the task to discard whatever arrives.
#[derive(Debug, Clone, Default)]
pub struct Liveness {
    revoked: Arc<AtomicBool>,
}

impl Liveness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal that the initiating view is gone.
    pub fn revoke(&self) {
        self.revoked.store(true, Ordering::Release);
    }

    pub fn is_live(&self) -> bool {
        !self.revoked.load(Ordering::Acquire)
    }
}

/// Client for the record store REST API.
#[derive(Debug, Clone)]
pub struct RecordStore {
    client: Client,
    base_url: Url,
}

impl RecordStore {
    /// Create a client against the given base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, StoreError> {
        self.base_url.join(path).map_err(|_| StoreError::Status {
            status: 0,
            message: format!("invalid endpoint path: {}", path),
        })
    }

    /// `GET /records` — the full record set, in store order
    /// (`played_at` descending).
    pub async fn list(&self) -> Result<Vec<MatchRecord>, StoreError> {
        let url = self.endpoint("records")?;
        debug!("Listing records from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(StoreError::Transport)?;
        let response = check_status(response).await?;

        let dtos: Vec<MatchRecordDto> = response.json().await.map_err(StoreError::Decode)?;
        Ok(dtos.into_iter().map(MatchRecord::from).collect())
    }

    /// `POST /records` — create a record from a draft. The draft is
    /// validated and normalized before the request is issued.
    pub async fn create(&self, draft: &MatchRecordDraft) -> Result<MatchRecord, StoreError> {
        let payload = MatchRecordPayload::from_draft(draft)?;
        let url = self.endpoint("records")?;
        debug!("Creating record at {}", url);

        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(StoreError::Transport)?;
        let response = check_status(response).await?;

        let dto: MatchRecordDto = response.json().await.map_err(StoreError::Decode)?;
        Ok(dto.into())
    }

    /// `PUT /records/{id}` — full replacement of an existing record.
    pub async fn update(
        &self,
        id: i64,
        draft: &MatchRecordDraft,
    ) -> Result<MatchRecord, StoreError> {
        let payload = MatchRecordPayload::from_draft(draft)?;
        let url = self.endpoint(&format!("records/{}", id))?;
        debug!("Updating record {} at {}", id, url);

        let response = self
            .client
            .put(url)
            .json(&payload)
            .send()
            .await
            .map_err(StoreError::Transport)?;
        let response = check_status(response).await?;

        let dto: MatchRecordDto = response.json().await.map_err(StoreError::Decode)?;
        Ok(dto.into())
    }

    /// `DELETE /records/{id}`.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let url = self.endpoint(&format!("records/{}", id))?;
        debug!("Deleting record {} at {}", id, url);

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(StoreError::Transport)?;
        check_status(response).await?;
        Ok(())
    }

    /// `GET /app-version` — display label only. Empty or "unknown" values
    /// normalize to `None`.
    pub async fn app_version(&self) -> Result<Option<String>, StoreError> {
        #[derive(serde::Deserialize)]
        struct AppVersionResponse {
            version: String,
        }

        let url = self.endpoint("app-version")?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(StoreError::Transport)?;
        let response = check_status(response).await?;

        let body: AppVersionResponse = response.json().await.map_err(StoreError::Decode)?;
        let version = body.version.trim().to_string();
        if version.is_empty() || version == "unknown" {
            Ok(None)
        } else {
            Ok(Some(version))
        }
    }
}

/// Map a non-success response to `StoreError::Status`, surfacing the body
/// text verbatim when there is one.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.text().await {
        Ok(body) if !body.trim().is_empty() => body,
        _ => "request failed".to_string(),
    };
    Err(StoreError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liveness_starts_live() {
        let liveness = Liveness::new();
        assert!(liveness.is_live());
    }

    #[test]
    fn test_liveness_revocation_is_shared() {
        let liveness = Liveness::new();
        let handle = liveness.clone();
        liveness.revoke();
        assert!(!handle.is_live());
    }

    #[test]
    fn test_endpoint_join() {
        let store = RecordStore::new(Url::parse("http://127.0.0.1:8000/").unwrap());
        assert_eq!(
            store.endpoint("records").unwrap().as_str(),
            "http://127.0.0.1:8000/records"
        );
        assert_eq!(
            store.endpoint("records/7").unwrap().as_str(),
            "http://127.0.0.1:8000/records/7"
        );
    }

    #[test]
    fn test_invalid_draft_fails_before_network() {
        // No server is running; a validation failure must surface instead
        // of a transport error.
        let store = RecordStore::new(Url::parse("http://127.0.0.1:1/").unwrap());
        let result = tokio_test::block_on(store.create(&MatchRecordDraft::default()));
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[test]
    fn test_status_error_display() {
        let error = StoreError::Status {
            status: 422,
            message: "my_rate must be >= 0".to_string(),
        };
        let rendered = error.to_string();
        assert!(rendered.contains("422"));
        assert!(rendered.contains("my_rate must be >= 0"));
    }
}
