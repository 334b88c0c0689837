use crate::domain::{ApplicationService, CreateApplicationRequest, ServiceError};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

pub const CREATE_APPLICATION_PATH: &str = "/v1/apps/rag-apps";

/// Creates applications through the backend's REST API.
pub struct HttpApplicationService {
    client: Client,
    endpoint: String,
}

impl HttpApplicationService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), CREATE_APPLICATION_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ApplicationService for HttpApplicationService {
    fn create(&self, request: &CreateApplicationRequest) -> Result<(), ServiceError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().unwrap_or_default();
        tracing::debug!(status = status.as_u16(), body = %body, "create application rejected");
        Err(ServiceError::Rejected {
            status: status.as_u16(),
            detail: extract_detail(&body),
        })
    }
}

/// Pulls the `detail` field out of an error body.
///
/// Strings come back verbatim; structured details (validation errors) are
/// rendered as compact JSON.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}
