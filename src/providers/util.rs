use crate::core::error::{ClientError, Result};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("fxc/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client shared by all backends. Without a timeout the
/// transport default applies.
pub fn build_http_client(timeout: Option<Duration>) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Status and body of a completed exchange.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        debug!(%status, body_len = body.len(), "Received response");
        Ok(Self { status, body })
    }

    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.body)
            .map_err(|e| ClientError::MalformedResponse(format!("invalid JSON body: {e}")))
    }

    /// Human readable message from an error body, if the body carries one
    /// under `field`.
    pub fn message(&self, field: &str) -> Option<String> {
        let value: Value = serde_json::from_str(&self.body).ok()?;
        string_field(&value, field)
    }
}

pub(crate) fn string_field(value: &Value, field: &str) -> Option<String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub(crate) fn number_field(value: &Value, field: &str) -> Result<f64> {
    value
        .get(field)
        .and_then(Value::as_f64)
        .ok_or_else(|| ClientError::MalformedResponse(format!("missing numeric '{field}'")))
}
