use super::local::LocalBackend;
use super::util::{RawResponse, number_field, string_field};
use crate::core::backend::RateBackend;
use crate::core::currency::{
    ConversionRequest, ConversionResult, CurrencyCode, HistoricalPoint, HistoricalRequest,
};
use crate::core::error::{ClientError, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Backend for the ExchangeRate-API v6 service. The key is part of every
/// request path. The service offers no historical series on this plan, so
/// historical requests go to a local backend.
pub struct ExchangeRateApiBackend {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
    historical: LocalBackend,
}

impl ExchangeRateApiBackend {
    pub fn new(
        base_url: &str,
        api_key: &str,
        client: reqwest::Client,
        historical: LocalBackend,
    ) -> Self {
        ExchangeRateApiBackend {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
            historical,
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.api_key, endpoint)
    }

    async fn get(&self, endpoint: &str) -> Result<RawResponse> {
        debug!("Requesting {}/<key>/{}", self.base_url, endpoint);
        let response = self
            .client
            .get(self.url(endpoint))
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        RawResponse::read(response).await
    }
}

/// The service reports failures as `{"result": "error", "error-type": ...}`,
/// sometimes with a 200 status.
fn failure_message(response: &RawResponse) -> Option<Option<String>> {
    let body: Option<Value> = serde_json::from_str(&response.body).ok();
    let reported_error = body
        .as_ref()
        .and_then(|v| v.get("result"))
        .and_then(Value::as_str)
        == Some("error");

    if response.status.is_success() && !reported_error {
        return None;
    }
    Some(body.as_ref().and_then(|v| string_field(v, "error-type")))
}

#[async_trait]
impl RateBackend for ExchangeRateApiBackend {
    #[instrument(name = "ExchangeRateApiCodes", skip(self))]
    async fn currencies(&self) -> Result<Vec<CurrencyCode>> {
        let response = self.get("codes").await?;
        if let Some(message) = failure_message(&response) {
            return Err(ClientError::CurrencyListFailed(
                message.unwrap_or_else(|| format!("HTTP error: {}", response.status)),
            ));
        }

        let data = response.json()?;
        let Some(supported) = data.get("supported_codes").and_then(Value::as_array) else {
            return Ok(Vec::new());
        };

        // Entries are [code, name] pairs
        Ok(supported
            .iter()
            .filter_map(|entry| entry.get(0).and_then(Value::as_str))
            .filter_map(|code| match code.parse() {
                Ok(code) => Some(code),
                Err(e) => {
                    warn!(error = %e, "Skipping unsupported currency code");
                    None
                }
            })
            .collect())
    }

    #[instrument(
        name = "ExchangeRateApiPair",
        skip(self, request),
        fields(from = %request.from, to = %request.to)
    )]
    async fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult> {
        let endpoint = format!("pair/{}/{}/{}", request.from, request.to, request.amount);
        let response = self.get(&endpoint).await?;

        if let Some(message) = failure_message(&response) {
            return Err(ClientError::ConversionFailed(
                message.unwrap_or_else(|| "Conversion failed".to_string()),
            ));
        }

        let data = response.json()?;
        Ok(ConversionResult {
            converted_amount: number_field(&data, "conversion_result")?,
            rate: number_field(&data, "conversion_rate")?,
        })
    }

    async fn historical(&self, request: &HistoricalRequest) -> Result<Vec<HistoricalPoint>> {
        self.historical.historical(request).await
    }
}
