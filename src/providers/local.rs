use super::util::{RawResponse, number_field};
use crate::core::backend::RateBackend;
use crate::core::currency::{
    ConversionRequest, ConversionResult, CurrencyCode, HistoricalPoint, HistoricalRequest,
};
use crate::core::error::{ClientError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Backend speaking the local currency service protocol:
/// `GET /currencies`, `POST /convert` and `POST /historical`.
pub struct LocalBackend {
    base_url: String,
    client: reqwest::Client,
}

impl LocalBackend {
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        LocalBackend {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    async fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<RawResponse> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("Posting to {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        RawResponse::read(response).await
    }
}

#[derive(Debug, Deserialize)]
struct CurrenciesResponse {
    #[serde(default)]
    currencies: Option<Vec<Value>>,
}

#[derive(Debug, Serialize)]
struct ConvertBody<'a> {
    from_currency: &'a str,
    to_currency: &'a str,
    amount: f64,
}

#[derive(Debug, Serialize)]
struct HistoricalBody<'a> {
    from_currency: &'a str,
    to_currency: &'a str,
    days: i64,
}

#[async_trait]
impl RateBackend for LocalBackend {
    #[instrument(name = "LocalCurrencies", skip(self))]
    async fn currencies(&self) -> Result<Vec<CurrencyCode>> {
        let url = format!("{}/currencies", self.base_url);
        debug!("Requesting currencies from {}", url);

        let response = RawResponse::read(self.client.get(&url).send().await?).await?;
        if !response.status.is_success() {
            return Err(ClientError::CurrencyListFailed(
                response
                    .message("detail")
                    .unwrap_or_else(|| format!("HTTP error: {}", response.status)),
            ));
        }

        let data: CurrenciesResponse = serde_json::from_str(&response.body)
            .map_err(|e| ClientError::MalformedResponse(format!("currency list: {e}")))?;

        Ok(data
            .currencies
            .unwrap_or_default()
            .iter()
            .filter_map(|entry| match entry.as_str().map(str::parse::<CurrencyCode>) {
                Some(Ok(code)) => Some(code),
                Some(Err(e)) => {
                    warn!(error = %e, "Skipping unsupported currency code");
                    None
                }
                None => {
                    warn!(entry = %entry, "Skipping non-string currency entry");
                    None
                }
            })
            .collect())
    }

    #[instrument(
        name = "LocalConvert",
        skip(self, request),
        fields(from = %request.from, to = %request.to)
    )]
    async fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult> {
        let body = ConvertBody {
            from_currency: request.from.as_str(),
            to_currency: request.to.as_str(),
            amount: request.amount,
        };
        let response = self.post("/convert", &body).await?;

        if !response.status.is_success() {
            let message = response
                .message("detail")
                .unwrap_or_else(|| "Conversion failed".to_string());
            return Err(ClientError::ConversionFailed(message));
        }

        let data = response.json()?;
        Ok(ConversionResult {
            converted_amount: number_field(&data, "result")?,
            rate: number_field(&data, "rate")?,
        })
    }

    #[instrument(
        name = "LocalHistorical",
        skip(self, request),
        fields(from = %request.from, to = %request.to, days = request.days)
    )]
    async fn historical(&self, request: &HistoricalRequest) -> Result<Vec<HistoricalPoint>> {
        let body = HistoricalBody {
            from_currency: request.from.as_str(),
            to_currency: request.to.as_str(),
            days: request.days,
        };
        let response = self.post("/historical", &body).await?;

        if !response.status.is_success() {
            let message = response
                .message("detail")
                .unwrap_or_else(|| "Failed to fetch historical data".to_string());
            return Err(ClientError::HistoricalFetchFailed(message));
        }

        let data = response.json()?;
        if !data.is_array() {
            return Err(ClientError::MalformedResponse(format!(
                "expected a sequence of points, got {}",
                json_kind(&data)
            )));
        }

        let points: Vec<HistoricalPoint> = serde_json::from_value(data)
            .map_err(|e| ClientError::MalformedResponse(format!("historical point: {e}")))?;
        debug!(count = points.len(), "Received historical points");
        Ok(points)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
