//! Transport abstraction the conversion client talks through

use super::currency::{
    ConversionRequest, ConversionResult, CurrencyCode, HistoricalPoint, HistoricalRequest,
};
use super::error::Result;
use async_trait::async_trait;

/// A pricing backend. Implementations perform exactly one round trip per
/// call and normalize failures into [`ClientError`](super::error::ClientError).
/// Requests reaching a backend have already been validated.
#[async_trait]
pub trait RateBackend: Send + Sync {
    /// Lists the currency codes the backend supports. An empty list is a
    /// successful answer.
    async fn currencies(&self) -> Result<Vec<CurrencyCode>>;

    async fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult>;

    async fn historical(&self, request: &HistoricalRequest) -> Result<Vec<HistoricalPoint>>;
}
