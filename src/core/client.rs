//! Validated conversion and historical-rate operations over a [`RateBackend`]

use super::backend::RateBackend;
use super::catalog::CurrencyCatalog;
use super::currency::{ConversionRequest, ConversionResult, HistoricalPoint, HistoricalRequest};
use super::error::Result;
use std::sync::Arc;
use tracing::{debug, warn};

/// Stateless client; every call is an independent request/response exchange.
#[derive(Clone)]
pub struct ConversionClient {
    backend: Arc<dyn RateBackend>,
}

impl ConversionClient {
    pub fn new(backend: Arc<dyn RateBackend>) -> Self {
        Self { backend }
    }

    /// Never fails: an unreachable or broken backend yields the minimal
    /// fallback catalog, an empty answer yields the default one.
    pub async fn list_currencies(&self) -> CurrencyCatalog {
        match self.backend.currencies().await {
            Ok(codes) if codes.is_empty() => {
                warn!("No currencies received, using default fallback");
                CurrencyCatalog::default_fallback()
            }
            Ok(codes) => {
                debug!(count = codes.len(), "Received currency list");
                CurrencyCatalog::remote(codes)
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch currencies, using minimal fallback");
                CurrencyCatalog::minimal_fallback()
            }
        }
    }

    pub async fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult> {
        request.validate()?;
        debug!(
            "Converting {} {} to {}",
            request.amount, request.from, request.to
        );
        self.backend.convert(request).await
    }

    /// Points are returned in the order the backend sent them.
    pub async fn historical(&self, request: &HistoricalRequest) -> Result<Vec<HistoricalPoint>> {
        request.validate()?;
        debug!(
            "Fetching historical data for {}-{} for {} days",
            request.from, request.to, request.days
        );
        self.backend.historical(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{DEFAULT_CURRENCIES, MINIMAL_CURRENCIES};
    use crate::core::currency::CurrencyCode;
    use crate::core::error::ClientError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Listing {
        Codes(&'static [&'static str]),
        Fails,
    }

    struct MockBackend {
        listing: Listing,
        call_count: AtomicUsize,
    }

    impl MockBackend {
        fn new(listing: Listing) -> Arc<Self> {
            Arc::new(Self {
                listing,
                call_count: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RateBackend for MockBackend {
        async fn currencies(&self) -> Result<Vec<CurrencyCode>> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            match self.listing {
                Listing::Codes(codes) => Ok(codes.iter().map(|c| c.parse().unwrap()).collect()),
                Listing::Fails => Err(ClientError::MalformedResponse("boom".to_string())),
            }
        }

        async fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            Ok(ConversionResult {
                converted_amount: request.amount * 1.5,
                rate: 1.5,
            })
        }

        async fn historical(&self, _request: &HistoricalRequest) -> Result<Vec<HistoricalPoint>> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            Ok(vec![
                HistoricalPoint {
                    date: "2024-01-02".to_string(),
                    rate: 1.2,
                },
                HistoricalPoint {
                    date: "2024-01-01".to_string(),
                    rate: 1.1,
                },
            ])
        }
    }

    fn code(s: &str) -> CurrencyCode {
        s.parse().unwrap()
    }

    fn names(catalog: &CurrencyCatalog) -> Vec<&str> {
        catalog.codes().iter().map(|c| c.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_currencies_remote() {
        let backend = MockBackend::new(Listing::Codes(&["USD", "EUR", "CHF"]));
        let client = ConversionClient::new(backend.clone());

        let catalog = client.list_currencies().await;
        assert!(!catalog.is_fallback());
        assert_eq!(names(&catalog), ["USD", "EUR", "CHF"]);
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_list_currencies_empty_uses_default_fallback() {
        let client = ConversionClient::new(MockBackend::new(Listing::Codes(&[])));
        let catalog = client.list_currencies().await;
        assert!(catalog.is_fallback());
        assert_eq!(names(&catalog), DEFAULT_CURRENCIES);
    }

    #[tokio::test]
    async fn test_list_currencies_failure_uses_minimal_fallback() {
        let client = ConversionClient::new(MockBackend::new(Listing::Fails));
        let catalog = client.list_currencies().await;
        assert!(catalog.is_fallback());
        assert_eq!(names(&catalog), MINIMAL_CURRENCIES);
    }

    #[tokio::test]
    async fn test_convert_invalid_amount_skips_backend() {
        let backend = MockBackend::new(Listing::Fails);
        let client = ConversionClient::new(backend.clone());

        for amount in [0.0, -10.0, f64::NAN, f64::NEG_INFINITY] {
            let request = ConversionRequest::new(code("USD"), code("EUR"), amount);
            let result = client.convert(&request).await;
            assert!(matches!(result, Err(ClientError::InvalidAmount(_))));
        }
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_same_currency_skips_backend() {
        let backend = MockBackend::new(Listing::Fails);
        let client = ConversionClient::new(backend.clone());

        let convert = ConversionRequest::new(code("GBP"), code("GBP"), 10.0);
        assert!(matches!(
            client.convert(&convert).await,
            Err(ClientError::SameCurrency(_))
        ));

        let historical = HistoricalRequest::new(code("GBP"), code("GBP"), 30);
        assert!(matches!(
            client.historical(&historical).await,
            Err(ClientError::SameCurrency(_))
        ));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_non_positive_days_skips_backend() {
        let backend = MockBackend::new(Listing::Fails);
        let client = ConversionClient::new(backend.clone());

        let request = HistoricalRequest::new(code("USD"), code("EUR"), 0);
        let err = client.historical(&request).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidDays(_)));
        assert!(err.is_validation());
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_convert_delegates_once() {
        let backend = MockBackend::new(Listing::Fails);
        let client = ConversionClient::new(backend.clone());

        let request = ConversionRequest::new(code("USD"), code("EUR"), 100.0);
        let result = client.convert(&request).await.unwrap();
        assert_eq!(result.converted_amount, 150.0);
        assert_eq!(result.rate, 1.5);
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_historical_keeps_backend_order() {
        let backend = MockBackend::new(Listing::Fails);
        let client = ConversionClient::new(backend.clone());

        let request = HistoricalRequest::new(code("USD"), code("EUR"), 2);
        let points = client.historical(&request).await.unwrap();
        let dates: Vec<&str> = points.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, ["2024-01-02", "2024-01-01"]);
        assert_eq!(backend.calls(), 1);
    }
}
