pub mod exchange_rate_api;
pub mod local;
pub mod util;

use crate::core::RateBackend;
use crate::core::config::{AppConfig, BackendKind};
use anyhow::{Context, Result, bail};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Creates the backend selected in the config, sharing one HTTP client.
pub fn build_backend(config: &AppConfig) -> Result<Arc<dyn RateBackend>> {
    let client = util::build_http_client(config.timeout_secs.map(Duration::from_secs))
        .context("Failed to build HTTP client")?;
    let local = local::LocalBackend::new(config.providers.local_base_url(), client.clone());

    match config.backend {
        BackendKind::Local => {
            debug!("Using local backend at {}", config.providers.local_base_url());
            Ok(Arc::new(local))
        }
        BackendKind::ExchangeRateApi => {
            let Some(api) = config.providers.exchange_rate_api.as_ref() else {
                bail!("Backend 'exchange_rate_api' selected but providers.exchange_rate_api is not configured");
            };
            if api.api_key.trim().is_empty() {
                bail!("providers.exchange_rate_api.api_key must not be empty");
            }
            debug!("Using ExchangeRate-API backend at {}", api.base_url);
            Ok(Arc::new(exchange_rate_api::ExchangeRateApiBackend::new(
                &api.base_url,
                api.api_key.trim(),
                client,
                local,
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ExchangeRateApiConfig;

    #[test]
    fn test_build_local_backend() {
        assert!(build_backend(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_build_exchange_rate_api_requires_provider() {
        let config = AppConfig {
            backend: BackendKind::ExchangeRateApi,
            ..Default::default()
        };
        let err = build_backend(&config).err().unwrap();
        assert!(err.to_string().contains("not configured"));
    }

    #[test]
    fn test_build_exchange_rate_api_rejects_blank_key() {
        let mut config = AppConfig {
            backend: BackendKind::ExchangeRateApi,
            ..Default::default()
        };
        config.providers.exchange_rate_api = Some(ExchangeRateApiConfig {
            base_url: "http://example.com/v6".to_string(),
            api_key: "  ".to_string(),
        });
        assert!(build_backend(&config).is_err());

        config.providers.exchange_rate_api.as_mut().unwrap().api_key = "abc".to_string();
        assert!(build_backend(&config).is_ok());
    }
}
