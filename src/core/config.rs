use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_LOCAL_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_EXCHANGE_RATE_API_BASE_URL: &str = "https://v6.exchangerate-api.com/v6";

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    #[default]
    Local,
    ExchangeRateApi,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LocalProviderConfig {
    pub base_url: String,
}

#[derive(Deserialize, Serialize, Clone)]
pub struct ExchangeRateApiConfig {
    #[serde(default = "default_exchange_rate_api_base_url")]
    pub base_url: String,
    pub api_key: String,
}

// Keeps the key out of debug logs
impl std::fmt::Debug for ExchangeRateApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeRateApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

fn default_exchange_rate_api_base_url() -> String {
    DEFAULT_EXCHANGE_RATE_API_BASE_URL.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub local: Option<LocalProviderConfig>,
    pub exchange_rate_api: Option<ExchangeRateApiConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            local: Some(LocalProviderConfig {
                base_url: DEFAULT_LOCAL_BASE_URL.to_string(),
            }),
            exchange_rate_api: None,
        }
    }
}

impl ProvidersConfig {
    /// Base URL of the local backend, which also serves historical data for
    /// the third-party backend.
    pub fn local_base_url(&self) -> &str {
        self.local
            .as_ref()
            .map_or(DEFAULT_LOCAL_BASE_URL, |p| &p.base_url)
    }
}

/// Pair used when a command is given no currencies.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CurrencyPairConfig {
    pub from: String,
    pub to: String,
}

impl Default for CurrencyPairConfig {
    fn default() -> Self {
        CurrencyPairConfig {
            from: "USD".to_string(),
            to: "EUR".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub currency: CurrencyPairConfig,
    pub timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Loads the config at the default location, or built-in defaults when
    /// no file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "fxc")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config.backend, BackendKind::Local);
        assert_eq!(config.providers.local_base_url(), DEFAULT_LOCAL_BASE_URL);
        assert!(config.providers.exchange_rate_api.is_none());
        assert_eq!(config.currency.from, "USD");
        assert_eq!(config.currency.to, "EUR");
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
backend: exchange_rate_api
providers:
  local:
    base_url: "http://192.0.2.10:8000"
  exchange_rate_api:
    api_key: "secret"
currency:
  from: "GBP"
  to: "RWF"
timeout_secs: 5
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.backend, BackendKind::ExchangeRateApi);
        assert_eq!(config.providers.local_base_url(), "http://192.0.2.10:8000");
        let api = config.providers.exchange_rate_api.unwrap();
        assert_eq!(api.base_url, DEFAULT_EXCHANGE_RATE_API_BASE_URL);
        assert_eq!(api.api_key, "secret");
        assert_eq!(config.currency.from, "GBP");
        assert_eq!(config.currency.to, "RWF");
        assert_eq!(config.timeout_secs, Some(5));
    }

    #[test]
    fn test_api_key_not_in_debug_output() {
        let api = ExchangeRateApiConfig {
            base_url: DEFAULT_EXCHANGE_RATE_API_BASE_URL.to_string(),
            api_key: "do-not-print".to_string(),
        };
        let printed = format!("{api:?}");
        assert!(!printed.contains("do-not-print"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_config_missing_local_provider_falls_back() {
        let yaml_str = r#"
providers:
  exchange_rate_api:
    base_url: "http://example.com/v6"
    api_key: "k"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        assert!(config.providers.local.is_none());
        assert_eq!(config.providers.local_base_url(), DEFAULT_LOCAL_BASE_URL);
    }

    #[test]
    fn test_config_rejects_unknown_backend() {
        let result = serde_yaml::from_str::<AppConfig>("backend: yahoo");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_path() -> Result<()> {
        let file = tempfile::NamedTempFile::new()?;
        fs::write(file.path(), "currency:\n  from: JPY\n  to: AUD\n")?;
        let config = AppConfig::load_from_path(file.path())?;
        assert_eq!(config.currency.from, "JPY");
        assert_eq!(config.backend, BackendKind::Local);

        let missing = AppConfig::load_from_path(file.path().with_extension("missing"));
        assert!(
            missing
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
        Ok(())
    }
}
