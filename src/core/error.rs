//! Error kinds surfaced by the conversion client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Please select different currencies ({0} to {0})")]
    SameCurrency(String),
    #[error("Invalid number of days: {0}")]
    InvalidDays(String),
    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),
    #[error("Failed to fetch currencies: {0}")]
    CurrencyListFailed(String),
    #[error("Error converting currency: {0}")]
    ConversionFailed(String),
    #[error("Error fetching historical data: {0}")]
    HistoricalFetchFailed(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

impl ClientError {
    /// True for failures raised before any request is sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidAmount(_)
                | ClientError::SameCurrency(_)
                | ClientError::InvalidDays(_)
                | ClientError::InvalidCurrency(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
