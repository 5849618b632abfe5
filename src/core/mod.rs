//! Core business logic abstractions

pub mod backend;
pub mod catalog;
pub mod client;
pub mod config;
pub mod currency;
pub mod error;
pub mod log;

// Re-export main types for cleaner imports
pub use backend::RateBackend;
pub use catalog::{CatalogSource, CurrencyCatalog};
pub use client::ConversionClient;
pub use currency::{
    ConversionRequest, ConversionResult, CurrencyCode, HistoricalPoint, HistoricalRequest,
};
pub use error::ClientError;
