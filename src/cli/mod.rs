pub mod convert;
pub mod currencies;
pub mod history;
pub mod setup;
pub mod ui;

use crate::core::config::CurrencyPairConfig;
use crate::core::{CurrencyCatalog, CurrencyCode};
use anyhow::{Result, bail};
use tracing::debug;

/// Resolves the pair for a command, filling gaps from the configured
/// default pair.
pub fn resolve_pair(
    from: Option<&str>,
    to: Option<&str>,
    defaults: &CurrencyPairConfig,
) -> Result<(CurrencyCode, CurrencyCode)> {
    let from: CurrencyCode = from.unwrap_or(defaults.from.as_str()).parse()?;
    let to: CurrencyCode = to.unwrap_or(defaults.to.as_str()).parse()?;
    Ok((from, to))
}

/// Rejects codes the backend did not list. A fallback catalog is partial, so
/// nothing is rejected against it.
pub fn check_supported(catalog: &CurrencyCatalog, codes: &[&CurrencyCode]) -> Result<()> {
    if catalog.is_fallback() {
        debug!("Catalog is a fallback, skipping supported currency check");
        return Ok(());
    }
    for code in codes {
        if !catalog.contains(code) {
            bail!("Unsupported currency: {code}");
        }
    }
    Ok(())
}
