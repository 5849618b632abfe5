use super::currency::CurrencyCode;

/// Used when the backend answers but lists no currencies.
pub const DEFAULT_CURRENCIES: [&str; 7] = ["USD", "EUR", "GBP", "JPY", "AUD", "CAD", "RWF"];

/// Used when the currency list cannot be fetched at all.
pub const MINIMAL_CURRENCIES: [&str; 4] = ["USD", "EUR", "GBP", "RWF"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Remote,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyCatalog {
    codes: Vec<CurrencyCode>,
    source: CatalogSource,
}

impl CurrencyCatalog {
    /// Builds a catalog from remote codes, dropping duplicates while keeping
    /// the order they were received in.
    pub fn remote(codes: Vec<CurrencyCode>) -> Self {
        let mut unique: Vec<CurrencyCode> = Vec::with_capacity(codes.len());
        for code in codes {
            if !unique.contains(&code) {
                unique.push(code);
            }
        }
        Self {
            codes: unique,
            source: CatalogSource::Remote,
        }
    }

    pub fn default_fallback() -> Self {
        Self::fixed(&DEFAULT_CURRENCIES)
    }

    pub fn minimal_fallback() -> Self {
        Self::fixed(&MINIMAL_CURRENCIES)
    }

    fn fixed(codes: &[&str]) -> Self {
        Self {
            codes: codes
                .iter()
                .filter_map(|code| code.parse().ok())
                .collect(),
            source: CatalogSource::Fallback,
        }
    }

    pub fn codes(&self) -> &[CurrencyCode] {
        &self.codes
    }

    pub fn is_fallback(&self) -> bool {
        self.source == CatalogSource::Fallback
    }

    pub fn contains(&self, code: &CurrencyCode) -> bool {
        self.codes.contains(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_catalogs() {
        let full = CurrencyCatalog::default_fallback();
        assert!(full.is_fallback());
        assert_eq!(full.len(), DEFAULT_CURRENCIES.len());
        assert_eq!(full.codes()[6].as_str(), "RWF");

        let minimal = CurrencyCatalog::minimal_fallback();
        let names: Vec<&str> = minimal.codes().iter().map(|c| c.as_str()).collect();
        assert_eq!(names, MINIMAL_CURRENCIES);
    }

    #[test]
    fn test_remote_catalog_dedup_keeps_order() {
        let codes = ["EUR", "USD", "EUR", "JPY"]
            .iter()
            .map(|c| c.parse().unwrap())
            .collect();
        let catalog = CurrencyCatalog::remote(codes);
        assert!(!catalog.is_fallback());
        let names: Vec<&str> = catalog.codes().iter().map(|c| c.as_str()).collect();
        assert_eq!(names, ["EUR", "USD", "JPY"]);
        assert!(catalog.contains(&"JPY".parse().unwrap()));
        assert!(!catalog.contains(&"RWF".parse().unwrap()));
    }
}
