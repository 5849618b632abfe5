//! Currency codes, conversion and historical request/response types

use super::error::{ClientError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_uppercase();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(CurrencyCode(code))
        } else {
            Err(ClientError::InvalidCurrency(s.to_string()))
        }
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = ClientError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// Parses a user supplied amount. Accepts any finite number; positivity is
/// checked by the client.
pub fn parse_amount(input: &str) -> Result<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| ClientError::InvalidAmount(input.to_string()))
}

pub fn parse_days(input: &str) -> Result<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| ClientError::InvalidDays(input.to_string()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub amount: f64,
}

impl ConversionRequest {
    pub fn new(from: CurrencyCode, to: CurrencyCode, amount: f64) -> Self {
        Self { from, to, amount }
    }

    pub fn swapped(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
            amount: self.amount,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ClientError::InvalidAmount(self.amount.to_string()));
        }
        ensure_distinct(&self.from, &self.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionResult {
    pub converted_amount: f64,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalRequest {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub days: i64,
}

impl HistoricalRequest {
    pub fn new(from: CurrencyCode, to: CurrencyCode, days: i64) -> Self {
        Self { from, to, days }
    }

    pub fn swapped(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
            days: self.days,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.days <= 0 {
            return Err(ClientError::InvalidDays(self.days.to_string()));
        }
        ensure_distinct(&self.from, &self.to)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub date: String,
    pub rate: f64,
}

impl HistoricalPoint {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

fn ensure_distinct(from: &CurrencyCode, to: &CurrencyCode) -> Result<()> {
    if from == to {
        Err(ClientError::SameCurrency(from.to_string()))
    } else {
        Ok(())
    }
}
