//! Exchange-rate retrieval.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CheckoutError, CheckoutResult};

/// Currencies an order total may be quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// United States dollar
    Usd,
    /// Euro
    Eur,
    /// Canadian dollar
    Cad,
    /// Pound sterling
    Gbp,
    /// Indian rupee
    Inr,
    /// The wallet's own unit; converts at par
    Xmr,
}

impl Currency {
    /// Upper-case ISO-style code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Cad => "CAD",
            Self::Gbp => "GBP",
            Self::Inr => "INR",
            Self::Xmr => "XMR",
        }
    }

    /// Parse a currency code, case-insensitively.
    pub fn from_code(code: &str) -> CheckoutResult<Self> {
        match code.to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "CAD" => Ok(Self::Cad),
            "GBP" => Ok(Self::Gbp),
            "INR" => Ok(Self::Inr),
            "XMR" => Ok(Self::Xmr),
            _ => Err(CheckoutError::unsupported_currency(code)),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Source of XMR exchange rates.
///
/// Implementations return how many units of `currency` one XMR buys, as a
/// positive decimal, or fail with `RateUnavailable`.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Units of `currency` per one XMR.
    async fn rate(&self, currency: Currency) -> CheckoutResult<f64>;
}

/// Default endpoint of the public CryptoCompare price API.
pub const CRYPTOCOMPARE_URL: &str = "https://min-api.cryptocompare.com";

/// HTTP timeout for price-feed requests.
const PRICE_TIMEOUT: Duration = Duration::from_secs(8);

/// Price sheet returned by the CryptoCompare `data/price` endpoint.
#[derive(Debug, Deserialize)]
struct PriceSheet {
    #[serde(rename = "USD")]
    usd: Option<f64>,
    #[serde(rename = "EUR")]
    eur: Option<f64>,
    #[serde(rename = "CAD")]
    cad: Option<f64>,
    #[serde(rename = "GBP")]
    gbp: Option<f64>,
    #[serde(rename = "INR")]
    inr: Option<f64>,
}

/// Price oracle backed by the CryptoCompare public API.
pub struct CryptoCompareOracle {
    /// HTTP client
    client: reqwest::Client,
    /// Base URL of the price API
    base_url: String,
}

impl CryptoCompareOracle {
    /// Oracle against the public CryptoCompare endpoint.
    pub fn new() -> CheckoutResult<Self> {
        Self::with_base_url(CRYPTOCOMPARE_URL)
    }

    /// Oracle against a specific endpoint (mirrors, caching proxies).
    pub fn with_base_url(base_url: &str) -> CheckoutResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(PRICE_TIMEOUT)
            .build()
            .map_err(|e| {
                CheckoutError::rate_unavailable("XMR", format!("failed to create HTTP client: {e}"))
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The endpoint this oracle queries.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for CryptoCompareOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoCompareOracle")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl PriceOracle for CryptoCompareOracle {
    async fn rate(&self, currency: Currency) -> CheckoutResult<f64> {
        // Par, no network call.
        if currency == Currency::Xmr {
            return Ok(1.0);
        }

        let url = format!(
            "{}/data/price?fsym=XMR&tsyms=BTC,USD,EUR,CAD,INR,GBP",
            self.base_url
        );
        debug!(url = %url, currency = %currency, "fetching exchange rate");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CheckoutError::rate_unavailable(currency.code(), e.to_string()))?;

        if !response.status().is_success() {
            return Err(CheckoutError::rate_unavailable(
                currency.code(),
                format!("price feed returned {}", response.status()),
            ));
        }

        let sheet: PriceSheet = response.json().await.map_err(|e| {
            CheckoutError::rate_unavailable(
                currency.code(),
                format!("failed to parse price sheet: {e}"),
            )
        })?;

        let rate = match currency {
            Currency::Usd => sheet.usd,
            Currency::Eur => sheet.eur,
            Currency::Cad => sheet.cad,
            Currency::Gbp => sheet.gbp,
            Currency::Inr => sheet.inr,
            Currency::Xmr => Some(1.0),
        };

        match rate {
            Some(rate) if rate > 0.0 => Ok(rate),
            Some(rate) => Err(CheckoutError::rate_unavailable(
                currency.code(),
                format!("non-positive rate {rate}"),
            )),
            None => Err(CheckoutError::rate_unavailable(
                currency.code(),
                "rate missing from price sheet",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_codes() {
        assert_eq!(Currency::Usd.code(), "USD");
        assert_eq!(Currency::Xmr.to_string(), "XMR");
    }

    #[test]
    fn test_currency_parse_case_insensitive() {
        assert_eq!(Currency::from_code("usd").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_code("Gbp").unwrap(), Currency::Gbp);
        assert_eq!(Currency::from_code("XMR").unwrap(), Currency::Xmr);
    }

    #[test]
    fn test_currency_parse_rejects_unknown() {
        let err = Currency::from_code("JPY").unwrap_err();
        assert!(matches!(err, CheckoutError::UnsupportedCurrency(code) if code == "JPY"));
    }

    #[test]
    fn test_price_sheet_deserialize() {
        let sheet: PriceSheet = serde_json::from_value(serde_json::json!({
            "BTC": 0.0029, "USD": 158.2, "EUR": 146.9
        }))
        .unwrap();
        assert_eq!(sheet.usd, Some(158.2));
        assert_eq!(sheet.eur, Some(146.9));
        assert_eq!(sheet.cad, None);
    }

    #[test]
    fn test_oracle_url_normalization() {
        let oracle = CryptoCompareOracle::with_base_url("https://example.com/feed/").unwrap();
        assert_eq!(oracle.base_url(), "https://example.com/feed");
    }
}
