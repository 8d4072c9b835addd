//! Fixed-rate price oracle for testing.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use xmrpay_checkout::{CheckoutError, CheckoutResult, Currency, PriceOracle};

struct FixedRateOracleInner {
    /// Configured rates.
    rates: HashMap<Currency, f64>,
    /// Number of rate lookups served or refused.
    calls: u32,
}

/// A `PriceOracle` that serves configured rates and counts lookups.
///
/// XMR converts at par out of the box; every other currency must be
/// configured or the lookup fails with `RateUnavailable`.
#[derive(Clone)]
pub struct FixedRateOracle {
    inner: Arc<RwLock<FixedRateOracleInner>>,
}

impl Default for FixedRateOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedRateOracle {
    /// Create an oracle knowing only the par rate for XMR.
    pub fn new() -> Self {
        let mut rates = HashMap::new();
        rates.insert(Currency::Xmr, 1.0);
        Self {
            inner: Arc::new(RwLock::new(FixedRateOracleInner { rates, calls: 0 })),
        }
    }

    /// Configure the rate for one currency.
    pub fn with_rate(self, currency: Currency, rate: f64) -> Self {
        self.inner.write().unwrap().rates.insert(currency, rate);
        self
    }

    /// Number of lookups made against this oracle.
    pub fn calls(&self) -> u32 {
        self.inner.read().unwrap().calls
    }
}

#[async_trait]
impl PriceOracle for FixedRateOracle {
    async fn rate(&self, currency: Currency) -> CheckoutResult<f64> {
        let mut inner = self.inner.write().unwrap();
        inner.calls += 1;
        inner
            .rates
            .get(&currency)
            .copied()
            .ok_or_else(|| CheckoutError::rate_unavailable(currency.code(), "no rate configured"))
    }
}
