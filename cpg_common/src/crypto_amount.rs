use std::fmt::Display;

use serde::{Serialize, Serializer};

/// The number of decimal places to use when quoting an amount in each supported currency.
/// This is configuration data rather than logic. Currencies not listed here use [`DEFAULT_DECIMALS`].
pub const CURRENCY_DECIMALS: [(&str, u32); 6] =
    [("btc", 8), ("eth", 6), ("sol", 6), ("ltc", 6), ("usdt", 2), ("usdc", 2)];

pub const DEFAULT_DECIMALS: u32 = 6;

/// Look up the display precision for a (lowercase) currency code.
pub fn decimals_for(currency: &str) -> u32 {
    CURRENCY_DECIMALS.iter().find(|(code, _)| *code == currency).map(|(_, d)| *d).unwrap_or(DEFAULT_DECIMALS)
}

//--------------------------------------    CryptoAmount     ---------------------------------------------------------
/// An amount of some cryptocurrency, quoted at the precision appropriate to that currency.
///
/// The value is rounded to the currency's precision at construction time, so that the stored amount and the
/// rendered amount are always the same. `Display` and `Serialize` both render the fixed-precision string form,
/// e.g. `0.00100000` for 1 milli-BTC.
#[derive(Debug, Clone, PartialEq)]
pub struct CryptoAmount {
    currency: String,
    value: f64,
}

impl CryptoAmount {
    /// Create a new amount in the given currency, rounding the value to the currency's precision.
    /// The currency code is normalized to lowercase.
    pub fn new<S: Into<String>>(currency: S, value: f64) -> Self {
        let currency = currency.into().to_lowercase();
        let scale = 10f64.powi(decimals_for(&currency) as i32);
        let value = (value * scale).round() / scale;
        Self { currency, value }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}

impl Display for CryptoAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let decimals = decimals_for(&self.currency) as usize;
        write!(f, "{:.*}", decimals, self.value)
    }
}

impl Serialize for CryptoAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
