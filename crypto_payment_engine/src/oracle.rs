//! The price oracle converts a fiat (USD) price into an exact crypto amount.
//!
//! It prefers a live quote from the injected [`PriceFeed`] and falls back to a hardcoded static rate table when
//! the feed is unavailable. Feed failures are therefore never surfaced to callers; the only error the oracle can
//! return is [`OracleError::UnsupportedCurrency`], for a currency that neither the live-ID map nor the fallback
//! table knows about.

use std::fmt::{Debug, Display};

use cpg_common::CryptoAmount;
use log::*;
use thiserror::Error;

use crate::traits::PriceFeed;

/// Currency code → live price-feed identifier. Configuration data, not logic.
pub const LIVE_FEED_IDS: [(&str, &str); 6] = [
    ("btc", "bitcoin"),
    ("eth", "ethereum"),
    ("sol", "solana"),
    ("ltc", "litecoin"),
    ("usdt", "tether"),
    ("usdc", "usd-coin"),
];

/// Static USD rates used when the live feed is unavailable.
pub const FALLBACK_RATES_USD: [(&str, f64); 6] =
    [("btc", 100_000.0), ("eth", 3_500.0), ("sol", 200.0), ("ltc", 100.0), ("usdt", 1.0), ("usdc", 1.0)];

/// Currencies pegged 1:1 to USD. These never hit the live feed.
const STABLECOINS: [&str; 2] = ["usdt", "usdc"];

fn live_feed_id(currency: &str) -> Option<&'static str> {
    LIVE_FEED_IDS.iter().find(|(code, _)| *code == currency).map(|(_, id)| *id)
}

fn fallback_rate(currency: &str) -> Option<f64> {
    FALLBACK_RATES_USD.iter().find(|(code, _)| *code == currency).map(|(_, rate)| *rate)
}

fn is_stablecoin(currency: &str) -> bool {
    STABLECOINS.contains(&currency)
}

/// Where the rate used for a conversion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    /// A fresh quote from the price feed, or the fixed 1:1 peg for stablecoins.
    Live,
    /// The static rate table; the feed was tried and failed.
    Fallback,
}

impl Display for RateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateSource::Live => write!(f, "live"),
            RateSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// The result of one conversion: the exact amount due, the USD rate that was used, and where that rate came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: CryptoAmount,
    pub rate: f64,
    pub source: RateSource,
}

#[derive(Debug, Clone, Error)]
pub enum OracleError {
    #[error("No price is available for the currency '{0}'")]
    UnsupportedCurrency(String),
}

pub struct PriceOracle<F> {
    feed: F,
}

impl<F> Debug for PriceOracle<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PriceOracle")
    }
}

impl<F> PriceOracle<F>
where F: PriceFeed
{
    pub fn new(feed: F) -> Self {
        Self { feed }
    }

    /// Convert `fiat_amount` USD into an exact amount of `currency`.
    ///
    /// The currency code is matched case-insensitively. Stablecoins short-circuit to a 1:1 rate without a feed
    /// call. For everything else a live quote is attempted first; any feed failure falls back to the static rate
    /// table. [`Conversion::source`] reports which rate was used so callers can pass that on to the operator.
    pub async fn convert(&self, currency: &str, fiat_amount: f64) -> Result<Conversion, OracleError> {
        let code = currency.to_lowercase();
        if is_stablecoin(&code) {
            return Ok(conversion(&code, fiat_amount, 1.0, RateSource::Live));
        }
        if let Some(id) = live_feed_id(&code) {
            match self.feed.usd_price(id).await {
                Ok(rate) if rate > 0.0 => {
                    trace!("📈️ Live quote for {code}: ${rate}");
                    return Ok(conversion(&code, fiat_amount, rate, RateSource::Live));
                },
                Ok(rate) => {
                    warn!("📈️ The price feed returned a non-positive USD quote ({rate}) for {code}. Using the static rate.");
                },
                Err(e) => {
                    warn!("📈️ Could not fetch a live quote for {code}. {e}. Using the static rate.");
                },
            }
        }
        match fallback_rate(&code) {
            Some(rate) => Ok(conversion(&code, fiat_amount, rate, RateSource::Fallback)),
            None => Err(OracleError::UnsupportedCurrency(code)),
        }
    }
}

fn conversion(currency: &str, fiat_amount: f64, rate: f64, source: RateSource) -> Conversion {
    let amount = CryptoAmount::new(currency, fiat_amount / rate);
    Conversion { amount, rate, source }
}
