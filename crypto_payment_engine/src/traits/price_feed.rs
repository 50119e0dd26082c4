use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum PriceFeedError {
    #[error("Could not initialize the price feed client: {0}")]
    Initialization(String),
    #[error("Price feed request failed: {0}")]
    RequestFailed(String),
    #[error("Could not interpret the price feed response: {0}")]
    MalformedResponse(String),
    #[error("The price feed does not know about the coin '{0}'")]
    UnknownCoin(String),
}

/// A source of live USD prices for the coins in the oracle's live-ID map.
///
/// Every error from this trait is recoverable from the oracle's point of view: it logs the failure and falls back
/// to its static rate table.
#[allow(async_fn_in_trait)]
pub trait PriceFeed {
    /// Fetch the current USD price for the given feed identifier (e.g. `bitcoin`, not `btc`).
    async fn usd_price(&self, coin_id: &str) -> Result<f64, PriceFeedError>;
}
