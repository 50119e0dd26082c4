use std::sync::Arc;

use crypto_payment_engine::traits::{PriceFeed, PriceFeedError};
use log::*;
use reqwest::Client;
use serde_json::Value;

/// [`PriceFeed`] implementation backed by the CoinGecko `simple/price` endpoint.
///
/// Every failure here is recoverable: the oracle falls back to its static rate table, so this client reports
/// errors rather than retrying or caching.
#[derive(Clone)]
pub struct CoinGeckoFeed {
    base_url: String,
    client: Arc<Client>,
}

impl CoinGeckoFeed {
    pub fn new(base_url: &str) -> Result<Self, PriceFeedError> {
        let client = Client::builder().build().map_err(|e| PriceFeedError::Initialization(e.to_string()))?;
        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), client: Arc::new(client) })
    }
}

impl PriceFeed for CoinGeckoFeed {
    async fn usd_price(&self, coin_id: &str) -> Result<f64, PriceFeedError> {
        let url = format!("{}/api/v3/simple/price", self.base_url);
        trace!("📈️ Fetching USD quote for {coin_id}");
        let response = self
            .client
            .get(&url)
            .query(&[("ids", coin_id), ("vs_currencies", "usd")])
            .send()
            .await
            .map_err(|e| PriceFeedError::RequestFailed(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(PriceFeedError::RequestFailed(format!("price feed returned status {status}")));
        }
        let body = response.json::<Value>().await.map_err(|e| PriceFeedError::MalformedResponse(e.to_string()))?;
        // An unknown coin id comes back as an empty object rather than an error status.
        body[coin_id]["usd"].as_f64().ok_or_else(|| PriceFeedError::UnknownCoin(coin_id.to_string()))
    }
}
