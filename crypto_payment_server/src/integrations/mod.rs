mod coingecko;

pub use coingecko::CoinGeckoFeed;
