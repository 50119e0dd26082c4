use std::env;

use log::*;
use telegram_tools::TelegramConfig;

const DEFAULT_CPG_HOST: &str = "127.0.0.1";
const DEFAULT_CPG_PORT: u16 = 3000;
const DEFAULT_STATIC_DIR: &str = "./static";
const DEFAULT_PRICE_API_URL: &str = "https://api.coingecko.com";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the static web client (index.html and friends), served at `/`.
    pub static_dir: String,
    /// Base URL of the price feed. Overridable so tests and mirrors can point elsewhere.
    pub price_api_url: String,
    /// Bot credential and operator chat id.
    pub telegram: TelegramConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_CPG_HOST.to_string(),
            port: DEFAULT_CPG_PORT,
            static_dir: DEFAULT_STATIC_DIR.to_string(),
            price_api_url: DEFAULT_PRICE_API_URL.to_string(),
            telegram: TelegramConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("CPG_HOST").ok().unwrap_or_else(|| DEFAULT_CPG_HOST.into());
        let port = env::var("CPG_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for CPG_PORT. {e} Using the default, {DEFAULT_CPG_PORT}, instead."
                    );
                    DEFAULT_CPG_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_CPG_PORT);
        let static_dir = env::var("CPG_STATIC_DIR").ok().unwrap_or_else(|| {
            info!("🪛️ CPG_STATIC_DIR is not set. Serving the client from {DEFAULT_STATIC_DIR}.");
            DEFAULT_STATIC_DIR.into()
        });
        let price_api_url = env::var("CPG_PRICE_API_URL").ok().unwrap_or_else(|| DEFAULT_PRICE_API_URL.into());
        let telegram = TelegramConfig::new_from_env_or_default();
        Self { host, port, static_dir, price_api_url, telegram }
    }
}
