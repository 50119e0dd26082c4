use cpg_common::Secret;
use log::*;

pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Base URL of the Bot API. Overridable so that tests and self-hosted bot-api servers can point elsewhere.
    pub api_url: String,
    pub bot_token: Secret<String>,
    /// The chat the operator reads alerts in and replies to.
    pub chat_id: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self { api_url: DEFAULT_TELEGRAM_API_URL.to_string(), bot_token: Secret::default(), chat_id: String::default() }
    }
}

impl TelegramConfig {
    pub fn new_from_env_or_default() -> Self {
        let api_url = std::env::var("CPG_TELEGRAM_API_URL").unwrap_or_else(|_| DEFAULT_TELEGRAM_API_URL.to_string());
        let bot_token = Secret::new(std::env::var("CPG_BOT_TOKEN").unwrap_or_else(|_| {
            error!("🪛️ CPG_BOT_TOKEN is not set. Operator notifications and inbox polling will not work.");
            String::default()
        }));
        let chat_id = std::env::var("CPG_CHAT_ID").unwrap_or_else(|_| {
            error!("🪛️ CPG_CHAT_ID is not set. Operator notifications will not be delivered anywhere.");
            String::default()
        });
        Self { api_url, bot_token, chat_id }
    }
}
