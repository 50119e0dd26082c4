use std::sync::Arc;

use log::*;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::TelegramConfig,
    data_objects::{ApiResponse, SendMessage, Update},
    TelegramApiError,
};

#[derive(Clone)]
pub struct TelegramApi {
    config: TelegramConfig,
    client: Arc<Client>,
}

impl TelegramApi {
    pub fn new(config: TelegramConfig) -> Result<Self, TelegramApiError> {
        let client = Client::builder().build().map_err(|e| TelegramApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    // The URL embeds the bot token, so it must never appear in logs. Log the method name instead.
    fn method_url(&self, method: &str) -> String {
        let base = self.config.api_url.trim_end_matches('/');
        format!("{base}/bot{}/{method}", self.config.bot_token.reveal())
    }

    /// Send a text message to the operator chat. `markdown` enables Telegram's Markdown parse mode.
    pub async fn send_message(&self, text: &str, markdown: bool) -> Result<(), TelegramApiError> {
        let body = SendMessage {
            chat_id: self.config.chat_id.clone(),
            text: text.to_string(),
            parse_mode: markdown.then(|| "Markdown".to_string()),
        };
        let _confirmed: serde_json::Value = self.post("sendMessage", &body).await?;
        trace!("📤️ sendMessage delivered to chat {}", self.config.chat_id);
        Ok(())
    }

    /// Long-poll for inbox updates with a sequence number greater than or equal to `offset`, waiting up to
    /// `timeout_secs` on the server side before returning an empty batch.
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>, TelegramApiError> {
        let params = [("offset", offset.to_string()), ("timeout", timeout_secs.to_string())];
        let updates: Vec<Update> = self.get("getUpdates", &params).await?;
        if !updates.is_empty() {
            debug!("📥️ getUpdates returned {} update(s)", updates.len());
        }
        Ok(updates)
    }

    async fn get<T: DeserializeOwned>(&self, method: &str, params: &[(&str, String)]) -> Result<T, TelegramApiError> {
        trace!("📞️ Calling Bot API method {method}");
        let response = self
            .client
            .get(self.method_url(method))
            .query(params)
            .send()
            .await
            .map_err(|e| TelegramApiError::ResponseError(e.to_string()))?;
        Self::unwrap_envelope(method, response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, method: &str, body: &B) -> Result<T, TelegramApiError> {
        trace!("📞️ Calling Bot API method {method}");
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| TelegramApiError::ResponseError(e.to_string()))?;
        Self::unwrap_envelope(method, response).await
    }

    async fn unwrap_envelope<T: DeserializeOwned>(
        method: &str,
        response: reqwest::Response,
    ) -> Result<T, TelegramApiError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| TelegramApiError::ResponseError(e.to_string()))?;
            return Err(TelegramApiError::QueryError { status, message });
        }
        let envelope =
            response.json::<ApiResponse<T>>().await.map_err(|e| TelegramApiError::JsonError(e.to_string()))?;
        if !envelope.ok {
            let description = envelope.description.unwrap_or_else(|| format!("{method} failed without a description"));
            return Err(TelegramApiError::ApiError(description));
        }
        envelope.result.ok_or_else(|| TelegramApiError::ResponseError(format!("{method} returned an empty result")))
    }
}
