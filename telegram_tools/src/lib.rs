//! A thin, typed client for the handful of Telegram Bot API methods the payment gateway uses:
//! `sendMessage` to alert the operator, and `getUpdates` (long poll) to read the operator's replies.

mod api;
mod config;
mod data_objects;
mod error;

pub use api::TelegramApi;
pub use config::TelegramConfig;
pub use data_objects::{ApiResponse, Message, SendMessage, Update};
pub use error::TelegramApiError;
