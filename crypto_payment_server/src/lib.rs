//! # Crypto payment approval gateway server
//! This crate hosts the HTTP server and the Telegram plumbing for the payment approval gateway. It is
//! responsible for:
//! * Accepting payment-intent notifications from the web client and pricing them via the oracle.
//! * Relaying each new payment to the human operator's Telegram chat.
//! * Polling the bot inbox for `/approve` and `/reject` replies and applying them to the payment store.
//! * Serving status lookup, listing and manual-override endpoints, plus the static client page.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! * `/health`: a health check route that returns a 200 OK response.
//! * `POST /api/notify`: create a payment and alert the operator.
//! * `GET /api/price/{crypto}/{usd}`: preview a conversion without creating anything.
//! * `GET /api/status/{id}`, `GET /api/payments`: status lookup and full dump.
//! * `GET /api/approve/{id}`, `GET /api/reject/{id}`: manual overrides that bypass Telegram.
//! * `GET /`: the static client entry page.

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod notifier;
pub mod poller;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
