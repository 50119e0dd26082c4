//! # Crypto Payment Engine
//!
//! The core logic for the crypto payment approval gateway. It is transport-agnostic: the HTTP server and the
//! Telegram integration both sit on top of this crate.
//!
//! The crate is divided into three main sections:
//! 1. The payment data types ([`mod@db_types`]): payment records, ids and the pending/approved/rejected status
//!    machine.
//! 2. The backend traits ([`mod@traits`]): [`traits::PaymentStore`] defines the behaviour a storage backend must
//!    expose, and [`traits::PriceFeed`] defines the behaviour of a live price source. The only storage backend
//!    shipped today is the in-process [`MemoryStore`]; a persistent backend can replace it without touching any
//!    callers.
//! 3. The public API: [`PaymentFlowApi`] wraps a storage backend and carries the payment lifecycle, and
//!    [`PriceOracle`] converts fiat prices into exact crypto amounts, preferring a live quote and falling back to a
//!    static rate table.

pub mod db_types;
mod flow_api;
mod memory;
pub mod oracle;
pub mod traits;

pub use flow_api::PaymentFlowApi;
pub use memory::MemoryStore;
pub use oracle::{Conversion, OracleError, PriceOracle, RateSource};
