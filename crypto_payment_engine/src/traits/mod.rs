//! Backend trait definitions.
//!
//! This module defines the interface contracts between the payment engine and its external collaborators.
//!
//! * [`PaymentStore`] is the behaviour a storage backend must expose to hold payment records. The engine ships an
//!   in-process implementation ([`crate::MemoryStore`]); a durable backend can be slotted in behind the same trait
//!   without touching any callers.
//! * [`PriceFeed`] is a source of live USD quotes. The server crate implements it against a public price API; the
//!   oracle treats every feed failure as "fall back to the static rate table", never as a hard error.

mod payment_store;
mod price_feed;

pub use payment_store::{PaymentStore, PaymentStoreError, TransitionResult};
pub use price_feed::{PriceFeed, PriceFeedError};
