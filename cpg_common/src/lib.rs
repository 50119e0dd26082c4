mod crypto_amount;
mod secret;

pub use crypto_amount::{decimals_for, CryptoAmount, CURRENCY_DECIMALS, DEFAULT_DECIMALS};
pub use secret::Secret;
