//! Core rate abstractions

pub mod config;
pub mod log;
pub mod rates;
pub mod source;
pub mod window;

// Re-export main types for cleaner imports
pub use rates::{CurrencyFilter, RateEntry, RateHistory, RatePair};
pub use source::ExchangeRateSource;
pub use window::RequestWindow;
