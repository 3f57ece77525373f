pub mod traits;

// API provider implementations
pub mod binance;
pub mod cryptowatch;
pub mod kraken;
