use thiserror::Error;

/// Unified error type for the entire balance-report-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// Valuation gaps (an entry that cannot be expressed in BTC) are *not*
/// errors — they are logged and collected on the report instead.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Assets / Symbols ────────────────────────────────────────────
    #[error("Unknown asset '{0}' — the symbol mapping table is stale, refusing to guess")]
    UnknownAsset(String),

    #[error("Conflicting ticker '{pair}' for {symbol}: asset is already priced")]
    ConflictingTicker { symbol: String, pair: String },

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({venue}): {message}")]
    Api {
        venue: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request signing failed: {0}")]
    Signing(String),

    // ── Configuration / I/O ─────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs to prevent
        // API key leakage. reqwest errors often contain full URLs with secrets.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
