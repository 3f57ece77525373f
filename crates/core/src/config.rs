use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// API key pair for one exchange account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCredentials {
    pub api_key: String,
    pub api_secret: String,
}

/// Static configuration surface: read once at process start, immutable
/// afterwards. Passed explicitly into the entry point — there is no
/// module-level or environment-derived state in the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Credentials for the all-pairs-ticker venue.
    pub binance: ApiCredentials,

    /// Credentials for the per-pair-pricing venue.
    pub kraken: ApiCredentials,

    /// Manually tracked holdings added on top of the fetched ledgers:
    /// canonical (or normalizer-resolvable) symbol → quantity.
    #[serde(default)]
    pub wallet: BTreeMap<String, f64>,

    /// Stem of the report artifact (`{output_name}_chart.html`).
    #[serde(default = "default_output_name")]
    pub output_name: String,

    /// Extra native→canonical symbol mappings layered over the built-in
    /// table, keyed by source name ("binance", "kraken", "wallet").
    #[serde(default)]
    pub symbol_overrides: BTreeMap<String, BTreeMap<String, String>>,

    /// Holdings deliberately left out of the report (e.g. fiat balances
    /// that are not quoted against the base asset).
    #[serde(default = "default_excluded_assets")]
    pub excluded_assets: Vec<String>,
}

fn default_output_name() -> String {
    "totalBalance".to_string()
}

fn default_excluded_assets() -> Vec<String> {
    vec!["EUR".to_string()]
}

impl Config {
    /// Read and parse the JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        let config: Config = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.output_name.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "output_name must not be empty".into(),
            ));
        }
        for (symbol, quantity) in &self.wallet {
            if !quantity.is_finite() || *quantity < 0.0 {
                return Err(CoreError::InvalidConfig(format!(
                    "wallet quantity for {symbol} must be finite and non-negative, got {quantity}"
                )));
            }
        }
        Ok(())
    }
}
