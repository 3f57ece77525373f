use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::traits::PriceLookup;
use crate::errors::CoreError;

const BASE_URL: &str = "https://api.cryptowat.ch";

/// Cryptowatch market-price client.
///
/// Free, no API key. One request per (venue, pair) — the callers pace their
/// own loops, this client stays dumb.
pub struct CryptowatchClient {
    client: Client,
}

impl CryptowatchClient {
    pub fn new() -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
        }
    }
}

impl Default for CryptowatchClient {
    fn default() -> Self {
        Self::new()
    }
}

// ── Cryptowatch API response types ──────────────────────────────────

#[derive(Deserialize)]
struct PriceResponse {
    result: PriceData,
}

#[derive(Deserialize)]
struct PriceData {
    price: f64,
}

#[async_trait]
impl PriceLookup for CryptowatchClient {
    async fn get_price(&self, venue: &str, pair: &str) -> Result<f64, CoreError> {
        let url = format!("{BASE_URL}/markets/{venue}/{pair}/price");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                venue: "cryptowatch".into(),
                message: format!("Price request for {venue}/{pair} failed with {status}"),
            });
        }

        let parsed: PriceResponse = resp.json().await.map_err(|e| CoreError::Api {
            venue: "cryptowatch".into(),
            message: format!("Failed to parse price for {venue}/{pair}: {e}"),
        })?;

        debug!(venue, pair, price = parsed.result.price, "resolved pair price");

        Ok(parsed.result.price)
    }
}
