use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256, Sha512};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use super::traits::AccountProvider;
use crate::config::ApiCredentials;
use crate::errors::CoreError;
use crate::models::market::AssetBalance;

const BASE_URL: &str = "https://api.kraken.com";
const VENUE: &str = "kraken";

/// Kraken REST provider (account side only — Kraken's price feed has no
/// batched all-pairs call, so pricing goes through the per-pair
/// [`PriceLookup`](super::traits::PriceLookup) collaborator instead).
///
/// Private endpoints use the `API-Sign` scheme:
/// `HMAC-SHA512(path ++ SHA256(nonce ++ postdata))` keyed with the
/// base64-decoded secret, result base64-encoded.
pub struct KrakenProvider {
    client: Client,
    credentials: ApiCredentials,
}

impl KrakenProvider {
    pub fn new(credentials: ApiCredentials) -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            credentials,
        }
    }

    fn sign(&self, path: &str, nonce: i64, postdata: &str) -> Result<String, CoreError> {
        let secret = BASE64
            .decode(&self.credentials.api_secret)
            .map_err(|e| CoreError::Signing(format!("API secret is not valid base64: {e}")))?;

        let mut sha = Sha256::new();
        sha.update(nonce.to_string().as_bytes());
        sha.update(postdata.as_bytes());
        let digest = sha.finalize();

        let mut mac: Hmac<Sha512> = Hmac::new_from_slice(&secret)
            .map_err(|e| CoreError::Signing(e.to_string()))?;
        mac.update(path.as_bytes());
        mac.update(&digest);

        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }
}

// ── Kraken API response types ───────────────────────────────────────

#[derive(Deserialize)]
struct BalanceResponse {
    error: Vec<String>,
    #[serde(default)]
    result: Option<HashMap<String, String>>,
}

#[async_trait]
impl AccountProvider for KrakenProvider {
    fn venue(&self) -> &str {
        VENUE
    }

    async fn get_account_balances(&self) -> Result<Vec<AssetBalance>, CoreError> {
        let path = "/0/private/Balance";
        let nonce = chrono::Utc::now().timestamp_millis();
        let postdata = format!("nonce={nonce}");
        let signature = self.sign(path, nonce, &postdata)?;

        let resp: BalanceResponse = self
            .client
            .post(format!("{BASE_URL}{path}"))
            .header("API-Key", &self.credentials.api_key)
            .header("API-Sign", signature)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(postdata)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                venue: VENUE.into(),
                message: format!("Failed to parse balance response: {e}"),
            })?;

        if !resp.error.is_empty() {
            return Err(CoreError::Api {
                venue: VENUE.into(),
                message: resp.error.join("; "),
            });
        }

        let balances = resp.result.ok_or_else(|| CoreError::Api {
            venue: VENUE.into(),
            message: "Balance response carried neither result nor error".into(),
        })?;

        debug!(balances = balances.len(), "fetched account balances");

        balances
            .into_iter()
            .map(|(asset, amount)| {
                let free: f64 = amount.parse().map_err(|e| CoreError::Api {
                    venue: VENUE.into(),
                    message: format!("Invalid balance '{amount}' for {asset}: {e}"),
                })?;
                Ok(AssetBalance::new(asset, free))
            })
            .collect()
    }
}
