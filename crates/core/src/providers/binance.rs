use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Deserialize;
use sha2::Sha256;
use std::time::Duration;
use tracing::debug;

use super::traits::{AccountProvider, TickerProvider};
use crate::config::ApiCredentials;
use crate::errors::CoreError;
use crate::models::market::{AssetBalance, Ticker};

const BASE_URL: &str = "https://api.binance.com";
const VENUE: &str = "binance";

/// Binance REST provider.
///
/// - `/api/v3/account` — signed: HMAC-SHA256 over the query string, key in
///   the `X-MBX-APIKEY` header.
/// - `/api/v3/ticker/price` — public, returns every pair in one call.
pub struct BinanceProvider {
    client: Client,
    credentials: ApiCredentials,
}

impl BinanceProvider {
    pub fn new(credentials: ApiCredentials) -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            credentials,
        }
    }

    fn sign(&self, params: &str) -> Result<String, CoreError> {
        let mut mac: Hmac<Sha256> = Hmac::new_from_slice(self.credentials.api_secret.as_bytes())
            .map_err(|e| CoreError::Signing(e.to_string()))?;
        mac.update(params.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

// ── Binance API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct AccountResponse {
    balances: Vec<BalanceData>,
}

#[derive(Deserialize)]
struct BalanceData {
    asset: String,
    free: String,
}

#[derive(Deserialize)]
struct TickerData {
    symbol: String,
    price: String,
}

fn parse_amount(raw: &str, what: &str) -> Result<f64, CoreError> {
    raw.parse().map_err(|e| CoreError::Api {
        venue: VENUE.into(),
        message: format!("Invalid {what} '{raw}': {e}"),
    })
}

#[async_trait]
impl AccountProvider for BinanceProvider {
    fn venue(&self) -> &str {
        VENUE
    }

    async fn get_account_balances(&self) -> Result<Vec<AssetBalance>, CoreError> {
        let timestamp = chrono::Utc::now().timestamp_millis();
        let params = format!("timestamp={timestamp}");
        let signature = self.sign(&params)?;

        let url = reqwest::Url::parse_with_params(
            &format!("{BASE_URL}/api/v3/account"),
            [
                ("timestamp", timestamp.to_string()),
                ("signature", signature),
            ],
        )
        .map_err(|e| CoreError::Api {
            venue: VENUE.into(),
            message: format!("Failed to build account URL: {e}"),
        })?;

        let resp = self
            .client
            .get(url)
            .header("X-MBX-APIKEY", &self.credentials.api_key)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CoreError::Api {
                venue: VENUE.into(),
                message: format!("Account request failed with {status}: {body}"),
            });
        }

        let account: AccountResponse = resp.json().await.map_err(|e| CoreError::Api {
            venue: VENUE.into(),
            message: format!("Failed to parse account response: {e}"),
        })?;

        debug!(balances = account.balances.len(), "fetched account balances");

        account
            .balances
            .into_iter()
            .map(|b| {
                let free = parse_amount(&b.free, "balance")?;
                Ok(AssetBalance::new(b.asset, free))
            })
            .collect()
    }
}

#[async_trait]
impl TickerProvider for BinanceProvider {
    async fn get_all_tickers(&self) -> Result<Vec<Ticker>, CoreError> {
        let url = format!("{BASE_URL}/api/v3/ticker/price");

        let tickers: Vec<TickerData> = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                venue: VENUE.into(),
                message: format!("Failed to parse ticker list: {e}"),
            })?;

        debug!(tickers = tickers.len(), "fetched ticker list");

        tickers
            .into_iter()
            .map(|t| {
                let price = parse_amount(&t.price, "ticker price")?;
                Ok(Ticker::new(t.symbol, price))
            })
            .collect()
    }
}
