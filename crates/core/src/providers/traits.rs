use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::market::{AssetBalance, Ticker};

/// Account-balances side of an exchange.
///
/// Each venue implements this against its own authenticated endpoint. If an
/// API changes, only that one implementation is touched — the fetchers and
/// merge logic never see wire formats.
#[async_trait]
pub trait AccountProvider: Send + Sync {
    /// Venue name for logs and errors (e.g. "binance").
    fn venue(&self) -> &str;

    /// All balances on the account, still under the venue's native asset
    /// names. Implementations may pre-filter zero balances but don't have
    /// to — the fetchers filter again.
    async fn get_account_balances(&self) -> Result<Vec<AssetBalance>, CoreError>;
}

/// Batched all-pairs price feed (venues that can quote everything at once).
#[async_trait]
pub trait TickerProvider: Send + Sync {
    async fn get_all_tickers(&self) -> Result<Vec<Ticker>, CoreError>;
}

/// Single-pair price lookup, for venues without a batched feed and for
/// resolving manual-wallet assets that no fetched ledger has priced.
#[async_trait]
pub trait PriceLookup: Send + Sync {
    /// Last trade price for `pair` on `venue`, in the pair's quote asset.
    async fn get_price(&self, venue: &str, pair: &str) -> Result<f64, CoreError>;
}
