use tracing::debug;

use crate::errors::CoreError;
use crate::models::ledger::{Ledger, LedgerEntry};
use crate::providers::traits::{AccountProvider, PriceLookup, TickerProvider};
use crate::services::pacing::Pacer;
use crate::symbols::{Source, SymbolTable};

/// Builds per-source ledgers from exchange accounts.
///
/// Two fetch paths, matching the two kinds of venue:
/// - venues with a batched all-pairs ticker feed
///   ([`fetch_ticker_venue`](Self::fetch_ticker_venue));
/// - venues that answer one pair per price request and need pacing
///   ([`fetch_paced_venue`](Self::fetch_paced_venue)).
///
/// Any upstream failure aborts the fetch — this is a batch report tool,
/// the recovery mechanism is rerunning it.
pub struct FetchService {
    base_asset: String,
    excluded_assets: Vec<String>,
}

impl FetchService {
    pub fn new(base_asset: impl Into<String>, excluded_assets: Vec<String>) -> Self {
        Self {
            base_asset: base_asset.into(),
            excluded_assets,
        }
    }

    /// Fetch a ledger from a venue whose price feed quotes every pair at once.
    ///
    /// Balances with `free > 0` enter the ledger quantity-only; the ticker
    /// pass then attaches a unit price to every held asset that has a
    /// quote-to-base pair (suffix match on the pair symbol). Assets with no
    /// such pair — the base asset itself, mostly — keep quantity only.
    ///
    /// A second ticker matching an already-priced asset is a conflict and
    /// fails the fetch: the upstream feed is not supposed to quote one
    /// asset against the base twice.
    pub async fn fetch_ticker_venue(
        &self,
        account: &dyn AccountProvider,
        tickers: &dyn TickerProvider,
        table: &SymbolTable,
        source: Source,
    ) -> Result<Ledger, CoreError> {
        let mut ledger = Ledger::new();

        for balance in account.get_account_balances().await? {
            if balance.free <= 0.0 {
                continue;
            }
            let symbol = table.normalize(&balance.asset, source);
            ledger.insert(symbol, LedgerEntry::unpriced(balance.free));
        }

        for ticker in tickers.get_all_tickers().await? {
            let Some(asset) = ticker.pair.strip_suffix(self.base_asset.as_str()) else {
                continue;
            };
            let symbol = table.normalize(asset, source);
            let Some(entry) = ledger.get_mut(&symbol) else {
                continue;
            };
            if entry.unit_price.is_some() {
                return Err(CoreError::ConflictingTicker {
                    symbol,
                    pair: ticker.pair,
                });
            }
            entry.set_unit_price(ticker.price);
        }

        debug!(venue = account.venue(), entries = ledger.len(), "built ledger");
        Ok(ledger)
    }

    /// Fetch a ledger from a venue that prices one pair per request.
    ///
    /// Balances are resolved strictly — an asset name the symbol table does
    /// not know means the table is stale and the fetch fails. The base asset
    /// is recorded quantity-only (its value in base terms is its quantity);
    /// every other held asset costs one paced price request against the
    /// venue's synthesized quote-to-base pair.
    pub async fn fetch_paced_venue(
        &self,
        account: &dyn AccountProvider,
        prices: &dyn PriceLookup,
        table: &SymbolTable,
        source: Source,
        pacer: &mut Pacer,
    ) -> Result<Ledger, CoreError> {
        let mut ledger = Ledger::new();

        for balance in account.get_account_balances().await? {
            if balance.free <= 0.0 {
                continue;
            }
            let symbol = table.resolve_known(&balance.asset, source)?;

            if self.excluded_assets.iter().any(|a| *a == symbol) {
                debug!(venue = account.venue(), %symbol, "excluded from report");
                continue;
            }

            if symbol == self.base_asset {
                ledger.insert(symbol, LedgerEntry::unpriced(balance.free));
                continue;
            }

            let pair = self.pair_for(&symbol);
            pacer.pace().await;
            let price = prices.get_price(account.venue(), &pair).await?;
            ledger.insert(symbol, LedgerEntry::priced(balance.free, price));
        }

        debug!(venue = account.venue(), entries = ledger.len(), "built ledger");
        Ok(ledger)
    }

    /// Quote-to-base pair symbol in the per-pair feed's naming convention.
    fn pair_for(&self, symbol: &str) -> String {
        format!(
            "{}{}",
            symbol.to_lowercase(),
            self.base_asset.to_lowercase()
        )
    }
}
