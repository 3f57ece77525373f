use std::collections::BTreeMap;

use tracing::debug;

use crate::errors::CoreError;
use crate::models::ledger::{Ledger, LedgerEntry};
use crate::providers::traits::PriceLookup;
use crate::symbols::{Source, SymbolTable};

/// Folds per-source ledgers into one consolidated view and applies the
/// manual-wallet augmentation step.
///
/// Pure merge logic — the only I/O is the price lookup for wallet symbols
/// no exchange ledger has priced.
pub struct MergeService {
    base_asset: String,
    /// Venue the [`PriceLookup`] collaborator is asked to quote wallet
    /// assets on.
    wallet_price_venue: String,
}

impl MergeService {
    pub fn new(base_asset: impl Into<String>, wallet_price_venue: impl Into<String>) -> Self {
        Self {
            base_asset: base_asset.into(),
            wallet_price_venue: wallet_price_venue.into(),
        }
    }

    /// Fold `incoming` into `base`.
    ///
    /// Per symbol: quantities sum, already-derived values sum (never
    /// revalued — minor cross-venue price differences are tolerated by
    /// design), symbols new to `base` are inserted verbatim. The summation
    /// in [`LedgerEntry::combine`] is commutative and associative, so the
    /// final totals do not depend on the fold order.
    #[must_use]
    pub fn merge(&self, mut base: Ledger, incoming: Ledger) -> Ledger {
        for (symbol, entry) in incoming {
            let merged = match base.get(&symbol) {
                Some(existing) => existing.combine(&entry),
                None => entry,
            };
            base.insert(symbol, merged);
        }
        base
    }

    /// Apply the manual wallet on top of the consolidated ledger. A distinct
    /// final step, run once after all exchange ledgers are folded.
    ///
    /// - Symbol already held: add quantity, value recomputed from the
    ///   *existing* unit price (an unpriced non-base entry stays unpriced
    ///   and will surface as a valuation gap at extraction).
    /// - Base asset not yet held: insert quantity-only.
    /// - New symbol the normalizer knows: resolve a unit price through the
    ///   price-lookup collaborator and insert a priced entry.
    /// - Anything else is fatal — the wallet names an asset nothing can
    ///   price, and guessing would silently misreport the portfolio.
    pub async fn apply_wallet(
        &self,
        mut ledger: Ledger,
        wallet: &BTreeMap<String, f64>,
        table: &SymbolTable,
        prices: &dyn PriceLookup,
    ) -> Result<Ledger, CoreError> {
        for (raw_symbol, &quantity) in wallet {
            if quantity <= 0.0 {
                continue;
            }
            let symbol = table.normalize(raw_symbol, Source::Wallet);

            if let Some(entry) = ledger.get_mut(&symbol) {
                entry.add_quantity(quantity);
                continue;
            }

            if symbol == self.base_asset {
                ledger.insert(symbol, LedgerEntry::unpriced(quantity));
                continue;
            }

            if !table.is_known_canonical(&symbol) {
                return Err(CoreError::UnknownAsset(symbol));
            }

            let pair = format!(
                "{}{}",
                symbol.to_lowercase(),
                self.base_asset.to_lowercase()
            );
            let price = prices.get_price(&self.wallet_price_venue, &pair).await?;
            debug!(%symbol, price, "priced wallet-only asset");
            ledger.insert(symbol, LedgerEntry::priced(quantity, price));
        }

        Ok(ledger)
    }
}
