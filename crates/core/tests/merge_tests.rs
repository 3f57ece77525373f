// ═══════════════════════════════════════════════════════════════════
// Merge Tests — MergeService folding and manual-wallet augmentation
// ═══════════════════════════════════════════════════════════════════

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;

use balance_report_core::errors::CoreError;
use balance_report_core::models::ledger::{Ledger, LedgerEntry};
use balance_report_core::providers::traits::PriceLookup;
use balance_report_core::services::merge_service::MergeService;
use balance_report_core::symbols::SymbolTable;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn merger() -> MergeService {
    MergeService::new("BTC", "kraken")
}

fn ledger(entries: &[(&str, LedgerEntry)]) -> Ledger {
    let mut l = Ledger::new();
    for (symbol, entry) in entries {
        l.insert(symbol.to_string(), entry.clone());
    }
    l
}

// ── Mock price lookup ───────────────────────────────────────────────

/// Answers from a fixed (venue, pair) → price map; anything else fails.
struct MockPriceLookup {
    prices: HashMap<(String, String), f64>,
}

impl MockPriceLookup {
    fn new(prices: &[(&str, &str, f64)]) -> Self {
        Self {
            prices: prices
                .iter()
                .map(|(venue, pair, price)| ((venue.to_string(), pair.to_string()), *price))
                .collect(),
        }
    }

    fn empty() -> Self {
        Self::new(&[])
    }
}

#[async_trait]
impl PriceLookup for MockPriceLookup {
    async fn get_price(&self, venue: &str, pair: &str) -> Result<f64, CoreError> {
        self.prices
            .get(&(venue.to_string(), pair.to_string()))
            .copied()
            .ok_or_else(|| CoreError::Api {
                venue: venue.to_string(),
                message: format!("no market for {pair}"),
            })
    }
}

// ── Folding ─────────────────────────────────────────────────────────

#[test]
fn base_asset_balances_accumulate_quantity_only() {
    let a = ledger(&[("BTC", LedgerEntry::unpriced(0.002))]);
    let b = ledger(&[("BTC", LedgerEntry::unpriced(0.1))]);

    let merged = merger().merge(a, b);
    let btc = merged.get("BTC").unwrap();
    assert!(approx(btc.quantity, 0.102));
    assert_eq!(btc.derived_value, None);
}

#[test]
fn shared_assets_sum_quantities_and_values_without_revaluing() {
    // Source A: 1 ETH @ 0.05; source B: 2 ETH @ 0.051. The venues disagree
    // slightly on price; the merge sums what each already derived.
    let a = ledger(&[("ETH", LedgerEntry::priced(1.0, 0.05))]);
    let b = ledger(&[("ETH", LedgerEntry::priced(2.0, 0.051))]);

    let merged = merger().merge(a, b);
    let eth = merged.get("ETH").unwrap();
    assert!(approx(eth.quantity, 3.0));
    assert!(approx(eth.derived_value.unwrap(), 0.152));
}

#[test]
fn new_symbols_are_inserted_verbatim() {
    let a = ledger(&[("ETH", LedgerEntry::priced(1.0, 0.05))]);
    let b = ledger(&[("XMR", LedgerEntry::priced(4.0, 0.004))]);

    let merged = merger().merge(a, b);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged.get("XMR"), Some(&LedgerEntry::priced(4.0, 0.004)));
}

#[test]
fn entry_invariant_holds_after_every_merge_step() {
    let a = ledger(&[
        ("ETH", LedgerEntry::priced(1.0, 0.05)),
        ("BTC", LedgerEntry::unpriced(0.5)),
    ]);
    let b = ledger(&[
        ("ETH", LedgerEntry::priced(2.0, 0.051)),
        ("XRP", LedgerEntry::priced(50.0, 0.00001)),
    ]);
    let c = ledger(&[("ETH", LedgerEntry::priced(0.5, 0.049))]);

    let m = merger();
    let step1 = m.merge(a, b);
    for (_, entry) in step1.iter() {
        if let Some(price) = entry.unit_price {
            assert!(approx(entry.quantity * price, entry.derived_value.unwrap()));
        }
    }
    let step2 = m.merge(step1, c);
    for (_, entry) in step2.iter() {
        if let Some(price) = entry.unit_price {
            assert!(approx(entry.quantity * price, entry.derived_value.unwrap()));
        }
    }
}

#[test]
fn fold_order_does_not_change_the_outcome() {
    let a = ledger(&[
        ("BTC", LedgerEntry::unpriced(0.002)),
        ("ETH", LedgerEntry::priced(1.0, 0.05)),
        ("TRX", LedgerEntry::unpriced(100.0)),
    ]);
    let b = ledger(&[
        ("BTC", LedgerEntry::unpriced(0.1)),
        ("ETH", LedgerEntry::priced(2.0, 0.051)),
        ("XMR", LedgerEntry::priced(4.0, 0.004)),
    ]);
    let c = ledger(&[
        ("ETH", LedgerEntry::priced(0.5, 0.049)),
        ("TRX", LedgerEntry::priced(50.0, 0.000001)),
    ]);

    let m = merger();
    let left = m.merge(m.merge(a.clone(), b.clone()), c.clone());
    let right = m.merge(m.merge(b, c), a);

    let left_symbols: Vec<_> = left.iter().map(|(s, _)| s.clone()).collect();
    let right_symbols: Vec<_> = right.iter().map(|(s, _)| s.clone()).collect();
    assert_eq!(left_symbols, right_symbols);

    for (symbol, l_entry) in left.iter() {
        let r_entry = right.get(symbol).unwrap();
        assert!(approx(l_entry.quantity, r_entry.quantity), "{symbol} quantity");
        match (l_entry.derived_value, r_entry.derived_value) {
            (Some(lv), Some(rv)) => assert!(approx(lv, rv), "{symbol} value"),
            (None, None) => {}
            other => panic!("{symbol} value presence differs: {other:?}"),
        }
    }
}

// ── Wallet augmentation ─────────────────────────────────────────────

#[tokio::test]
async fn wallet_tops_up_an_existing_base_asset_entry() {
    let consolidated = ledger(&[("BTC", LedgerEntry::unpriced(0.2))]);
    let wallet = BTreeMap::from([("BTC".to_string(), 0.1)]);

    let result = merger()
        .apply_wallet(
            consolidated,
            &wallet,
            &SymbolTable::with_defaults(),
            &MockPriceLookup::empty(),
        )
        .await
        .unwrap();

    assert!(approx(result.get("BTC").unwrap().quantity, 0.3));
}

#[tokio::test]
async fn wallet_revalues_an_existing_priced_entry_at_its_own_price() {
    let consolidated = ledger(&[("ETH", LedgerEntry::priced(2.0, 0.05))]);
    let wallet = BTreeMap::from([("ETH".to_string(), 1.0)]);

    let result = merger()
        .apply_wallet(
            consolidated,
            &wallet,
            &SymbolTable::with_defaults(),
            &MockPriceLookup::empty(),
        )
        .await
        .unwrap();

    let eth = result.get("ETH").unwrap();
    assert!(approx(eth.quantity, 3.0));
    assert!(approx(eth.derived_value.unwrap(), 0.15));
}

#[tokio::test]
async fn wallet_inserts_the_base_asset_when_absent() {
    let wallet = BTreeMap::from([("BTC".to_string(), 0.1)]);

    let result = merger()
        .apply_wallet(
            Ledger::new(),
            &wallet,
            &SymbolTable::with_defaults(),
            &MockPriceLookup::empty(),
        )
        .await
        .unwrap();

    let btc = result.get("BTC").unwrap();
    assert!(approx(btc.quantity, 0.1));
    assert_eq!(btc.unit_price, None);
}

#[tokio::test]
async fn wallet_prices_a_new_known_symbol_via_the_lookup() {
    let wallet = BTreeMap::from([("XMR".to_string(), 4.0)]);
    let prices = MockPriceLookup::new(&[("kraken", "xmrbtc", 0.004)]);

    let result = merger()
        .apply_wallet(Ledger::new(), &wallet, &SymbolTable::with_defaults(), &prices)
        .await
        .unwrap();

    let xmr = result.get("XMR").unwrap();
    assert!(approx(xmr.quantity, 4.0));
    assert!(approx(xmr.derived_value.unwrap(), 0.016));
}

#[tokio::test]
async fn wallet_fails_on_an_unknown_unpriceable_symbol() {
    let wallet = BTreeMap::from([("WAT".to_string(), 1.0)]);

    let err = merger()
        .apply_wallet(
            Ledger::new(),
            &wallet,
            &SymbolTable::with_defaults(),
            &MockPriceLookup::empty(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::UnknownAsset(s) if s == "WAT"));
}

#[tokio::test]
async fn wallet_ignores_zero_quantities() {
    let wallet = BTreeMap::from([("WAT".to_string(), 0.0)]);

    // Zero quantity short-circuits before the unknown-symbol check.
    let result = merger()
        .apply_wallet(
            Ledger::new(),
            &wallet,
            &SymbolTable::with_defaults(),
            &MockPriceLookup::empty(),
        )
        .await
        .unwrap();

    assert!(result.is_empty());
}
