use std::collections::btree_map;
use std::collections::BTreeMap;

/// The asset every holding is valued in.
pub const BASE_ASSET: &str = "BTC";

/// One holding inside a ledger, keyed by its canonical symbol.
///
/// Invariant: whenever `unit_price` is present, `derived_value` equals
/// `quantity * unit_price`. The value is always recomputed from the other
/// two fields, never tracked independently, so the three can't drift apart.
/// Entries for the base asset (and assets with no quote-to-base ticker)
/// carry a quantity only.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    /// Free/available amount of the asset held. Non-negative.
    pub quantity: f64,

    /// Price of one unit in the base asset. Absent for the base asset itself.
    pub unit_price: Option<f64>,

    /// `quantity * unit_price` when a price is known; absent otherwise.
    pub derived_value: Option<f64>,
}

impl LedgerEntry {
    /// An entry with no known price (the base asset, or an asset no
    /// ticker quotes against the base asset).
    pub fn unpriced(quantity: f64) -> Self {
        Self {
            quantity,
            unit_price: None,
            derived_value: None,
        }
    }

    /// An entry with a known unit price; the derived value is computed here.
    pub fn priced(quantity: f64, unit_price: f64) -> Self {
        Self {
            quantity,
            unit_price: Some(unit_price),
            derived_value: Some(quantity * unit_price),
        }
    }

    /// Attach a unit price to an existing entry, deriving the value.
    pub fn set_unit_price(&mut self, unit_price: f64) {
        self.unit_price = Some(unit_price);
        self.derived_value = Some(self.quantity * unit_price);
    }

    /// Add quantity at the entry's existing unit price (manual-wallet top-up).
    /// An unpriced entry simply grows; it stays unpriced.
    pub fn add_quantity(&mut self, amount: f64) {
        self.quantity += amount;
        if let Some(price) = self.unit_price {
            self.derived_value = Some(self.quantity * price);
        }
    }

    /// Combine two entries for the same symbol from different sources.
    ///
    /// Quantities always sum. Derived values sum, an absent value
    /// contributing nothing — cross-venue unit prices are allowed to differ,
    /// so already-derived values are added rather than revalued. The unit
    /// price is then recomputed as the effective (blended) price so the
    /// entry invariant holds after every merge step. Summation makes this
    /// commutative and associative, so fold order never changes the outcome.
    pub fn combine(&self, other: &Self) -> Self {
        let quantity = self.quantity + other.quantity;
        let derived_value = match (self.derived_value, other.derived_value) {
            (Some(a), Some(b)) => Some(a + b),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        };
        let unit_price = derived_value.map(|v| if quantity > 0.0 { v / quantity } else { 0.0 });
        Self {
            quantity,
            unit_price,
            derived_value,
        }
    }
}

/// A per-source (or consolidated) view of holdings: canonical symbol →
/// [`LedgerEntry`], unique keys.
///
/// Backed by a `BTreeMap` so iteration — and therefore report output —
/// is deterministic. Zero-quantity assets are filtered at the fetchers
/// and never enter a ledger. Created fresh per run; no persistence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    entries: BTreeMap<String, LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `symbol`.
    pub fn insert(&mut self, symbol: impl Into<String>, entry: LedgerEntry) {
        self.entries.insert(symbol.into(), entry);
    }

    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&LedgerEntry> {
        self.entries.get(symbol)
    }

    pub fn get_mut(&mut self, symbol: &str) -> Option<&mut LedgerEntry> {
        self.entries.get_mut(symbol)
    }

    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(symbol)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in symbol order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, LedgerEntry> {
        self.entries.iter()
    }
}

impl IntoIterator for Ledger {
    type Item = (String, LedgerEntry);
    type IntoIter = btree_map::IntoIter<String, LedgerEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, LedgerEntry)> for Ledger {
    fn from_iter<I: IntoIterator<Item = (String, LedgerEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
