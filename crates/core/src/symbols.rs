use std::collections::{BTreeMap, HashMap, HashSet};

use crate::errors::CoreError;

/// Where a native asset identifier came from. Sources use disjoint naming
/// schemes (Kraken prefixes legacy assets with X/Z; Binance and the manual
/// wallet use plain symbols), so normalization is keyed on the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Binance,
    Kraken,
    Wallet,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Binance => write!(f, "binance"),
            Source::Kraken => write!(f, "kraken"),
            Source::Wallet => write!(f, "wallet"),
        }
    }
}

/// Per-source native→canonical symbol mapping. Pure lookup, no I/O.
///
/// An explicit, injectable structure rather than a table buried in fetcher
/// code: new assets or venues are added through [`SymbolTable::with_overrides`]
/// (fed from configuration) without touching the fetch logic.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    maps: HashMap<Source, HashMap<String, String>>,
    /// Sources whose native scheme is known to need translation. An
    /// unrecognized identifier from one of these means the upstream asset
    /// universe changed and this table is stale — fail, don't guess.
    strict_sources: HashSet<Source>,
}

impl SymbolTable {
    /// Empty table: every identifier passes through unchanged.
    pub fn new() -> Self {
        Self {
            maps: HashMap::new(),
            strict_sources: HashSet::new(),
        }
    }

    /// Table seeded with the known Kraken asset names.
    pub fn with_defaults() -> Self {
        let kraken = [
            ("BCH", "BCH"),
            ("DASH", "DASH"),
            ("XETH", "ETH"),
            ("XREP", "REP"),
            ("XXBT", "BTC"),
            ("XXMR", "XMR"),
            ("XXRP", "XRP"),
            ("ZEUR", "EUR"),
        ];

        let mut maps = HashMap::new();
        maps.insert(
            Source::Kraken,
            kraken
                .iter()
                .map(|(native, canonical)| (native.to_string(), canonical.to_string()))
                .collect(),
        );

        Self {
            maps,
            strict_sources: HashSet::from([Source::Kraken]),
        }
    }

    /// Layer configuration overrides on top of the built-in defaults.
    /// Keys of the outer map are source names ("binance", "kraken", "wallet").
    /// Unknown source names are rejected rather than silently ignored.
    pub fn with_overrides(
        mut self,
        overrides: &BTreeMap<String, BTreeMap<String, String>>,
    ) -> Result<Self, CoreError> {
        for (source_name, mappings) in overrides {
            let source = match source_name.as_str() {
                "binance" => Source::Binance,
                "kraken" => Source::Kraken,
                "wallet" => Source::Wallet,
                other => {
                    return Err(CoreError::InvalidConfig(format!(
                        "unknown source '{other}' in symbol_overrides"
                    )))
                }
            };
            let map = self.maps.entry(source).or_default();
            for (native, canonical) in mappings {
                map.insert(native.clone(), canonical.to_uppercase());
            }
        }
        Ok(self)
    }

    /// Map a native identifier to its canonical symbol. Identifiers with no
    /// mapping are returned unchanged — most source-native names already
    /// match the canonical scheme.
    #[must_use]
    pub fn normalize(&self, native: &str, source: Source) -> String {
        self.maps
            .get(&source)
            .and_then(|m| m.get(native))
            .cloned()
            .unwrap_or_else(|| native.to_string())
    }

    /// Like [`normalize`](Self::normalize), but for sources whose scheme
    /// requires translation an unrecognized identifier is an error.
    pub fn resolve_known(&self, native: &str, source: Source) -> Result<String, CoreError> {
        match self.maps.get(&source).and_then(|m| m.get(native)) {
            Some(canonical) => Ok(canonical.clone()),
            None if self.strict_sources.contains(&source) => {
                Err(CoreError::UnknownAsset(native.to_string()))
            }
            None => Ok(native.to_string()),
        }
    }

    /// Whether `symbol` appears as a canonical value in any source table.
    /// The wallet-augmentation path only prices symbols it can place this way.
    #[must_use]
    pub fn is_known_canonical(&self, symbol: &str) -> bool {
        self.maps
            .values()
            .any(|m| m.values().any(|canonical| canonical == symbol))
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}
