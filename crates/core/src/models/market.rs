//! Shapes returned by the provider traits. Each provider deserializes its
//! own wire format privately and maps it into these.

/// One asset balance reported by an exchange account endpoint.
/// The asset identifier is still source-native at this point.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetBalance {
    pub asset: String,
    pub free: f64,
}

impl AssetBalance {
    pub fn new(asset: impl Into<String>, free: f64) -> Self {
        Self {
            asset: asset.into(),
            free,
        }
    }
}

/// One trading-pair price from an all-pairs ticker list.
/// `pair` is the venue's concatenated pair symbol (e.g. "ETHBTC").
#[derive(Debug, Clone, PartialEq)]
pub struct Ticker {
    pub pair: String,
    pub price: f64,
}

impl Ticker {
    pub fn new(pair: impl Into<String>, price: f64) -> Self {
        Self {
            pair: pair.into(),
            price,
        }
    }
}
