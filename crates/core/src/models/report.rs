use serde::Serialize;

use super::ledger::BASE_ASSET;

/// Chart-ready projection of the consolidated ledger.
///
/// The core computes all the numbers — the renderer only draws them.
/// `labels` and `values` are parallel, one pair per ledger entry in
/// iteration order. Entries that could not be expressed in the base asset
/// are listed in `skipped` (valuation gaps; non-fatal, reported alongside
/// the chart).
#[derive(Debug, Clone, Default, Serialize)]
pub struct PieReport {
    pub labels: Vec<String>,
    pub values: Vec<f64>,

    /// Sum of `values`: the estimated portfolio total in the base asset.
    pub total: f64,

    /// Symbols excluded because no price to the base asset was resolvable.
    pub skipped: Vec<String>,
}

impl PieReport {
    /// Chart title embedding the computed total, e.g.
    /// `"Estimated value: 0.652 BTC"`.
    #[must_use]
    pub fn title(&self) -> String {
        format!("Estimated value: {} {}", self.total, BASE_ASSET)
    }
}
