use tracing::warn;

use crate::models::ledger::Ledger;
use crate::models::report::PieReport;

/// Projects the consolidated ledger into the (label, value) pairs the chart
/// needs. Read-only and idempotent.
pub struct ReportService {
    base_asset: String,
}

impl ReportService {
    pub fn new(base_asset: impl Into<String>) -> Self {
        Self {
            base_asset: base_asset.into(),
        }
    }

    /// One pair per ledger entry, in ledger iteration order.
    ///
    /// Display value: the base asset shows its quantity (by definition its
    /// value in base terms), everything else shows its derived value.
    /// Entries with neither are valuation gaps — logged, collected on the
    /// report, and excluded from the chart, but never fatal.
    #[must_use]
    pub fn extract(&self, ledger: &Ledger) -> PieReport {
        let mut report = PieReport::default();

        for (symbol, entry) in ledger.iter() {
            let value = if *symbol == self.base_asset {
                entry.quantity
            } else if let Some(value) = entry.derived_value {
                value
            } else {
                warn!(%symbol, "no price in {} resolvable, excluded from report", self.base_asset);
                report.skipped.push(symbol.clone());
                continue;
            };

            report.labels.push(symbol.clone());
            report.values.push(value);
            report.total += value;
        }

        report
    }
}
