pub mod config;
pub mod errors;
pub mod models;
pub mod providers;
pub mod render;
pub mod services;
pub mod symbols;

use std::path::PathBuf;

use tracing::info;

use config::Config;
use errors::CoreError;
use models::ledger::{Ledger, BASE_ASSET};
use models::report::PieReport;
use providers::binance::BinanceProvider;
use providers::cryptowatch::CryptowatchClient;
use providers::kraken::KrakenProvider;
use render::{ChartRenderer, HtmlPieRenderer};
use services::fetch_service::FetchService;
use services::merge_service::MergeService;
use services::pacing::Pacer;
use services::report_service::ReportService;
use symbols::{Source, SymbolTable};

/// Main entry point for the Balance Report core library.
///
/// Built once from an immutable [`Config`]; owns the exchange providers and
/// the services that turn their answers into one consolidated, BTC-valued
/// ledger. One [`run`](Self::run) per report — fetch, fold, augment,
/// extract, render — then the process exits.
#[must_use]
pub struct BalanceReporter {
    config: Config,
    symbols: SymbolTable,
    fetch: FetchService,
    merger: MergeService,
    reporter: ReportService,
    binance: BinanceProvider,
    kraken: KrakenProvider,
    prices: CryptowatchClient,
}

impl BalanceReporter {
    pub fn new(config: Config) -> Result<Self, CoreError> {
        let symbols = SymbolTable::with_defaults().with_overrides(&config.symbol_overrides)?;
        let fetch = FetchService::new(BASE_ASSET, config.excluded_assets.clone());
        let merger = MergeService::new(BASE_ASSET, Source::Kraken.to_string());
        let reporter = ReportService::new(BASE_ASSET);
        let binance = BinanceProvider::new(config.binance.clone());
        let kraken = KrakenProvider::new(config.kraken.clone());
        let prices = CryptowatchClient::new();

        Ok(Self {
            config,
            symbols,
            fetch,
            merger,
            reporter,
            binance,
            kraken,
            prices,
        })
    }

    /// Fetch both venues, fold their ledgers, and apply the manual wallet.
    ///
    /// The fetches are order-independent, but the wallet step must come
    /// last: it augments entries the exchange fetches created.
    async fn consolidate(&self) -> Result<Ledger, CoreError> {
        info!("fetching binance balances");
        let binance_ledger = self
            .fetch
            .fetch_ticker_venue(&self.binance, &self.binance, &self.symbols, Source::Binance)
            .await?;

        info!("fetching kraken balances");
        let mut pacer = Pacer::default();
        let kraken_ledger = self
            .fetch
            .fetch_paced_venue(
                &self.kraken,
                &self.prices,
                &self.symbols,
                Source::Kraken,
                &mut pacer,
            )
            .await?;

        let merged = self.merger.merge(binance_ledger, kraken_ledger);

        self.merger
            .apply_wallet(merged, &self.config.wallet, &self.symbols, &self.prices)
            .await
    }

    /// Produce the chart-ready report without rendering it.
    pub async fn generate(&self) -> Result<PieReport, CoreError> {
        let ledger = self.consolidate().await?;
        let report = self.reporter.extract(&ledger);
        info!(
            assets = report.labels.len(),
            skipped = report.skipped.len(),
            total = report.total,
            "report generated"
        );
        Ok(report)
    }

    /// Generate the report and render it with the given renderer.
    /// Returns the report and the path of the written artifact.
    pub async fn run_with(
        &self,
        renderer: &dyn ChartRenderer,
    ) -> Result<(PieReport, PathBuf), CoreError> {
        let report = self.generate().await?;
        let path = renderer.render_pie(
            &report.labels,
            &report.values,
            &report.title(),
            &self.config.output_name,
        )?;
        Ok((report, path))
    }

    /// Generate the report and write the HTML pie chart into the current
    /// directory.
    pub async fn run(&self) -> Result<(PieReport, PathBuf), CoreError> {
        self.run_with(&HtmlPieRenderer::default()).await
    }
}
