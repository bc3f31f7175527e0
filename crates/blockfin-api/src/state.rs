//! Application state shared across handlers

use std::sync::Arc;
use std::time::Instant;

use blockfin_insights::{InsightsClient, InsightsService};
use blockfin_panels::{
    ChartScanner, DaoPanel, DataSource, Notifier, PanelKind, PanelRegistry, RandomSource,
};

/// Shared application state
pub struct AppState {
    /// AI-insights proxy
    pub insights: InsightsService,
    /// The simulated feature panels
    pub panels: PanelRegistry,
    pub dao: DaoPanel,
    pub chart_scanner: ChartScanner,
    /// Event bus streamed over `/api/events`
    pub notifier: Notifier,
    pub started_at: Instant,
}

impl AppState {
    /// Panels draw from thread-local entropy
    pub fn new(insights: InsightsService) -> Self {
        Self::with_sources(insights, |_| Box::new(RandomSource))
    }

    /// Panels draw from the sources built by `sources`
    pub fn with_sources<F>(insights: InsightsService, sources: F) -> Self
    where
        F: FnMut(PanelKind) -> Box<dyn DataSource>,
    {
        let notifier = Notifier::default();
        let panels = PanelRegistry::standard(&notifier, sources);
        let dao = DaoPanel::new(notifier.clone());
        // The scanner reaches the proxy in-process
        let client = InsightsClient::new(Arc::new(insights.clone()));
        let chart_scanner = ChartScanner::new(client, notifier.clone());

        Self {
            insights,
            panels,
            dao,
            chart_scanner,
            notifier,
            started_at: Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
