//! Black swan scenario simulator

use serde::{Deserialize, Serialize};

use crate::kind::PanelKind;
use crate::notify::Toast;
use crate::panel::{RunInput, Simulation};
use crate::progress::TickConfig;
use crate::source::{DataSource, DataSourceExt};

/// Scenarios, in display order
pub const EVENTS: [&str; 5] = [
    "Major Exchange Insolvency",
    "Stablecoin Depeg",
    "Regulatory Ban in Major Market",
    "Critical Protocol Exploit",
    "Global Liquidity Crisis",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlackSwanScenario {
    pub event: String,
    /// Percent
    pub probability: f64,
    /// Portfolio impact, percent
    pub impact: f64,
    pub recovery_days: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BlackSwan;

impl Simulation for BlackSwan {
    type Record = BlackSwanScenario;

    fn kind(&self) -> PanelKind {
        PanelKind::BlackSwan
    }

    fn tick(&self) -> TickConfig {
        TickConfig::new(500, 15.0)
    }

    fn generate(&self, _input: &RunInput, source: &mut dyn DataSource) -> Vec<BlackSwanScenario> {
        EVENTS
            .iter()
            .map(|event| BlackSwanScenario {
                event: event.to_string(),
                probability: source.percent(),
                impact: source.percent(),
                recovery_days: source.int_range(7, 540),
            })
            .collect()
    }

    fn completion_toast(&self, records: &[BlackSwanScenario]) -> Toast {
        Toast::info(
            "Simulation Complete",
            format!("{} black swan scenarios analyzed", records.len()),
        )
    }
}
