//! Strategy backtest

use serde::{Deserialize, Serialize};

use super::desc;
use crate::kind::PanelKind;
use crate::notify::Toast;
use crate::panel::{RunInput, Simulation};
use crate::progress::TickConfig;
use crate::source::{round_to, DataSource, DataSourceExt};

pub const STRATEGIES: [&str; 4] = [
    "Momentum Breakout",
    "Mean Reversion",
    "Grid Trading",
    "Trend Following",
];

pub const DEFAULT_ASSET: &str = "BTC/USDT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestResult {
    pub strategy: String,
    pub asset: String,
    /// Percent
    pub total_return: f64,
    pub sharpe_ratio: f64,
    /// Percent
    pub max_drawdown: f64,
    /// Percent
    pub win_rate: f64,
    pub trades: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Backtest;

impl Simulation for Backtest {
    type Record = BacktestResult;

    fn kind(&self) -> PanelKind {
        PanelKind::Backtest
    }

    fn tick(&self) -> TickConfig {
        TickConfig::new(500, 12.0)
    }

    fn generate(&self, input: &RunInput, source: &mut dyn DataSource) -> Vec<BacktestResult> {
        let asset = input.asset.as_deref().unwrap_or(DEFAULT_ASSET);

        let mut results: Vec<_> = STRATEGIES
            .iter()
            .map(|strategy| BacktestResult {
                strategy: strategy.to_string(),
                asset: asset.to_string(),
                total_return: round_to(source.range(-15.0, 85.0), 1),
                sharpe_ratio: round_to(source.range(0.3, 3.2), 2),
                max_drawdown: round_to(source.range(2.0, 35.0), 1),
                win_rate: round_to(source.range(35.0, 78.0), 1),
                trades: source.int_range(40, 400),
            })
            .collect();

        results.sort_by(|a, b| desc(a.total_return, b.total_return));
        results
    }

    fn completion_toast(&self, records: &[BacktestResult]) -> Toast {
        match records.first() {
            Some(best) => Toast::info(
                "Backtest Complete",
                format!("Best strategy: {} ({:+.1}%)", best.strategy, best.total_return),
            ),
            None => Toast::info("Backtest Complete", "No strategies were evaluated"),
        }
    }
}
