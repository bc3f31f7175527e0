//! Quantum portfolio optimization
//!
//! Weights are percentages with one decimal and always sum to exactly 100.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::kind::PanelKind;
use crate::notify::Toast;
use crate::panel::{RunInput, Simulation};
use crate::progress::TickConfig;
use crate::source::{round_to, DataSource, DataSourceExt};

pub const PORTFOLIO: [&str; 5] = ["BTC", "ETH", "SOL", "USDC", "LINK"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationWeight {
    pub asset: String,
    pub current_weight: Decimal,
    pub optimal_weight: Decimal,
    /// Annualized, percent
    pub expected_return: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QuantumOptimization;

/// Split 100% across `n` random shares, in tenths of a percent
fn random_weights(n: usize, source: &mut dyn DataSource) -> Vec<Decimal> {
    let raw: Vec<f64> = (0..n).map(|_| source.range(0.5, 1.5)).collect();
    let total: f64 = raw.iter().sum();

    let mut tenths: Vec<i64> = raw.iter().map(|r| (r / total * 1000.0).floor() as i64).collect();
    let remainder = 1000 - tenths.iter().sum::<i64>();
    if let Some(max) = tenths.iter_mut().max() {
        *max += remainder;
    }

    tenths.into_iter().map(|t| Decimal::new(t, 1)).collect()
}

impl Simulation for QuantumOptimization {
    type Record = AllocationWeight;

    fn kind(&self) -> PanelKind {
        PanelKind::QuantumOptimization
    }

    fn tick(&self) -> TickConfig {
        TickConfig::new(700, 10.0)
    }

    fn generate(&self, _input: &RunInput, source: &mut dyn DataSource) -> Vec<AllocationWeight> {
        let current = random_weights(PORTFOLIO.len(), source);
        let optimal = random_weights(PORTFOLIO.len(), source);

        let mut weights: Vec<_> = PORTFOLIO
            .iter()
            .zip(current.into_iter().zip(optimal))
            .map(|(asset, (current_weight, optimal_weight))| AllocationWeight {
                asset: asset.to_string(),
                current_weight,
                optimal_weight,
                expected_return: round_to(source.range(2.0, 40.0), 1),
            })
            .collect();

        weights.sort_by(|a, b| b.optimal_weight.cmp(&a.optimal_weight));
        weights
    }

    fn completion_toast(&self, records: &[AllocationWeight]) -> Toast {
        let rebalanced = records
            .iter()
            .filter(|w| w.current_weight != w.optimal_weight)
            .count();
        Toast::info(
            "Optimization Complete",
            format!("Optimal allocation found; {} positions to rebalance", rebalanced),
        )
    }
}
