//! Autonomous trading agent signals
//!
//! Prices are quoted near fixed baselines and kept as [`Decimal`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{desc, seconds_ago};
use crate::kind::PanelKind;
use crate::notify::Toast;
use crate::panel::{RunInput, Simulation};
use crate::progress::TickConfig;
use crate::source::{round_to, DataSource, DataSourceExt};

pub const DEFAULT_SIGNALS: usize = 5;

/// Reference prices in USD
pub const BASELINES: [(&str, Decimal); 8] = [
    ("BTC", dec!(43250)),
    ("ETH", dec!(2280)),
    ("SOL", dec!(98.5)),
    ("BNB", dec!(312)),
    ("ADA", dec!(0.52)),
    ("XRP", dec!(0.61)),
    ("DOT", dec!(7.2)),
    ("AVAX", dec!(36.4)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
    Hold,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub asset: String,
    pub action: TradeAction,
    pub confidence: f64,
    pub price: Decimal,
    pub target_price: Decimal,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TradingAgent;

impl TradingAgent {
    fn quote(baseline: Decimal, source: &mut dyn DataSource) -> Decimal {
        // +/- 3% around the baseline, in basis points
        let factor = Decimal::new(i64::from(source.int_range(9_700, 10_300)), 4);
        let dp = if baseline < Decimal::ONE { 4 } else { 2 };
        (baseline * factor).round_dp(dp)
    }
}

impl Simulation for TradingAgent {
    type Record = Signal;

    fn kind(&self) -> PanelKind {
        PanelKind::TradingAgent
    }

    fn tick(&self) -> TickConfig {
        TickConfig::new(400, 15.0)
    }

    fn generate(&self, input: &RunInput, source: &mut dyn DataSource) -> Vec<Signal> {
        let count = input.count_or(DEFAULT_SIGNALS, BASELINES.len());
        let mut picks = source.sample_indices(BASELINES.len(), count);

        // A requested asset always gets a signal
        if let Some(asset) = input.asset.as_deref() {
            if let Some(i) = BASELINES.iter().position(|(s, _)| s.eq_ignore_ascii_case(asset)) {
                if !picks.contains(&i) {
                    picks.pop();
                    picks.insert(0, i);
                }
            }
        }

        let mut signals: Vec<_> = picks
            .into_iter()
            .map(|i| {
                let (asset, baseline) = BASELINES[i];
                let action = *source.pick(&[TradeAction::Buy, TradeAction::Sell, TradeAction::Hold]);
                let price = Self::quote(baseline, source);
                let dp = price.scale();
                let mv = Decimal::new(i64::from(source.int_range(2, 12)), 2);
                let target_price = match action {
                    TradeAction::Buy => price * (Decimal::ONE + mv),
                    TradeAction::Sell => price * (Decimal::ONE - mv),
                    TradeAction::Hold => price,
                }
                .round_dp(dp);

                Signal {
                    asset: asset.to_string(),
                    action,
                    confidence: round_to(source.range(55.0, 98.0), 1),
                    price,
                    target_price,
                    generated_at: seconds_ago(source, 300),
                }
            })
            .collect();

        signals.sort_by(|a, b| desc(a.confidence, b.confidence));
        signals
    }

    fn completion_toast(&self, records: &[Signal]) -> Toast {
        let buys = records.iter().filter(|s| s.action == TradeAction::Buy).count();
        Toast::info(
            "Trading Signals Ready",
            format!("{} signals generated, {} buy recommendations", records.len(), buys),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SeededSource;

    #[test]
    fn test_default_count_sorted_by_confidence() {
        let signals = TradingAgent.generate(&RunInput::default(), &mut SeededSource::new(11));
        assert_eq!(signals.len(), DEFAULT_SIGNALS);
        assert!(signals.windows(2).all(|w| w[0].confidence >= w[1].confidence));
        assert!(signals.iter().all(|s| (0.0..=100.0).contains(&s.confidence)));
    }

    #[test]
    fn test_prices_near_baseline() {
        let input = RunInput::default().with_count(8);
        let signals = TradingAgent.generate(&input, &mut SeededSource::new(5));
        assert_eq!(signals.len(), 8);

        for s in &signals {
            let (_, baseline) = *BASELINES.iter().find(|(a, _)| *a == s.asset).unwrap();
            assert!(s.price >= baseline * dec!(0.97) - dec!(0.0001));
            assert!(s.price <= baseline * dec!(1.03) + dec!(0.0001));
            match s.action {
                TradeAction::Buy => assert!(s.target_price > s.price),
                TradeAction::Sell => assert!(s.target_price < s.price),
                TradeAction::Hold => assert_eq!(s.target_price, s.price),
            }
        }
    }

    #[test]
    fn test_requested_asset_included() {
        let input = RunInput::default().with_asset("avax").with_count(1);
        let signals = TradingAgent.generate(&input, &mut SeededSource::new(2));
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].asset, "AVAX");
    }

    #[test]
    fn test_count_clamped_to_catalogue() {
        let input = RunInput::default().with_count(50);
        let signals = TradingAgent.generate(&input, &mut SeededSource::new(9));
        assert_eq!(signals.len(), BASELINES.len());
    }
}
