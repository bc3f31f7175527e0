//! Fraud detection alerts

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{desc, seconds_ago};
use crate::kind::PanelKind;
use crate::notify::Toast;
use crate::panel::{RunInput, Simulation};
use crate::progress::TickConfig;
use crate::source::{DataSource, DataSourceExt};

pub const DEFAULT_ALERTS: usize = 6;
pub const MAX_ALERTS: usize = 20;

/// Risk score at or above which an alert counts as high risk
pub const HIGH_RISK: f64 = 75.0;

pub const CATEGORIES: [&str; 6] = [
    "Account Takeover",
    "Card Testing",
    "Money Laundering",
    "Phishing Payout",
    "Wash Trading",
    "Synthetic Identity",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudAlert {
    pub transaction_id: String,
    pub category: String,
    pub risk_score: f64,
    /// USD
    pub amount: Decimal,
    pub flagged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FraudDetection;

impl Simulation for FraudDetection {
    type Record = FraudAlert;

    fn kind(&self) -> PanelKind {
        PanelKind::FraudDetection
    }

    fn tick(&self) -> TickConfig {
        TickConfig::new(300, 8.0)
    }

    fn generate(&self, input: &RunInput, source: &mut dyn DataSource) -> Vec<FraudAlert> {
        let count = input.count_or(DEFAULT_ALERTS, MAX_ALERTS);

        let mut alerts: Vec<_> = (0..count)
            .map(|_| FraudAlert {
                transaction_id: format!("TX-{:06X}", source.int_range(0, 0xFF_FFFF)),
                category: source.pick(&CATEGORIES).to_string(),
                risk_score: source.percent(),
                amount: Decimal::new(i64::from(source.int_range(1_000, 5_000_000)), 2),
                flagged_at: seconds_ago(source, 3_600),
            })
            .collect();

        alerts.sort_by(|a, b| desc(a.risk_score, b.risk_score));
        alerts
    }

    fn completion_toast(&self, records: &[FraudAlert]) -> Toast {
        let high = records.iter().filter(|a| a.risk_score >= HIGH_RISK).count();
        Toast::info(
            "Fraud Scan Complete",
            format!("{} transactions flagged, {} high risk", records.len(), high),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SeededSource;

    #[test]
    fn test_sorted_by_descending_risk() {
        let alerts = FraudDetection.generate(&RunInput::default(), &mut SeededSource::new(21));
        assert_eq!(alerts.len(), DEFAULT_ALERTS);
        assert!(alerts.windows(2).all(|w| w[0].risk_score >= w[1].risk_score));
        for a in &alerts {
            assert!((0.0..=100.0).contains(&a.risk_score));
            assert!(a.transaction_id.starts_with("TX-"));
            assert!(a.amount > Decimal::ZERO);
            assert!(a.flagged_at <= Utc::now());
        }
    }

    #[test]
    fn test_count_from_input() {
        let input = RunInput::default().with_count(12);
        assert_eq!(FraudDetection.generate(&input, &mut SeededSource::new(4)).len(), 12);
    }
}
