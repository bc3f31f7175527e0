//! Chart pattern recognition

use serde::{Deserialize, Serialize};

use super::desc;
use crate::kind::PanelKind;
use crate::notify::Toast;
use crate::panel::{RunInput, Simulation};
use crate::progress::TickConfig;
use crate::source::{round_to, DataSource, DataSourceExt};

pub const PATTERNS_PER_SCAN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Bullish,
    Bearish,
    Neutral,
}

const CATALOGUE: [(&str, Direction); 7] = [
    ("Head and Shoulders", Direction::Bearish),
    ("Double Bottom", Direction::Bullish),
    ("Ascending Triangle", Direction::Bullish),
    ("Bull Flag", Direction::Bullish),
    ("Rising Wedge", Direction::Bearish),
    ("Cup and Handle", Direction::Bullish),
    ("Symmetrical Triangle", Direction::Neutral),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternMatch {
    pub pattern: String,
    pub direction: Direction,
    pub confidence: f64,
    /// Signed by direction
    pub target_move_pct: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChartPattern;

impl Simulation for ChartPattern {
    type Record = PatternMatch;

    fn kind(&self) -> PanelKind {
        PanelKind::ChartPattern
    }

    fn tick(&self) -> TickConfig {
        TickConfig::new(400, 18.0)
    }

    fn generate(&self, _input: &RunInput, source: &mut dyn DataSource) -> Vec<PatternMatch> {
        let mut matches: Vec<_> = source
            .sample_indices(CATALOGUE.len(), PATTERNS_PER_SCAN)
            .into_iter()
            .map(|i| {
                let (pattern, direction) = CATALOGUE[i];
                let confidence = round_to(source.range(60.0, 96.0), 1);
                let magnitude = round_to(source.range(2.0, 18.0), 1);
                PatternMatch {
                    pattern: pattern.to_string(),
                    direction,
                    confidence,
                    target_move_pct: match direction {
                        Direction::Bullish => magnitude,
                        Direction::Bearish => -magnitude,
                        Direction::Neutral => 0.0,
                    },
                }
            })
            .collect();

        matches.sort_by(|a, b| desc(a.confidence, b.confidence));
        matches
    }

    fn completion_toast(&self, records: &[PatternMatch]) -> Toast {
        match records.first() {
            Some(top) => Toast::info(
                "Pattern Scan Complete",
                format!("Strongest signal: {} ({:.1}% confidence)", top.pattern, top.confidence),
            ),
            None => Toast::info("Pattern Scan Complete", "No patterns detected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SeededSource;

    #[test]
    fn test_three_patterns_by_confidence() {
        let matches = ChartPattern.generate(&RunInput::default(), &mut SeededSource::new(13));
        assert_eq!(matches.len(), PATTERNS_PER_SCAN);
        assert!(matches.windows(2).all(|w| w[0].confidence >= w[1].confidence));
        for m in &matches {
            assert!((0.0..=100.0).contains(&m.confidence));
            match m.direction {
                Direction::Bullish => assert!(m.target_move_pct > 0.0),
                Direction::Bearish => assert!(m.target_move_pct < 0.0),
                Direction::Neutral => assert_eq!(m.target_move_pct, 0.0),
            }
        }
    }
}
