//! Honeypot threat captures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::seconds_ago;
use crate::kind::PanelKind;
use crate::notify::Toast;
use crate::panel::{RunInput, Simulation};
use crate::progress::TickConfig;
use crate::source::{DataSource, DataSourceExt};

pub const DEFAULT_CAPTURES: usize = 4;
pub const MAX_CAPTURES: usize = 12;

pub const ATTACK_VECTORS: [&str; 6] = [
    "SSH Brute Force",
    "SQL Injection",
    "Flash Loan Probe",
    "Reentrancy Probe",
    "Credential Stuffing",
    "RPC Flood",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl ThreatLevel {
    fn from_attempts(attempts: u32) -> Self {
        match attempts {
            0..=49 => Self::Low,
            50..=149 => Self::Medium,
            150..=349 => Self::High,
            _ => Self::Critical,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoneypotCapture {
    pub attacker_ip: String,
    pub attack_vector: String,
    pub attempts: u32,
    pub threat_level: ThreatLevel,
    pub captured_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Honeypot;

impl Simulation for Honeypot {
    type Record = HoneypotCapture;

    fn kind(&self) -> PanelKind {
        PanelKind::Honeypot
    }

    fn tick(&self) -> TickConfig {
        TickConfig::new(600, 12.0)
    }

    fn generate(&self, input: &RunInput, source: &mut dyn DataSource) -> Vec<HoneypotCapture> {
        let count = input.count_or(DEFAULT_CAPTURES, MAX_CAPTURES);

        let mut captures: Vec<_> = (0..count)
            .map(|_| {
                let attacker_ip = format!(
                    "{}.{}.{}.{}",
                    source.int_range(11, 223),
                    source.int_range(0, 255),
                    source.int_range(0, 255),
                    source.int_range(1, 254)
                );
                let attempts = source.int_range(3, 500);
                HoneypotCapture {
                    attacker_ip,
                    attack_vector: source.pick(&ATTACK_VECTORS).to_string(),
                    attempts,
                    threat_level: ThreatLevel::from_attempts(attempts),
                    captured_at: seconds_ago(source, 86_400),
                }
            })
            .collect();

        // Most recent first
        captures.sort_by(|a, b| b.captured_at.cmp(&a.captured_at));
        captures
    }

    fn completion_toast(&self, records: &[HoneypotCapture]) -> Toast {
        let critical = records
            .iter()
            .filter(|c| c.threat_level == ThreatLevel::Critical)
            .count();
        Toast::info(
            "Honeypot Report Ready",
            format!("{} attackers trapped, {} critical", records.len(), critical),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SeededSource;

    #[test]
    fn test_newest_capture_first() {
        let captures = Honeypot.generate(&RunInput::default(), &mut SeededSource::new(8));
        assert_eq!(captures.len(), DEFAULT_CAPTURES);
        assert!(captures.windows(2).all(|w| w[0].captured_at >= w[1].captured_at));
        for c in &captures {
            assert_eq!(c.attacker_ip.split('.').count(), 4);
            assert_eq!(c.threat_level, ThreatLevel::from_attempts(c.attempts));
        }
    }

    #[test]
    fn test_threat_level_thresholds() {
        assert_eq!(ThreatLevel::from_attempts(3), ThreatLevel::Low);
        assert_eq!(ThreatLevel::from_attempts(50), ThreatLevel::Medium);
        assert_eq!(ThreatLevel::from_attempts(200), ThreatLevel::High);
        assert_eq!(ThreatLevel::from_attempts(499), ThreatLevel::Critical);
        assert!(ThreatLevel::Critical > ThreatLevel::Low);
    }
}
