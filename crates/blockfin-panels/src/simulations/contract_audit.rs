//! Smart contract audit findings

use serde::{Deserialize, Serialize};

use crate::kind::PanelKind;
use crate::notify::Toast;
use crate::panel::{RunInput, Simulation};
use crate::progress::TickConfig;
use crate::source::{DataSource, DataSourceExt};

pub const MIN_FINDINGS: u32 = 3;
pub const MAX_FINDINGS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

const CATALOGUE: [(Severity, &str, &str); 8] = [
    (
        Severity::Critical,
        "Reentrancy in withdraw()",
        "External call is made before the balance is updated.",
    ),
    (
        Severity::High,
        "Unrestricted mint function",
        "mint() has no access control; any caller can inflate supply.",
    ),
    (
        Severity::High,
        "Price oracle manipulation",
        "Spot price from a single AMM pool is used for collateral valuation.",
    ),
    (
        Severity::Medium,
        "Unchecked return value",
        "Return value of an ERC-20 transfer is ignored.",
    ),
    (
        Severity::Medium,
        "Centralized ownership",
        "Owner can pause transfers and change fees without a timelock.",
    ),
    (
        Severity::Low,
        "Floating pragma",
        "Compiler version is not pinned.",
    ),
    (
        Severity::Low,
        "Missing event emission",
        "State-changing admin functions do not emit events.",
    ),
    (
        Severity::Info,
        "Gas optimization",
        "Storage variables read in a loop can be cached in memory.",
    ),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditFinding {
    pub severity: Severity,
    pub title: String,
    pub description: String,
    /// Source line the finding points at
    pub line: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ContractAudit;

impl Simulation for ContractAudit {
    type Record = AuditFinding;

    fn kind(&self) -> PanelKind {
        PanelKind::ContractAudit
    }

    fn tick(&self) -> TickConfig {
        TickConfig::new(800, 10.0)
    }

    fn generate(&self, _input: &RunInput, source: &mut dyn DataSource) -> Vec<AuditFinding> {
        let count = source.int_range(MIN_FINDINGS, MAX_FINDINGS) as usize;

        let mut findings: Vec<_> = source
            .sample_indices(CATALOGUE.len(), count)
            .into_iter()
            .map(|i| {
                let (severity, title, description) = CATALOGUE[i];
                AuditFinding {
                    severity,
                    title: title.to_string(),
                    description: description.to_string(),
                    line: source.int_range(12, 480),
                }
            })
            .collect();

        findings.sort_by(|a, b| b.severity.cmp(&a.severity).then(a.line.cmp(&b.line)));
        findings
    }

    fn completion_toast(&self, records: &[AuditFinding]) -> Toast {
        let critical = records
            .iter()
            .filter(|f| f.severity == Severity::Critical)
            .count();
        let description = format!("{} findings, {} critical", records.len(), critical);
        if critical > 0 {
            Toast::destructive("Audit Complete", description)
        } else {
            Toast::info("Audit Complete", description)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SeededSource;

    #[test]
    fn test_three_to_six_findings_by_severity() {
        for seed in 0..25 {
            let findings = ContractAudit.generate(&RunInput::default(), &mut SeededSource::new(seed));
            assert!((3..=6).contains(&findings.len()));
            assert!(findings.windows(2).all(|w| w[0].severity >= w[1].severity));

            let mut titles: Vec<_> = findings.iter().map(|f| f.title.as_str()).collect();
            titles.dedup();
            assert_eq!(titles.len(), findings.len());
        }
    }

    #[test]
    fn test_severity_order_and_wire_name() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::Low > Severity::Info);
        assert_eq!(serde_json::to_value(Severity::Medium).unwrap(), "medium");
    }
}
