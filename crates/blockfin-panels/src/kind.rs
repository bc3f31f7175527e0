//! Panel identifiers

use serde::{Deserialize, Serialize};

/// The simulated AI features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Backtest,
    TradingAgent,
    QuantumOptimization,
    FraudDetection,
    Honeypot,
    BlackSwan,
    Biometric,
    ContractAudit,
    ChartPattern,
}

impl PanelKind {
    pub const ALL: [PanelKind; 9] = [
        Self::Backtest,
        Self::TradingAgent,
        Self::QuantumOptimization,
        Self::FraudDetection,
        Self::Honeypot,
        Self::BlackSwan,
        Self::Biometric,
        Self::ContractAudit,
        Self::ChartPattern,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backtest => "backtest",
            Self::TradingAgent => "trading_agent",
            Self::QuantumOptimization => "quantum_optimization",
            Self::FraudDetection => "fraud_detection",
            Self::Honeypot => "honeypot",
            Self::BlackSwan => "black_swan",
            Self::Biometric => "biometric",
            Self::ContractAudit => "contract_audit",
            Self::ChartPattern => "chart_pattern",
        }
    }

    /// Accepts snake_case and kebab-case names
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|k| k.as_str() == normalized)
    }

    /// Title shown on the panel
    pub fn title(&self) -> &'static str {
        match self {
            Self::Backtest => "AI Backtest Engine",
            Self::TradingAgent => "Autonomous Trading Agent",
            Self::QuantumOptimization => "Quantum Portfolio Optimization",
            Self::FraudDetection => "AI Fraud Detection",
            Self::Honeypot => "Honeypot Threat Monitor",
            Self::BlackSwan => "Black Swan Simulator",
            Self::Biometric => "Biometric Verification",
            Self::ContractAudit => "Smart Contract Audit",
            Self::ChartPattern => "Chart Pattern Recognition",
        }
    }
}

impl std::fmt::Display for PanelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for kind in PanelKind::ALL {
            assert_eq!(PanelKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(PanelKind::from_name("black-swan"), Some(PanelKind::BlackSwan));
        assert_eq!(PanelKind::from_name("lottery"), None);
    }

    #[test]
    fn test_serde_matches_as_str() {
        let json = serde_json::to_value(PanelKind::QuantumOptimization).unwrap();
        assert_eq!(json, "quantum_optimization");
    }
}
