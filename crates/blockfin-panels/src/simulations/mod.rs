//! The nine simulated AI features

mod backtest;
mod biometric;
mod black_swan;
mod chart_pattern;
mod contract_audit;
mod fraud;
mod honeypot;
mod quantum;
mod trading_agent;

pub use backtest::{Backtest, BacktestResult};
pub use biometric::{Biometric, BiometricCheck};
pub use black_swan::{BlackSwan, BlackSwanScenario};
pub use chart_pattern::{ChartPattern, Direction, PatternMatch};
pub use contract_audit::{AuditFinding, ContractAudit, Severity};
pub use fraud::{FraudAlert, FraudDetection};
pub use honeypot::{Honeypot, HoneypotCapture, ThreatLevel};
pub use quantum::{AllocationWeight, QuantumOptimization};
pub use trading_agent::{Signal, TradeAction, TradingAgent};

use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};

use crate::source::{DataSource, DataSourceExt};

/// A timestamp up to `max_secs` seconds in the past
pub(crate) fn seconds_ago(source: &mut dyn DataSource, max_secs: u32) -> DateTime<Utc> {
    Utc::now() - Duration::seconds(i64::from(source.int_range(0, max_secs)))
}

/// Descending order for float keys
pub(crate) fn desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
