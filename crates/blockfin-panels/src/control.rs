//! Type-erased panel control and the panel registry

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::error::PanelError;
use crate::kind::PanelKind;
use crate::notify::Notifier;
use crate::panel::{Panel, RunInput, RunStatus, Simulation};
use crate::simulations;
use crate::source::DataSource;

/// Object-safe view of a [`Panel`], whatever its record type
#[async_trait]
pub trait PanelControl: Send + Sync {
    fn kind(&self) -> PanelKind;

    async fn status(&self) -> RunStatus;

    async fn start(&self, input: RunInput) -> Result<Uuid, PanelError>;

    async fn stop(&self) -> Result<(), PanelError>;

    async fn reset(&self);

    /// The panel's snapshot as JSON
    async fn snapshot_json(&self) -> serde_json::Result<Value>;
}

#[async_trait]
impl<S: Simulation> PanelControl for Panel<S> {
    fn kind(&self) -> PanelKind {
        Panel::kind(self)
    }

    async fn status(&self) -> RunStatus {
        Panel::status(self).await
    }

    async fn start(&self, input: RunInput) -> Result<Uuid, PanelError> {
        Panel::start(self, input).await
    }

    async fn stop(&self) -> Result<(), PanelError> {
        Panel::stop(self).await
    }

    async fn reset(&self) {
        Panel::reset(self).await
    }

    async fn snapshot_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self.snapshot().await)
    }
}

/// Every panel of the app, keyed by kind
#[derive(Clone, Default)]
pub struct PanelRegistry {
    panels: HashMap<PanelKind, Arc<dyn PanelControl>>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All nine panels, each with its own source from `sources`
    pub fn standard<F>(notifier: &Notifier, mut sources: F) -> Self
    where
        F: FnMut(PanelKind) -> Box<dyn DataSource>,
    {
        use PanelKind::*;

        let mut registry = Self::new();
        for kind in PanelKind::ALL {
            let source = sources(kind);
            let notifier = notifier.clone();
            let panel: Arc<dyn PanelControl> = match kind {
                Backtest => Arc::new(Panel::with_source(simulations::Backtest, notifier, source)),
                TradingAgent => Arc::new(Panel::with_source(
                    simulations::TradingAgent,
                    notifier,
                    source,
                )),
                QuantumOptimization => Arc::new(Panel::with_source(
                    simulations::QuantumOptimization,
                    notifier,
                    source,
                )),
                FraudDetection => Arc::new(Panel::with_source(
                    simulations::FraudDetection,
                    notifier,
                    source,
                )),
                Honeypot => Arc::new(Panel::with_source(simulations::Honeypot, notifier, source)),
                BlackSwan => Arc::new(Panel::with_source(simulations::BlackSwan, notifier, source)),
                Biometric => Arc::new(Panel::with_source(simulations::Biometric, notifier, source)),
                ContractAudit => Arc::new(Panel::with_source(
                    simulations::ContractAudit,
                    notifier,
                    source,
                )),
                ChartPattern => Arc::new(Panel::with_source(
                    simulations::ChartPattern,
                    notifier,
                    source,
                )),
            };
            registry.register(panel);
        }
        registry
    }

    pub fn register(&mut self, panel: Arc<dyn PanelControl>) {
        self.panels.insert(panel.kind(), panel);
    }

    pub fn get(&self, kind: PanelKind) -> Result<Arc<dyn PanelControl>, PanelError> {
        self.panels
            .get(&kind)
            .cloned()
            .ok_or_else(|| PanelError::UnknownPanel(kind.to_string()))
    }

    /// Lookup by snake_case or kebab-case name
    pub fn get_by_name(&self, name: &str) -> Result<Arc<dyn PanelControl>, PanelError> {
        let kind = PanelKind::from_name(name).ok_or_else(|| PanelError::UnknownPanel(name.to_string()))?;
        self.get(kind)
    }

    /// Registered kinds in catalogue order
    pub fn kinds(&self) -> Vec<PanelKind> {
        let mut kinds: Vec<_> = self.panels.keys().copied().collect();
        kinds.sort();
        kinds
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Snapshots of every panel in catalogue order
    pub async fn snapshots(&self) -> serde_json::Result<Vec<Value>> {
        let mut out = Vec::with_capacity(self.panels.len());
        for kind in self.kinds() {
            if let Some(panel) = self.panels.get(&kind) {
                out.push(panel.snapshot_json().await?);
            }
        }
        Ok(out)
    }

    pub async fn reset_all(&self) {
        for panel in self.panels.values() {
            panel.reset().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ScriptedSource;
    use std::time::Duration;

    fn registry() -> PanelRegistry {
        PanelRegistry::standard(&Notifier::default(), |_| {
            Box::new(ScriptedSource::constant(1.0))
        })
    }

    #[test]
    fn test_standard_registers_every_kind() {
        let registry = registry();
        assert_eq!(registry.len(), PanelKind::ALL.len());
        assert_eq!(registry.kinds(), PanelKind::ALL.to_vec());
    }

    #[test]
    fn test_unknown_name() {
        let err = registry().get_by_name("moon_predictor").err().unwrap();
        assert_eq!(err, PanelError::UnknownPanel("moon_predictor".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_panels_are_independent() {
        let registry = registry();
        let swan = registry.get(PanelKind::BlackSwan).unwrap();
        swan.start(RunInput::default()).await.unwrap();

        let honeypot = registry.get_by_name("honeypot").unwrap();
        assert_eq!(honeypot.status().await, RunStatus::Idle);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(swan.status().await, RunStatus::Complete);
        assert_eq!(honeypot.status().await, RunStatus::Idle);
    }

    #[tokio::test]
    async fn test_snapshot_json_shape() {
        let registry = registry();
        let snaps = registry.snapshots().await.unwrap();
        assert_eq!(snaps.len(), 9);
        assert_eq!(snaps[0]["kind"], "backtest");
        assert_eq!(snaps[0]["status"], "idle");
        assert_eq!(snaps[0]["progress"], 0.0);
        assert_eq!(snaps[0]["results"], serde_json::json!([]));
    }
}
