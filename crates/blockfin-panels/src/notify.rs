//! Panel events and toast notifications
//!
//! Events are broadcast to every subscriber (the SSE stream, tests).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::kind::PanelKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Default,
    Destructive,
}

/// A transient user-visible notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PanelEvent {
    RunStarted {
        panel: PanelKind,
        run_id: Uuid,
        timestamp: DateTime<Utc>,
    },
    ProgressTick {
        panel: PanelKind,
        run_id: Uuid,
        progress: f64,
        timestamp: DateTime<Utc>,
    },
    RunCompleted {
        panel: PanelKind,
        run_id: Uuid,
        records: usize,
        timestamp: DateTime<Utc>,
    },
    RunStopped {
        panel: PanelKind,
        run_id: Option<Uuid>,
        progress: f64,
        timestamp: DateTime<Utc>,
    },
    PanelReset {
        panel: PanelKind,
        timestamp: DateTime<Utc>,
    },
    Toast {
        /// Panel or form that raised it
        source: String,
        toast: Toast,
        timestamp: DateTime<Utc>,
    },
}

impl PanelEvent {
    /// SSE event name
    pub fn name(&self) -> &'static str {
        match self {
            Self::RunStarted { .. } => "run_started",
            Self::ProgressTick { .. } => "progress_tick",
            Self::RunCompleted { .. } => "run_completed",
            Self::RunStopped { .. } => "run_stopped",
            Self::PanelReset { .. } => "panel_reset",
            Self::Toast { .. } => "toast",
        }
    }
}

/// Broadcast bus for [`PanelEvent`]s
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<PanelEvent>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PanelEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: PanelEvent) {
        // No subscribers is fine
        let _ = self.tx.send(event);
    }

    pub fn toast(&self, source: impl Into<String>, toast: Toast) {
        let source = source.into();
        if toast.is_destructive() {
            tracing::warn!(source = %source, title = %toast.title, "{}", toast.description);
        } else {
            tracing::info!(source = %source, title = %toast.title, "{}", toast.description);
        }
        self.publish(PanelEvent::Toast {
            source,
            toast,
            timestamp: Utc::now(),
        });
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_toast_reaches_subscriber() {
        let notifier = Notifier::default();
        let mut rx = notifier.subscribe();

        notifier.toast("ai_dao", Toast::destructive("Invalid Amount", "Please enter an amount"));

        match rx.recv().await.unwrap() {
            PanelEvent::Toast { source, toast, .. } => {
                assert_eq!(source, "ai_dao");
                assert!(toast.is_destructive());
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_publish_without_subscribers() {
        Notifier::default().publish(PanelEvent::PanelReset {
            panel: PanelKind::Honeypot,
            timestamp: Utc::now(),
        });
    }

    #[test]
    fn test_event_wire_tag() {
        let event = PanelEvent::PanelReset {
            panel: PanelKind::BlackSwan,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], event.name());
        assert_eq!(json["panel"], "black_swan");
    }
}
