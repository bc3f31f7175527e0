//! The simulated async feature panel
//!
//! A panel owns its progress, run status and result set. `start` spawns a
//! timer task that advances progress by a random increment each tick; the
//! tick that reaches 100 generates the mock result set and completes the run.
//!
//! ```text
//! idle ──start──► running ──progress hits 100──► complete
//!   ▲                │                               │
//!   └──── stop ──────┘                               │
//!   └──────────────────────── reset ◄────────────────┘
//! ```
//!
//! The timer task is tied to the panel: `stop` and `reset` cancel it and
//! dropping the panel aborts it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{oneshot, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use uuid::Uuid;

use crate::error::PanelError;
use crate::kind::PanelKind;
use crate::notify::{Notifier, PanelEvent, Toast};
use crate::progress::{Progress, TickConfig};
use crate::source::{DataSource, RandomSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Idle,
    Running,
    Complete,
}

/// Optional parameters of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunInput {
    /// Selected asset or tab
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    /// Number of records to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Free-form target (contract address, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl RunInput {
    pub fn with_asset(mut self, asset: impl Into<String>) -> Self {
        self.asset = Some(asset.into());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// `count` clamped to `[1, max]`, or `default`
    pub fn count_or(&self, default: usize, max: usize) -> usize {
        self.count.unwrap_or(default).clamp(1, max.max(1))
    }
}

/// One simulated feature: cadence, result generator, completion toast
pub trait Simulation: Send + Sync + 'static {
    type Record: Clone + Serialize + Send + Sync + 'static;

    fn kind(&self) -> PanelKind;

    fn tick(&self) -> TickConfig;

    fn generate(&self, input: &RunInput, source: &mut dyn DataSource) -> Vec<Self::Record>;

    fn completion_toast(&self, records: &[Self::Record]) -> Toast;
}

/// Serializable view of a panel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelSnapshot<R> {
    pub kind: PanelKind,
    pub status: RunStatus,
    pub progress: Progress,
    pub results: Vec<R>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

struct PanelState<R> {
    status: RunStatus,
    progress: Progress,
    results: Vec<R>,
    run_id: Option<Uuid>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl<R> PanelState<R> {
    fn idle() -> Self {
        Self {
            status: RunStatus::Idle,
            progress: Progress::ZERO,
            results: Vec::new(),
            run_id: None,
            started_at: None,
            completed_at: None,
        }
    }
}

/// The timer task of one run; aborted when dropped
struct RunHandle {
    stop_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl RunHandle {
    /// Signal the task and wait for it to exit
    async fn cancel(mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for RunHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

type SharedSource = Arc<Mutex<Box<dyn DataSource>>>;

pub struct Panel<S: Simulation> {
    simulation: Arc<S>,
    state: Arc<RwLock<PanelState<S::Record>>>,
    source: SharedSource,
    notifier: Notifier,
    run: Mutex<Option<RunHandle>>,
}

impl<S: Simulation> Panel<S> {
    /// Panel drawing from thread-local entropy
    pub fn new(simulation: S, notifier: Notifier) -> Self {
        Self::with_source(simulation, notifier, Box::new(RandomSource))
    }

    pub fn with_source(simulation: S, notifier: Notifier, source: Box<dyn DataSource>) -> Self {
        Self {
            simulation: Arc::new(simulation),
            state: Arc::new(RwLock::new(PanelState::idle())),
            source: Arc::new(Mutex::new(source)),
            notifier,
            run: Mutex::new(None),
        }
    }

    pub fn kind(&self) -> PanelKind {
        self.simulation.kind()
    }

    pub async fn status(&self) -> RunStatus {
        self.state.read().await.status
    }

    pub async fn snapshot(&self) -> PanelSnapshot<S::Record> {
        let state = self.state.read().await;
        PanelSnapshot {
            kind: self.kind(),
            status: state.status,
            progress: state.progress,
            results: state.results.clone(),
            run_id: state.run_id,
            started_at: state.started_at,
            completed_at: state.completed_at,
        }
    }

    /// Begin a run; rejected without touching state while one is active
    pub async fn start(&self, input: RunInput) -> Result<Uuid, PanelError> {
        let panel = self.kind();
        let mut run = self.run.lock().await;

        let run_id = {
            let mut state = self.state.write().await;
            if state.status == RunStatus::Running {
                return Err(PanelError::AlreadyRunning { panel });
            }
            let run_id = Uuid::new_v4();
            *state = PanelState {
                status: RunStatus::Running,
                progress: Progress::ZERO,
                results: Vec::new(),
                run_id: Some(run_id),
                started_at: Some(Utc::now()),
                completed_at: None,
            };
            run_id
        };

        let (stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(drive(
            self.simulation.clone(),
            self.state.clone(),
            self.source.clone(),
            self.notifier.clone(),
            run_id,
            input,
            stop_rx,
        ));
        // Replacing a finished run's handle
        *run = Some(RunHandle {
            stop_tx: Some(stop_tx),
            task: Some(task),
        });

        metrics::counter!("blockfin_panel_runs_total", "panel" => panel.as_str()).increment(1);
        tracing::info!(panel = %panel, run_id = %run_id, "panel run started");
        self.notifier.publish(PanelEvent::RunStarted {
            panel,
            run_id,
            timestamp: Utc::now(),
        });

        Ok(run_id)
    }

    /// Cancel the active run and return to idle, keeping the progress reached
    pub async fn stop(&self) -> Result<(), PanelError> {
        let panel = self.kind();
        let mut run = self.run.lock().await;

        if self.state.read().await.status != RunStatus::Running {
            return Err(PanelError::NotRunning { panel });
        }

        if let Some(handle) = run.take() {
            handle.cancel().await;
        }

        let mut state = self.state.write().await;
        // The final tick may have landed before the stop signal
        if state.status == RunStatus::Running {
            state.status = RunStatus::Idle;
            tracing::info!(panel = %panel, progress = state.progress.value(), "panel run stopped");
            self.notifier.publish(PanelEvent::RunStopped {
                panel,
                run_id: state.run_id,
                progress: state.progress.value(),
                timestamp: Utc::now(),
            });
        }

        Ok(())
    }

    /// Cancel any run and return to `{progress: 0, status: idle, results: []}`
    pub async fn reset(&self) {
        let panel = self.kind();
        let mut run = self.run.lock().await;

        if let Some(handle) = run.take() {
            handle.cancel().await;
        }

        *self.state.write().await = PanelState::idle();

        tracing::debug!(panel = %panel, "panel reset");
        self.notifier.publish(PanelEvent::PanelReset {
            panel,
            timestamp: Utc::now(),
        });
    }
}

/// Timer loop of one run
async fn drive<S: Simulation>(
    simulation: Arc<S>,
    state: Arc<RwLock<PanelState<S::Record>>>,
    source: SharedSource,
    notifier: Notifier,
    run_id: Uuid,
    input: RunInput,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let panel = simulation.kind();
    let tick = simulation.tick();
    let mut ticker = interval_at(Instant::now() + tick.interval, tick.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = &mut stop_rx => break,
            _ = ticker.tick() => {
                let increment = source.lock().await.next_unit() * tick.max_increment;

                let mut guard = state.write().await;
                if guard.run_id != Some(run_id) || guard.status != RunStatus::Running {
                    break;
                }

                guard.progress = guard.progress.advance(increment);
                let progress = guard.progress.value();

                if !guard.progress.is_complete() {
                    drop(guard);
                    notifier.publish(PanelEvent::ProgressTick {
                        panel,
                        run_id,
                        progress,
                        timestamp: Utc::now(),
                    });
                    continue;
                }

                let records = {
                    let mut source = source.lock().await;
                    simulation.generate(&input, &mut **source)
                };
                let toast = simulation.completion_toast(&records);
                let count = records.len();

                guard.results = records;
                guard.status = RunStatus::Complete;
                guard.completed_at = Some(Utc::now());
                drop(guard);

                metrics::counter!("blockfin_panel_completions_total", "panel" => panel.as_str())
                    .increment(1);
                tracing::info!(panel = %panel, run_id = %run_id, records = count, "panel run complete");

                notifier.publish(PanelEvent::ProgressTick {
                    panel,
                    run_id,
                    progress,
                    timestamp: Utc::now(),
                });
                notifier.publish(PanelEvent::RunCompleted {
                    panel,
                    run_id,
                    records: count,
                    timestamp: Utc::now(),
                });
                notifier.toast(panel.as_str(), toast);
                break;
            }
        }
    }
}
