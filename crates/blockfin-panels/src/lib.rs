//! BlockFin Panels
//!
//! Every "AI" feature of BlockFin is a simulated panel: a run drives a fake
//! progress value toward 100 on a timer, then fabricates a mock result set
//! from random distributions.
//!
//! ```text
//! Panel<S: Simulation>
//!   ├── progress / status / results   (RwLock, owned by the panel)
//!   ├── DataSource                    (random, seeded or scripted)
//!   └── timer task                    (cancelled on stop, reset and drop)
//!            │
//!            ▼
//!        Notifier ──► PanelEvent (progress ticks, completions, toasts)
//! ```
//!
//! The AI-DAO deposit form and the chart-scan upload are validated forms
//! rather than timed runs; they share the same notifier.

pub mod chart_scan;
pub mod control;
pub mod dao;
pub mod error;
pub mod kind;
pub mod notify;
pub mod panel;
pub mod progress;
pub mod simulations;
pub mod source;

pub use chart_scan::{validate_upload, ChartScan, ChartScanner, ChartUpload, MAX_UPLOAD_BYTES};
pub use control::{PanelControl, PanelRegistry};
pub use dao::{parse_deposit_amount, DaoPanel, DaoSnapshot, Deposit};
pub use error::{PanelError, ValidationError};
pub use kind::PanelKind;
pub use notify::{Notifier, PanelEvent, Toast, ToastVariant};
pub use panel::{Panel, PanelSnapshot, RunInput, RunStatus, Simulation};
pub use progress::{Progress, TickConfig, PROGRESS_MAX};
pub use source::{DataSource, DataSourceExt, RandomSource, ScriptedSource, SeededSource};
