//! Panel errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::kind::PanelKind;

/// Lifecycle misuse of a panel
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PanelError {
    #[error("{panel} is already running")]
    AlreadyRunning { panel: PanelKind },

    #[error("{panel} is not running")]
    NotRunning { panel: PanelKind },

    #[error("unknown panel: {0}")]
    UnknownPanel(String),
}

/// Input rejected before any async work starts
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter an amount")]
    EmptyAmount,

    #[error("'{0}' is not a valid amount")]
    InvalidAmount(String),

    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    #[error("Amount exceeds the single deposit limit of {limit}")]
    AmountTooLarge { limit: Decimal },

    #[error("File is {size} bytes; the limit is {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Upload exceeds the {limit} byte file limit")]
    UploadTooLarge { limit: u64 },

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),
}

impl ValidationError {
    /// Short title for the destructive toast
    pub fn title(&self) -> &'static str {
        match self {
            Self::EmptyAmount
            | Self::InvalidAmount(_)
            | Self::NonPositiveAmount
            | Self::AmountTooLarge { .. } => "Invalid Amount",
            Self::FileTooLarge { .. } | Self::UploadTooLarge { .. } => "File Too Large",
            Self::UnsupportedFileType(_) => "Unsupported File",
        }
    }
}
