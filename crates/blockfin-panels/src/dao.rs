//! AI-DAO deposit form
//!
//! The amount is validated before anything else happens. A rejected amount
//! raises a destructive toast and leaves the pool untouched; the form keeps
//! whatever the user typed.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::notify::{Notifier, Toast};

pub const TOAST_SOURCE: &str = "ai_dao";

/// Largest single deposit, USD
pub const MAX_DEPOSIT: Decimal = dec!(1000000);

/// Parse a user-entered deposit amount
pub fn parse_deposit_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyAmount);
    }

    let amount = Decimal::from_str(trimmed)
        .map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))?;

    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    if amount > MAX_DEPOSIT {
        return Err(ValidationError::AmountTooLarge { limit: MAX_DEPOSIT });
    }
    Ok(amount)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    pub id: Uuid,
    pub amount: Decimal,
    pub deposited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaoSnapshot {
    /// Current form value
    pub input: String,
    pub total_deposited: Decimal,
    pub deposits: Vec<Deposit>,
}

#[derive(Default)]
struct DaoState {
    input: String,
    deposits: Vec<Deposit>,
}

pub struct DaoPanel {
    state: RwLock<DaoState>,
    notifier: Notifier,
}

impl DaoPanel {
    pub fn new(notifier: Notifier) -> Self {
        Self {
            state: RwLock::new(DaoState::default()),
            notifier,
        }
    }

    pub async fn set_input(&self, value: impl Into<String>) {
        self.state.write().await.input = value.into();
    }

    /// Validate and record a deposit of `amount`
    ///
    /// On success the form is cleared; on failure only the form value
    /// changes, to `amount`.
    pub async fn deposit(&self, amount: &str) -> Result<Deposit, ValidationError> {
        let mut state = self.state.write().await;
        state.input = amount.to_string();

        let amount = match parse_deposit_amount(amount) {
            Ok(amount) => amount,
            Err(e) => {
                drop(state);
                self.notifier
                    .toast(TOAST_SOURCE, Toast::destructive(e.title(), e.to_string()));
                return Err(e);
            }
        };

        let deposit = Deposit {
            id: Uuid::new_v4(),
            amount,
            deposited_at: Utc::now(),
        };
        state.deposits.push(deposit.clone());
        state.input.clear();
        drop(state);

        tracing::info!(deposit_id = %deposit.id, amount = %deposit.amount, "dao deposit accepted");
        self.notifier.toast(
            TOAST_SOURCE,
            Toast::info(
                "Deposit Successful",
                format!("${} deposited into the AI-DAO pool", deposit.amount),
            ),
        );
        Ok(deposit)
    }

    pub async fn snapshot(&self) -> DaoSnapshot {
        let state = self.state.read().await;
        DaoSnapshot {
            input: state.input.clone(),
            total_deposited: state.deposits.iter().map(|d| d.amount).sum(),
            deposits: state.deposits.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::PanelEvent;

    #[test]
    fn test_parse_amounts() {
        assert_eq!(parse_deposit_amount(" 250.50 "), Ok(dec!(250.50)));
        assert_eq!(parse_deposit_amount(""), Err(ValidationError::EmptyAmount));
        assert_eq!(parse_deposit_amount("   "), Err(ValidationError::EmptyAmount));
        assert_eq!(
            parse_deposit_amount("ten"),
            Err(ValidationError::InvalidAmount("ten".to_string()))
        );
        assert_eq!(parse_deposit_amount("0"), Err(ValidationError::NonPositiveAmount));
        assert_eq!(parse_deposit_amount("-5"), Err(ValidationError::NonPositiveAmount));
        assert_eq!(
            parse_deposit_amount("1000000.01"),
            Err(ValidationError::AmountTooLarge { limit: MAX_DEPOSIT })
        );
    }

    #[tokio::test]
    async fn test_empty_amount_leaves_pool_untouched() {
        let notifier = Notifier::default();
        let mut rx = notifier.subscribe();
        let dao = DaoPanel::new(notifier);
        dao.deposit("100").await.unwrap();
        let _ = rx.try_recv();

        let before = dao.snapshot().await;
        let err = dao.deposit("").await.unwrap_err();
        assert_eq!(err, ValidationError::EmptyAmount);

        let after = dao.snapshot().await;
        assert_eq!(after.deposits, before.deposits);
        assert_eq!(after.total_deposited, dec!(100));

        match rx.try_recv().unwrap() {
            PanelEvent::Toast { source, toast, .. } => {
                assert_eq!(source, TOAST_SOURCE);
                assert!(toast.is_destructive());
                assert_eq!(toast.title, "Invalid Amount");
                assert_eq!(toast.description, "Please enter an amount");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejected_input_is_retained() {
        let dao = DaoPanel::new(Notifier::default());
        dao.deposit("12abc").await.unwrap_err();
        assert_eq!(dao.snapshot().await.input, "12abc");

        dao.deposit("12").await.unwrap();
        let snap = dao.snapshot().await;
        assert_eq!(snap.input, "");
        assert_eq!(snap.deposits.len(), 1);
    }
}
