//! Reconciliation status lifecycle.
//!
//! - `waiting` -> `waiting` | `manual` | `success` | `error`
//! - `error` -> `manual` | `waiting`
//! - `manual` -> `manual` | `waiting`
//! - `success` -> nothing
//!
//! `success` means the transaction has been posted to the ledger; any change
//! request on it is refused locally, before any backend call.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Matching state of a bank transaction against an ERP ledger posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconciliationStatus {
    /// Unmatched
    #[default]
    Waiting,
    /// Matched and locked
    Success,
    /// An attempted match failed
    Error,
    /// Resolved by an operator without an ERP match
    Manual,
}

impl ReconciliationStatus {
    pub const ALL: [ReconciliationStatus; 4] = [
        ReconciliationStatus::Waiting,
        ReconciliationStatus::Success,
        ReconciliationStatus::Error,
        ReconciliationStatus::Manual,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReconciliationStatus::Waiting => "waiting",
            ReconciliationStatus::Success => "success",
            ReconciliationStatus::Error => "error",
            ReconciliationStatus::Manual => "manual",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == ReconciliationStatus::Success
    }

    pub fn can_transition_to(self, target: ReconciliationStatus) -> bool {
        use ReconciliationStatus::*;
        matches!(
            (self, target),
            (Waiting, Waiting | Manual | Success | Error)
                | (Error, Manual | Waiting)
                | (Manual, Manual | Waiting)
        )
    }

    /// Validates a requested change for `transaction_id`.
    pub fn check_transition(
        self,
        transaction_id: &str,
        target: ReconciliationStatus,
    ) -> Result<(), ReconciliationError> {
        if self.is_terminal() {
            return Err(ReconciliationError::TransactionLocked {
                transaction_id: transaction_id.to_string(),
            });
        }
        if !self.can_transition_to(target) {
            return Err(ReconciliationError::IllegalTransition {
                transaction_id: transaction_id.to_string(),
                from: self,
                to: target,
            });
        }
        Ok(())
    }
}

impl fmt::Display for ReconciliationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReconciliationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown reconciliation status: {}", s))
    }
}

/// Errors raised while changing a transaction's reconciliation status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconciliationError {
    /// The transaction is already reconciled; nothing was sent to the backend.
    #[error("Transaction {transaction_id} is already reconciled and cannot be changed")]
    TransactionLocked { transaction_id: String },

    /// The requested edge is not part of the lifecycle.
    #[error("Transaction {transaction_id} cannot move from {from} to {to}")]
    IllegalTransition {
        transaction_id: String,
        from: ReconciliationStatus,
        to: ReconciliationStatus,
    },

    /// The backend refused the update; the previous status was kept.
    #[error("Status update for transaction {transaction_id} was rejected: {message}")]
    UpdateRejected {
        transaction_id: String,
        message: String,
    },
}

impl ReconciliationError {
    /// True for requests refused locally, as opposed to backend failures.
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, ReconciliationError::UpdateRejected { .. })
    }
}
