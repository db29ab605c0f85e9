// src/blockchain/bridge/mod.rs

pub mod relay;
pub mod transfer;

use crate::core::errors::TrackerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed, ordered phases of an auto-deposit transfer.
pub const TRANSFER_STEPS: [&str; 4] =
    ["Approve USDC", "Initiate Transfer", "Cross-Chain Bridge", "Auto-Deposit to Yield"];

pub const TOTAL_STEPS: usize = TRANSFER_STEPS.len();

/// Index of the step relayed by CCIP.
pub const BRIDGE_STEP: usize = 2;

pub const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred during transfer.";

/// Phase of a cross-chain transfer as reported by the orchestrator.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    #[default]
    Idle,
    Pending,
    Confirming,
    Bridging,
    Depositing,
    Completed,
    Failed,
}

impl TransferStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, TransferStatus::Completed | TransferStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransferStatus::Idle => "idle",
            TransferStatus::Pending => "pending",
            TransferStatus::Confirming => "confirming",
            TransferStatus::Bridging => "bridging",
            TransferStatus::Depositing => "depositing",
            TransferStatus::Completed => "completed",
            TransferStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one transfer attempt, produced by the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransferState {
    pub status: TransferStatus,
    #[serde(default)]
    pub current_step: usize,
    #[serde(default = "default_total_steps")]
    pub total_steps: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ccip_message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub is_transaction_confirmed: bool,
}

fn default_total_steps() -> usize {
    TOTAL_STEPS
}

impl Default for TransferState {
    fn default() -> Self {
        Self {
            status: TransferStatus::Idle,
            current_step: 0,
            total_steps: TOTAL_STEPS,
            tx_hash: None,
            ccip_message_id: None,
            error: None,
            message: None,
            is_transaction_confirmed: false,
        }
    }
}

impl TransferState {
    /// Checks the per-snapshot invariants. Cross-snapshot rules (monotonic
    /// step, sticky message id) are enforced by the transitions in
    /// [`transfer`] and tolerated by the tracker.
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.total_steps != TOTAL_STEPS {
            return Err(TrackerError::InvalidState(format!(
                "total_steps must be {}, got {}",
                TOTAL_STEPS, self.total_steps
            )));
        }
        if self.current_step > self.total_steps {
            return Err(TrackerError::InvalidState(format!(
                "current_step {} exceeds total_steps {}",
                self.current_step, self.total_steps
            )));
        }
        match (self.status, self.error.is_some()) {
            (TransferStatus::Failed, false) => {
                Err(TrackerError::InvalidState("failed transfer carries no error".to_string()))
            }
            (status, true) if status != TransferStatus::Failed => Err(TrackerError::InvalidState(
                format!("error set while status is {}", status),
            )),
            _ => Ok(()),
        }
    }

    /// `current_step` clamped into `[0, total_steps]`.
    pub fn clamped_step(&self) -> usize {
        self.current_step.min(TOTAL_STEPS)
    }

    /// All three conditions that mark the start of the CCIP relay.
    pub fn bridge_started(&self) -> bool {
        self.is_transaction_confirmed
            && self.ccip_message_id.is_some()
            && self.status == TransferStatus::Bridging
    }
}

/// The single failure kind surfaced to users.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferFailure {
    pub message: Option<String>,
}

impl TransferFailure {
    pub fn from_state(state: &TransferState) -> Option<Self> {
        (state.status == TransferStatus::Failed)
            .then(|| TransferFailure { message: state.error.clone() })
    }

    /// The supplied message, or the generic fallback when none (or a blank one) was given.
    pub fn display_message(&self) -> &str {
        match self.message.as_deref() {
            Some(m) if !m.trim().is_empty() => m,
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }
}

impl fmt::Display for TransferFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transfer failed: {}", self.display_message())
    }
}

#[cfg(test)]
mod tests;
