// filepath: src/blockchain/bridge/transfer.rs
//! Orchestrator-side transitions over [`TransferState`].

use crate::blockchain::bridge::{
    TransferState, TransferStatus, GENERIC_FAILURE_MESSAGE, TOTAL_STEPS,
};
use crate::blockchain::bridge::relay::classify_simulation_error;
use crate::blockchain::registry::ChainRegistry;
use crate::core::amount::parse_usdc_amount;
use crate::core::errors::TrackerError;
use crate::core::validation::{validate_ethereum_address, validate_hash32};
use tracing::{debug, info, warn};

impl TransferState {
    /// A fresh idle transfer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the first attempt: approve step, pending.
    pub fn begin(&mut self) -> Result<(), TrackerError> {
        if self.status != TransferStatus::Idle {
            return Err(TrackerError::InvalidState(format!(
                "cannot begin a transfer that is {}",
                self.status
            )));
        }
        self.status = TransferStatus::Pending;
        self.current_step = 0;
        info!("Transfer attempt started");
        Ok(())
    }

    /// Discard the current attempt and start a new one from step 0.
    pub fn restart(&mut self) {
        *self = TransferState { status: TransferStatus::Pending, ..TransferState::default() };
        info!("Transfer attempt restarted");
    }

    /// Move to `step` with a non-terminal `status`. Steps never go backwards within an attempt.
    pub fn advance_to(&mut self, step: usize, status: TransferStatus) -> Result<(), TrackerError> {
        self.ensure_open()?;
        if status.is_terminal() || status == TransferStatus::Idle {
            return Err(TrackerError::InvalidState(format!(
                "advance_to cannot enter {}; use fail/complete/restart",
                status
            )));
        }
        if step > TOTAL_STEPS {
            return Err(TrackerError::InvalidState(format!(
                "step {} exceeds total_steps {}",
                step, TOTAL_STEPS
            )));
        }
        if step < self.current_step {
            return Err(TrackerError::InvalidState(format!(
                "step cannot move back from {} to {}",
                self.current_step, step
            )));
        }
        debug!(from = self.current_step, to = step, %status, "Advancing transfer");
        self.current_step = step;
        self.status = status;
        Ok(())
    }

    pub fn record_tx_hash(&mut self, tx_hash: &str) -> Result<(), TrackerError> {
        self.ensure_open()?;
        validate_hash32(tx_hash, "transaction hash")
            .map_err(|e| TrackerError::ValidationError(e.to_string()))?;
        self.tx_hash = Some(tx_hash.to_string());
        Ok(())
    }

    /// Source transaction reached its required confirmations.
    pub fn confirm(&mut self) -> Result<(), TrackerError> {
        self.ensure_open()?;
        if self.tx_hash.is_none() {
            return Err(TrackerError::InvalidState(
                "cannot confirm before a transaction hash is recorded".to_string(),
            ));
        }
        self.is_transaction_confirmed = true;
        Ok(())
    }

    /// Record the CCIP message id. Once set it is never cleared or replaced.
    pub fn record_message_id(&mut self, message_id: &str) -> Result<(), TrackerError> {
        self.ensure_open()?;
        validate_hash32(message_id, "CCIP message id")
            .map_err(|e| TrackerError::ValidationError(e.to_string()))?;
        match self.ccip_message_id.as_deref() {
            Some(existing) if existing.eq_ignore_ascii_case(message_id) => Ok(()),
            Some(existing) => Err(TrackerError::InvalidState(format!(
                "CCIP message id already recorded as {}",
                existing
            ))),
            None => {
                self.ccip_message_id = Some(message_id.to_string());
                Ok(())
            }
        }
    }

    /// Mark the attempt failed. A missing reason is replaced by the generic message
    /// so that `error` is always present on a failed state.
    pub fn fail(&mut self, reason: Option<String>) {
        let reason = reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
        warn!(step = self.current_step, error = %reason, "Transfer failed");
        self.status = TransferStatus::Failed;
        self.error = Some(reason);
    }

    /// Fail with the user-facing text for a raw preflight simulation error.
    pub fn fail_simulation(&mut self, raw: &str) {
        debug!(raw, "Classifying simulation error");
        self.fail(Some(classify_simulation_error(raw)));
    }

    /// Mark every step done.
    pub fn complete(&mut self) -> Result<(), TrackerError> {
        self.ensure_open()?;
        self.status = TransferStatus::Completed;
        self.current_step = TOTAL_STEPS;
        info!("Transfer completed");
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), TrackerError> {
        if self.status.is_terminal() {
            return Err(TrackerError::InvalidState(format!(
                "transfer already {}; restart to try again",
                self.status
            )));
        }
        Ok(())
    }
}

/// A transfer request after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTransfer {
    pub from_chain: u64,
    pub to_chain: u64,
    /// USDC base units (6 decimals)
    pub amount: u128,
    pub receiver: Option<String>,
}

/// Validate a transfer request against the registry before any transaction is sent.
pub fn validate_transfer_request(
    registry: &ChainRegistry,
    from_chain: u64,
    to_chain: u64,
    amount: &str,
    receiver: Option<&str>,
) -> Result<ValidatedTransfer, TrackerError> {
    registry.require(from_chain)?;
    registry.require(to_chain)?;

    if from_chain == to_chain {
        return Err(TrackerError::UnsupportedRoute("Cannot bridge to the same chain".to_string()));
    }
    if !registry.is_route_supported(from_chain, to_chain) {
        return Err(TrackerError::UnsupportedRoute(format!("{} -> {}", from_chain, to_chain)));
    }
    let route = registry.transfer_route(from_chain, to_chain);
    if !route.is_active {
        return Err(TrackerError::UnsupportedRoute(format!(
            "{} -> {} is not active",
            from_chain, to_chain
        )));
    }

    let amount = parse_usdc_amount(amount)?;

    if let Some(receiver) = receiver {
        validate_ethereum_address(receiver)
            .map_err(|e| TrackerError::ValidationError(format!("receiver: {}", e)))?;
    }

    info!(from_chain, to_chain, amount = %amount, "Transfer request validated");
    Ok(ValidatedTransfer { from_chain, to_chain, amount, receiver: receiver.map(str::to_string) })
}
