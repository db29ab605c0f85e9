use crate::blockchain::bridge::{TransferState, TransferStatus, TOTAL_STEPS};
use serde::Serialize;

/// Visual state of one step.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    Completed,
    Active,
    Failed,
    Pending,
}

/// Icon shown next to a step.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepMarker {
    Success,
    InProgress,
    Error,
    NotStarted,
}

impl StepState {
    pub fn marker(self) -> StepMarker {
        match self {
            StepState::Completed => StepMarker::Success,
            StepState::Active => StepMarker::InProgress,
            StepState::Failed => StepMarker::Error,
            StepState::Pending => StepMarker::NotStarted,
        }
    }
}

/// Position rule: before the current step is done, the current step is active
/// (or failed), everything after is pending.
pub fn step_state(step_index: usize, current_step: usize, status: TransferStatus) -> StepState {
    if step_index < current_step {
        StepState::Completed
    } else if step_index == current_step {
        if status == TransferStatus::Failed {
            StepState::Failed
        } else {
            StepState::Active
        }
    } else {
        StepState::Pending
    }
}

/// The step index used for rendering.
///
/// Clamped into `[0, TOTAL_STEPS]`; a completed transfer counts every step as
/// done, and a failure reported past the last step is pinned to the last step.
pub fn effective_step(state: &TransferState) -> usize {
    match state.status {
        TransferStatus::Completed => TOTAL_STEPS,
        TransferStatus::Failed => state.clamped_step().min(TOTAL_STEPS - 1),
        _ => state.clamped_step(),
    }
}

pub fn step_states(state: &TransferState) -> [StepState; TOTAL_STEPS] {
    let current = effective_step(state);
    let mut states = [StepState::Pending; TOTAL_STEPS];
    for (index, slot) in states.iter_mut().enumerate() {
        *slot = step_state(index, current, state.status);
    }
    states
}
