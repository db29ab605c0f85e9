//! Render model of the status display. Pure data, no I/O.

use crate::blockchain::bridge::{
    TransferFailure, TransferState, TransferStatus, BRIDGE_STEP, TRANSFER_STEPS,
};
use crate::blockchain::registry::Chain;
use crate::core::config::TimingConfig;
use crate::tracker::progress::{truncate_identifier, BridgeProgress};
use crate::tracker::steps::{step_states, StepMarker, StepState};
use crate::tracker::timer::BridgeTimer;
use serde::Serialize;

pub const BRIDGING_NOTICE: &str =
    "Cross-chain transfer in progress - This typically takes 15-20 minutes";
pub const COMPLETED_HEADLINE: &str = "Transfer Complete!";
pub const COMPLETED_DETAIL: &str =
    "Your USDC has been successfully transferred and deposited into yield farming.";
pub const FAILED_HEADLINE: &str = "Transfer Failed";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryView {
    pub amount: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepDetail {
    InProgress,
    Bridging(BridgeProgress),
    Failed { message: String },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StepView {
    pub index: usize,
    pub label: &'static str,
    pub state: StepState,
    pub marker: StepMarker,
    pub detail: Option<StepDetail>,
}

/// Outbound link; `display` is the shortened identifier, `href` uses the full one.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExplorerLink {
    pub label: &'static str,
    pub action: &'static str,
    pub href: String,
    pub display: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Completed { headline: &'static str, detail: &'static str },
    Failed { headline: &'static str, message: String },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatusView {
    pub status: TransferStatus,
    pub summary: SummaryView,
    pub steps: Vec<StepView>,
    pub tx_link: Option<ExplorerLink>,
    pub ccip_link: Option<ExplorerLink>,
    pub bridging_notice: Option<&'static str>,
    pub outcome: Option<Outcome>,
}

/// Inputs needed to build a [`StatusView`] besides the state itself.
pub struct ViewContext<'a> {
    pub from: &'a Chain,
    pub to: &'a Chain,
    pub amount: &'a str,
    pub timing: &'a TimingConfig,
    pub ccip_base_url: &'a str,
}

impl StatusView {
    pub fn build(ctx: &ViewContext<'_>, state: &TransferState, timer: &BridgeTimer) -> Self {
        let failure = TransferFailure::from_state(state);

        let steps = step_states(state)
            .iter()
            .enumerate()
            .map(|(index, &step)| {
                let detail = match step {
                    StepState::Active if index == BRIDGE_STEP && timer.started_at().is_some() => {
                        Some(StepDetail::Bridging(BridgeProgress::new(
                            timer.elapsed_secs(),
                            ctx.timing,
                        )))
                    }
                    StepState::Active => Some(StepDetail::InProgress),
                    StepState::Failed => Some(StepDetail::Failed {
                        message: failure
                            .as_ref()
                            .map(|f| f.display_message().to_string())
                            .unwrap_or_default(),
                    }),
                    StepState::Completed | StepState::Pending => None,
                };
                StepView { index, label: TRANSFER_STEPS[index], state: step, marker: step.marker(), detail }
            })
            .collect();

        let tx_link = state.tx_hash.as_deref().map(|hash| ExplorerLink {
            label: "Transaction Hash",
            action: "View",
            href: ctx.from.tx_url(hash),
            display: truncate_identifier(hash),
        });

        let ccip_link = state.ccip_message_id.as_deref().map(|id| ExplorerLink {
            label: "CCIP Message ID",
            action: "Track",
            href: format!("{}{}", ctx.ccip_base_url, id),
            display: truncate_identifier(id),
        });

        let bridging_notice = (state.ccip_message_id.is_some()
            && state.status == TransferStatus::Bridging)
            .then_some(BRIDGING_NOTICE);

        let outcome = match (state.status, failure) {
            (TransferStatus::Completed, _) => {
                Some(Outcome::Completed { headline: COMPLETED_HEADLINE, detail: COMPLETED_DETAIL })
            }
            (TransferStatus::Failed, Some(f)) => Some(Outcome::Failed {
                headline: FAILED_HEADLINE,
                message: f.display_message().to_string(),
            }),
            _ => None,
        };

        StatusView {
            status: state.status,
            summary: SummaryView {
                amount: format!("{} USDC", ctx.amount),
                from: ctx.from.name.clone(),
                to: ctx.to.name.clone(),
            },
            steps,
            tx_link,
            ccip_link,
            bridging_notice,
            outcome,
        }
    }

    pub fn active_step(&self) -> Option<&StepView> {
        self.steps.iter().find(|s| s.state == StepState::Active)
    }

    pub fn failed_step(&self) -> Option<&StepView> {
        self.steps.iter().find(|s| s.state == StepState::Failed)
    }
}
