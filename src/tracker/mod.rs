//! Live status tracking for one cross-chain transfer.

pub mod menu;
pub mod progress;
pub mod render;
pub mod session;
pub mod steps;
pub mod timer;
pub mod view;

use crate::blockchain::bridge::{TransferState, TransferStatus};
use crate::blockchain::registry::{Chain, ChainRegistry};
use crate::core::amount::parse_usdc_amount;
use crate::core::config::{TimingConfig, TrackerConfig};
use crate::core::errors::TrackerError;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info, warn};

pub use session::{TrackerSession, ViewSink};
pub use timer::{BridgeTimer, Clock, SystemClock, TokioClock};
pub use view::StatusView;

/// What an observation changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Observation {
    pub timer_started: bool,
    pub restarted: bool,
    /// Set only on the observation that first reaches a terminal status.
    pub finished: Option<TransferStatus>,
}

/// Owns the latest state of one transfer and its bridge timer.
#[derive(Debug, Clone)]
pub struct TransferTracker {
    from: Chain,
    to: Chain,
    amount: String,
    timing: TimingConfig,
    ccip_base_url: String,
    state: TransferState,
    timer: BridgeTimer,
}

impl TransferTracker {
    /// Both chains must be present in `registry` and `amount` must be a
    /// positive USDC amount with at most 6 decimals.
    pub fn new(
        registry: &ChainRegistry,
        config: &TrackerConfig,
        from_chain: u64,
        to_chain: u64,
        amount: &str,
    ) -> Result<Self, TrackerError> {
        let from = registry.require(from_chain)?.clone();
        let to = registry.require(to_chain)?.clone();
        parse_usdc_amount(amount)?;
        Ok(Self {
            from,
            to,
            amount: amount.trim().to_string(),
            timing: config.timing.clone(),
            ccip_base_url: config.explorer.ccip_base_url.clone(),
            state: TransferState::default(),
            timer: BridgeTimer::new(),
        })
    }

    /// Apply a snapshot from the orchestrator.
    ///
    /// Out-of-range steps are clamped. A step falling back to 0, or any
    /// non-terminal state after a terminal one, starts a new attempt; other
    /// backwards steps keep the highest index seen. A message id missing from
    /// a later snapshot of the same attempt is kept.
    pub fn observe(&mut self, incoming: TransferState, now: DateTime<Utc>) -> Observation {
        let mut next = incoming;
        if let Err(e) = next.validate() {
            warn!("Rendering inconsistent transfer state: {}", e);
        }
        next.current_step = next.clamped_step();

        let previous = &self.state;
        let restarted = (previous.status.is_terminal() && !next.status.is_terminal()
            && next.status != TransferStatus::Idle)
            || (next.current_step == 0 && previous.current_step > 0);

        if restarted {
            info!(from = %previous.status, to = %next.status, "New transfer attempt");
            self.timer.reset();
        } else {
            if next.current_step < previous.current_step {
                warn!(
                    previous = previous.current_step,
                    incoming = next.current_step,
                    "Ignoring step regression"
                );
                next.current_step = previous.current_step;
            }
            if next.ccip_message_id.is_none() && previous.ccip_message_id.is_some() {
                debug!("Keeping CCIP message id missing from update");
                next.ccip_message_id = previous.ccip_message_id.clone();
            }
        }

        let finished = (next.status.is_terminal()
            && (restarted || previous.status != next.status))
            .then_some(next.status);

        let timer_started = self.timer.observe(&next, now);
        self.state = next;

        if let Some(status) = finished {
            info!(%status, elapsed_secs = self.timer.elapsed_secs(), "Transfer reached terminal state");
        }
        Observation { timer_started, restarted, finished }
    }

    /// Advance the bridge timer; returns elapsed seconds.
    pub fn tick(&mut self, now: DateTime<Utc>) -> u64 {
        self.timer.tick(now)
    }

    pub fn is_ticking(&self) -> bool {
        self.timer.is_running()
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.timing.tick_interval_ms)
    }

    pub fn state(&self) -> &TransferState {
        &self.state
    }

    pub fn timer(&self) -> &BridgeTimer {
        &self.timer
    }

    pub fn from_chain(&self) -> &Chain {
        &self.from
    }

    pub fn to_chain(&self) -> &Chain {
        &self.to
    }

    pub fn view(&self) -> StatusView {
        let ctx = view::ViewContext {
            from: &self.from,
            to: &self.to,
            amount: &self.amount,
            timing: &self.timing,
            ccip_base_url: &self.ccip_base_url,
        };
        StatusView::build(&ctx, &self.state, &self.timer)
    }
}
