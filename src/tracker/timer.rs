//! Wall-clock timer for the CCIP relay phase.

use crate::blockchain::bridge::{TransferState, TransferStatus};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::Serialize;
use tracing::debug;

/// Source of the current time.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Plain system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Wall clock that advances with `tokio::time`, so it follows paused time in tests.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    anchor_utc: DateTime<Utc>,
    anchor: tokio::time::Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self { anchor_utc: Utc::now(), anchor: tokio::time::Instant::now() }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed =
            ChronoDuration::from_std(self.anchor.elapsed()).unwrap_or_else(|_| ChronoDuration::zero());
        self.anchor_utc + elapsed
    }
}

/// Start is taken once per attempt; elapsed time only moves while bridging.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct BridgeTimer {
    started_at: Option<DateTime<Utc>>,
    elapsed_secs: u64,
    running: bool,
}

impl BridgeTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a state snapshot. Returns `true` when this observation started the timer.
    pub fn observe(&mut self, state: &TransferState, now: DateTime<Utc>) -> bool {
        let mut started = false;
        if self.started_at.is_none() && state.bridge_started() {
            debug!(at = %now, "Bridge timer started");
            self.started_at = Some(now);
            self.elapsed_secs = 0;
            started = true;
        }
        let was_running = self.running;
        self.running = self.started_at.is_some() && state.status == TransferStatus::Bridging;
        if was_running && !self.running {
            debug!(elapsed_secs = self.elapsed_secs, status = %state.status, "Bridge timer frozen");
        }
        started
    }

    /// Recompute elapsed seconds if running; frozen otherwise.
    pub fn tick(&mut self, now: DateTime<Utc>) -> u64 {
        if let (true, Some(start)) = (self.running, self.started_at) {
            let millis = (now - start).num_milliseconds().max(0) as u64;
            self.elapsed_secs = millis / 1000;
        }
        self.elapsed_secs
    }

    /// Forget the current attempt.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
