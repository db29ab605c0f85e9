//! Async driver: one task per tracked transfer.
//!
//! The task owns the tracker, applies snapshots from a `watch` channel and
//! ticks the bridge timer on an interval that exists only while the timer
//! runs. The interval and the task are released on every exit path:
//! terminal status, sender dropped, [`TrackerSession::shutdown`], or drop.

use crate::blockchain::bridge::TransferState;
use crate::core::errors::TrackerError;
use crate::monitoring::TrackerMetrics;
use crate::tracker::timer::Clock;
use crate::tracker::view::StatusView;
use crate::tracker::TransferTracker;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Receives every view the session produces.
pub trait ViewSink: Send + 'static {
    fn emit(&mut self, view: &StatusView);
}

impl ViewSink for mpsc::UnboundedSender<StatusView> {
    fn emit(&mut self, view: &StatusView) {
        if self.send(view.clone()).is_err() {
            debug!("View receiver dropped");
        }
    }
}

/// Writes each view as rendered text, or as one JSON document per line.
pub struct WriterSink<W> {
    writer: W,
    json: bool,
}

impl<W: Write + Send + 'static> WriterSink<W> {
    pub fn new(writer: W, json: bool) -> Self {
        Self { writer, json }
    }
}

impl<W: Write + Send + 'static> ViewSink for WriterSink<W> {
    fn emit(&mut self, view: &StatusView) {
        let result = if self.json {
            serde_json::to_string(view)
                .map_err(std::io::Error::from)
                .and_then(|line| writeln!(self.writer, "{}", line))
        } else {
            writeln!(self.writer, "{}", crate::tracker::render::render_text(view))
        };
        if let Err(e) = result.and_then(|_| self.writer.flush()) {
            warn!("Failed to write status view: {}", e);
        }
    }
}

pub struct TrackerSession {
    cancel: CancellationToken,
    handle: Option<JoinHandle<TransferTracker>>,
}

impl TrackerSession {
    /// Spawn the session on the current tokio runtime. The value in `updates`
    /// at spawn time is applied immediately.
    pub fn spawn<C, S>(
        tracker: TransferTracker,
        updates: watch::Receiver<TransferState>,
        clock: C,
        sink: S,
        metrics: Option<Arc<TrackerMetrics>>,
    ) -> Self
    where
        C: Clock,
        S: ViewSink,
    {
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(tracker, updates, clock, sink, metrics, cancel.clone()));
        Self { cancel, handle: Some(handle) }
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Wait for the session to end on its own and hand back the tracker.
    pub async fn join(mut self) -> Result<TransferTracker, TrackerError> {
        match self.handle.take() {
            Some(handle) => handle
                .await
                .map_err(|e| TrackerError::Other(format!("tracker session task failed: {}", e))),
            None => Err(TrackerError::Other("tracker session already joined".to_string())),
        }
    }

    /// Stop ticking and end the session.
    pub async fn shutdown(self) -> Result<TransferTracker, TrackerError> {
        self.cancel.cancel();
        self.join().await
    }
}

impl Drop for TrackerSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run<C: Clock, S: ViewSink>(
    mut tracker: TransferTracker,
    mut updates: watch::Receiver<TransferState>,
    clock: C,
    mut sink: S,
    metrics: Option<Arc<TrackerMetrics>>,
    cancel: CancellationToken,
) -> TransferTracker {
    info!(
        from = %tracker.from_chain().name,
        to = %tracker.to_chain().name,
        "Tracking transfer"
    );
    if let Some(m) = &metrics {
        m.transfers_observed.inc();
    }

    let initial = updates.borrow_and_update().clone();
    apply(&mut tracker, initial, &clock, metrics.as_deref());
    sink.emit(&tracker.view());

    let mut ticker: Option<Interval> = None;
    loop {
        if tracker.state().status.is_terminal() {
            break;
        }
        match (tracker.is_ticking(), ticker.is_some()) {
            (true, false) => {
                let period = tracker.tick_interval();
                let mut interval = interval_at(Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                ticker = Some(interval);
            }
            (false, true) => {
                debug!("Bridge ticker released");
                ticker = None;
            }
            _ => {}
        }

        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Tracker session cancelled");
                break;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    debug!("State sender dropped; ending session");
                    break;
                }
                let state = updates.borrow_and_update().clone();
                apply(&mut tracker, state, &clock, metrics.as_deref());
                sink.emit(&tracker.view());
            }
            _ = next_tick(&mut ticker) => {
                tracker.tick(clock.now());
                sink.emit(&tracker.view());
            }
        }
    }
    tracker
}

fn apply<C: Clock>(
    tracker: &mut TransferTracker,
    state: TransferState,
    clock: &C,
    metrics: Option<&TrackerMetrics>,
) {
    let now = clock.now();
    let observation = tracker.observe(state, now);
    if observation.timer_started {
        info!(at = %now, "CCIP relay in flight");
    }
    if let (Some(status), Some(m)) = (observation.finished, metrics) {
        m.record_outcome(status, tracker.timer().elapsed_secs());
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
