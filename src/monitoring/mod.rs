use crate::blockchain::bridge::TransferStatus;
use crate::core::errors::TrackerError;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};
use tracing::info;

/// Transfer counters and bridge-duration histogram.
///
/// Constructed by the caller and shared through `Arc`; each instance owns its
/// own registry.
pub struct TrackerMetrics {
    registry: Registry,

    pub transfers_observed: IntCounter,
    pub transfers_completed: IntCounter,
    pub transfers_failed: IntCounter,
    pub bridge_elapsed_seconds: Histogram,
}

fn metrics_err(e: prometheus::Error) -> TrackerError {
    TrackerError::Other(format!("metrics: {}", e))
}

impl TrackerMetrics {
    pub fn new() -> Result<Self, TrackerError> {
        let registry = Registry::new();

        let transfers_observed =
            IntCounter::new("transfers_observed_total", "Transfers picked up by a tracker session")
                .map_err(metrics_err)?;
        let transfers_completed =
            IntCounter::new("transfers_completed_total", "Transfers that reached completed")
                .map_err(metrics_err)?;
        let transfers_failed =
            IntCounter::new("transfers_failed_total", "Transfers that reached failed")
                .map_err(metrics_err)?;
        // CCIP relays typically take 15-20 minutes
        let bridge_elapsed_seconds = Histogram::with_opts(
            HistogramOpts::new("bridge_elapsed_seconds", "Observed bridge phase duration")
                .buckets(vec![60.0, 300.0, 600.0, 900.0, 1200.0, 1800.0, 3600.0]),
        )
        .map_err(metrics_err)?;

        registry.register(Box::new(transfers_observed.clone())).map_err(metrics_err)?;
        registry.register(Box::new(transfers_completed.clone())).map_err(metrics_err)?;
        registry.register(Box::new(transfers_failed.clone())).map_err(metrics_err)?;
        registry.register(Box::new(bridge_elapsed_seconds.clone())).map_err(metrics_err)?;

        Ok(Self {
            registry,
            transfers_observed,
            transfers_completed,
            transfers_failed,
            bridge_elapsed_seconds,
        })
    }

    /// Count a terminal status; a non-zero bridge duration is recorded as well.
    pub fn record_outcome(&self, status: TransferStatus, bridge_elapsed_secs: u64) {
        match status {
            TransferStatus::Completed => self.transfers_completed.inc(),
            TransferStatus::Failed => self.transfers_failed.inc(),
            _ => return,
        }
        if bridge_elapsed_secs > 0 {
            self.bridge_elapsed_seconds.observe(bridge_elapsed_secs as f64);
        }
        info!(%status, bridge_elapsed_secs, "Recorded transfer outcome");
    }

    /// Prometheus text exposition of every metric.
    pub fn gather_text(&self) -> Result<String, TrackerError> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer).map_err(metrics_err)?;
        String::from_utf8(buffer).map_err(|e| TrackerError::Other(e.to_string()))
    }
}
