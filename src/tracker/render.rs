//! Plain-text rendering of a [`StatusView`] for terminals and logs.

use crate::tracker::steps::StepMarker;
use crate::tracker::view::{Outcome, StatusView, StepDetail};
use std::fmt;

const BAR_WIDTH: usize = 20;

pub fn marker_glyph(marker: StepMarker) -> &'static str {
    match marker {
        StepMarker::Success => "✓",
        StepMarker::InProgress => "⟳",
        StepMarker::Error => "✗",
        StepMarker::NotStarted => "○",
    }
}

pub fn progress_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// Render the view as multi-line text.
pub fn render_text(view: &StatusView) -> String {
    view.to_string()
}

impl fmt::Display for StatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Transfer Status")?;
        writeln!(f, "  Amount: {}", self.summary.amount)?;
        writeln!(f, "  From:   {}", self.summary.from)?;
        writeln!(f, "  To:     {}", self.summary.to)?;
        writeln!(f)?;

        for step in &self.steps {
            writeln!(f, "  {} {}", marker_glyph(step.marker), step.label)?;
            match &step.detail {
                Some(StepDetail::InProgress) => writeln!(f, "      In progress...")?,
                Some(StepDetail::Bridging(p)) => {
                    writeln!(f, "      Processing cross-chain transfer...")?;
                    writeln!(
                        f,
                        "      {} / {} {} {:.0}%",
                        p.elapsed_label,
                        p.target_label,
                        progress_bar(p.percent),
                        p.percent
                    )?;
                }
                Some(StepDetail::Failed { message }) => writeln!(f, "      {}", message)?,
                None => {}
            }
        }

        for link in [&self.tx_link, &self.ccip_link].into_iter().flatten() {
            writeln!(f)?;
            writeln!(f, "  {}: {}", link.label, link.display)?;
            writeln!(f, "    {}: {}", link.action, link.href)?;
        }
        if let Some(notice) = self.bridging_notice {
            writeln!(f, "    {}", notice)?;
        }

        match &self.outcome {
            Some(Outcome::Completed { headline, detail }) => {
                writeln!(f)?;
                writeln!(f, "  {} {}", marker_glyph(StepMarker::Success), headline)?;
                writeln!(f, "    {}", detail)?;
            }
            Some(Outcome::Failed { headline, message }) => {
                writeln!(f)?;
                writeln!(f, "  {} {}", marker_glyph(StepMarker::Error), headline)?;
                writeln!(f, "    {}", message)?;
            }
            None => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::bridge::{TransferState, TransferStatus};
    use crate::blockchain::registry::{ChainRegistry, BASE_SEPOLIA, SEPOLIA};
    use crate::core::config::TrackerConfig;
    use crate::tracker::TransferTracker;
    use chrono::Utc;

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(progress_bar(0.0), format!("[{}]", ".".repeat(20)));
        assert_eq!(progress_bar(50.0), format!("[{}{}]", "#".repeat(10), ".".repeat(10)));
        assert_eq!(progress_bar(95.0), format!("[{}.]", "#".repeat(19)));
    }

    #[test]
    fn failed_view_renders_marker_and_error_block() {
        let mut tracker = TransferTracker::new(
            &ChainRegistry::testnet(),
            &TrackerConfig::default(),
            SEPOLIA,
            BASE_SEPOLIA,
            "3",
        )
        .unwrap();
        tracker.observe(
            TransferState {
                status: TransferStatus::Failed,
                current_step: 1,
                error: Some("Insufficient gas".to_string()),
                ..TransferState::default()
            },
            Utc::now(),
        );
        let text = render_text(&tracker.view());
        assert!(text.starts_with("Transfer Status\n  Amount: 3 USDC\n"));
        assert!(text.contains("  ✓ Approve USDC\n"));
        assert!(text.contains("  ✗ Initiate Transfer\n      Insufficient gas\n"));
        assert!(text.contains("  ✗ Transfer Failed\n    Insufficient gas\n"));
        assert!(text.contains("  ○ Auto-Deposit to Yield\n"));
    }
}
