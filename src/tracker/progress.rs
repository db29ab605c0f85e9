//! Time-derived bridge progress and display formatting.

use crate::core::config::TimingConfig;
use serde::Serialize;

/// Synthetic progress for the bridging phase.
///
/// Capped below 100 so time alone never claims completion; only a
/// `completed` status from the orchestrator does.
pub fn bridge_progress_percent(elapsed_secs: u64, estimated_secs: u64, cap_percent: f64) -> f64 {
    if estimated_secs == 0 {
        return cap_percent;
    }
    (elapsed_secs as f64 / estimated_secs as f64 * 100.0).min(cap_percent)
}

/// `m:ss`, seconds zero-padded.
pub fn format_elapsed(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Shortened identifier: first 10 chars, "...", last 8 chars.
/// Identifiers too short to shorten are returned unchanged.
pub fn truncate_identifier(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() <= 18 {
        return id.to_string();
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[chars.len() - 8..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Everything the bridge step shows while the relay is in flight.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BridgeProgress {
    pub elapsed_secs: u64,
    pub elapsed_label: String,
    /// "~20:00" for the default estimate
    pub target_label: String,
    pub percent: f64,
}

impl BridgeProgress {
    pub fn new(elapsed_secs: u64, timing: &TimingConfig) -> Self {
        Self {
            elapsed_secs,
            elapsed_label: format_elapsed(elapsed_secs),
            target_label: format!("~{}", format_elapsed(timing.estimated_bridge_secs)),
            percent: bridge_progress_percent(
                elapsed_secs,
                timing.estimated_bridge_secs,
                timing.progress_cap_percent,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case(0, "0:00")]
    #[test_case(59, "0:59")]
    #[test_case(60, "1:00")]
    #[test_case(125, "2:05")]
    #[test_case(1200, "20:00")]
    fn formats_elapsed(secs: u64, expected: &str) {
        assert_eq!(format_elapsed(secs), expected);
    }

    #[test]
    fn progress_is_capped() {
        assert_eq!(bridge_progress_percent(600, 1200, 95.0), 50.0);
        assert_eq!(bridge_progress_percent(1200, 1200, 95.0), 95.0);
        assert_eq!(bridge_progress_percent(5000, 1200, 95.0), 95.0);
    }

    #[test]
    fn default_target_label() {
        let progress = BridgeProgress::new(125, &TimingConfig::default());
        assert_eq!(progress.elapsed_label, "2:05");
        assert_eq!(progress.target_label, "~20:00");
    }

    #[test]
    fn truncates_long_identifiers_only() {
        let hash = format!("0xabc123{}def456", "0".repeat(52));
        let short = truncate_identifier(&hash);
        assert_eq!(short, format!("{}...{}", &hash[..10], &hash[hash.len() - 8..]));
        assert_eq!(truncate_identifier("0x1234"), "0x1234");
    }

    proptest! {
        #[test]
        fn progress_monotonic_and_bounded(a in 0u64..100_000, b in 0u64..100_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let p_lo = bridge_progress_percent(lo, 1200, 95.0);
            let p_hi = bridge_progress_percent(hi, 1200, 95.0);
            prop_assert!(p_lo <= p_hi);
            prop_assert!(p_hi <= 95.0);
        }
    }
}
