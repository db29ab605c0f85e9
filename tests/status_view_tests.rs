// tests/status_view_tests.rs - rendering properties of the transfer status view
use ccip_transfer_tracker::blockchain::bridge::{
    TransferState, TransferStatus, GENERIC_FAILURE_MESSAGE, TOTAL_STEPS,
};
use ccip_transfer_tracker::blockchain::registry::{ChainRegistry, BASE_SEPOLIA, SEPOLIA};
use ccip_transfer_tracker::core::config::TrackerConfig;
use ccip_transfer_tracker::tracker::render::render_text;
use ccip_transfer_tracker::tracker::steps::{StepMarker, StepState};
use ccip_transfer_tracker::tracker::view::{Outcome, StepDetail};
use ccip_transfer_tracker::tracker::TransferTracker;
use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

fn tracker() -> TransferTracker {
    TransferTracker::new(
        &ChainRegistry::testnet(),
        &TrackerConfig::default(),
        SEPOLIA,
        BASE_SEPOLIA,
        "250.5",
    )
    .unwrap()
}

fn tx_hash() -> String {
    format!("0xabc123{}def456", "0".repeat(52))
}

fn message_id() -> String {
    format!("0x{}", "9f".repeat(32))
}

fn bridging() -> TransferState {
    TransferState {
        status: TransferStatus::Bridging,
        current_step: 2,
        tx_hash: Some(tx_hash()),
        ccip_message_id: Some(message_id()),
        is_transaction_confirmed: true,
        ..TransferState::default()
    }
}

#[test]
fn steps_follow_position_rule() {
    let mut t = tracker();
    t.observe(bridging(), at(0));
    let view = t.view();
    let states: Vec<StepState> = view.steps.iter().map(|s| s.state).collect();
    assert_eq!(
        states,
        vec![StepState::Completed, StepState::Completed, StepState::Active, StepState::Pending]
    );
    let markers: Vec<StepMarker> = view.steps.iter().map(|s| s.marker).collect();
    assert_eq!(
        markers,
        vec![StepMarker::Success, StepMarker::Success, StepMarker::InProgress, StepMarker::NotStarted]
    );
}

#[test]
fn bridge_step_shows_elapsed_and_target() {
    let mut t = tracker();
    t.observe(bridging(), at(0));
    t.tick(at(125));
    let view = t.view();
    match &view.steps[2].detail {
        Some(StepDetail::Bridging(p)) => {
            assert_eq!(p.elapsed_label, "2:05");
            assert_eq!(p.target_label, "~20:00");
            assert!((p.percent - 125.0 / 1200.0 * 100.0).abs() < 1e-9);
        }
        other => panic!("expected bridging detail, got {:?}", other),
    }
    let text = render_text(&view);
    assert!(text.contains("2:05 / ~20:00"));
    assert!(text.contains("Processing cross-chain transfer..."));
}

#[test]
fn progress_never_exceeds_cap() {
    let mut t = tracker();
    t.observe(bridging(), at(0));
    t.tick(at(5000));
    match &t.view().steps[2].detail {
        Some(StepDetail::Bridging(p)) => assert_eq!(p.percent, 95.0),
        other => panic!("expected bridging detail, got {:?}", other),
    }
}

#[test]
fn active_step_without_timer_is_plain_in_progress() {
    let mut t = tracker();
    let mut unconfirmed = bridging();
    unconfirmed.is_transaction_confirmed = false;
    t.observe(unconfirmed, at(0));
    assert_eq!(t.view().steps[2].detail, Some(StepDetail::InProgress));
    assert!(t.timer().started_at().is_none());
}

#[test]
fn completed_renders_success_and_no_active_step() {
    let mut t = tracker();
    t.observe(bridging(), at(0));
    let done = TransferState { status: TransferStatus::Completed, current_step: 3, ..bridging() };
    t.observe(done, at(900));
    let view = t.view();
    assert!(view.active_step().is_none());
    assert!(view.steps.iter().all(|s| s.state == StepState::Completed));
    assert!(matches!(view.outcome, Some(Outcome::Completed { .. })));
    assert!(render_text(&view).contains("Transfer Complete!"));
}

#[test]
fn failure_shows_supplied_error() {
    let mut t = tracker();
    let failed = TransferState {
        status: TransferStatus::Failed,
        current_step: 1,
        error: Some("Insufficient gas".to_string()),
        ..TransferState::default()
    };
    t.observe(failed, at(0));
    let view = t.view();
    let step = view.failed_step().expect("failed step");
    assert_eq!(step.index, 1);
    assert_eq!(step.marker, StepMarker::Error);
    assert_eq!(step.detail, Some(StepDetail::Failed { message: "Insufficient gas".to_string() }));
    assert!(view.active_step().is_none());
}

#[test]
fn failure_without_error_uses_fallback() {
    let mut t = tracker();
    let failed = TransferState {
        status: TransferStatus::Failed,
        current_step: 2,
        ..TransferState::default()
    };
    t.observe(failed, at(0));
    let view = t.view();
    assert_eq!(
        view.failed_step().and_then(|s| s.detail.clone()),
        Some(StepDetail::Failed { message: GENERIC_FAILURE_MESSAGE.to_string() })
    );
    match view.outcome {
        Some(Outcome::Failed { message, .. }) => assert_eq!(message, GENERIC_FAILURE_MESSAGE),
        other => panic!("expected failure outcome, got {:?}", other),
    }
}

#[test]
fn links_truncate_display_but_not_target() {
    let mut t = tracker();
    t.observe(bridging(), at(0));
    let view = t.view();

    let tx = view.tx_link.expect("tx link");
    let hash = tx_hash();
    assert_eq!(tx.href, format!("https://sepolia.etherscan.io/tx/{}", hash));
    assert_eq!(tx.display, format!("{}...{}", &hash[..10], &hash[hash.len() - 8..]));
    assert_eq!(tx.display, "0xabc12300...00def456");

    let ccip = view.ccip_link.expect("ccip link");
    assert_eq!(ccip.href, format!("https://ccip.chain.link/msg/{}", message_id()));
    assert!(ccip.display.contains("..."));
    assert!(view.bridging_notice.is_some());
}

#[test]
fn summary_lists_amount_and_chains() {
    let t = tracker();
    let view = t.view();
    assert_eq!(view.summary.amount, "250.5 USDC");
    assert_eq!(view.summary.from, "Ethereum Sepolia");
    assert_eq!(view.summary.to, "Base Sepolia");
    assert_eq!(view.steps.len(), TOTAL_STEPS);
    assert!(view.tx_link.is_none() && view.ccip_link.is_none());
}

#[test]
fn elapsed_time_frozen_after_bridging() {
    let mut t = tracker();
    t.observe(bridging(), at(0));
    t.tick(at(61));
    let depositing =
        TransferState { status: TransferStatus::Depositing, current_step: 3, ..bridging() };
    t.observe(depositing, at(62));
    t.tick(at(300));
    assert_eq!(t.timer().elapsed_secs(), 61);
    // the bridge step is now completed and shows no live detail
    assert_eq!(t.view().steps[2].detail, None);
    assert_eq!(t.view().steps[3].detail, Some(StepDetail::InProgress));
}
