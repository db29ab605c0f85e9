// filepath: src/blockchain/bridge/tests.rs
use super::transfer::validate_transfer_request;
use super::*;
use crate::blockchain::registry::{ChainRegistry, ARBITRUM_SEPOLIA, BASE_SEPOLIA, SEPOLIA};

fn hash(byte: &str) -> String {
    format!("0x{}", byte.repeat(32))
}

#[test]
fn happy_path_keeps_invariants() {
    let mut state = TransferState::new();
    state.begin().unwrap();
    assert_eq!(state.status, TransferStatus::Pending);
    state.validate().unwrap();

    state.advance_to(1, TransferStatus::Confirming).unwrap();
    state.record_tx_hash(&hash("ab")).unwrap();
    state.confirm().unwrap();
    state.record_message_id(&hash("cd")).unwrap();
    state.advance_to(2, TransferStatus::Bridging).unwrap();
    assert!(state.bridge_started());
    state.validate().unwrap();

    state.advance_to(3, TransferStatus::Depositing).unwrap();
    state.complete().unwrap();
    assert_eq!(state.current_step, TOTAL_STEPS);
    assert_eq!(state.ccip_message_id, Some(hash("cd")));
    state.validate().unwrap();
}

#[test]
fn step_cannot_move_backwards() {
    let mut state = TransferState::new();
    state.begin().unwrap();
    state.advance_to(2, TransferStatus::Bridging).unwrap();
    let err = state.advance_to(1, TransferStatus::Confirming).unwrap_err();
    assert!(matches!(err, TrackerError::InvalidState(_)));
    assert_eq!(state.current_step, 2);
}

#[test]
fn message_id_is_sticky() {
    let mut state = TransferState::new();
    state.begin().unwrap();
    state.record_message_id(&hash("cd")).unwrap();
    // same id again is fine, a different one is refused
    state.record_message_id(&hash("CD")).unwrap();
    assert!(state.record_message_id(&hash("ef")).is_err());
    assert_eq!(state.ccip_message_id, Some(hash("cd")));
}

#[test]
fn fail_always_sets_error() {
    let mut state = TransferState::new();
    state.begin().unwrap();
    state.fail(None);
    assert_eq!(state.status, TransferStatus::Failed);
    assert_eq!(state.error.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
    state.validate().unwrap();
    assert!(state.advance_to(1, TransferStatus::Confirming).is_err());
}

#[test]
fn simulation_failure_is_classified() {
    let mut state = TransferState::new();
    state.begin().unwrap();
    state.fail_simulation("execution reverted: ERC20: insufficient allowance");
    assert_eq!(state.status, TransferStatus::Failed);
    assert_eq!(state.error.as_deref(), Some("Insufficient USDC allowance."));

    let mut state = TransferState::new();
    state.fail_simulation("  ");
    assert_eq!(state.error.as_deref(), Some("Unknown simulation error"));
    state.validate().unwrap();
}

#[test]
fn restart_resets_attempt() {
    let mut state = TransferState::new();
    state.begin().unwrap();
    state.advance_to(2, TransferStatus::Bridging).unwrap();
    state.record_message_id(&hash("cd")).unwrap();
    state.fail(Some("Insufficient gas".to_string()));
    state.restart();
    assert_eq!(state.status, TransferStatus::Pending);
    assert_eq!(state.current_step, 0);
    assert_eq!(state.ccip_message_id, None);
    assert_eq!(state.error, None);
}

#[test]
fn validate_flags_error_without_failure() {
    let state = TransferState {
        status: TransferStatus::Bridging,
        error: Some("boom".to_string()),
        ..TransferState::default()
    };
    assert!(state.validate().is_err());
}

#[test]
fn failure_falls_back_to_generic_message() {
    let failure = TransferFailure { message: None };
    assert_eq!(failure.display_message(), GENERIC_FAILURE_MESSAGE);
    let failure = TransferFailure { message: Some("Insufficient gas".to_string()) };
    assert_eq!(failure.display_message(), "Insufficient gas");
}

#[test]
fn state_json_uses_camel_case() {
    let json = r#"{"status":"bridging","currentStep":2,"totalSteps":4,
        "ccipMessageId":"0x01","isTransactionConfirmed":true}"#;
    let state: TransferState = serde_json::from_str(json).unwrap();
    assert_eq!(state.status, TransferStatus::Bridging);
    assert_eq!(state.current_step, 2);
    assert!(state.bridge_started());
}

#[test]
fn transfer_request_validation() {
    let registry = ChainRegistry::testnet();
    let ok = validate_transfer_request(&registry, SEPOLIA, BASE_SEPOLIA, "10.5", None).unwrap();
    assert_eq!(ok.amount, 10_500_000);

    assert!(matches!(
        validate_transfer_request(&registry, SEPOLIA, SEPOLIA, "1", None),
        Err(TrackerError::UnsupportedRoute(_))
    ));
    assert!(matches!(
        validate_transfer_request(&registry, SEPOLIA, 1, "1", None),
        Err(TrackerError::UnknownChain(1))
    ));
    assert!(matches!(
        validate_transfer_request(&registry, SEPOLIA, ARBITRUM_SEPOLIA, "0", None),
        Err(TrackerError::InvalidAmount(_))
    ));
    assert!(validate_transfer_request(&registry, SEPOLIA, ARBITRUM_SEPOLIA, "1", Some("0x123"))
        .is_err());
}
