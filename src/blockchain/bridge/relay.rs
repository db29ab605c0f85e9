//! Helpers around the CCIP relay leg: pulling the message id out of the
//! source-chain receipt and turning simulation failures into user-facing text.

use crate::core::errors::TrackerError;
use ethers::types::{Address, Log, H256};
use ethers::utils::keccak256;
use tracing::{debug, warn};

/// Event emitted by CrossChainManager when the CCIP message is sent.
pub const TRANSFER_INITIATED_EVENT: &str =
    "CrossChainTransferInitiated(address,uint256,uint64,bytes32)";

/// topic0 of [`TRANSFER_INITIATED_EVENT`].
pub fn transfer_initiated_topic() -> H256 {
    H256::from(keccak256(TRANSFER_INITIATED_EVENT.as_bytes()))
}

/// Parse a manager contract address.
pub fn parse_manager_address(address: &str) -> Result<Address, TrackerError> {
    address
        .parse::<Address>()
        .map_err(|e| TrackerError::ValidationError(format!("manager address {}: {}", address, e)))
}

/// Find the CCIP message id in receipt logs emitted by `manager`.
///
/// `messageId` is the third indexed argument, so it sits in `topics[3]`.
/// Logs from other contracts or with other signatures are skipped.
pub fn extract_ccip_message_id(logs: &[Log], manager: Address) -> Option<String> {
    let topic0 = transfer_initiated_topic();
    let found = logs
        .iter()
        .filter(|log| log.address == manager && log.topics.first() == Some(&topic0))
        .find_map(|log| {
            let id = log.topics.get(3);
            if id.is_none() {
                warn!(address = ?log.address, "CrossChainTransferInitiated log without messageId topic");
            }
            id
        })
        .map(|id| format!("0x{}", hex::encode(id.as_bytes())));
    debug!(found = found.is_some(), logs = logs.len(), "Scanned receipt for CCIP message id");
    found
}

/// Like [`extract_ccip_message_id`], but a receipt without the event is an error.
pub fn require_ccip_message_id(logs: &[Log], manager: Address) -> Result<String, TrackerError> {
    extract_ccip_message_id(logs, manager).ok_or_else(|| {
        TrackerError::DecodeError(format!(
            "no CrossChainTransferInitiated event from {:?} in {} logs",
            manager,
            logs.len()
        ))
    })
}

/// Map a raw simulation error to the message shown to the user.
pub fn classify_simulation_error(raw: &str) -> String {
    let lower = raw.to_lowercase();
    if lower.contains("router") {
        "CCIP Router error. This route may not be supported.".to_string()
    } else if lower.contains("selector") {
        "Invalid destination chain selector. This route may not be active.".to_string()
    } else if lower.contains("fee") {
        "Insufficient fee for cross-chain transfer.".to_string()
    } else if lower.contains("allowance") {
        "Insufficient USDC allowance.".to_string()
    } else if lower.contains("balance") {
        "Insufficient USDC balance.".to_string()
    } else if raw.trim().is_empty() {
        "Unknown simulation error".to_string()
    } else {
        raw.to_string()
    }
}
