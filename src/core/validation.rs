use anyhow::Result;
use regex::Regex;
use sha3::{Digest, Keccak256};

/// USDC uses 6 decimals on every supported chain.
pub const USDC_DECIMALS: usize = 6;

/// Validates an EVM address, enforcing EIP-55 when the address is mixed-case.
pub fn validate_ethereum_address(address: &str) -> Result<()> {
    if !address.starts_with("0x") || address.len() != 42 {
        return Err(anyhow::anyhow!("Invalid Ethereum address format"));
    }
    let hex_regex = Regex::new(r"^0x[0-9a-fA-F]{40}$")
        .expect("Hardcoded regex should always compile");
    if !hex_regex.is_match(address) {
        return Err(anyhow::anyhow!("Invalid Ethereum address characters"));
    }
    let body = &address[2..];
    let is_all_lower = body.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase());
    let is_all_upper = body.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase());
    if is_all_lower || is_all_upper {
        return Ok(());
    }
    if !is_eip55_checksum_valid(address) {
        return Err(anyhow::anyhow!("Invalid EIP-55 checksum for Ethereum address"));
    }
    Ok(())
}

fn is_eip55_checksum_valid(addr: &str) -> bool {
    let body = &addr[2..];
    let lower = body.to_lowercase();
    let mut keccak = Keccak256::new();
    keccak.update(lower.as_bytes());
    let hash = keccak.finalize();
    for (i, ch) in body.chars().enumerate() {
        let nibble = (hash[i / 2] >> (4 * (1 - (i % 2)))) & 0x0f;
        match ch {
            'a'..='f' if nibble >= 8 => return false,
            'A'..='F' if nibble < 8 => return false,
            _ => {}
        }
    }
    true
}

/// Validates a 32-byte hex identifier (transaction hash or CCIP message id).
pub fn validate_hash32(value: &str, what: &str) -> Result<()> {
    let re = Regex::new(r"^0x[0-9a-fA-F]{64}$").expect("Hardcoded regex should always compile");
    if !re.is_match(value) {
        return Err(anyhow::anyhow!("Invalid {}: expected 0x followed by 64 hex characters", what));
    }
    Ok(())
}

/// Strict decimal validator for amounts to avoid float parsing where exactness matters.
/// Accepts patterns like 123, 0.1, 1.234567 up to `max_decimals` decimals. No leading '+', no exponent.
pub fn validate_amount_strict(amount: &str, max_decimals: usize) -> Result<()> {
    if amount.is_empty() {
        return Err(anyhow::anyhow!("Amount cannot be empty"));
    }
    let re = Regex::new(&format!(r"^(?:0|[1-9]\d*)(?:\.(\d{{1,{}}}))?$", max_decimals))
        .expect("Decimal regex pattern should always be valid");
    if !re.is_match(amount) {
        return Err(anyhow::anyhow!("Invalid decimal amount"));
    }
    // disallow 0 or 0.0... values
    if amount.trim_matches('0').trim_matches('.').is_empty() {
        return Err(anyhow::anyhow!("Amount must be positive"));
    }
    Ok(())
}
