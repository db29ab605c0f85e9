//! Supported chains and transfer routes.
//!
//! The registry is plain data built explicitly by the caller and handed to the
//! tracker; there is no process-wide instance.

use crate::core::config::{ChainConfig, RouteConfig, TrackerConfig};
use crate::core::errors::TrackerError;
use crate::core::validation::validate_ethereum_address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub const SEPOLIA: u64 = 11155111;
pub const BASE_SEPOLIA: u64 = 84532;
pub const ARBITRUM_SEPOLIA: u64 = 421614;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Chain metadata plus the contract addresses the transfer flow talks to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chain {
    pub chain_id: u64,
    pub name: String,
    /// CCIP chain selector
    pub selector: Option<u64>,
    pub rpc_url: String,
    pub block_explorer: String,
    pub native_currency: NativeCurrency,
    pub is_testnet: bool,
    pub usdc: Option<String>,
    pub cross_chain_manager: Option<String>,
    pub ccip_router: Option<String>,
}

impl Chain {
    /// Explorer URL for a transaction on this chain.
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.block_explorer.trim_end_matches('/'), tx_hash)
    }
}

impl From<&ChainConfig> for Chain {
    fn from(cfg: &ChainConfig) -> Self {
        Chain {
            chain_id: cfg.chain_id,
            name: cfg.name.clone(),
            selector: cfg.parsed_selector().ok(),
            rpc_url: cfg.rpc_url.clone(),
            block_explorer: cfg.block_explorer.clone(),
            native_currency: NativeCurrency {
                name: cfg.native_currency_name(),
                symbol: cfg.native_symbol.clone(),
                decimals: 18,
            },
            is_testnet: cfg.is_testnet,
            usdc: cfg.usdc.clone(),
            cross_chain_manager: cfg.cross_chain_manager.clone(),
            ccip_router: cfg.ccip_router.clone(),
        }
    }
}

/// Fee/time estimate for one directed pair of chains.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferRoute {
    pub is_active: bool,
    pub estimated_time: String,
    /// Native-token fee estimate, as a decimal string
    pub estimated_fee: String,
}

impl TransferRoute {
    fn unavailable() -> Self {
        Self {
            is_active: false,
            estimated_time: "N/A".to_string(),
            estimated_fee: "N/A".to_string(),
        }
    }
}

impl From<&RouteConfig> for TransferRoute {
    fn from(cfg: &RouteConfig) -> Self {
        Self {
            is_active: cfg.is_active,
            estimated_time: cfg.estimated_time.clone(),
            estimated_fee: cfg.estimated_fee.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct ChainPair {
    pub source: u64,
    pub destination: u64,
}

/// Result of checking a chain has everything a transfer needs.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChainConfigReport {
    pub is_valid: bool,
    pub has_manager: bool,
    pub has_usdc: bool,
    pub has_router: bool,
    pub has_selector: bool,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    chains: BTreeMap<u64, Chain>,
    routes: BTreeMap<(u64, u64), TransferRoute>,
}

impl ChainRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The CCIP testnet deployment: Sepolia, Base Sepolia and Arbitrum Sepolia,
    /// with every directed pair active.
    pub fn testnet() -> Self {
        let mut registry = Self::new();
        registry.insert_chain(testnet_chain(
            SEPOLIA,
            "Ethereum Sepolia",
            16015286601757825753,
            "https://rpc.sepolia.org",
            "https://sepolia.etherscan.io",
            "Sepolia Ether",
            "0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238",
            "0xa4e8a4E9C84D9b8B02095AeE9d4f163744A4d734",
            "0x0BF3dE8c5D3e8A2B34D2BEeB17ABfCeBaf363A59",
        ));
        registry.insert_chain(testnet_chain(
            BASE_SEPOLIA,
            "Base Sepolia",
            10344971235874465080,
            "https://sepolia.base.org",
            "https://sepolia.basescan.org",
            "Sepolia Ether",
            "0x036CbD53842c5426634e7929541eC2318f3dCF7e",
            "0x79661a34488f91a50Ff99027B905a87E72c7291A",
            "0xD3b06cEbF099CE7DA4AcCf578aaebFDBd6e88a93",
        ));
        registry.insert_chain(testnet_chain(
            ARBITRUM_SEPOLIA,
            "Arbitrum Sepolia",
            3478487238524512106,
            "https://sepolia-rollup.arbitrum.io/rpc",
            "https://sepolia.arbiscan.io",
            "Arbitrum Sepolia Ether",
            "0x75faf114eafb1BDbe2F0316DF893fd58CE46AA4d",
            "0xb59E4c855a8E142e389bB535962622B42955b9BC",
            "0x2a9C5afB0d0e4BAb2BCdaE109EC4b0c4Be15a165",
        ));

        let ids = [SEPOLIA, BASE_SEPOLIA, ARBITRUM_SEPOLIA];
        for &from in &ids {
            for &to in &ids {
                if from != to {
                    registry.insert_route(
                        from,
                        to,
                        TransferRoute {
                            is_active: true,
                            estimated_time: "5-10 minutes".to_string(),
                            estimated_fee: "0.001".to_string(),
                        },
                    );
                }
            }
        }
        registry
    }

    /// Built-in testnet registry with configured chains and routes merged in.
    /// Configured entries replace built-in ones with the same id.
    pub fn from_config(config: &TrackerConfig) -> Self {
        let mut registry = Self::testnet();
        for chain in &config.chains {
            debug!(chain_id = chain.chain_id, name = %chain.name, "Registering configured chain");
            registry.insert_chain(Chain::from(chain));
        }
        for route in &config.routes {
            if !registry.contains(route.from) || !registry.contains(route.to) {
                warn!(from = route.from, to = route.to, "Route references unknown chain");
            }
            registry.insert_route(route.from, route.to, TransferRoute::from(route));
        }
        registry
    }

    pub fn insert_chain(&mut self, chain: Chain) {
        self.chains.insert(chain.chain_id, chain);
    }

    pub fn insert_route(&mut self, from: u64, to: u64, route: TransferRoute) {
        self.routes.insert((from, to), route);
    }

    pub fn contains(&self, chain_id: u64) -> bool {
        self.chains.contains_key(&chain_id)
    }

    pub fn get(&self, chain_id: u64) -> Option<&Chain> {
        self.chains.get(&chain_id)
    }

    /// Like [`get`](Self::get) but reports unknown ids as an error.
    pub fn require(&self, chain_id: u64) -> Result<&Chain, TrackerError> {
        self.get(chain_id).ok_or(TrackerError::UnknownChain(chain_id))
    }

    /// Chains ordered by chain id.
    pub fn chains(&self) -> impl Iterator<Item = &Chain> {
        self.chains.values()
    }

    pub fn selector(&self, chain_id: u64) -> Option<u64> {
        self.get(chain_id).and_then(|c| c.selector)
    }

    /// Route estimate for a directed pair; unknown pairs come back inactive with "N/A" estimates.
    pub fn transfer_route(&self, from: u64, to: u64) -> TransferRoute {
        self.routes.get(&(from, to)).cloned().unwrap_or_else(TransferRoute::unavailable)
    }

    /// Every ordered pair of distinct chains that have a CCIP selector.
    pub fn supported_chain_pairs(&self) -> Vec<ChainPair> {
        let ids: Vec<u64> =
            self.chains.values().filter(|c| c.selector.is_some()).map(|c| c.chain_id).collect();
        let mut pairs = Vec::with_capacity(ids.len() * ids.len().saturating_sub(1));
        for &source in &ids {
            for &destination in &ids {
                if source != destination {
                    pairs.push(ChainPair { source, destination });
                }
            }
        }
        pairs
    }

    /// Both ends need a selector and a CrossChainManager, and must differ.
    pub fn is_route_supported(&self, from: u64, to: u64) -> bool {
        let ready = |id: u64| {
            self.get(id)
                .map(|c| c.selector.is_some() && c.cross_chain_manager.is_some())
                .unwrap_or(false)
        };
        from != to && ready(from) && ready(to)
    }

    pub fn validate_chain_configuration(&self, chain_id: u64) -> ChainConfigReport {
        let chain = self.get(chain_id);
        let address_ok = |addr: Option<&String>| {
            // format only; deployment addresses are not always checksummed
            addr.map(|a| validate_ethereum_address(&a.to_lowercase()).is_ok()).unwrap_or(false)
        };
        let has_manager = address_ok(chain.and_then(|c| c.cross_chain_manager.as_ref()));
        let has_usdc = address_ok(chain.and_then(|c| c.usdc.as_ref()));
        let has_router = address_ok(chain.and_then(|c| c.ccip_router.as_ref()));
        let has_selector = chain.and_then(|c| c.selector).is_some();

        let mut issues = Vec::new();
        if !has_manager {
            issues.push(format!("Missing CrossChainManager address for chain {}", chain_id));
        }
        if !has_usdc {
            issues.push(format!("Missing USDC address for chain {}", chain_id));
        }
        if !has_router {
            issues.push(format!("Missing CCIP Router address for chain {}", chain_id));
        }
        if !has_selector {
            issues.push(format!("Missing chain selector for chain {}", chain_id));
        }

        ChainConfigReport {
            is_valid: issues.is_empty(),
            has_manager,
            has_usdc,
            has_router,
            has_selector,
            issues,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn testnet_chain(
    chain_id: u64,
    name: &str,
    selector: u64,
    rpc_url: &str,
    block_explorer: &str,
    currency_name: &str,
    usdc: &str,
    manager: &str,
    router: &str,
) -> Chain {
    Chain {
        chain_id,
        name: name.to_string(),
        selector: Some(selector),
        rpc_url: rpc_url.to_string(),
        block_explorer: block_explorer.to_string(),
        native_currency: NativeCurrency {
            name: currency_name.to_string(),
            symbol: "ETH".to_string(),
            decimals: 18,
        },
        is_testnet: true,
        usdc: Some(usdc.to_string()),
        cross_chain_manager: Some(manager.to_string()),
        ccip_router: Some(router.to_string()),
    }
}
