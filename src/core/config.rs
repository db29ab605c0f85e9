use crate::core::errors::TrackerError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Default CCIP message explorer prefix; the message id is appended verbatim.
pub const CCIP_EXPLORER_BASE_URL: &str = "https://ccip.chain.link/msg/";

/// Timing knobs for the bridge-phase estimate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingConfig {
    /// Expected CCIP relay duration (seconds)
    #[serde(default = "TimingConfig::default_estimated_bridge_secs")]
    pub estimated_bridge_secs: u64,

    /// Upper bound for the time-derived progress percentage
    #[serde(default = "TimingConfig::default_progress_cap_percent")]
    pub progress_cap_percent: f64,

    /// Timer tick interval (milliseconds)
    #[serde(default = "TimingConfig::default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl TimingConfig {
    fn default_estimated_bridge_secs() -> u64 { 20 * 60 }
    fn default_progress_cap_percent() -> f64 { 95.0 }
    fn default_tick_interval_ms() -> u64 { 1000 }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            estimated_bridge_secs: Self::default_estimated_bridge_secs(),
            progress_cap_percent: Self::default_progress_cap_percent(),
            tick_interval_ms: Self::default_tick_interval_ms(),
        }
    }
}

/// Explorer link configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExplorerConfig {
    #[serde(default = "ExplorerConfig::default_ccip_base_url")]
    pub ccip_base_url: String,
}

impl ExplorerConfig {
    fn default_ccip_base_url() -> String { CCIP_EXPLORER_BASE_URL.to_string() }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self { ccip_base_url: Self::default_ccip_base_url() }
    }
}

/// Extra chain entry merged into the built-in registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChainConfig {
    pub chain_id: u64,
    pub name: String,
    /// CCIP chain selector as a decimal string; selectors overflow TOML integers
    pub selector: String,
    pub block_explorer: String,
    pub rpc_url: String,
    #[serde(default = "ChainConfig::default_native_symbol")]
    pub native_symbol: String,
    /// Defaults to "<chain name> <symbol>"
    #[serde(default)]
    pub native_name: Option<String>,
    #[serde(default)]
    pub is_testnet: bool,
    pub usdc: Option<String>,
    pub cross_chain_manager: Option<String>,
    pub ccip_router: Option<String>,
}

impl ChainConfig {
    fn default_native_symbol() -> String { "ETH".to_string() }

    pub fn native_currency_name(&self) -> String {
        self.native_name
            .clone()
            .unwrap_or_else(|| format!("{} {}", self.name, self.native_symbol))
    }

    pub fn parsed_selector(&self) -> Result<u64, TrackerError> {
        self.selector.trim().parse().map_err(|_| {
            TrackerError::ConfigError(format!(
                "chain {}: selector is not a u64: {}",
                self.chain_id, self.selector
            ))
        })
    }
}

/// Extra route entry merged into the built-in route table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteConfig {
    pub from: u64,
    pub to: u64,
    #[serde(default = "RouteConfig::default_active")]
    pub is_active: bool,
    pub estimated_time: String,
    pub estimated_fee: String,
}

impl RouteConfig {
    fn default_active() -> bool { true }
}

/// Tracker configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrackerConfig {
    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub explorer: ExplorerConfig,

    #[serde(default)]
    pub chains: Vec<ChainConfig>,

    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

impl TrackerConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, TrackerError> {
        let config: TrackerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self, TrackerError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!(
            path = %path.display(),
            chains = config.chains.len(),
            routes = config.routes.len(),
            "Loaded tracker config"
        );
        Ok(config)
    }

    /// Resolve the config path from an explicit argument or `CONFIG_PATH`,
    /// falling back to defaults when nothing is configured or loading fails.
    pub fn load_or_default(explicit: Option<&Path>) -> Self {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match std::env::var("CONFIG_PATH") {
                Ok(p) if !p.trim().is_empty() => p.into(),
                _ => return Self::default(),
            },
        };
        Self::load(&path).unwrap_or_else(|e| {
            warn!("Failed to load {}: {}. Using default configuration", path.display(), e);
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.timing.estimated_bridge_secs == 0 {
            return Err(TrackerError::ConfigError(
                "timing.estimated_bridge_secs must be positive".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.timing.progress_cap_percent) {
            return Err(TrackerError::ConfigError(
                "timing.progress_cap_percent must be within 0..=100".to_string(),
            ));
        }
        if self.timing.tick_interval_ms == 0 {
            return Err(TrackerError::ConfigError(
                "timing.tick_interval_ms must be positive".to_string(),
            ));
        }
        if !self.explorer.ccip_base_url.starts_with("http") {
            return Err(TrackerError::ConfigError(format!(
                "explorer.ccip_base_url is not a URL: {}",
                self.explorer.ccip_base_url
            )));
        }
        for chain in &self.chains {
            chain.parsed_selector()?;
        }
        Ok(())
    }
}
