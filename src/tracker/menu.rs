//! Caller-controlled selection menu.
//!
//! Entries are plain data; the caller owns the open flag and acts on the
//! value returned by [`Menu::select`].

use crate::blockchain::registry::ChainRegistry;
use crate::core::errors::TrackerError;

#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry<T> {
    pub label: String,
    pub value: T,
    pub disabled: bool,
}

impl<T> MenuEntry<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self { label: label.into(), value, disabled: false }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Menu<T> {
    entries: Vec<MenuEntry<T>>,
    open: bool,
}

impl<T> Menu<T> {
    pub fn new(entries: Vec<MenuEntry<T>>, open: bool) -> Self {
        Self { entries, open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn entries(&self) -> &[MenuEntry<T>] {
        &self.entries
    }

    /// Value of entry `index`. Fails when the menu is closed, the index is out
    /// of range, or the entry is disabled.
    pub fn select(&self, index: usize) -> Result<&T, TrackerError> {
        if !self.open {
            return Err(TrackerError::SelectionError("menu is closed".to_string()));
        }
        let entry = self.entries.get(index).ok_or_else(|| {
            TrackerError::SelectionError(format!(
                "no entry {} (menu has {})",
                index,
                self.entries.len()
            ))
        })?;
        if entry.disabled {
            return Err(TrackerError::SelectionError(format!("{} is disabled", entry.label)));
        }
        Ok(&entry.value)
    }

    /// One line per entry; disabled entries are bracketed. Empty when closed.
    pub fn render_lines(&self) -> Vec<String> {
        if !self.open {
            return Vec::new();
        }
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                if e.disabled {
                    format!("  {}) ({}) unavailable", i + 1, e.label)
                } else {
                    format!("  {}) {}", i + 1, e.label)
                }
            })
            .collect()
    }
}

/// Destination choices for a transfer leaving `from`: the source chain and
/// chains without a supported route are disabled.
pub fn destination_menu(registry: &ChainRegistry, from: u64) -> Menu<u64> {
    let entries = registry
        .chains()
        .map(|chain| {
            MenuEntry::new(chain.name.clone(), chain.chain_id)
                .disabled(!registry.is_route_supported(from, chain.chain_id))
        })
        .collect();
    Menu::new(entries, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::registry::{ARBITRUM_SEPOLIA, BASE_SEPOLIA, SEPOLIA};

    #[test]
    fn closed_menu_refuses_selection() {
        let mut menu = Menu::new(vec![MenuEntry::new("a", 1)], false);
        assert!(menu.select(0).is_err());
        assert!(menu.render_lines().is_empty());
        menu.set_open(true);
        assert_eq!(menu.select(0).unwrap(), &1);
    }

    #[test]
    fn destination_menu_disables_source() {
        let registry = ChainRegistry::testnet();
        let menu = destination_menu(&registry, SEPOLIA);
        let disabled: Vec<u64> =
            menu.entries().iter().filter(|e| e.disabled).map(|e| e.value).collect();
        assert_eq!(disabled, vec![SEPOLIA]);
        let sepolia_index = menu.entries().iter().position(|e| e.value == SEPOLIA).unwrap();
        assert!(menu.select(sepolia_index).is_err());
        let base_index = menu.entries().iter().position(|e| e.value == BASE_SEPOLIA).unwrap();
        assert_eq!(menu.select(base_index).unwrap(), &BASE_SEPOLIA);
        assert!(menu.entries().iter().any(|e| e.value == ARBITRUM_SEPOLIA && !e.disabled));
    }
}
