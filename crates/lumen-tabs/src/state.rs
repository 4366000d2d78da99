//! Registry lifecycle
//!
//! ```text
//! Uninitialized
//!   ↓ restore
//! Populated ⟲ new_tab / remove_at / delete_tab / switch_to
//!   ↓ shutdown
//! Terminal
//!   ↓ restore (explicit restart only)
//! Populated
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryState {
    /// Constructed, nothing restored yet
    Uninitialized,
    /// Holding live tabs
    Populated,
    /// Shut down, every tab destroyed
    Terminal,
}

impl RegistryState {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: RegistryState) -> bool {
        match (self, target) {
            (RegistryState::Uninitialized, RegistryState::Populated) => true,
            // Tabs opened before the first restore
            (RegistryState::Uninitialized, RegistryState::Terminal) => true,
            (RegistryState::Populated, RegistryState::Terminal) => true,
            // A new restore on a dead registry starts over
            (RegistryState::Terminal, RegistryState::Populated) => true,
            (a, b) if *a == b => true,
            _ => false,
        }
    }

    /// Returns true if tabs may be added outside of a restore
    pub fn accepts_new_tabs(&self) -> bool {
        !matches!(self, RegistryState::Terminal)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryState::Uninitialized => "uninitialized",
            RegistryState::Populated => "populated",
            RegistryState::Terminal => "terminal",
        }
    }
}

impl std::fmt::Display for RegistryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RegistryState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uninitialized" => Ok(RegistryState::Uninitialized),
            "populated" => Ok(RegistryState::Populated),
            "terminal" => Ok(RegistryState::Terminal),
            _ => Err(format!("Unknown registry state: {}", s)),
        }
    }
}
