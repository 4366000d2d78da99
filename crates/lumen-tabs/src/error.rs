//! Tab error types

use thiserror::Error;

use crate::state::RegistryState;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Storage error: {0}")]
    Storage(#[from] lumen_storage::StorageError),

    #[error("Failed to create tab for {url:?}: {reason}")]
    Creation { url: Option<String>, reason: String },

    #[error("Tab {id} failed: {reason}")]
    Capability { id: String, reason: String },

    #[error("Invalid registry transition: {from} -> {to}")]
    InvalidTransition {
        from: RegistryState,
        to: RegistryState,
    },

    #[error("Tab registry has been shut down")]
    Terminated,
}
