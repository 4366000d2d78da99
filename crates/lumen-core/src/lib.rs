//! Lumen Core
//!
//! Wires the settings database and the tab registry into one browser shell
//! and drives them through the process lifecycle: start, background, low
//! memory, settings changes and exit.

mod browser;
mod config;
mod error;

pub use browser::Browser;
pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use lumen_storage::{Database, StorageError};
pub use lumen_tabs::{
    ChannelPrompt, ConfirmationPrompt, ConfirmationRequest, RegistryEvent, RegistryState,
    SessionStore, Tab, TabError, TabFactory, TabHandle, TabId, TabRegistry,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
