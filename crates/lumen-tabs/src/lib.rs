//! Lumen Tab Registry
//!
//! Owns the ordered set of open tabs and the "current tab" pointer, and rebuilds
//! that set on startup from whatever the previous process left behind.
//! Every operation on a [`TabRegistry`] is serialized behind a single lock.

mod codec;
mod error;
mod events;
mod prompt;
mod registry;
mod restore;
mod state;
mod store;
mod tab;

#[cfg(test)]
mod testing;

pub use codec::{decode_urls, encode_urls, is_local_file_url, SEPARATOR};
pub use error::TabError;
pub use events::RegistryEvent;
pub use prompt::{ChannelPrompt, ConfirmationPrompt, ConfirmationRequest};
pub use registry::TabRegistry;
pub use state::RegistryState;
pub use store::{SessionStore, RESTORE_LOST_TABS_KEY, SAVED_TABS_KEY};
pub use tab::{Tab, TabFactory, TabHandle, TabId};

pub type Result<T> = std::result::Result<T, TabError>;
