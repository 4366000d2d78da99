//! Tab capability
//!
//! The registry never renders anything itself. A [`Tab`] is whatever the host
//! shell uses to display a page; the registry only creates, queries and
//! destroys it through this trait.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::Result;

/// Stable identity of a tab for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(Uuid);

impl TabId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One browsing session backed by a render surface.
///
/// Implementations must be synchronous and must not call back into the
/// registry: every method may be invoked while the registry lock is held.
pub trait Tab: Send + Sync {
    fn id(&self) -> TabId;

    /// Current URL, empty before the first load.
    fn current_url(&self) -> String;

    /// Privacy mode is fixed at creation.
    fn is_private(&self) -> bool;

    /// Release the render surface. Called exactly once, by the registry.
    fn destroy(&self) -> Result<()>;

    /// Drop caches under memory pressure. The tab stays open.
    fn release_memory(&self) -> Result<()>;

    /// Re-read user settings after they changed.
    fn reapply_configuration(&self) -> Result<()>;

    fn set_network_available(&self, _available: bool) {}
}

pub type TabHandle = Arc<dyn Tab>;

/// Builds tabs for the registry.
pub trait TabFactory: Send + Sync {
    /// `None` asks for a blank tab.
    fn create(&self, url: Option<&str>, private: bool) -> Result<TabHandle>;
}

impl<F> TabFactory for F
where
    F: Fn(Option<&str>, bool) -> Result<TabHandle> + Send + Sync,
{
    fn create(&self, url: Option<&str>, private: bool) -> Result<TabHandle> {
        self(url, private)
    }
}
