//! Tab Registry
//!
//! Ordered tabs plus the current-tab pointer, behind one lock. The current tab
//! is held by handle, never by index, so removing other tabs cannot make it
//! point at the wrong entry. Positions are recomputed on every call.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::codec::encode_urls;
use crate::error::TabError;
use crate::events::{RegistryEvent, EVENT_CAPACITY};
use crate::prompt::ConfirmationPrompt;
use crate::state::RegistryState;
use crate::store::SessionStore;
use crate::tab::{TabFactory, TabHandle};
use crate::Result;

pub(crate) fn same_tab(a: &TabHandle, b: &TabHandle) -> bool {
    Arc::ptr_eq(a, b)
}

pub(crate) struct TabList {
    pub(crate) tabs: Vec<TabHandle>,
    pub(crate) current: Option<TabHandle>,
    pub(crate) state: RegistryState,
    /// Bumped by every restore; confirmations from an older restore are stale
    pub(crate) generation: u64,
}

impl TabList {
    fn new() -> Self {
        Self {
            tabs: Vec::new(),
            current: None,
            state: RegistryState::Uninitialized,
            generation: 0,
        }
    }

    /// Private tabs never reach the saved session
    fn saved_blob(&self) -> String {
        encode_urls(
            self.tabs
                .iter()
                .filter(|t| !t.is_private())
                .map(|t| t.current_url()),
        )
    }

    pub(crate) fn position_of(&self, tab: &TabHandle) -> Option<usize> {
        self.tabs.iter().position(|t| same_tab(t, tab))
    }

    pub(crate) fn current_position(&self) -> Option<usize> {
        self.current.as_ref().and_then(|c| self.position_of(c))
    }

    pub(crate) fn transition_to(&mut self, target: RegistryState) -> Result<()> {
        if !self.state.can_transition_to(target) {
            return Err(TabError::InvalidTransition {
                from: self.state,
                to: target,
            });
        }

        if self.state != target {
            tracing::debug!(from = %self.state, to = %target, "Registry state transition");
        }

        self.state = target;
        Ok(())
    }
}

pub(crate) struct Shared {
    pub(crate) list: Mutex<TabList>,
    factory: Arc<dyn TabFactory>,
    pub(crate) store: Arc<dyn SessionStore>,
    pub(crate) prompt: Arc<dyn ConfirmationPrompt>,
    events: broadcast::Sender<RegistryEvent>,
}

impl Shared {
    fn emit(&self, event: RegistryEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    /// Build a tab and append it. Caller holds the lock.
    pub(crate) fn append(
        &self,
        list: &mut TabList,
        url: Option<&str>,
        private: bool,
    ) -> Result<TabHandle> {
        let tab = self.factory.create(url, private)?;
        list.tabs.push(Arc::clone(&tab));
        let position = list.tabs.len() - 1;

        tracing::debug!(
            tab_id = %tab.id(),
            url = url.unwrap_or(""),
            private,
            position,
            "Added tab"
        );
        self.emit(RegistryEvent::TabAdded {
            id: tab.id(),
            position,
        });

        Ok(tab)
    }

    pub(crate) fn select(&self, list: &mut TabList, tab: Option<TabHandle>) {
        let changed = match (&list.current, &tab) {
            (Some(old), Some(new)) => !same_tab(old, new),
            (None, None) => false,
            _ => true,
        };

        list.current = tab;

        if changed {
            self.emit(RegistryEvent::SelectionChanged {
                id: list.current.as_ref().map(|t| t.id()),
            });
        }
    }

    pub(crate) fn remove(&self, list: &mut TabList, position: usize) -> Option<TabHandle> {
        if position >= list.tabs.len() {
            return None;
        }

        let tab = list.tabs.remove(position);
        if list.current.as_ref().is_some_and(|c| same_tab(c, &tab)) {
            self.select(list, None);
        }

        destroy(&tab);
        tracing::debug!(tab_id = %tab.id(), position, "Removed tab");
        self.emit(RegistryEvent::TabRemoved { id: tab.id() });

        Some(tab)
    }

    /// Destroy every tab and clear the selection. Returns how many were dropped.
    pub(crate) fn clear(&self, list: &mut TabList) -> usize {
        self.select(list, None);

        let tabs = std::mem::take(&mut list.tabs);
        for tab in &tabs {
            destroy(tab);
            self.emit(RegistryEvent::TabRemoved { id: tab.id() });
        }
        tabs.len()
    }
}

fn destroy(tab: &TabHandle) {
    if let Err(e) = tab.destroy() {
        tracing::warn!(tab_id = %tab.id(), error = %e, "Failed to destroy tab");
    }
}

/// Thread-safe registry of open tabs.
///
/// Clones share the same tabs and lock.
pub struct TabRegistry {
    pub(crate) shared: Arc<Shared>,
}

impl TabRegistry {
    pub fn new(
        factory: Arc<dyn TabFactory>,
        store: Arc<dyn SessionStore>,
        prompt: Arc<dyn ConfirmationPrompt>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            shared: Arc::new(Shared {
                list: Mutex::new(TabList::new()),
                factory,
                store,
                prompt,
                events,
            }),
        }
    }

    /// Receive tab added/removed and selection notifications
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.shared.events.subscribe()
    }

    pub fn state(&self) -> RegistryState {
        self.shared.list.lock().state
    }

    /// Create a tab and append it. The current tab is left alone.
    ///
    /// Fails with [`TabError::Terminated`] after [`shutdown`](Self::shutdown),
    /// or with whatever error the tab factory reports.
    pub fn new_tab(&self, url: Option<&str>, private: bool) -> Result<TabHandle> {
        let mut list = self.shared.list.lock();
        if !list.state.accepts_new_tabs() {
            return Err(TabError::Terminated);
        }

        let tab = self.shared.append(&mut list, url, private)?;
        list.transition_to(RegistryState::Populated)?;
        Ok(tab)
    }

    /// Remove and destroy the tab at `position`.
    ///
    /// Clears the selection if it was the current tab; nothing is
    /// auto-selected. Out of range returns `None`.
    pub fn remove_at(&self, position: usize) -> Option<TabHandle> {
        let mut list = self.shared.list.lock();
        self.shared.remove(&mut list, position)
    }

    /// Close the tab at `position`, keeping a sensible selection.
    ///
    /// Closing the current tab selects the next tab, or the previous one when
    /// it was last. Closing any other tab leaves the selection untouched.
    pub fn delete_tab(&self, position: usize) {
        let mut list = self.shared.list.lock();

        if list.current_position() == Some(position) {
            let next = if list.tabs.len() == 1 {
                None
            } else {
                list.tabs
                    .get(position + 1)
                    .or_else(|| position.checked_sub(1).and_then(|p| list.tabs.get(p)))
                    .cloned()
            };
            self.shared.select(&mut list, next);
        }

        if let Some(tab) = self.shared.remove(&mut list, position) {
            tracing::info!(tab_id = %tab.id(), position, remaining = list.tabs.len(), "Closed tab");
        }
    }

    pub fn at(&self, position: usize) -> Option<TabHandle> {
        self.shared.list.lock().tabs.get(position).cloned()
    }

    /// Position of `tab` by identity
    pub fn position_of(&self, tab: &TabHandle) -> Option<usize> {
        self.shared.list.lock().position_of(tab)
    }

    /// Make the tab at `position` current.
    ///
    /// Out of range returns `None` and keeps the current selection.
    pub fn switch_to(&self, position: usize) -> Option<TabHandle> {
        let mut list = self.shared.list.lock();

        let Some(tab) = list.tabs.get(position).cloned() else {
            tracing::error!(position, size = list.tabs.len(), "Cannot switch to missing tab");
            return None;
        };

        self.shared.select(&mut list, Some(Arc::clone(&tab)));
        Some(tab)
    }

    pub fn current(&self) -> Option<TabHandle> {
        self.shared.list.lock().current.clone()
    }

    pub fn current_position(&self) -> Option<usize> {
        self.shared.list.lock().current_position()
    }

    pub fn size(&self) -> usize {
        self.shared.list.lock().tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Copy of the tab list. Later changes to the registry are not reflected.
    pub fn snapshot(&self) -> Vec<TabHandle> {
        self.shared.list.lock().tabs.clone()
    }

    /// Move a tab to a new position. The current tab stays current.
    pub fn move_tab(&self, from: usize, to: usize) -> bool {
        let mut list = self.shared.list.lock();
        if from >= list.tabs.len() {
            return false;
        }

        let tab = list.tabs.remove(from);
        let to = to.min(list.tabs.len());
        list.tabs.insert(to, tab);
        true
    }

    /// URLs of every non-private tab that has one, in the persisted blob format
    pub fn serialize_urls(&self) -> String {
        let list = self.shared.list.lock();
        list.saved_blob()
    }

    /// Write the current tab list to the session store.
    pub fn persist(&self) -> Result<()> {
        let list = self.shared.list.lock();
        let blob = list.saved_blob();
        self.shared.store.write_persisted_tab_blob(&blob)?;

        tracing::debug!(tab_count = list.tabs.len(), "Persisted tab list");
        Ok(())
    }

    /// Ask every tab to drop what it can under memory pressure
    pub fn release_memory(&self) {
        let list = self.shared.list.lock();
        for tab in &list.tabs {
            if let Err(e) = tab.release_memory() {
                tracing::warn!(tab_id = %tab.id(), error = %e, "Failed to release tab memory");
            }
        }
    }

    /// Push changed settings to every tab
    pub fn reapply_configuration(&self) {
        let list = self.shared.list.lock();
        for tab in &list.tabs {
            if let Err(e) = tab.reapply_configuration() {
                tracing::warn!(
                    tab_id = %tab.id(),
                    error = %e,
                    "Failed to reapply tab configuration"
                );
            }
        }
    }

    pub fn set_network_available(&self, available: bool) {
        let list = self.shared.list.lock();
        for tab in &list.tabs {
            tab.set_network_available(available);
        }
    }

    /// Destroy every tab. Only a new restore brings the registry back.
    pub fn shutdown(&self) {
        let mut list = self.shared.list.lock();
        let count = self.shared.clear(&mut list);
        // Every state may enter Terminal
        let _ = list.transition_to(RegistryState::Terminal);

        tracing::info!(tab_count = count, "Tab registry shut down");
    }
}

impl Clone for TabRegistry {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}
