//! Test doubles for the tab capability and its collaborators

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::TabError;
use crate::prompt::{ConfirmationPrompt, ConfirmationRequest};
use crate::tab::{Tab, TabFactory, TabHandle, TabId};
use crate::Result;

pub struct StubTab {
    id: TabId,
    url: Mutex<String>,
    private: bool,
    pub destroyed: AtomicUsize,
    pub released: AtomicUsize,
    pub reapplied: AtomicUsize,
    pub network: Mutex<Option<bool>>,
    fail_destroy: AtomicBool,
}

impl StubTab {
    pub fn new(url: Option<&str>, private: bool) -> Arc<Self> {
        Arc::new(Self {
            id: TabId::new(),
            url: Mutex::new(url.unwrap_or_default().to_string()),
            private,
            destroyed: AtomicUsize::new(0),
            released: AtomicUsize::new(0),
            reapplied: AtomicUsize::new(0),
            network: Mutex::new(None),
            fail_destroy: AtomicBool::new(false),
        })
    }

    pub fn navigate(&self, url: &str) {
        *self.url.lock() = url.to_string();
    }

    pub fn fail_on_destroy(&self) {
        self.fail_destroy.store(true, Ordering::SeqCst);
    }

    pub fn destroy_count(&self) -> usize {
        self.destroyed.load(Ordering::SeqCst)
    }
}

impl Tab for StubTab {
    fn id(&self) -> TabId {
        self.id
    }

    fn current_url(&self) -> String {
        self.url.lock().clone()
    }

    fn is_private(&self) -> bool {
        self.private
    }

    fn destroy(&self) -> Result<()> {
        self.destroyed.fetch_add(1, Ordering::SeqCst);
        if self.fail_destroy.load(Ordering::SeqCst) {
            return Err(TabError::Capability {
                id: self.id.to_string(),
                reason: "render surface already gone".to_string(),
            });
        }
        Ok(())
    }

    fn release_memory(&self) -> Result<()> {
        self.released.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn reapply_configuration(&self) -> Result<()> {
        self.reapplied.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn set_network_available(&self, available: bool) {
        *self.network.lock() = Some(available);
    }
}

/// Records every tab it builds, in creation order.
#[derive(Default)]
pub struct StubFactory {
    pub created: Mutex<Vec<Arc<StubTab>>>,
    fail: AtomicBool,
}

impl StubFactory {
    pub fn fail_next(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn created(&self) -> Vec<Arc<StubTab>> {
        self.created.lock().clone()
    }
}

impl TabFactory for StubFactory {
    fn create(&self, url: Option<&str>, private: bool) -> Result<TabHandle> {
        if self.fail.swap(false, Ordering::SeqCst) {
            return Err(TabError::Creation {
                url: url.map(str::to_string),
                reason: "out of render surfaces".to_string(),
            });
        }

        let tab = StubTab::new(url, private);
        self.created.lock().push(Arc::clone(&tab));
        Ok(tab)
    }
}

/// Holds confirmation requests until the test answers them.
#[derive(Default)]
pub struct RecordingPrompt {
    pub requests: Mutex<Vec<ConfirmationRequest>>,
}

impl RecordingPrompt {
    pub fn take(&self) -> Option<ConfirmationRequest> {
        self.requests.lock().pop()
    }

    pub fn pending(&self) -> usize {
        self.requests.lock().len()
    }
}

impl ConfirmationPrompt for RecordingPrompt {
    fn confirm(&self, request: ConfirmationRequest) {
        self.requests.lock().push(request);
    }
}
