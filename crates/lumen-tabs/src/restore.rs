//! Startup and crash recovery
//!
//! Rebuilds the tab list from three sources, in this order:
//! 1. tabs saved by the previous process (read once, then cleared),
//! 2. the URL the shell was asked to open, if any,
//! 3. a blank tab when nothing else produced one.

use crate::codec::{decode_urls, is_local_file_url};
use crate::prompt::ConfirmationRequest;
use crate::registry::{Shared, TabList, TabRegistry};
use crate::state::RegistryState;
use crate::Result;

impl TabRegistry {
    /// Replace the tab list with the recovered session.
    ///
    /// Any tabs still open are destroyed first. Saved tabs are only read
    /// outside private mode, and only while the restore feature is on; in
    /// private mode the saved list is left untouched for the next normal
    /// start. A local file `pending_url` is not opened directly: the prompt
    /// is asked once the registry lock is released, and the tab appears only
    /// if the user accepts.
    ///
    /// On success the registry holds at least one tab. A tab factory failure
    /// is returned as-is; the tabs created so far are destroyed and the saved
    /// session is written back, so a later restore can try again.
    pub fn restore_and_handle_request(
        &self,
        pending_url: Option<&str>,
        private: bool,
    ) -> Result<()> {
        let (deferred, generation) = {
            let mut list = self.shared.list.lock();
            list.generation += 1;

            let mut consumed_blob = None;
            let restored = restore_locked(
                &self.shared,
                &mut list,
                pending_url,
                private,
                &mut consumed_blob,
            );
            let deferred = match restored {
                Ok(deferred) => deferred,
                Err(e) => {
                    revert_failed_restore(&self.shared, &mut list, consumed_blob);
                    return Err(e);
                }
            };
            list.transition_to(RegistryState::Populated)?;

            tracing::info!(
                tab_count = list.tabs.len(),
                private,
                awaiting_confirmation = deferred.is_some(),
                "Restored tabs"
            );
            (deferred, list.generation)
        };

        if let Some(url) = deferred {
            let request = ConfirmationRequest::local_file(url, private, generation, &self.shared);
            self.shared.prompt.confirm(request);
        }

        Ok(())
    }
}

/// Returns the local file URL still waiting for confirmation.
///
/// `consumed_blob` receives the saved session once it has been cleared from
/// the store.
fn restore_locked(
    shared: &Shared,
    list: &mut TabList,
    pending_url: Option<&str>,
    private: bool,
    consumed_blob: &mut Option<String>,
) -> Result<Option<String>> {
    let discarded = shared.clear(list);
    if discarded > 0 {
        tracing::debug!(tab_count = discarded, "Discarded tabs before restore");
    }

    if !private && restore_enabled(shared) {
        for url in take_saved_urls(shared, consumed_blob) {
            shared.append(list, Some(url.as_str()), private)?;
        }
    }

    let mut deferred = None;
    if let Some(url) = pending_url {
        if is_local_file_url(url) {
            deferred = Some(url.to_string());
        } else {
            shared.append(list, Some(url), private)?;
        }
    }

    if list.tabs.is_empty() {
        shared.append(list, None, private)?;
    }

    Ok(deferred)
}

/// Drop the tabs a failed restore created and put the saved session back.
fn revert_failed_restore(shared: &Shared, list: &mut TabList, saved_blob: Option<String>) {
    let discarded = shared.clear(list);
    tracing::warn!(tab_count = discarded, "Restore failed, discarding partial tab list");

    if let Some(blob) = saved_blob {
        if let Err(e) = shared.store.write_persisted_tab_blob(&blob) {
            tracing::warn!(error = %e, "Could not put back saved tabs");
        }
    }
}

fn restore_enabled(shared: &Shared) -> bool {
    shared
        .store
        .is_restore_lost_tabs_enabled()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not read restore setting, skipping saved tabs");
            false
        })
}

/// Read the saved tab list and clear it so it is never restored twice.
fn take_saved_urls(shared: &Shared, consumed_blob: &mut Option<String>) -> Vec<String> {
    let blob = shared.store.read_persisted_tab_blob().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Could not read saved tabs");
        String::new()
    });

    let urls = decode_urls(&blob);
    match shared.store.clear_persisted_tab_blob() {
        Ok(()) if !blob.is_empty() => *consumed_blob = Some(blob),
        Ok(()) => {}
        Err(e) => tracing::warn!(error = %e, "Could not clear saved tabs"),
    }

    tracing::debug!(tab_count = urls.len(), "Read saved tabs");
    urls
}
