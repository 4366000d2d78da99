//! Session persistence seam
//!
//! The registry reads and clears the saved tab list through [`SessionStore`].
//! The shell's settings database is the production implementation.

use lumen_storage::Database;

use crate::Result;

/// Settings key holding the persisted tab-list blob
pub const SAVED_TABS_KEY: &str = "saved_tabs";
/// Settings key for the "restore lost tabs" feature flag
pub const RESTORE_LOST_TABS_KEY: &str = "restore_lost_tabs";

pub trait SessionStore: Send + Sync {
    fn read_persisted_tab_blob(&self) -> Result<String>;

    fn clear_persisted_tab_blob(&self) -> Result<()>;

    fn write_persisted_tab_blob(&self, blob: &str) -> Result<()>;

    fn is_restore_lost_tabs_enabled(&self) -> Result<bool>;
}

impl SessionStore for Database {
    fn read_persisted_tab_blob(&self) -> Result<String> {
        Ok(self.get_setting(SAVED_TABS_KEY)?.unwrap_or_default())
    }

    fn clear_persisted_tab_blob(&self) -> Result<()> {
        Ok(self.remove_setting(SAVED_TABS_KEY)?)
    }

    fn write_persisted_tab_blob(&self, blob: &str) -> Result<()> {
        Ok(self.set_setting(SAVED_TABS_KEY, blob)?)
    }

    /// Unset means enabled. Unparseable values count as disabled.
    fn is_restore_lost_tabs_enabled(&self) -> Result<bool> {
        let Some(value) = self.get_setting(RESTORE_LOST_TABS_KEY)? else {
            return Ok(true);
        };

        match serde_json::from_str::<bool>(&value) {
            Ok(enabled) => Ok(enabled),
            Err(e) => {
                tracing::warn!(value = %value, error = %e, "Invalid restore_lost_tabs setting");
                Ok(false)
            }
        }
    }
}
