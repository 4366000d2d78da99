//! Browser shell state container
//!
//! Owns the settings database and the tab registry, and maps process
//! lifecycle callbacks onto registry operations.

use parking_lot::RwLock;
use std::sync::Arc;

use lumen_storage::Database;
use lumen_tabs::{
    ConfirmationPrompt, SessionStore, TabFactory, TabRegistry, RESTORE_LOST_TABS_KEY,
};

use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

pub struct Browser {
    config: Config,
    db: Database,
    registry: TabRegistry,
    /// Privacy mode of the running session, `None` until started
    private: RwLock<Option<bool>>,
}

impl Browser {
    /// Open the settings database from `config` and build an empty registry
    pub fn new(
        config: Config,
        factory: Arc<dyn TabFactory>,
        prompt: Arc<dyn ConfirmationPrompt>,
    ) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Self::with_database(config, db, factory, prompt)
    }

    pub fn with_database(
        config: Config,
        db: Database,
        factory: Arc<dyn TabFactory>,
        prompt: Arc<dyn ConfirmationPrompt>,
    ) -> Result<Self> {
        if db.get_setting(RESTORE_LOST_TABS_KEY)?.is_none() {
            db.set_setting(
                RESTORE_LOST_TABS_KEY,
                &serde_json::to_string(&config.restore_lost_tabs)?,
            )?;
        }

        let registry = TabRegistry::new(factory, Arc::new(db.clone()), prompt);

        Ok(Self {
            config,
            db,
            registry,
            private: RwLock::new(None),
        })
    }

    /// Restore the previous session and open `pending_url` if one was passed in
    pub fn start(&self, pending_url: Option<&str>, private: bool) -> Result<()> {
        self.registry.restore_and_handle_request(pending_url, private)?;
        *self.private.write() = Some(private);

        tracing::info!(tab_count = self.registry.size(), private, "Browser started");

        Ok(())
    }

    /// Save open tabs before the process may be killed.
    ///
    /// Private sessions and a disabled restore setting save nothing. Returns
    /// whether the tab list was written.
    pub fn on_background(&self) -> Result<bool> {
        let private = (*self.private.read()).ok_or(CoreError::NotStarted)?;
        if private || !self.db.is_restore_lost_tabs_enabled()? {
            return Ok(false);
        }

        self.registry.persist()?;
        Ok(true)
    }

    pub fn on_low_memory(&self) {
        tracing::info!(tab_count = self.registry.size(), "Releasing tab memory");
        self.registry.release_memory();
    }

    pub fn on_connectivity_changed(&self, connected: bool) {
        tracing::debug!(connected, "Connectivity changed");
        self.registry.set_network_available(connected);
    }

    pub fn restore_lost_tabs_enabled(&self) -> Result<bool> {
        Ok(self.db.is_restore_lost_tabs_enabled()?)
    }

    /// Store the setting and let every tab pick up the change
    pub fn set_restore_lost_tabs(&self, enabled: bool) -> Result<()> {
        self.db.set_setting(RESTORE_LOST_TABS_KEY, &serde_json::to_string(&enabled)?)?;
        self.registry.reapply_configuration();

        tracing::info!(enabled, "Updated restore setting");
        Ok(())
    }

    /// Save what should survive, then destroy every tab
    pub fn close(&self) -> Result<()> {
        let saved = match self.on_background() {
            Ok(saved) => saved,
            Err(CoreError::NotStarted) => false,
            Err(e) => return Err(e),
        };

        self.registry.shutdown();
        *self.private.write() = None;

        tracing::info!(saved, "Browser closed");
        Ok(())
    }

    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
