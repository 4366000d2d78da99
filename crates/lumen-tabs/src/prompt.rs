//! Confirmation prompts
//!
//! Opening a local file from an external request needs the user's consent.
//! The registry hands a [`ConfirmationRequest`] to the prompt surface and
//! moves on; the tab is created later, if and when the request is accepted.

use std::fmt;
use std::sync::{Arc, Weak};
use tokio::sync::mpsc;

use crate::registry::Shared;
use crate::tab::TabHandle;
use crate::Result;

const LOCAL_FILE_TITLE: &str = "Warning";
const LOCAL_FILE_MESSAGE: &str =
    "Opening local files is blocked by default. Only open files you trust.";

/// Shows a confirmation to the user.
///
/// Never called with the registry lock held, so answering synchronously from
/// inside `confirm` is allowed.
pub trait ConfirmationPrompt: Send + Sync {
    fn confirm(&self, request: ConfirmationRequest);
}

impl<F> ConfirmationPrompt for F
where
    F: Fn(ConfirmationRequest) + Send + Sync,
{
    fn confirm(&self, request: ConfirmationRequest) {
        self(request)
    }
}

/// A pending question for the user. Dropping it unanswered declines.
pub struct ConfirmationRequest {
    title: String,
    message: String,
    url: String,
    private: bool,
    generation: u64,
    registry: Weak<Shared>,
}

impl ConfirmationRequest {
    pub(crate) fn local_file(
        url: String,
        private: bool,
        generation: u64,
        registry: &Arc<Shared>,
    ) -> Self {
        Self {
            title: LOCAL_FILE_TITLE.to_string(),
            message: LOCAL_FILE_MESSAGE.to_string(),
            url,
            private,
            generation,
            registry: Arc::downgrade(registry),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The URL that will be opened on accept
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Open the tab.
    ///
    /// Returns `Ok(None)` when the registry is gone, has been shut down, or
    /// has been restored again since the request was made.
    pub fn accept(self) -> Result<Option<TabHandle>> {
        let Some(shared) = self.registry.upgrade() else {
            tracing::debug!(url = %self.url, "Registry dropped before confirmation");
            return Ok(None);
        };

        let mut list = shared.list.lock();
        if !list.state.accepts_new_tabs() {
            tracing::debug!(url = %self.url, "Registry shut down before confirmation");
            return Ok(None);
        }
        if list.generation != self.generation {
            tracing::debug!(url = %self.url, "Registry restored again before confirmation");
            return Ok(None);
        }

        let tab = shared.append(&mut list, Some(self.url.as_str()), self.private)?;
        tracing::info!(tab_id = %tab.id(), url = %self.url, "Opened confirmed local file");
        Ok(Some(tab))
    }

    pub fn decline(self) {
        tracing::info!(url = %self.url, "Local file open declined");
    }
}

impl fmt::Debug for ConfirmationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmationRequest")
            .field("title", &self.title)
            .field("url", &self.url)
            .field("private", &self.private)
            .finish_non_exhaustive()
    }
}

/// Forwards requests to an async UI task over a channel.
pub struct ChannelPrompt {
    tx: mpsc::UnboundedSender<ConfirmationRequest>,
}

impl ChannelPrompt {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ConfirmationRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ConfirmationPrompt for ChannelPrompt {
    fn confirm(&self, request: ConfirmationRequest) {
        if let Err(mpsc::error::SendError(request)) = self.tx.send(request) {
            tracing::warn!(url = %request.url, "No prompt listener, declining");
        }
    }
}
