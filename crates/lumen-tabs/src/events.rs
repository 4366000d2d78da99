//! Registry notifications
//!
//! Broadcast to any number of subscribers. A slow subscriber lags and loses
//! old events; it never blocks the registry.

use serde::{Deserialize, Serialize};

use crate::tab::TabId;

pub(crate) const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegistryEvent {
    TabAdded { id: TabId, position: usize },
    TabRemoved { id: TabId },
    /// `None` means no tab is current
    SelectionChanged { id: Option<TabId> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let id = TabId::new();
        let json = serde_json::to_value(RegistryEvent::TabAdded { id, position: 2 }).unwrap();
        assert_eq!(json["type"], "tab_added");
        assert_eq!(json["position"], 2);
        assert_eq!(json["id"], id.to_string());

        let json = serde_json::to_value(RegistryEvent::SelectionChanged { id: None }).unwrap();
        assert_eq!(json["type"], "selection_changed");
        assert!(json["id"].is_null());
    }
}
