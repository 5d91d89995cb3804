//! Connectivity signal and the cosmetic sync-status indicator.
//!
//! No real network sync occurs; the indicator exists so the UI can show
//! offline/syncing/synced, and the online flag gates whether AI fetches are
//! attempted.

use serde::{Deserialize, Serialize};

/// The sync indicator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// No connectivity.
    Offline,
    /// Recently back online, simulated sync in progress.
    Syncing,
    /// Up to date.
    Synced,
}

/// Tracks the host's online/offline events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connectivity {
    online: bool,
    status: SyncStatus,
}

impl Connectivity {
    /// Start in the given connectivity state.
    #[must_use]
    pub const fn new(online: bool) -> Self {
        Self { online, status: if online { SyncStatus::Synced } else { SyncStatus::Offline } }
    }

    /// Whether the host is currently online.
    #[must_use]
    pub const fn is_online(&self) -> bool {
        self.online
    }

    /// Current indicator state.
    #[must_use]
    pub const fn status(&self) -> SyncStatus {
        self.status
    }

    /// Handle the host's online event. The indicator shows Syncing until
    /// the host reports the simulated sync settled.
    pub fn went_online(&mut self) {
        self.online = true;
        self.status = SyncStatus::Syncing;
    }

    /// Handle the simulated sync finishing.
    pub fn sync_settled(&mut self) {
        if self.online {
            self.status = SyncStatus::Synced;
        }
    }

    /// Handle the host's offline event.
    pub fn went_offline(&mut self) {
        self.online = false;
        self.status = SyncStatus::Offline;
    }
}

impl Default for Connectivity {
    fn default() -> Self {
        Self::new(true)
    }
}
