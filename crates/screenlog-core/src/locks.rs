use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use screenlog_models::ContentKey;

/// Which toggle operation holds (or wants) an item's slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleKind {
    Log,
    Watchlist,
}

#[derive(Debug, Default, Clone, Copy)]
struct KindFlags {
    log: bool,
    watchlist: bool,
}

impl KindFlags {
    fn get(&self, kind: ToggleKind) -> bool {
        match kind {
            ToggleKind::Log => self.log,
            ToggleKind::Watchlist => self.watchlist,
        }
    }

    fn set(&mut self, kind: ToggleKind, held: bool) {
        match kind {
            ToggleKind::Log => self.log = held,
            ToggleKind::Watchlist => self.watchlist = held,
        }
    }

    fn any(&self) -> bool {
        self.log || self.watchlist
    }
}

/// Per-key toggle slots shared by every controller in a session.
///
/// Acquiring either kind requires both kinds free for that key: watched and
/// watchlist toggles serialize against each other per item, while distinct
/// items never contend. Release happens on guard drop so every exit path,
/// including errors, frees the slot.
#[derive(Debug, Default)]
pub struct ToggleLocks {
    entries: Mutex<HashMap<ContentKey, KindFlags>>,
}

impl ToggleLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to start a toggle. Returns `None` while any toggle is in flight
    /// for this key; callers drop the request rather than queue it.
    pub fn acquire(&self, key: &ContentKey, kind: ToggleKind) -> Option<ToggleGuard<'_>> {
        let mut entries = self.lock_entries();
        let flags = entries.entry(key.clone()).or_default();
        if flags.any() {
            return None;
        }
        flags.set(kind, true);
        Some(ToggleGuard {
            locks: self,
            key: key.clone(),
            kind,
        })
    }

    pub fn is_busy(&self, key: &ContentKey, kind: ToggleKind) -> bool {
        self.lock_entries()
            .get(key)
            .map(|flags| flags.get(kind))
            .unwrap_or(false)
    }

    fn release(&self, key: &ContentKey, kind: ToggleKind) {
        let mut entries = self.lock_entries();
        if let Some(flags) = entries.get_mut(key) {
            flags.set(kind, false);
            if !flags.any() {
                // the table only holds keys with a toggle in flight
                entries.remove(key);
            }
        }
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<ContentKey, KindFlags>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds one kind's slot for one key until dropped.
#[derive(Debug)]
pub struct ToggleGuard<'a> {
    locks: &'a ToggleLocks,
    key: ContentKey,
    kind: ToggleKind,
}

impl Drop for ToggleGuard<'_> {
    fn drop(&mut self) {
        self.locks.release(&self.key, self.kind);
    }
}
