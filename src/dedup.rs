//! Short-lived suppression of duplicate inbound events.
//!
//! The chat platform delivers events at least once, so the same event id can
//! reach the bot twice within a few milliseconds. [`DedupWindow`] admits an
//! event id once and schedules its release after a fixed delay; repeats within
//! that delay are rejected.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

use log::debug;
use tokio::{task::JoinHandle, time};

/// An admitted event id waiting for release.
struct DedupEntry {
    /// When the event id was admitted
    inserted_at: Instant,
    /// Task releasing the event id once the window elapses
    removal: JoinHandle<()>,
}

/// Window rejecting repeated event ids.
///
/// Admission is a single check-and-insert under one lock, so two concurrent
/// calls for the same id cannot both succeed. Each admitted id owns exactly
/// one removal task, spawned at insertion.
///
/// # Examples
///
/// ```no_run
/// let window = DedupWindow::new(Duration::from_secs(5));
/// assert!(window.admit("event-1"));
/// assert!(!window.admit("event-1"));
/// ```
pub struct DedupWindow {
    /// How long an admitted id stays blocked
    window: Duration,
    /// Admitted ids and their pending release
    entries: Arc<Mutex<HashMap<String, DedupEntry>>>,
}

impl DedupWindow {
    /// Creates an empty window blocking repeats for `window`.
    pub fn new(window: Duration) -> Self {
        DedupWindow {
            window,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns `true` the first time `event_id` is seen within the window.
    ///
    /// Must be called from within a Tokio runtime: the release of the id is a
    /// spawned task.
    pub fn admit(&self, event_id: &str) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        if entries.contains_key(event_id) {
            debug!("duplicate event {} rejected", event_id);
            return false;
        }

        let inserted_at = Instant::now();
        let removal = self.schedule_removal(event_id.to_owned());
        entries.insert(
            event_id.to_owned(),
            DedupEntry {
                inserted_at,
                removal,
            },
        );

        true
    }

    /// Spawns the task releasing `event_id` after the window.
    ///
    /// The task blocks on the lock held by [`DedupWindow::admit`] until the entry
    /// is inserted, so it always finds it.
    fn schedule_removal(&self, event_id: String) -> JoinHandle<()> {
        let entries = Arc::clone(&self.entries);
        let window = self.window;

        tokio::spawn(async move {
            time::sleep(window).await;

            let mut entries = entries.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(entry) = entries.remove(&event_id) {
                debug!(
                    "event {} released after {:?}",
                    event_id,
                    entry.inserted_at.elapsed()
                );
            }
        })
    }

    /// Number of ids currently blocked.
    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Aborts every pending release and forgets all admitted ids.
    pub fn shutdown(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        debug!("aborting {} pending dedup releases", entries.len());
        for (_, entry) in entries.drain() {
            entry.removal.abort();
        }
    }
}
