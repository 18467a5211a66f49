use std::path::Path;
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::io::store::ITEMS_FILE;

/// Events sent from the store watcher to the panel's event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// items.json was created, rewritten, or removed by someone
    Changed,
}

/// Watches the data directory for writes to items.json.
pub struct StoreWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<StoreEvent>,
}

impl StoreWatcher {
    /// Start watching `data_dir`. Call `poll()` once per loop tick.
    pub fn start(data_dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let Ok(event) = result else {
                    return;
                };
                if !matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                ) {
                    return;
                }
                // Atomic saves land as a rename onto items.json; temp files are noise.
                let touches_items = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().and_then(|n| n.to_str()) == Some(ITEMS_FILE));
                if touches_items {
                    let _ = tx.send(StoreEvent::Changed);
                }
            },
            Config::default(),
        )?;

        watcher.watch(data_dir, RecursiveMode::NonRecursive)?;
        Ok(StoreWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking: true if any change arrived since the last poll.
    /// Bursts of events collapse into one reload.
    pub fn poll(&self) -> bool {
        let mut changed = false;
        while let Ok(StoreEvent::Changed) = self.rx.try_recv() {
            changed = true;
        }
        changed
    }
}
