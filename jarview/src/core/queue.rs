//! Files waiting to be opened in the window.
//!
//! Producers on any thread append paths; whoever holds a window reference
//! drains them. Appends and the take-all step share one lock so no path is
//! lost, and deliveries are serialized so no path is handed out twice and
//! insertion order is kept across concurrent drains.

use log::debug;
use parking_lot::{Mutex, ReentrantMutex};
use std::mem;
use std::path::PathBuf;

/// Ordered, thread-safe queue of pending file paths.
///
/// Duplicates are kept. A consumer passed to [`drain_into`] may call back
/// into the queue (enqueue or drain again) without deadlocking.
///
/// [`drain_into`]: PendingFileQueue::drain_into
#[derive(Debug, Default)]
pub struct PendingFileQueue {
    items: Mutex<Vec<PathBuf>>,
    delivery: ReentrantMutex<()>,
}

impl PendingFileQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a path. `None` and empty paths are ignored.
    pub fn enqueue(&self, path: Option<PathBuf>) {
        let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
            return;
        };
        debug!("Queued {}", path.display());
        self.items.lock().push(path);
    }

    /// Hands every queued path to `consumer` in insertion order and leaves
    /// the queue empty.
    ///
    /// Paths enqueued while the consumer runs are delivered by this same
    /// call. Returns how many paths were delivered; an empty queue returns 0
    /// without invoking the consumer.
    pub fn drain_into<F>(&self, mut consumer: F) -> usize
    where
        F: FnMut(PathBuf),
    {
        let _delivering = self.delivery.lock();
        let mut delivered = 0;

        loop {
            let batch = mem::take(&mut *self.items.lock());
            if batch.is_empty() {
                break;
            }
            delivered += batch.len();
            for path in batch {
                consumer(path);
            }
        }

        if delivered > 0 {
            debug!("Drained {delivered} pending file(s)");
        }
        delivered
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}
