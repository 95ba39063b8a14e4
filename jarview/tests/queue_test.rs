//! Tests for the pending-file queue under concurrent producers.

use jarview::PendingFileQueue;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

const PRODUCERS: usize = 8;
const PER_PRODUCER: usize = 250;

fn path(producer: usize, i: usize) -> PathBuf {
    PathBuf::from(format!("/p{producer}/{i}.class"))
}

fn spawn_producers(queue: &Arc<PendingFileQueue>) -> Vec<thread::JoinHandle<()>> {
    let barrier = Arc::new(Barrier::new(PRODUCERS));
    (0..PRODUCERS)
        .map(|producer| {
            let queue = queue.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_PRODUCER {
                    queue.enqueue(Some(path(producer, i)));
                }
            })
        })
        .collect()
}

fn assert_per_producer_order(seen: &[PathBuf]) {
    for producer in 0..PRODUCERS {
        let prefix = format!("/p{producer}/");
        let own: Vec<&PathBuf> = seen
            .iter()
            .filter(|p| p.to_string_lossy().starts_with(&prefix))
            .collect();
        let expected: Vec<PathBuf> = (0..PER_PRODUCER).map(|i| path(producer, i)).collect();
        assert_eq!(own, expected.iter().collect::<Vec<_>>());
    }
}

#[test]
fn concurrent_enqueues_then_single_drain() {
    let queue = Arc::new(PendingFileQueue::new());
    for h in spawn_producers(&queue) {
        h.join().unwrap();
    }

    let mut seen = Vec::new();
    let delivered = queue.drain_into(|p| seen.push(p));

    assert_eq!(delivered, PRODUCERS * PER_PRODUCER);
    let unique: HashSet<_> = seen.iter().collect();
    assert_eq!(unique.len(), PRODUCERS * PER_PRODUCER);
    assert_per_producer_order(&seen);
    assert!(queue.is_empty());
}

#[test]
fn drains_racing_enqueues_lose_and_duplicate_nothing() {
    let queue = Arc::new(PendingFileQueue::new());
    let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let done = Arc::new(AtomicBool::new(false));

    let drainers: Vec<_> = (0..2)
        .map(|_| {
            let queue = queue.clone();
            let seen = seen.clone();
            let done = done.clone();
            thread::spawn(move || {
                while !done.load(Ordering::SeqCst) {
                    queue.drain_into(|p| seen.lock().push(p));
                    thread::yield_now();
                }
            })
        })
        .collect();

    for h in spawn_producers(&queue) {
        h.join().unwrap();
    }
    done.store(true, Ordering::SeqCst);
    for h in drainers {
        h.join().unwrap();
    }
    queue.drain_into(|p| seen.lock().push(p));

    let seen = seen.lock();
    assert_eq!(seen.len(), PRODUCERS * PER_PRODUCER);
    let unique: HashSet<_> = seen.iter().collect();
    assert_eq!(unique.len(), seen.len());
    assert_per_producer_order(&seen);
}
