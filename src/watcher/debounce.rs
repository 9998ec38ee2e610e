//! Per-path debouncing
//!
//! Every scheduled path owns one sleeping timer task. A new event for the
//! same path aborts that task and starts a fresh one, so a burst collapses
//! into a single callback `window` after its last event. Timers live in one
//! mutex-guarded map. Settled changes go through a channel to a single
//! blocking worker, which keeps callback invocations serialized.

use super::events::FileChange;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::{Mutex as TokioMutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

struct Timer {
    generation: u64,
    handle: JoinHandle<()>,
}

struct State {
    timers: HashMap<PathBuf, Timer>,
    next_generation: u64,
    /// `None` once stopped
    fired: Option<mpsc::UnboundedSender<FileChange>>,
}

struct Shared {
    state: TokioMutex<State>,
    stopped: AtomicBool,
    window: Duration,
    runtime: Handle,
}

impl Shared {
    /// Hands `change` to the worker unless a newer event replaced its timer
    async fn fire(&self, change: FileChange, generation: u64) {
        let mut state = self.state.lock().await;
        let current = state
            .timers
            .get(&change.path)
            .is_some_and(|timer| timer.generation == generation);
        if !current {
            return;
        }
        state.timers.remove(&change.path);
        if let Some(fired) = &state.fired {
            let _ = fired.send(change);
        }
    }
}

/// Cheap handle for feeding changes into a [`Debouncer`]
#[derive(Clone)]
pub struct DebounceScheduler {
    shared: Arc<Shared>,
}

impl DebounceScheduler {
    pub async fn schedule(&self, change: FileChange) {
        let mut state = self.shared.state.lock().await;
        if state.fired.is_none() {
            return;
        }
        state.next_generation += 1;
        let generation = state.next_generation;

        let path = change.path.clone();
        let shared = Arc::clone(&self.shared);
        let handle = self.shared.runtime.spawn(async move {
            tokio::time::sleep(shared.window).await;
            shared.fire(change, generation).await;
        });

        if let Some(previous) = state.timers.insert(path, Timer { generation, handle }) {
            previous.handle.abort();
        }
    }

    pub async fn pending_count(&self) -> usize {
        self.shared.state.lock().await.timers.len()
    }
}

pub struct Debouncer {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Debouncer whose timers run on `runtime`
    ///
    /// `callback` runs on a blocking worker thread, one change at a time.
    pub fn new<F>(runtime: Handle, window: Duration, mut callback: F) -> Self
    where
        F: FnMut(FileChange) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<FileChange>();
        let shared = Arc::new(Shared {
            state: TokioMutex::new(State {
                timers: HashMap::new(),
                next_generation: 0,
                fired: Some(tx),
            }),
            stopped: AtomicBool::new(false),
            window,
            runtime: runtime.clone(),
        });

        let worker_shared = Arc::clone(&shared);
        let worker = runtime.spawn_blocking(move || {
            while let Some(change) = rx.blocking_recv() {
                if worker_shared.stopped.load(Ordering::Acquire) {
                    break;
                }
                callback(change);
            }
            debug!("Debounce worker finished");
        });

        Self {
            shared,
            worker: Some(worker),
        }
    }

    pub fn scheduler(&self) -> DebounceScheduler {
        DebounceScheduler {
            shared: Arc::clone(&self.shared),
        }
    }

    pub async fn schedule(&self, change: FileChange) {
        self.scheduler().schedule(change).await;
    }

    pub async fn pending_count(&self) -> usize {
        self.scheduler().pending_count().await
    }

    /// Aborts pending timers and waits for the worker; false if it outlived `limit`
    ///
    /// A callback already running is allowed to complete.
    pub async fn stop(&mut self, limit: Duration) -> bool {
        self.shared.stopped.store(true, Ordering::Release);
        {
            let mut state = self.shared.state.lock().await;
            let dropped = state.timers.len();
            for (_, timer) in state.timers.drain() {
                timer.handle.abort();
            }
            // Closing the channel ends the worker loop
            state.fired = None;
            if dropped > 0 {
                debug!("Cancelled {} pending changes", dropped);
            }
        }

        let Some(worker) = self.worker.take() else {
            return true;
        };
        match tokio::time::timeout(limit, worker).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                warn!("Debounce worker failed: {}", e);
                true
            }
            Err(_) => {
                warn!("Debounce worker did not stop within {:?}, detaching", limit);
                false
            }
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if self.worker.is_none() {
            return;
        }
        self.shared.stopped.store(true, Ordering::Release);
        // Best effort without an executor; the worker is detached either way
        if let Ok(mut state) = self.shared.state.try_lock() {
            for (_, timer) in state.timers.drain() {
                timer.handle.abort();
            }
            state.fired = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watcher::ChangeKind;
    use std::sync::Mutex;
    use tokio::time::sleep;

    fn collecting(window: Duration) -> (Debouncer, Arc<Mutex<Vec<FileChange>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let debouncer = Debouncer::new(Handle::current(), window, move |change| {
            sink.lock().unwrap().push(change);
        });
        (debouncer, seen)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_burst_for_one_path_fires_once() {
        let (mut debouncer, seen) = collecting(Duration::from_millis(100));
        for _ in 0..5 {
            debouncer
                .schedule(FileChange::new("/p/a.py", ChangeKind::Modified))
                .await;
            sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(debouncer.pending_count().await, 1);

        sleep(Duration::from_millis(400)).await;
        assert_eq!(
            *seen.lock().unwrap(),
            vec![FileChange::new("/p/a.py", ChangeKind::Modified)]
        );
        assert_eq!(debouncer.pending_count().await, 0);
        assert!(debouncer.stop(Duration::from_secs(5)).await);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_new_event_restarts_the_window() {
        let (mut debouncer, seen) = collecting(Duration::from_millis(150));
        debouncer
            .schedule(FileChange::new("/p/a.py", ChangeKind::Modified))
            .await;
        sleep(Duration::from_millis(100)).await;
        debouncer
            .schedule(FileChange::new("/p/a.py", ChangeKind::Modified))
            .await;

        // Past the first deadline, short of the second
        sleep(Duration::from_millis(100)).await;
        assert!(seen.lock().unwrap().is_empty());

        sleep(Duration::from_millis(300)).await;
        assert_eq!(seen.lock().unwrap().len(), 1);
        debouncer.stop(Duration::from_secs(5)).await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_latest_kind_wins() {
        let (mut debouncer, seen) = collecting(Duration::from_millis(80));
        debouncer
            .schedule(FileChange::new("/p/a.py", ChangeKind::Modified))
            .await;
        debouncer
            .schedule(FileChange::new("/p/a.py", ChangeKind::Deleted))
            .await;

        sleep(Duration::from_millis(350)).await;
        {
            let seen = seen.lock().unwrap();
            assert_eq!(seen.len(), 1);
            assert_eq!(seen[0].kind, ChangeKind::Deleted);
        }
        debouncer.stop(Duration::from_secs(5)).await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_distinct_paths_fire_separately() {
        let (mut debouncer, seen) = collecting(Duration::from_millis(50));
        debouncer
            .schedule(FileChange::new("/p/a.py", ChangeKind::Modified))
            .await;
        debouncer
            .schedule(FileChange::new("/p/b.py", ChangeKind::Created))
            .await;
        assert_eq!(debouncer.pending_count().await, 2);

        sleep(Duration::from_millis(300)).await;
        let mut paths: Vec<_> = seen.lock().unwrap().iter().map(|c| c.path.clone()).collect();
        paths.sort();
        assert_eq!(paths, vec![PathBuf::from("/p/a.py"), PathBuf::from("/p/b.py")]);
        debouncer.stop(Duration::from_secs(5)).await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_stop_cancels_pending() {
        let (mut debouncer, seen) = collecting(Duration::from_millis(200));
        debouncer
            .schedule(FileChange::new("/p/a.py", ChangeKind::Modified))
            .await;
        assert!(debouncer.stop(Duration::from_secs(5)).await);
        assert_eq!(debouncer.pending_count().await, 0);

        // Ignored once stopped
        debouncer
            .schedule(FileChange::new("/p/b.py", ChangeKind::Modified))
            .await;
        assert_eq!(debouncer.pending_count().await, 0);

        sleep(Duration::from_millis(400)).await;
        assert!(seen.lock().unwrap().is_empty());
    }
}
