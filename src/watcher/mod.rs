//! File watcher for incremental re-indexing
//!
//! A session owns a small tokio runtime with two kinds of work on it:
//! 1. **Event delivery** → an async task receives notify events, filters them, feeds the debouncer
//! 2. **Debounce worker** → a blocking task fires settled changes into `Indexer::update`
//!
//! The indexer is moved into the debounce callback, so every index mutation
//! happens on the worker, one at a time.

pub mod debounce;
pub mod events;
pub mod filtering;

use crate::error::Result;
use crate::indexer::{Indexer, UpdateOutcome};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

pub use debounce::{DebounceScheduler, Debouncer};
pub use events::{ChangeKind, FileChange, classify_event};
pub use filtering::WatchFilter;

/// Upper bound on waiting for a background thread during shutdown
pub const STOP_TIMEOUT: Duration = Duration::from_secs(5);

pub struct WatchSession {
    root: PathBuf,
    runtime: Option<Runtime>,
    watcher: Option<RecommendedWatcher>,
    event_task: Option<JoinHandle<()>>,
    debouncer: Debouncer,
}

impl WatchSession {
    /// Starts watching the indexer's root
    ///
    /// `on_update` sees every settled change together with what the indexer
    /// did with it. Must be called outside of an async runtime.
    pub fn start<F>(mut indexer: Indexer, mut on_update: F) -> Result<Self>
    where
        F: FnMut(&FileChange, &Result<UpdateOutcome>) + Send + 'static,
    {
        let root = indexer.root().to_path_buf();
        let window = Duration::from_millis(indexer.config().debounce_ms);
        let filter = WatchFilter::new(
            &root,
            indexer.filter().clone(),
            indexer.config().languages.clone(),
        )?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("codemap-watch")
            .enable_all()
            .build()?;

        let debouncer = Debouncer::new(
            runtime.handle().clone(),
            window,
            move |change: FileChange| {
                let result = indexer.update(&change.path);
                if let Err(e) = &result {
                    warn!("Failed to update {}: {}", change.path.display(), e);
                }
                on_update(&change, &result);
            },
        );

        let (tx, mut rx) = mpsc::unbounded_channel::<notify::Result<notify::Event>>();
        let mut watcher = notify::recommended_watcher(move |res| {
            if let Err(e) = tx.send(res) {
                error!("Failed to send file event: {}", e);
            }
        })?;
        watcher.watch(&root, RecursiveMode::Recursive)?;

        let scheduler = debouncer.scheduler();
        let event_task = runtime.spawn(async move {
            while let Some(result) = rx.recv().await {
                match result {
                    Ok(event) => {
                        for change in classify_event(&event) {
                            if filter.should_process(&change.path) {
                                debug!("Queueing {:?} for {}", change.kind, change.path.display());
                                scheduler.schedule(change).await;
                            }
                        }
                    }
                    Err(e) => warn!("File watcher error: {}", e),
                }
            }
        });

        info!(
            "Watching {} (debounce {}ms)",
            root.display(),
            window.as_millis()
        );

        Ok(Self {
            root,
            runtime: Some(runtime),
            watcher: Some(watcher),
            event_task: Some(event_task),
            debouncer,
        })
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    pub fn pending_count(&self) -> usize {
        match &self.runtime {
            Some(runtime) => runtime.block_on(self.debouncer.pending_count()),
            None => 0,
        }
    }

    /// Stops event delivery, cancels pending changes, and waits for both tasks
    ///
    /// Returns false when a task had to be detached after [`STOP_TIMEOUT`].
    pub fn stop(mut self) -> bool {
        let Some(runtime) = self.runtime.take() else {
            return true;
        };
        // Dropping the watcher closes the channel, which ends event delivery
        drop(self.watcher.take());

        let events_done = match self.event_task.take() {
            Some(mut task) => runtime.block_on(async {
                match tokio::time::timeout(STOP_TIMEOUT, &mut task).await {
                    Ok(_) => true,
                    Err(_) => {
                        warn!("Event delivery did not stop within {:?}, aborting", STOP_TIMEOUT);
                        task.abort();
                        false
                    }
                }
            }),
            None => true,
        };
        let worker_done = runtime.block_on(self.debouncer.stop(STOP_TIMEOUT));
        runtime.shutdown_background();

        info!("Stopped watching {}", self.root.display());
        events_done && worker_done
    }
}

impl Drop for WatchSession {
    fn drop(&mut self) {
        // Not stopped explicitly; tear down without waiting
        if let Some(runtime) = self.runtime.take() {
            drop(self.watcher.take());
            runtime.shutdown_background();
        }
    }
}
