//! Replayable live snapshot source
//!
//! Holds the latest snapshot and pushes every new one to all live
//! subscribers. New subscribers immediately receive the latest snapshot.
//! Snapshots and failures are stamped while the source lock is held, so each
//! subscriber sees stamps in increasing order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::stream::{self, StreamExt};
use shared::{SharedError, SourceKind, Stamped};
use tokio::sync::mpsc;
use tracing::debug;

use crate::traits::SourceStream;

#[derive(Debug, Clone, PartialEq)]
enum Lifecycle {
    Open,
    Completed,
    Failed(Stamped<SharedError>),
}

struct SourceInner<T> {
    latest: Option<Stamped<T>>,
    subscribers: Vec<mpsc::UnboundedSender<Stamped<Result<T, SharedError>>>>,
    lifecycle: Lifecycle,
}

/// In-memory snapshot source shared by its publisher and its subscribers
pub struct SnapshotSource<T> {
    kind: SourceKind,
    inner: Arc<Mutex<SourceInner<T>>>,
}

impl<T> Clone for SnapshotSource<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> SnapshotSource<T>
where
    T: Clone + Send + 'static,
{
    /// Create a source with no snapshot yet
    pub fn new(kind: SourceKind) -> Self {
        Self {
            kind,
            inner: Arc::new(Mutex::new(SourceInner {
                latest: None,
                subscribers: Vec::new(),
                lifecycle: Lifecycle::Open,
            })),
        }
    }

    /// Create a source that replays `value` to its first subscribers
    pub fn with_initial(kind: SourceKind, value: T) -> Self {
        let source = Self::new(kind);
        source.lock().latest = Some(Stamped::next(value));
        source
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    fn lock(&self) -> MutexGuard<'_, SourceInner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn latest(&self) -> Option<T> {
        self.lock().latest.as_ref().map(|latest| latest.value.clone())
    }

    /// Subscribe to the live sequence, starting with the latest snapshot if any
    pub fn subscribe(&self) -> SourceStream<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.lock();

        match inner.lifecycle.clone() {
            Lifecycle::Failed(error) => {
                let _ = tx.send(error.map(Err));
            }
            lifecycle => {
                // Replays keep their original stamp
                if let Some(latest) = inner.latest.clone() {
                    let _ = tx.send(latest.map(Ok));
                }
                // A completed source replays and then ends
                if lifecycle == Lifecycle::Open {
                    inner.subscribers.push(tx);
                }
            }
        }

        debug!(source = %self.kind, subscribers = inner.subscribers.len(), "New subscription");
        drop(inner);

        stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|item| (item, rx)) }).boxed()
    }

    /// Publish a new snapshot; returns the number of live subscribers it reached
    pub fn publish(&self, value: T) -> usize {
        let mut inner = self.lock();
        Self::publish_locked(self.kind, &mut inner, value)
    }

    /// Derive the next snapshot from the latest one and publish it atomically
    pub fn update<F>(&self, next: F) -> usize
    where
        F: FnOnce(Option<&T>) -> T,
    {
        let mut inner = self.lock();
        let value = next(inner.latest.as_ref().map(|latest| &latest.value));
        Self::publish_locked(self.kind, &mut inner, value)
    }

    fn publish_locked(kind: SourceKind, inner: &mut SourceInner<T>, value: T) -> usize {
        if inner.lifecycle != Lifecycle::Open {
            debug!(source = %kind, "Ignoring snapshot published after termination");
            return 0;
        }

        let stamped = Stamped::next(value);
        // Dropped subscriptions are pruned here
        inner
            .subscribers
            .retain(|tx| tx.send(stamped.clone().map(Ok)).is_ok());
        inner.latest = Some(stamped);
        inner.subscribers.len()
    }

    /// Terminate every subscription with an error
    pub fn fail(&self, message: impl Into<String>) {
        let mut inner = self.lock();
        if inner.lifecycle != Lifecycle::Open {
            return;
        }

        let error = Stamped::next(SharedError::source_failed(self.kind, message));
        for tx in inner.subscribers.drain(..) {
            let _ = tx.send(error.clone().map(Err));
        }
        debug!(source = %self.kind, error = %error.value, "Source failed");
        inner.lifecycle = Lifecycle::Failed(error);
    }

    /// End every subscription normally
    pub fn complete(&self) {
        let mut inner = self.lock();
        if inner.lifecycle != Lifecycle::Open {
            return;
        }

        inner.subscribers.clear();
        inner.lifecycle = Lifecycle::Completed;
        debug!(source = %self.kind, "Source completed");
    }

    /// Number of subscriptions whose consumer is still alive
    pub fn subscriber_count(&self) -> usize {
        let mut inner = self.lock();
        inner.subscribers.retain(|tx| !tx.is_closed());
        inner.subscribers.len()
    }
}
