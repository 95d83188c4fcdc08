//! Fire-and-deliver request primitive shared by both controllers.
//!
//! [`AsyncRequest::issue`] spawns the request on the tokio runtime and returns at
//! once. The outcome comes back later as a [`Completion`] on a channel owned by
//! the same `AsyncRequest`, so the owner applies every result on its own task
//! and its state transitions never interleave with each other.

use std::future::Future;

use tokio::sync::mpsc;
use tracing::debug;

use crate::error::RequestError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

#[derive(Debug)]
pub struct Completion<K, T> {
    pub id: RequestId,
    /// Caller-supplied tag recorded at issue time.
    pub tag: K,
    pub outcome: Result<T, RequestError>,
}

pub struct AsyncRequest<K, T> {
    next_id: u64,
    tx: mpsc::UnboundedSender<Completion<K, T>>,
    rx: mpsc::UnboundedReceiver<Completion<K, T>>,
}

impl<K, T> AsyncRequest<K, T>
where
    K: Send + 'static,
    T: Send + 'static,
{
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            next_id: 1,
            tx,
            rx,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn issue<F>(&mut self, tag: K, request: F) -> RequestId
    where
        F: Future<Output = Result<T, RequestError>> + Send + 'static,
    {
        let id = RequestId(self.next_id);
        self.next_id += 1;

        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = request.await;
            if tx.send(Completion { id, tag, outcome }).is_err() {
                debug!(request_id = id.0, "request owner dropped before completion");
            }
        });
        id
    }

    /// Waits for the next delivered completion. Never resolves when nothing is
    /// outstanding, which keeps it usable as a `select!` branch. Cancel safe.
    pub async fn next_completion(&mut self) -> Completion<K, T> {
        match self.rx.recv().await {
            Some(completion) => completion,
            // Unreachable while `self.tx` is alive.
            None => std::future::pending().await,
        }
    }

    pub fn try_completion(&mut self) -> Option<Completion<K, T>> {
        self.rx.try_recv().ok()
    }
}

impl<K, T> Default for AsyncRequest<K, T>
where
    K: Send + 'static,
    T: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
