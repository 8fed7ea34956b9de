//! Screen coordinators
//!
//! Each coordinator owns the observable state of one screen. Operations
//! spawn tokio tasks that talk to the [`Catalog`](crate::Catalog); tasks
//! never touch state directly but report back with an event over an mpsc
//! channel, and the owner applies events one at a time with
//! `process_next`. Combined loads are joined before their event is sent, so
//! a batch is applied all at once or not at all.
//!
//! - `home`: trending + popular lists, debounced search
//! - `media_list`: popular / top rated / now playing for one media type
//! - `details`: one record with genres, account and favorite toggling
//! - `favorites`: the account's favorite movies and tv shows

pub mod details;
pub mod favorites;
pub mod home;
pub mod media_list;

pub use details::{DetailsCoordinator, DetailsState};
pub use favorites::{FavoritesCoordinator, FavoritesState};
pub use home::{HomeCoordinator, HomeState, SEARCH_DEBOUNCE};
pub use media_list::{MediaListCoordinator, MediaListState};

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Cancellation tokens keyed by a logical operation id
///
/// Starting an operation under a key cancels whatever was still running
/// under the same key.
#[derive(Debug)]
pub(crate) struct Cancellables<K: Eq + Hash> {
    tokens: HashMap<K, CancellationToken>,
}

impl<K: Eq + Hash> Cancellables<K> {
    pub(crate) fn new() -> Self {
        Self {
            tokens: HashMap::new(),
        }
    }

    /// Cancel the operation running under `key` and return a token for its
    /// replacement
    pub(crate) fn begin(&mut self, key: K) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some(previous) = self.tokens.insert(key, token.clone()) {
            previous.cancel();
        }
        token
    }

    pub(crate) fn cancel(&mut self, key: &K) {
        if let Some(token) = self.tokens.remove(key) {
            token.cancel();
        }
    }
}

impl<K: Eq + Hash> Drop for Cancellables<K> {
    fn drop(&mut self) {
        for token in self.tokens.values() {
            token.cancel();
        }
    }
}

/// Wait for `quiet` without cancellation, then run `work` unless cancelled.
///
/// Returns `None` if the token fired at any point.
pub(crate) async fn debounced<T>(
    token: &CancellationToken,
    quiet: Duration,
    work: impl Future<Output = T>,
) -> Option<T> {
    tokio::select! {
        _ = token.cancelled() => return None,
        _ = tokio::time::sleep(quiet) => {}
    }
    tokio::select! {
        _ = token.cancelled() => None,
        output = work => Some(output),
    }
}

/// Event channel between spawned tasks and the owning coordinator
#[derive(Debug)]
pub(crate) struct Mailbox<E> {
    tx: mpsc::UnboundedSender<E>,
    rx: mpsc::UnboundedReceiver<E>,
}

impl<E> Mailbox<E> {
    pub(crate) fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    pub(crate) fn sender(&self) -> mpsc::UnboundedSender<E> {
        self.tx.clone()
    }

    /// Wait for the next event; the mailbox keeps its own sender alive, so
    /// this only returns once an event arrives
    pub(crate) async fn recv(&mut self) -> Option<E> {
        self.rx.recv().await
    }

    pub(crate) fn try_recv(&mut self) -> Option<E> {
        self.rx.try_recv().ok()
    }
}
