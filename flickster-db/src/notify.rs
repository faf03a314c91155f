//! Change notification.
//!
//! The provider posts a change after every successful mutation and never
//! waits for delivery. `ObserverRegistry` is a small in-process pub/sub that
//! hands each observer an `mpsc` receiver.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, PoisonError};

use crate::uri::MovieUri;

/// Sink for change signals, keyed by resource identifier.
pub trait ChangeNotifier: Send + Sync {
    /// Post a change for `uri`. Must not block.
    fn notify_change(&self, uri: &MovieUri);
}

/// Notifier that drops every signal.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl ChangeNotifier for NoopNotifier {
    fn notify_change(&self, _uri: &MovieUri) {}
}

/// Delivered to observers when data at `uri` changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub uri: MovieUri,
}

struct Observer {
    uri: MovieUri,
    notify_for_descendants: bool,
    tx: Sender<ChangeEvent>,
}

impl Observer {
    /// An observer hears a change to its own identifier and to any ancestor
    /// of it (a change to `movie` invalidates `movie/{date}`). Changes below
    /// it are heard only when it asked for descendants.
    fn wants(&self, changed: &MovieUri) -> bool {
        self.uri == *changed
            || changed.is_ancestor_of(&self.uri)
            || (self.notify_for_descendants && self.uri.is_ancestor_of(changed))
    }
}

/// In-process observer registry.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Mutex<Vec<Observer>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch `uri`. Dropping the receiver unregisters the observer the next
    /// time a change is posted.
    pub fn register(&self, uri: MovieUri, notify_for_descendants: bool) -> Receiver<ChangeEvent> {
        let (tx, rx) = mpsc::channel();
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Observer {
                uri,
                notify_for_descendants,
                tx,
            });
        rx
    }

    pub fn observer_count(&self) -> usize {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl ChangeNotifier for ObserverRegistry {
    fn notify_change(&self, uri: &MovieUri) {
        let mut observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        observers.retain(|observer| {
            if !observer.wants(uri) {
                return true;
            }
            observer
                .tx
                .send(ChangeEvent { uri: uri.clone() })
                .is_ok()
        });
        log::debug!("Posted change for {} to {} observer(s)", uri, observers.len());
    }
}
