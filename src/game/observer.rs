use parking_lot::RwLock;
use std::sync::Arc;

use super::{Game, GameState};
use crate::team::Side;

/// Receives notifications about changes to a [`Game`].
///
/// Callbacks run synchronously on the thread that mutated the game, after
/// the mutation is committed, and carry the post-mutation value.
///
/// Notifications raised on different threads are not ordered against each
/// other. A score write committed while the game was RUNNING can be reported
/// after `on_state_changed(.., GameState::Finished)` from a concurrent
/// `finish`. Observers that care about the current state should read it from
/// the game rather than infer it from the order of callbacks.
pub trait GameObserver: Send + Sync {
    fn on_state_changed(&self, game: &Game, new_state: GameState);

    fn on_score_changed(&self, game: &Game, side: Side, new_score: u32);
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GameObserver for NoopObserver {
    fn on_state_changed(&self, _game: &Game, _new_state: GameState) {}

    fn on_score_changed(&self, _game: &Game, _side: Side, _new_score: u32) {}
}

/// Insertion-ordered set of observers, deduplicated by pointer.
#[derive(Default)]
pub(crate) struct ObserverSet {
    observers: RwLock<Vec<Arc<dyn GameObserver>>>,
}

fn same_observer(a: &Arc<dyn GameObserver>, b: &Arc<dyn GameObserver>) -> bool {
    // Compare data pointers only; vtable pointers differ across codegen units.
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

impl ObserverSet {
    pub(crate) fn add(&self, observer: Arc<dyn GameObserver>) -> bool {
        let mut observers = self.observers.write();
        if observers.iter().any(|o| same_observer(o, &observer)) {
            return false;
        }
        observers.push(observer);
        true
    }

    pub(crate) fn remove(&self, observer: &Arc<dyn GameObserver>) -> bool {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|o| !same_observer(o, observer));
        observers.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.read().len()
    }

    /// Copy of the current registrations, so callbacks run without the lock
    /// held and may (de)register observers themselves.
    pub(crate) fn snapshot(&self) -> Vec<Arc<dyn GameObserver>> {
        self.observers.read().clone()
    }
}
