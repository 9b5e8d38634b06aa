//! Live ranking of games by total score.
//!
//! Games are grouped into buckets keyed by `home_score + away_score`. Each
//! bucket orders its games by kick-off time. The scoreboard registers itself
//! as an observer on every game it tracks and moves a game between buckets
//! whenever a notification shows its key changed.
//!
//! ```text
//!   Game::increase_score_by ──notify──▶ Relocator
//!                                         │  write lock
//!                                         │  recompute slot from the live game
//!                                         │  take from old bucket (drop if empty)
//!                                         │  insert into new bucket (create if absent)
//!                                         ▼
//!                              buckets: BTreeMap<key, BTreeMap<Rank, Game>>
//!                              tracked: HashMap<GameId, Entry>
//! ```
//!
//! Both maps live behind one lock, so a relocation is a single step to any
//! reader: a game is never in two buckets, or tracked without a bucket.
//! The slot is recomputed from the game inside the critical section rather
//! than taken from the notification, so a late notification can never move a
//! game back to a stale key.

mod iter;

pub use iter::RankedIterator;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{debug, trace};

use crate::game::{Game, GameId, GameObserver, GameState};
use crate::team::Side;

type BucketKey = u32;

/// Kick-off ordering inside a bucket. Games that have not started sort
/// after every started game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum StartOrder {
    Started(DateTime<Utc>),
    NotStarted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Rank {
    start: StartOrder,
    /// Tie-break so equal kick-off times never collapse into one entry.
    id: GameId,
}

/// Where a game currently belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    key: BucketKey,
    rank: Rank,
}

impl Slot {
    fn of(game: &Game) -> Self {
        Slot {
            key: game.total_score(),
            rank: Rank {
                start: game
                    .started_at()
                    .map_or(StartOrder::NotStarted, StartOrder::Started),
                id: game.id(),
            },
        }
    }
}

struct Entry {
    game: Arc<Game>,
    slot: Slot,
}

type Bucket = BTreeMap<Rank, Arc<Game>>;

#[derive(Default)]
struct Buckets {
    buckets: BTreeMap<BucketKey, Bucket>,
    tracked: HashMap<GameId, Entry>,
}

impl Buckets {
    /// Put a game into the bucket for `slot`, creating the bucket if absent.
    fn insert(&mut self, slot: Slot, game: Arc<Game>) {
        self.buckets
            .entry(slot.key)
            .or_default()
            .insert(slot.rank, game);
    }

    /// Take a game out of the bucket for `slot`, dropping the bucket if it
    /// is left empty.
    fn take(&mut self, slot: Slot) -> Option<Arc<Game>> {
        let bucket = self.buckets.get_mut(&slot.key)?;
        let game = bucket.remove(&slot.rank);
        if bucket.is_empty() {
            self.buckets.remove(&slot.key);
        }
        game
    }

    /// Bring a tracked game's slot in line with the game. Returns the old and
    /// new slot when it moved.
    fn resync(&mut self, game: &Game) -> Option<(Slot, Slot)> {
        let entry = self.tracked.get_mut(&game.id())?;
        let slot = Slot::of(game);
        if entry.slot == slot {
            return None;
        }
        let old = std::mem::replace(&mut entry.slot, slot);
        let game = entry.game.clone();
        self.take(old);
        self.insert(slot, game);
        Some((old, slot))
    }
}

pub(crate) struct Shared {
    buckets: RwLock<Buckets>,
    /// The one observer registered on every tracked game.
    observer: Arc<dyn GameObserver>,
}

impl Shared {
    fn new() -> Arc<Self> {
        Arc::new_cyclic(|shared| Shared {
            buckets: RwLock::default(),
            observer: Arc::new(Relocator {
                shared: shared.clone(),
            }),
        })
    }

    fn relocate(&self, game: &Game) {
        let mut buckets = self.buckets.write();
        if !buckets.tracked.contains_key(&game.id()) {
            trace!("Ignoring notification for untracked game {}", game.id());
            return;
        }
        match buckets.resync(game) {
            Some((old, new)) if old.key != new.key => debug!(
                "Moved game {} from bucket {} to bucket {}",
                game.id(),
                old.key,
                new.key
            ),
            Some((_, new)) => debug!("Re-ranked game {} within bucket {}", game.id(), new.key),
            None => trace!("Game {} already in bucket {}", game.id(), game.total_score()),
        }
    }
}

impl Drop for Shared {
    // Games outlive the index; leave none of them holding our observer.
    fn drop(&mut self) {
        let buckets = self.buckets.get_mut();
        for entry in buckets.tracked.values() {
            entry.game.remove_observer(&self.observer);
        }
        debug!("Scoreboard dropped, released {} game(s)", buckets.tracked.len());
    }
}

/// The observer a scoreboard registers on its games. Holds the index weakly
/// so games never keep a dropped scoreboard alive.
struct Relocator {
    shared: Weak<Shared>,
}

impl GameObserver for Relocator {
    fn on_state_changed(&self, game: &Game, _new_state: GameState) {
        if let Some(shared) = self.shared.upgrade() {
            shared.relocate(game);
        }
    }

    fn on_score_changed(&self, game: &Game, _side: Side, _new_score: u32) {
        if let Some(shared) = self.shared.upgrade() {
            shared.relocate(game);
        }
    }
}

/// Concurrent index of games ranked by total score, then by kick-off time.
///
/// Cloning gives another handle to the same index.
#[derive(Clone)]
pub struct Scoreboard {
    shared: Arc<Shared>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Scoreboard {
            shared: Shared::new(),
        }
    }

    /// Start tracking `game`.
    ///
    /// Returns `false` if the game was already tracked in the bucket it
    /// belongs to.
    pub fn add(&self, game: &Arc<Game>) -> bool {
        let mut buckets = self.shared.buckets.write();
        game.add_observer(self.shared.observer.clone());

        if buckets.tracked.contains_key(&game.id()) {
            return match buckets.resync(game) {
                Some((old, new)) => {
                    debug!(
                        "Re-added game {}, moved from bucket {} to bucket {}",
                        game.id(),
                        old.key,
                        new.key
                    );
                    true
                }
                None => false,
            };
        }

        let slot = Slot::of(game);
        buckets.insert(slot, game.clone());
        buckets.tracked.insert(
            game.id(),
            Entry {
                game: game.clone(),
                slot,
            },
        );
        debug!("Tracking game {} ({}) in bucket {}", game.id(), game, slot.key);
        true
    }

    pub fn contains(&self, game: &Game) -> bool {
        self.shared.buckets.read().tracked.contains_key(&game.id())
    }

    /// Stop tracking `game`. Returns `false` if it was not tracked.
    pub fn remove(&self, game: &Game) -> bool {
        let mut buckets = self.shared.buckets.write();
        game.remove_observer(&self.shared.observer);

        match buckets.tracked.remove(&game.id()) {
            Some(entry) => {
                buckets.take(entry.slot);
                debug!("Stopped tracking game {} (bucket {})", game.id(), entry.slot.key);
                true
            }
            None => false,
        }
    }

    /// The bucket key the index currently files `game` under.
    pub fn bucket_key_of(&self, game: &Game) -> Option<u32> {
        self.shared
            .buckets
            .read()
            .tracked
            .get(&game.id())
            .map(|entry| entry.slot.key)
    }

    pub fn len(&self) -> usize {
        self.shared.buckets.read().tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.shared.buckets.read().buckets.len()
    }

    /// Walk the games from highest total score down; within a score, the
    /// earliest kick-off first.
    pub fn iter(&self) -> RankedIterator {
        RankedIterator::new(self.shared.clone())
    }

    #[cfg(test)]
    fn assert_consistent(&self) {
        let buckets = self.shared.buckets.read();
        let filed: usize = buckets.buckets.values().map(|b| b.len()).sum();
        assert_eq!(filed, buckets.tracked.len(), "bucket entries vs tracked");
        for (key, bucket) in &buckets.buckets {
            assert!(!bucket.is_empty(), "empty bucket {key} left behind");
        }
        for (id, entry) in &buckets.tracked {
            assert_eq!(entry.slot, Slot::of(&entry.game), "stale slot for {id}");
            let filed = buckets
                .buckets
                .get(&entry.slot.key)
                .and_then(|b| b.get(&entry.slot.rank));
            assert!(
                filed.is_some_and(|g| g.id() == *id),
                "game {id} missing from bucket {}",
                entry.slot.key
            );
        }
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Scoreboard::new()
    }
}

impl fmt::Debug for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let buckets = self.shared.buckets.read();
        f.debug_struct("Scoreboard")
            .field("games", &buckets.tracked.len())
            .field("buckets", &buckets.buckets.len())
            .finish()
    }
}

impl<'a> IntoIterator for &'a Scoreboard {
    type Item = Arc<Game>;
    type IntoIter = RankedIterator;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
