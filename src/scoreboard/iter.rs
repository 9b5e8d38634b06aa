use std::collections::HashSet;
use std::sync::Arc;

use super::{BucketKey, Shared};
use crate::game::{Game, GameId};

/// Lazy walk over a [`Scoreboard`](super::Scoreboard) in rank order.
///
/// The outer cursor steps down through bucket keys; each bucket is copied
/// under a read lock when the cursor reaches it. Changes made during the
/// walk may or may not show up, but no game is yielded twice and every game
/// yielded was tracked when its bucket was read.
pub struct RankedIterator {
    shared: Arc<Shared>,
    /// Key of the bucket last read; the next one is the highest key below it.
    cursor: Option<BucketKey>,
    exhausted: bool,
    current: std::vec::IntoIter<Arc<Game>>,
    seen: HashSet<GameId>,
}

impl RankedIterator {
    pub(super) fn new(shared: Arc<Shared>) -> Self {
        RankedIterator {
            shared,
            cursor: None,
            exhausted: false,
            current: Vec::new().into_iter(),
            seen: HashSet::new(),
        }
    }

    /// Load the next non-empty bucket below the cursor.
    fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        let buckets = self.shared.buckets.read();
        let next = match self.cursor {
            None => buckets.buckets.iter().next_back(),
            Some(key) => buckets.buckets.range(..key).next_back(),
        };
        match next {
            Some((&key, bucket)) => {
                self.cursor = Some(key);
                self.current = bucket.values().cloned().collect::<Vec<_>>().into_iter();
                true
            }
            None => {
                self.exhausted = true;
                false
            }
        }
    }
}

impl Iterator for RankedIterator {
    type Item = Arc<Game>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            for game in self.current.by_ref() {
                // A game moved down past the cursor would otherwise come round twice.
                if self.seen.insert(game.id()) {
                    return Some(game);
                }
            }
            if !self.advance() {
                return None;
            }
        }
    }
}
