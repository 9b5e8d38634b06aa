//! Simulated live-score feed for the demo binary.
//!
//! Each worker is a tokio task that ticks on its own interval, picks a game
//! and a side at random, scores a goal directly on the shared game, and
//! reports it on a channel. Workers hit the same games concurrently, which is
//! exactly the traffic the scoreboard has to absorb.

pub mod events;

pub use events::ScoreEvent;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::error::Result;
use crate::game::Game;
use crate::team::{Side, Team};

/// Teams the demo pairs up, two per game, in order.
pub const ROSTER: &[&str] = &[
    "Mexico", "Canada", "Spain", "Brazil", "Germany", "France", "Uruguay", "Italy",
    "Argentina", "Australia", "Japan", "Senegal", "Morocco", "Croatia", "Portugal", "Ghana",
    "England", "Iran", "Netherlands", "Ecuador", "United States", "Wales", "Belgium",
    "Korea Republic", "Switzerland", "Cameroon", "Denmark", "Tunisia", "Poland", "Serbia",
    "Colombia", "Norway",
];

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub workers: usize,
    /// Goal attempts per worker.
    pub ticks: u32,
    pub tick: Duration,
    pub seed: u64,
}

/// The first `count` fixtures from [`ROSTER`].
pub fn fixtures(count: usize) -> Result<Vec<(Team, Team)>> {
    ROSTER
        .chunks_exact(2)
        .take(count)
        .map(|pair| -> Result<(Team, Team)> {
            Ok((Team::new(pair[0])?, Team::new(pair[1])?))
        })
        .collect()
}

/// Spawn the feed workers and return the channel their goals arrive on.
///
/// The channel closes once every worker has used up its ticks.
pub fn start_match_feed(games: Vec<Arc<Game>>, config: FeedConfig) -> mpsc::Receiver<ScoreEvent> {
    let (tx, rx) = mpsc::channel(1024);

    tokio::spawn(async move {
        info!(
            "Match feed started ({} workers x {} ticks every {:?} over {} games)",
            config.workers,
            config.ticks,
            config.tick,
            games.len()
        );

        let workers: Vec<_> = (0..config.workers)
            .map(|worker| {
                tokio::spawn(run_worker(
                    worker,
                    games.clone(),
                    tx.clone(),
                    config.clone(),
                ))
            })
            .collect();
        drop(tx);

        for result in futures_util::future::join_all(workers).await {
            if let Err(e) = result {
                error!("Feed worker failed: {}", e);
            }
        }
        info!("Match feed finished");
    });

    rx
}

async fn run_worker(
    worker: usize,
    games: Vec<Arc<Game>>,
    tx: mpsc::Sender<ScoreEvent>,
    config: FeedConfig,
) {
    if games.is_empty() {
        return;
    }
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(worker as u64));
    let mut interval = tokio::time::interval(config.tick);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    for _ in 0..config.ticks {
        interval.tick().await;

        let game = &games[rng.gen_range(0..games.len())];
        let side = if rng.gen_bool(0.5) { Side::Home } else { Side::Away };
        if let Err(e) = game.increase_score_by(side, 1) {
            debug!("Worker {} skipped goal for {}: {}", worker, game, e);
            continue;
        }

        let ev = ScoreEvent {
            game_id: game.id(),
            home_team: game.home_team().clone(),
            away_team: game.away_team().clone(),
            side,
            home_score: game.home_score(),
            away_score: game.away_score(),
            worker,
            detected_at: Utc::now(),
        };
        if let Err(e) = tx.try_send(ev) {
            warn!("Score event channel full, event DROPPED: {}", e);
        }
    }
}
