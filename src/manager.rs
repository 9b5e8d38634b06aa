//! Team-pair façade over a [`Scoreboard`].
//!
//! The scoreboard only deals in game objects. The manager resolves a
//! (home, away) pair to the tracked game and is the one place that adds and
//! removes games on a caller's behalf.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

use crate::error::{GameError, Result};
use crate::game::{Clock, Game, GameSummary};
use crate::scoreboard::Scoreboard;
use crate::team::Team;

pub struct ScoreboardManager {
    clock: Arc<dyn Clock>,
    scoreboard: Scoreboard,
    /// Serializes the lookup-then-add in `start_game`.
    starting: Mutex<()>,
}

impl ScoreboardManager {
    pub fn new(clock: Arc<dyn Clock>, scoreboard: Scoreboard) -> Self {
        ScoreboardManager {
            clock,
            scoreboard,
            starting: Mutex::new(()),
        }
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Find the tracked game for a pair. Linear in the number of games.
    pub fn get_game(&self, home: &Team, away: &Team) -> Option<Arc<Game>> {
        self.scoreboard
            .iter()
            .find(|game| game.home_team() == home && game.away_team() == away)
    }

    /// Create a game that kicks off now and put it on the board.
    pub fn start_game(&self, home: &Team, away: &Team) -> Result<Arc<Game>> {
        let _starting = self.starting.lock();
        if self.get_game(home, away).is_some() {
            return Err(GameError::GameAlreadyTracked {
                home: home.to_string(),
                away: away.to_string(),
            });
        }
        let game = Game::builder()
            .home_team(home.clone())
            .away_team(away.clone())
            .started_at(self.clock.now())
            .clock(self.clock.clone())
            .build()?;
        self.scoreboard.add(&game);
        info!("Started {} vs {}", home, away);
        Ok(game)
    }

    /// Set both scores of a tracked game.
    pub fn update_score(
        &self,
        home: &Team,
        away: &Team,
        home_score: u32,
        away_score: u32,
    ) -> Result<Arc<Game>> {
        let game = self.require(home, away)?;
        game.update_home_score(home_score)?
            .update_away_score(away_score)?;
        Ok(game)
    }

    /// Finish a tracked game. It stays on the board until removed.
    pub fn finish_game(&self, home: &Team, away: &Team) -> Result<Arc<Game>> {
        let game = self.require(home, away)?;
        game.finish()?;
        info!("Finished {}", game);
        Ok(game)
    }

    pub fn remove_game(&self, home: &Team, away: &Team) -> Result<Arc<Game>> {
        let game = self.require(home, away)?;
        self.scoreboard.remove(&game);
        Ok(game)
    }

    /// The board in rank order.
    pub fn summary(&self) -> Vec<GameSummary> {
        self.scoreboard.iter().map(|game| game.summary()).collect()
    }

    fn require(&self, home: &Team, away: &Team) -> Result<Arc<Game>> {
        self.get_game(home, away).ok_or_else(|| GameError::NotFound {
            home: home.to_string(),
            away: away.to_string(),
        })
    }
}
