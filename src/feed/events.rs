use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game::GameId;
use crate::team::{Side, Team};

/// A goal scored by the simulated feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEvent {
    pub game_id: GameId,
    pub home_team: Team,
    pub away_team: Team,
    /// Side that scored
    pub side: Side,
    /// Scores read right after the goal; other workers may have scored since
    pub home_score: u32,
    pub away_score: u32,
    /// Feed worker that produced the goal
    pub worker: usize,
    pub detected_at: DateTime<Utc>,
}
