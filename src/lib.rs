//! Live scoreboard: games whose scores change concurrently, and an index
//! that keeps them ranked by total score while they change.
//!
//! - [`game`]: the game entity, its lifecycle state machine and observers.
//! - [`scoreboard`]: the concurrent ranked index.
//! - [`manager`]: lookup by team pair on top of a scoreboard.
//! - [`feed`] and [`config`]: the simulated match feed behind the demo binary.

pub mod config;
pub mod error;
pub mod feed;
pub mod game;
pub mod manager;
pub mod scoreboard;
pub mod team;

pub use error::{GameError, Result};
pub use game::{
    Clock, Game, GameBuilder, GameId, GameObserver, GameState, GameSummary, ManualClock,
    NoopObserver, SystemClock,
};
pub use manager::ScoreboardManager;
pub use scoreboard::{RankedIterator, Scoreboard};
pub use team::{Side, Team};
