//! Lifecycle state machine.
//!
//! Every (state, action) pair is decided by an exhaustive `match`:
//! [`GameState::apply`] for lifecycle actions, [`GameState::admit`] for score
//! writes. The game carries out the result; the state machine itself never
//! touches a game.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GameError, Result};
use crate::team::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    Planned,
    Running,
    Finished,
    /// Called off before it started.
    Cancelled,
    /// Called off while running.
    Abandoned,
}

/// A lifecycle action requested on a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Finish,
    Cancel,
}

/// A score write requested on a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreChange {
    Set(Side, u32),
    Add(Side, u32),
}

/// Which lifecycle timestamp a transition writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stamp {
    Started,
    Finished,
    Cancelled,
}

/// What a legal lifecycle action does to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub to: GameState,
    pub stamp: Stamp,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Finish => "finish",
            Action::Cancel => "cancel",
        }
    }
}

impl ScoreChange {
    pub fn name(&self) -> &'static str {
        match self {
            ScoreChange::Set(..) => "update the score of",
            ScoreChange::Add(..) => "increase the score of",
        }
    }
}

impl GameState {
    /// Decide where `action` takes a game in this state.
    pub fn apply(self, action: Action) -> Result<Transition> {
        use GameState::*;

        let (to, stamp) = match (self, action) {
            (Planned, Action::Start) => (Running, Stamp::Started),
            (Planned, Action::Cancel) => (Cancelled, Stamp::Cancelled),
            (Running, Action::Finish) => (Finished, Stamp::Finished),
            (Running, Action::Cancel) => (Abandoned, Stamp::Cancelled),
            (Planned, Action::Finish)
            | (Running, Action::Start)
            | (Finished | Cancelled | Abandoned, _) => {
                return Err(GameError::UnsupportedTransition {
                    action: action.name(),
                    state: self,
                })
            }
        };
        Ok(Transition { to, stamp })
    }

    /// Admit a score write in this state. Scores only move while running.
    pub fn admit(self, change: ScoreChange) -> Result<ScoreChange> {
        match self {
            GameState::Running => Ok(change),
            GameState::Planned
            | GameState::Finished
            | GameState::Cancelled
            | GameState::Abandoned => Err(GameError::UnsupportedTransition {
                action: change.name(),
                state: self,
            }),
        }
    }

    /// Derive the state from which lifecycle timestamps are present.
    ///
    /// Returns `None` for finished-without-start and for finished-and-cancelled
    /// combinations, which no sequence of actions can produce.
    pub fn from_timestamps(started: bool, finished: bool, cancelled: bool) -> Option<Self> {
        match (started, finished, cancelled) {
            (false, false, false) => Some(GameState::Planned),
            (true, false, false) => Some(GameState::Running),
            (true, true, false) => Some(GameState::Finished),
            (false, false, true) => Some(GameState::Cancelled),
            (true, false, true) => Some(GameState::Abandoned),
            (false, true, _) | (true, true, true) => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GameState::Finished | GameState::Cancelled | GameState::Abandoned
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameState::Planned => "PLANNED",
            GameState::Running => "RUNNING",
            GameState::Finished => "FINISHED",
            GameState::Cancelled => "CANCELLED",
            GameState::Abandoned => "ABANDONED",
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
