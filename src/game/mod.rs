//! The game entity: identity, live scores, lifecycle timestamps and the
//! observers that want to hear about changes.
//!
//! Lifecycle actions go through [`GameState::apply`] and score writes through
//! [`GameState::admit`]; the game carries out the result and then notifies
//! its observers. A game knows nothing about scoreboards.

pub mod clock;
pub mod observer;
pub mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use observer::{GameObserver, NoopObserver};
pub use state::{Action, GameState, ScoreChange, Stamp, Transition};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::{GameError, Result};
use crate::team::{Side, Team};
use observer::ObserverSet;

static NEXT_GAME_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a game instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(u64);

impl GameId {
    fn next() -> Self {
        GameId(NEXT_GAME_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct Lifecycle {
    state: GameState,
    planned_at: Option<DateTime<Utc>>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    cancelled_at: Option<DateTime<Utc>>,
}

impl Lifecycle {
    fn stamp(&mut self, stamp: Stamp, now: DateTime<Utc>) {
        // Never stamp an end before the start, whatever the clock says.
        let now = self.started_at.map_or(now, |started| now.max(started));
        match stamp {
            Stamp::Started => self.started_at = Some(now),
            Stamp::Finished => self.finished_at = Some(now),
            Stamp::Cancelled => self.cancelled_at = Some(now),
        }
    }
}

/// A match between two teams.
///
/// Shared as `Arc<Game>` and mutated through `&self` from any thread.
/// Equality and hashing use the [`GameId`], so two games are equal only
/// if they are the same instance.
pub struct Game {
    id: GameId,
    home_team: Team,
    away_team: Team,
    home_score: AtomicU32,
    away_score: AtomicU32,
    lifecycle: RwLock<Lifecycle>,
    observers: ObserverSet,
    clock: Arc<dyn Clock>,
}

/// Point-in-time copy of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub id: GameId,
    pub home_team: Team,
    pub away_team: Team,
    pub home_score: u32,
    pub away_score: u32,
    pub state: GameState,
    pub planned_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Game {
    pub fn builder() -> GameBuilder {
        GameBuilder::default()
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn home_team(&self) -> &Team {
        &self.home_team
    }

    pub fn away_team(&self) -> &Team {
        &self.away_team
    }

    pub fn home_score(&self) -> u32 {
        self.home_score.load(Ordering::SeqCst)
    }

    pub fn away_score(&self) -> u32 {
        self.away_score.load(Ordering::SeqCst)
    }

    pub fn score(&self, side: Side) -> u32 {
        self.score_cell(side).load(Ordering::SeqCst)
    }

    /// Sum of both sides; the scoreboard ranks by this.
    pub fn total_score(&self) -> u32 {
        self.home_score().saturating_add(self.away_score())
    }

    pub fn state(&self) -> GameState {
        self.lifecycle.read().state
    }

    pub fn planned_at(&self) -> Option<DateTime<Utc>> {
        self.lifecycle.read().planned_at
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.lifecycle.read().started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.lifecycle.read().finished_at
    }

    pub fn cancelled_at(&self) -> Option<DateTime<Utc>> {
        self.lifecycle.read().cancelled_at
    }

    pub fn summary(&self) -> GameSummary {
        let lifecycle = *self.lifecycle.read();
        GameSummary {
            id: self.id,
            home_team: self.home_team.clone(),
            away_team: self.away_team.clone(),
            home_score: self.home_score(),
            away_score: self.away_score(),
            state: lifecycle.state,
            planned_at: lifecycle.planned_at,
            started_at: lifecycle.started_at,
            finished_at: lifecycle.finished_at,
            cancelled_at: lifecycle.cancelled_at,
        }
    }

    pub fn start(&self) -> Result<&Self> {
        self.perform(Action::Start)
    }

    pub fn finish(&self) -> Result<&Self> {
        self.perform(Action::Finish)
    }

    /// Cancel a planned game, or abandon a running one.
    pub fn cancel(&self) -> Result<&Self> {
        self.perform(Action::Cancel)
    }

    /// Overwrite one side's score. Races with concurrent writes are
    /// last-writer-wins.
    pub fn update_score(&self, side: Side, value: u32) -> Result<&Self> {
        self.write_score(ScoreChange::Set(side, value))
    }

    /// Add to one side's score. Concurrent increments never lose updates.
    pub fn increase_score_by(&self, side: Side, delta: u32) -> Result<&Self> {
        self.write_score(ScoreChange::Add(side, delta))
    }

    pub fn update_home_score(&self, value: u32) -> Result<&Self> {
        self.update_score(Side::Home, value)
    }

    pub fn update_away_score(&self, value: u32) -> Result<&Self> {
        self.update_score(Side::Away, value)
    }

    pub fn increase_home_score_by(&self, delta: u32) -> Result<&Self> {
        self.increase_score_by(Side::Home, delta)
    }

    pub fn increase_away_score_by(&self, delta: u32) -> Result<&Self> {
        self.increase_score_by(Side::Away, delta)
    }

    /// Register an observer. Returns `false` if it was already registered.
    pub fn add_observer(&self, observer: Arc<dyn GameObserver>) -> bool {
        self.observers.add(observer)
    }

    /// Deregister an observer. Returns `false` if it was not registered.
    pub fn remove_observer(&self, observer: &Arc<dyn GameObserver>) -> bool {
        self.observers.remove(observer)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn score_cell(&self, side: Side) -> &AtomicU32 {
        match side {
            Side::Home => &self.home_score,
            Side::Away => &self.away_score,
        }
    }

    fn perform(&self, action: Action) -> Result<&Self> {
        let mut lifecycle = self.lifecycle.write();
        let Transition { to, stamp } = lifecycle.state.apply(action)?;
        lifecycle.stamp(stamp, self.clock.now());
        lifecycle.state = to;
        drop(lifecycle);
        self.notify_state_changed(to);
        Ok(self)
    }

    fn write_score(&self, change: ScoreChange) -> Result<&Self> {
        // Shared guard: scores move concurrently, but never while a
        // transition is being committed.
        let lifecycle = self.lifecycle.read();
        let (side, value) = match lifecycle.state.admit(change)? {
            ScoreChange::Set(side, value) => {
                self.score_cell(side).store(value, Ordering::SeqCst);
                (side, value)
            }
            ScoreChange::Add(side, delta) => {
                let previous = self.add_to_score(side, delta);
                (side, previous.saturating_add(delta))
            }
        };
        drop(lifecycle);
        self.notify_score_changed(side, value);
        Ok(self)
    }

    fn add_to_score(&self, side: Side, delta: u32) -> u32 {
        let cell = self.score_cell(side);
        let mut current = cell.load(Ordering::SeqCst);
        loop {
            match cell.compare_exchange_weak(
                current,
                current.saturating_add(delta),
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(previous) => return previous,
                Err(actual) => current = actual,
            }
        }
    }

    fn notify_state_changed(&self, new_state: GameState) {
        for observer in self.observers.snapshot() {
            observer.on_state_changed(self, new_state);
        }
    }

    fn notify_score_changed(&self, side: Side, new_score: u32) {
        for observer in self.observers.snapshot() {
            observer.on_score_changed(self, side, new_score);
        }
    }
}

impl PartialEq for Game {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Game {}

impl Hash for Game {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lifecycle = *self.lifecycle.read();
        f.debug_struct("Game")
            .field("id", &self.id)
            .field("home_team", &self.home_team)
            .field("away_team", &self.away_team)
            .field("home_score", &self.home_score())
            .field("away_score", &self.away_score())
            .field("lifecycle", &lifecycle)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {} {}",
            self.home_team,
            self.home_score(),
            self.away_score(),
            self.away_team
        )
    }
}

/// Builder for [`Game`].
///
/// Teams are required. Scores default to zero and the clock to
/// [`SystemClock`]. Pre-set timestamps reconstruct a game mid-lifecycle;
/// the state is derived from which of them are present.
#[derive(Default)]
pub struct GameBuilder {
    home_team: Option<Team>,
    away_team: Option<Team>,
    home_score: u32,
    away_score: u32,
    planned_at: Option<DateTime<Utc>>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    cancelled_at: Option<DateTime<Utc>>,
    clock: Option<Arc<dyn Clock>>,
}

impl GameBuilder {
    pub fn home_team(mut self, team: Team) -> Self {
        self.home_team = Some(team);
        self
    }

    pub fn away_team(mut self, team: Team) -> Self {
        self.away_team = Some(team);
        self
    }

    pub fn home_score(mut self, score: u32) -> Self {
        self.home_score = score;
        self
    }

    pub fn away_score(mut self, score: u32) -> Self {
        self.away_score = score;
        self
    }

    pub fn planned_at(mut self, at: DateTime<Utc>) -> Self {
        self.planned_at = Some(at);
        self
    }

    pub fn started_at(mut self, at: DateTime<Utc>) -> Self {
        self.started_at = Some(at);
        self
    }

    pub fn finished_at(mut self, at: DateTime<Utc>) -> Self {
        self.finished_at = Some(at);
        self
    }

    pub fn cancelled_at(mut self, at: DateTime<Utc>) -> Self {
        self.cancelled_at = Some(at);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Result<Arc<Game>> {
        let home_team = self
            .home_team
            .ok_or_else(|| GameError::invalid("home team must be provided"))?;
        let away_team = self
            .away_team
            .ok_or_else(|| GameError::invalid("away team must be provided"))?;

        if let (Some(started), Some(finished)) = (self.started_at, self.finished_at) {
            if started > finished {
                return Err(GameError::invalid(
                    "finished_at can't be sooner than started_at",
                ));
            }
        }
        if let (Some(started), Some(cancelled)) = (self.started_at, self.cancelled_at) {
            if started > cancelled {
                return Err(GameError::invalid(
                    "cancelled_at can't be sooner than started_at",
                ));
            }
        }
        if self.finished_at.is_some() && self.cancelled_at.is_some() {
            return Err(GameError::invalid(
                "finished_at and cancelled_at can't be set at the same time",
            ));
        }

        let state = GameState::from_timestamps(
            self.started_at.is_some(),
            self.finished_at.is_some(),
            self.cancelled_at.is_some(),
        )
        .ok_or_else(|| GameError::invalid("finished_at requires started_at"))?;

        Ok(Arc::new(Game {
            id: GameId::next(),
            home_team,
            away_team,
            home_score: AtomicU32::new(self.home_score),
            away_score: AtomicU32::new(self.away_score),
            lifecycle: RwLock::new(Lifecycle {
                state,
                planned_at: self.planned_at,
                started_at: self.started_at,
                finished_at: self.finished_at,
                cancelled_at: self.cancelled_at,
            }),
            observers: ObserverSet::default(),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use parking_lot::Mutex;

    fn kickoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 11, 19, 0, 0).unwrap()
    }

    fn team(name: &str) -> Team {
        Team::new(name).unwrap()
    }

    fn planned_game(clock: &Arc<ManualClock>) -> Arc<Game> {
        Game::builder()
            .home_team(team("Mexico"))
            .away_team(team("Canada"))
            .clock(clock.clone())
            .build()
            .unwrap()
    }

    /// Records every notification as a string, tagged with a label.
    struct Recorder {
        label: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl GameObserver for Recorder {
        fn on_state_changed(&self, _game: &Game, new_state: GameState) {
            self.log.lock().push(format!("{}:state:{}", self.label, new_state));
        }

        fn on_score_changed(&self, _game: &Game, side: Side, new_score: u32) {
            self.log
                .lock()
                .push(format!("{}:{}:{}", self.label, side, new_score));
        }
    }

    #[test]
    fn test_builder_requires_both_teams() {
        let err = Game::builder().away_team(team("Canada")).build().unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidArgument("home team must be provided".into())
        );
        let err = Game::builder().home_team(team("Mexico")).build().unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidArgument("away team must be provided".into())
        );
    }

    #[test]
    fn test_builder_derives_state_from_timestamps() {
        let base = || Game::builder().home_team(team("A")).away_team(team("B"));
        let t = kickoff();

        assert_eq!(base().build().unwrap().state(), GameState::Planned);
        assert_eq!(
            base().started_at(t).build().unwrap().state(),
            GameState::Running
        );
        assert_eq!(
            base()
                .started_at(t)
                .finished_at(t + Duration::minutes(95))
                .build()
                .unwrap()
                .state(),
            GameState::Finished
        );
        assert_eq!(
            base().cancelled_at(t).build().unwrap().state(),
            GameState::Cancelled
        );
        assert_eq!(
            base()
                .started_at(t)
                .cancelled_at(t + Duration::minutes(30))
                .build()
                .unwrap()
                .state(),
            GameState::Abandoned
        );
    }

    #[test]
    fn test_builder_rejects_inconsistent_timestamps() {
        let base = || Game::builder().home_team(team("A")).away_team(team("B"));
        let t = kickoff();

        assert!(matches!(
            base().started_at(t).finished_at(t - Duration::minutes(1)).build(),
            Err(GameError::InvalidArgument(_))
        ));
        assert!(matches!(
            base().started_at(t).cancelled_at(t - Duration::minutes(1)).build(),
            Err(GameError::InvalidArgument(_))
        ));
        assert!(matches!(
            base()
                .started_at(t)
                .finished_at(t + Duration::minutes(90))
                .cancelled_at(t + Duration::minutes(91))
                .build(),
            Err(GameError::InvalidArgument(_))
        ));
        // Finished without ever starting has no state.
        assert!(matches!(
            base().finished_at(t).build(),
            Err(GameError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_builder_keeps_initial_scores_and_planned_time() {
        let game = Game::builder()
            .home_team(team("A"))
            .away_team(team("B"))
            .home_score(2)
            .away_score(1)
            .planned_at(kickoff())
            .build()
            .unwrap();
        assert_eq!(game.home_score(), 2);
        assert_eq!(game.away_score(), 1);
        assert_eq!(game.total_score(), 3);
        assert_eq!(game.planned_at(), Some(kickoff()));
    }

    #[test]
    fn test_games_have_instance_identity() {
        let clock = Arc::new(ManualClock::new(kickoff()));
        let a = planned_game(&clock);
        let b = planned_game(&clock);
        assert_ne!(a.id(), b.id());
        assert_ne!(*a, *b);
        assert_eq!(*a, *a.clone());
    }

    #[test]
    fn test_full_lifecycle_stamps_from_clock() {
        let clock = Arc::new(ManualClock::new(kickoff()));
        let game = planned_game(&clock);

        game.start().unwrap();
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.started_at(), Some(kickoff()));

        game.increase_home_score_by(1)
            .unwrap()
            .increase_away_score_by(2)
            .unwrap()
            .update_home_score(3)
            .unwrap();
        assert_eq!((game.home_score(), game.away_score()), (3, 2));

        let end = clock.advance(Duration::minutes(93));
        game.finish().unwrap();
        assert_eq!(game.state(), GameState::Finished);
        assert_eq!(game.finished_at(), Some(end));
        assert_eq!(game.cancelled_at(), None);
    }

    #[test]
    fn test_cancel_planned_and_abandon_running() {
        let clock = Arc::new(ManualClock::new(kickoff()));

        let planned = planned_game(&clock);
        planned.cancel().unwrap();
        assert_eq!(planned.state(), GameState::Cancelled);
        assert_eq!(planned.started_at(), None);
        assert_eq!(planned.cancelled_at(), Some(kickoff()));

        let running = planned_game(&clock);
        running.start().unwrap();
        clock.advance(Duration::minutes(40));
        running.cancel().unwrap();
        assert_eq!(running.state(), GameState::Abandoned);
        assert!(running.started_at() <= running.cancelled_at());
    }

    #[test]
    fn test_illegal_actions_leave_game_unchanged() {
        let clock = Arc::new(ManualClock::new(kickoff()));
        let game = planned_game(&clock);

        assert!(matches!(
            game.finish(),
            Err(GameError::UnsupportedTransition {
                state: GameState::Planned,
                ..
            })
        ));
        assert!(game.increase_home_score_by(1).is_err());
        assert!(game.update_away_score(4).is_err());
        assert_eq!(game.summary().state, GameState::Planned);
        assert_eq!(game.total_score(), 0);

        game.start().unwrap();
        game.update_home_score(2).unwrap();
        let before = game.summary();
        clock.advance(Duration::minutes(5));
        assert!(matches!(
            game.start(),
            Err(GameError::UnsupportedTransition {
                action: "start",
                state: GameState::Running
            })
        ));
        assert_eq!(game.summary(), before);

        game.finish().unwrap();
        let finished = game.summary();
        assert!(game.update_home_score(9).is_err());
        assert!(game.increase_away_score_by(1).is_err());
        assert!(game.finish().is_err());
        assert!(game.cancel().is_err());
        assert!(game.start().is_err());
        assert_eq!(game.summary(), finished);
    }

    #[test]
    fn test_backwards_clock_never_breaks_chronology() {
        let clock = Arc::new(ManualClock::new(kickoff()));
        let game = planned_game(&clock);
        game.start().unwrap();
        clock.set(kickoff() - Duration::hours(1));
        game.finish().unwrap();
        assert_eq!(game.finished_at(), game.started_at());
    }

    #[test]
    fn test_observers_notified_in_registration_order_with_new_values() {
        let clock = Arc::new(ManualClock::new(kickoff()));
        let game = planned_game(&clock);
        let log = Arc::new(Mutex::new(Vec::new()));

        let first: Arc<dyn GameObserver> = Arc::new(Recorder {
            label: "first",
            log: log.clone(),
        });
        let second: Arc<dyn GameObserver> = Arc::new(Recorder {
            label: "second",
            log: log.clone(),
        });
        assert!(game.add_observer(first.clone()));
        assert!(game.add_observer(second.clone()));
        assert!(!game.add_observer(first.clone()));
        assert_eq!(game.observer_count(), 2);

        game.start().unwrap();
        game.increase_away_score_by(2).unwrap();
        game.update_home_score(1).unwrap();
        assert!(game.finish().is_ok());
        assert!(game.increase_home_score_by(1).is_err());

        assert_eq!(
            *log.lock(),
            vec![
                "first:state:RUNNING",
                "second:state:RUNNING",
                "first:away:2",
                "second:away:2",
                "first:home:1",
                "second:home:1",
                "first:state:FINISHED",
                "second:state:FINISHED",
            ]
        );

        assert!(game.remove_observer(&first));
        assert!(!game.remove_observer(&first));
        assert_eq!(game.observer_count(), 1);
    }

    /// An observer may deregister itself from inside a callback.
    #[test]
    fn test_observer_can_deregister_during_callback() {
        struct OneShot {
            me: Mutex<Option<Arc<dyn GameObserver>>>,
            calls: AtomicU32,
        }

        impl GameObserver for OneShot {
            fn on_state_changed(&self, game: &Game, _new_state: GameState) {
                self.calls.fetch_add(1, Ordering::SeqCst);
                if let Some(me) = self.me.lock().take() {
                    game.remove_observer(&me);
                }
            }

            fn on_score_changed(&self, _game: &Game, _side: Side, _new_score: u32) {
                self.calls.fetch_add(1, Ordering::SeqCst);
            }
        }

        let clock = Arc::new(ManualClock::new(kickoff()));
        let game = planned_game(&clock);
        let one_shot = Arc::new(OneShot {
            me: Mutex::new(None),
            calls: AtomicU32::new(0),
        });
        let as_observer: Arc<dyn GameObserver> = one_shot.clone();
        *one_shot.me.lock() = Some(as_observer.clone());
        game.add_observer(as_observer);

        game.start().unwrap();
        game.increase_home_score_by(1).unwrap();
        assert_eq!(one_shot.calls.load(Ordering::SeqCst), 1);
        assert_eq!(game.observer_count(), 0);
    }

    /// A score written while running may be reported after the game has
    /// already been finished from another thread.
    #[test]
    fn test_score_notification_can_trail_a_concurrent_finish() {
        struct Stalling {
            gate: std::sync::Barrier,
            log: Mutex<Vec<String>>,
        }

        impl GameObserver for Stalling {
            fn on_state_changed(&self, _game: &Game, new_state: GameState) {
                self.log.lock().push(format!("state:{new_state}"));
            }

            fn on_score_changed(&self, game: &Game, side: Side, new_score: u32) {
                self.gate.wait();
                self.gate.wait();
                self.log
                    .lock()
                    .push(format!("{side}:{new_score} while {}", game.state()));
            }
        }

        let game = Game::builder()
            .home_team(team("A"))
            .away_team(team("B"))
            .started_at(kickoff())
            .build()
            .unwrap();
        let stalling = Arc::new(Stalling {
            gate: std::sync::Barrier::new(2),
            log: Mutex::new(Vec::new()),
        });
        game.add_observer(stalling.clone());

        std::thread::scope(|s| {
            s.spawn(|| {
                game.increase_home_score_by(1).unwrap();
            });
            // The scorer has committed and is parked inside its callback.
            stalling.gate.wait();
            game.finish().unwrap();
            stalling.gate.wait();
        });

        assert_eq!(game.home_score(), 1);
        assert_eq!(
            *stalling.log.lock(),
            vec!["state:FINISHED", "home:1 while FINISHED"]
        );
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let game = Game::builder()
            .home_team(team("A"))
            .away_team(team("B"))
            .started_at(kickoff())
            .build()
            .unwrap();
        game.add_observer(Arc::new(NoopObserver));

        std::thread::scope(|s| {
            for i in 0..8 {
                let game = &game;
                s.spawn(move || {
                    let side = if i % 2 == 0 { Side::Home } else { Side::Away };
                    for _ in 0..1_000 {
                        game.increase_score_by(side, 1).unwrap();
                    }
                });
            }
        });

        assert_eq!(game.home_score(), 4_000);
        assert_eq!(game.away_score(), 4_000);
    }

    /// Each increment reports the value its own addition produced, so the
    /// notified values across threads are exactly 1..=n.
    #[test]
    fn test_increment_notifications_are_distinct() {
        struct Collect(Mutex<Vec<u32>>);

        impl GameObserver for Collect {
            fn on_state_changed(&self, _game: &Game, _new_state: GameState) {}

            fn on_score_changed(&self, _game: &Game, _side: Side, new_score: u32) {
                self.0.lock().push(new_score);
            }
        }

        let game = Game::builder()
            .home_team(team("A"))
            .away_team(team("B"))
            .started_at(kickoff())
            .build()
            .unwrap();
        let collect = Arc::new(Collect(Mutex::new(Vec::new())));
        game.add_observer(collect.clone());

        std::thread::scope(|s| {
            for _ in 0..4 {
                let game = &game;
                s.spawn(move || {
                    for _ in 0..250 {
                        game.increase_home_score_by(1).unwrap();
                    }
                });
            }
        });

        let mut seen = collect.0.lock().clone();
        seen.sort_unstable();
        assert_eq!(seen, (1..=1_000).collect::<Vec<_>>());
    }

    #[test]
    fn test_increase_saturates() {
        let game = Game::builder()
            .home_team(team("A"))
            .away_team(team("B"))
            .home_score(u32::MAX - 1)
            .started_at(kickoff())
            .build()
            .unwrap();
        game.increase_home_score_by(5).unwrap();
        assert_eq!(game.home_score(), u32::MAX);
    }

    #[test]
    fn test_summary_serializes() {
        let clock = Arc::new(ManualClock::new(kickoff()));
        let game = planned_game(&clock);
        game.start().unwrap().update_away_score(1).unwrap();

        let json = serde_json::to_value(game.summary()).unwrap();
        assert_eq!(json["home_team"], "Mexico");
        assert_eq!(json["away_team"], "Canada");
        assert_eq!(json["away_score"], 1);
        assert_eq!(json["state"], "RUNNING");
        assert!(json["finished_at"].is_null());
        assert_eq!(game.to_string(), "Mexico 0 - 1 Canada");
    }
}
