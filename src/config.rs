use clap::Parser;
use std::time::Duration;

use crate::feed::{FeedConfig, ROSTER};

/// Live scoreboard demo: simulated matches scored from concurrent workers
#[derive(Parser, Debug, Clone)]
#[command(name = "live-scoreboard", version, about)]
pub struct Config {
    /// Number of games played at the same time
    #[arg(long, env = "SCOREBOARD_GAMES", default_value = "5")]
    pub games: usize,

    /// Feed workers scoring goals in parallel
    #[arg(long, env = "SCOREBOARD_WORKERS", default_value = "4")]
    pub workers: usize,

    /// Goal attempts per worker
    #[arg(long, env = "SCOREBOARD_TICKS", default_value = "40")]
    pub ticks: u32,

    /// Milliseconds between a worker's goal attempts
    #[arg(long, env = "SCOREBOARD_TICK_MS", default_value = "25")]
    pub tick_ms: u64,

    /// Seed for the simulated feed
    #[arg(long, env = "SCOREBOARD_SEED", default_value = "2026")]
    pub seed: u64,

    /// Log the leaderboard every N milliseconds while the feed runs
    #[arg(long, env = "SCOREBOARD_LEADERBOARD_EVERY_MS", default_value = "250")]
    pub leaderboard_every_ms: u64,

    /// Print the final board as JSON instead of a table
    #[arg(long, env = "SCOREBOARD_JSON", default_value = "false")]
    pub json: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.games == 0 {
            anyhow::bail!("games must be at least 1");
        }
        if self.games > ROSTER.len() / 2 {
            anyhow::bail!(
                "games must be at most {} (the roster has {} teams)",
                ROSTER.len() / 2,
                ROSTER.len()
            );
        }
        if self.workers == 0 {
            anyhow::bail!("workers must be at least 1");
        }
        if self.tick_ms == 0 {
            anyhow::bail!("tick_ms must be positive");
        }
        if self.leaderboard_every_ms == 0 {
            anyhow::bail!("leaderboard_every_ms must be positive");
        }
        Ok(())
    }

    pub fn feed(&self) -> FeedConfig {
        FeedConfig {
            workers: self.workers,
            ticks: self.ticks,
            tick: Duration::from_millis(self.tick_ms),
            seed: self.seed,
        }
    }
}
