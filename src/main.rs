use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use live_scoreboard::config::Config;
use live_scoreboard::feed::{fixtures, start_match_feed};
use live_scoreboard::{GameSummary, Scoreboard, ScoreboardManager, SystemClock};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let manager = ScoreboardManager::new(Arc::new(SystemClock), Scoreboard::new());
    let mut games = Vec::with_capacity(config.games);
    for (home, away) in fixtures(config.games)? {
        games.push(manager.start_game(&home, &away)?);
    }
    info!(
        "Kicked off {} game(s) with {} feed worker(s)",
        games.len(),
        config.workers
    );

    let mut rx = start_match_feed(games.clone(), config.feed());
    let mut leaderboard_interval =
        tokio::time::interval(Duration::from_millis(config.leaderboard_every_ms));
    let mut goals = 0u64;

    // Main loop: log goals as they arrive, print the board periodically
    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(ev) => {
                    goals += 1;
                    debug!(
                        "Goal ({}) {} {}-{} {} [worker {}]",
                        ev.side, ev.home_team, ev.home_score, ev.away_score, ev.away_team, ev.worker
                    );
                }
                None => break,
            },
            _ = leaderboard_interval.tick() => {
                info!("Leaderboard: {}", one_line(&manager.summary()));
            }
        }
    }
    info!("Feed closed after {} goal(s)", goals);

    for game in &games {
        if let Err(e) = game.finish() {
            warn!("Could not finish {}: {}", game, e);
        }
    }

    let summary = manager.summary();
    if config.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for (rank, game) in summary.iter().enumerate() {
            println!(
                "{:>2}. {} {} - {} {}",
                rank + 1,
                game.home_team,
                game.home_score,
                game.away_score,
                game.away_team
            );
        }
    }

    Ok(())
}

fn one_line(summary: &[GameSummary]) -> String {
    summary
        .iter()
        .map(|g| format!("{} {}-{} {}", g.home_team, g.home_score, g.away_score, g.away_team))
        .collect::<Vec<_>>()
        .join(" | ")
}
