//! CLI simulation example.
//!
//! Usage: `cargo run --example simulate --features serde -- [config.json]`
//!
//! Without a path, two built-in players play 200 games. Set `RUST_LOG=debug`
//! to see per-game logging.

use std::env;
use std::fs;
use std::process::ExitCode;

use aceyrs::analysis::{analyze_spreads, histogram, summarize_players};
use aceyrs::simulation::{Event, SimulationConfig, spawn};
use aceyrs::{BetMode, BettingStrategy, PlayerConfig, RebuyPolicy};
use tracing_subscriber::EnvFilter;

fn default_config() -> SimulationConfig {
    let cautious = BettingStrategy::default()
        .with_entry(8, BetMode::AnteMultiple(5.0))
        .with_entry(9, BetMode::AnteMultiple(5.0))
        .with_entry(10, BetMode::AnteMultiple(5.0))
        .with_entry(11, BetMode::AnteMultiple(5.0))
        .with_entry(12, BetMode::AnteMultiple(5.0));
    let bold = BettingStrategy::default()
        .with_entry(7, BetMode::AnteMultiple(1.0))
        .with_entry(8, BetMode::PotPercent(100.0))
        .with_entry(9, BetMode::PotPercent(100.0))
        .with_entry(10, BetMode::PotPercent(100.0))
        .with_entry(11, BetMode::PotPercent(100.0))
        .with_entry(12, BetMode::PotPercent(100.0));

    SimulationConfig::new(vec![
        PlayerConfig::new("nathan", 2_000)
            .with_stop_loss(Some(5_000))
            .with_rebuy(RebuyPolicy::cover_bet())
            .with_strategy(cautious),
        PlayerConfig::new("rob", 2_000)
            .with_stop_loss(Some(5_000))
            .with_rebuy(RebuyPolicy::cover_bet())
            .with_strategy(bold),
    ])
    .with_simulation_count(200)
    .with_seed(2024)
}

fn load_config() -> Result<SimulationConfig, String> {
    let Some(path) = env::args().nth(1) else {
        return Ok(default_config());
    };
    let text = fs::read_to_string(&path).map_err(|err| format!("cannot read {path}: {err}"))?;
    serde_json::from_str(&text).map_err(|err| format!("invalid config {path}: {err}"))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let ante = config.game.ante;

    let (_handle, events, worker) = match spawn(config) {
        Ok(parts) => parts,
        Err(err) => {
            eprintln!("Config error: {err}");
            return ExitCode::FAILURE;
        }
    };

    for event in events {
        if let Event::GameComplete(done) = event {
            let index = done.game_index + 1;
            if index % 50 == 0 || index == done.total_games {
                println!(
                    "{index}/{} games ({:.0}%), eta {:.1}s",
                    done.total_games,
                    done.progress.fraction * 100.0,
                    done.progress.eta.as_secs_f64()
                );
            }
        }
    }

    let state = match worker.join() {
        Ok(Ok(state)) => state,
        Ok(Err(err)) => {
            eprintln!("Simulation error: {err}");
            return ExitCode::FAILURE;
        }
        Err(_) => {
            eprintln!("Simulation thread panicked.");
            return ExitCode::FAILURE;
        }
    };
    let games = || state.completed.iter().map(|stats| &**stats);

    println!();
    println!("spread  bets   win%  loss%  dbl%   ev     ctx ev  theory ev  max win");
    let analysis = analyze_spreads(games(), ante);
    for row in &analysis.rows {
        println!(
            "{:>6} {:>5} {:>6.1} {:>6.1} {:>5.1} {:>+6.2} {:>+8.2} {:>+10.2} {:>8.1}",
            row.spread,
            row.occurrences,
            row.measured.outcomes.win,
            row.measured.outcomes.loss,
            row.measured.outcomes.double_loss,
            row.measured.ev,
            row.contextual.ev,
            row.theoretical.ev,
            row.max_win_antes
        );
    }

    println!();
    for summary in summarize_players(games()) {
        let nets: Vec<f64> = summary.net_results.iter().map(|&net| net as f64).collect();
        let spread = histogram(&nets, 10);
        println!(
            "{}: net {} over {} games (mean {:.1}), {} winning, mean bet {:.1}, rebuys {}",
            summary.player,
            summary.total_net,
            summary.net_results.len(),
            summary.mean_net,
            summary.winning_games,
            summary.mean_bet,
            summary.total_rebuys
        );
        println!("  net histogram: {:?}", spread.counts);
    }

    ExitCode::SUCCESS
}
