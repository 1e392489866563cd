use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;

use cricket_pulse::config::DashboardConfig;
use cricket_pulse::prefs::MemoryPreferences;
use cricket_pulse::scheduler::Task;
use cricket_pulse::simulator::{RngSource, TickOutcome};
use cricket_pulse::state::AppState;
use cricket_pulse::template::{load_template, seed_template};

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let args: Vec<String> = env::args().collect();
    let seconds = args
        .get(1)
        .map(|raw| raw.parse::<u64>())
        .transpose()
        .context("usage: simulate [seconds] [seed]")?
        .unwrap_or(60);
    let seed = args
        .get(2)
        .map(|raw| raw.parse::<u64>())
        .transpose()
        .context("usage: simulate [seconds] [seed]")?
        .unwrap_or(7);

    let config = DashboardConfig::from_env();
    let template = match &config.template_path {
        Some(path) => load_template(path)?,
        None => seed_template(),
    };

    let mut state = AppState::new(
        &config,
        Box::new(MemoryPreferences::new()),
        Some(template),
        Box::new(RngSource(StdRng::seed_from_u64(seed))),
    )?;

    let end = Duration::from_secs(seconds);
    let mut now = Duration::ZERO;
    while now <= end {
        // Drain timers by hand so every tick outcome can be printed.
        while let Some(task) = state.scheduler.pop_due(now) {
            match task {
                Task::SimulateTick => {
                    let outcome = state.simulate_score_updates(now);
                    println!("{:>7.2}s  {}", now.as_secs_f64(), describe(&state, &outcome));
                }
                other => state.run_task(other, now),
            }
        }
        state.advance(now);
        now += FRAME;
    }
    state.shutdown();

    println!();
    for card in state.container.cards() {
        println!(
            "{:<12} {:<10} {}",
            card.teams,
            card.score.as_deref().unwrap_or("-"),
            card.status
        );
    }
    Ok(())
}

fn describe(state: &AppState, outcome: &TickOutcome) -> String {
    let teams = |id| {
        state
            .container
            .card(id)
            .map(|c| c.teams.clone())
            .unwrap_or_default()
    };
    match outcome {
        TickOutcome::NoCards => "no cards".to_string(),
        TickOutcome::NoScore(id) => format!("{} has no score yet", teams(*id)),
        TickOutcome::Busy(id) => format!("{} still updating, skipped", teams(*id)),
        TickOutcome::Shimmer(id) => format!("{} shimmer only", teams(*id)),
        TickOutcome::Scored { card, from, to } => {
            format!("{} {from} -> {to}", teams(*card))
        }
        TickOutcome::ParseFailed { card, error } => {
            format!("{} parse failed: {error}", teams(*card))
        }
    }
}
