use std::path::PathBuf;

use anyhow::Context;
use pigsty_ai::{ThresholdPolicy, TurnPolicy, driver};
use pigsty_engine::{GameConfiguration, GameSeed, GameSession};
use pigsty_stats::{descriptive::Summary, win_share::WinShare};

use super::GameArg;
use crate::{
    schema::report::{CountSummary, SeatShare, SimulationReport},
    util::Output,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    game: GameArg,
    /// Number of games to play
    #[arg(long, default_value_t = 1000)]
    games: usize,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

impl SimulateArg {
    #[cfg(test)]
    pub(super) fn game(&self) -> &GameArg {
        &self.game
    }
}

#[derive(Debug, Clone, Copy)]
struct GameOutcome {
    winner: usize,
    turns: u32,
    rolls: u32,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        game,
        games,
        output,
    } = arg;

    let settings = game.load_settings()?;
    let policy = ThresholdPolicy::new(settings.thresholds);
    // the policy plays every seat; `versus_automated` only affects names
    let config = settings.game;
    let base_seed = game.seed();

    eprintln!(
        "Simulating {games} {} games with {} players...",
        config.mode, config.player_count
    );
    let progress_step = (*games / 10).max(1);
    let mut outcomes = Vec::with_capacity(*games);
    for i in 0..*games {
        let seed = GameSeed::from(u128::from(base_seed).wrapping_add(i as u128));
        outcomes.push(play_one(&config, seed, &policy)?);
        if (i + 1) % progress_step == 0 {
            eprintln!("  {}/{games} games played", i + 1);
        }
    }

    let share = WinShare::from_winners(config.player_count, outcomes.iter().map(|o| o.winner));
    let report = SimulationReport {
        seats: SeatShare::collect(&config.display_names(), &share),
        turns: Summary::new(outcomes.iter().map(|o| o.turns)).map(CountSummary::from),
        rolls: Summary::new(outcomes.iter().map(|o| o.rolls)).map(CountSummary::from),
        games: *games,
        seed: base_seed,
        config,
    };
    Output::save_json(&report, output.as_deref())?;
    Ok(())
}

fn play_one<P>(config: &GameConfiguration, seed: GameSeed, policy: &P) -> anyhow::Result<GameOutcome>
where
    P: TurnPolicy,
{
    let mut session = GameSession::with_seed(config.clone(), seed)
        .with_context(|| format!("Failed to start game with seed {seed}"))?;
    session.run_first_player_draw()?;

    let mut turns = 0;
    while session.phase().is_in_progress() {
        driver::play_turn(&mut session, policy)?;
        turns += 1;
    }
    let winner = session
        .winner()
        .map(|p| p.index())
        .context("Game ended without a winner")?;
    tracing::debug!(%seed, winner, turns, "game finished");

    Ok(GameOutcome {
        winner,
        turns,
        rolls: u32::try_from(session.rolls_taken()).unwrap_or(u32::MAX),
    })
}
