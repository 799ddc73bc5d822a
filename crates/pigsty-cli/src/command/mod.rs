use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pigsty_engine::{GameMode, GameSeed, GameSession};

use self::{
    check_table::CheckTableArg, play::PlayArg, simulate::SimulateArg, stats::StatsArg,
};
use crate::{schema::settings::Settings, util};

mod check_table;
mod play;
mod simulate;
mod stats;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a game on the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Play many computer-only games and report the results
    Simulate(#[clap(flatten)] SimulateArg),
    /// Show win/loss records from a ledger file
    Stats(#[clap(flatten)] StatsArg),
    /// Validate a pig dice probability table
    CheckTable(#[clap(flatten)] CheckTableArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Stats(arg) => stats::run(&arg)?,
        Mode::CheckTable(arg) => check_table::run(&arg)?,
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ModeArg {
    OneDie,
    TwoDice,
    PigDice,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::OneDie => GameMode::OneDie,
            ModeArg::TwoDice => GameMode::TwoDice,
            ModeArg::PigDice => GameMode::PigDice,
        }
    }
}

/// Game options shared by `play` and `simulate`.
///
/// Command-line values override the settings file.
#[derive(Debug, Clone, clap::Args)]
struct GameArg {
    /// Settings file (JSON) with game configuration and computer thresholds
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Rule set
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    /// Number of seats (2-4)
    #[arg(long)]
    players: Option<usize>,
    /// Score needed to win (10-300)
    #[arg(long)]
    target: Option<u32>,
    /// Let the computer play the last seat
    #[arg(long)]
    versus_computer: bool,
    /// Random seed as 32 hex digits
    #[arg(long)]
    seed: Option<GameSeed>,
}

impl GameArg {
    fn load_settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match &self.settings {
            Some(path) => util::read_settings_file(path)?,
            None => Settings::default(),
        };
        let game = &mut settings.game;
        if let Some(mode) = self.mode {
            game.mode = mode.into();
        }
        if let Some(players) = self.players {
            game.player_count = players;
        }
        if let Some(target) = self.target {
            game.target_score = target;
        }
        if self.versus_computer {
            game.versus_automated = true;
        }
        game.validate().context("Invalid game configuration")?;
        Ok(settings)
    }

    fn seed(&self) -> GameSeed {
        self.seed.unwrap_or_else(rand::random)
    }

    fn new_session(&self, settings: &Settings) -> anyhow::Result<GameSession> {
        let session = GameSession::with_seed(settings.game.clone(), self.seed())
            .context("Failed to start game")?;
        tracing::info!(seed = %session.seed(), "session created");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_arg(args: &[&str]) -> GameArg {
        let args = CommandArgs::try_parse_from(["pigsty", "simulate"].iter().chain(args)).unwrap();
        match args.mode {
            Mode::Simulate(arg) => arg.game().clone(),
            mode => panic!("unexpected mode: {mode:?}"),
        }
    }

    #[test]
    fn test_overrides_apply_to_defaults() {
        let settings = game_arg(&["--mode", "pig-dice", "--players", "3", "--target", "50"])
            .load_settings()
            .unwrap();
        assert_eq!(settings.game.mode, GameMode::PigDice);
        assert_eq!(settings.game.player_count, 3);
        assert_eq!(settings.game.target_score, 50);
        assert!(!settings.game.versus_automated);
    }

    #[test]
    fn test_invalid_overrides_rejected() {
        assert!(game_arg(&["--players", "5"]).load_settings().is_err());
        assert!(game_arg(&["--target", "5"]).load_settings().is_err());
    }

    #[test]
    fn test_seed_parsed_from_hex() {
        let arg = game_arg(&["--seed", "000000000000000000000000000000FF"]);
        assert_eq!(arg.seed(), GameSeed::from(0xFF_u128));
        assert!(CommandArgs::try_parse_from(["pigsty", "simulate", "--seed", "xyz"]).is_err());
    }

    #[test]
    fn test_check_table_defaults_parse() {
        assert!(CommandArgs::try_parse_from(["pigsty", "check-table"]).is_ok());
        assert!(
            CommandArgs::try_parse_from(["pigsty", "check-table", "--weights", "0.3,0.2,0.1"])
                .is_err()
        );
    }
}
