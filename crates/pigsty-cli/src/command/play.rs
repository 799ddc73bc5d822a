use std::{
    io::{self, BufRead as _, Write as _},
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use anyhow::Context;
use chrono::Utc;
use pigsty_ai::{ThresholdPolicy, driver};
use pigsty_engine::{GameSession, HoldReport, RollReport, TurnChange};

use super::GameArg;
use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    game: GameArg,
    /// Ledger file updated when the game ends
    #[arg(long, default_value = "./data/ledger.json")]
    ledger: PathBuf,
    /// Pause before each of the computer's decisions, in milliseconds
    #[arg(long, default_value_t = 800)]
    bot_delay_ms: u64,
}

enum Command {
    Roll,
    Hold,
    Quit,
}

impl Command {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "r" | "roll" => Some(Self::Roll),
            "h" | "hold" => Some(Self::Hold),
            "q" | "quit" => Some(Self::Quit),
            _ => None,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        game,
        ledger,
        bot_delay_ms,
    } = arg;

    let settings = game.load_settings()?;
    let policy = ThresholdPolicy::new(settings.thresholds);
    let mut session = game.new_session(&settings)?;
    let delay = Duration::from_millis(*bot_delay_ms);

    println!(
        "{}: first to {} points wins (seed {})",
        session.config().mode,
        session.config().target_score,
        session.seed()
    );

    while session.phase().is_awaiting_first_player_draw() {
        let step = session.draw_first_player()?;
        println!("{} draws {}", name(&session, step.player), step.value);
        if let Some(first) = step.first_player {
            println!("{} goes first", name(&session, first));
        }
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while session.phase().is_in_progress() {
        let actor = session.current_player().display_name().to_owned();

        if session.is_automated_turn() {
            thread::sleep(delay);
            match driver::step(&mut session, &policy)? {
                driver::Step::Rolled(report) => print_roll(&session, &actor, &report),
                driver::Step::Held(report) => print_hold(&session, &actor, &report),
            }
            continue;
        }

        prompt(&session)?;
        let Some(line) = lines.next() else {
            println!();
            println!("Game abandoned");
            return Ok(());
        };
        let line = line.context("Failed to read from stdin")?;
        match Command::parse(&line) {
            Some(Command::Roll) => {
                let report = session.roll()?;
                print_roll(&session, &actor, &report);
            }
            Some(Command::Hold) => match session.hold() {
                Ok(report) => print_hold(&session, &actor, &report),
                Err(e) => println!("{e}"),
            },
            Some(Command::Quit) => {
                println!("Game abandoned");
                return Ok(());
            }
            None => println!("Type r to roll, h to hold or q to quit"),
        }
    }

    print_scores(&session);
    record(&session, ledger)
}

fn name(session: &GameSession, seat: usize) -> &str {
    session.players()[seat].display_name()
}

fn prompt(session: &GameSession) -> anyhow::Result<()> {
    let player = session.current_player();
    let round = session.round();
    let choices = if session.can_hold() {
        "[r]oll, [h]old or [q]uit"
    } else {
        "[r]oll or [q]uit"
    };
    print!(
        "{} (total {}, round {}): {choices}? ",
        player.display_name(),
        player.total_score(),
        round.round_score()
    );
    io::stdout().flush().context("Failed to flush stdout")
}

fn print_roll(session: &GameSession, actor: &str, report: &RollReport) {
    println!("{actor} rolls {}: {}", report.outcome, report.resolution);
    print_turn(session, report.turn);
}

fn print_hold(session: &GameSession, actor: &str, report: &HoldReport) {
    println!("{actor} holds and banks {}", report.banked);
    print_turn(session, report.turn);
}

fn print_turn(session: &GameSession, turn: TurnChange) {
    match turn {
        TurnChange::Continue => {}
        TurnChange::Passed { to, .. } => println!("-- {}'s turn", name(session, to)),
        TurnChange::Won {
            winner,
            sole_survivor: false,
        } => println!("{} wins!", name(session, winner)),
        TurnChange::Won {
            winner,
            sole_survivor: true,
        } => println!("{} wins as the last player standing!", name(session, winner)),
    }
}

fn print_scores(session: &GameSession) {
    for player in session.players() {
        let status = if player.is_eliminated() {
            " (eliminated)"
        } else {
            ""
        };
        println!(
            "  {:<12} {:>4}{status}",
            player.display_name(),
            player.total_score()
        );
    }
}

fn record(session: &GameSession, path: &Path) -> anyhow::Result<()> {
    let mut file = util::read_ledger_file(path)?;
    if !file.ledger.record_session(session) {
        return Ok(());
    }
    file.updated_at = Utc::now();
    Output::save_json(&file, Some(path))?;

    for player in session.players() {
        let stats = file.ledger.get_statistics(player.identity());
        println!(
            "{}: {} wins, {} losses",
            player.display_name(),
            stats.wins,
            stats.losses
        );
    }
    eprintln!("Ledger saved to {}", path.display());
    Ok(())
}
