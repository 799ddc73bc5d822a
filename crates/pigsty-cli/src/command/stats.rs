use std::path::PathBuf;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct StatsArg {
    /// Ledger file to read
    #[arg(long, default_value = "./data/ledger.json")]
    ledger: PathBuf,
    /// Only show this player
    #[arg(long)]
    player: Option<String>,
}

pub(crate) fn run(arg: &StatsArg) -> anyhow::Result<()> {
    let StatsArg { ledger, player } = arg;

    let file = util::read_ledger_file(ledger)?;
    if let Some(player) = player {
        let record = file.ledger.get_statistics(player);
        print_row(player, record.wins, record.losses, record.win_rate());
        return Ok(());
    }

    if file.ledger.is_empty() {
        println!("No games recorded in {}", ledger.display());
        return Ok(());
    }
    println!("{:<16} {:>6} {:>6} {:>7}", "player", "wins", "losses", "win %");
    for (identity, record) in file.ledger.iter() {
        print_row(identity, record.wins, record.losses, record.win_rate());
    }
    println!("Last updated {}", file.updated_at.to_rfc3339());
    Ok(())
}

fn print_row(identity: &str, wins: u32, losses: u32, win_rate: Option<f64>) {
    let rate = win_rate.map_or_else(|| "-".to_owned(), |r| format!("{:.1}", r * 100.0));
    println!("{identity:<16} {wins:>6} {losses:>6} {rate:>7}");
}
