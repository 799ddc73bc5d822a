use pigsty_engine::{GameConfiguration, GameSeed};
use pigsty_stats::{descriptive::Summary, win_share::WinShare};
use serde::{Deserialize, Serialize};

/// Output of the `simulate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub config: GameConfiguration,
    /// Seed of the first game; game `i` uses `seed + i`
    pub seed: GameSeed,
    pub games: usize,
    pub turns: Option<CountSummary>,
    pub rolls: Option<CountSummary>,
    pub seats: Vec<SeatShare>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountSummary {
    pub min: u32,
    pub max: u32,
    pub mean: f64,
    pub median: u32,
    pub std_dev: f64,
}

impl From<Summary> for CountSummary {
    fn from(summary: Summary) -> Self {
        let Summary {
            count: _,
            min,
            max,
            mean,
            median,
            std_dev,
        } = summary;
        Self {
            min,
            max,
            mean,
            median,
            std_dev,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatShare {
    pub seat: usize,
    pub name: String,
    pub wins: u64,
    pub fraction: f64,
}

impl SeatShare {
    pub fn collect(names: &[String], share: &WinShare) -> Vec<Self> {
        names
            .iter()
            .zip(share.iter())
            .enumerate()
            .map(|(seat, (name, (wins, fraction)))| Self {
                seat,
                name: name.clone(),
                wins,
                fraction,
            })
            .collect()
    }
}
