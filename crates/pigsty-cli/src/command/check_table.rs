use pigsty_engine::{Pose, ProbabilityTable, needs_rescale};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CheckTableArg {
    /// Razorback, trotter, snouter and leaning jowler weights
    #[arg(long, value_delimiter = ',', num_args = 4, default_values_t = ProbabilityTable::DEFAULT.named_weights())]
    weights: Vec<f64>,
    /// Chance of an oinker (both pigs touching)
    #[arg(long, default_value_t = ProbabilityTable::DEFAULT.oinker())]
    oinker: f64,
    /// Chance of a piggyback (one pig on top of the other)
    #[arg(long, default_value_t = ProbabilityTable::DEFAULT.piggyback())]
    piggyback: f64,
}

pub(crate) fn run(arg: &CheckTableArg) -> anyhow::Result<()> {
    let CheckTableArg {
        weights,
        oinker,
        piggyback,
    } = arg;

    let named: [f64; 4] = weights
        .as_slice()
        .try_into()
        .map_err(|_| anyhow::anyhow!("expected 4 weights, got {}", weights.len()))?;
    let table = ProbabilityTable::new(named, *oinker, *piggyback)?;

    if needs_rescale(&named) {
        eprintln!("Named weights summed to 1 or more and were rescaled");
    }
    for (pose, weight) in Pose::ALL.into_iter().zip(table.pose_weights()) {
        println!("{:<16} {weight:.4}", pose.to_string());
    }
    println!("{:<16} {:.4}", "oinker", table.oinker());
    println!("{:<16} {:.4}", "piggyback", table.piggyback());
    Ok(())
}
