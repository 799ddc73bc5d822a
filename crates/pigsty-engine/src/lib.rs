pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ProbabilityTableError {
    #[display("weight of {pose} is not a finite number")]
    NonFinite { pose: Pose },
    #[display("weight of {pose} must not be negative")]
    Negative { pose: Pose },
    #[display("weight of {higher} must be strictly greater than weight of {lower}")]
    NotDescending { higher: Pose, lower: Pose },
    #[display("{event} probability must be between 0 and 1")]
    SpecialOutOfRange { event: &'static str },
    #[display("oinker and piggyback probabilities sum to more than 1")]
    SpecialSumExceedsOne,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ConfigError {
    #[display("player count {count} is outside 2..=4")]
    PlayerCount { count: usize },
    #[display("target score {target} is outside 10..=300")]
    TargetScore { target: u32 },
    #[display("invalid player names: {reason}")]
    PlayerNames { reason: &'static str },
    #[display("invalid probability table")]
    #[from]
    ProbabilityTable(ProbabilityTableError),
}

/// A `roll`, `hold` or draw call that the current game state does not allow.
///
/// The session is left unchanged when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidOperation {
    #[display("invalid operation: the first-player draw is not finished")]
    DrawPending,
    #[display("invalid operation: the first-player draw is already complete")]
    DrawComplete,
    #[display("invalid operation: the game is finished")]
    GameFinished,
    #[display("invalid operation: the current player is eliminated")]
    PlayerEliminated,
    #[display("invalid operation: round score is zero, nothing to bank")]
    NothingToBank,
    #[display("invalid operation: a forced reroll must be taken before holding")]
    ForcedReroll,
}
