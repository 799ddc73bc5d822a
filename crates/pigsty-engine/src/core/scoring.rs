//! Scoring rules for the three game modes.
//!
//! Each mode has one [`ScoringRule`] implementation that knows how to throw
//! its dice and how to turn the result into a [`RollResolution`]. The rule is
//! chosen once, when the session is created, through [`GameMode::scoring_rule`].
//!
//! # One Die
//!
//! | Roll | Resolution |
//! |------|------------|
//! | 1 | bust |
//! | 2-6 | add the face value |
//!
//! # Two Dice
//!
//! | Roll | Resolution |
//! |------|------------|
//! | 1 + 1 | bust, banked total reset to 0 |
//! | a single 1 | bust |
//! | doubles (not 1s) | add the sum, must roll again |
//! | anything else | add the sum |
//!
//! # Pig Dice
//!
//! Two pigs are thrown. An oinker (total reset) or piggyback (elimination) is
//! checked first; otherwise the two poses are scored from a fixed table that is
//! symmetric in the two pigs:
//!
//! | Poses | Points |
//! |-------|--------|
//! | dot + no-dot | pig-out (bust) |
//! | dot + dot, no-dot + no-dot | 1 |
//! | side + razorback / trotter / snouter / leaning jowler | 5 / 5 / 10 / 15 |
//! | razorback + trotter, razorback + snouter, razorback + leaning jowler | 10 / 15 / 20 |
//! | trotter + snouter, trotter + leaning jowler, snouter + leaning jowler | 15 / 20 / 25 |
//! | double razorback / trotter / snouter / leaning jowler | 20 / 20 / 40 / 60 |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{
    die::{Face, PigRoll, Pose, RollOutcome},
    probability::ProbabilityTable,
    sampler::OutcomeSampler,
};

/// The three supported rule sets.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum GameMode {
    #[default]
    #[display("one die")]
    OneDie,
    #[display("two dice")]
    TwoDice,
    #[display("pig dice")]
    PigDice,
}

impl GameMode {
    pub const ALL: [Self; 3] = [Self::OneDie, Self::TwoDice, Self::PigDice];

    /// Returns the scoring rule implementation for this mode.
    #[must_use]
    pub fn scoring_rule(self) -> &'static dyn ScoringRule {
        match self {
            Self::OneDie => &OneDieRule,
            Self::TwoDice => &TwoDiceRule,
            Self::PigDice => &PigDiceRule,
        }
    }
}

/// How a single roll changes the round.
///
/// Exactly one variant applies to every roll, so the turn engine handles a
/// roll with one exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollResolution {
    /// Points are added to the round score. When `forced_reroll` is set the
    /// player may not hold until the next roll.
    Score { points: u32, forced_reroll: bool },
    /// The round score is lost and the turn ends.
    Bust,
    /// The round score and the player's banked total are lost and the turn ends.
    TotalReset,
    /// The player is removed from the game; the round score is discarded.
    Eliminate,
}

impl RollResolution {
    /// Creates a plain scoring resolution.
    #[must_use]
    pub const fn points(points: u32) -> Self {
        Self::Score {
            points,
            forced_reroll: false,
        }
    }

    #[must_use]
    pub const fn points_to_add(&self) -> u32 {
        match self {
            Self::Score { points, .. } => *points,
            Self::Bust | Self::TotalReset | Self::Eliminate => 0,
        }
    }

    /// Returns `true` if the round score is lost (including total resets).
    #[must_use]
    pub const fn is_bust(&self) -> bool {
        matches!(self, Self::Bust | Self::TotalReset)
    }

    #[must_use]
    pub const fn is_total_reset(&self) -> bool {
        matches!(self, Self::TotalReset)
    }

    #[must_use]
    pub const fn is_eliminate(&self) -> bool {
        matches!(self, Self::Eliminate)
    }

    #[must_use]
    pub const fn is_forced_reroll(&self) -> bool {
        matches!(
            self,
            Self::Score {
                forced_reroll: true,
                ..
            }
        )
    }

    /// Returns `true` if this roll ends the current player's turn.
    #[must_use]
    pub const fn ends_turn(&self) -> bool {
        !matches!(self, Self::Score { .. })
    }
}

/// A mode's way of rolling and scoring.
pub trait ScoringRule: fmt::Debug + Send + Sync {
    /// The mode this rule implements.
    fn mode(&self) -> GameMode;

    /// Throws the dice (or pigs) for one roll.
    ///
    /// `table` is only consulted by [`PigDiceRule`].
    fn roll(&self, sampler: &mut OutcomeSampler, table: &ProbabilityTable) -> RollOutcome;

    /// Maps a roll to its resolution.
    ///
    /// # Panics
    ///
    /// Panics if `outcome` was produced by a different mode.
    fn resolve(&self, outcome: RollOutcome) -> RollResolution;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OneDieRule;

impl ScoringRule for OneDieRule {
    fn mode(&self) -> GameMode {
        GameMode::OneDie
    }

    fn roll(&self, sampler: &mut OutcomeSampler, _table: &ProbabilityTable) -> RollOutcome {
        RollOutcome::OneDie(sampler.roll_face())
    }

    fn resolve(&self, outcome: RollOutcome) -> RollResolution {
        let RollOutcome::OneDie(face) = outcome else {
            panic!("one die rule cannot resolve {outcome:?}");
        };
        match face {
            Face::One => RollResolution::Bust,
            _ => RollResolution::points(face.value()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TwoDiceRule;

impl ScoringRule for TwoDiceRule {
    fn mode(&self) -> GameMode {
        GameMode::TwoDice
    }

    fn roll(&self, sampler: &mut OutcomeSampler, _table: &ProbabilityTable) -> RollOutcome {
        let a = sampler.roll_face();
        let b = sampler.roll_face();
        RollOutcome::TwoDice(a, b)
    }

    fn resolve(&self, outcome: RollOutcome) -> RollResolution {
        let RollOutcome::TwoDice(a, b) = outcome else {
            panic!("two dice rule cannot resolve {outcome:?}");
        };
        match (a, b) {
            (Face::One, Face::One) => RollResolution::TotalReset,
            (Face::One, _) | (_, Face::One) => RollResolution::Bust,
            _ => RollResolution::Score {
                points: a.value() + b.value(),
                forced_reroll: a == b,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PigDiceRule;

impl ScoringRule for PigDiceRule {
    fn mode(&self) -> GameMode {
        GameMode::PigDice
    }

    fn roll(&self, sampler: &mut OutcomeSampler, table: &ProbabilityTable) -> RollOutcome {
        if let Some(event) = sampler.special_event(table) {
            return RollOutcome::PigDice(event.into());
        }
        let a = sampler.roll_pose(table);
        let b = sampler.roll_pose(table);
        RollOutcome::PigDice(PigRoll::Poses(a, b))
    }

    fn resolve(&self, outcome: RollOutcome) -> RollResolution {
        let RollOutcome::PigDice(roll) = outcome else {
            panic!("pig dice rule cannot resolve {outcome:?}");
        };
        match roll {
            PigRoll::Oinker => RollResolution::TotalReset,
            PigRoll::Piggyback => RollResolution::Eliminate,
            PigRoll::Poses(a, b) => match pose_points(a, b) {
                Some(points) => RollResolution::points(points),
                None => RollResolution::Bust,
            },
        }
    }
}

/// Looks up the score of a pair of poses; `None` is a pig-out.
///
/// The lookup is symmetric: `pose_points(a, b) == pose_points(b, a)`.
#[must_use]
pub fn pose_points(a: Pose, b: Pose) -> Option<u32> {
    use Pose::{Dot, LeaningJowler, NoDot, Razorback, Snouter, Trotter};

    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let points = match (lo, hi) {
        (Dot, NoDot) => return None,
        (Dot, Dot) | (NoDot, NoDot) => 1,
        (Dot | NoDot, Razorback | Trotter) => 5,
        (Dot | NoDot, Snouter) | (Razorback, Trotter) => 10,
        (Dot | NoDot, LeaningJowler) | (Razorback, Snouter) | (Trotter, Snouter) => 15,
        (Razorback, LeaningJowler)
        | (Trotter, LeaningJowler)
        | (Razorback, Razorback)
        | (Trotter, Trotter) => 20,
        (Snouter, LeaningJowler) => 25,
        (Snouter, Snouter) => 40,
        (LeaningJowler, LeaningJowler) => 60,
        (lo, hi) => unreachable!("pose pair ({lo}, {hi}) is not ordered"),
    };
    Some(points)
}

impl fmt::Display for RollResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Score {
                points,
                forced_reroll: false,
            } => write!(f, "+{points}"),
            Self::Score {
                points,
                forced_reroll: true,
            } => write!(f, "+{points}, roll again"),
            Self::Bust => f.write_str("bust"),
            Self::TotalReset => f.write_str("bust, total reset"),
            Self::Eliminate => f.write_str("eliminated"),
        }
    }
}
