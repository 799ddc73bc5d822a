use std::fmt;

use serde::{Deserialize, Serialize};

/// A face of a standard six-sided die.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{}", self.value())]
pub enum Face {
    One = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
}

impl Face {
    pub const LEN: usize = 6;

    /// All faces in ascending order.
    pub const ALL: [Self; Self::LEN] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
    ];

    /// Returns the pip count of this face (1-6).
    #[must_use]
    pub const fn value(self) -> u32 {
        self as u32
    }

    /// Converts a pip count into a face.
    ///
    /// Returns `None` if `value` is not in `1..=6`.
    #[must_use]
    pub const fn from_value(value: u32) -> Option<Self> {
        match value {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            4 => Some(Self::Four),
            5 => Some(Self::Five),
            6 => Some(Self::Six),
            _ => None,
        }
    }

    /// Converts a zero-based sampling bucket into a face.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 6 or larger.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index]
    }
}

/// Landing position of a pig in Pig Dice mode.
///
/// Variants are declared in sampling order: the two side poses first (their
/// weights are derived), then the four named poses from most to least likely.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Pose {
    #[display("dot side")]
    Dot = 1,
    #[display("no-dot side")]
    NoDot,
    #[display("razorback")]
    Razorback,
    #[display("trotter")]
    Trotter,
    #[display("snouter")]
    Snouter,
    #[display("leaning jowler")]
    LeaningJowler,
}

impl Pose {
    pub const LEN: usize = 6;

    pub const ALL: [Self; Self::LEN] = [
        Self::Dot,
        Self::NoDot,
        Self::Razorback,
        Self::Trotter,
        Self::Snouter,
        Self::LeaningJowler,
    ];

    /// Returns the 1-based label of this pose.
    #[must_use]
    pub const fn label(self) -> u32 {
        self as u32
    }

    /// Returns `true` for the two side poses (`Dot` and `NoDot`).
    #[must_use]
    pub const fn is_side(self) -> bool {
        matches!(self, Self::Dot | Self::NoDot)
    }

    /// Converts a zero-based sampling bucket into a pose.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 6 or larger.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index]
    }
}

/// Special Pig Dice events checked before any pose is sampled.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum SpecialEvent {
    /// The pigs touch: the roller's banked total is wiped.
    #[display("oinker")]
    Oinker,
    /// One pig lands on the other: the roller is eliminated.
    #[display("piggyback")]
    Piggyback,
}

/// Result of one Pig Dice throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
pub enum PigRoll {
    Poses(Pose, Pose),
    Oinker,
    Piggyback,
}

impl From<SpecialEvent> for PigRoll {
    fn from(event: SpecialEvent) -> Self {
        match event {
            SpecialEvent::Oinker => Self::Oinker,
            SpecialEvent::Piggyback => Self::Piggyback,
        }
    }
}

/// What was thrown on a single roll, tagged by game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollOutcome {
    OneDie(Face),
    TwoDice(Face, Face),
    PigDice(PigRoll),
}

impl fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneDie(face) => write!(f, "{face}"),
            Self::TwoDice(a, b) => write!(f, "{a} + {b}"),
            Self::PigDice(PigRoll::Poses(a, b)) => write!(f, "{a} / {b}"),
            Self::PigDice(PigRoll::Oinker) => write!(f, "{}", SpecialEvent::Oinker),
            Self::PigDice(PigRoll::Piggyback) => write!(f, "{}", SpecialEvent::Piggyback),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_value_roundtrip() {
        for face in Face::ALL {
            assert_eq!(Face::from_value(face.value()), Some(face));
        }
        assert_eq!(Face::from_value(0), None);
        assert_eq!(Face::from_value(7), None);
    }

    #[test]
    fn test_pose_order_matches_labels() {
        for (i, pose) in Pose::ALL.iter().enumerate() {
            assert_eq!(pose.label() as usize, i + 1);
            assert_eq!(Pose::from_index(i), *pose);
        }
        assert!(Pose::Dot.is_side());
        assert!(Pose::NoDot.is_side());
        assert!(!Pose::Razorback.is_side());
    }

    #[test]
    fn test_face_displays_pip_count() {
        let shown = Face::ALL.map(|face| face.to_string());
        assert_eq!(shown, ["1", "2", "3", "4", "5", "6"]);
        assert_eq!(format!("rolled {}", Face::Five), "rolled 5");
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(RollOutcome::TwoDice(Face::Four, Face::Two).to_string(), "4 + 2");
        assert_eq!(
            RollOutcome::PigDice(PigRoll::Poses(Pose::Snouter, Pose::Dot)).to_string(),
            "snouter / dot side"
        );
        assert_eq!(RollOutcome::PigDice(PigRoll::Oinker).to_string(), "oinker");
    }
}
