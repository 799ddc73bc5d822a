use serde::{Deserialize, Serialize};

use crate::{ProbabilityTableError, core::die::Pose};

/// Upper bound for the sum of the four named pose weights after rescaling.
///
/// Whatever is left (at least `1 - SAFETY_CEILING`) is split evenly between
/// the two side poses.
pub const SAFETY_CEILING: f64 = 0.96;

/// Tolerance used when comparing weight sums.
pub const WEIGHT_EPSILON: f64 = 1e-9;

/// Weighted landing probabilities for Pig Dice mode.
///
/// The table holds four independently tunable weights for the named poses
/// (`Razorback`, `Trotter`, `Snouter`, `LeaningJowler`) and two independent
/// special-event probabilities (`oinker`, `piggyback`). The two side poses are
/// derived:
///
/// ```text
/// w1 = w2 = (1 - (w3 + w4 + w5 + w6)) / 2
/// ```
///
/// # Invariants
///
/// A constructed table always satisfies:
///
/// - `w3 > w4 > w5 > w6 >= 0`
/// - `w1 == w2 >= 0`, and the six pose weights sum to 1
/// - `0 <= oinker`, `0 <= piggyback`, `oinker + piggyback <= 1`
///
/// If the configured named weights sum to 1 or more they are rescaled once,
/// proportionally, so that they sum to [`SAFETY_CEILING`].
///
/// The table is immutable: the `with_*` methods return a new validated table.
///
/// # Example
///
/// ```
/// use pigsty_engine::ProbabilityTable;
///
/// let table = ProbabilityTable::new([0.2, 0.1, 0.05, 0.01], 0.01, 0.005).unwrap();
/// let weights = table.pose_weights();
/// assert!((weights[0] - 0.32).abs() < 1e-9);
/// assert_eq!(weights[0], weights[1]);
///
/// // Equal named weights are rejected.
/// assert!(ProbabilityTable::new([0.1, 0.1, 0.05, 0.01], 0.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProbabilityWeights", into = "ProbabilityWeights")]
pub struct ProbabilityTable {
    named: [f64; 4],
    oinker: f64,
    piggyback: f64,
}

/// Unvalidated, serializable form of a [`ProbabilityTable`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityWeights {
    pub razorback: f64,
    pub trotter: f64,
    pub snouter: f64,
    pub leaning_jowler: f64,
    #[serde(default)]
    pub oinker: f64,
    #[serde(default)]
    pub piggyback: f64,
}

const NAMED_POSES: [Pose; 4] = [
    Pose::Razorback,
    Pose::Trotter,
    Pose::Snouter,
    Pose::LeaningJowler,
];

impl Default for ProbabilityTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ProbabilityTable {
    /// Table used when no custom weights are configured.
    pub const DEFAULT: Self = Self {
        named: [0.22, 0.09, 0.03, 0.01],
        oinker: 0.01,
        piggyback: 0.005,
    };

    /// Builds a validated table from the four named weights `[w3, w4, w5, w6]`
    /// and the two special-event probabilities.
    pub fn new(named: [f64; 4], oinker: f64, piggyback: f64) -> Result<Self, ProbabilityTableError> {
        for (weight, pose) in named.iter().zip(NAMED_POSES) {
            if !weight.is_finite() {
                return Err(ProbabilityTableError::NonFinite { pose });
            }
            if *weight < 0.0 {
                return Err(ProbabilityTableError::Negative { pose });
            }
        }

        let named = rescale(named);
        for (pair, poses) in named.windows(2).zip(NAMED_POSES.windows(2)) {
            if pair[0] <= pair[1] {
                return Err(ProbabilityTableError::NotDescending {
                    higher: poses[0],
                    lower: poses[1],
                });
            }
        }

        for (value, event) in [(oinker, "oinker"), (piggyback, "piggyback")] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ProbabilityTableError::SpecialOutOfRange { event });
            }
        }
        if oinker + piggyback > 1.0 + WEIGHT_EPSILON {
            return Err(ProbabilityTableError::SpecialSumExceedsOne);
        }

        Ok(Self {
            named,
            oinker,
            piggyback,
        })
    }

    /// Returns a new table with different named weights and the same special events.
    pub fn with_named_weights(&self, named: [f64; 4]) -> Result<Self, ProbabilityTableError> {
        Self::new(named, self.oinker, self.piggyback)
    }

    /// Returns a new table with different special-event probabilities.
    pub fn with_special_events(
        &self,
        oinker: f64,
        piggyback: f64,
    ) -> Result<Self, ProbabilityTableError> {
        Self::new(self.named, oinker, piggyback)
    }

    /// Returns the named weights `[w3, w4, w5, w6]` after any rescaling.
    #[must_use]
    pub const fn named_weights(&self) -> [f64; 4] {
        self.named
    }

    /// Returns the derived weight shared by each side pose.
    #[must_use]
    pub fn side_weight(&self) -> f64 {
        let named_sum = self.named.iter().sum::<f64>();
        ((1.0 - named_sum) / 2.0).max(0.0)
    }

    /// Returns all six pose weights in sampling order `[w1, w2, w3, w4, w5, w6]`.
    #[must_use]
    pub fn pose_weights(&self) -> [f64; Pose::LEN] {
        let side = self.side_weight();
        let [w3, w4, w5, w6] = self.named;
        [side, side, w3, w4, w5, w6]
    }

    /// Returns the weight of a single pose.
    #[must_use]
    pub fn weight_of(&self, pose: Pose) -> f64 {
        self.pose_weights()[pose.label() as usize - 1]
    }

    #[must_use]
    pub const fn oinker(&self) -> f64 {
        self.oinker
    }

    #[must_use]
    pub const fn piggyback(&self) -> f64 {
        self.piggyback
    }
}

/// Returns `true` if `named` sums to 1 or more and would be rescaled.
///
/// Sums within [`WEIGHT_EPSILON`] of 1 count as 1.
#[must_use]
pub fn needs_rescale(named: &[f64; 4]) -> bool {
    named.iter().sum::<f64>() >= 1.0 - WEIGHT_EPSILON
}

fn rescale(named: [f64; 4]) -> [f64; 4] {
    if !needs_rescale(&named) {
        return named;
    }
    let factor = SAFETY_CEILING / named.iter().sum::<f64>();
    named.map(|w| w * factor)
}

impl TryFrom<ProbabilityWeights> for ProbabilityTable {
    type Error = ProbabilityTableError;

    fn try_from(value: ProbabilityWeights) -> Result<Self, Self::Error> {
        Self::new(
            [
                value.razorback,
                value.trotter,
                value.snouter,
                value.leaning_jowler,
            ],
            value.oinker,
            value.piggyback,
        )
    }
}

impl From<ProbabilityTable> for ProbabilityWeights {
    fn from(table: ProbabilityTable) -> Self {
        let [razorback, trotter, snouter, leaning_jowler] = table.named;
        Self {
            razorback,
            trotter,
            snouter,
            leaning_jowler,
            oinker: table.oinker,
            piggyback: table.piggyback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariants(table: &ProbabilityTable) {
        let weights = table.pose_weights();
        assert!(weights[2] > weights[3]);
        assert!(weights[3] > weights[4]);
        assert!(weights[4] > weights[5]);
        assert!(weights[5] >= 0.0);
        assert!((weights[0] - weights[1]).abs() < WEIGHT_EPSILON);
        assert!(weights[0] >= 0.0);
        let sum = weights.iter().sum::<f64>();
        assert!((sum - 1.0).abs() < WEIGHT_EPSILON, "sum was {sum}");
    }

    #[test]
    fn test_default_table_is_valid() {
        let table = ProbabilityTable::default();
        assert_invariants(&table);
        assert!((table.side_weight() - 0.325).abs() < WEIGHT_EPSILON);
        assert_eq!(
            ProbabilityTable::new(table.named_weights(), table.oinker(), table.piggyback()),
            Ok(table)
        );
    }

    #[test]
    fn test_equal_named_weights_rejected() {
        let result = ProbabilityTable::new([0.1, 0.1, 0.05, 0.01], 0.0, 0.0);
        assert_eq!(
            result,
            Err(ProbabilityTableError::NotDescending {
                higher: Pose::Razorback,
                lower: Pose::Trotter,
            })
        );
    }

    #[test]
    fn test_ascending_tail_rejected() {
        let result = ProbabilityTable::new([0.3, 0.2, 0.01, 0.02], 0.0, 0.0);
        assert_eq!(
            result,
            Err(ProbabilityTableError::NotDescending {
                higher: Pose::Snouter,
                lower: Pose::LeaningJowler,
            })
        );
    }

    #[test]
    fn test_negative_and_non_finite_rejected() {
        assert_eq!(
            ProbabilityTable::new([0.3, 0.2, 0.1, -0.01], 0.0, 0.0),
            Err(ProbabilityTableError::Negative {
                pose: Pose::LeaningJowler
            })
        );
        assert_eq!(
            ProbabilityTable::new([f64::NAN, 0.2, 0.1, 0.0], 0.0, 0.0),
            Err(ProbabilityTableError::NonFinite {
                pose: Pose::Razorback
            })
        );
    }

    #[test]
    fn test_oversized_weights_rescaled_to_ceiling() {
        let table = ProbabilityTable::new([0.8, 0.4, 0.2, 0.1], 0.0, 0.0).unwrap();
        let named_sum = table.named_weights().iter().sum::<f64>();
        assert!((named_sum - SAFETY_CEILING).abs() < WEIGHT_EPSILON);
        assert!((table.side_weight() - 0.02).abs() < WEIGHT_EPSILON);
        assert_invariants(&table);

        // proportions are preserved
        let [w3, w4, _, _] = table.named_weights();
        assert!((w3 / w4 - 2.0).abs() < WEIGHT_EPSILON);
    }

    #[test]
    fn test_weights_summing_to_one_rescaled() {
        // 0.4 + 0.3 + 0.2 + 0.1 is slightly below 1.0 in f64
        let named = [0.4, 0.3, 0.2, 0.1];
        assert!(needs_rescale(&named));

        let table = ProbabilityTable::new(named, 0.0, 0.0).unwrap();
        assert!((table.side_weight() - 0.02).abs() < WEIGHT_EPSILON);
        let named_sum = table.named_weights().iter().sum::<f64>();
        assert!((named_sum - SAFETY_CEILING).abs() < WEIGHT_EPSILON);
        assert_invariants(&table);
    }

    #[test]
    fn test_small_weights_not_rescaled() {
        let named = [0.22, 0.09, 0.03, 0.01];
        assert!(!needs_rescale(&named));
        let table = ProbabilityTable::new(named, 0.0, 0.0).unwrap();
        assert_eq!(table.named_weights(), named);
    }

    #[test]
    fn test_special_events_validated() {
        let base = ProbabilityTable::default();
        assert!(base.with_special_events(0.5, 0.5).is_ok());
        assert_eq!(
            base.with_special_events(0.6, 0.5),
            Err(ProbabilityTableError::SpecialSumExceedsOne)
        );
        assert_eq!(
            base.with_special_events(-0.1, 0.0),
            Err(ProbabilityTableError::SpecialOutOfRange { event: "oinker" })
        );
        assert_eq!(
            base.with_special_events(0.0, 1.5),
            Err(ProbabilityTableError::SpecialOutOfRange { event: "piggyback" })
        );
    }

    #[test]
    fn test_with_named_weights_returns_new_table() {
        let base = ProbabilityTable::default();
        let updated = base.with_named_weights([0.3, 0.2, 0.1, 0.05]).unwrap();
        assert_eq!(base, ProbabilityTable::DEFAULT);
        assert_eq!(updated.named_weights(), [0.3, 0.2, 0.1, 0.05]);
        assert!((updated.oinker() - base.oinker()).abs() < WEIGHT_EPSILON);
        assert!((updated.weight_of(Pose::Dot) - 0.175).abs() < WEIGHT_EPSILON);
        assert_invariants(&updated);
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"razorback":0.2,"trotter":0.1,"snouter":0.05,"leaning_jowler":0.01}"#;
        let table: ProbabilityTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.named_weights(), [0.2, 0.1, 0.05, 0.01]);
        assert!(table.oinker().abs() < WEIGHT_EPSILON);

        let json = r#"{"razorback":0.1,"trotter":0.1,"snouter":0.05,"leaning_jowler":0.01}"#;
        let err = serde_json::from_str::<ProbabilityTable>(json).unwrap_err();
        assert!(err.to_string().contains("strictly greater"));
    }
}
