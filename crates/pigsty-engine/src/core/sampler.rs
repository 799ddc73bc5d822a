use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{
    die::{Face, Pose, SpecialEvent},
    probability::ProbabilityTable,
};

/// Six equal weights; numeric dice are the degenerate case of the weighted sampler.
pub const UNIFORM_WEIGHTS: [f64; 6] = [1.0 / 6.0; 6];

/// Draws die faces, pig poses and special events from one seeded generator.
///
/// Every random decision of a game goes through a single [`OutcomeSampler`],
/// so a game is fully reproducible from its [`GameSeed`].
///
/// # Weighted sampling
///
/// Weights are turned into cumulative cut-points on every call, a uniform
/// `r` in `[0, 1)` is drawn, and the first bucket whose cumulative upper bound
/// exceeds `r` is returned. Nothing is cached, so a new table takes effect on
/// the next draw.
///
/// # Example
///
/// ```
/// use pigsty_engine::{GameSeed, OutcomeSampler};
///
/// let seed = GameSeed::from(0x1234_u128);
/// let mut a = OutcomeSampler::with_seed(seed);
/// let mut b = OutcomeSampler::with_seed(seed);
/// for _ in 0..10 {
///     assert_eq!(a.roll_face(), b.roll_face());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct OutcomeSampler {
    rng: Pcg32,
}

impl Default for OutcomeSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeSampler {
    /// Creates a sampler with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic games.
    #[must_use]
    pub fn with_seed(seed: GameSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Draws a uniform real in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Draws a zero-based bucket index from six weights.
    pub fn sample_weighted(&mut self, weights: &[f64; 6]) -> usize {
        let r = self.uniform();
        pick_bucket(weights, r)
    }

    /// Rolls a fair six-sided die.
    pub fn roll_face(&mut self) -> Face {
        Face::from_index(self.sample_weighted(&UNIFORM_WEIGHTS))
    }

    /// Throws one pig according to the table's six pose weights.
    pub fn roll_pose(&mut self, table: &ProbabilityTable) -> Pose {
        Pose::from_index(self.sample_weighted(&table.pose_weights()))
    }

    /// Runs the special-event pre-check for a Pig Dice throw.
    ///
    /// A single uniform draw `r` resolves to an oinker when `r < oinker`, to a
    /// piggyback when `r < oinker + piggyback`, and to no event otherwise.
    pub fn special_event(&mut self, table: &ProbabilityTable) -> Option<SpecialEvent> {
        let r = self.uniform();
        if r < table.oinker() {
            Some(SpecialEvent::Oinker)
        } else if r < table.oinker() + table.piggyback() {
            Some(SpecialEvent::Piggyback)
        } else {
            None
        }
    }

    /// Removes and returns a uniformly chosen element of `pool`.
    ///
    /// Returns `None` if the pool is empty.
    pub fn draw_from_pool<T, const N: usize>(&mut self, pool: &mut ArrayVec<T, N>) -> Option<T> {
        if pool.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..pool.len());
        Some(pool.remove(index))
    }
}

/// Returns the first bucket whose cumulative upper bound exceeds `r`.
///
/// If rounding leaves `r` above the last cut-point, the last bucket with a
/// positive weight is returned.
#[must_use]
pub fn pick_bucket(weights: &[f64; 6], r: f64) -> usize {
    let mut upper = 0.0;
    for (i, weight) in weights.iter().enumerate() {
        upper += weight;
        if r < upper {
            return i;
        }
    }
    weights
        .iter()
        .rposition(|w| *w > 0.0)
        .unwrap_or(weights.len() - 1)
}

/// Seed for deterministic games.
///
/// A 128-bit seed that initializes the [`OutcomeSampler`]. It serializes as a
/// 32-character hex string so that a game can be recorded and replayed.
///
/// ```
/// use pigsty_engine::GameSeed;
/// use rand::Rng as _;
///
/// let seed: GameSeed = rand::rng().random();
/// let parsed: GameSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSeed([u8; 16]);

impl From<[u8; 16]> for GameSeed {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl From<u128> for GameSeed {
    fn from(value: u128) -> Self {
        Self(value.to_be_bytes())
    }
}

impl From<GameSeed> for u128 {
    fn from(seed: GameSeed) -> Self {
        Self::from_be_bytes(seed.0)
    }
}

impl fmt::Display for GameSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from(*self))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex: {input} ({reason})")]
pub struct ParseSeedError {
    input: String,
    reason: String,
}

impl FromStr for GameSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError {
                input: s.to_owned(),
                reason: format!("expected 32 characters, got {}", s.len()),
            });
        }
        let num = u128::from_str_radix(s, 16).map_err(|e| ParseSeedError {
            input: s.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self::from(num))
    }
}

impl Serialize for GameSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GameSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<GameSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GameSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        GameSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_bucket_cut_points() {
        let weights = [0.1, 0.2, 0.3, 0.2, 0.15, 0.05];
        assert_eq!(pick_bucket(&weights, 0.0), 0);
        assert_eq!(pick_bucket(&weights, 0.099), 0);
        assert_eq!(pick_bucket(&weights, 0.1), 1);
        assert_eq!(pick_bucket(&weights, 0.35), 2);
        assert_eq!(pick_bucket(&weights, 0.61), 3);
        assert_eq!(pick_bucket(&weights, 0.85), 4);
        assert_eq!(pick_bucket(&weights, 0.97), 5);
    }

    #[test]
    fn test_pick_bucket_skips_zero_weights() {
        let weights = [0.0, 0.5, 0.0, 0.5, 0.0, 0.0];
        assert_eq!(pick_bucket(&weights, 0.2), 1);
        assert_eq!(pick_bucket(&weights, 0.7), 3);
        // rounding overflow falls back to the last populated bucket
        assert_eq!(pick_bucket(&weights, 1.0), 3);
    }

    #[test]
    fn test_roll_face_covers_all_faces() {
        let mut sampler = OutcomeSampler::with_seed(GameSeed::from(42_u128));
        let mut seen = [false; 6];
        for _ in 0..600 {
            let face = sampler.roll_face();
            seen[face.value() as usize - 1] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_special_event_thresholds() {
        let always_oinker = ProbabilityTable::default()
            .with_special_events(1.0, 0.0)
            .unwrap();
        let always_piggyback = ProbabilityTable::default()
            .with_special_events(0.0, 1.0)
            .unwrap();
        let never = ProbabilityTable::default()
            .with_special_events(0.0, 0.0)
            .unwrap();
        let mut sampler = OutcomeSampler::with_seed(GameSeed::from(7_u128));
        for _ in 0..50 {
            assert_eq!(
                sampler.special_event(&always_oinker),
                Some(SpecialEvent::Oinker)
            );
            assert_eq!(
                sampler.special_event(&always_piggyback),
                Some(SpecialEvent::Piggyback)
            );
            assert_eq!(sampler.special_event(&never), None);
        }
    }

    #[test]
    #[expect(clippy::cast_precision_loss)]
    fn test_roll_pose_follows_weights() {
        let table = ProbabilityTable::default();
        let mut sampler = OutcomeSampler::with_seed(GameSeed::from(0xDEAD_BEEF_u128));
        let mut counts = [0_usize; 6];
        let trials = 20_000;
        for _ in 0..trials {
            counts[sampler.roll_pose(&table).label() as usize - 1] += 1;
        }
        for (count, weight) in counts.iter().zip(table.pose_weights()) {
            let observed = *count as f64 / f64::from(trials);
            assert!(
                (observed - weight).abs() < 0.02,
                "observed {observed}, expected {weight}"
            );
        }
    }

    #[test]
    fn test_draw_from_pool_without_replacement() {
        let mut sampler = OutcomeSampler::with_seed(GameSeed::from(99_u128));
        let mut pool: ArrayVec<u32, 6> = (1..=6).collect();
        let mut drawn = (0..6)
            .map(|_| sampler.draw_from_pool(&mut pool).unwrap())
            .collect::<Vec<_>>();
        assert!(pool.is_empty());
        assert_eq!(sampler.draw_from_pool(&mut pool), None);
        drawn.sort_unstable();
        assert_eq!(drawn, vec![1, 2, 3, 4, 5, 6]);
    }

    mod game_seed_serialization {
        use super::*;

        #[test]
        fn test_known_value_sequential_bytes() {
            let seed = GameSeed::from([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
                0x32, 0x10,
            ]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");

            let deserialized: GameSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(deserialized, seed);
        }

        #[test]
        fn test_deserialize_uppercase_hex() {
            let json = "\"0000000000000000000000000000ABCD\"";
            let deserialized: GameSeed = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, GameSeed::from(0xABCD_u128));
        }

        #[test]
        fn test_error_wrong_length() {
            let result: Result<GameSeed, _> = serde_json::from_str("\"0123\"");
            let err_msg = result.unwrap_err().to_string();
            assert!(err_msg.contains("invalid hex"));
        }

        #[test]
        fn test_error_invalid_hex_characters() {
            let result = "ghijklmnopqrstuvwxyzghijklmnopqr".parse::<GameSeed>();
            assert!(result.is_err());
        }

        #[test]
        fn test_same_seed_same_rolls() {
            let seed: GameSeed = rand::rng().random();
            let restored: GameSeed = serde_json::from_str(&serde_json::to_string(&seed).unwrap())
                .unwrap();
            let mut a = OutcomeSampler::with_seed(seed);
            let mut b = OutcomeSampler::with_seed(restored);
            for _ in 0..20 {
                assert_eq!(a.roll_face(), b.roll_face());
            }
        }
    }
}
