use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::{
    ConfigError,
    core::{probability::ProbabilityTable, scoring::GameMode},
};

pub const MAX_PLAYERS: usize = 4;
pub const PLAYER_COUNT_RANGE: RangeInclusive<usize> = 2..=MAX_PLAYERS;
pub const TARGET_SCORE_RANGE: RangeInclusive<u32> = 10..=300;
pub const DEFAULT_TARGET_SCORE: u32 = 100;

const AUTOMATED_NAME: &str = "Computer";

/// Clamps user input into [`TARGET_SCORE_RANGE`].
#[must_use]
pub fn clamp_target_score(value: u32) -> u32 {
    value.clamp(*TARGET_SCORE_RANGE.start(), *TARGET_SCORE_RANGE.end())
}

/// Settings fixed for the lifetime of one game.
///
/// This is plain data: it can be loaded from a settings file and is only
/// checked when a [`GameSession`](crate::GameSession) is created from it.
///
/// When `versus_automated` is set, the last seat is played by the computer.
/// The `probability_table` is only used in [`GameMode::PigDice`].
///
/// # Example
///
/// ```
/// use pigsty_engine::{GameConfiguration, GameMode};
///
/// let config = GameConfiguration {
///     target_score: 50,
///     versus_automated: true,
///     ..GameConfiguration::new(GameMode::TwoDice, 3)
/// };
/// assert!(config.validate().is_ok());
/// assert_eq!(config.automated_seat(), Some(2));
/// assert_eq!(config.display_names(), ["Player 1", "Player 2", "Computer"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfiguration {
    pub player_count: usize,
    pub mode: GameMode,
    pub versus_automated: bool,
    pub target_score: u32,
    pub probability_table: ProbabilityTable,
    /// Display names by seat. Generated when absent.
    pub player_names: Option<Vec<String>>,
}

impl Default for GameConfiguration {
    fn default() -> Self {
        Self::new(GameMode::default(), *PLAYER_COUNT_RANGE.start())
    }
}

impl GameConfiguration {
    #[must_use]
    pub fn new(mode: GameMode, player_count: usize) -> Self {
        Self {
            player_count,
            mode,
            versus_automated: false,
            target_score: DEFAULT_TARGET_SCORE,
            probability_table: ProbabilityTable::default(),
            player_names: None,
        }
    }

    /// Checks every setting against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !PLAYER_COUNT_RANGE.contains(&self.player_count) {
            return Err(ConfigError::PlayerCount {
                count: self.player_count,
            });
        }
        if !TARGET_SCORE_RANGE.contains(&self.target_score) {
            return Err(ConfigError::TargetScore {
                target: self.target_score,
            });
        }
        if let Some(names) = &self.player_names {
            if names.len() != self.player_count {
                return Err(ConfigError::PlayerNames {
                    reason: "one name per player is required",
                });
            }
            if names.iter().any(|name| name.trim().is_empty()) {
                return Err(ConfigError::PlayerNames {
                    reason: "names must not be empty",
                });
            }
            for (i, name) in names.iter().enumerate() {
                if names[..i].contains(name) {
                    return Err(ConfigError::PlayerNames {
                        reason: "names must be unique",
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns the seat played by the computer, if any.
    #[must_use]
    pub fn automated_seat(&self) -> Option<usize> {
        self.versus_automated
            .then(|| self.player_count.saturating_sub(1))
    }

    /// Returns the display name of every seat.
    ///
    /// Configured names are used as-is; otherwise seats are named
    /// `Player 1`, `Player 2`, ... and the automated seat is `Computer`.
    #[must_use]
    pub fn display_names(&self) -> Vec<String> {
        if let Some(names) = &self.player_names {
            return names.clone();
        }
        let automated = self.automated_seat();
        (0..self.player_count)
            .map(|i| {
                if Some(i) == automated {
                    AUTOMATED_NAME.to_owned()
                } else {
                    format!("Player {}", i + 1)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfiguration::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.player_count, 2);
        assert_eq!(config.target_score, DEFAULT_TARGET_SCORE);
        assert_eq!(config.automated_seat(), None);
    }

    #[test]
    fn test_player_count_range() {
        for count in [0, 1, 5, 6] {
            let config = GameConfiguration::new(GameMode::OneDie, count);
            assert_eq!(config.validate(), Err(ConfigError::PlayerCount { count }));
        }
        for count in PLAYER_COUNT_RANGE {
            assert!(GameConfiguration::new(GameMode::OneDie, count).validate().is_ok());
        }
    }

    #[test]
    fn test_target_score_range() {
        for target in [0, 9, 301] {
            let config = GameConfiguration {
                target_score: target,
                ..GameConfiguration::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::TargetScore { target }));
        }
        assert_eq!(clamp_target_score(5), 10);
        assert_eq!(clamp_target_score(120), 120);
        assert_eq!(clamp_target_score(1000), 300);
    }

    #[test]
    fn test_player_names_checked() {
        let with_names = |names: &[&str]| GameConfiguration {
            player_names: Some(names.iter().map(ToString::to_string).collect()),
            ..GameConfiguration::default()
        };
        assert!(with_names(&["Ann", "Bo"]).validate().is_ok());
        assert!(matches!(
            with_names(&["Ann"]).validate(),
            Err(ConfigError::PlayerNames { .. })
        ));
        assert!(matches!(
            with_names(&["Ann", " "]).validate(),
            Err(ConfigError::PlayerNames { .. })
        ));
        assert!(matches!(
            with_names(&["Ann", "Ann"]).validate(),
            Err(ConfigError::PlayerNames { .. })
        ));
    }

    #[test]
    fn test_generated_names() {
        let config = GameConfiguration::new(GameMode::PigDice, 4);
        assert_eq!(
            config.display_names(),
            ["Player 1", "Player 2", "Player 3", "Player 4"]
        );
    }

    #[test]
    fn test_deserialize_partial_settings() {
        let json = r#"{"mode":"PigDice","target_score":60,"probability_table":{"razorback":0.3,"trotter":0.2,"snouter":0.1,"leaning_jowler":0.05,"oinker":0.02}}"#;
        let config: GameConfiguration = serde_json::from_str(json).unwrap();
        assert_eq!(config.mode, GameMode::PigDice);
        assert_eq!(config.player_count, 2);
        assert_eq!(config.target_score, 60);
        assert_eq!(
            config.probability_table.named_weights(),
            [0.3, 0.2, 0.1, 0.05]
        );
    }

    #[test]
    fn test_deserialize_rejects_bad_table() {
        let json = r#"{"probability_table":{"razorback":0.1,"trotter":0.1,"snouter":0.05,"leaning_jowler":0.01}}"#;
        assert!(serde_json::from_str::<GameConfiguration>(json).is_err());
    }
}
