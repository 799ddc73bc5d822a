use pigsty_ai::PolicyThresholds;
use pigsty_engine::GameConfiguration;
use serde::{Deserialize, Serialize};

/// Contents of a `--settings` file. Every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Game configuration before command-line overrides
    pub game: GameConfiguration,
    /// Round scores at which the computer holds
    pub thresholds: PolicyThresholds,
}

#[cfg(test)]
mod tests {
    use pigsty_engine::GameMode;

    use super::*;

    #[test]
    fn test_empty_settings_use_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_settings() {
        let json = r#"{
            "game": { "mode": "PigDice", "player_count": 3 },
            "thresholds": { "pig_dice": 25 }
        }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.game.mode, GameMode::PigDice);
        assert_eq!(settings.game.player_count, 3);
        assert_eq!(settings.thresholds.pig_dice, 25);
        assert_eq!(settings.thresholds.one_die, 15);
    }

    #[test]
    fn test_invalid_probability_table_rejected() {
        let json = r#"{
            "game": {
                "probability_table": {
                    "razorback": 0.05, "trotter": 0.1, "snouter": 0.2, "leaning_jowler": 0.3
                }
            }
        }"#;
        assert!(serde_json::from_str::<Settings>(json).is_err());
    }
}
