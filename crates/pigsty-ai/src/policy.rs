use pigsty_engine::{GameMode, GameSession};
use serde::{Deserialize, Serialize};

/// What the automated player does next.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
    derive_more::IsVariant,
)]
pub enum Action {
    #[display("roll")]
    Roll,
    #[display("hold")]
    Hold,
}

/// Round score at which the automated player holds, per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyThresholds {
    pub one_die: u32,
    pub two_dice: u32,
    pub pig_dice: u32,
}

impl Default for PolicyThresholds {
    fn default() -> Self {
        Self {
            one_die: 15,
            two_dice: 20,
            pig_dice: 20,
        }
    }
}

impl PolicyThresholds {
    #[must_use]
    pub const fn for_mode(&self, mode: GameMode) -> u32 {
        match mode {
            GameMode::OneDie => self.one_die,
            GameMode::TwoDice => self.two_dice,
            GameMode::PigDice => self.pig_dice,
        }
    }
}

/// Everything a policy may look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionContext {
    pub mode: GameMode,
    pub round_score: u32,
    pub total_score: u32,
    pub target_score: u32,
    pub must_roll_again: bool,
}

impl DecisionContext {
    /// Captures the current player's view of the session.
    #[must_use]
    pub fn from_session(session: &GameSession) -> Self {
        let round = session.round();
        Self {
            mode: session.config().mode,
            round_score: round.round_score(),
            total_score: session.current_player().total_score(),
            target_score: session.config().target_score,
            must_roll_again: round.must_roll_again(),
        }
    }
}

/// Chooses between rolling and holding.
pub trait TurnPolicy {
    fn decide(&self, ctx: &DecisionContext) -> Action;
}

/// Holds once the round score reaches a per-mode threshold.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdPolicy {
    thresholds: PolicyThresholds,
}

impl ThresholdPolicy {
    #[must_use]
    pub const fn new(thresholds: PolicyThresholds) -> Self {
        Self { thresholds }
    }

    #[must_use]
    pub const fn thresholds(&self) -> &PolicyThresholds {
        &self.thresholds
    }
}

impl TurnPolicy for ThresholdPolicy {
    fn decide(&self, ctx: &DecisionContext) -> Action {
        decide(ctx, &self.thresholds)
    }
}

/// The threshold rule as a free function.
///
/// # Example
///
/// ```
/// use pigsty_ai::{Action, DecisionContext, PolicyThresholds, decide};
/// use pigsty_engine::GameMode;
///
/// let ctx = DecisionContext {
///     mode: GameMode::OneDie,
///     round_score: 12,
///     total_score: 90,
///     target_score: 100,
///     must_roll_again: false,
/// };
/// assert_eq!(decide(&ctx, &PolicyThresholds::default()), Action::Roll);
/// ```
#[must_use]
pub fn decide(ctx: &DecisionContext, thresholds: &PolicyThresholds) -> Action {
    if ctx.must_roll_again || ctx.round_score == 0 {
        return Action::Roll;
    }
    if ctx.total_score + ctx.round_score >= ctx.target_score {
        return Action::Hold;
    }
    if ctx.round_score >= thresholds.for_mode(ctx.mode) {
        return Action::Hold;
    }
    Action::Roll
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(mode: GameMode, round_score: u32, total_score: u32) -> DecisionContext {
        DecisionContext {
            mode,
            round_score,
            total_score,
            target_score: 100,
            must_roll_again: false,
        }
    }

    #[test]
    fn test_forced_reroll_always_rolls() {
        let thresholds = PolicyThresholds::default();
        let forced = DecisionContext {
            must_roll_again: true,
            ..ctx(GameMode::TwoDice, 50, 90)
        };
        assert_eq!(decide(&forced, &thresholds), Action::Roll);
    }

    #[test]
    fn test_zero_round_rolls() {
        let thresholds = PolicyThresholds {
            one_die: 0,
            ..PolicyThresholds::default()
        };
        assert_eq!(decide(&ctx(GameMode::OneDie, 0, 10), &thresholds), Action::Roll);
    }

    #[test]
    fn test_holds_when_winning() {
        let thresholds = PolicyThresholds::default();
        assert_eq!(decide(&ctx(GameMode::PigDice, 5, 95), &thresholds), Action::Hold);
        assert_eq!(decide(&ctx(GameMode::PigDice, 5, 94), &thresholds), Action::Roll);
    }

    #[test]
    fn test_mode_thresholds() {
        let thresholds = PolicyThresholds::default();
        assert_eq!(decide(&ctx(GameMode::OneDie, 14, 0), &thresholds), Action::Roll);
        assert_eq!(decide(&ctx(GameMode::OneDie, 15, 0), &thresholds), Action::Hold);
        assert_eq!(decide(&ctx(GameMode::TwoDice, 19, 0), &thresholds), Action::Roll);
        assert_eq!(decide(&ctx(GameMode::TwoDice, 20, 0), &thresholds), Action::Hold);
        assert_eq!(decide(&ctx(GameMode::PigDice, 25, 0), &thresholds), Action::Hold);
    }

    #[test]
    fn test_policy_delegates_to_thresholds() {
        let policy = ThresholdPolicy::new(PolicyThresholds {
            one_die: 6,
            two_dice: 6,
            pig_dice: 6,
        });
        assert_eq!(policy.decide(&ctx(GameMode::OneDie, 6, 0)), Action::Hold);
        assert_eq!(policy.decide(&ctx(GameMode::OneDie, 5, 0)), Action::Roll);
    }

    #[test]
    fn test_thresholds_deserialize_with_defaults() {
        let thresholds: PolicyThresholds = serde_json::from_str(r#"{"pig_dice":30}"#).unwrap();
        assert_eq!(
            thresholds,
            PolicyThresholds {
                one_die: 15,
                two_dice: 20,
                pig_dice: 30,
            }
        );
    }

    #[test]
    fn test_action_from_str() {
        assert_eq!("Roll".parse::<Action>().unwrap(), Action::Roll);
        assert_eq!(Action::Hold.to_string(), "hold");
    }
}
