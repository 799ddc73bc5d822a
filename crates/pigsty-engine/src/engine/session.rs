use arrayvec::ArrayVec;
use rand::Rng as _;
use serde::{Deserialize, Serialize};

use crate::{
    ConfigError, InvalidOperation,
    core::{
        die::{Face, RollOutcome},
        sampler::{GameSeed, OutcomeSampler},
        scoring::{RollResolution, ScoringRule},
    },
};

use super::{
    config::{GameConfiguration, MAX_PLAYERS},
    draw::FirstPlayerDraw,
};

/// One seat at the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    index: usize,
    display_name: String,
    total_score: u32,
    is_eliminated: bool,
    is_automated: bool,
}

impl PlayerState {
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Stable key used by the [`StatisticsLedger`](crate::StatisticsLedger).
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.display_name
    }

    /// Banked points.
    #[must_use]
    pub const fn total_score(&self) -> u32 {
        self.total_score
    }

    #[must_use]
    pub const fn is_eliminated(&self) -> bool {
        self.is_eliminated
    }

    #[must_use]
    pub const fn is_automated(&self) -> bool {
        self.is_automated
    }
}

/// The turn in progress.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    round_score: u32,
    current_player: usize,
    must_roll_again: bool,
}

impl RoundState {
    /// Points accumulated this turn and not yet banked.
    #[must_use]
    pub const fn round_score(&self) -> u32 {
        self.round_score
    }

    #[must_use]
    pub const fn current_player(&self) -> usize {
        self.current_player
    }

    /// Set after Two Dice doubles: the player must roll before holding.
    #[must_use]
    pub const fn must_roll_again(&self) -> bool {
        self.must_roll_again
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
pub enum Phase {
    AwaitingFirstPlayerDraw,
    InProgress,
    Finished { winner: usize },
}

/// What happened to the turn after a roll or hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
pub enum TurnChange {
    /// The same player keeps rolling.
    Continue,
    /// The turn moved to the next seat still in the game.
    Passed { from: usize, to: usize },
    /// The game ended. `sole_survivor` is set when everybody else was eliminated.
    Won { winner: usize, sole_survivor: bool },
}

/// Result of one [`GameSession::draw_first_player`] step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawStep {
    pub player: usize,
    pub value: Face,
    /// Set on the last step: the seat that moves first.
    pub first_player: Option<usize>,
}

/// Result of [`GameSession::roll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollReport {
    pub outcome: RollOutcome,
    pub resolution: RollResolution,
    pub turn: TurnChange,
}

/// Result of [`GameSession::hold`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldReport {
    pub banked: u32,
    pub turn: TurnChange,
}

/// Winner and participants of a finished game, by identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: String,
    pub participants: Vec<String>,
}

/// A single game, from the first-player draw to the win.
///
/// # Lifecycle
///
/// ```text
/// AwaitingFirstPlayerDraw --draw_first_player()--> InProgress --roll()/hold()--> Finished
/// ```
///
/// Nothing leaves `Finished`; a new game needs a new session.
///
/// # Rules enforced
///
/// - A roll that brings `total + round` to the target banks the round and ends
///   the game immediately, without a hold.
/// - Busts, total resets and eliminations end the turn. The next seat that is
///   not eliminated becomes current; if only one seat is left it wins.
/// - `hold` needs a positive round score and no pending forced reroll.
///
/// Rejected calls return [`InvalidOperation`] and leave the session untouched.
///
/// # Example
///
/// ```
/// use pigsty_engine::{GameConfiguration, GameMode, GameSeed, GameSession};
///
/// let config = GameConfiguration::new(GameMode::OneDie, 2);
/// let mut session = GameSession::with_seed(config, GameSeed::from(9_u128)).unwrap();
/// session.run_first_player_draw().unwrap();
///
/// while session.phase().is_in_progress() {
///     let report = session.roll().unwrap();
///     if report.turn.is_continue() && session.round().round_score() >= 20 {
///         session.hold().unwrap();
///     }
/// }
/// assert!(session.winner().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfiguration,
    rule: &'static dyn ScoringRule,
    seed: GameSeed,
    sampler: OutcomeSampler,
    players: ArrayVec<PlayerState, MAX_PLAYERS>,
    round: RoundState,
    phase: Phase,
    draw: FirstPlayerDraw,
    last_roll: Option<RollOutcome>,
    rolls_taken: usize,
}

impl GameSession {
    /// Creates a session with a random seed.
    pub fn new(config: GameConfiguration) -> Result<Self, ConfigError> {
        Self::with_seed(config, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for a reproducible game.
    pub fn with_seed(config: GameConfiguration, seed: GameSeed) -> Result<Self, ConfigError> {
        config.validate()?;

        let automated = config.automated_seat();
        let players = config
            .display_names()
            .into_iter()
            .enumerate()
            .map(|(index, display_name)| PlayerState {
                index,
                display_name,
                total_score: 0,
                is_eliminated: false,
                is_automated: Some(index) == automated,
            })
            .collect();

        tracing::debug!(
            mode = %config.mode,
            players = config.player_count,
            target = config.target_score,
            %seed,
            "session created"
        );

        Ok(Self {
            rule: config.mode.scoring_rule(),
            draw: FirstPlayerDraw::new(config.player_count),
            config,
            seed,
            sampler: OutcomeSampler::with_seed(seed),
            players,
            round: RoundState::default(),
            phase: Phase::AwaitingFirstPlayerDraw,
            last_roll: None,
            rolls_taken: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfiguration {
        &self.config
    }

    #[must_use]
    pub fn seed(&self) -> GameSeed {
        self.seed
    }

    #[must_use]
    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    /// The player whose turn it is.
    ///
    /// Before the first-player draw completes this is seat 0.
    #[must_use]
    pub fn current_player(&self) -> &PlayerState {
        &self.players[self.round.current_player]
    }

    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The most recent roll, for rendering.
    #[must_use]
    pub fn last_roll(&self) -> Option<RollOutcome> {
        self.last_roll
    }

    /// Values drawn so far in the first-player draw, by seat.
    #[must_use]
    pub fn first_player_draws(&self) -> &[Face] {
        self.draw.draws()
    }

    /// Number of rolls taken in this game.
    #[must_use]
    pub fn rolls_taken(&self) -> usize {
        self.rolls_taken
    }

    #[must_use]
    pub fn winner(&self) -> Option<&PlayerState> {
        match self.phase {
            Phase::Finished { winner } => Some(&self.players[winner]),
            Phase::AwaitingFirstPlayerDraw | Phase::InProgress => None,
        }
    }

    /// Returns `true` when the game is running and the automated seat is up.
    #[must_use]
    pub fn is_automated_turn(&self) -> bool {
        self.phase.is_in_progress() && self.current_player().is_automated()
    }

    /// Returns `true` if [`Self::hold`] would currently be accepted.
    #[must_use]
    pub fn can_hold(&self) -> bool {
        self.ensure_playable().is_ok()
            && !self.round.must_roll_again
            && self.round.round_score > 0
    }

    /// Winner and participants once the game has finished.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        let winner = self.winner()?;
        Some(GameResult {
            winner: winner.identity().to_owned(),
            participants: self
                .players
                .iter()
                .map(|p| p.identity().to_owned())
                .collect(),
        })
    }

    /// Draws the first-player value for the next seat.
    ///
    /// After the last seat has drawn, the seat with the highest value becomes
    /// current and the game starts.
    pub fn draw_first_player(&mut self) -> Result<DrawStep, InvalidOperation> {
        if !self.phase.is_awaiting_first_player_draw() {
            return Err(InvalidOperation::DrawComplete);
        }
        let Some((player, value)) = self.draw.draw(&mut self.sampler) else {
            return Err(InvalidOperation::DrawComplete);
        };
        tracing::debug!(player, %value, "first-player draw");

        let first_player = self.draw.leader();
        if let Some(first) = first_player {
            self.round = RoundState {
                current_player: first,
                ..RoundState::default()
            };
            self.phase = Phase::InProgress;
            tracing::debug!(first, "game started");
        }
        Ok(DrawStep {
            player,
            value,
            first_player,
        })
    }

    /// Runs the remaining first-player draw steps and returns the starting seat.
    pub fn run_first_player_draw(&mut self) -> Result<usize, InvalidOperation> {
        loop {
            if let Some(first) = self.draw_first_player()?.first_player {
                return Ok(first);
            }
        }
    }

    /// Rolls for the current player and applies the result.
    pub fn roll(&mut self) -> Result<RollReport, InvalidOperation> {
        self.ensure_playable()?;
        let outcome = self
            .rule
            .roll(&mut self.sampler, &self.config.probability_table);
        Ok(self.apply_roll(outcome))
    }

    /// Banks the round score and ends the turn.
    pub fn hold(&mut self) -> Result<HoldReport, InvalidOperation> {
        self.ensure_playable()?;
        if self.round.must_roll_again {
            return Err(InvalidOperation::ForcedReroll);
        }
        if self.round.round_score == 0 {
            return Err(InvalidOperation::NothingToBank);
        }

        let current = self.round.current_player;
        let banked = self.round.round_score;
        self.round.round_score = 0;
        let player = &mut self.players[current];
        player.total_score += banked;
        tracing::debug!(player = current, banked, total = player.total_score, "hold");

        let turn = if player.total_score >= self.config.target_score {
            self.finish(current, false)
        } else {
            self.end_turn()
        };
        Ok(HoldReport { banked, turn })
    }

    fn ensure_playable(&self) -> Result<(), InvalidOperation> {
        match self.phase {
            Phase::AwaitingFirstPlayerDraw => Err(InvalidOperation::DrawPending),
            Phase::Finished { .. } => Err(InvalidOperation::GameFinished),
            Phase::InProgress if self.current_player().is_eliminated => {
                Err(InvalidOperation::PlayerEliminated)
            }
            Phase::InProgress => Ok(()),
        }
    }

    pub(crate) fn apply_roll(&mut self, outcome: RollOutcome) -> RollReport {
        let resolution = self.rule.resolve(outcome);
        let current = self.round.current_player;
        self.last_roll = Some(outcome);
        self.rolls_taken += 1;
        tracing::debug!(player = current, %outcome, %resolution, "roll");

        let turn = match resolution {
            RollResolution::Score {
                points,
                forced_reroll,
            } => {
                self.round.round_score += points;
                self.round.must_roll_again = forced_reroll;
                let player = &mut self.players[current];
                if player.total_score + self.round.round_score >= self.config.target_score {
                    player.total_score += self.round.round_score;
                    self.finish(current, false)
                } else {
                    TurnChange::Continue
                }
            }
            RollResolution::Bust => self.end_turn(),
            RollResolution::TotalReset => {
                self.players[current].total_score = 0;
                self.end_turn()
            }
            RollResolution::Eliminate => {
                self.players[current].is_eliminated = true;
                self.end_turn()
            }
        };

        RollReport {
            outcome,
            resolution,
            turn,
        }
    }

    /// Clears the round and moves to the next seat still in the game.
    fn end_turn(&mut self) -> TurnChange {
        let from = self.round.current_player;
        self.round.round_score = 0;
        self.round.must_roll_again = false;

        let mut remaining = self
            .players
            .iter()
            .filter(|p| !p.is_eliminated)
            .map(|p| p.index);
        if let (Some(survivor), None) = (remaining.next(), remaining.next()) {
            return self.finish(survivor, true);
        }

        let count = self.players.len();
        let to = (1..=count)
            .map(|step| (from + step) % count)
            .find(|&i| !self.players[i].is_eliminated)
            .unwrap_or(from);
        self.round.current_player = to;
        tracing::debug!(from, to, "turn passed");
        TurnChange::Passed { from, to }
    }

    fn finish(&mut self, winner: usize, sole_survivor: bool) -> TurnChange {
        self.round.round_score = 0;
        self.round.must_roll_again = false;
        self.round.current_player = winner;
        self.phase = Phase::Finished { winner };
        tracing::info!(
            winner = self.players[winner].display_name(),
            total = self.players[winner].total_score,
            sole_survivor,
            rolls = self.rolls_taken,
            "game finished"
        );
        TurnChange::Won {
            winner,
            sole_survivor,
        }
    }
}
