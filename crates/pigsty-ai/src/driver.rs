//! Applying a [`TurnPolicy`] to a live session.

use pigsty_engine::{GameSession, HoldReport, InvalidOperation, RollReport, TurnChange};
use serde::{Deserialize, Serialize};

use crate::policy::{Action, DecisionContext, TurnPolicy};

/// One decision taken by the driver and what it did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
pub enum Step {
    Rolled(RollReport),
    Held(HoldReport),
}

impl Step {
    #[must_use]
    pub const fn turn(&self) -> TurnChange {
        match self {
            Self::Rolled(report) => report.turn,
            Self::Held(report) => report.turn,
        }
    }
}

/// Asks the policy for one decision for the current player and applies it.
pub fn step<P>(session: &mut GameSession, policy: &P) -> Result<Step, InvalidOperation>
where
    P: TurnPolicy + ?Sized,
{
    let ctx = DecisionContext::from_session(session);
    let action = policy.decide(&ctx);
    tracing::trace!(
        player = session.current_player().index(),
        round = ctx.round_score,
        %action,
        "policy decision"
    );
    match action {
        Action::Roll => session.roll().map(Step::Rolled),
        Action::Hold => session.hold().map(Step::Held),
    }
}

/// Plays the current player's turn until it passes or the game ends.
pub fn play_turn<P>(session: &mut GameSession, policy: &P) -> Result<Vec<Step>, InvalidOperation>
where
    P: TurnPolicy + ?Sized,
{
    let mut steps = Vec::new();
    loop {
        let taken = step(session, policy)?;
        steps.push(taken);
        if !taken.turn().is_continue() {
            return Ok(steps);
        }
    }
}

/// Plays the automated seat's turn, if it is the automated seat's turn.
///
/// Returns an empty list when a human is up or the game is not running.
pub fn play_automated_turn<P>(
    session: &mut GameSession,
    policy: &P,
) -> Result<Vec<Step>, InvalidOperation>
where
    P: TurnPolicy + ?Sized,
{
    if !session.is_automated_turn() {
        return Ok(Vec::new());
    }
    play_turn(session, policy)
}

/// Lets the policy play every seat until somebody wins.
///
/// Runs the first-player draw first if it has not happened yet. Returns the
/// winning seat.
pub fn play_to_completion<P>(session: &mut GameSession, policy: &P) -> Result<usize, InvalidOperation>
where
    P: TurnPolicy + ?Sized,
{
    if session.phase().is_awaiting_first_player_draw() {
        session.run_first_player_draw()?;
    }
    loop {
        if let Some(winner) = session.winner() {
            return Ok(winner.index());
        }
        play_turn(session, policy)?;
    }
}
