//! Automated opponent for pigsty games.
//!
//! The opponent is split into two layers:
//!
//! 1. **Policy** ([`policy`]) - A pure decision function from the visible
//!    round state to an [`Action`]. It never touches the session.
//! 2. **Driver** ([`driver`]) - Applies a policy to a [`GameSession`](pigsty_engine::GameSession),
//!    one decision at a time, until the turn changes hands or the game ends.
//!
//! # Threshold Policy
//!
//! [`ThresholdPolicy`] is a greedy, risk-averse rule with no lookahead:
//!
//! ```text
//! forced reroll pending         -> Roll
//! round score is zero           -> Roll
//! total + round >= target       -> Hold   (lock in the win)
//! round score >= mode threshold -> Hold
//! otherwise                     -> Roll
//! ```
//!
//! # Timing
//!
//! Neither layer knows about time. A front-end that wants the computer to
//! "think" sleeps between calls to [`driver::step`].
//!
//! # Example
//!
//! ```
//! use pigsty_ai::{ThresholdPolicy, driver};
//! use pigsty_engine::{GameConfiguration, GameMode, GameSession};
//!
//! let mut session = GameSession::new(GameConfiguration::new(GameMode::PigDice, 3)).unwrap();
//! let winner = driver::play_to_completion(&mut session, &ThresholdPolicy::default()).unwrap();
//! assert_eq!(session.winner().map(|p| p.index()), Some(winner));
//! ```

pub use self::policy::*;

pub mod driver;
pub mod policy;
