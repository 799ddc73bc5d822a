//! Game engine: sessions, configuration, turn order and statistics.
//!
//! This module builds the playable game on top of the [`core`](crate::core)
//! dice, sampler and scoring rules:
//!
//! - [`GameConfiguration`] - Per-game settings, validated at session creation
//! - [`FirstPlayerDraw`] - No-repeat draw that picks the starting seat
//! - [`GameSession`] - Turn state machine exposing `roll` and `hold`
//! - [`StatisticsLedger`] - Win/loss counts that outlive a session
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] from a [`GameConfiguration`]
//! 2. Run the first-player draw ([`GameSession::draw_first_player`])
//! 3. The current player rolls until they hold, bust, or reach the target
//! 4. Busts, total resets and eliminations pass the turn to the next seat
//! 5. The game ends when a player reaches the target or is the last one left
//! 6. Record the result in a [`StatisticsLedger`]
//!
//! The engine is synchronous and has no notion of time: pacing of automated
//! turns is left to the caller.
//!
//! # Example
//!
//! ```
//! use pigsty_engine::{GameConfiguration, GameMode, GameSession, StatisticsLedger};
//!
//! let mut session = GameSession::new(GameConfiguration::new(GameMode::TwoDice, 2)).unwrap();
//! session.run_first_player_draw().unwrap();
//!
//! while session.phase().is_in_progress() {
//!     session.roll().unwrap();
//!     if session.can_hold() && session.round().round_score() >= 20 {
//!         session.hold().unwrap();
//!     }
//! }
//!
//! let mut ledger = StatisticsLedger::new();
//! assert!(ledger.record_session(&session));
//! ```

pub use self::{config::*, draw::*, ledger::*, session::*};

mod config;
mod draw;
mod ledger;
mod session;
