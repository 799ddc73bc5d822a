//! Summaries of simulated pigsty games.
//!
//! - [`descriptive`]: Count, range, mean, median and spread of integer samples
//!   such as turns per game or rolls per game
//! - [`win_share`]: How often each seat won
//!
//! # Examples
//!
//! ```
//! use pigsty_stats::{descriptive::Summary, win_share::WinShare};
//!
//! let turns = [12, 9, 15, 9, 20];
//! let summary = Summary::new(turns).unwrap();
//! assert_eq!(summary.median, 12);
//!
//! let share = WinShare::from_winners(2, [0, 1, 0, 0]);
//! assert_eq!(share.wins(0), 3);
//! assert_eq!(share.fraction(1), Some(0.25));
//! ```

pub mod descriptive;
pub mod win_share;
