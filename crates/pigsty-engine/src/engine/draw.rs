use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::core::{die::Face, sampler::OutcomeSampler};

use super::config::MAX_PLAYERS;

/// No-repeat draw that decides who starts.
///
/// Seats draw in index order from a pool holding the six die faces. Each drawn
/// face is removed from the pool, so no two seats can draw the same value and
/// the highest value is always unique. That seat moves first.
///
/// # Example
///
/// ```
/// use pigsty_engine::{FirstPlayerDraw, GameSeed, OutcomeSampler};
///
/// let mut sampler = OutcomeSampler::with_seed(GameSeed::from(1_u128));
/// let mut draw = FirstPlayerDraw::new(3);
/// while draw.draw(&mut sampler).is_some() {}
///
/// let leader = draw.leader().unwrap();
/// assert!(draw.draws().iter().all(|face| *face <= draw.draws()[leader]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstPlayerDraw {
    player_count: usize,
    pool: ArrayVec<Face, { Face::LEN }>,
    draws: ArrayVec<Face, MAX_PLAYERS>,
}

impl FirstPlayerDraw {
    /// Creates a draw for `player_count` seats with a full pool.
    ///
    /// # Panics
    ///
    /// Panics if `player_count` exceeds [`MAX_PLAYERS`].
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        assert!(player_count <= MAX_PLAYERS, "too many players for one draw");
        Self {
            player_count,
            pool: Face::ALL.into_iter().collect(),
            draws: ArrayVec::new(),
        }
    }

    /// Seat that draws next, or `None` when everyone has drawn.
    #[must_use]
    pub fn next_player(&self) -> Option<usize> {
        (!self.is_complete()).then_some(self.draws.len())
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.draws.len() == self.player_count
    }

    /// Values drawn so far, by seat.
    #[must_use]
    pub fn draws(&self) -> &[Face] {
        &self.draws
    }

    /// Draws for the next seat and returns `(seat, face)`.
    ///
    /// Returns `None` once every seat has drawn.
    pub fn draw(&mut self, sampler: &mut OutcomeSampler) -> Option<(usize, Face)> {
        let player = self.next_player()?;
        let face = sampler.draw_from_pool(&mut self.pool)?;
        self.draws.push(face);
        Some((player, face))
    }

    /// Seat holding the highest drawn value, once the draw is complete.
    #[must_use]
    pub fn leader(&self) -> Option<usize> {
        if !self.is_complete() {
            return None;
        }
        self.draws
            .iter()
            .enumerate()
            .max_by_key(|(_, face)| **face)
            .map(|(i, _)| i)
    }
}
