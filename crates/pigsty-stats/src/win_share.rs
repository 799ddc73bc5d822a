/// Win counts per seat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WinShare {
    wins: Vec<u64>,
}

impl WinShare {
    /// Creates an empty tally for `seats` seats.
    #[must_use]
    pub fn new(seats: usize) -> Self {
        Self {
            wins: vec![0; seats],
        }
    }

    /// Tallies an iterator of winning seat indices.
    ///
    /// # Panics
    ///
    /// Panics if a winner is not below `seats`.
    #[must_use]
    pub fn from_winners<I>(seats: usize, winners: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut share = Self::new(seats);
        for winner in winners {
            share.record(winner);
        }
        share
    }

    /// Counts one win for `seat`.
    ///
    /// # Panics
    ///
    /// Panics if `seat` is out of range.
    pub fn record(&mut self, seat: usize) {
        assert!(seat < self.wins.len(), "seat {seat} out of range");
        self.wins[seat] += 1;
    }

    #[must_use]
    pub fn seats(&self) -> usize {
        self.wins.len()
    }

    /// Total number of recorded games.
    #[must_use]
    pub fn games(&self) -> u64 {
        self.wins.iter().sum()
    }

    /// Wins for `seat`, zero for an unknown seat.
    #[must_use]
    pub fn wins(&self, seat: usize) -> u64 {
        self.wins.get(seat).copied().unwrap_or(0)
    }

    /// Fraction of games won by `seat`.
    ///
    /// `None` when nothing has been recorded or the seat does not exist.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fraction(&self, seat: usize) -> Option<f64> {
        let games = self.games();
        let wins = *self.wins.get(seat)?;
        (games > 0).then(|| wins as f64 / games as f64)
    }

    /// `(wins, fraction)` for every seat in order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, f64)> + '_ {
        (0..self.wins.len()).map(|seat| (self.wins[seat], self.fraction(seat).unwrap_or(0.0)))
    }
}
