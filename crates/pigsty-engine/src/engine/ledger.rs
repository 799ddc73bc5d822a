use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::session::GameSession;

/// Win/loss counts of one player across games.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub wins: u32,
    pub losses: u32,
}

impl PlayerRecord {
    #[must_use]
    pub const fn games(&self) -> u32 {
        self.wins + self.losses
    }

    /// Returns the fraction of games won, or `None` before the first game.
    #[must_use]
    pub fn win_rate(&self) -> Option<f64> {
        let games = self.games();
        (games > 0).then(|| f64::from(self.wins) / f64::from(games))
    }
}

/// Win/loss statistics keyed by a stable player identity.
///
/// The ledger is the only game data that outlives a session. It is a plain
/// key-value map; storing it is up to the caller.
///
/// # Example
///
/// ```
/// use pigsty_engine::StatisticsLedger;
///
/// let mut ledger = StatisticsLedger::new();
/// ledger.record_result("Ann", ["Ann", "Bo"]);
/// ledger.record_result("Bo", ["Ann", "Bo", "Cy"]);
///
/// assert_eq!(ledger.get_statistics("Ann").wins, 1);
/// assert_eq!(ledger.get_statistics("Ann").losses, 1);
/// assert_eq!(ledger.get_statistics("Cy").losses, 1);
/// assert_eq!(ledger.get_statistics("Dee").games(), 0);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatisticsLedger {
    records: BTreeMap<String, PlayerRecord>,
}

impl StatisticsLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record of `identity`; unknown players have an empty record.
    #[must_use]
    pub fn get_statistics(&self, identity: &str) -> PlayerRecord {
        self.records.get(identity).copied().unwrap_or_default()
    }

    /// Credits `winner` with a win and every other identity with a loss.
    ///
    /// The winner is credited even if it is missing from `all_identities`.
    pub fn record_result<I, S>(&mut self, winner: &str, all_identities: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.records.entry(winner.to_owned()).or_default().wins += 1;
        for identity in all_identities {
            let identity = identity.as_ref();
            if identity != winner {
                self.records.entry(identity.to_owned()).or_default().losses += 1;
            }
        }
    }

    /// Records the result of a finished session.
    ///
    /// Returns `false` and records nothing if the session has no winner yet.
    pub fn record_session(&mut self, session: &GameSession) -> bool {
        let Some(result) = session.result() else {
            return false;
        };
        self.record_result(&result.winner, &result.participants);
        true
    }

    /// Iterates over all records in identity order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, PlayerRecord)> + '_ {
        self.records.iter().map(|(id, record)| (id.as_str(), *record))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_result_counts() {
        let mut ledger = StatisticsLedger::new();
        ledger.record_result("Ann", ["Ann", "Bo", "Cy"]);
        ledger.record_result("Ann", ["Ann", "Bo"]);

        assert_eq!(
            ledger.get_statistics("Ann"),
            PlayerRecord { wins: 2, losses: 0 }
        );
        assert_eq!(
            ledger.get_statistics("Bo"),
            PlayerRecord { wins: 0, losses: 2 }
        );
        assert_eq!(
            ledger.get_statistics("Cy"),
            PlayerRecord { wins: 0, losses: 1 }
        );
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_winner_not_listed_is_credited() {
        let mut ledger = StatisticsLedger::new();
        ledger.record_result("Ann", ["Bo"]);
        assert_eq!(ledger.get_statistics("Ann").wins, 1);
        assert_eq!(ledger.get_statistics("Bo").losses, 1);
    }

    #[test]
    fn test_win_rate() {
        let record = PlayerRecord { wins: 3, losses: 1 };
        assert_eq!(record.games(), 4);
        assert_eq!(record.win_rate(), Some(0.75));
        assert_eq!(PlayerRecord::default().win_rate(), None);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut ledger = StatisticsLedger::new();
        ledger.record_result("Ann", ["Ann", "Bo"]);
        let json = serde_json::to_string(&ledger).unwrap();
        assert_eq!(
            json,
            r#"{"Ann":{"wins":1,"losses":0},"Bo":{"wins":0,"losses":1}}"#
        );
        let restored: StatisticsLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, ledger);
    }
}
