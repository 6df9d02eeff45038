//! Pairing - the output of one round

use serde::{Deserialize, Serialize};

use crate::error::PairingWarning;

/// One board of a round, or a bye
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pairing {
    Game { white: usize, black: usize },
    /// Full-point bye
    Bye { player: usize },
}

impl Pairing {
    /// Players involved, white first
    pub fn players(&self) -> Vec<usize> {
        match *self {
            Pairing::Game { white, black } => vec![white, black],
            Pairing::Bye { player } => vec![player],
        }
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Pairing::Bye { .. })
    }
}

/// Pairings of one round
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundPairings {
    /// Round number (1-based)
    pub round: u32,
    /// Games in board order, followed by the bye if any
    pub pairings: Vec<Pairing>,
    /// Ambiguities resolved while pairing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<PairingWarning>,
}

impl RoundPairings {
    /// (white, black) of every game
    pub fn games(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pairings.iter().filter_map(|p| match *p {
            Pairing::Game { white, black } => Some((white, black)),
            Pairing::Bye { .. } => None,
        })
    }

    /// Player receiving the bye
    pub fn bye(&self) -> Option<usize> {
        self.pairings.iter().find_map(|p| match *p {
            Pairing::Bye { player } => Some(player),
            Pairing::Game { .. } => None,
        })
    }

    /// Whether every player in 0..n appears exactly once
    pub fn covers_exactly(&self, n: usize) -> bool {
        let mut seen = vec![false; n];
        for player in self.pairings.iter().flat_map(|p| p.players()) {
            if player >= n || seen[player] {
                return false;
            }
            seen[player] = true;
        }
        seen.into_iter().all(|s| s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RoundPairings {
        RoundPairings {
            round: 3,
            pairings: vec![
                Pairing::Game { white: 2, black: 0 },
                Pairing::Game { white: 1, black: 3 },
                Pairing::Bye { player: 4 },
            ],
            warnings: vec![],
        }
    }

    #[test]
    fn test_games_and_bye() {
        let round = sample();
        assert_eq!(round.games().collect::<Vec<_>>(), vec![(2, 0), (1, 3)]);
        assert_eq!(round.bye(), Some(4));
        assert!(round.pairings[2].is_bye());
    }

    #[test]
    fn test_covers_exactly() {
        let round = sample();
        assert!(round.covers_exactly(5));
        assert!(!round.covers_exactly(6));
        assert!(!round.covers_exactly(4));

        let mut duplicated = sample();
        duplicated.pairings.push(Pairing::Bye { player: 0 });
        assert!(!duplicated.covers_exactly(5));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&Pairing::Game { white: 1, black: 2 }).unwrap();
        assert_eq!(json, r#"{"Game":{"white":1,"black":2}}"#);
    }
}
