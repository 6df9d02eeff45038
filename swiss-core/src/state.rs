//! Round state - validated, immutable input of one pairing invocation

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{PairingError, Result};
use crate::ranking::{color_differences, current_ranks, score_group_sizes};

/// Raw round input as supplied by the operator
///
/// Counts are signed so that negative values can be reported as shape errors
/// rather than rejected by the parser.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundInput {
    /// Number of players
    pub players: i64,
    /// Round being paired (1-based)
    pub round: u32,
    /// Seed of each player
    pub seeds: Vec<i64>,
    /// Cumulative score of each player (continuation rounds)
    #[serde(default)]
    pub scores: Vec<f64>,
    /// Games played with white (continuation rounds)
    #[serde(default)]
    pub whites: Vec<i64>,
    /// Games played with black (continuation rounds)
    #[serde(default)]
    pub blacks: Vec<i64>,
    /// Prior games as player index pairs
    #[serde(default)]
    pub history: Vec<(usize, usize)>,
}

impl RoundInput {
    /// First-round input: seeds only
    pub fn initial(seeds: Vec<i64>) -> Self {
        Self {
            players: seeds.len() as i64,
            round: 1,
            seeds,
            ..Default::default()
        }
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Whether this round is paired from seeds alone
    pub fn is_initial(&self) -> bool {
        self.round == 1
    }
}

/// Unordered set of games already played
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PriorPairingSet {
    pairs: FxHashSet<(usize, usize)>,
}

impl PriorPairingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from history, rejecting self-pairs, out-of-range indices and rematches
    pub fn from_history(players: usize, history: &[(usize, usize)]) -> Result<Self> {
        let mut set = Self::new();
        for &(a, b) in history {
            if a >= players || b >= players {
                return Err(PairingError::shape(format!(
                    "history pair ({}, {}) references a player outside 0..{}",
                    a, b, players
                )));
            }
            if a == b {
                return Err(PairingError::shape(format!(
                    "history pair ({}, {}) pairs a player with itself",
                    a, b
                )));
            }
            if !set.insert(a, b) {
                return Err(PairingError::shape(format!(
                    "history pair ({}, {}) appears more than once",
                    a, b
                )));
            }
        }
        Ok(set)
    }

    fn key(a: usize, b: usize) -> (usize, usize) {
        (a.min(b), a.max(b))
    }

    /// Record a game; false if the pair was already present
    pub fn insert(&mut self, a: usize, b: usize) -> bool {
        self.pairs.insert(Self::key(a, b))
    }

    /// Whether `a` and `b` have met, in either colour
    pub fn contains(&self, a: usize, b: usize) -> bool {
        self.pairs.contains(&Self::key(a, b))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Everything the pairing engine knows about one round
#[derive(Clone, Debug)]
pub struct RoundState {
    round: u32,
    seeds: Vec<u32>,
    scores: Vec<f64>,
    color_differences: Vec<i64>,
    ranks: Vec<usize>,
    group_sizes: Vec<usize>,
    prior: PriorPairingSet,
}

impl RoundState {
    /// Round-1 state: no scores, colours or history
    pub fn initial(seeds: &[u32]) -> Result<Self> {
        let n = seeds.len();
        validate_field(n)?;
        validate_seeds(seeds)?;

        let scores = vec![0.0; n];
        Ok(Self {
            round: 1,
            seeds: seeds.to_vec(),
            ranks: (0..n).collect(),
            group_sizes: vec![n; n],
            color_differences: vec![0; n],
            scores,
            prior: PriorPairingSet::new(),
        })
    }

    /// Continuation-round state
    pub fn continuation(
        round: u32,
        seeds: &[u32],
        scores: &[f64],
        whites: &[u32],
        blacks: &[u32],
        history: &[(usize, usize)],
    ) -> Result<Self> {
        let n = seeds.len();
        validate_field(n)?;
        validate_seeds(seeds)?;

        if round < 2 {
            return Err(PairingError::shape(format!(
                "continuation rounds start at 2, got {}",
                round
            )));
        }
        expect_len("scores", scores.len(), n)?;
        expect_len("white counts", whites.len(), n)?;
        expect_len("black counts", blacks.len(), n)?;

        if let Some((i, s)) = scores
            .iter()
            .enumerate()
            .find(|(_, s)| !s.is_finite() || **s < 0.0)
        {
            return Err(PairingError::shape(format!(
                "player {} has invalid score {}",
                i, s
            )));
        }

        let prior = PriorPairingSet::from_history(n, history)?;

        Ok(Self {
            round,
            seeds: seeds.to_vec(),
            scores: scores.to_vec(),
            color_differences: color_differences(whites, blacks)?,
            ranks: current_ranks(scores),
            group_sizes: score_group_sizes(scores),
            prior,
        })
    }

    /// Validate raw operator input
    pub fn from_input(input: &RoundInput) -> Result<Self> {
        if input.players <= 0 {
            return Err(PairingError::shape(format!(
                "player count must be positive, got {}",
                input.players
            )));
        }
        let n = input.players as usize;
        expect_len("seeds", input.seeds.len(), n)?;

        let seeds = input
            .seeds
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                u32::try_from(s)
                    .ok()
                    .filter(|&s| s > 0)
                    .ok_or_else(|| {
                        PairingError::shape(format!("player {} has invalid seed {}", i, s))
                    })
            })
            .collect::<Result<Vec<u32>>>()?;

        if input.is_initial() {
            return Self::initial(&seeds);
        }

        let whites = non_negative_counts("white", &input.whites)?;
        let blacks = non_negative_counts("black", &input.blacks)?;

        Self::continuation(
            input.round,
            &seeds,
            &input.scores,
            &whites,
            &blacks,
            &input.history,
        )
    }

    /// Round being paired (1-based)
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Rounds already played
    pub fn completed_rounds(&self) -> u32 {
        self.round - 1
    }

    /// Whether seeds alone decide the pairing
    pub fn is_initial(&self) -> bool {
        self.round == 1
    }

    /// Number of players
    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    pub fn seeds(&self) -> &[u32] {
        &self.seeds
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn color_differences(&self) -> &[i64] {
        &self.color_differences
    }

    /// Position of each player in the current standings
    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    /// Size of each player's score group
    pub fn group_sizes(&self) -> &[usize] {
        &self.group_sizes
    }

    pub fn prior(&self) -> &PriorPairingSet {
        &self.prior
    }
}

fn validate_field(n: usize) -> Result<()> {
    if n == 0 {
        return Err(PairingError::shape("no players"));
    }
    Ok(())
}

fn validate_seeds(seeds: &[u32]) -> Result<()> {
    match seeds.iter().position(|&s| s == 0) {
        Some(i) => Err(PairingError::shape(format!(
            "player {} has seed 0; seeds are positive",
            i
        ))),
        None => Ok(()),
    }
}

fn expect_len(what: &str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(PairingError::shape(format!(
            "{} has {} entries, expected {}",
            what, actual, expected
        )));
    }
    Ok(())
}

fn non_negative_counts(colour: &str, counts: &[i64]) -> Result<Vec<u32>> {
    counts
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            u32::try_from(c).map_err(|_| {
                PairingError::shape(format!("player {} has {} count {}", i, colour, c))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn continuation_input() -> RoundInput {
        RoundInput {
            players: 4,
            round: 2,
            seeds: vec![1, 2, 3, 4],
            scores: vec![1.0, 1.0, 0.0, 0.0],
            whites: vec![1, 1, 0, 0],
            blacks: vec![0, 0, 1, 1],
            history: vec![(0, 2), (1, 3)],
        }
    }

    #[test]
    fn test_prior_pairing_set_is_unordered() {
        let mut set = PriorPairingSet::new();
        assert!(set.insert(3, 1));
        assert!(set.contains(1, 3));
        assert!(set.contains(3, 1));
        assert!(!set.insert(1, 3));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_history_rejects_rematch() {
        let err = PriorPairingSet::from_history(4, &[(0, 1), (1, 0)]).unwrap_err();
        assert!(matches!(err, PairingError::InputShape { .. }));
    }

    #[test]
    fn test_history_rejects_out_of_range() {
        assert!(PriorPairingSet::from_history(4, &[(0, 4)]).is_err());
        assert!(PriorPairingSet::from_history(4, &[(2, 2)]).is_err());
    }

    #[test]
    fn test_initial_state() {
        let state = RoundState::initial(&[3, 1, 2]).unwrap();
        assert!(state.is_initial());
        assert_eq!(state.len(), 3);
        assert_eq!(state.completed_rounds(), 0);
        assert!(state.prior().is_empty());
    }

    #[test]
    fn test_from_input_continuation() {
        let state = RoundState::from_input(&continuation_input()).unwrap();
        assert_eq!(state.round(), 2);
        assert_eq!(state.color_differences(), &[1, 1, -1, -1]);
        assert_eq!(state.ranks(), &[0, 1, 2, 3]);
        assert_eq!(state.group_sizes(), &[2, 2, 2, 2]);
        assert!(state.prior().contains(2, 0));
    }

    #[test]
    fn test_from_input_rejects_non_positive_players() {
        let input = RoundInput {
            players: 0,
            ..continuation_input()
        };
        assert!(matches!(
            RoundState::from_input(&input),
            Err(PairingError::InputShape { .. })
        ));
    }

    #[test]
    fn test_from_input_rejects_negative_counts() {
        let mut input = continuation_input();
        input.blacks[2] = -1;
        let err = RoundState::from_input(&input).unwrap_err();
        assert!(err.to_string().contains("black count -1"));
    }

    #[test]
    fn test_from_input_rejects_length_mismatch() {
        let mut input = continuation_input();
        input.scores.pop();
        assert!(RoundState::from_input(&input).is_err());

        let mut input = continuation_input();
        input.seeds.push(5);
        assert!(RoundState::from_input(&input).is_err());
    }

    #[test]
    fn test_from_input_rejects_bad_seed_and_score() {
        let mut input = continuation_input();
        input.seeds[1] = 0;
        assert!(RoundState::from_input(&input).is_err());

        let mut input = continuation_input();
        input.scores[0] = f64::NAN;
        assert!(RoundState::from_input(&input).is_err());
    }

    #[test]
    fn test_initial_input_ignores_missing_history() {
        let input = RoundInput::initial(vec![1, 2, 3, 4]);
        let state = RoundState::from_input(&input).unwrap();
        assert!(state.is_initial());
    }

    #[test]
    fn test_round_input_json() {
        let json = r#"{"players": 2, "round": 1, "seeds": [1, 2]}"#;
        let input = RoundInput::from_json(json).unwrap();
        assert_eq!(input, RoundInput::initial(vec![1, 2]));
    }
}
