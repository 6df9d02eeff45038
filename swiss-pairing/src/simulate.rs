//! In-memory Swiss tournament simulation
//!
//! Level 1 - Orchestration
//!
//! Plays consecutive rounds with random results, feeding each round's
//! scores, colours and history into the next pairing. Nothing is persisted.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use swiss_core::{Pairing, PairingConfig, Result, RoundInput, RoundPairings, RoundState};

use crate::round::pair_round;
use crate::solver::MatchingSolver;

/// Simulation parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Rounds to play
    pub rounds: u32,
    /// Seed for the result generator
    pub rng_seed: u64,
    /// Probability that a game is drawn
    pub draw_rate: f64,
    /// Probability that the better-seeded player wins a decisive game
    pub favourite_win_rate: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rounds: 5,
            rng_seed: 42,
            draw_rate: 0.3,
            favourite_win_rate: 0.65,
        }
    }
}

impl SimulationConfig {
    /// Simulate `rounds` rounds with default result probabilities
    pub fn new(rounds: u32) -> Self {
        Self {
            rounds,
            ..Default::default()
        }
    }

    /// Set the result generator seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }
}

/// Result of a game from white's point of view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    WhiteWins,
    Draw,
    BlackWins,
}

impl GameResult {
    /// Points for white
    pub fn score_for_white(self) -> f64 {
        match self {
            GameResult::WhiteWins => 1.0,
            GameResult::Draw => 0.5,
            GameResult::BlackWins => 0.0,
        }
    }

    /// Points for black
    pub fn score_for_black(self) -> f64 {
        1.0 - self.score_for_white()
    }
}

/// One simulated round: pairings and the results of its games
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulatedRound {
    pub pairings: RoundPairings,
    /// Result of each game, in board order
    pub results: Vec<GameResult>,
}

/// Final state after all simulated rounds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub seeds: Vec<u32>,
    pub rounds: Vec<SimulatedRound>,
    pub scores: Vec<f64>,
    pub whites: Vec<u32>,
    pub blacks: Vec<u32>,
    /// Every game played, as (white, black)
    pub history: Vec<(usize, usize)>,
}

impl SimulationResult {
    /// Players by final score (descending), ties by index
    pub fn final_standings(&self) -> Vec<usize> {
        swiss_core::standings(&self.scores)
    }

    /// Input for pairing the round after the last simulated one
    pub fn next_round_input(&self) -> RoundInput {
        let widen =
            |values: &[u32]| -> Vec<i64> { values.iter().map(|&v| i64::from(v)).collect() };
        RoundInput {
            players: self.seeds.len() as i64,
            round: self.rounds.len() as u32 + 1,
            seeds: widen(&self.seeds),
            scores: self.scores.clone(),
            whites: widen(&self.whites),
            blacks: widen(&self.blacks),
            history: self.history.clone(),
        }
    }
}

/// Running tournament record
struct Record {
    seeds: Vec<u32>,
    scores: Vec<f64>,
    whites: Vec<u32>,
    blacks: Vec<u32>,
    history: Vec<(usize, usize)>,
}

impl Record {
    fn new(seeds: &[u32]) -> Self {
        let n = seeds.len();
        Self {
            seeds: seeds.to_vec(),
            scores: vec![0.0; n],
            whites: vec![0; n],
            blacks: vec![0; n],
            history: Vec::new(),
        }
    }

    fn state_for(&self, round: u32) -> Result<RoundState> {
        if round == 1 {
            RoundState::initial(&self.seeds)
        } else {
            RoundState::continuation(
                round,
                &self.seeds,
                &self.scores,
                &self.whites,
                &self.blacks,
                &self.history,
            )
        }
    }

    fn apply(&mut self, pairing: Pairing, result: Option<GameResult>) {
        match (pairing, result) {
            (Pairing::Game { white, black }, Some(result)) => {
                self.scores[white] += result.score_for_white();
                self.scores[black] += result.score_for_black();
                self.whites[white] += 1;
                self.blacks[black] += 1;
                self.history.push((white, black));
            }
            (Pairing::Bye { player }, _) => self.scores[player] += 1.0,
            (Pairing::Game { .. }, None) => {}
        }
    }
}

/// Simulate a whole tournament (Level 1 orchestration)
///
/// # Arguments
/// * `seeds` - Seed of each player
/// * `sim` - Rounds and result probabilities
/// * `config` - Pairing configuration
/// * `solver` - Matching solver for continuation rounds
pub fn simulate_tournament(
    seeds: &[u32],
    sim: &SimulationConfig,
    config: &PairingConfig,
    solver: &dyn MatchingSolver,
) -> Result<SimulationResult> {
    let mut rng = ChaCha8Rng::seed_from_u64(sim.rng_seed);
    let mut record = Record::new(seeds);
    let mut rounds = Vec::with_capacity(sim.rounds as usize);

    for round in 1..=sim.rounds {
        let state = record.state_for(round)?;
        let pairings = pair_round(&state, config, solver)?;

        let mut results = Vec::new();
        for &pairing in &pairings.pairings {
            let result = match pairing {
                Pairing::Game { white, black } => {
                    let result = play_game(seeds[white], seeds[black], sim, &mut rng);
                    results.push(result);
                    Some(result)
                }
                Pairing::Bye { .. } => None,
            };
            record.apply(pairing, result);
        }

        rounds.push(SimulatedRound { pairings, results });
    }

    Ok(SimulationResult {
        seeds: record.seeds,
        rounds,
        scores: record.scores,
        whites: record.whites,
        blacks: record.blacks,
        history: record.history,
    })
}

/// Random result; the lower seed number is the favourite
fn play_game<R: Rng>(
    white_seed: u32,
    black_seed: u32,
    sim: &SimulationConfig,
    rng: &mut R,
) -> GameResult {
    if rng.gen_bool(sim.draw_rate.clamp(0.0, 1.0)) {
        return GameResult::Draw;
    }
    let favourite_wins = rng.gen_bool(sim.favourite_win_rate.clamp(0.0, 1.0));
    let white_is_favourite = white_seed <= black_seed;
    if favourite_wins == white_is_favourite {
        GameResult::WhiteWins
    } else {
        GameResult::BlackWins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::ExactSolver;

    fn seeds(n: u32) -> Vec<u32> {
        (1..=n).collect()
    }

    #[test]
    fn test_game_result_scores() {
        assert_eq!(GameResult::WhiteWins.score_for_white(), 1.0);
        assert_eq!(GameResult::Draw.score_for_black(), 0.5);
        assert_eq!(GameResult::BlackWins.score_for_black(), 1.0);
    }

    #[test]
    fn test_simulation_is_reproducible() {
        let sim = SimulationConfig::new(3).with_seed(7);
        let config = PairingConfig::default();
        let first = simulate_tournament(&seeds(8), &sim, &config, &ExactSolver::default()).unwrap();
        let second =
            simulate_tournament(&seeds(8), &sim, &config, &ExactSolver::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_simulation_bookkeeping() {
        let sim = SimulationConfig::new(3);
        let result =
            simulate_tournament(&seeds(7), &sim, &PairingConfig::default(), &ExactSolver::default())
                .unwrap();

        assert_eq!(result.rounds.len(), 3);
        // Three games and one bye each round, one point handed out per board
        assert_eq!(result.history.len(), 9);
        let total: f64 = result.scores.iter().sum();
        assert_eq!(total, 12.0);

        let games_played: u32 = result.whites.iter().chain(&result.blacks).sum();
        assert_eq!(games_played, 18);
        assert_eq!(result.final_standings().len(), 7);
    }

    #[test]
    fn test_next_round_input_continues_the_event() {
        let sim = SimulationConfig::new(2).with_seed(3);
        let config = PairingConfig::default();
        let result =
            simulate_tournament(&seeds(8), &sim, &config, &ExactSolver::default()).unwrap();

        let input = result.next_round_input();
        assert_eq!(input.round, 3);
        assert_eq!(input.history.len(), 8);

        let state = RoundState::from_input(&input).unwrap();
        let round = pair_round(&state, &config, &ExactSolver::default()).unwrap();
        assert!(round.covers_exactly(8));
        for (white, black) in round.games() {
            assert!(!state.prior().contains(white, black));
        }
    }

    #[test]
    fn test_all_draws() {
        let sim = SimulationConfig {
            draw_rate: 1.0,
            ..SimulationConfig::new(2)
        };
        let result =
            simulate_tournament(&seeds(4), &sim, &PairingConfig::default(), &ExactSolver::default())
                .unwrap();
        assert_eq!(result.scores, vec![1.0; 4]);
    }
}
