//! Swiss Pairing - next-round pairing for Swiss-system tournaments
//!
//! This crate provides the pairing engine:
//! - Dutch seeding pairing for round 1
//! - Eligibility and weight graph for later rounds
//! - Matching solvers behind a narrow trait (subset search, blossom)
//! - Colour assignment and bye resolution
//! - An in-memory tournament simulation
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: pair_round, simulate_tournament (orchestration)
//! - Level 2: pair_initial_round, pair_continuation_round (phases)
//! - Level 3: build_candidate_graph, solve, resolve_matching (steps)
//! - Level 4: configuration (in swiss-core)

mod blossom;
mod colors;
mod dutch;
mod graph;
mod round;
mod simulate;
mod solver;

pub use blossom::BlossomSolver;
pub use colors::{policy_for, resolve_matching, Balancing, ColorPolicy, RoundParity};
pub use dutch::dutch_pairings;
pub use graph::{
    build_candidate_graph, check_feasible, edge_weight, is_eligible, isolated_players,
    CandidateEdge,
};
pub use round::{pair_continuation_round, pair_initial_round, pair_round};
pub use simulate::{
    simulate_tournament, GameResult, SimulatedRound, SimulationConfig, SimulationResult,
};
pub use solver::{
    check_contract, matching_weight, AutoSolver, ExactSolver, Matching, MatchingSolver,
    DEFAULT_EXACT_LIMIT, MAX_EXACT_LIMIT,
};
