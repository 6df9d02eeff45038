//! Eligibility and weight graph for continuation rounds
//!
//! Level 3 - Steps
//!
//! Every legal pairing becomes an edge whose weight is higher the more
//! desirable the game is. The matching solver maximizes total weight, so the
//! three penalty terms encode rule priority:
//!
//! 1. score difference (rule A2), dominant
//! 2. combined colour difference (rule A1)
//! 3. inside a score group, distance from "half the group apart"
//!    (the Dutch fold of a score group)

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use swiss_core::{PairingConfig, PairingError, Result, RoundState};

/// A legal potential game between `a < b`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateEdge {
    pub a: usize,
    pub b: usize,
    pub weight: f64,
}

/// Whether `a` and `b` may meet this round
pub fn is_eligible(state: &RoundState, config: &PairingConfig, a: usize, b: usize) -> bool {
    a != b
        && !state.prior().contains(a, b)
        && (combined_color(state, a, b) as f64) < config.color_bound()
}

/// Desirability of pairing `a` with `b` (higher is better), rounded
pub fn edge_weight(state: &RoundState, config: &PairingConfig, a: usize, b: usize) -> f64 {
    let scores = state.scores();
    let score_gap = (scores[a] - scores[b]).abs();

    let mut weight = -config.score_weight * score_gap;
    weight -= config.color_weight * combined_color(state, a, b) as f64;

    if scores[a] == scores[b] {
        let half_group = state.group_sizes()[a] as f64 / 2.0;
        let rank_gap = state.ranks()[a].abs_diff(state.ranks()[b]) as f64;
        weight -= (half_group - rank_gap).abs().powf(config.rank_exponent);
    }

    round_to(weight, config.weight_precision)
}

/// Build every candidate edge, ordered by (a, b)
pub fn build_candidate_graph(state: &RoundState, config: &PairingConfig) -> Vec<CandidateEdge> {
    let n = state.len();
    let row = |a: usize| -> Vec<CandidateEdge> {
        ((a + 1)..n)
            .filter(|&b| is_eligible(state, config, a, b))
            .map(|b| CandidateEdge {
                a,
                b,
                weight: edge_weight(state, config, a, b),
            })
            .collect()
    };

    let rows: Vec<Vec<CandidateEdge>> = if config.parallel {
        (0..n).into_par_iter().map(row).collect()
    } else {
        (0..n).map(row).collect()
    };

    let edges: Vec<CandidateEdge> = rows.into_iter().flatten().collect();
    tracing::debug!(
        "Round {}: {} candidate edges over {} players",
        state.round(),
        edges.len(),
        n
    );
    edges
}

/// Players with no candidate edge at all
pub fn isolated_players(players: usize, edges: &[CandidateEdge]) -> Vec<usize> {
    let mut degree = vec![0usize; players];
    for edge in edges {
        degree[edge.a] += 1;
        degree[edge.b] += 1;
    }
    (0..players).filter(|&p| degree[p] == 0).collect()
}

/// Fail early when more players are isolated than can take the bye
pub fn check_feasible(players: usize, edges: &[CandidateEdge]) -> Result<()> {
    let isolated = isolated_players(players, edges);
    let allowed = players % 2;
    if isolated.len() > allowed {
        return Err(PairingError::InfeasibleRound {
            unmatched: isolated,
        });
    }
    Ok(())
}

fn combined_color(state: &RoundState, a: usize, b: usize) -> u64 {
    let cd = state.color_differences();
    (cd[a] + cd[b]).unsigned_abs()
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
