//! Round pairing - from a round state to the round's boards
//!
//! Level 1 - Orchestration and Level 2 - Phases

use swiss_core::{PairingConfig, Result, RoundPairings, RoundState};

use crate::colors::{policy_for, resolve_matching};
use crate::dutch::dutch_pairings;
use crate::graph::{build_candidate_graph, check_feasible};
use crate::solver::{check_contract, MatchingSolver};

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Pair one round (Level 1 orchestration)
///
/// # Arguments
/// * `state` - Validated round state
/// * `config` - Pairing configuration
/// * `solver` - Maximum-weight matching solver (unused in round 1)
///
/// # Returns
/// Every player in exactly one game or the bye
pub fn pair_round(
    state: &RoundState,
    config: &PairingConfig,
    solver: &dyn MatchingSolver,
) -> Result<RoundPairings> {
    let pairings = if state.is_initial() {
        pair_initial_round(state, config)
    } else {
        pair_continuation_round(state, config, solver)?
    };

    tracing::info!(
        "Round {}: {} games{}",
        pairings.round,
        pairings.games().count(),
        pairings
            .bye()
            .map(|p| format!(", bye for player {}", p))
            .unwrap_or_default()
    );

    Ok(pairings)
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

/// Round 1: Dutch seeding pairing, no weights involved
pub fn pair_initial_round(state: &RoundState, config: &PairingConfig) -> RoundPairings {
    let (pairings, warning) = dutch_pairings(state.seeds(), config.bye_tie_break);

    RoundPairings {
        round: state.round(),
        pairings,
        warnings: warning.into_iter().collect(),
    }
}

/// Later rounds: candidate graph, matching, colours
pub fn pair_continuation_round(
    state: &RoundState,
    config: &PairingConfig,
    solver: &dyn MatchingSolver,
) -> Result<RoundPairings> {
    let n = state.len();

    let edges = build_candidate_graph(state, config);
    check_feasible(n, &edges)?;

    tracing::debug!("Solving round {} with the {} solver", state.round(), solver.name());
    let matching = solver.solve(n, &edges)?;
    check_contract(n, &edges, &matching)?;

    let policy = policy_for(config.color_policy);
    let pairings = resolve_matching(state, &matching, policy.as_ref())?;

    Ok(RoundPairings {
        round: state.round(),
        pairings,
        warnings: Vec::new(),
    })
}
