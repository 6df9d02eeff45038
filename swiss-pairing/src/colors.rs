//! Colour assignment and bye resolution after matching
//!
//! Level 3 - Steps

use swiss_core::{ColorPolicyKind, Pairing, PairingError, Result, RoundState};

use crate::solver::Matching;

/// Decides who plays white in a matched pair
pub trait ColorPolicy {
    /// Returns (white, black) for the pair `a < b`
    fn assign(&self, state: &RoundState, a: usize, b: usize) -> (usize, usize);
}

/// Colours by round parity alone.
///
/// After an even number of completed rounds the higher index takes white,
/// after an odd number the lower index does.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoundParity;

impl ColorPolicy for RoundParity {
    fn assign(&self, state: &RoundState, a: usize, b: usize) -> (usize, usize) {
        let (low, high) = (a.min(b), a.max(b));
        if state.completed_rounds() % 2 == 0 {
            (high, low)
        } else {
            (low, high)
        }
    }
}

/// Colours that keep both players' colour difference closest to zero.
///
/// Compares the larger resulting |difference| first, then their sum; falls
/// back to `RoundParity` when both assignments balance equally.
#[derive(Clone, Copy, Debug, Default)]
pub struct Balancing;

impl Balancing {
    /// (worst, total) imbalance after `white` plays white against `black`
    fn imbalance(cd: &[i64], white: usize, black: usize) -> (u64, u64) {
        let w = (cd[white] + 1).unsigned_abs();
        let b = (cd[black] - 1).unsigned_abs();
        (w.max(b), w + b)
    }
}

impl ColorPolicy for Balancing {
    fn assign(&self, state: &RoundState, a: usize, b: usize) -> (usize, usize) {
        let cd = state.color_differences();
        let a_white = Self::imbalance(cd, a, b);
        let b_white = Self::imbalance(cd, b, a);

        match a_white.cmp(&b_white) {
            std::cmp::Ordering::Less => (a, b),
            std::cmp::Ordering::Greater => (b, a),
            std::cmp::Ordering::Equal => RoundParity.assign(state, a, b),
        }
    }
}

/// Policy object for a configured kind
pub fn policy_for(kind: ColorPolicyKind) -> Box<dyn ColorPolicy> {
    match kind {
        ColorPolicyKind::Balancing => Box::new(Balancing),
        ColorPolicyKind::RoundParity => Box::new(RoundParity),
    }
}

/// Turn a solver matching into games and at most one bye.
///
/// Each matched pair is emitted once, ordered by its lower index; the bye
/// comes last. More than one unmatched player makes the round infeasible.
pub fn resolve_matching(
    state: &RoundState,
    matching: &Matching,
    policy: &dyn ColorPolicy,
) -> Result<Vec<Pairing>> {
    let n = state.len();
    if matching.len() != n {
        return Err(PairingError::SolverContract {
            reason: format!("{} entries for {} players", matching.len(), n),
        });
    }

    let mut resolved = vec![false; n];
    let mut pairings = Vec::with_capacity(n / 2 + 1);
    let mut unmatched = Vec::new();

    for a in 0..n {
        if resolved[a] {
            continue;
        }
        match matching[a] {
            Some(b) if b < n && b != a && matching[b] == Some(a) => {
                let (white, black) = policy.assign(state, a.min(b), a.max(b));
                pairings.push(Pairing::Game { white, black });
                resolved[a] = true;
                resolved[b] = true;
            }
            Some(b) => {
                return Err(PairingError::SolverContract {
                    reason: format!("player {} matched to {} but not the reverse", a, b),
                });
            }
            None => {
                unmatched.push(a);
                resolved[a] = true;
            }
        }
    }

    if unmatched.len() > 1 {
        return Err(PairingError::InfeasibleRound { unmatched });
    }
    if let Some(&player) = unmatched.first() {
        pairings.push(Pairing::Bye { player });
    }

    Ok(pairings)
}
