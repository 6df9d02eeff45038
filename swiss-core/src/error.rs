//! Error and warning types for round pairing

use serde::{Deserialize, Serialize};

/// Errors that abort a round computation. Nothing is emitted when one occurs.
#[derive(Debug, thiserror::Error)]
pub enum PairingError {
    /// Round input is malformed (mismatched lengths, negative counts, empty field...)
    #[error("invalid round input: {reason}")]
    InputShape { reason: String },

    /// Players left without any legal opponent
    #[error("no feasible pairing: players {unmatched:?} cannot be matched")]
    InfeasibleRound { unmatched: Vec<usize> },

    /// Matching solver returned something that violates its contract
    #[error("matching solver broke its contract: {reason}")]
    SolverContract { reason: String },

    /// Field too large for the chosen solver
    #[error("solver refuses {vertices} players (limit {limit})")]
    SolverLimit { vertices: usize, limit: usize },

    #[error("failed to read round input: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse round input: {0}")]
    Json(#[from] serde_json::Error),
}

impl PairingError {
    /// Shorthand for an input shape error
    pub fn shape(reason: impl Into<String>) -> Self {
        PairingError::InputShape {
            reason: reason.into(),
        }
    }
}

/// Result alias used across the pairing crates
pub type Result<T> = std::result::Result<T, PairingError>;

/// Non-fatal conditions surfaced alongside a round's pairings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairingWarning {
    /// Several players share the maximum seed in an odd round-1 field
    DuplicateSeedAmbiguity {
        seed: u32,
        candidates: Vec<usize>,
        chosen: usize,
    },
}

impl std::fmt::Display for PairingWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PairingWarning::DuplicateSeedAmbiguity {
                seed,
                candidates,
                chosen,
            } => write!(
                f,
                "players {:?} share the maximum seed {}; bye given to player {}",
                candidates, seed, chosen
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error_message() {
        let err = PairingError::shape("seeds has 3 entries, expected 4");
        assert_eq!(
            err.to_string(),
            "invalid round input: seeds has 3 entries, expected 4"
        );
    }

    #[test]
    fn test_warning_display() {
        let warning = PairingWarning::DuplicateSeedAmbiguity {
            seed: 5,
            candidates: vec![2, 4],
            chosen: 2,
        };
        assert_eq!(
            warning.to_string(),
            "players [2, 4] share the maximum seed 5; bye given to player 2"
        );
    }
}
