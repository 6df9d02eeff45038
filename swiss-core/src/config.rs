//! Configuration types for round pairing
//!
//! Level 4 - Utilities and configuration

use serde::{Deserialize, Serialize};

/// FIDE bound on the colour difference of a player
pub const DEFAULT_BETA: f64 = 2.0;

/// Weight per point of score difference (rule A2)
pub const DEFAULT_SCORE_WEIGHT: f64 = 10000.0;

/// Weight per unit of combined colour difference (rule A1)
pub const DEFAULT_COLOR_WEIGHT: f64 = 100.0;

/// Exponent of the rank-distance tie-break inside a score group
pub const DEFAULT_RANK_EXPONENT: f64 = 1.01;

/// Decimal places kept on edge weights
pub const DEFAULT_WEIGHT_PRECISION: u32 = 2;

/// Which player sits out when several share the maximum seed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ByeTieBreak {
    /// Lowest player index among the candidates
    LowestIndex,
    /// Highest player index among the candidates
    HighestIndex,
}

impl Default for ByeTieBreak {
    fn default() -> Self {
        ByeTieBreak::LowestIndex
    }
}

impl ByeTieBreak {
    /// Pick one player out of a non-empty candidate list
    pub fn choose(self, candidates: &[usize]) -> Option<usize> {
        match self {
            ByeTieBreak::LowestIndex => candidates.iter().copied().min(),
            ByeTieBreak::HighestIndex => candidates.iter().copied().max(),
        }
    }
}

/// How colours are handed out once a pair is matched
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorPolicyKind {
    /// Keep both colour differences as close to zero as possible
    Balancing,
    /// Flip by round parity, ignoring colour history
    RoundParity,
}

impl Default for ColorPolicyKind {
    fn default() -> Self {
        ColorPolicyKind::Balancing
    }
}

/// Pairing configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairingConfig {
    /// Colour balance bound; pairs with |cd[a] + cd[b]| >= 2 * beta are illegal
    pub beta: f64,
    /// Penalty per point of score difference
    pub score_weight: f64,
    /// Penalty per unit of combined colour difference
    pub color_weight: f64,
    /// Exponent of the rank-distance term
    pub rank_exponent: f64,
    /// Decimal places edge weights are rounded to
    pub weight_precision: u32,
    /// Round-1 bye choice among tied maximum seeds
    pub bye_tie_break: ByeTieBreak,
    /// Colour assignment after matching
    pub color_policy: ColorPolicyKind,
    /// Build graph rows in parallel
    pub parallel: bool,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            beta: DEFAULT_BETA,
            score_weight: DEFAULT_SCORE_WEIGHT,
            color_weight: DEFAULT_COLOR_WEIGHT,
            rank_exponent: DEFAULT_RANK_EXPONENT,
            weight_precision: DEFAULT_WEIGHT_PRECISION,
            bye_tie_break: ByeTieBreak::LowestIndex,
            color_policy: ColorPolicyKind::Balancing,
            parallel: false,
        }
    }
}

impl PairingConfig {
    /// FIDE-style defaults with colour balancing
    pub fn fide() -> Self {
        Self::default()
    }

    /// Colours flipped by round parity alone, the classic two-table rotation
    pub fn reference() -> Self {
        Self {
            color_policy: ColorPolicyKind::RoundParity,
            ..Default::default()
        }
    }

    /// Set the colour balance bound
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Set the colour policy
    pub fn with_color_policy(mut self, policy: ColorPolicyKind) -> Self {
        self.color_policy = policy;
        self
    }

    /// Set the round-1 bye tie-break
    pub fn with_bye_tie_break(mut self, tie_break: ByeTieBreak) -> Self {
        self.bye_tie_break = tie_break;
        self
    }

    /// Enable or disable parallel graph construction
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Largest legal |cd[a] + cd[b]| is anything strictly below this
    pub fn color_bound(&self) -> f64 {
        2.0 * self.beta
    }
}
