//! Maximum-weight matching solvers
//!
//! The pairing engine only relies on the `MatchingSolver` contract: given a
//! weighted undirected graph over `0..vertices`, return each vertex's mate
//! (or `None`), maximizing first the number of matched pairs and then the
//! total weight. Any algorithm honouring that contract can be plugged in.

use rustc_hash::FxHashMap;

use swiss_core::{PairingError, Result};

use crate::blossom::BlossomSolver;
use crate::graph::CandidateEdge;

/// Mate of each vertex, `None` when unmatched
pub type Matching = Vec<Option<usize>>;

/// Tolerance when comparing summed weights
const WEIGHT_EPSILON: f64 = 1e-9;

/// Largest field the exact solver accepts by default
pub const DEFAULT_EXACT_LIMIT: usize = 20;

/// Largest field the exact solver ever accepts; its table has 2^N entries
pub const MAX_EXACT_LIMIT: usize = 22;

/// Maximum-cardinality maximum-weight matching
pub trait MatchingSolver {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Solve over vertices `0..vertices`
    fn solve(&self, vertices: usize, edges: &[CandidateEdge]) -> Result<Matching>;
}

/// Check that a matching honours the solver contract for `edges`
pub fn check_contract(
    vertices: usize,
    edges: &[CandidateEdge],
    matching: &Matching,
) -> Result<()> {
    if matching.len() != vertices {
        return Err(PairingError::SolverContract {
            reason: format!("{} entries for {} vertices", matching.len(), vertices),
        });
    }

    let weights = WeightTable::new(edges);
    for (v, mate) in matching.iter().enumerate() {
        let Some(u) = *mate else { continue };
        if u >= vertices || matching[u] != Some(v) {
            return Err(PairingError::SolverContract {
                reason: format!("vertex {} matched to {} but not the reverse", v, u),
            });
        }
        if weights.get(v, u).is_none() {
            return Err(PairingError::SolverContract {
                reason: format!("pair ({}, {}) is not a candidate edge", v, u),
            });
        }
    }
    Ok(())
}

/// Total weight of a matching
pub fn matching_weight(edges: &[CandidateEdge], matching: &Matching) -> f64 {
    let weights = WeightTable::new(edges);
    matching
        .iter()
        .enumerate()
        .filter_map(|(v, mate)| mate.filter(|&u| v < u).and_then(|u| weights.get(v, u)))
        .sum()
}

/// Edge lookup by unordered vertex pair
struct WeightTable {
    weights: FxHashMap<(usize, usize), f64>,
}

impl WeightTable {
    fn new(edges: &[CandidateEdge]) -> Self {
        let weights = edges
            .iter()
            .map(|e| ((e.a.min(e.b), e.a.max(e.b)), e.weight))
            .collect();
        Self { weights }
    }

    fn get(&self, a: usize, b: usize) -> Option<f64> {
        self.weights.get(&(a.min(b), a.max(b))).copied()
    }
}

// ============================================================================
// Exact solver
// ============================================================================

/// Exact solver by memoised search over subsets of unmatched vertices.
///
/// Exponential in the field size, so it refuses fields above `max_vertices`
/// (itself capped at `MAX_EXACT_LIMIT`).
#[derive(Clone, Copy, Debug)]
pub struct ExactSolver {
    pub max_vertices: usize,
}

impl Default for ExactSolver {
    fn default() -> Self {
        Self {
            max_vertices: DEFAULT_EXACT_LIMIT,
        }
    }
}

impl ExactSolver {
    pub fn new(max_vertices: usize) -> Self {
        Self { max_vertices }
    }

    /// Largest field actually accepted
    pub fn limit(&self) -> usize {
        self.max_vertices.min(MAX_EXACT_LIMIT)
    }
}

/// Best (pairs, weight) for a subset, and the mate chosen for its lowest vertex
#[derive(Clone, Copy)]
struct Entry {
    pairs: u32,
    weight: f64,
    mate: Option<usize>,
}

impl Entry {
    fn beats(&self, other: &Entry) -> bool {
        self.pairs > other.pairs
            || (self.pairs == other.pairs && self.weight > other.weight + WEIGHT_EPSILON)
    }
}

struct ExactSearch {
    adjacency: Vec<Vec<Option<f64>>>,
    memo: Vec<Option<Entry>>,
}

impl ExactSearch {
    fn best(&mut self, remaining: usize) -> Entry {
        if remaining == 0 {
            return Entry {
                pairs: 0,
                weight: 0.0,
                mate: None,
            };
        }
        if let Some(entry) = self.memo[remaining] {
            return entry;
        }

        let v = remaining.trailing_zeros() as usize;
        let without_v = remaining & !(1 << v);

        // Leave v unmatched
        let rest = self.best(without_v);
        let mut best = Entry {
            pairs: rest.pairs,
            weight: rest.weight,
            mate: None,
        };

        for u in (v + 1)..self.adjacency.len() {
            if without_v & (1 << u) == 0 {
                continue;
            }
            let Some(w) = self.adjacency[v][u] else { continue };
            let rest = self.best(without_v & !(1 << u));
            let candidate = Entry {
                pairs: rest.pairs + 1,
                weight: rest.weight + w,
                mate: Some(u),
            };
            if candidate.beats(&best) {
                best = candidate;
            }
        }

        self.memo[remaining] = Some(best);
        best
    }
}

impl MatchingSolver for ExactSolver {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn solve(&self, vertices: usize, edges: &[CandidateEdge]) -> Result<Matching> {
        let limit = self.limit();
        if vertices > limit {
            return Err(PairingError::SolverLimit { vertices, limit });
        }

        let mut adjacency = vec![vec![None; vertices]; vertices];
        for e in edges {
            adjacency[e.a][e.b] = Some(e.weight);
            adjacency[e.b][e.a] = Some(e.weight);
        }

        let full = (1usize << vertices) - 1;
        let mut search = ExactSearch {
            adjacency,
            memo: vec![None; full + 1],
        };
        search.best(full);

        // Replay the recorded choices
        let mut matching = vec![None; vertices];
        let mut remaining = full;
        while remaining != 0 {
            let v = remaining.trailing_zeros() as usize;
            let entry = search.best(remaining);
            remaining &= !(1 << v);
            if let Some(u) = entry.mate {
                matching[v] = Some(u);
                matching[u] = Some(v);
                remaining &= !(1 << u);
            }
        }

        Ok(matching)
    }
}

// ============================================================================
// Automatic choice
// ============================================================================

/// Exact subset search for small fields, blossom algorithm above its limit
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoSolver {
    pub exact: ExactSolver,
    pub blossom: BlossomSolver,
}

impl AutoSolver {
    /// Use the subset search up to `exact_limit` players
    pub fn with_exact_limit(exact_limit: usize) -> Self {
        Self {
            exact: ExactSolver::new(exact_limit),
            ..Default::default()
        }
    }

    /// Decimals kept when weights are made integral for the blossom solver
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.blossom.precision = precision;
        self
    }
}

impl MatchingSolver for AutoSolver {
    fn name(&self) -> &'static str {
        "auto"
    }

    fn solve(&self, vertices: usize, edges: &[CandidateEdge]) -> Result<Matching> {
        if vertices <= self.exact.limit() {
            tracing::debug!("Using exact solver for {} players", vertices);
            self.exact.solve(vertices, edges)
        } else {
            tracing::debug!("Using blossom solver for {} players", vertices);
            self.blossom.solve(vertices, edges)
        }
    }
}
