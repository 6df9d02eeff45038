//! Maximum-cardinality maximum-weight matching on general graphs
//!
//! Level 3 - Steps
//!
//! Edmonds' blossom algorithm with Galil's O(n^3) dual updates. Every stage
//! grows alternating trees from the free vertices, shrinks odd cycles into
//! blossoms and adjusts vertex/blossom duals until an augmenting path is
//! found or no dual step is left. Weights are converted to integers first so
//! that all dual arithmetic is exact.
//!
//! Edge `k` has endpoints `2k` (its first vertex) and `2k + 1` (its second);
//! `endpoint ^ 1` is the opposite end. Blossom ids `n..2n` are non-trivial
//! blossoms, ids below `n` are the vertices themselves.

use swiss_core::config::DEFAULT_WEIGHT_PRECISION;
use swiss_core::{PairingError, Result};

use crate::graph::CandidateEdge;
use crate::solver::{Matching, MatchingSolver};

/// Absent vertex, endpoint, edge or blossom
const NONE: usize = usize::MAX;

// Labels of top-level blossoms in the alternating forest
const FREE: u8 = 0;
const OUTER: u8 = 1;
const INNER: u8 = 2;
const BREADCRUMB: u8 = 4;

/// Exact solver for fields of any size.
///
/// Weights are scaled by `10^precision` and rounded before solving, so
/// `precision` must cover the decimals of the candidate weights.
#[derive(Clone, Copy, Debug)]
pub struct BlossomSolver {
    pub precision: u32,
}

impl Default for BlossomSolver {
    fn default() -> Self {
        Self {
            precision: DEFAULT_WEIGHT_PRECISION,
        }
    }
}

impl MatchingSolver for BlossomSolver {
    fn name(&self) -> &'static str {
        "blossom"
    }

    fn solve(&self, vertices: usize, edges: &[CandidateEdge]) -> Result<Matching> {
        // Doubled so that halved slacks stay integral
        let scale = 2.0 * 10f64.powi(self.precision as i32);

        let mut integral = Vec::with_capacity(edges.len());
        for e in edges {
            if e.a >= vertices || e.b >= vertices || e.a == e.b {
                return Err(PairingError::SolverContract {
                    reason: format!("edge ({}, {}) is not a pair in 0..{}", e.a, e.b, vertices),
                });
            }
            if !e.weight.is_finite() {
                return Err(PairingError::SolverContract {
                    reason: format!("edge ({}, {}) has weight {}", e.a, e.b, e.weight),
                });
            }
            integral.push((e.a, e.b, (e.weight * scale).round() as i64));
        }

        if integral.is_empty() {
            return Ok(vec![None; vertices]);
        }
        Blossoms::new(vertices, integral).run()
    }
}

/// Next dual adjustment of a stage
#[derive(Clone, Copy, Debug)]
enum DualStep {
    /// No tree can grow further; the stage is over
    Stop,
    /// Edge from an outer blossom to a free vertex becomes tight
    Grow(usize),
    /// Edge between two outer blossoms becomes tight
    Bridge(usize),
    /// Inner blossom dual reaches zero and must be expanded
    Expand(usize),
}

fn wrap(j: isize, len: usize) -> usize {
    j.rem_euclid(len as isize) as usize
}

struct Blossoms {
    n: usize,
    edges: Vec<(usize, usize, i64)>,
    endpoint: Vec<usize>,
    /// Remote endpoints of the edges at each vertex
    neighbours: Vec<Vec<usize>>,
    /// Remote endpoint of each vertex's matched edge
    mate: Vec<usize>,
    label: Vec<u8>,
    /// Endpoint through which a vertex or blossom got its label
    label_end: Vec<usize>,
    in_blossom: Vec<usize>,
    blossom_parent: Vec<usize>,
    /// Sub-blossoms in cyclic order, starting at the base
    blossom_children: Vec<Vec<usize>>,
    blossom_base: Vec<usize>,
    /// Endpoints linking consecutive sub-blossoms
    blossom_endpoints: Vec<Vec<usize>>,
    /// Least-slack edge to an outer blossom (or, for vertices, any tree)
    best_edge: Vec<usize>,
    /// Least-slack edges to each neighbouring outer blossom
    blossom_best_edges: Vec<Option<Vec<usize>>>,
    unused_blossoms: Vec<usize>,
    dual: Vec<i64>,
    allow_edge: Vec<bool>,
    queue: Vec<usize>,
}

impl Blossoms {
    fn new(n: usize, edges: Vec<(usize, usize, i64)>) -> Self {
        let max_weight = edges.iter().map(|&(_, _, w)| w).max().unwrap_or(0).max(0);

        let mut endpoint = Vec::with_capacity(2 * edges.len());
        let mut neighbours = vec![Vec::new(); n];
        for (k, &(i, j, _)) in edges.iter().enumerate() {
            endpoint.push(i);
            endpoint.push(j);
            neighbours[i].push(2 * k + 1);
            neighbours[j].push(2 * k);
        }

        let mut blossom_base: Vec<usize> = (0..n).collect();
        blossom_base.resize(2 * n, NONE);
        let mut dual = vec![max_weight; n];
        dual.resize(2 * n, 0);

        let edge_count = edges.len();
        Self {
            n,
            edges,
            endpoint,
            neighbours,
            mate: vec![NONE; n],
            label: vec![FREE; 2 * n],
            label_end: vec![NONE; 2 * n],
            in_blossom: (0..n).collect(),
            blossom_parent: vec![NONE; 2 * n],
            blossom_children: vec![Vec::new(); 2 * n],
            blossom_base,
            blossom_endpoints: vec![Vec::new(); 2 * n],
            best_edge: vec![NONE; 2 * n],
            blossom_best_edges: vec![None; 2 * n],
            unused_blossoms: (n..2 * n).collect(),
            dual,
            allow_edge: vec![false; edge_count],
            queue: Vec::new(),
        }
    }

    fn slack(&self, k: usize) -> i64 {
        let (i, j, w) = self.edges[k];
        self.dual[i] + self.dual[j] - 2 * w
    }

    /// Vertices contained in blossom `b`
    fn leaves(&self, b: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![b];
        while let Some(t) = stack.pop() {
            if t < self.n {
                out.push(t);
            } else {
                stack.extend(self.blossom_children[t].iter().rev());
            }
        }
        out
    }

    // ========================================================================
    // Labelling
    // ========================================================================

    /// Label the top-level blossom of `w`, reached through endpoint `p`
    fn assign_label(&mut self, w: usize, label: u8, p: usize) {
        let b = self.in_blossom[w];
        self.label[w] = label;
        self.label[b] = label;
        self.label_end[w] = p;
        self.label_end[b] = p;
        self.best_edge[w] = NONE;
        self.best_edge[b] = NONE;

        if label == OUTER {
            let leaves = self.leaves(b);
            self.queue.extend(leaves);
        } else if label == INNER {
            // An inner blossom's base is always matched; its mate turns outer
            let mate = self.mate[self.blossom_base[b]];
            let next = self.endpoint[mate];
            self.assign_label(next, OUTER, mate ^ 1);
        }
    }

    /// Trace back from `v` and `w` to a common base, or `NONE` when the two
    /// trees are different and an augmenting path exists
    fn scan_blossom(&mut self, mut v: usize, mut w: usize) -> usize {
        let mut path = Vec::new();
        let mut base = NONE;

        while v != NONE || w != NONE {
            let mut b = self.in_blossom[v];
            if self.label[b] & BREADCRUMB != 0 {
                base = self.blossom_base[b];
                break;
            }
            path.push(b);
            self.label[b] = OUTER | BREADCRUMB;

            if self.label_end[b] == NONE {
                // Root of the tree
                v = NONE;
            } else {
                v = self.endpoint[self.label_end[b]];
                b = self.in_blossom[v];
                v = self.endpoint[self.label_end[b]];
            }
            if w != NONE {
                std::mem::swap(&mut v, &mut w);
            }
        }

        for b in path {
            self.label[b] = OUTER;
        }
        base
    }

    // ========================================================================
    // Blossom shrinking and expansion
    // ========================================================================

    /// Shrink the odd cycle closed by edge `k` into a new outer blossom
    fn add_blossom(&mut self, base: usize, k: usize) -> Result<()> {
        let (mut v, mut w, _) = self.edges[k];
        let bb = self.in_blossom[base];
        let mut bv = self.in_blossom[v];
        let mut bw = self.in_blossom[w];

        let Some(b) = self.unused_blossoms.pop() else {
            return Err(PairingError::SolverContract {
                reason: "ran out of blossom slots".to_string(),
            });
        };
        self.blossom_base[b] = base;
        self.blossom_parent[b] = NONE;
        self.blossom_parent[bb] = b;

        let mut children = Vec::new();
        let mut endpoints = Vec::new();
        while bv != bb {
            self.blossom_parent[bv] = b;
            children.push(bv);
            endpoints.push(self.label_end[bv]);
            v = self.endpoint[self.label_end[bv]];
            bv = self.in_blossom[v];
        }
        children.push(bb);
        children.reverse();
        endpoints.reverse();
        endpoints.push(2 * k);
        while bw != bb {
            self.blossom_parent[bw] = b;
            children.push(bw);
            endpoints.push(self.label_end[bw] ^ 1);
            w = self.endpoint[self.label_end[bw]];
            bw = self.in_blossom[w];
        }

        self.label[b] = OUTER;
        self.label_end[b] = self.label_end[bb];
        self.dual[b] = 0;
        self.blossom_children[b] = children.clone();
        self.blossom_endpoints[b] = endpoints;

        for leaf in self.leaves(b) {
            if self.label[self.in_blossom[leaf]] == INNER {
                // Former inner vertices are now outer and must be scanned
                self.queue.push(leaf);
            }
            self.in_blossom[leaf] = b;
        }

        // Least-slack edge from the new blossom to every neighbouring outer blossom
        let mut best_to = vec![NONE; 2 * self.n];
        for &child in &children {
            let lists: Vec<Vec<usize>> = match self.blossom_best_edges[child].take() {
                Some(list) => vec![list],
                None => self
                    .leaves(child)
                    .into_iter()
                    .map(|leaf| self.neighbours[leaf].iter().map(|p| p / 2).collect())
                    .collect(),
            };
            for list in lists {
                for k in list {
                    let (i, j, _) = self.edges[k];
                    let j = if self.in_blossom[j] == b { i } else { j };
                    let bj = self.in_blossom[j];
                    if bj != b
                        && self.label[bj] == OUTER
                        && (best_to[bj] == NONE || self.slack(k) < self.slack(best_to[bj]))
                    {
                        best_to[bj] = k;
                    }
                }
            }
            self.best_edge[child] = NONE;
        }

        let list: Vec<usize> = best_to.into_iter().filter(|&k| k != NONE).collect();
        let mut best = NONE;
        for &k in &list {
            if best == NONE || self.slack(k) < self.slack(best) {
                best = k;
            }
        }
        self.blossom_best_edges[b] = Some(list);
        self.best_edge[b] = best;
        Ok(())
    }

    /// Dissolve blossom `b`; mid-stage expansion relabels the path through it
    fn expand_blossom(&mut self, b: usize, end_stage: bool) {
        let children = self.blossom_children[b].clone();
        for &s in &children {
            self.blossom_parent[s] = NONE;
            if s < self.n {
                self.in_blossom[s] = s;
            } else if end_stage && self.dual[s] == 0 {
                self.expand_blossom(s, end_stage);
            } else {
                for leaf in self.leaves(s) {
                    self.in_blossom[leaf] = s;
                }
            }
        }

        if !end_stage && self.label[b] == INNER {
            self.relabel_expanded(b, &children);
        }

        self.label[b] = FREE;
        self.label_end[b] = NONE;
        self.blossom_children[b].clear();
        self.blossom_endpoints[b].clear();
        self.blossom_base[b] = NONE;
        self.blossom_best_edges[b] = None;
        self.best_edge[b] = NONE;
        self.unused_blossoms.push(b);
    }

    /// Relabel the even-length path from the entry child of an expanded inner
    /// blossom down to its base, then pick up children reached from outside
    fn relabel_expanded(&mut self, b: usize, children: &[usize]) {
        let len = children.len();
        let endpoints = self.blossom_endpoints[b].clone();
        let entry = self.in_blossom[self.endpoint[self.label_end[b] ^ 1]];

        let mut j = children.iter().position(|&c| c == entry).unwrap_or(0) as isize;
        let (step, trick) = if j & 1 == 1 {
            j -= len as isize;
            (1, 0)
        } else {
            (-1, 1)
        };

        let mut p = self.label_end[b];
        while j != 0 {
            let inner = self.endpoint[p ^ 1];
            self.label[inner] = FREE;
            let link = endpoints[wrap(j - trick as isize, len)];
            self.label[self.endpoint[link ^ trick ^ 1]] = FREE;
            self.assign_label(inner, INNER, p);

            self.allow_edge[link / 2] = true;
            j += step;
            p = endpoints[wrap(j - trick as isize, len)] ^ trick;
            self.allow_edge[p / 2] = true;
            j += step;
        }

        // The base child keeps its mate, so no outer label is propagated
        let base_child = children[wrap(j, len)];
        let inner = self.endpoint[p ^ 1];
        self.label[inner] = INNER;
        self.label[base_child] = INNER;
        self.label_end[inner] = p;
        self.label_end[base_child] = p;
        self.best_edge[base_child] = NONE;

        j += step;
        while children[wrap(j, len)] != entry {
            let child = children[wrap(j, len)];
            if self.label[child] == OUTER {
                j += step;
                continue;
            }
            let reached = self
                .leaves(child)
                .into_iter()
                .find(|&v| self.label[v] != FREE);
            if let Some(v) = reached {
                self.label[v] = FREE;
                let mate = self.mate[self.blossom_base[child]];
                self.label[self.endpoint[mate]] = FREE;
                let end = self.label_end[v];
                self.assign_label(v, INNER, end);
            }
            j += step;
        }
    }

    // ========================================================================
    // Augmentation
    // ========================================================================

    /// Swap matched and unmatched edges on the path from vertex `v` to the
    /// base of blossom `b`, making `v` the new base
    fn augment_blossom(&mut self, b: usize, v: usize) {
        let mut t = v;
        while self.blossom_parent[t] != b {
            t = self.blossom_parent[t];
        }
        if t >= self.n {
            self.augment_blossom(t, v);
        }

        let children = self.blossom_children[b].clone();
        let endpoints = self.blossom_endpoints[b].clone();
        let len = children.len();
        let i = children.iter().position(|&c| c == t).unwrap_or(0);

        let mut j = i as isize;
        let (step, trick) = if i & 1 == 1 {
            j -= len as isize;
            (1, 0)
        } else {
            (-1, 1)
        };

        while j != 0 {
            j += step;
            let t = children[wrap(j, len)];
            let p = endpoints[wrap(j - trick as isize, len)] ^ trick;
            if t >= self.n {
                self.augment_blossom(t, self.endpoint[p]);
            }
            j += step;
            let t = children[wrap(j, len)];
            if t >= self.n {
                self.augment_blossom(t, self.endpoint[p ^ 1]);
            }
            self.mate[self.endpoint[p]] = p ^ 1;
            self.mate[self.endpoint[p ^ 1]] = p;
        }

        self.blossom_children[b].rotate_left(i);
        self.blossom_endpoints[b].rotate_left(i);
        self.blossom_base[b] = self.blossom_base[self.blossom_children[b][0]];
    }

    /// Augment along the path through tight edge `k` joining two trees
    fn augment_matching(&mut self, k: usize) {
        let (v, w, _) = self.edges[k];
        for (start, end) in [(v, 2 * k + 1), (w, 2 * k)] {
            let (mut s, mut p) = (start, end);
            loop {
                let bs = self.in_blossom[s];
                if bs >= self.n {
                    self.augment_blossom(bs, s);
                }
                self.mate[s] = p;
                if self.label_end[bs] == NONE {
                    // Reached the root
                    break;
                }
                let t = self.endpoint[self.label_end[bs]];
                let bt = self.in_blossom[t];
                s = self.endpoint[self.label_end[bt]];
                let j = self.endpoint[self.label_end[bt] ^ 1];
                if bt >= self.n {
                    self.augment_blossom(bt, j);
                }
                self.mate[j] = self.label_end[bt];
                p = self.label_end[bt] ^ 1;
            }
        }
    }

    // ========================================================================
    // Stages
    // ========================================================================

    fn run(mut self) -> Result<Matching> {
        for _ in 0..self.n {
            if !self.stage()? {
                break;
            }

            // Outer blossoms with zero dual are no longer needed
            for b in self.n..2 * self.n {
                if self.blossom_parent[b] == NONE
                    && self.blossom_base[b] != NONE
                    && self.label[b] == OUTER
                    && self.dual[b] == 0
                {
                    self.expand_blossom(b, true);
                }
            }
        }

        Ok(self
            .mate
            .iter()
            .map(|&p| (p != NONE).then(|| self.endpoint[p]))
            .collect())
    }

    /// One stage: true if the matching grew by one edge
    fn stage(&mut self) -> Result<bool> {
        let n = self.n;
        self.label.fill(FREE);
        self.best_edge.fill(NONE);
        for slot in &mut self.blossom_best_edges[n..] {
            *slot = None;
        }
        self.allow_edge.fill(false);
        self.queue.clear();

        for v in 0..n {
            if self.mate[v] == NONE && self.label[self.in_blossom[v]] == FREE {
                self.assign_label(v, OUTER, NONE);
            }
        }

        loop {
            if self.scan_queue()? {
                return Ok(true);
            }

            let (delta, step) = self.next_dual_step();
            self.apply_delta(delta);

            match step {
                DualStep::Stop => return Ok(false),
                DualStep::Grow(k) => {
                    self.allow_edge[k] = true;
                    let (i, j, _) = self.edges[k];
                    let outer = if self.label[self.in_blossom[i]] == FREE { j } else { i };
                    self.queue.push(outer);
                }
                DualStep::Bridge(k) => {
                    self.allow_edge[k] = true;
                    self.queue.push(self.edges[k].0);
                }
                DualStep::Expand(b) => self.expand_blossom(b, false),
            }
        }
    }

    /// Grow the forest along tight edges; true once an augmentation happened
    fn scan_queue(&mut self) -> Result<bool> {
        while let Some(v) = self.queue.pop() {
            for idx in 0..self.neighbours[v].len() {
                let p = self.neighbours[v][idx];
                let k = p / 2;
                let w = self.endpoint[p];
                if self.in_blossom[v] == self.in_blossom[w] {
                    continue;
                }

                let mut slack = 0;
                if !self.allow_edge[k] {
                    slack = self.slack(k);
                    if slack <= 0 {
                        self.allow_edge[k] = true;
                    }
                }

                let w_label = self.label[self.in_blossom[w]];
                if self.allow_edge[k] {
                    if w_label == FREE {
                        self.assign_label(w, INNER, p ^ 1);
                    } else if w_label == OUTER {
                        let base = self.scan_blossom(v, w);
                        if base != NONE {
                            self.add_blossom(base, k)?;
                        } else {
                            self.augment_matching(k);
                            return Ok(true);
                        }
                    } else if self.label[w] == FREE {
                        // Inner blossom reached at a non-base vertex
                        self.label[w] = INNER;
                        self.label_end[w] = p ^ 1;
                    }
                } else if w_label == OUTER {
                    let b = self.in_blossom[v];
                    if self.best_edge[b] == NONE || slack < self.slack(self.best_edge[b]) {
                        self.best_edge[b] = k;
                    }
                } else if self.label[w] == FREE
                    && (self.best_edge[w] == NONE || slack < self.slack(self.best_edge[w]))
                {
                    self.best_edge[w] = k;
                }
            }
        }
        Ok(false)
    }

    /// Smallest dual change that makes progress
    fn next_dual_step(&self) -> (i64, DualStep) {
        let n = self.n;
        let mut best: Option<(i64, DualStep)> = None;
        let improves = |best: &Option<(i64, DualStep)>, d: i64| best.map_or(true, |(x, _)| d < x);

        for v in 0..n {
            let k = self.best_edge[v];
            if self.label[self.in_blossom[v]] == FREE && k != NONE {
                let d = self.slack(k);
                if improves(&best, d) {
                    best = Some((d, DualStep::Grow(k)));
                }
            }
        }

        for b in 0..2 * n {
            let k = self.best_edge[b];
            if self.blossom_parent[b] == NONE && self.label[b] == OUTER && k != NONE {
                let d = self.slack(k) / 2;
                if improves(&best, d) {
                    best = Some((d, DualStep::Bridge(k)));
                }
            }
        }

        for b in n..2 * n {
            if self.blossom_base[b] != NONE
                && self.blossom_parent[b] == NONE
                && self.label[b] == INNER
                && improves(&best, self.dual[b])
            {
                best = Some((self.dual[b], DualStep::Expand(b)));
            }
        }

        // Maximum cardinality: only stop once nothing else can move
        best.unwrap_or_else(|| {
            let min_dual = self.dual[..n].iter().copied().min().unwrap_or(0);
            (min_dual.max(0), DualStep::Stop)
        })
    }

    fn apply_delta(&mut self, delta: i64) {
        let n = self.n;
        for v in 0..n {
            match self.label[self.in_blossom[v]] {
                OUTER => self.dual[v] -= delta,
                INNER => self.dual[v] += delta,
                _ => {}
            }
        }
        for b in n..2 * n {
            if self.blossom_base[b] != NONE && self.blossom_parent[b] == NONE {
                match self.label[b] {
                    OUTER => self.dual[b] += delta,
                    INNER => self.dual[b] -= delta,
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{matching_weight, ExactSolver};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn edge(a: usize, b: usize, weight: f64) -> CandidateEdge {
        CandidateEdge { a, b, weight }
    }

    fn solve(vertices: usize, edges: &[(usize, usize, f64)]) -> Matching {
        let edges: Vec<CandidateEdge> = edges.iter().map(|&(a, b, w)| edge(a, b, w)).collect();
        BlossomSolver::default().solve(vertices, &edges).unwrap()
    }

    fn pairs(matching: &Matching) -> usize {
        matching.iter().filter(|m| m.is_some()).count() / 2
    }

    #[test]
    fn test_empty_and_single_edge() {
        assert_eq!(solve(3, &[]), vec![None, None, None]);
        assert_eq!(solve(2, &[(0, 1, -4.0)]), vec![Some(1), Some(0)]);
    }

    #[test]
    fn test_cardinality_beats_weight() {
        let matching = solve(4, &[(0, 1, 5.0), (1, 2, 11.0), (2, 3, 5.0)]);
        assert_eq!(matching, vec![Some(1), Some(0), Some(3), Some(2)]);
    }

    #[test]
    fn test_negative_weights() {
        let matching = solve(
            4,
            &[(0, 1, 2.0), (0, 2, -2.0), (1, 2, 1.0), (1, 3, -1.0), (2, 3, -6.0)],
        );
        assert_eq!(matching, vec![Some(2), Some(3), Some(0), Some(1)]);
    }

    #[test]
    fn test_outer_blossom() {
        let matching = solve(4, &[(0, 1, 8.0), (0, 2, 9.0), (1, 2, 10.0), (2, 3, 7.0)]);
        assert_eq!(matching, vec![Some(1), Some(0), Some(3), Some(2)]);
    }

    #[test]
    fn test_inner_blossom() {
        let matching = solve(
            6,
            &[(0, 1, 9.0), (0, 2, 8.0), (1, 2, 10.0), (0, 3, 5.0), (3, 4, 4.0), (0, 5, 3.0)],
        );
        assert_eq!(matching, vec![Some(5), Some(2), Some(1), Some(4), Some(3), Some(0)]);
    }

    #[test]
    fn test_inner_blossom_expanded_mid_stage() {
        let matching = solve(
            10,
            &[
                (0, 1, 45.0),
                (0, 4, 45.0),
                (1, 2, 50.0),
                (2, 3, 45.0),
                (3, 4, 50.0),
                (0, 5, 30.0),
                (2, 8, 35.0),
                (3, 7, 35.0),
                (4, 6, 26.0),
                (8, 9, 5.0),
            ],
        );
        assert_eq!(
            matching,
            vec![
                Some(5),
                Some(2),
                Some(1),
                Some(7),
                Some(6),
                Some(0),
                Some(4),
                Some(3),
                Some(9),
                Some(8),
            ]
        );
    }

    #[test]
    fn test_long_augmenting_path_in_large_field() {
        // The perfect matching of the path 0-1-2-3-4-5 needs the two cheap
        // middle edges to be given up for the three expensive ones
        let mut edges = vec![
            (0, 1, -100.0),
            (1, 2, 0.0),
            (2, 3, -100.0),
            (3, 4, 0.0),
            (4, 5, -100.0),
        ];
        for a in (6..22).step_by(2) {
            edges.push((a, a + 1, 0.0));
        }

        let matching = solve(22, &edges);
        assert_eq!(pairs(&matching), 11);
        assert_eq!(&matching[..6], &[Some(1), Some(0), Some(3), Some(2), Some(5), Some(4)]);
    }

    #[test]
    fn test_rejects_bad_edges() {
        let solver = BlossomSolver::default();
        assert!(solver.solve(2, &[edge(0, 2, 0.0)]).is_err());
        assert!(solver.solve(2, &[edge(1, 1, 0.0)]).is_err());
        assert!(solver.solve(2, &[edge(0, 1, f64::NAN)]).is_err());
    }

    #[test]
    fn test_agrees_with_exact_search_on_random_graphs() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for trial in 0..300 {
            let n = rng.gen_range(2..=12);
            let density = rng.gen_range(0.2..=1.0);
            let mut edges = Vec::new();
            for a in 0..n {
                for b in (a + 1)..n {
                    if rng.gen_bool(density) {
                        let weight = rng.gen_range(-2000..=500) as f64 / 100.0;
                        edges.push(edge(a, b, weight));
                    }
                }
            }

            let exact = ExactSolver::default().solve(n, &edges).unwrap();
            let blossom = BlossomSolver::default().solve(n, &edges).unwrap();
            crate::solver::check_contract(n, &edges, &blossom).unwrap();

            assert_eq!(pairs(&blossom), pairs(&exact), "trial {}: cardinality", trial);
            let diff = matching_weight(&edges, &blossom) - matching_weight(&edges, &exact);
            assert!(diff.abs() < 1e-6, "trial {}: weight differs by {}", trial, diff);
        }
    }
}
