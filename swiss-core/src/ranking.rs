//! Ranking - current standings and colour differences
//!
//! Pure functions over per-player arrays, indexed by player.

use crate::error::{PairingError, Result};

/// Colour difference per player: whites - blacks
pub fn color_differences(whites: &[u32], blacks: &[u32]) -> Result<Vec<i64>> {
    if whites.len() != blacks.len() {
        return Err(PairingError::shape(format!(
            "{} white counts but {} black counts",
            whites.len(),
            blacks.len()
        )));
    }

    Ok(whites
        .iter()
        .zip(blacks)
        .map(|(&w, &b)| i64::from(w) - i64::from(b))
        .collect())
}

/// Players ordered by descending score, ties by ascending index
///
/// `standings(scores)[p]` is the player at position `p`.
pub fn standings(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    // Stable sort keeps ascending index within equal scores
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}

/// Position of each player in the standings
///
/// `current_ranks(scores)[i]` is the 0-based rank of player `i`.
pub fn current_ranks(scores: &[f64]) -> Vec<usize> {
    let mut ranks = vec![0; scores.len()];
    for (position, player) in standings(scores).into_iter().enumerate() {
        ranks[player] = position;
    }
    ranks
}

/// Size of each player's score group (players sharing exactly that score)
pub fn score_group_sizes(scores: &[f64]) -> Vec<usize> {
    scores
        .iter()
        .map(|s| scores.iter().filter(|other| *other == s).count())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_differences() {
        let cd = color_differences(&[2, 1, 0], &[1, 2, 3]).unwrap();
        assert_eq!(cd, vec![1, -1, -3]);
    }

    #[test]
    fn test_color_differences_length_mismatch() {
        let err = color_differences(&[1, 2], &[1]).unwrap_err();
        assert!(matches!(err, PairingError::InputShape { .. }));
    }

    #[test]
    fn test_standings_descending_score() {
        let order = standings(&[1.0, 3.0, 2.0, 0.0]);
        assert_eq!(order, vec![1, 2, 0, 3]);
    }

    #[test]
    fn test_standings_ties_keep_input_order() {
        let order = standings(&[1.0, 2.0, 1.0, 2.0, 1.0]);
        assert_eq!(order, vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn test_current_ranks_is_inverse_of_standings() {
        let scores = [0.5, 2.0, 2.0, 1.0];
        let order = standings(&scores);
        let ranks = current_ranks(&scores);
        assert_eq!(ranks, vec![3, 0, 1, 2]);
        for (position, &player) in order.iter().enumerate() {
            assert_eq!(ranks[player], position);
        }
    }

    #[test]
    fn test_score_group_sizes() {
        let sizes = score_group_sizes(&[1.0, 1.5, 1.0, 0.0, 1.0]);
        assert_eq!(sizes, vec![3, 1, 3, 1, 3]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(standings(&[]).is_empty());
        assert!(current_ranks(&[]).is_empty());
        assert!(color_differences(&[], &[]).unwrap().is_empty());
    }
}
