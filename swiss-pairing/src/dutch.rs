//! Dutch seeding pairing for the first round
//!
//! Level 2 - Phase-level implementation

use swiss_core::{ByeTieBreak, Pairing, PairingWarning};

/// Pair a field by seed: top half against bottom half.
///
/// Players are ordered by ascending seed (ties by index). With an odd field
/// the holder of the highest seed sits out first; the remaining players are
/// split into two equal halves and position `i` of the top half (white) meets
/// position `i` of the bottom half (black).
///
/// # Returns
/// Games in top-half order followed by the bye, plus a warning when the bye
/// had to be chosen among several players sharing the highest seed.
pub fn dutch_pairings(
    seeds: &[u32],
    tie_break: ByeTieBreak,
) -> (Vec<Pairing>, Option<PairingWarning>) {
    let mut order: Vec<usize> = (0..seeds.len()).collect();
    order.sort_by_key(|&i| (seeds[i], i));

    let (bye, warning) = if seeds.len() % 2 == 1 {
        choose_bye(seeds, tie_break)
    } else {
        (None, None)
    };
    if let Some(player) = bye {
        order.retain(|&i| i != player);
    }

    let half = order.len() / 2;
    let (top, bottom) = order.split_at(half);

    let mut pairings: Vec<Pairing> = top
        .iter()
        .zip(bottom)
        .map(|(&white, &black)| Pairing::Game { white, black })
        .collect();

    if let Some(player) = bye {
        pairings.push(Pairing::Bye { player });
    }

    (pairings, warning)
}

/// Player with the numerically highest seed, tie-broken by policy
fn choose_bye(seeds: &[u32], tie_break: ByeTieBreak) -> (Option<usize>, Option<PairingWarning>) {
    let Some(&max_seed) = seeds.iter().max() else {
        return (None, None);
    };

    let candidates: Vec<usize> = (0..seeds.len()).filter(|&i| seeds[i] == max_seed).collect();
    let chosen = tie_break.choose(&candidates);

    let warning = match chosen {
        Some(chosen) if candidates.len() > 1 => {
            let warning = PairingWarning::DuplicateSeedAmbiguity {
                seed: max_seed,
                candidates,
                chosen,
            };
            tracing::warn!("{}", warning);
            Some(warning)
        }
        _ => None,
    };

    (chosen, warning)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn games(pairings: &[Pairing]) -> Vec<(usize, usize)> {
        pairings
            .iter()
            .filter_map(|p| match *p {
                Pairing::Game { white, black } => Some((white, black)),
                Pairing::Bye { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_eight_players_in_seed_order() {
        let seeds: Vec<u32> = (1..=8).collect();
        let (pairings, warning) = dutch_pairings(&seeds, ByeTieBreak::LowestIndex);

        assert_eq!(games(&pairings), vec![(0, 4), (1, 5), (2, 6), (3, 7)]);
        assert!(pairings.iter().all(|p| !p.is_bye()));
        assert!(warning.is_none());
    }

    #[test]
    fn test_seven_players_bye_to_highest_seed() {
        let seeds: Vec<u32> = (1..=7).collect();
        let (pairings, warning) = dutch_pairings(&seeds, ByeTieBreak::LowestIndex);

        assert_eq!(games(&pairings), vec![(0, 3), (1, 4), (2, 5)]);
        assert_eq!(pairings.last(), Some(&Pairing::Bye { player: 6 }));
        assert!(warning.is_none());
    }

    #[test]
    fn test_seeds_not_in_index_order() {
        // Player 3 is top seed, player 0 is bottom seed
        let seeds = vec![4, 2, 3, 1];
        let (pairings, _) = dutch_pairings(&seeds, ByeTieBreak::LowestIndex);
        assert_eq!(games(&pairings), vec![(3, 2), (1, 0)]);
    }

    #[test]
    fn test_duplicate_max_seed_warns_and_breaks_tie() {
        let seeds = vec![1, 5, 2, 5, 3];

        let (pairings, warning) = dutch_pairings(&seeds, ByeTieBreak::LowestIndex);
        assert_eq!(pairings.last(), Some(&Pairing::Bye { player: 1 }));
        assert_eq!(
            warning,
            Some(PairingWarning::DuplicateSeedAmbiguity {
                seed: 5,
                candidates: vec![1, 3],
                chosen: 1,
            })
        );
        // Remaining order by seed: 0 (1), 2 (2), 4 (3), 3 (5)
        assert_eq!(games(&pairings), vec![(0, 4), (2, 3)]);

        let (pairings, _) = dutch_pairings(&seeds, ByeTieBreak::HighestIndex);
        assert_eq!(pairings.last(), Some(&Pairing::Bye { player: 3 }));
    }

    #[test]
    fn test_single_player_gets_bye() {
        let (pairings, warning) = dutch_pairings(&[1], ByeTieBreak::LowestIndex);
        assert_eq!(pairings, vec![Pairing::Bye { player: 0 }]);
        assert!(warning.is_none());
    }

    #[test]
    fn test_empty_field() {
        let (pairings, warning) = dutch_pairings(&[], ByeTieBreak::LowestIndex);
        assert!(pairings.is_empty());
        assert!(warning.is_none());
    }
}
