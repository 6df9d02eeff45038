//! Line-oriented text format for round input
//!
//! The layout an operator types at a prompt, whitespace separated:
//!
//! ```text
//! N                  number of players
//! C                  0 = first round (seeding), 1 = continuing
//! R                  round being paired (1-based)
//! s1 s2 ... sN       seeds
//! # continuing rounds only:
//! p1 p2 ... pN       scores
//! w1 w2 ... wN       games with white
//! b1 b2 ... bN       games with black
//! a b                (R - 1) * floor(N / 2) prior games, 0-based indices
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::str::FromStr;

use crate::error::{PairingError, Result};
use crate::state::RoundInput;

struct Tokens<'a> {
    inner: Box<dyn Iterator<Item = &'a str> + 'a>,
}

impl<'a> Tokens<'a> {
    fn new(content: &'a str) -> Self {
        let inner = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .flat_map(str::split_whitespace);
        Self {
            inner: Box::new(inner),
        }
    }

    fn next<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let token = self
            .inner
            .next()
            .ok_or_else(|| PairingError::shape(format!("input ended before {}", what)))?;
        token
            .parse()
            .map_err(|_| PairingError::shape(format!("cannot read {} from '{}'", what, token)))
    }

    fn take<T: FromStr>(&mut self, count: usize, what: &str) -> Result<Vec<T>> {
        (0..count)
            .map(|i| self.next(&format!("{} #{}", what, i + 1)))
            .collect()
    }

    fn remaining(&mut self) -> Option<&'a str> {
        self.inner.next()
    }
}

impl RoundInput {
    /// Parse the line-oriented text format
    pub fn from_text(content: &str) -> Result<Self> {
        let mut tokens = Tokens::new(content);

        let players: i64 = tokens.next("number of players")?;
        if players <= 0 {
            return Err(PairingError::shape(format!(
                "player count must be positive, got {}",
                players
            )));
        }
        let n = players as usize;

        let continuing: u8 = tokens.next("start flag")?;
        let round: u32 = tokens.next("round number")?;
        match (continuing, round) {
            (0, 1) => {}
            (1, r) if r >= 2 => {}
            (0, _) => {
                return Err(PairingError::shape(format!(
                    "start flag 0 pairs round 1, got round {}",
                    round
                )))
            }
            (1, _) => return Err(PairingError::shape("continuing rounds start at round 2")),
            (flag, _) => {
                return Err(PairingError::shape(format!(
                    "start flag must be 0 or 1, got {}",
                    flag
                )))
            }
        }

        let seeds = tokens.take(n, "seed")?;
        let mut input = RoundInput {
            players,
            round,
            seeds,
            ..Default::default()
        };

        if continuing == 1 {
            input.scores = tokens.take(n, "score")?;
            input.whites = tokens.take(n, "white count")?;
            input.blacks = tokens.take(n, "black count")?;

            let games = (round as usize - 1) * (n / 2);
            input.history = (0..games)
                .map(|i| -> Result<(usize, usize)> {
                    let what = format!("prior game #{}", i + 1);
                    Ok((tokens.next(&what)?, tokens.next(&what)?))
                })
                .collect::<Result<Vec<_>>>()?;
        }

        if let Some(extra) = tokens.remaining() {
            return Err(PairingError::shape(format!(
                "unexpected trailing input '{}'",
                extra
            )));
        }

        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_round() {
        let input = RoundInput::from_text("4\n0\n1\n1 2 3 4\n").unwrap();
        assert_eq!(input, RoundInput::initial(vec![1, 2, 3, 4]));
    }

    #[test]
    fn test_continuing_round() {
        let text = "\
# club championship
4
1
2
1 2 3 4
1 1 0 0
1 1 0 0
0 0 1 1
0 2
1 3
";
        let input = RoundInput::from_text(text).unwrap();
        assert_eq!(input.round, 2);
        assert_eq!(input.scores, vec![1.0, 1.0, 0.0, 0.0]);
        assert_eq!(input.whites, vec![1, 1, 0, 0]);
        assert_eq!(input.blacks, vec![0, 0, 1, 1]);
        assert_eq!(input.history, vec![(0, 2), (1, 3)]);
    }

    #[test]
    fn test_half_point_scores() {
        let text = "2 1 2\n1 2\n0.5 0.5\n1 0\n0 1\n0 1\n";
        let input = RoundInput::from_text(text).unwrap();
        assert_eq!(input.scores, vec![0.5, 0.5]);
    }

    #[test]
    fn test_negative_counts_are_read() {
        // Rejected later by RoundState validation, not by the parser
        let text = "2 1 2\n1 2\n1 0\n1 0\n-1 1\n0 1\n";
        let input = RoundInput::from_text(text).unwrap();
        assert_eq!(input.blacks, vec![-1, 1]);
    }

    #[test]
    fn test_truncated_history() {
        let text = "4 1 3\n1 2 3 4\n2 1 1 0\n1 1 1 1\n1 1 1 1\n0 2\n1 3\n0 1\n";
        let err = RoundInput::from_text(text).unwrap_err();
        assert!(err.to_string().contains("prior game #4"));
    }

    #[test]
    fn test_trailing_input() {
        let err = RoundInput::from_text("2 0 1\n1 2\n3\n").unwrap_err();
        assert!(err.to_string().contains("trailing"));
    }

    #[test]
    fn test_bad_flags() {
        assert!(RoundInput::from_text("2 0 2\n1 2\n").is_err());
        assert!(RoundInput::from_text("2 1 1\n1 2\n").is_err());
        assert!(RoundInput::from_text("2 2 1\n1 2\n").is_err());
        assert!(RoundInput::from_text("0 0 1\n").is_err());
    }

    #[test]
    fn test_unreadable_token() {
        let err = RoundInput::from_text("2 0 1\n1 x\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid round input: cannot read seed #2 from 'x'"
        );
    }
}
