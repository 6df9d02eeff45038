//! Pair command - pair the next round from a round input file
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_input(), build_config(), report_pairings()
//! - Level 3: (delegated to swiss-pairing crate)
//! - Level 4: formatting utilities

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use swiss_core::{
    ByeTieBreak, ColorPolicyKind, Pairing, PairingConfig, RoundInput, RoundPairings, RoundState,
};
use swiss_pairing::{pair_round, AutoSolver, DEFAULT_EXACT_LIMIT, MAX_EXACT_LIMIT};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PairArgs {
    /// Round input file ("-" reads standard input)
    #[arg(long, short, value_name = "FILE")]
    pub input: PathBuf,

    /// Input format (defaults to json for .json files, text otherwise)
    #[arg(long, value_enum)]
    pub format: Option<InputFormat>,

    /// Pairing configuration JSON file; flags below override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Colour balance bound (FIDE: 2)
    #[arg(long)]
    pub beta: Option<f64>,

    /// Colour assignment after matching
    #[arg(long, value_enum)]
    pub color_policy: Option<ColorPolicyArg>,

    /// Round-1 bye among players sharing the highest seed
    #[arg(long, value_enum)]
    pub bye_tie_break: Option<ByeTieBreakArg>,

    /// Largest field solved by subset search; larger fields use the blossom solver
    #[arg(long, default_value_t = DEFAULT_EXACT_LIMIT)]
    pub exact_limit: usize,

    /// Output pairings as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    Json,
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorPolicyArg {
    Balancing,
    Parity,
}

impl From<ColorPolicyArg> for ColorPolicyKind {
    fn from(arg: ColorPolicyArg) -> Self {
        match arg {
            ColorPolicyArg::Balancing => ColorPolicyKind::Balancing,
            ColorPolicyArg::Parity => ColorPolicyKind::RoundParity,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ByeTieBreakArg {
    Lowest,
    Highest,
}

impl From<ByeTieBreakArg> for ByeTieBreak {
    fn from(arg: ByeTieBreakArg) -> Self {
        match arg {
            ByeTieBreakArg::Lowest => ByeTieBreak::LowestIndex,
            ByeTieBreakArg::Highest => ByeTieBreak::HighestIndex,
        }
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run pair command
///
/// This function reads like a table of contents:
/// 1. Load and validate the round input
/// 2. Build the pairing configuration
/// 3. Pair the round
/// 4. Report pairings
pub fn run(args: PairArgs) -> Result<()> {
    let input = load_input(&args)?;
    let state = RoundState::from_input(&input).context("Round input rejected")?;
    let config = build_config(&args)?;

    tracing::info!(
        "Pairing round {} for {} players (beta={}, colours={:?})",
        state.round(),
        state.len(),
        config.beta,
        config.color_policy
    );

    let solver =
        AutoSolver::with_exact_limit(args.exact_limit).with_precision(config.weight_precision);
    let pairings = pair_round(&state, &config, &solver)
        .with_context(|| format!("Failed to pair round {}", state.round()))?;

    report_pairings(&pairings, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Read the round input in the requested or inferred format
fn load_input(args: &PairArgs) -> Result<RoundInput> {
    let format = args.format.unwrap_or_else(|| infer_format(&args.input));

    let input = match format {
        InputFormat::Json if !is_stdin(&args.input) => RoundInput::load(&args.input),
        InputFormat::Json => RoundInput::from_json(&read_source(&args.input)?),
        InputFormat::Text => RoundInput::from_text(&read_source(&args.input)?),
    };
    input.with_context(|| format!("Failed to read round input: {}", args.input.display()))
}

/// Configuration file (if any) with command-line overrides applied
fn build_config(args: &PairArgs) -> Result<PairingConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?
        }
        None => PairingConfig::default(),
    };

    if let Some(beta) = args.beta {
        anyhow::ensure!(beta > 0.0, "beta must be positive, got {}", beta);
        config.beta = beta;
    }
    if let Some(policy) = args.color_policy {
        config.color_policy = policy.into();
    }
    if let Some(tie_break) = args.bye_tie_break {
        config.bye_tie_break = tie_break.into();
    }
    anyhow::ensure!(
        args.exact_limit <= MAX_EXACT_LIMIT,
        "exact limit must be at most {}, got {}",
        MAX_EXACT_LIMIT,
        args.exact_limit
    );

    Ok(config)
}

/// Print pairings as text or JSON
fn report_pairings(pairings: &RoundPairings, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(pairings)?);
    } else {
        print!("{}", format_pairings(pairings));
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - FORMATTING UTILITIES
// ============================================================================

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_source(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read standard input")?;
        return Ok(content);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn infer_format(path: &Path) -> InputFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
        _ => InputFormat::Text,
    }
}

/// Human-readable pairings, players numbered from 1, followed by the
/// round's games in the history layout of the text input
pub fn format_pairings(pairings: &RoundPairings) -> String {
    let mut out = format!("=== ROUND {} MATCHES ===\n", pairings.round);
    for pairing in &pairings.pairings {
        match *pairing {
            Pairing::Game { white, black } => out.push_str(&format!(
                "Player {} (White) vs Player {} (Black)\n",
                white + 1,
                black + 1
            )),
            Pairing::Bye { player } => out.push_str(&format!("Bye: Player {}\n", player + 1)),
        }
    }
    for warning in &pairings.warnings {
        out.push_str(&format!("Warning: {}\n", warning));
    }
    out.push_str(&format_history(pairings));
    out
}

/// Games as 0-based `white black` lines under a comment header; appended to
/// the next round's text input as-is
pub fn format_history(pairings: &RoundPairings) -> String {
    let mut out = format!("# round {} games (white black, 0-based)\n", pairings.round);
    for (white, black) in pairings.games() {
        out.push_str(&format!("{} {}\n", white, black));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(input: &str) -> PairArgs {
        PairArgs {
            input: PathBuf::from(input),
            format: None,
            config: None,
            beta: None,
            color_policy: None,
            bye_tie_break: None,
            exact_limit: DEFAULT_EXACT_LIMIT,
            json: false,
        }
    }

    #[test]
    fn test_infer_format() {
        assert_eq!(infer_format(Path::new("round.json")), InputFormat::Json);
        assert_eq!(infer_format(Path::new("round.JSON")), InputFormat::Json);
        assert_eq!(infer_format(Path::new("round.txt")), InputFormat::Text);
        assert_eq!(infer_format(Path::new("-")), InputFormat::Text);
    }

    #[test]
    fn test_build_config_overrides() {
        let mut a = args("round.txt");
        a.beta = Some(1.5);
        a.color_policy = Some(ColorPolicyArg::Parity);
        a.bye_tie_break = Some(ByeTieBreakArg::Highest);

        let config = build_config(&a).unwrap();
        assert_eq!(config.beta, 1.5);
        assert_eq!(config.color_policy, ColorPolicyKind::RoundParity);
        assert_eq!(config.bye_tie_break, ByeTieBreak::HighestIndex);
        assert_eq!(config.score_weight, 10000.0);
    }

    #[test]
    fn test_build_config_rejects_bad_beta() {
        let mut a = args("round.txt");
        a.beta = Some(0.0);
        assert!(build_config(&a).is_err());
    }

    #[test]
    fn test_format_pairings_is_one_based() {
        let pairings = RoundPairings {
            round: 2,
            pairings: vec![
                Pairing::Game { white: 0, black: 3 },
                Pairing::Bye { player: 4 },
            ],
            warnings: vec![],
        };
        assert_eq!(
            format_pairings(&pairings),
            "=== ROUND 2 MATCHES ===\n\
             Player 1 (White) vs Player 4 (Black)\n\
             Bye: Player 5\n\
             # round 2 games (white black, 0-based)\n\
             0 3\n"
        );
    }

    #[test]
    fn test_build_config_rejects_oversized_exact_limit() {
        let mut a = args("round.txt");
        a.exact_limit = MAX_EXACT_LIMIT + 1;
        assert!(build_config(&a).is_err());

        a.exact_limit = MAX_EXACT_LIMIT;
        assert!(build_config(&a).is_ok());
    }

    #[test]
    fn test_printed_games_feed_next_round() {
        let round1_input = RoundInput::from_text("6 0 1\n1 2 3 4 5 6\n").unwrap();
        let state = RoundState::from_input(&round1_input).unwrap();
        let round1 = pair_round(&state, &PairingConfig::default(), &AutoSolver::default()).unwrap();

        // White won every board of round 1
        let printed = format_pairings(&round1);
        let block = &printed[printed.find("# round 1").unwrap()..];
        let round2_text = format!(
            "6 1 2\n1 2 3 4 5 6\n1 1 1 0 0 0\n1 1 1 0 0 0\n0 0 0 1 1 1\n{}",
            block
        );

        let round2_input = RoundInput::from_text(&round2_text).unwrap();
        let played: Vec<(usize, usize)> = round1.games().collect();
        assert_eq!(round2_input.history, played);

        let state = RoundState::from_input(&round2_input).unwrap();
        let round2 = pair_round(&state, &PairingConfig::default(), &AutoSolver::default()).unwrap();
        assert!(round2.covers_exactly(6));
        for (white, black) in round2.games() {
            assert!(!state.prior().contains(white, black));
        }
    }

    #[test]
    fn test_load_input_reads_json_file() {
        let path = std::env::temp_dir().join(format!("swiss-pair-{}.json", std::process::id()));
        RoundInput::initial(vec![1, 2, 3, 4]).save(&path).unwrap();

        let loaded = load_input(&args(path.to_str().unwrap()));
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.unwrap(), RoundInput::initial(vec![1, 2, 3, 4]));
    }
}
