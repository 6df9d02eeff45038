//! Simulate command - play a Swiss tournament with random results
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: report_simulation()
//! - Level 3: (delegated to swiss-pairing crate)
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use swiss_core::PairingConfig;
use swiss_pairing::{
    simulate_tournament, AutoSolver, SimulationConfig, SimulationResult, DEFAULT_EXACT_LIMIT,
    MAX_EXACT_LIMIT,
};

use crate::pair_cmd::{format_pairings, ColorPolicyArg};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of players (seeded 1..=N in index order)
    #[arg(long, default_value = "8")]
    pub players: u32,

    /// Rounds to play
    #[arg(long, default_value = "5")]
    pub rounds: u32,

    /// Random seed for game results
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Probability of a draw
    #[arg(long, default_value = "0.3")]
    pub draw_rate: f64,

    /// Colour assignment after matching
    #[arg(long, value_enum, default_value = "balancing")]
    pub color_policy: ColorPolicyArg,

    /// Largest field solved by subset search; larger fields use the blossom solver
    #[arg(long, default_value_t = DEFAULT_EXACT_LIMIT)]
    pub exact_limit: usize,

    /// Write the input for the following round to this JSON file
    #[arg(long, value_name = "FILE")]
    pub save_next: Option<PathBuf>,

    /// Output the whole simulation as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
pub fn run(args: SimulateArgs) -> Result<()> {
    anyhow::ensure!(args.players > 0, "need at least one player");
    anyhow::ensure!(
        (0.0..=1.0).contains(&args.draw_rate),
        "draw rate must be within [0, 1], got {}",
        args.draw_rate
    );
    anyhow::ensure!(
        args.exact_limit <= MAX_EXACT_LIMIT,
        "exact limit must be at most {}, got {}",
        MAX_EXACT_LIMIT,
        args.exact_limit
    );

    let seeds: Vec<u32> = (1..=args.players).collect();
    let sim = SimulationConfig {
        draw_rate: args.draw_rate,
        ..SimulationConfig::new(args.rounds).with_seed(args.seed)
    };
    let config = PairingConfig::default().with_color_policy(args.color_policy.into());
    let solver = AutoSolver::with_exact_limit(args.exact_limit);

    tracing::info!(
        "Simulating {} rounds for {} players (seed={})",
        args.rounds,
        args.players,
        args.seed
    );

    let result = simulate_tournament(&seeds, &sim, &config, &solver)
        .context("Simulation stopped")?;

    if let Some(path) = &args.save_next {
        result
            .next_round_input()
            .save(path)
            .with_context(|| format!("Failed to save next round input: {}", path.display()))?;
        tracing::info!("Next round input saved to {}", path.display());
    }

    report_simulation(&result, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn report_simulation(result: &SimulationResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{}", format_simulation(result));
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - FORMATTING UTILITIES
// ============================================================================

fn format_simulation(result: &SimulationResult) -> String {
    let mut out = String::new();
    for round in &result.rounds {
        out.push_str(&format_pairings(&round.pairings));
        out.push('\n');
    }

    out.push_str("=== FINAL STANDINGS ===\n");
    for (position, player) in result.final_standings().into_iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. Player {:<4} {:>4.1}  (W{} B{})\n",
            position + 1,
            player + 1,
            result.scores[player],
            result.whites[player],
            result.blacks[player]
        ));
    }
    out
}
