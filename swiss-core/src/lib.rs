//! Swiss Core - Round data model for Swiss-system pairing
//!
//! This crate provides what every pairing step shares:
//! - Raw round input (JSON or line-oriented text) and its validated,
//!   immutable `RoundState`
//! - Standings and colour differences (ranking)
//! - Pairing output types
//! - Configuration (colour bound, weight constants, policies)
//! - Error and warning types

pub mod config;
pub mod error;
pub mod pairing;
pub mod ranking;
pub mod state;
pub mod text;

// Re-exports for convenient access
pub use config::{ByeTieBreak, ColorPolicyKind, PairingConfig};
pub use error::{PairingError, PairingWarning, Result};
pub use pairing::{Pairing, RoundPairings};
pub use ranking::{color_differences, current_ranks, score_group_sizes, standings};
pub use state::{PriorPairingSet, RoundInput, RoundState};
