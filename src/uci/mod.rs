//! UCI (Universal Chess Interface) front end.
//!
//! This is the host side of the engine: it owns the game, turns difficulty
//! tiers into depths and prints moves. The search itself knows nothing about
//! any of it.
//! See: http://wbec-ridderkerk.nl/html/UCIProtocol.html

mod handler;
mod parser;

pub use handler::UciHandler;
pub use parser::{parse_command, UciCommand};

use crate::search::SearchLimits;
use crate::types::Depth;

/// UCI engine identification
pub const ENGINE_NAME: &str = "ChessOpponent";
pub const ENGINE_AUTHOR: &str = "ChessOpponent developers";

/// Parameters of a "go" command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    /// Search to this depth
    pub depth: Option<Depth>,
    /// Search for this many milliseconds
    pub movetime: Option<u64>,
    /// White time remaining (ms)
    pub wtime: Option<u64>,
    /// Black time remaining (ms)
    pub btime: Option<u64>,
    /// Moves until next time control
    pub movestogo: Option<u32>,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create params for a fixed depth search
    pub fn fixed_depth(depth: i32) -> Self {
        Self {
            depth: Some(Depth::new(depth)),
            ..Default::default()
        }
    }

    /// Search limits, using `default_depth` when no depth was given.
    pub fn to_limits(&self, default_depth: Depth) -> SearchLimits {
        SearchLimits {
            depth: Some(self.depth.unwrap_or(default_depth)),
            movetime: self.movetime,
            wtime: self.wtime,
            btime: self.btime,
            movestogo: self.movestogo,
        }
    }
}
