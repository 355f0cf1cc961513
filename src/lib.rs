//! ChessOpponent: a computer opponent for standard chess.
//!
//! Given a position and a search depth, [`select_move`] returns a legal move
//! for the side to move, found by alpha-beta minimax over a hand-crafted
//! evaluation. Rules of chess come from a [`RulesAuthority`]; [`Game`] is the
//! one shipped here, backed by the `chess` crate.
//!
//! ```no_run
//! use chessopponent::{select_move, Depth, Game};
//!
//! let mut game = Game::new();
//! let mv = select_move(&mut game, Depth::new(2)).expect("start position has moves");
//! println!("{}", mv);
//! ```

pub mod config;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod types;
pub mod uci;

pub use config::EngineConfig;
pub use error::{ConfigError, RulesError};
pub use eval::evaluate;
pub use rules::{Game, MoveFilter, RulesAuthority};
pub use search::{select_move, SearchLimits, SearchResult, Searcher};
pub use types::{Depth, Move, Score};
