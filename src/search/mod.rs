//! Search module for the chess engine.
//!
//! # Architecture
//! - `Searcher`: top-level controller holding the time budget
//! - `minimax`: recursive alpha-beta search in White's frame
//! - `ordering`: root move ordering heuristic
//! - `limits`: search limits and the per-call deadline
//!
//! Each call is independent: no tables or history survive between searches,
//! and the position is handed back exactly as it came in.

mod limits;
mod minimax;
mod ordering;

pub use limits::{SearchBudget, SearchLimits};
pub use ordering::{
    move_score, order_moves, CASTLE_BONUS, CENTER_BONUS, KING_MOVE_PENALTY, PROMOTION_BONUS,
};

use std::time::Duration;

use log::{debug, trace};
use rand::seq::SliceRandom;

use crate::config::EngineConfig;
use crate::rules::{MoveFilter, RulesAuthority};
use crate::types::{color_sign, Color, Depth, Move, NodeCount, Score};
use minimax::{minimax, play, SearchContext};

/// Search statistics collected during search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: NodeCount,
    pub depth: Depth,
    pub time_ms: u64,
    /// The deadline passed before the search finished
    pub timed_out: bool,
}

impl SearchStats {
    pub fn nps(&self) -> u64 {
        if self.time_ms > 0 {
            self.nodes * 1000 / self.time_ms
        } else {
            0
        }
    }
}

/// Result from a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` only when the position has no legal moves
    pub best_move: Option<Move>,
    /// Value of `best_move` for the side to move (positive is good for it)
    pub score: Score,
    /// The move was drawn at random instead of searched
    pub random_fallback: bool,
    pub stats: SearchStats,
}

/// Main search controller.
#[derive(Debug, Clone)]
pub struct Searcher {
    move_time: Duration,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl Searcher {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            move_time: config.move_time(),
        }
    }

    pub fn with_move_time(move_time: Duration) -> Self {
        Self { move_time }
    }

    #[inline]
    pub fn move_time(&self) -> Duration {
        self.move_time
    }

    /// Best move for the side to move, searched `depth` plies deep.
    ///
    /// Returns `None` only for a position without legal moves.
    pub fn select_move<R: RulesAuthority + ?Sized>(
        &self,
        position: &mut R,
        depth: Depth,
    ) -> Option<Move> {
        self.search(position, &SearchLimits::depth(depth)).best_move
    }

    /// Run the search with given limits. Missing depth means one ply.
    pub fn search<R: RulesAuthority + ?Sized>(
        &self,
        position: &mut R,
        limits: &SearchLimits,
    ) -> SearchResult {
        let side = position.side_to_move();
        let depth = limits.depth.unwrap_or(Depth::ONE).max(Depth::ONE);
        let budget = SearchBudget::start(depth, limits.time_budget(side, self.move_time));
        let mut ctx = SearchContext::new(budget);

        let result = search_root(position, &mut ctx);

        match result.best_move {
            Some(m) => debug!(
                "depth {} move {} score {} nodes {} in {}ms{}{}",
                depth,
                m,
                result.score,
                result.stats.nodes,
                result.stats.time_ms,
                if result.stats.timed_out { " (timed out)" } else { "" },
                if result.random_fallback { " (random)" } else { "" },
            ),
            None => debug!("no legal moves for {:?}", side),
        }
        result
    }
}

/// Convenience wrapper using the default one-second budget.
pub fn select_move<R: RulesAuthority + ?Sized>(position: &mut R, depth: Depth) -> Option<Move> {
    Searcher::default().select_move(position, depth)
}

fn search_root<R: RulesAuthority + ?Sized>(
    position: &mut R,
    ctx: &mut SearchContext,
) -> SearchResult {
    let depth = ctx.budget.max_depth();
    let mut moves = position.legal_moves(MoveFilter::All);

    if moves.is_empty() {
        return finish(ctx, None, Score::NEG_INFINITY, false);
    }

    if ctx.budget.expired() {
        ctx.timed_out = true;
        let pick = moves.choose(&mut rand::thread_rng()).copied();
        return finish(ctx, pick, Score::NEG_INFINITY, true);
    }

    ordering::order_moves(position, &mut moves);

    // Children are searched in White's frame; flip into the mover's frame here.
    let sign = color_sign(position.side_to_move());
    let child_maximizing = position.side_to_move() == Color::Black;

    let mut best_move = None;
    let mut best_value = Score::NEG_INFINITY;
    let mut alpha = Score::NEG_INFINITY;
    let beta = Score::INFINITY;

    for &mv in &moves {
        let (lo, hi) = if sign > 0 { (alpha, beta) } else { (-beta, -alpha) };

        play(position, mv);
        // Mate scores carry no distance, so a deeper mate could outrank this one
        if position.is_checkmate() {
            position.undo();
            ctx.nodes += 1;
            trace!("root {} mates", mv);
            return finish(ctx, Some(mv), Score::INFINITY, false);
        }
        let value = minimax(position, depth - 1, lo, hi, child_maximizing, ctx).signed(sign);
        position.undo();
        trace!("root {} = {}", mv, value);

        if value > best_value {
            best_value = value;
            best_move = Some(mv);
        }
        alpha = alpha.max(value);
        if alpha >= beta {
            break;
        }
    }

    match best_move {
        Some(m) => finish(ctx, Some(m), best_value, false),
        // Every move loses to a forced mate; any of them will do.
        None => {
            let pick = moves.choose(&mut rand::thread_rng()).copied();
            finish(ctx, pick, best_value, true)
        }
    }
}

fn finish(
    ctx: &SearchContext,
    best_move: Option<Move>,
    score: Score,
    random_fallback: bool,
) -> SearchResult {
    SearchResult {
        best_move,
        score,
        random_fallback,
        stats: SearchStats {
            nodes: ctx.nodes,
            depth: ctx.budget.max_depth(),
            time_ms: ctx.budget.elapsed().as_millis() as u64,
            timed_out: ctx.timed_out,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Game;

    fn patient() -> Searcher {
        Searcher::with_move_time(Duration::from_secs(600))
    }

    #[test]
    fn test_search_returns_legal_move() {
        let mut game = Game::new();
        let result = patient().search(&mut game, &SearchLimits::depth(Depth::new(2)));
        let mv = result.best_move.unwrap();
        assert!(game.legal_moves(MoveFilter::All).contains(&mv));
        assert!(!result.random_fallback);
        assert!(!result.stats.timed_out);
        assert!(result.stats.nodes > 20);
    }

    #[test]
    fn test_no_legal_moves() {
        let mut game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(patient().select_move(&mut game, Depth::new(2)), None);
    }

    #[test]
    fn test_zero_budget_falls_back_to_random() {
        let mut game = Game::new();
        let before = game.clone();
        let limits = SearchLimits::depth(Depth::new(3)).with_movetime(0);
        let result = patient().search(&mut game, &limits);
        assert!(result.random_fallback);
        assert!(result.stats.timed_out);
        assert!(game.legal_moves(MoveFilter::All).contains(&result.best_move.unwrap()));
        assert_eq!(game, before);
    }

    #[test]
    fn test_immediate_mate_beats_ordered_capture() {
        // Rxe4 sorts first and also wins, but only Rb8 mates now
        let mut game = Game::from_fen("7k/5K1p/7P/8/p3n3/8/4R3/1R6 w - - 0 1").unwrap();
        let before = game.clone();
        for depth in 1..=3 {
            let result = patient().search(&mut game, &SearchLimits::depth(Depth::new(depth)));
            assert_eq!(result.best_move.unwrap().uci(), "b1b8", "depth {}", depth);
            assert_eq!(result.score, Score::INFINITY);
            assert!(!result.random_fallback);
            assert_eq!(game, before);
        }
    }

    #[test]
    fn test_black_root_prefers_black() {
        // Black to move can take a hanging white queen
        let mut game = Game::from_fen("4k3/8/8/8/4p3/3Q4/8/4K3 b - - 0 1").unwrap();
        for depth in 1..=2 {
            let result = patient().search(&mut game, &SearchLimits::depth(Depth::new(depth)));
            assert_eq!(result.best_move.unwrap().uci(), "e4d3");
            assert!(result.score.raw() > 0);
        }
    }
}
