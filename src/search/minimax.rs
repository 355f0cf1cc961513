//! Minimax with alpha-beta pruning.
//!
//! Scores stay in White's frame all the way down: White nodes maximize,
//! Black nodes minimize. Only the root converts to the mover's frame.
//!
//! Every `apply` is undone before the loop continues or breaks, so the
//! position is unchanged when any call returns. A timeout does not abort the
//! recursion: nodes past the deadline simply evaluate statically.

use super::limits::SearchBudget;
use crate::eval;
use crate::rules::{MoveFilter, RulesAuthority};
use crate::types::{Depth, Move, NodeCount, Score};

/// Per-call mutable search state.
#[derive(Debug)]
pub(super) struct SearchContext {
    pub budget: SearchBudget,
    pub nodes: NodeCount,
    pub timed_out: bool,
}

impl SearchContext {
    pub fn new(budget: SearchBudget) -> Self {
        Self {
            budget,
            nodes: 0,
            timed_out: false,
        }
    }

    /// Poll the deadline, remembering if it ever fired.
    #[inline]
    fn out_of_time(&mut self) -> bool {
        if self.budget.expired() {
            self.timed_out = true;
        }
        self.timed_out
    }
}

/// Apply a move the authority itself enumerated.
///
/// A refusal means the authority contradicts itself; there is no sensible
/// move to return after that.
#[inline]
pub(super) fn play<R: RulesAuthority + ?Sized>(position: &mut R, mv: Move) {
    assert!(
        position.apply(mv).is_some(),
        "rules authority rejected its own legal move {}",
        mv
    );
}

/// Static value of the position unless `depth` plies remain and there is
/// still time, in which case the minimax value with the given window.
pub(super) fn minimax<R: RulesAuthority + ?Sized>(
    position: &mut R,
    depth: Depth,
    mut alpha: Score,
    mut beta: Score,
    maximizing: bool,
    ctx: &mut SearchContext,
) -> Score {
    ctx.nodes += 1;

    if depth.is_leaf() || position.is_game_over() || ctx.out_of_time() {
        return eval::evaluate(position);
    }

    let moves = position.legal_moves(MoveFilter::All);

    if maximizing {
        let mut best = Score::NEG_INFINITY;
        for mv in moves {
            play(position, mv);
            let value = minimax(position, depth - 1, alpha, beta, false, ctx);
            position.undo();

            best = best.max(value);
            alpha = alpha.max(value);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = Score::INFINITY;
        for mv in moves {
            play(position, mv);
            let value = minimax(position, depth - 1, alpha, beta, true, ctx);
            position.undo();

            best = best.min(value);
            beta = beta.min(value);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}
