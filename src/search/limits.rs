//! Search limits and the per-call time budget.
//!
//! A search is bounded by a maximum depth and a wall-clock deadline. The
//! deadline is polled at the top of every node; nothing is preempted.

use std::time::{Duration, Instant};

use crate::types::{Color, Depth};

/// Moves assumed left in the game when dividing a clock.
const DEFAULT_MOVES_TO_GO: u64 = 30;

/// What the caller asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum depth to search
    pub depth: Option<Depth>,
    /// Time for this move in milliseconds (overrides the configured budget)
    pub movetime: Option<u64>,
    /// White time remaining (ms)
    pub wtime: Option<u64>,
    /// Black time remaining (ms)
    pub btime: Option<u64>,
    /// Moves until next time control
    pub movestogo: Option<u32>,
}

impl SearchLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(depth: Depth) -> Self {
        Self {
            depth: Some(depth),
            ..Default::default()
        }
    }

    pub fn with_movetime(mut self, ms: u64) -> Self {
        self.movetime = Some(ms);
        self
    }

    /// Time to spend on this move.
    ///
    /// An explicit `movetime` wins. With a game clock the budget is a share
    /// of the remaining time, never more than `default`.
    pub fn time_budget(&self, side: Color, default: Duration) -> Duration {
        if let Some(mt) = self.movetime {
            return Duration::from_millis(mt);
        }

        let time_left = match side {
            Color::White => self.wtime,
            Color::Black => self.btime,
        };
        match time_left {
            Some(time) => {
                let moves_to_go = self
                    .movestogo
                    .map_or(DEFAULT_MOVES_TO_GO, u64::from)
                    .max(1);
                Duration::from_millis(time / moves_to_go).min(default)
            }
            None => default,
        }
    }
}

/// Deadline and depth bound of one top-level search.
#[derive(Debug, Clone, Copy)]
pub struct SearchBudget {
    start: Instant,
    deadline: Instant,
    max_depth: Depth,
}

impl SearchBudget {
    /// Starts the clock now.
    pub fn start(max_depth: Depth, time: Duration) -> Self {
        let start = Instant::now();
        Self {
            start,
            deadline: start + time,
            max_depth,
        }
    }

    #[inline]
    pub fn expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    #[inline]
    pub fn max_depth(&self) -> Depth {
        self.max_depth
    }

    #[inline]
    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_SECOND: Duration = Duration::from_millis(1000);

    #[test]
    fn test_movetime_overrides() {
        let limits = SearchLimits::new().with_movetime(250);
        assert_eq!(
            limits.time_budget(Color::White, ONE_SECOND),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_clock_share_capped_by_default() {
        let limits = SearchLimits {
            wtime: Some(3_000),
            btime: Some(300_000),
            ..Default::default()
        };
        assert_eq!(
            limits.time_budget(Color::White, ONE_SECOND),
            Duration::from_millis(100)
        );
        assert_eq!(limits.time_budget(Color::Black, ONE_SECOND), ONE_SECOND);
        assert_eq!(SearchLimits::new().time_budget(Color::Black, ONE_SECOND), ONE_SECOND);
    }

    #[test]
    fn test_zero_budget_is_expired() {
        let budget = SearchBudget::start(Depth::ONE, Duration::ZERO);
        assert!(budget.expired());
        let budget = SearchBudget::start(Depth::ONE, Duration::from_secs(60));
        assert!(!budget.expired());
        assert_eq!(budget.max_depth(), Depth::ONE);
    }
}
