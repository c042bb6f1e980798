// Adversarial search and the per-turn decision driver
//
// Depth-limited minimax with alpha-beta pruning over alternating single-player
// plies. We maximize the territory difference, the opponent is assumed to
// minimize it.

use log::debug;

use crate::engine::{evaluate, is_legal, is_terminal, Matchup, SearchState, Side};
use crate::types::Direction;

/// Counters collected while searching one decision
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Interior and leaf nodes visited by `alpha_beta`
    pub nodes: u64,
    /// Static evaluations performed
    pub evaluations: u64,
    /// Sibling loops cut short by `beta <= alpha`
    pub cutoffs: u64,
}

/// A candidate first move and the score the search gave it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub direction: Direction,
    pub score: i32,
}

/// Outcome of one decision
#[derive(Debug, Clone)]
pub struct Decision {
    pub direction: Direction,
    /// `None` when we had no legal move and fell back to the default direction
    pub score: Option<i32>,
    /// Every legal first move in canonical order
    pub scored_moves: Vec<ScoredMove>,
    pub stats: SearchStats,
}

/// Minimax searcher with a fixed look-ahead
pub struct Searcher {
    max_depth: u8,
    stats: SearchStats,
}

impl Searcher {
    /// Creates a searcher looking `max_depth` plies ahead (0 is treated as 1)
    pub fn new(max_depth: u8) -> Self {
        Searcher {
            max_depth: max_depth.max(1),
            stats: SearchStats::default(),
        }
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Picks our move for this turn.
    ///
    /// Each legal first move is applied outside the tree, then the opponent
    /// replies at `max_depth - 1`. Only a strictly better score replaces the
    /// current best, so ties go to the earliest direction in canonical order.
    pub fn decide(&mut self, matchup: &Matchup) -> Decision {
        self.stats = SearchStats::default();

        let mut state = SearchState::new(matchup);
        let mut scored_moves = Vec::with_capacity(4);
        let mut best: Option<ScoredMove> = None;

        for dir in Direction::all() {
            if !is_legal(state.grid(), state.position(Side::Me), dir) {
                continue;
            }

            state.apply_move(Side::Me, dir);
            let score = self.alpha_beta(
                &mut state,
                self.max_depth - 1,
                false,
                i32::MIN,
                i32::MAX,
            );
            state.undo_move();

            debug!("Direction {} has score {}", dir, score);

            let candidate = ScoredMove {
                direction: dir,
                score,
            };
            scored_moves.push(candidate);

            if best.map_or(true, |b| score > b.score) {
                best = Some(candidate);
            }
        }

        Decision {
            direction: best.map(|b| b.direction).unwrap_or_default(),
            score: best.map(|b| b.score),
            scored_moves,
            stats: self.stats.clone(),
        }
    }

    /// Minimax with alpha-beta pruning.
    ///
    /// A side to move without any legal direction returns its untouched
    /// accumulator (`i32::MIN` for us, `i32::MAX` for the opponent) unless the
    /// position is terminal for both.
    pub fn alpha_beta(
        &mut self,
        state: &mut SearchState,
        depth: u8,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.stats.nodes += 1;

        if depth == 0 || is_terminal(state) {
            self.stats.evaluations += 1;
            return evaluate(state);
        }

        let side = if maximizing { Side::Me } else { Side::Opponent };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for dir in Direction::all() {
            if !is_legal(state.grid(), state.position(side), dir) {
                continue;
            }

            state.apply_move(side, dir);
            let value = self.alpha_beta(state, depth - 1, !maximizing, alpha, beta);
            state.undo_move();

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(value);
            } else {
                best = best.min(value);
                beta = beta.min(value);
            }

            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        best
    }
}
