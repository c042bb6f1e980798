// Game rules for the decision engine
//
// Legality, move application with undo, flood fill territory estimation,
// static evaluation and terminal detection. Everything here is synchronous and
// pure with respect to the caller's snapshot: the search works on its own copy.

use std::collections::VecDeque;

use crate::grid::Grid;
use crate::types::{Direction, Position};

/// Which of the two cycles a move belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Our cycle, the maximizing player
    Me,
    /// The other cycle, the minimizing player
    Opponent,
}

impl Side {
    fn index(self) -> usize {
        match self {
            Side::Me => 0,
            Side::Opponent => 1,
        }
    }
}

/// Borrowed view of a snapshot with both players resolved
#[derive(Debug, Clone, Copy)]
pub struct Matchup<'a> {
    pub grid: &'a Grid,
    pub me: Position,
    pub opponent: Position,
}

/// One applied move, enough to revert it exactly
#[derive(Debug, Clone, Copy)]
struct MoveRecord {
    side: Side,
    from: Position,
    to: Position,
}

/// Private, mutable search state: one grid copy per decision plus a stack of
/// applied moves that are reverted on the way back up the tree.
#[derive(Debug, Clone)]
pub struct SearchState {
    grid: Grid,
    positions: [Position; 2],
    history: Vec<MoveRecord>,
}

impl SearchState {
    /// Copies the snapshot grid; the caller's grid is never touched again
    pub fn new(matchup: &Matchup) -> Self {
        SearchState {
            grid: matchup.grid.clone(),
            positions: [matchup.me, matchup.opponent],
            history: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn position(&self, side: Side) -> Position {
        self.positions[side.index()]
    }

    /// Number of moves currently applied on top of the snapshot
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Moves `side` one cell and blocks the destination.
    /// The direction must be legal for that side.
    pub fn apply_move(&mut self, side: Side, direction: Direction) {
        let from = self.position(side);
        let to = direction.apply(&from);
        debug_assert!(self.grid.is_free(to), "apply_move on an illegal direction");

        self.grid.block(to);
        self.positions[side.index()] = to;
        self.history.push(MoveRecord { side, from, to });
    }

    /// Reverts the most recent `apply_move`. Returns false when nothing is applied.
    pub fn undo_move(&mut self) -> bool {
        match self.history.pop() {
            Some(record) => {
                self.grid.unblock(record.to);
                self.positions[record.side.index()] = record.from;
                true
            }
            None => false,
        }
    }

    /// Legal directions for one side, canonical order
    pub fn legal_moves(&self, side: Side) -> Vec<Direction> {
        legal_moves(&self.grid, self.position(side))
    }
}

/// Checks whether moving from `position` in `direction` lands on a free,
/// in-bounds cell
pub fn is_legal(grid: &Grid, position: Position, direction: Direction) -> bool {
    grid.is_free(direction.apply(&position))
}

/// Generates all legal moves from a position, in canonical direction order
pub fn legal_moves(grid: &Grid, position: Position) -> Vec<Direction> {
    Direction::all()
        .iter()
        .filter(|&&dir| is_legal(grid, position, dir))
        .copied()
        .collect()
}

fn has_legal_move(grid: &Grid, position: Position) -> bool {
    Direction::all()
        .iter()
        .any(|&dir| is_legal(grid, position, dir))
}

/// Counts the free cells reachable from `start` (4-neighbour BFS).
///
/// The fill expands from `start` even when it is occupied, since a cycle's
/// head always sits on its own trail, but only free cells are counted. An
/// occupied start therefore adds nothing itself and an out-of-bounds start
/// yields 0.
pub fn reachable_area(grid: &Grid, start: Position) -> usize {
    if !grid.contains(start) {
        return 0;
    }

    let mut visited = vec![false; grid.area()];
    let mut queue = VecDeque::new();

    visited[grid.index(start)] = true;
    queue.push_back(start);
    let mut area = 0;

    while let Some(pos) = queue.pop_front() {
        if grid.is_free(pos) {
            area += 1;
        }

        for dir in Direction::all() {
            let next = dir.apply(&pos);
            if !grid.is_free(next) {
                continue;
            }
            let idx = grid.index(next);
            if !visited[idx] {
                visited[idx] = true;
                queue.push_back(next);
            }
        }
    }

    area
}

/// Territory difference: our reachable area minus the opponent's
pub fn evaluate(state: &SearchState) -> i32 {
    let mine = reachable_area(&state.grid, state.position(Side::Me)) as i32;
    let theirs = reachable_area(&state.grid, state.position(Side::Opponent)) as i32;
    mine - theirs
}

/// True iff neither cycle has a legal move. Deliberately one ply deep: a
/// player with a legal but hopeless move is not terminal.
pub fn is_terminal(state: &SearchState) -> bool {
    !has_legal_move(&state.grid, state.position(Side::Me))
        && !has_legal_move(&state.grid, state.position(Side::Opponent))
}
