// Light cycles snapshot types
// One snapshot arrives per turn; see the `frame`/`grid`/`players` JSON layout

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grid::Grid;

/// 2D coordinate on the grid. `x` grows to the right, `y` grows downwards.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

/// Represents the four possible movement directions for a light cycle
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all directions in canonical order (also the tie-break order)
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Converts direction to string representation for API response
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Parses a direction name, ignoring case
    pub fn parse(s: &str) -> Result<Direction, String> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }

    /// Unit displacement vector as (dx, dy)
    pub fn vector(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, pos: &Position) -> Position {
        let (dx, dy) = self.vector();
        Position {
            x: pos.x + dx,
            y: pos.y + dy,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cycle on the grid, identified by its name
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub position: Position,
}

/// Complete per-turn snapshot received from the game server
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GameState {
    #[serde(default)]
    pub frame: u32,
    pub grid: Grid,
    pub players: Vec<Player>,
}

impl GameState {
    /// Looks up a player by name
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_vectors_use_screen_coordinates() {
        let origin = Position::new(1, 1);
        assert_eq!(Direction::Up.apply(&origin), Position::new(1, 0));
        assert_eq!(Direction::Down.apply(&origin), Position::new(1, 2));
        assert_eq!(Direction::Left.apply(&origin), Position::new(0, 1));
        assert_eq!(Direction::Right.apply(&origin), Position::new(2, 1));
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!(Direction::parse("up").unwrap(), Direction::Up);
        assert_eq!(Direction::parse("Down").unwrap(), Direction::Down);
        assert_eq!(Direction::parse("LEFT").unwrap(), Direction::Left);
        assert_eq!(Direction::parse(" right ").unwrap(), Direction::Right);
        assert!(Direction::parse("north").is_err());
    }

    #[test]
    fn test_snapshot_json_layout() {
        let json = r#"{
            "frame": 4,
            "grid": { "width": 2, "height": 2, "cells": [1, 0, 0, 7] },
            "players": [
                { "name": "alpha", "position": { "x": 0, "y": 0 } },
                { "name": "beta", "position": { "x": 1, "y": 1 } }
            ]
        }"#;

        let state: GameState = serde_json::from_str(json).expect("snapshot should parse");
        assert_eq!(state.frame, 4);
        assert_eq!(state.grid.width(), 2);
        assert!(!state.grid.is_free(Position::new(0, 0)));
        assert!(state.grid.is_free(Position::new(1, 0)));
        assert!(!state.grid.is_free(Position::new(1, 1)));
        assert_eq!(state.player("beta").unwrap().position, Position::new(1, 1));
        assert!(state.player("gamma").is_none());
    }

    #[test]
    fn test_snapshot_rejects_wrong_cell_count() {
        let json = r#"{
            "grid": { "width": 2, "height": 2, "cells": [0, 0, 0] },
            "players": []
        }"#;

        assert!(serde_json::from_str::<GameState>(json).is_err());
    }

    #[test]
    fn test_direction_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Direction::Left).unwrap(), "\"left\"");
    }
}
