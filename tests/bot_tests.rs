// Integration tests for the Bot's per-frame API
//
// Exercises get_move end to end: snapshot in, JSON move out, including the
// fallback paths for malformed snapshots.

use cycles_bot::bot::Bot;
use cycles_bot::config::Config;
use cycles_bot::types::{Direction, GameState};

fn bot() -> Bot {
    Bot::new(Config::default_hardcoded())
}

fn snapshot(json: &str) -> GameState {
    serde_json::from_str(json).expect("test snapshot should parse")
}

#[tokio::test]
async fn test_get_move_on_open_board() {
    let state = snapshot(
        r#"{
            "frame": 0,
            "grid": { "width": 3, "height": 3, "cells": [1,0,0, 0,0,0, 0,0,2] },
            "players": [
                { "name": "minimax", "position": { "x": 0, "y": 0 } },
                { "name": "rival", "position": { "x": 2, "y": 2 } }
            ]
        }"#,
    );

    let response = bot().get_move(&state).await;
    assert_eq!(response["move"], "down");
}

#[tokio::test]
async fn test_get_move_in_corridor() {
    let state = snapshot(
        r#"{
            "frame": 5,
            "grid": { "width": 5, "height": 1, "cells": [0,1,0,0,2] },
            "players": [
                { "name": "rival", "position": { "x": 4, "y": 0 } },
                { "name": "minimax", "position": { "x": 1, "y": 0 } }
            ]
        }"#,
    );

    let response = bot().get_move(&state).await;
    assert_eq!(response["move"], "right");
}

#[tokio::test]
async fn test_get_move_without_opponent_falls_back_to_legal_move() {
    // Up and Left are off-grid, so the first legal move is Down
    let state = snapshot(
        r#"{
            "frame": 1,
            "grid": { "width": 3, "height": 3, "cells": [1,0,0, 0,0,0, 0,0,0] },
            "players": [
                { "name": "minimax", "position": { "x": 0, "y": 0 } }
            ]
        }"#,
    );

    let response = bot().get_move(&state).await;
    assert_eq!(response["move"], "down");
}

#[tokio::test]
async fn test_get_move_when_trapped_answers_up() {
    let state = snapshot(
        r#"{
            "frame": 9,
            "grid": { "width": 2, "height": 2, "cells": [1,1, 1,2] },
            "players": [
                { "name": "minimax", "position": { "x": 0, "y": 0 } },
                { "name": "rival", "position": { "x": 1, "y": 1 } }
            ]
        }"#,
    );

    let response = bot().get_move(&state).await;
    assert_eq!(response["move"], "up");
}

#[tokio::test]
async fn test_get_move_with_off_grid_self_answers_up() {
    let state = snapshot(
        r#"{
            "frame": 2,
            "grid": { "width": 3, "height": 3, "cells": [0,0,0, 0,0,0, 0,0,2] },
            "players": [
                { "name": "minimax", "position": { "x": 2147483647, "y": 0 } },
                { "name": "rival", "position": { "x": 2, "y": 2 } }
            ]
        }"#,
    );

    let response = bot().get_move(&state).await;
    assert_eq!(response["move"], "up");
}

#[test]
fn test_decide_reports_every_candidate() {
    let state = snapshot(
        r#"{
            "grid": { "width": 5, "height": 1, "cells": [0,1,0,0,2] },
            "players": [
                { "name": "minimax", "position": { "x": 1, "y": 0 } },
                { "name": "rival", "position": { "x": 4, "y": 0 } }
            ]
        }"#,
    );

    let decision = bot().decide(&state).unwrap();
    let directions: Vec<Direction> = decision.scored_moves.iter().map(|m| m.direction).collect();
    assert_eq!(directions, vec![Direction::Left, Direction::Right]);
    assert_eq!(decision.direction, Direction::Right);
}

#[test]
fn test_decide_rejects_unknown_self() {
    let mut config = Config::default_hardcoded();
    config.bot.name = "nobody".to_string();
    let state = snapshot(
        r#"{
            "grid": { "width": 2, "height": 1, "cells": [1,2] },
            "players": [
                { "name": "minimax", "position": { "x": 0, "y": 0 } },
                { "name": "rival", "position": { "x": 1, "y": 0 } }
            ]
        }"#,
    );

    let err = Bot::new(config).decide(&state).unwrap_err();
    assert!(err.contains("nobody"));
}

#[test]
fn test_info_reports_name() {
    let info = bot().info();
    assert_eq!(info["apiversion"], "1");
    assert_eq!(info["name"], "minimax");
}
