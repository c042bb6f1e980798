// Unit tests for the replay module
//
// Tests the core functionality of the replay engine including:
// - Loading JSONL decision logs
// - Replaying individual frames
// - Validating expected moves
// - Generating statistics

use cycles_bot::config::Config;
use cycles_bot::replay::ReplayEngine;
use cycles_bot::types::Direction;
use std::path::PathBuf;

/// Helper function to get the path to test fixtures
fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(filename)
}

fn engine() -> ReplayEngine {
    ReplayEngine::new(Config::default_hardcoded(), false)
}

#[test]
fn test_load_log_file_corridor_game() {
    let entries = engine()
        .load_log_file(fixture_path("corridor_game.jsonl"))
        .expect("Failed to load corridor_game.jsonl");

    assert_eq!(entries.len(), 2, "Expected 2 log entries");
    assert_eq!(entries[0].frame, 0);
    assert_eq!(entries[0].chosen_move, Direction::Right);
    assert_eq!(entries[0].score, Some(0));
    assert_eq!(entries[1].frame, 1);
    assert_eq!(entries[1].chosen_move, Direction::Up);
    assert_eq!(entries[1].score, None);
    assert_eq!(entries[1].state.players.len(), 2);
}

#[test]
fn test_load_log_file_skips_blank_lines() {
    let entries = engine()
        .load_log_file(fixture_path("opening_mismatch.jsonl"))
        .expect("Failed to load opening_mismatch.jsonl");
    assert_eq!(entries.len(), 2);
}

#[test]
fn test_load_log_file_reports_bad_line() {
    let err = engine()
        .load_log_file(fixture_path("malformed.jsonl"))
        .unwrap_err();
    assert!(err.contains("line 2"), "unexpected error: {}", err);
}

#[test]
fn test_load_missing_file_fails() {
    assert!(engine()
        .load_log_file(fixture_path("does_not_exist.jsonl"))
        .is_err());
}

#[test]
fn test_replay_corridor_game_matches() {
    let engine = engine();
    let entries = engine
        .load_log_file(fixture_path("corridor_game.jsonl"))
        .unwrap();

    let results = engine.replay_all(&entries);
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.matches));

    // Frame 1: boxed in between both trails, no legal move
    assert_eq!(results[1].replayed_move, Direction::Up);
    assert_eq!(results[1].replayed_score, None);

    let stats = engine.generate_stats(&results);
    assert_eq!(stats.matches, 2);
    assert_eq!(stats.mismatches, 0);
    assert!((stats.match_rate - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_replay_detects_mismatch() {
    let engine = engine();
    let entries = engine
        .load_log_file(fixture_path("opening_mismatch.jsonl"))
        .unwrap();

    let results = engine.replay_all(&entries);
    assert_eq!(results.len(), 2);

    // The open 3x3 opening ties Down and Right; the tie goes to Down
    assert_eq!(results[0].frame, 0);
    assert_eq!(results[0].original_move, Direction::Right);
    assert_eq!(results[0].replayed_move, Direction::Down);
    assert!(!results[0].matches);

    assert_eq!(results[1].frame, 3);
    assert!(results[1].matches);
}

#[test]
fn test_replay_specific_frames() {
    let engine = engine();
    let entries = engine
        .load_log_file(fixture_path("opening_mismatch.jsonl"))
        .unwrap();

    let results = engine.replay_frames(&entries, &[3]).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].replayed_move, Direction::Right);

    assert!(engine.replay_frames(&entries, &[42]).is_err());
}

#[test]
fn test_replay_with_wrong_name_skips_entries() {
    let mut config = Config::default_hardcoded();
    config.bot.name = "stranger".to_string();
    let engine = ReplayEngine::new(config, false);
    let entries = engine
        .load_log_file(fixture_path("corridor_game.jsonl"))
        .unwrap();

    assert!(engine.replay_all(&entries).is_empty());
}

#[test]
fn test_validate_expected_moves() {
    let engine = engine();
    let entries = engine
        .load_log_file(fixture_path("corridor_game.jsonl"))
        .unwrap();

    assert!(engine
        .validate_expected_moves(&entries, &[(0, vec![Direction::Right])])
        .is_ok());
    assert!(engine
        .validate_expected_moves(&entries, &[(1, vec![Direction::Down, Direction::Up])])
        .is_ok());
    assert!(engine
        .validate_expected_moves(&entries, &[(0, vec![Direction::Left])])
        .is_err());
    assert!(engine
        .validate_expected_moves(&entries, &[(7, vec![Direction::Left])])
        .is_err());
}
