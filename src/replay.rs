// Replay module for analyzing logged games and debugging decision-making
//
// This module provides functionality to:
// 1. Parse JSONL decision logs
// 2. Re-run the decision on every logged snapshot
// 3. Compare logged vs replayed moves
// 4. Generate a summary report

use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::bot::Bot;
use crate::config::Config;
use crate::types::{Direction, GameState};

/// Represents a single entry from the decision log
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogEntry {
    pub frame: u32,
    pub chosen_move: Direction,
    #[serde(default)]
    pub score: Option<i32>,
    pub state: GameState,
    pub timestamp: String,
}

/// Result of replaying a single frame
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub frame: u32,
    pub original_move: Direction,
    pub replayed_move: Direction,
    pub matches: bool,
    pub original_score: Option<i32>,
    pub replayed_score: Option<i32>,
    pub nodes: u64,
    pub computation_time_ms: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_frames: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing decision logs
pub struct ReplayEngine {
    bot: Bot,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine {
            bot: Bot::new(config),
            verbose,
        }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        let start_time = Instant::now();
        let decision = self.bot.decide(&entry.state)?;
        let computation_time = start_time.elapsed().as_millis();

        let matches = entry.chosen_move == decision.direction;

        if self.verbose {
            if matches {
                info!(
                    "Frame {}: ✓ MATCH - {} (score: {:?}, nodes: {}, time: {}ms)",
                    entry.frame,
                    decision.direction,
                    decision.score,
                    decision.stats.nodes,
                    computation_time
                );
            } else {
                warn!(
                    "Frame {}: ✗ MISMATCH - Original: {}, Replayed: {} (score: {:?}, nodes: {}, time: {}ms)",
                    entry.frame,
                    entry.chosen_move,
                    decision.direction,
                    decision.score,
                    decision.stats.nodes,
                    computation_time
                );
            }
        }

        Ok(ReplayResult {
            frame: entry.frame,
            original_move: entry.chosen_move,
            replayed_move: decision.direction,
            matches,
            original_score: entry.score,
            replayed_score: decision.score,
            nodes: decision.stats.nodes,
            computation_time_ms: computation_time,
        })
    }

    /// Replays all entries in parallel, keeping log order.
    /// Entries that cannot be replayed are reported and skipped.
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        entries
            .par_iter()
            .map(|entry| (entry.frame, self.replay_entry(entry)))
            .collect::<Vec<_>>()
            .into_iter()
            .filter_map(|(frame, result)| match result {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Failed to replay frame {}: {}", frame, e);
                    None
                }
            })
            .collect()
    }

    /// Replays specific frames from a log file
    pub fn replay_frames(
        &self,
        entries: &[LogEntry],
        frame_numbers: &[u32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for frame in frame_numbers {
            let entry = entries
                .iter()
                .find(|e| e.frame == *frame)
                .ok_or_else(|| format!("Frame {} not found in log file", frame))?;

            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay frame {}: {}", frame, e);
                }
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_frames = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_frames - matches;
        let match_rate = if total_frames > 0 {
            (matches as f64 / total_frames as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_frames,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Frames:   {}", stats.total_frames);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_ms as f64)
                .sum::<f64>()
                / results.len() as f64;
            let avg_nodes: f64 =
                results.iter().map(|r| r.nodes as f64).sum::<f64>() / results.len() as f64;

            println!("Average Nodes Searched:     {:.1}", avg_nodes);
            println!("Average Computation Time:   {:.1}ms\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Frame {}: {} → {} (score: {:?} → {:?}, nodes: {}, time: {}ms)",
                    result.frame,
                    result.original_move,
                    result.replayed_move,
                    result.original_score,
                    result.replayed_score,
                    result.nodes,
                    result.computation_time_ms
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(u32, Vec<Direction>)], // (frame, acceptable_moves)
    ) -> Result<(), String> {
        for (frame, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.frame == *frame)
                .ok_or_else(|| format!("Frame {} not found in log", frame))?;

            if !acceptable.contains(&entry.chosen_move) {
                return Err(format!(
                    "Frame {}: Expected one of {:?}, but got {}",
                    frame,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    entry.chosen_move
                ));
            }
        }

        Ok(())
    }
}
