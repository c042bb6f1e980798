// Light cycles bot: glue between the game server surface and the search engine
//
// The bot knows which player it is (by configured name), turns each snapshot
// into a matchup, runs one decision under the response budget and reports the
// chosen direction.

use log::{info, warn};
use serde_json::{json, Value};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::engine::{legal_moves, Matchup};
use crate::search::{Decision, Searcher};
use crate::types::{Direction, GameState};

/// Light cycles bot with an OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with decision logging disabled
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Self::with_logger(config, DebugLogger::disabled())
    }

    /// Creates a new Bot instance that records every decision through `logger`
    pub fn with_logger(config: Config, logger: DebugLogger) -> Self {
        Bot { config, logger }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns bot metadata
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        json!({
            "apiversion": "1",
            "author": "cycles-bot",
            "name": self.config.bot.name,
            "version": env!("CARGO_PKG_VERSION"),
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, state: &GameState) {
        info!(
            "GAME START: {}x{} grid, {} players",
            state.grid.width(),
            state.grid.height(),
            state.players.len()
        );
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, state: &GameState) {
        info!("GAME OVER at frame {}", state.frame);
    }

    /// Resolves which player is us and which is the opponent
    ///
    /// # Returns
    /// * `Err` when our name is missing, when there is not exactly one other
    ///   player, or when a position lies off the grid
    pub fn matchup<'a>(&self, state: &'a GameState) -> Result<Matchup<'a>, String> {
        Self::resolve_matchup(state, &self.config.bot.name)
    }

    fn resolve_matchup<'a>(state: &'a GameState, name: &str) -> Result<Matchup<'a>, String> {
        let me = state
            .player(name)
            .ok_or_else(|| format!("Player '{}' not found in game state", name))?;

        let mut others = state.players.iter().filter(|p| p.name != name);
        let opponent = others
            .next()
            .ok_or_else(|| "No opponent found in game state".to_string())?;
        if others.next().is_some() {
            return Err(format!(
                "Expected exactly two players, got {}",
                state.players.len()
            ));
        }

        for player in [me, opponent] {
            if !state.grid.contains(player.position) {
                return Err(format!(
                    "Player '{}' at ({}, {}) is outside the {}x{} grid",
                    player.name,
                    player.position.x,
                    player.position.y,
                    state.grid.width(),
                    state.grid.height()
                ));
            }
        }

        Ok(Matchup {
            grid: &state.grid,
            me: me.position,
            opponent: opponent.position,
        })
    }

    /// Runs one synchronous decision for the given snapshot
    pub fn decide(&self, state: &GameState) -> Result<Decision, String> {
        Self::compute_decision(state, &self.config.bot.name, self.config.search.max_depth)
    }

    fn compute_decision(state: &GameState, name: &str, max_depth: u8) -> Result<Decision, String> {
        let matchup = Self::resolve_matchup(state, name)?;
        Ok(Searcher::new(max_depth).decide(&matchup))
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// The search runs on tokio's blocking pool under the effective time
    /// budget. If it fails or runs out of time we answer with our first legal
    /// move instead.
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move direction
    pub async fn get_move(&self, state: &GameState) -> Value {
        let start_time = Instant::now();
        info!("Frame {}: Computing move", state.frame);

        let budget = Duration::from_millis(self.config.timing.effective_budget_ms());
        let name = self.config.bot.name.clone();
        let max_depth = self.config.search.max_depth;
        let snapshot = state.clone();

        let outcome = tokio::time::timeout(
            budget,
            tokio::task::spawn_blocking(move || Self::compute_decision(&snapshot, &name, max_depth)),
        )
        .await;

        let (chosen_move, score) = match outcome {
            Ok(Ok(Ok(decision))) => {
                info!(
                    "Frame {}: Chose {} (score: {:?}, nodes: {}, cutoffs: {}, time: {}ms)",
                    state.frame,
                    decision.direction,
                    decision.score,
                    decision.stats.nodes,
                    decision.stats.cutoffs,
                    start_time.elapsed().as_millis()
                );
                (decision.direction, decision.score)
            }
            Ok(Ok(Err(e))) => {
                warn!("Frame {}: Invalid game state: {}", state.frame, e);
                (self.fallback_move(state), None)
            }
            Ok(Err(e)) => {
                warn!("Frame {}: Search task failed: {}", state.frame, e);
                (self.fallback_move(state), None)
            }
            Err(_) => {
                warn!(
                    "Frame {}: Search exceeded {}ms budget, using fallback",
                    state.frame,
                    budget.as_millis()
                );
                (self.fallback_move(state), None)
            }
        };

        self.logger.log_move(state.clone(), chosen_move, score);

        json!({ "move": chosen_move.as_str() })
    }

    /// First legal move for us, or the default direction if there is none.
    /// An off-grid position has no legal moves.
    fn fallback_move(&self, state: &GameState) -> Direction {
        state
            .player(&self.config.bot.name)
            .filter(|me| state.grid.contains(me.position))
            .and_then(|me| legal_moves(&state.grid, me.position).first().copied())
            .unwrap_or_default()
    }
}
