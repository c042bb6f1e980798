// Configuration module for reading Cycles.toml
// This module provides OOP-style configuration management for the light cycles bot

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub bot: BotConfig,
    pub search: SearchConfig,
    pub timing: TimingConfig,
    pub debug: DebugConfig,
}

/// Identity of our cycle
#[derive(Debug, Deserialize, Clone)]
pub struct BotConfig {
    /// Name matched against the snapshot's player list to find "self"
    pub name: String,
}

/// Search constants
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Total look-ahead in single-player plies, our first move included
    pub max_depth: u8,
}

/// Timing constants for the per-turn response
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    pub response_time_budget_ms: u64,
    pub network_overhead_ms: u64,
}

impl TimingConfig {
    /// Computes the effective computation budget
    pub fn effective_budget_ms(&self) -> u64 {
        self.response_time_budget_ms.saturating_sub(self.network_overhead_ms)
    }
}

/// Decision log configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Cycles.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Cycles.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Cycles.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Cycles.toml
    pub fn default_hardcoded() -> Self {
        Config {
            bot: BotConfig {
                name: "minimax".to_string(),
            },
            search: SearchConfig { max_depth: 3 },
            timing: TimingConfig {
                response_time_budget_ms: 400,
                network_overhead_ms: 50,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "cycles_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Cycles.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
