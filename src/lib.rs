// Library exports for the light cycles bot
// This allows the replay tool and the tests to use the core decision logic

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod engine;
pub mod grid;
pub mod replay;
pub mod search;
pub mod types;
